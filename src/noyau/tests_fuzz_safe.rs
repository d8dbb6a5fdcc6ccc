//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée, exposants petits
//! - budget temps global
//! - on accepte certaines erreurs attendues (division par zéro, domaine)
//! - invariant clé : la dernière étape porte la valeur finale

use std::time::{Duration, Instant};

use super::{evaluate, evaluate_with, ErrorKind, EvalError, Reglages, StepKind};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &EvalError) -> bool {
    // Liste blanche : le générateur ne produit que des expressions bien formées,
    // seules l’arithmétique peut échouer.
    matches!(
        e.kind(),
        ErrorKind::DivisionByZero | ErrorKind::ArithmeticDomainError
    )
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atom(rng: &mut Rng) -> String {
    let n = rng.pick(10);
    match rng.pick(6) {
        0 => format!("-{n}"),
        1 => format!("{n}.5"),
        2 => "(3-3)".to_string(),
        _ => format!("{n}"),
    }
}

fn gen_op(rng: &mut Rng) -> &'static str {
    match rng.pick(6) {
        0 => "+",
        1 => "-",
        2 => "*",
        3 => "/",
        4 => "×",
        _ => "÷",
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(7) {
        0 => gen_atom(rng),
        1 => format!(
            "({} {} {})",
            gen_expr(rng, depth - 1),
            gen_op(rng),
            gen_expr(rng, depth - 1)
        ),
        2 => format!(
            "{} {} {}",
            gen_expr(rng, depth - 1),
            gen_op(rng),
            gen_expr(rng, depth - 1)
        ),
        3 => format!("-({})", gen_expr(rng, depth - 1)),
        4 => format!("({})^{}", gen_expr(rng, depth - 1), rng.pick(3)),
        5 => format!("({})**0.5", gen_expr(rng, depth - 1)),
        _ => {
            if rng.coin() {
                format!("{} / (2 - 2)", gen_atom(rng))
            } else {
                format!("({})", gen_expr(rng, depth - 1))
            }
        }
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_derniere_etape() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        let premier = evaluate(&expr);
        assert_eq!(premier, evaluate(&expr), "non déterministe: {expr:?}");

        match premier {
            Ok(r) => {
                if let Some(derniere) = r.steps.last() {
                    assert_eq!(derniere.result(), r.value.to_string(), "expr={expr:?}");
                }
                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_caracteres_au_hasard() {
    // Soupe de caractères : jamais de panique, seulement Ok ou une erreur typée.
    const ALPHABET: &[char] = &[
        '1', '2', '0', '.', ',', '+', '-', '*', '/', '^', '(', ')', ' ', '×', '÷', 'x', 'a', '=',
    ];
    let t0 = Instant::now();
    let max = Duration::from_secs(2);
    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..400 {
        budget(t0, max);
        let n = 1 + rng.pick(14) as usize;
        let expr: String = (0..n)
            .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
            .collect();

        if let Ok(r) = evaluate(&expr) {
            let binaires = r
                .steps
                .iter()
                .filter(|e| e.kind() == StepKind::BinaryOp)
                .count();
            assert!(binaires <= n, "expr={expr:?}");
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let expr = somme_balancee("1/2", 400);
    let r = evaluate(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 400*(1/2) = 200
    assert_eq!(r.value.to_string(), "200");
}

#[test]
fn fuzz_safe_entree_geante_refusee() {
    let expr = somme_balancee("1", 3000);
    assert!(matches!(
        evaluate_with(&expr, &Reglages::default()),
        Err(EvalError::MalformedExpression(_))
    ));
}
