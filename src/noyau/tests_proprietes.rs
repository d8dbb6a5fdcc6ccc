//! Tests de propriétés (campagne) : la démarche doit pouvoir se rejouer.
//!
//! - dernière étape = valeur finale
//! - chaque étape "Compute a op b → r" se recalcule à part et redonne r
//! - chaque "Simplify (…) → r" se recalcule à part et redonne r
//! - normalisation idempotente
//! - ordre des groupes imbriqués

use super::etape::StepDetail;
use super::normalise::normaliser;
use super::{evaluate, ErrorKind, StepKind};

const CORPUS: &[&str] = &[
    "2+3*4",
    "(2+3)*4",
    "10-3-2",
    "2**3",
    "2^3^2",
    "-5+3",
    "-(2+3)",
    "((1+2)*(3+4))",
    "(5+3)^2 / 3",
    "7/2 - 1/3 * 6",
    "1 - 2 * (3 - 10) / 4",
    "-(-(-2)) * 3 ** 2",
    "(1/2)^3 + 2^-2",
    "((12 - 4) / (3 - 5)) ** 2 - 100",
    "3 * -(1 - 4) / 7",
    "2 ** (1 + 1) ** 2",
    // valeurs irrationnelles : les opérandes rejoués portent des racines
    "2**(1/2)*2**(1/2)",
    "8^(1/3) + 2^0.5",
    "(1 + 2^0.5)^2",
    "3 * 2^0.5 / 4 - 1",
    "-(3^0.5)/2 + 1/2",
    "5^(1/5) * 2",
    "(2^0.5)^3 / 12^0.5",
    "1 / (1 + 2^0.5)",
];

fn rejouer(expr: &str) {
    let r = evaluate(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));

    if let Some(derniere) = r.steps.last() {
        assert_eq!(derniere.result(), r.value.to_string(), "expr={expr:?}");
    }

    for etape in &r.steps {
        let (sous_expr, attendu) = match &etape.detail {
            StepDetail::BinaryOp {
                op,
                left,
                right,
                result,
            } => (format!("{left} {op} {right}"), result),
            StepDetail::GroupSimplify { inner, result } => (inner.clone(), result),
            autre => panic!("étape inattendue pour une expression: {autre:?}"),
        };
        let rejeu = evaluate(&sous_expr)
            .unwrap_or_else(|e| panic!("rejeu {sous_expr:?} (depuis {expr:?}) err={e}"));
        assert_eq!(
            &rejeu.value.to_string(),
            attendu,
            "rejeu {sous_expr:?} (depuis {expr:?})"
        );
    }
}

#[test]
fn prop_demarche_rejouable() {
    for expr in CORPUS {
        rejouer(expr);
    }
}

#[test]
fn prop_nombre_d_etapes_binaires() {
    // une étape binaire par opérateur binaire de l’entrée
    assert_eq!(evaluate("1+2+3+4").unwrap().steps.len(), 3);
    let r = evaluate("(1+2)*(3-4)/5").unwrap();
    let binaires = r
        .steps
        .iter()
        .filter(|e| e.kind() == StepKind::BinaryOp)
        .count();
    assert_eq!(binaires, 4);
}

#[test]
fn prop_valeurs_de_reference() {
    let cas = [
        ("2+3*4", "14"),
        ("(2+3)*4", "20"),
        ("10-3-2", "5"),
        ("-5+3", "-2"),
        ("-(2+3)", "-5"),
        ("2**3", "8"),
        ("2^3", "8"),
    ];
    for (expr, attendu) in cas {
        assert_eq!(evaluate(expr).unwrap().value.to_string(), attendu, "{expr:?}");
    }
}

#[test]
fn prop_ordre_groupes_imbriques() {
    let r = evaluate("((1+2)*(3+4))").unwrap();
    let position = |texte: &str| {
        r.steps
            .iter()
            .position(|e| e.description == texte)
            .unwrap_or_else(|| panic!("étape absente: {texte}"))
    };
    let gauche = position("Simplify (1 + 2) → 3");
    let droite = position("Simplify (3 + 4) → 7");
    let produit = position("Compute 3 * 7 → 21 (multiply)");
    assert!(gauche < droite && droite < produit);
}

#[test]
fn prop_erreurs_sans_valeur() {
    let cas = [
        ("4/0", ErrorKind::DivisionByZero),
        ("(2+3", ErrorKind::MismatchedParentheses),
        ("()", ErrorKind::EmptyParentheses),
        ("2+@", ErrorKind::InvalidCharacter),
    ];
    for (expr, genre) in cas {
        assert_eq!(evaluate(expr).unwrap_err().kind(), genre, "{expr:?}");
    }
}

#[test]
fn prop_normalisation_idempotente() {
    let entrees = [
        "3 × 4 ÷ 2",
        "2^3 + 1,5",
        "(1 + 2) x 3",
        "2**3",
        "  7 - -2  ",
        "12÷(4−1)",
        "3√2/4 - ∛5",
        "⁵√(1 + √2)",
    ];
    for e in entrees {
        let Ok(une) = normaliser(e) else {
            continue;
        };
        let deux = normaliser(&une).unwrap_or_else(|err| panic!("{une:?} : {err}"));
        assert_eq!(une, deux, "entrée {e:?}");
    }
}
