// src/noyau/reduction.rs
//
// Réduction par groupes de précédence d’une suite PLATE (sans parenthèses) :
//   [**]  puis  [* /]  puis  [+ -]
// Chaque groupe = un balayage complet gauche -> droite ; chaque occurrence
// (gauche, op, droite) est remplacée par son résultat et produit une étape.
// Après un remplacement on repart du résultat : 10-3-2 = (10-3)-2.

use log::trace;

use super::erreur::EvalError;
use super::etape::{Step, StepDetail};
use super::jetons::{format_tokens, Op, Tok, Valeur};
use super::reglages::Reglages;

const GROUPES: [&[Op]; 3] = [&[Op::Pow], &[Op::Star, Op::Slash], &[Op::Plus, Op::Minus]];

/// Réduit une suite plate à une seule valeur.
///
/// Il doit rester exactement un jeton valeur à la fin ; sinon l’expression
/// est malformée (pas de troncature silencieuse).
pub fn reduire<V: Valeur>(jetons: &[Tok<V>], reglages: &Reglages) -> Result<(V, Vec<Step>), EvalError> {
    let mut toks: Vec<Tok<V>> = jetons.to_vec();
    let mut etapes = Vec::new();

    for groupe in GROUPES {
        let mut i = 0;
        while i < toks.len() {
            let op = match toks[i] {
                Tok::Op(op) if groupe.contains(&op) => op,
                Tok::LPar | Tok::RPar => {
                    return Err(EvalError::malforme("parenthesis left in a flat sequence"))
                }
                _ => {
                    i += 1;
                    continue;
                }
            };

            let gauche = match i.checked_sub(1).map(|g| &toks[g]) {
                Some(Tok::Num(v)) => v,
                _ => return Err(operande_manquant(op)),
            };
            let droite = match toks.get(i + 1) {
                Some(Tok::Num(v)) => v,
                _ => return Err(operande_manquant(op)),
            };

            let res = gauche.appliquer(op, droite, reglages)?;
            let etape = Step::new(StepDetail::BinaryOp {
                op,
                left: gauche.texte_operande(),
                right: droite.texte_operande(),
                result: res.to_string(),
            });
            trace!("{etape}");
            etapes.push(etape);

            // (gauche, op, droite) -> res, dans une nouvelle suite
            let mut suite = Vec::with_capacity(toks.len() - 2);
            suite.extend_from_slice(&toks[..i - 1]);
            suite.push(Tok::Num(res));
            suite.extend_from_slice(&toks[i + 2..]);
            toks = suite;

            i -= 1;
        }
    }

    match toks.as_slice() {
        [Tok::Num(v)] => Ok((v.clone(), etapes)),
        [] => Err(EvalError::malforme("empty expression")),
        _ => Err(EvalError::malforme(format!(
            "does not reduce to a single value: {}",
            format_tokens(&toks)
        ))),
    }
}

fn operande_manquant(op: Op) -> EvalError {
    EvalError::malforme(format!("operator '{op}' is missing an operand"))
}
