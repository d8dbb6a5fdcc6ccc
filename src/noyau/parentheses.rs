// src/noyau/parentheses.rs
//
// Résolution des parenthèses, de l’intérieur vers l’extérieur.
// Boucle : première `)` de la suite + dernière `(` qui la précède
//   => groupe le plus intérieur (et le plus à gauche parmi les frères)
//   => réduction du contenu, étape "Simplify", remplacement par la valeur.
// Plus aucune parenthèse : une dernière réduction sur la suite plate.

use log::trace;

use super::erreur::EvalError;
use super::etape::{Step, StepDetail};
use super::jetons::{format_tokens, Tok, Valeur};
use super::reduction::reduire;
use super::reglages::Reglages;

pub fn resoudre<V: Valeur>(
    jetons: Vec<Tok<V>>,
    reglages: &Reglages,
) -> Result<(V, Vec<Step>), EvalError> {
    let mut toks = jetons;
    let mut etapes = Vec::new();

    while let Some(fin) = toks.iter().position(|t| matches!(t, Tok::RPar)) {
        let debut = toks[..fin]
            .iter()
            .rposition(|t| matches!(t, Tok::LPar))
            .ok_or(EvalError::MismatchedParentheses)?;

        let dedans = &toks[debut + 1..fin];
        if dedans.is_empty() {
            return Err(EvalError::EmptyParentheses);
        }

        let (valeur, sous) = reduire(dedans, reglages)?;
        etapes.extend(sous);

        let etape = Step::new(StepDetail::GroupSimplify {
            inner: format_tokens(dedans),
            result: valeur.to_string(),
        });
        trace!("{etape}");
        etapes.push(etape);

        let mut suite = Vec::with_capacity(toks.len() - (fin - debut));
        suite.extend_from_slice(&toks[..debut]);
        suite.push(Tok::Num(valeur));
        suite.extend_from_slice(&toks[fin + 1..]);
        toks = suite;
    }

    // une `(` sans `)` après elle
    if toks.iter().any(|t| matches!(t, Tok::LPar)) {
        return Err(EvalError::MismatchedParentheses);
    }

    let (valeur, fin) = reduire(&toks, reglages)?;
    etapes.extend(fin);
    Ok((valeur, etapes))
}
