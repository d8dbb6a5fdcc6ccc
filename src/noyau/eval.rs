//! Noyau — évaluation (pipeline réel)
//!
//! normalisation -> jetons (+ moins unaire) -> parenthèses (intérieur d’abord)
//!        -> réduction par précédence -> arithmétique exacte -> valeur + démarche
//!
//! Fonction pure : chaque appel possède ses jetons et ses étapes, aucun état partagé.

use log::debug;

use super::erreur::EvalError;
use super::etape::Step;
use super::jetons::{format_tokens, tokenize};
use super::lecture::lecture_decimale;
use super::nombre::Nombre;
use super::normalise::normaliser;
use super::parentheses::resoudre;
use super::reglages::Reglages;

/// Résultat complet d’une évaluation (possédé par l’appelant).
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationResult {
    /// Valeur exacte.
    pub value: Nombre,
    /// Démarche, dans l’ordre de lecture.
    pub steps: Vec<Step>,
    /// Jetons après réécriture du moins unaire (texte).
    pub jetons: String,
    /// Lecture décimale tronquée de `value`.
    pub lecture: String,
}

/// API publique : évalue une expression avec les réglages par défaut.
pub fn evaluate(raw_input: &str) -> Result<EvaluationResult, EvalError> {
    evaluate_with(raw_input, &Reglages::default())
}

pub fn evaluate_with(raw_input: &str, reglages: &Reglages) -> Result<EvaluationResult, EvalError> {
    let s = entree_bornee(raw_input, reglages)?;

    let propre = normaliser(s)?;
    let jetons = tokenize(&propre)?;
    let jetons_txt = format_tokens(&jetons);
    debug!("jetons: {jetons_txt}");

    let (value, steps) = resoudre(jetons, reglages)?;
    debug!("valeur: {value} ({} étapes)", steps.len());

    Ok(EvaluationResult {
        lecture: lecture_decimale(&value, reglages.digits),
        value,
        steps,
        jetons: jetons_txt,
    })
}

/// Entrée non vide et de longueur bornée (travail borné par appel).
pub(crate) fn entree_bornee<'a>(raw: &'a str, reglages: &Reglages) -> Result<&'a str, EvalError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(EvalError::malforme("empty expression"));
    }
    if s.chars().count() > reglages.longueur_max {
        return Err(EvalError::malforme(format!(
            "input longer than {} characters",
            reglages.longueur_max
        )));
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::erreur::ErrorKind;
    use crate::noyau::etape::StepKind;

    fn ok(s: &str) -> EvaluationResult {
        evaluate(s).unwrap_or_else(|e| panic!("evaluate({s:?}) erreur: {e}"))
    }

    fn valeur(s: &str) -> String {
        ok(s).value.to_string()
    }

    fn genre(s: &str) -> ErrorKind {
        match evaluate(s) {
            Ok(r) => panic!("evaluate({s:?}) aurait dû échouer, valeur {}", r.value),
            Err(e) => e.kind(),
        }
    }

    #[test]
    fn precedence_et_parentheses() {
        assert_eq!(valeur("2+3*4"), "14");
        assert_eq!(valeur("(2+3)*4"), "20");
        assert_eq!(valeur("10-3-2"), "5");
    }

    #[test]
    fn moins_unaire() {
        assert_eq!(valeur("-5+3"), "-2");
        assert_eq!(valeur("-(2+3)"), "-5");
        assert_eq!(valeur("--5"), "5");
        assert_eq!(valeur("-+5"), "-5");
        assert_eq!(valeur("3 * -(1 - 4)"), "9");
    }

    #[test]
    fn moins_unaire_colle_au_nombre_avant_la_puissance() {
        // -2 est un littéral : (-2)**2
        assert_eq!(valeur("-2^2"), "4");
        assert_eq!(valeur("0-2^2"), "-4");
    }

    #[test]
    fn exposants() {
        assert_eq!(valeur("2**3"), "8");
        assert_eq!(valeur("2^3"), "8");
        assert_eq!(valeur("(5+3)^2"), "64");
        assert_eq!(valeur("2^0.5"), "√2");
        assert_eq!(valeur("8^(1/3) + 2^0.5"), "2 + √2");
    }

    #[test]
    fn racines_saisies_comme_affichees() {
        assert_eq!(valeur("√2 * √2"), "2");
        assert_eq!(valeur("3√2/4"), "3√2/4");
        assert_eq!(valeur("⁵√7"), "⁵√7");
        assert_eq!(valeur("(1 + √2)^2"), "3 + 2√2");
        // chaque valeur affichée se relit à l’identique
        for s in ["2^0.5 / 2", "1 - 2^0.5", "2^(1/3) * 2^0.5", "-(3^0.5)/2"] {
            let affiche = valeur(s);
            assert_eq!(valeur(&affiche), affiche, "{s:?}");
        }
    }

    #[test]
    fn glyphes_et_decimaux() {
        assert_eq!(valeur("3 × 4"), "12");
        assert_eq!(valeur("3x4"), "12");
        assert_eq!(valeur("12 ÷ 8"), "3/2");
        assert_eq!(valeur("1,5 + 0.25"), "7/4");
        assert_eq!(valeur("7/2"), "7/2");
    }

    #[test]
    fn erreurs() {
        assert_eq!(genre("4/0"), ErrorKind::DivisionByZero);
        assert_eq!(genre("(2+3"), ErrorKind::MismatchedParentheses);
        assert_eq!(genre("()"), ErrorKind::EmptyParentheses);
        assert_eq!(genre("2+@"), ErrorKind::InvalidCharacter);
        assert_eq!(genre("0^-1"), ErrorKind::ArithmeticDomainError);
        assert_eq!(genre("(-4)^0.5"), ErrorKind::ArithmeticDomainError);
        assert_eq!(genre("2 3"), ErrorKind::MalformedExpression);
        assert_eq!(genre("   "), ErrorKind::MalformedExpression);
        assert_eq!(genre("1.2.3 + 1"), ErrorKind::MalformedExpression);
    }

    #[test]
    fn division_par_zero_tardive() {
        // l’erreur arrive pendant la réduction, aucune valeur partielle
        assert_eq!(
            evaluate("1 + 2 * (3 / (2 - 2))").unwrap_err(),
            EvalError::DivisionByZero
        );
    }

    #[test]
    fn entree_trop_longue() {
        let r = Reglages {
            longueur_max: 8,
            ..Reglages::default()
        };
        assert!(matches!(
            evaluate_with("1+1+1+1+1", &r),
            Err(EvalError::MalformedExpression(_))
        ));
        assert!(evaluate_with("1+1+1+1", &r).is_ok());
    }

    #[test]
    fn exposant_borne_par_reglages() {
        let r = Reglages {
            exposant_max: 10,
            ..Reglages::default()
        };
        assert!(evaluate_with("2^10", &r).is_ok());
        assert!(matches!(
            evaluate_with("2^11", &r),
            Err(EvalError::ArithmeticDomainError(_))
        ));
    }

    #[test]
    fn puissances_enchainees_refusees_sans_calcul() {
        // chaque exposant est admis, le résultat (~16 millions de chiffres) ne l’est pas
        for s in ["9^4096^4096", "(2^4096)^4096", "(1/3)^4096^4096"] {
            assert_eq!(
                evaluate(s).unwrap_err(),
                EvalError::ArithmeticDomainError("result too large".into()),
                "{s:?}"
            );
        }
        assert!(evaluate("9^4096").is_ok());
    }

    #[test]
    fn taille_bornee_par_reglages() {
        let r = Reglages {
            bits_max: 100,
            ..Reglages::default()
        };
        assert!(evaluate_with("2^40 * 2^40", &r).is_ok());
        assert!(matches!(
            evaluate_with("2^40 * 2^40 * 2^40", &r),
            Err(EvalError::ArithmeticDomainError(_))
        ));
    }

    #[test]
    fn demarche_et_lecture() {
        let r = ok("(5+3)^2 / 3");
        assert_eq!(r.jetons, "( 5 + 3 ) ** 2 / 3");
        let d: Vec<_> = r.steps.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(
            d,
            vec![
                "Compute 5 + 3 → 8 (add)",
                "Simplify (5 + 3) → 8",
                "Compute 8 ** 2 → 64 (power)",
                "Compute 64 / 3 → 64/3 (divide)",
            ]
        );
        assert_eq!(r.steps.last().map(|e| e.result()), Some("64/3"));
        assert_eq!(r.value.to_string(), "64/3");
        assert!(r.lecture.starts_with("21.3333333333"));
    }

    #[test]
    fn ordre_des_groupes() {
        let r = ok("((1+2)*(3+4))");
        let genres: Vec<_> = r.steps.iter().map(|e| e.kind()).collect();
        assert_eq!(
            genres,
            vec![
                StepKind::BinaryOp,
                StepKind::GroupSimplify,
                StepKind::BinaryOp,
                StepKind::GroupSimplify,
                StepKind::BinaryOp,
                StepKind::GroupSimplify,
            ]
        );
        assert_eq!(r.steps[1].description, "Simplify (1 + 2) → 3");
        assert_eq!(r.steps[3].description, "Simplify (3 + 4) → 7");
        assert_eq!(r.steps[4].description, "Compute 3 * 7 → 21 (multiply)");
    }
}
