//! Noyau exact pas à pas
//!
//! Organisation interne :
//! - normalise.rs   : glyphes (× ÷ ^ ,) -> forme canonique + caractères permis
//! - jetons.rs      : tokenisation + moins unaire + trait `Valeur`
//! - nombre.rs      : nombres exacts (rationnels + radicaux canoniques)
//! - arith.rs       : + - * / ** exacts
//! - reduction.rs   : réduction par groupes de précédence (suite plate)
//! - parentheses.rs : groupes, de l’intérieur vers l’extérieur
//! - etape.rs       : démarche (Step) + gabarits FR/EN
//! - lecture.rs     : lecture décimale tronquée
//! - equation.rs    : équation du premier degré en x
//! - eval.rs        : pipeline complet

pub mod arith;
pub mod equation;
pub mod erreur;
pub mod etape;
pub mod eval;
pub mod jetons;
pub mod lecture;
pub mod nombre;
pub mod normalise;
pub mod parentheses;
pub mod reduction;
pub mod reglages;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique
pub use equation::{solve_linear, solve_linear_with, EquationResult, Resolution};
pub use erreur::{ErrorKind, EvalError, EvaluationError};
pub use etape::{Anglais, Francais, Gabarit, Step, StepDetail, StepKind};
pub use eval::{evaluate, evaluate_with, EvaluationResult};
pub use nombre::Nombre;
pub use reglages::Reglages;
