// src/noyau/erreur.rs
//
// Erreurs du noyau (terminales pour un appel d’évaluation).
// - validation d’entrée : caractère, parenthèses
// - arithmétique : division par zéro, domaine
// - structure : réduction qui ne converge pas vers une seule valeur
//
// Les messages restent en anglais : la couche présentation choisit son rendu
// à partir de `kind()`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),

    #[error("mismatched parentheses")]
    MismatchedParentheses,

    #[error("empty parentheses")]
    EmptyParentheses,

    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic domain error: {0}")]
    ArithmeticDomainError(String),

    #[error("malformed expression: {0}")]
    MalformedExpression(String),

    #[error("equation is not linear in x: {0}")]
    NotLinear(String),
}

/// Nom de l’erreur côté interface publique.
pub type EvaluationError = EvalError;

/// Genre d’erreur, sans détail (pour les gabarits / la localisation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCharacter,
    MismatchedParentheses,
    EmptyParentheses,
    DivisionByZero,
    ArithmeticDomainError,
    MalformedExpression,
    NotLinear,
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::InvalidCharacter(_) => ErrorKind::InvalidCharacter,
            EvalError::MismatchedParentheses => ErrorKind::MismatchedParentheses,
            EvalError::EmptyParentheses => ErrorKind::EmptyParentheses,
            EvalError::DivisionByZero => ErrorKind::DivisionByZero,
            EvalError::ArithmeticDomainError(_) => ErrorKind::ArithmeticDomainError,
            EvalError::MalformedExpression(_) => ErrorKind::MalformedExpression,
            EvalError::NotLinear(_) => ErrorKind::NotLinear,
        }
    }

    pub(crate) fn domaine(msg: impl Into<String>) -> Self {
        EvalError::ArithmeticDomainError(msg.into())
    }

    pub(crate) fn malforme(msg: impl Into<String>) -> Self {
        EvalError::MalformedExpression(msg.into())
    }
}
