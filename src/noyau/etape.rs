// src/noyau/etape.rs
//
// Étapes de la démarche (ordre de lecture d’un élève).
// Chaque étape garde son détail structuré (opérateur, textes des opérandes,
// résultat) : la couche présentation peut la re-rendre avec son propre gabarit.
// `description` = rendu par le gabarit anglais par défaut.

use std::fmt;

use super::jetons::Op;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepKind {
    BinaryOp,
    GroupSimplify,
    Rearrange,
    Isolate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepDetail {
    /// `left op right → result`
    BinaryOp {
        op: Op,
        left: String,
        right: String,
        result: String,
    },
    /// `(inner) → result`
    GroupSimplify { inner: String, result: String },
    /// Équation regroupée : `coefficient·x = constant`
    Rearrange { coefficient: String, constant: String },
    /// Division des deux membres : `x = result`
    Isolate { coefficient: String, result: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub description: String,
    pub detail: StepDetail,
}

impl Step {
    pub fn new(detail: StepDetail) -> Self {
        Self {
            description: Anglais.rendre(&detail),
            detail,
        }
    }

    pub fn kind(&self) -> StepKind {
        match self.detail {
            StepDetail::BinaryOp { .. } => StepKind::BinaryOp,
            StepDetail::GroupSimplify { .. } => StepKind::GroupSimplify,
            StepDetail::Rearrange { .. } => StepKind::Rearrange,
            StepDetail::Isolate { .. } => StepKind::Isolate,
        }
    }

    /// Texte du résultat porté par l’étape.
    pub fn result(&self) -> &str {
        match &self.detail {
            StepDetail::BinaryOp { result, .. }
            | StepDetail::GroupSimplify { result, .. }
            | StepDetail::Isolate { result, .. } => result,
            StepDetail::Rearrange { constant, .. } => constant,
        }
    }

    pub fn rendre_avec(&self, gabarit: &dyn Gabarit) -> String {
        gabarit.rendre(&self.detail)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/* ------------------------ Gabarits ------------------------ */

/// Rendu texte d’une étape (localisable).
pub trait Gabarit {
    fn nom_operation(&self, op: Op) -> &'static str;
    fn rendre(&self, detail: &StepDetail) -> String;
}

/// Gabarit par défaut.
#[derive(Clone, Copy, Debug, Default)]
pub struct Anglais;

#[derive(Clone, Copy, Debug, Default)]
pub struct Francais;

impl Gabarit for Anglais {
    fn nom_operation(&self, op: Op) -> &'static str {
        match op {
            Op::Plus => "add",
            Op::Minus => "subtract",
            Op::Star => "multiply",
            Op::Slash => "divide",
            Op::Pow => "power",
        }
    }

    fn rendre(&self, detail: &StepDetail) -> String {
        match detail {
            StepDetail::BinaryOp {
                op,
                left,
                right,
                result,
            } => format!(
                "Compute {left} {op} {right} → {result} ({})",
                self.nom_operation(*op)
            ),
            StepDetail::GroupSimplify { inner, result } => {
                format!("Simplify ({inner}) → {result}")
            }
            StepDetail::Rearrange {
                coefficient,
                constant,
            } => format!("Gather the x terms on the left: {coefficient}x = {constant}"),
            StepDetail::Isolate {
                coefficient,
                result,
            } => format!("Divide both sides by {coefficient}: x = {result}"),
        }
    }
}

impl Gabarit for Francais {
    fn nom_operation(&self, op: Op) -> &'static str {
        match op {
            Op::Plus => "addition",
            Op::Minus => "soustraction",
            Op::Star => "multiplication",
            Op::Slash => "division",
            Op::Pow => "puissance",
        }
    }

    fn rendre(&self, detail: &StepDetail) -> String {
        match detail {
            StepDetail::BinaryOp {
                op,
                left,
                right,
                result,
            } => format!(
                "Calculer {left} {op} {right} → {result} ({})",
                self.nom_operation(*op)
            ),
            StepDetail::GroupSimplify { inner, result } => {
                format!("Simplifier ({inner}) → {result}")
            }
            StepDetail::Rearrange {
                coefficient,
                constant,
            } => format!("Regrouper les termes en x à gauche : {coefficient}x = {constant}"),
            StepDetail::Isolate {
                coefficient,
                result,
            } => format!("Diviser les deux membres par {coefficient} : x = {result}"),
        }
    }
}
