// src/noyau/equation.rs
//
// Équation du premier degré à UNE inconnue x : `gauche = droite`.
// Chaque membre passe par le même pipeline que les expressions
// (jetons, moins unaire, parenthèses, précédence) mais sur des valeurs
// linéaires a·x + b à coefficients rationnels. Puis :
//   (a1 - a2)·x = b2 - b1   (étape Rearrange)
//   x = (b2 - b1)/(a1 - a2) (étape Isolate)

use std::fmt;

use log::debug;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::arith;
use super::erreur::EvalError;
use super::etape::{Step, StepDetail};
use super::eval::entree_bornee;
use super::jetons::{balayer, reecrire_moins_unaire, Atome, Op, Tok, Valeur};
use super::nombre::Nombre;
use super::normalise::normaliser_equation;
use super::parentheses::resoudre;
use super::reglages::Reglages;

/// a·x + b
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lineaire {
    pub a: BigRational,
    pub b: BigRational,
}

impl Lineaire {
    fn constante(b: BigRational) -> Self {
        Self {
            a: BigRational::zero(),
            b,
        }
    }

    fn inconnue() -> Self {
        Self {
            a: BigRational::one(),
            b: BigRational::zero(),
        }
    }

    fn echelle(&self, k: &BigRational) -> Self {
        Self {
            a: &self.a * k,
            b: &self.b * k,
        }
    }

    fn est_constante(&self) -> bool {
        self.a.is_zero()
    }
}

fn format_rat(r: &BigRational) -> String {
    Nombre::Rat(r.clone()).to_string()
}

impl fmt::Display for Lineaire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a.is_zero() {
            return f.write_str(&format_rat(&self.b));
        }

        if self.a.is_one() {
            f.write_str("x")?;
        } else if self.a == -BigRational::one() {
            f.write_str("-x")?;
        } else if self.a.is_integer() {
            write!(f, "{}x", self.a)?;
        } else {
            write!(f, "({})x", format_rat(&self.a))?;
        }

        if self.b.is_positive() {
            write!(f, " + {}", format_rat(&self.b))?;
        } else if self.b.is_negative() {
            write!(f, " - {}", format_rat(&-self.b.clone()))?;
        }
        Ok(())
    }
}

impl Valeur for Lineaire {
    fn moins_un() -> Self {
        Self::constante(-BigRational::one())
    }

    fn oppose(&self) -> Self {
        Self {
            a: -self.a.clone(),
            b: -self.b.clone(),
        }
    }

    fn appliquer(&self, op: Op, rhs: &Self, reglages: &Reglages) -> Result<Self, EvalError> {
        match op {
            Op::Plus => Ok(Self {
                a: &self.a + &rhs.a,
                b: &self.b + &rhs.b,
            }),
            Op::Minus => Ok(Self {
                a: &self.a - &rhs.a,
                b: &self.b - &rhs.b,
            }),
            Op::Star => {
                if self.est_constante() {
                    Ok(rhs.echelle(&self.b))
                } else if rhs.est_constante() {
                    Ok(self.echelle(&rhs.b))
                } else {
                    Err(EvalError::NotLinear(format!("({self}) * ({rhs})")))
                }
            }
            Op::Slash => {
                if !rhs.est_constante() {
                    return Err(EvalError::NotLinear(format!("division by {rhs}")));
                }
                if rhs.b.is_zero() {
                    return Err(EvalError::DivisionByZero);
                }
                Ok(self.echelle(&rhs.b.recip()))
            }
            Op::Pow => {
                if !rhs.est_constante() {
                    return Err(EvalError::NotLinear(format!("x in the exponent {rhs}")));
                }
                if self.est_constante() {
                    let v = arith::appliquer(
                        &Nombre::Rat(self.b.clone()),
                        Op::Pow,
                        &Nombre::Rat(rhs.b.clone()),
                        reglages,
                    )?;
                    return match v {
                        Nombre::Rat(r) => Ok(Self::constante(r)),
                        Nombre::Irrationnel(_) => Err(EvalError::domaine(format!(
                            "irrational coefficient {v} in an equation"
                        ))),
                    };
                }
                if rhs.b.is_one() {
                    Ok(self.clone())
                } else if rhs.b.is_zero() {
                    Ok(Self::constante(BigRational::one()))
                } else {
                    Err(EvalError::NotLinear(format!(
                        "({self}) ** {}",
                        format_rat(&rhs.b)
                    )))
                }
            }
        }
    }

    fn texte_operande(&self) -> String {
        let nu = if self.a.is_zero() {
            self.b.is_integer() && !self.b.is_negative()
        } else {
            self.b.is_zero() && self.a.is_integer() && self.a.is_positive()
        };
        if nu {
            self.to_string()
        } else {
            format!("({self})")
        }
    }
}

/* ------------------------ Résolution ------------------------ */

#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// Une seule valeur de x.
    Unique(Nombre),
    /// a·x = b avec a = 0, b ≠ 0.
    AucuneSolution,
    /// 0·x = 0 : tout x convient.
    Infinite,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Unique(v) => write!(f, "x = {v}"),
            Resolution::AucuneSolution => f.write_str("no solution"),
            Resolution::Infinite => f.write_str("every x is a solution"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EquationResult {
    pub resolution: Resolution,
    pub steps: Vec<Step>,
}

pub fn solve_linear(raw_input: &str) -> Result<EquationResult, EvalError> {
    solve_linear_with(raw_input, &Reglages::default())
}

pub fn solve_linear_with(raw_input: &str, reglages: &Reglages) -> Result<EquationResult, EvalError> {
    let s = entree_bornee(raw_input, reglages)?;
    let propre = normaliser_equation(s)?;

    let mut membres = propre.split('=');
    let (gauche, droite) = match (membres.next(), membres.next(), membres.next()) {
        (Some(g), Some(d), None) => (g, d),
        _ => {
            return Err(EvalError::malforme(
                "an equation needs exactly one '='",
            ))
        }
    };

    let mut steps = Vec::new();
    let g = membre(gauche, reglages, &mut steps)?;
    let d = membre(droite, reglages, &mut steps)?;
    debug!("équation: {g} = {d}");

    let a = &g.a - &d.a;
    let b = &d.b - &g.b;

    steps.push(Step::new(StepDetail::Rearrange {
        coefficient: Nombre::Rat(a.clone()).texte_operande(),
        constant: format_rat(&b),
    }));

    let resolution = if a.is_zero() {
        if b.is_zero() {
            Resolution::Infinite
        } else {
            Resolution::AucuneSolution
        }
    } else {
        let x = Nombre::Rat(&b / &a);
        steps.push(Step::new(StepDetail::Isolate {
            coefficient: Nombre::Rat(a).texte_operande(),
            result: x.to_string(),
        }));
        Resolution::Unique(x)
    };

    Ok(EquationResult { resolution, steps })
}

fn membre(txt: &str, reglages: &Reglages, steps: &mut Vec<Step>) -> Result<Lineaire, EvalError> {
    if txt.trim().is_empty() {
        return Err(EvalError::malforme("empty side of the equation"));
    }
    let jetons = reecrire_moins_unaire(produits_implicites(balayer(txt, true)?));
    let (valeur, sous) = resoudre(jetons, reglages)?;
    steps.extend(sous);
    Ok(valeur)
}

/// Atomes -> jetons linéaires, avec les produits implicites : 2x, 3(x+1), (x+1)(x-1), (x)2
fn produits_implicites(bruts: Vec<Tok<Atome>>) -> Vec<Tok<Lineaire>> {
    let mut out: Vec<Tok<Lineaire>> = Vec::with_capacity(bruts.len() + 4);
    let mut prec: Option<Tok<Atome>> = None;

    for t in bruts {
        let implicite = match (&prec, &t) {
            (Some(Tok::Num(_) | Tok::RPar), Tok::Num(Atome::Inconnue) | Tok::LPar) => true,
            (Some(Tok::RPar), Tok::Num(Atome::Litteral(_))) => true,
            _ => false,
        };
        if implicite {
            out.push(Tok::Op(Op::Star));
        }

        out.push(match &t {
            Tok::Num(Atome::Litteral(r)) => Tok::Num(Lineaire::constante(r.clone())),
            Tok::Num(Atome::Inconnue) => Tok::Num(Lineaire::inconnue()),
            Tok::Op(op) => Tok::Op(*op),
            Tok::LPar => Tok::LPar,
            Tok::RPar => Tok::RPar,
        });
        prec = Some(t);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use crate::noyau::erreur::ErrorKind;
    use crate::noyau::etape::StepKind;

    fn q(n: i64, d: i64) -> Nombre {
        Nombre::Rat(BigRational::new(BigInt::from(n), BigInt::from(d)))
    }

    fn x_vaut(s: &str) -> Nombre {
        match solve_linear(s).unwrap_or_else(|e| panic!("{s:?} : {e}")).resolution {
            Resolution::Unique(v) => v,
            autre => panic!("{s:?} : {autre}"),
        }
    }

    #[test]
    fn solutions_uniques() {
        assert_eq!(x_vaut("2x + 3 = 7"), q(2, 1));
        assert_eq!(x_vaut("x/2 = 5"), q(10, 1));
        assert_eq!(x_vaut("3(x + 1) = x - 5"), q(-4, 1));
        assert_eq!(x_vaut("-x = 4"), q(-4, 1));
        assert_eq!(x_vaut("-(x - 1) = 2x"), q(1, 3));
        assert_eq!(x_vaut("2^3 * x = 4"), q(1, 2));
        assert_eq!(x_vaut("0.5x + 1,5 = 2"), q(1, 1));
        assert_eq!(x_vaut("X × 3 = 9"), q(3, 1));
    }

    #[test]
    fn demarche_equation() {
        let r = solve_linear("2x + 3 = 7").unwrap();
        let d: Vec<_> = r.steps.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(
            d,
            vec![
                "Compute 2 * x → 2x (multiply)",
                "Compute 2x + 3 → 2x + 3 (add)",
                "Gather the x terms on the left: 2x = 4",
                "Divide both sides by 2: x = 2",
            ]
        );
        assert_eq!(r.steps[2].kind(), StepKind::Rearrange);
        assert_eq!(r.steps[3].kind(), StepKind::Isolate);
        assert_eq!(r.resolution.to_string(), "x = 2");
    }

    #[test]
    fn cas_degeneres() {
        assert_eq!(
            solve_linear("x + 1 = x + 2").unwrap().resolution,
            Resolution::AucuneSolution
        );
        assert_eq!(
            solve_linear("2(x + 1) = 2x + 2").unwrap().resolution,
            Resolution::Infinite
        );
    }

    #[test]
    fn non_lineaire() {
        for s in ["x * x = 4", "x^2 = 4", "1/x = 2", "2^x = 8", "(x+1)(x-1) = 0"] {
            assert_eq!(
                solve_linear(s).unwrap_err().kind(),
                ErrorKind::NotLinear,
                "{s:?}"
            );
        }
    }

    #[test]
    fn equations_malformees() {
        for s in ["2x + 3", "x = 1 = 2", "= 4", "x + = 2"] {
            assert_eq!(
                solve_linear(s).unwrap_err().kind(),
                ErrorKind::MalformedExpression,
                "{s:?}"
            );
        }
        assert_eq!(
            solve_linear("x / 0 = 1").unwrap_err(),
            EvalError::DivisionByZero
        );
        assert_eq!(
            solve_linear("y = 1").unwrap_err(),
            EvalError::InvalidCharacter('y')
        );
        assert_eq!(
            solve_linear("2^0.5 x = 1").unwrap_err().kind(),
            ErrorKind::ArithmeticDomainError
        );
    }
}
