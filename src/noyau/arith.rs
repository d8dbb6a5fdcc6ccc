// src/noyau/arith.rs
//
// Opérations binaires exactes sur Nombre : + - * / **
// - rationnel x rationnel : BigRational direct
// - sinon : distribution sur les morceaux (rationnel + Σ radicaux) puis forme canonique
//
// Erreurs (jamais de repli flottant) :
// - DivisionByZero : diviseur nul
// - ArithmeticDomainError : 0 ** négatif, racine paire d’un négatif,
//   exposant irrationnel, exposant/indice hors bornes, diviseur irrationnel non géré,
//   résultat trop gros (taille estimée AVANT chaque puissance, vérifiée après chaque opération)

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::erreur::EvalError;
use super::jetons::Op;
use super::nombre::{bits_rat, reduire_radical, Nombre, Partie, Radical, Somme};
use super::reglages::Reglages;

/// Point d’entrée unique (appelé par la réduction).
pub fn appliquer(a: &Nombre, op: Op, b: &Nombre, reglages: &Reglages) -> Result<Nombre, EvalError> {
    let res = match op {
        Op::Plus => addition(a, b),
        Op::Minus => addition(a, &oppose(b)),
        Op::Star => multiplication(a, b, reglages)?,
        Op::Slash => division(a, b, reglages)?,
        Op::Pow => puissance(a, b, reglages)?,
    };
    taille_admise(res.taille_bits(), reglages)?;
    Ok(res)
}

/// Estimation (en bits) au-delà de `bits_max` : on refuse avant de calculer.
fn taille_admise(bits: u64, reglages: &Reglages) -> Result<(), EvalError> {
    if bits > reglages.bits_max {
        return Err(EvalError::domaine("result too large"));
    }
    Ok(())
}

pub fn oppose(a: &Nombre) -> Nombre {
    match a {
        Nombre::Rat(r) => Nombre::Rat(-r.clone()),
        Nombre::Irrationnel(_) => {
            Nombre::depuis_parties(a.parties().into_iter().map(|p| match p {
                Partie::Rat(r) => Partie::Rat(-r),
                Partie::Rad(mut t) => {
                    t.coeff = -t.coeff;
                    Partie::Rad(t)
                }
            }))
        }
    }
}

fn addition(a: &Nombre, b: &Nombre) -> Nombre {
    if let (Nombre::Rat(x), Nombre::Rat(y)) = (a, b) {
        return Nombre::Rat(x + y);
    }
    Nombre::depuis_parties(a.parties().into_iter().chain(b.parties()))
}

fn multiplication(a: &Nombre, b: &Nombre, reglages: &Reglages) -> Result<Nombre, EvalError> {
    if let (Nombre::Rat(x), Nombre::Rat(y)) = (a, b) {
        return Ok(Nombre::Rat(x * y));
    }

    let pb = b.parties();
    let mut produits = Vec::new();
    for x in a.parties() {
        for y in &pb {
            produits.push(produit_parties(&x, y, reglages)?);
        }
    }
    Ok(Nombre::depuis_parties(produits))
}

/// c1·ⁿ√r1 × c2·ᵐ√r2 = c1c2·ˡ√(r1^(l/n) · r2^(l/m)), l = ppcm(n, m)
fn produit_parties(a: &Partie, b: &Partie, reglages: &Reglages) -> Result<Partie, EvalError> {
    match (a, b) {
        (Partie::Rat(x), Partie::Rat(y)) => Ok(Partie::Rat(x * y)),
        (Partie::Rat(x), Partie::Rad(t)) | (Partie::Rad(t), Partie::Rat(x)) => {
            Ok(Partie::Rad(Radical {
                coeff: &t.coeff * x,
                ..t.clone()
            }))
        }
        (Partie::Rad(s), Partie::Rad(t)) => {
            let l = ppcm(s.indice, t.indice);
            if l > reglages.exposant_max {
                return Err(EvalError::domaine("root index too large"));
            }
            taille_admise(
                s.radicande
                    .bits()
                    .saturating_mul(u64::from(l / s.indice))
                    .saturating_add(t.radicande.bits().saturating_mul(u64::from(l / t.indice))),
                reglages,
            )?;
            let rad = s.radicande.pow(l / s.indice) * t.radicande.pow(l / t.indice);
            Ok(reduire_radical(&s.coeff * &t.coeff, rad, l))
        }
    }
}

fn division(a: &Nombre, b: &Nombre, reglages: &Reglages) -> Result<Nombre, EvalError> {
    let inv = inverse(b, reglages)?;
    multiplication(a, &inv, reglages)
}

fn inverse(b: &Nombre, reglages: &Reglages) -> Result<Nombre, EvalError> {
    let s = match b {
        Nombre::Rat(r) if r.is_zero() => return Err(EvalError::DivisionByZero),
        Nombre::Rat(r) => return Ok(Nombre::Rat(r.recip())),
        Nombre::Irrationnel(s) => s,
    };

    match (s.rationnel.is_zero(), s.termes.as_slice()) {
        // 1/(c·ⁿ√r) = ⁿ√(r^(n-1)) / (c·r)
        (true, [t]) => {
            taille_admise(
                t.radicande.bits().saturating_mul(u64::from(t.indice - 1)),
                reglages,
            )?;
            let c = &t.coeff * BigRational::from_integer(t.radicande.clone());
            let rad = t.radicande.pow(t.indice - 1);
            Ok(Nombre::depuis_parties([reduire_radical(c.recip(), rad, t.indice)]))
        }
        // 1/(a + b√r) = (a - b√r) / (a² - b²r)   (r sans carré => dénominateur ≠ 0)
        (false, [t]) if t.indice == 2 => {
            let a = &s.rationnel;
            let r = BigRational::from_integer(t.radicande.clone());
            let d = a * a - &t.coeff * &t.coeff * r;
            let conj = Nombre::Irrationnel(Somme {
                rationnel: a.clone(),
                termes: vec![Radical {
                    coeff: -t.coeff.clone(),
                    ..t.clone()
                }],
            });
            multiplication(&conj, &Nombre::Rat(d.recip()), reglages)
        }
        _ => Err(EvalError::domaine(format!(
            "cannot divide exactly by {b}"
        ))),
    }
}

/* ------------------------ Puissances ------------------------ */

fn puissance(base: &Nombre, exp: &Nombre, reglages: &Reglages) -> Result<Nombre, EvalError> {
    let e = match exp {
        Nombre::Rat(e) => e,
        Nombre::Irrationnel(_) => {
            return Err(EvalError::domaine(format!(
                "irrational exponent {exp} has no exact value"
            )))
        }
    };

    if e.is_integer() {
        let k = borne(e.numer(), reglages)?;
        if e.is_negative() {
            if base.is_zero() {
                return Err(EvalError::domaine("0 ** negative exponent"));
            }
            let p = puissance_entiere(base, k, reglages)?;
            return inverse(&p, reglages);
        }
        return puissance_entiere(base, k, reglages);
    }

    // exposant p/q, q ≥ 2
    let q = borne(e.denom(), reglages)?;
    match base {
        Nombre::Rat(r) => racine_rationnelle(r, e.numer(), q, reglages),

        // (c·ⁿ√r)^(p/q) = c^(p/q) · r^(p/(nq))
        Nombre::Irrationnel(s) if s.rationnel.is_zero() && s.termes.len() == 1 => {
            let t = &s.termes[0];
            let a = puissance(&Nombre::Rat(t.coeff.clone()), exp, reglages)?;
            let e_r = e / BigRational::from_integer(BigInt::from(t.indice));
            let b = puissance(
                &Nombre::Rat(BigRational::from_integer(t.radicande.clone())),
                &Nombre::Rat(e_r),
                reglages,
            )?;
            multiplication(&a, &b, reglages)
        }

        Nombre::Irrationnel(_) => Err(EvalError::domaine(format!(
            "({base}) ** {e} has no exact radical form"
        ))),
    }
}

/// |n| en u32, borné par exposant_max.
fn borne(n: &BigInt, reglages: &Reglages) -> Result<u32, EvalError> {
    n.abs()
        .to_u32()
        .filter(|k| *k <= reglages.exposant_max)
        .ok_or_else(|| EvalError::domaine("exponent too large"))
}

/// base^k, k ≥ 0 (exponentiation rapide). 0 ** 0 = 1.
fn puissance_entiere(base: &Nombre, k: u32, reglages: &Reglages) -> Result<Nombre, EvalError> {
    if let Nombre::Rat(r) = base {
        return Ok(Nombre::Rat(rationnel_pow(r, k, reglages)?));
    }
    taille_admise(base.taille_bits().saturating_mul(u64::from(k)), reglages)?;

    let mut e = k;
    let mut acc = Nombre::Rat(BigRational::one());
    let mut b = base.clone();

    while e > 0 {
        if (e & 1) == 1 {
            acc = multiplication(&acc, &b, reglages)?;
        }
        e >>= 1;
        if e > 0 {
            b = multiplication(&b, &b, reglages)?;
        }
    }
    Ok(acc)
}

fn rationnel_pow(r: &BigRational, k: u32, reglages: &Reglages) -> Result<BigRational, EvalError> {
    taille_admise(bits_rat(r).saturating_mul(u64::from(k)), reglages)?;
    Ok(BigRational::new(r.numer().pow(k), r.denom().pow(k)))
}

/// r^(p/q), q ≥ 2 : ᵠ√(n/d) = ᵠ√(n·d^(q-1)) / d  sur s = |r|^p
fn racine_rationnelle(
    r: &BigRational,
    p: &BigInt,
    q: u32,
    reglages: &Reglages,
) -> Result<Nombre, EvalError> {
    if r.is_zero() {
        return if p.is_positive() {
            Ok(Nombre::zero())
        } else {
            Err(EvalError::domaine("0 ** negative exponent"))
        };
    }
    if r.is_negative() && q % 2 == 0 {
        return Err(EvalError::domaine(format!(
            "even root of the negative number {}",
            Nombre::Rat(r.clone())
        )));
    }

    let k = borne(p, reglages)?;
    let pos = rationnel_pow(&r.abs(), k, reglages)?;
    let s = if p.is_negative() { pos.recip() } else { pos };

    // racine réelle impaire d’un négatif : signe (-1)^p
    let negatif = r.is_negative() && k % 2 == 1;

    let n = s.numer();
    let d = s.denom();
    taille_admise(
        n.bits().saturating_add(d.bits().saturating_mul(u64::from(q - 1))),
        reglages,
    )?;
    let rad = n * d.pow(q - 1);
    let signe = if negatif { -BigInt::one() } else { BigInt::one() };
    let coeff = BigRational::new(signe, d.clone());

    Ok(Nombre::depuis_parties([reduire_radical(coeff, rad, q)]))
}

fn pgcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

fn ppcm(a: u32, b: u32) -> u32 {
    a / pgcd(a, b) * b
}
