// src/noyau/nombre.rs
//
// Nombre exact (sans flottants).
// - Rat         : rationnel exact (cas courant)
// - Irrationnel : repli symbolique explicite = partie rationnelle + Σ c·ⁿ√r
//
// Forme canonique d’un radical c·ⁿ√r :
// - r entier > 1, sans facteur puissance n-ième (extraction par essais)
// - indice n ≥ 2, réduit quand r est lui-même une puissance (⁶√8 = √2)
// - c ≠ 0
// Une Somme sans terme radical est TOUJOURS repliée en Rat.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use std::cmp::Ordering;
use std::fmt;

/// Borne des essais de division (extraction des puissances parfaites).
const ESSAIS_MAX: u32 = 50_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Radical {
    pub coeff: BigRational,
    pub radicande: BigInt,
    pub indice: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Somme {
    pub rationnel: BigRational,
    pub termes: Vec<Radical>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Nombre {
    Rat(BigRational),
    Irrationnel(Somme),
}

/// Résultat de la réduction d’un radical : il peut “retomber” sur un rationnel.
#[derive(Clone, Debug)]
pub(crate) enum Partie {
    Rat(BigRational),
    Rad(Radical),
}

impl Nombre {
    pub fn entier(n: i64) -> Self {
        Nombre::Rat(BigRational::from_integer(BigInt::from(n)))
    }

    pub fn zero() -> Self {
        Nombre::Rat(BigRational::zero())
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Nombre::Rat(r) if r.is_zero())
    }

    /// Taille (en bits) du plus gros entier porté : numérateurs, dénominateurs, radicandes.
    pub(crate) fn taille_bits(&self) -> u64 {
        match self {
            Nombre::Rat(r) => bits_rat(r),
            Nombre::Irrationnel(s) => s
                .termes
                .iter()
                .map(|t| bits_rat(&t.coeff).max(t.radicande.bits()))
                .fold(bits_rat(&s.rationnel), u64::max),
        }
    }

    /// Construit la forme canonique à partir de morceaux quelconques.
    pub(crate) fn depuis_parties(parties: impl IntoIterator<Item = Partie>) -> Nombre {
        let mut rationnel = BigRational::zero();
        let mut termes: Vec<Radical> = Vec::new();

        for p in parties {
            match p {
                Partie::Rat(r) => rationnel += r,
                Partie::Rad(t) => termes.push(t),
            }
        }

        termes.sort_by(cle_radical);

        // regroupe les termes semblables (même indice, même radicande)
        let mut fusion: Vec<Radical> = Vec::with_capacity(termes.len());
        for t in termes {
            match fusion.last_mut() {
                Some(der) if der.indice == t.indice && der.radicande == t.radicande => {
                    der.coeff += t.coeff;
                }
                _ => fusion.push(t),
            }
        }
        fusion.retain(|t| !t.coeff.is_zero());

        if fusion.is_empty() {
            Nombre::Rat(rationnel)
        } else {
            Nombre::Irrationnel(Somme {
                rationnel,
                termes: fusion,
            })
        }
    }

    /// Morceaux (partie rationnelle nulle omise).
    pub(crate) fn parties(&self) -> Vec<Partie> {
        match self {
            Nombre::Rat(r) => vec![Partie::Rat(r.clone())],
            Nombre::Irrationnel(s) => {
                let mut v = Vec::with_capacity(s.termes.len() + 1);
                if !s.rationnel.is_zero() {
                    v.push(Partie::Rat(s.rationnel.clone()));
                }
                v.extend(s.termes.iter().cloned().map(Partie::Rad));
                v
            }
        }
    }

    /// Texte d’opérande : parenthèses dès qu’une relecture `a op b` serait ambiguë
    /// (négatif, fraction, somme, coefficient devant une racine : `(3√2) ** 2`).
    pub fn texte_operande(&self) -> String {
        let nu = match self {
            Nombre::Rat(r) => r.denom().is_one() && !r.is_negative(),
            Nombre::Irrationnel(s) => {
                s.rationnel.is_zero()
                    && s.termes.len() == 1
                    && s.termes[0].coeff.is_one()
            }
        };
        if nu {
            self.to_string()
        } else {
            format!("({self})")
        }
    }
}

pub(crate) fn bits_rat(r: &BigRational) -> u64 {
    r.numer().bits().max(r.denom().bits())
}

fn cle_radical(a: &Radical, b: &Radical) -> Ordering {
    a.indice
        .cmp(&b.indice)
        .then_with(|| a.radicande.cmp(&b.radicande))
}

/* ------------------------ Réduction des radicaux ------------------------ */

/// c·ⁿ√r (r > 0) -> forme canonique (ou rationnel si la racine tombe juste).
pub(crate) fn reduire_radical(coeff: BigRational, radicande: BigInt, indice: u32) -> Partie {
    if coeff.is_zero() || radicande.is_zero() {
        return Partie::Rat(BigRational::zero());
    }
    if indice <= 1 {
        return Partie::Rat(coeff * BigRational::from_integer(radicande));
    }

    let (s, t) = extraire_puissance(&radicande, indice);
    let coeff = coeff * BigRational::from_integer(s);
    if t.is_one() {
        return Partie::Rat(coeff);
    }

    // réduction d’indice : ⁿ√(u^d) = ⁿᐟᵈ√u
    for d in (2..=indice).rev() {
        if indice % d != 0 {
            continue;
        }
        let u = t.nth_root(d);
        if u.pow(d) == t {
            return reduire_radical(coeff, u, indice / d);
        }
    }

    Partie::Rad(Radical {
        coeff,
        radicande: t,
        indice,
    })
}

/// Décompose n > 0 en n = s^k * t, t “sans puissance k-ième” (par essais bornés).
pub(crate) fn extraire_puissance(n: &BigInt, k: u32) -> (BigInt, BigInt) {
    let mut reste = n.clone();
    let mut s = BigInt::one();
    let mut t = BigInt::one();

    let deux = BigInt::from(2);
    let mut p = deux.clone();
    let mut essais = 0u32;

    while essais < ESSAIS_MAX && p.pow(k) <= reste {
        let mut e = 0u32;
        while (&reste % &p).is_zero() {
            reste /= &p;
            e += 1;
        }
        if e > 0 {
            s *= p.pow(e / k);
            t *= p.pow(e % k);
        }
        if p == deux {
            p = BigInt::from(3);
        } else {
            p += 2;
        }
        essais += 1;
    }

    // le reste peut encore être une puissance parfaite (gros facteur premier)
    let r = reste.nth_root(k);
    if r.pow(k) == reste {
        s *= r;
    } else {
        t *= reste;
    }

    (s, t)
}

/* ------------------------ Affichage “joli” ------------------------ */

fn format_rat(r: &BigRational) -> String {
    let n = r.numer();
    let d = r.denom();
    if d.is_one() {
        format!("{n}")
    } else {
        format!("{n}/{d}")
    }
}

fn symbole_racine(indice: u32) -> String {
    const EXPOSANTS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
    match indice {
        2 => "√".to_string(),
        3 => "∛".to_string(),
        4 => "∜".to_string(),
        n => {
            let mut s: String = n
                .to_string()
                .chars()
                .filter_map(|c| c.to_digit(10))
                .map(|d| EXPOSANTS[d as usize])
                .collect();
            s.push('√');
            s
        }
    }
}

/// (p/q)·ⁿ√r -> p√r/q ; √r/q si p=1 ; -√r/q si p=-1
fn format_radical(t: &Radical) -> String {
    let p = t.coeff.numer();
    let q = t.coeff.denom();
    let racine = format!("{}{}", symbole_racine(t.indice), t.radicande);

    let tete = if p.is_one() {
        racine
    } else if p == &BigInt::from(-1) {
        format!("-{racine}")
    } else {
        format!("{p}{racine}")
    };

    if q.is_one() {
        tete
    } else {
        format!("{tete}/{q}")
    }
}

impl fmt::Display for Radical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_radical(self))
    }
}

impl fmt::Display for Nombre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nombre::Rat(r) => f.write_str(&format_rat(r)),
            Nombre::Irrationnel(_) => {
                let mut premier = true;
                for p in self.parties() {
                    let (neg, txt) = match &p {
                        Partie::Rat(r) => (r.is_negative(), format_rat(&r.abs())),
                        Partie::Rad(t) => {
                            let abs = Radical {
                                coeff: t.coeff.abs(),
                                ..t.clone()
                            };
                            (t.coeff.is_negative(), format_radical(&abs))
                        }
                    };
                    match (premier, neg) {
                        (true, false) => write!(f, "{txt}")?,
                        (true, true) => write!(f, "-{txt}")?,
                        (false, false) => write!(f, " + {txt}")?,
                        (false, true) => write!(f, " - {txt}")?,
                    }
                    premier = false;
                }
                Ok(())
            }
        }
    }
}
