// src/noyau/jetons.rs
//
// Jetons + tokenisation.
// - balayage gauche -> droite d’une chaîne NORMALISÉE (voir normalise.rs)
// - "**" est un seul jeton (puissance)
// - passe de réécriture du moins unaire :
//     -5      -> Num(-5)
//     -( … )  -> Num(-1) * ( … )
//   les suites de signes unaires sont repliées par parité (--5 = 5, -+5 = -5)

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;

use super::erreur::EvalError;
use super::nombre::Nombre;
use super::reglages::Reglages;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
    Pow, // **
}

impl Op {
    pub fn symbole(self) -> &'static str {
        match self {
            Op::Plus => "+",
            Op::Minus => "-",
            Op::Star => "*",
            Op::Slash => "/",
            Op::Pow => "**",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbole())
    }
}

/// Jeton. `V` = valeur portée par Num (Nombre en calcul, Lineaire en équation).
#[derive(Clone, Debug, PartialEq)]
pub enum Tok<V = Nombre> {
    Num(V),
    Op(Op),
    LPar,
    RPar,
}

/// Ce qu’il faut savoir d’une valeur pour réduire une suite de jetons.
pub trait Valeur: Clone + fmt::Display + fmt::Debug {
    fn moins_un() -> Self;
    fn oppose(&self) -> Self;
    fn appliquer(&self, op: Op, rhs: &Self, reglages: &Reglages) -> Result<Self, EvalError>;
    fn texte_operande(&self) -> String;
}

/// Atome lu par le balayage (avant choix du type de valeur).
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Atome {
    Litteral(BigRational),
    Inconnue,
}

/// Tokenize une expression normalisée en jetons (avec réécriture du moins unaire).
pub fn tokenize(s: &str) -> Result<Vec<Tok>, EvalError> {
    let bruts = balayer(s, false)?;
    let jetons = bruts
        .into_iter()
        .map(|t| match t {
            Tok::Num(Atome::Litteral(r)) => Ok(Tok::Num(Nombre::Rat(r))),
            // inatteignable : balayer(_, false) ne produit jamais d’inconnue
            Tok::Num(Atome::Inconnue) => Err(EvalError::InvalidCharacter('x')),
            Tok::Op(op) => Ok(Tok::Op(op)),
            Tok::LPar => Ok(Tok::LPar),
            Tok::RPar => Ok(Tok::RPar),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(reecrire_moins_unaire(jetons))
}

/// Balayage brut. `inconnue` : accepte `x` comme atome (mode équation).
pub(crate) fn balayer(s: &str, inconnue: bool) -> Result<Vec<Tok<Atome>>, EvalError> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Nombre : suite maximale de chiffres et de points
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let txt: String = chars[start..i].iter().collect();
            out.push(Tok::Num(Atome::Litteral(lire_decimal(&txt)?)));
            continue;
        }

        if inconnue && c == 'x' {
            out.push(Tok::Num(Atome::Inconnue));
            i += 1;
            continue;
        }

        // Puissance "**"
        if c == '*' && i + 1 < chars.len() && chars[i + 1] == '*' {
            out.push(Tok::Op(Op::Pow));
            i += 2;
            continue;
        }

        let tok = match c {
            '+' => Tok::Op(Op::Plus),
            '-' => Tok::Op(Op::Minus),
            '*' => Tok::Op(Op::Star),
            '/' => Tok::Op(Op::Slash),
            '(' => Tok::LPar,
            ')' => Tok::RPar,
            _ => return Err(EvalError::InvalidCharacter(c)),
        };
        out.push(tok);
        i += 1;
    }

    Ok(out)
}

/// "12", "1.5", ".25", "3." -> rationnel exact. Deux points ou aucun chiffre : malformé.
fn lire_decimal(txt: &str) -> Result<BigRational, EvalError> {
    let malforme = || EvalError::malforme(format!("invalid number '{txt}'"));

    let mut morceaux = txt.splitn(2, '.');
    let entier = morceaux.next().unwrap_or("");
    let frac = morceaux.next().unwrap_or("");

    if frac.contains('.') || (entier.is_empty() && frac.is_empty()) {
        return Err(malforme());
    }

    let chiffres = format!("{entier}{frac}");
    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or_else(malforme)?;
    let d = BigInt::from(10).pow(frac.len() as u32);
    Ok(BigRational::new(n, d))
}

/// Passe unique gauche -> droite sur les jetons.
///
/// Un signe est unaire s’il est en tête ou suit un opérateur ou `(`.
/// Un signe unaire mal placé (en fin, devant un opérateur) est laissé tel quel :
/// la réduction le signalera comme expression malformée.
pub fn reecrire_moins_unaire<V: Valeur>(jetons: Vec<Tok<V>>) -> Vec<Tok<V>> {
    let mut out: Vec<Tok<V>> = Vec::with_capacity(jetons.len() + 2);
    let mut it = jetons.into_iter().peekable();

    while let Some(tok) = it.next() {
        let mut negatif = match tok {
            Tok::Op(op @ (Op::Plus | Op::Minus)) if position_unaire(out.last()) => {
                op == Op::Minus
            }
            autre => {
                out.push(autre);
                continue;
            }
        };

        // repli des signes unaires consécutifs
        while let Some(Tok::Op(op @ (Op::Plus | Op::Minus))) = it.peek() {
            if *op == Op::Minus {
                negatif = !negatif;
            }
            it.next();
        }

        match it.peek() {
            Some(Tok::Num(v)) => {
                let v = if negatif { v.oppose() } else { v.clone() };
                it.next();
                out.push(Tok::Num(v));
            }
            Some(Tok::LPar) if negatif => {
                out.push(Tok::Num(V::moins_un()));
                out.push(Tok::Op(Op::Star));
            }
            Some(Tok::LPar) => {}
            _ => out.push(Tok::Op(if negatif { Op::Minus } else { Op::Plus })),
        }
    }

    out
}

fn position_unaire<V>(prec: Option<&Tok<V>>) -> bool {
    matches!(prec, None | Some(Tok::Op(_)) | Some(Tok::LPar))
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens<V: Valeur>(tokens: &[Tok<V>]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for (i, t) in tokens.iter().enumerate() {
        // en tête, la valeur reste nue si rien ne s’y colle plus fort qu’un + ou -
        let nue = i == 0 && matches!(tokens.get(1), None | Some(Tok::Op(Op::Plus | Op::Minus)));
        let s = match t {
            Tok::Num(v) if nue => v.to_string(),
            Tok::Num(v) => v.texte_operande(),
            Tok::Op(op) => op.symbole().to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}

impl Valeur for Nombre {
    fn moins_un() -> Self {
        Nombre::entier(-1)
    }

    fn oppose(&self) -> Self {
        super::arith::oppose(self)
    }

    fn appliquer(&self, op: Op, rhs: &Self, reglages: &Reglages) -> Result<Self, EvalError> {
        super::arith::appliquer(self, op, rhs, reglages)
    }

    fn texte_operande(&self) -> String {
        Nombre::texte_operande(self)
    }
}
