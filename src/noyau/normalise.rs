// src/noyau/normalise.rs
//
// Normalisation des glyphes saisis par l’utilisateur :
//   × x X -> *     ÷ -> /     ^ -> **     , -> .
//   √a ∛a ∜a ⁿ√a -> (a**(1/n))   (a : chiffres, groupe parenthésé ou autre racine ;
//   un facteur collé devant reçoit un `*` : 3√2 -> 3*(2**(1/2)))
// puis contrôle du jeu de caractères. Pur, sans effet de bord.

use super::erreur::EvalError;

/// Caractères admis après substitution (hors espaces).
fn est_admis(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | '*' | '/' | '(' | ')') || c.is_whitespace()
}

/// Remplace les variantes de glyphes sans rien vérifier.
/// `garder_x` : en mode équation, `x`/`X` restent l’inconnue (rendue en `x`).
fn substituer(s: &str, garder_x: bool) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    let mut i = 0;
    while i < chars.len() {
        if let Some((racine, fin)) = lire_racine(&chars, i, garder_x) {
            let colle = out
                .chars()
                .last()
                .is_some_and(|c| c.is_ascii_digit() || c == '.' || c == ')' || (garder_x && c == 'x'));
            if colle {
                out.push('*');
            }
            out.push_str(&racine);
            i = fin;
            continue;
        }
        match chars[i] {
            '×' => out.push('*'),
            'x' | 'X' if garder_x => out.push('x'),
            'x' | 'X' => out.push('*'),
            '÷' => out.push('/'),
            '^' => out.push_str("**"),
            ',' => out.push('.'),
            c => out.push(c),
        }
        i += 1;
    }
    out
}

/// Racine en position `i` : (texte réécrit, position suivante).
/// Sans radicande lisible, rien n’est réécrit (le glyphe sera refusé).
fn lire_racine(chars: &[char], i: usize, garder_x: bool) -> Option<(String, usize)> {
    let mut j = i;
    let mut indice: Option<u32> = None;
    while let Some(d) = chars.get(j).copied().and_then(chiffre_exposant) {
        indice = Some(indice.unwrap_or(0).checked_mul(10)?.checked_add(d)?);
        j += 1;
    }
    let indice = match (indice, chars.get(j)?) {
        (Some(n), '√') => n,
        (None, '√') => 2,
        (None, '∛') => 3,
        (None, '∜') => 4,
        _ => return None,
    };
    let (radicande, fin) = lire_radicande(chars, j + 1, garder_x)?;
    Some((format!("({radicande}**(1/{indice}))"), fin))
}

fn lire_radicande(chars: &[char], j: usize, garder_x: bool) -> Option<(String, usize)> {
    match chars.get(j)? {
        c if c.is_ascii_digit() || matches!(c, '.' | ',') => {
            let fin = chars[j..]
                .iter()
                .position(|c| !(c.is_ascii_digit() || matches!(c, '.' | ',')))
                .map_or(chars.len(), |k| j + k);
            let txt: String = chars[j..fin].iter().map(|&c| if c == ',' { '.' } else { c }).collect();
            Some((txt, fin))
        }
        '(' => {
            let mut profondeur = 0usize;
            for (k, c) in chars.iter().enumerate().skip(j) {
                match c {
                    '(' => profondeur += 1,
                    ')' => {
                        profondeur -= 1;
                        if profondeur == 0 {
                            let dedans: String = chars[j + 1..k].iter().collect();
                            return Some((format!("({})", substituer(&dedans, garder_x)), k + 1));
                        }
                    }
                    _ => {}
                }
            }
            None
        }
        _ => lire_racine(chars, j, garder_x),
    }
}

/// ⁰ ¹ ² … ⁹ -> chiffre.
fn chiffre_exposant(c: char) -> Option<u32> {
    match c {
        '⁰' => Some(0),
        '¹' => Some(1),
        '²' => Some(2),
        '³' => Some(3),
        '⁴'..='⁹' => Some(c as u32 - '⁴' as u32 + 4),
        _ => None,
    }
}

/// Normalise une expression brute.
///
/// Idempotent : une chaîne déjà normalisée ressort telle quelle.
pub fn normaliser(s: &str) -> Result<String, EvalError> {
    let out = substituer(s, false);
    verifier(&out, false)?;
    Ok(out)
}

/// Variante équation : `x` est l’inconnue, `=` est admis.
pub fn normaliser_equation(s: &str) -> Result<String, EvalError> {
    let out = substituer(s, true);
    verifier(&out, true)?;
    Ok(out)
}

fn verifier(s: &str, equation: bool) -> Result<(), EvalError> {
    match s
        .chars()
        .find(|&c| !(est_admis(c) || (equation && (c == 'x' || c == '='))))
    {
        Some(c) => Err(EvalError::InvalidCharacter(c)),
        None => Ok(()),
    }
}
