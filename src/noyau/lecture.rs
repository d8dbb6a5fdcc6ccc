// src/noyau/lecture.rs
//
// Lecture décimale TRONQUÉE d’un Nombre exact (affichage seulement).
// - rationnel : (n·10^digits) / d
// - radical   : ⁿ√(r·10^(digits·n)) entier, puis × coeff
// Les radicaux sont lus avec des chiffres de garde, retirés à la fin.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

use super::nombre::{Nombre, Radical};

/// Chiffres de garde pour les sommes de radicaux.
const GARDE: usize = 6;

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal tronqué.
pub fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    let signe = if neg { "-" } else { "" };

    if digits == 0 {
        return format!("{signe}{int_part}");
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    format!("{signe}{int_part}.{frac}")
}

/// r -> entier “scalé” = trunc(r * 10^digits)
fn rational_scaled(r: &BigRational, digits: usize) -> BigInt {
    (r.numer() * pow10(digits)) / r.denom()
}

/// c·ⁿ√r -> trunc(c·ⁿ√r · 10^digits)
fn radical_scaled(t: &Radical, digits: usize) -> BigInt {
    let cible = &t.radicande * pow10(digits * t.indice as usize);
    let racine = cible.nth_root(t.indice);
    (t.coeff.numer() * racine) / t.coeff.denom()
}

/// Lecture décimale (tronquée à `digits` chiffres après la virgule).
pub fn lecture_decimale(n: &Nombre, digits: usize) -> String {
    let scaled = match n {
        Nombre::Rat(r) => rational_scaled(r, digits),
        Nombre::Irrationnel(s) => {
            // Chaque terme est tronqué à part puis sommé : l’erreur cumulée reste
            // sous (nb termes + 1)·10^-(digits+GARDE), donc le dernier chiffre affiché
            // est quasi toujours exact mais pas garanti (somme qui frôle une frontière décimale).
            let total = digits + GARDE;
            let mut acc = rational_scaled(&s.rationnel, total);
            for t in &s.termes {
                acc += radical_scaled(t, total);
            }
            acc / pow10(GARDE)
        }
    };
    scaled_to_decimal(scaled, digits)
}
