// src/noyau/reglages.rs
//
// Réglages du noyau (bornes anti-gel + précision de la lecture décimale).
// Valeurs par défaut sûres ; surcharge possible par variables d’environnement.

use log::warn;

/// Précision de la lecture décimale par défaut.
pub const DIGITS_DEFAUT: usize = 20;

/// Garde-fou : on borne la précision (anti-abus / anti-gel).
pub const DIGITS_MAX: usize = 200;

const EXPOSANT_MAX_DEFAUT: u32 = 4096;
const LONGUEUR_MAX_DEFAUT: usize = 4096;
/// ~79 000 chiffres décimaux : affichage et lecture restent instantanés.
const BITS_MAX_DEFAUT: u64 = 262_144;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reglages {
    /// Chiffres après la virgule pour la lecture décimale.
    pub digits: usize,
    /// |exposant| (et indice de racine) maximal accepté par `**`.
    pub exposant_max: u32,
    /// Longueur maximale de l’entrée brute (en caractères).
    pub longueur_max: usize,
    /// Taille maximale (en bits) d’un entier manipulé par l’arithmétique exacte.
    pub bits_max: u64,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            digits: DIGITS_DEFAUT,
            exposant_max: EXPOSANT_MAX_DEFAUT,
            longueur_max: LONGUEUR_MAX_DEFAUT,
            bits_max: BITS_MAX_DEFAUT,
        }
    }
}

impl Reglages {
    /// Lit PAS_A_PAS_DIGITS / PAS_A_PAS_EXPOSANT_MAX / PAS_A_PAS_LONGUEUR_MAX / PAS_A_PAS_BITS_MAX.
    /// Valeur illisible => warn + défaut.
    pub fn depuis_env() -> Self {
        Self::depuis_source(|cle| std::env::var(cle).ok())
    }

    fn depuis_source(lire: impl Fn(&str) -> Option<String>) -> Self {
        let defaut = Self::default();
        let digits = lire_nombre(&lire, "PAS_A_PAS_DIGITS", defaut.digits);
        Self {
            digits: digits.min(DIGITS_MAX),
            exposant_max: lire_nombre(&lire, "PAS_A_PAS_EXPOSANT_MAX", defaut.exposant_max),
            longueur_max: lire_nombre(&lire, "PAS_A_PAS_LONGUEUR_MAX", defaut.longueur_max),
            bits_max: lire_nombre(&lire, "PAS_A_PAS_BITS_MAX", defaut.bits_max),
        }
    }

    pub fn avec_digits(mut self, digits: usize) -> Self {
        self.digits = digits.min(DIGITS_MAX);
        self
    }
}

fn lire_nombre<T>(lire: &impl Fn(&str) -> Option<String>, cle: &str, defaut: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match lire(cle) {
        None => defaut,
        Some(brut) => match brut.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                warn!("{cle}={brut:?} illisible, on garde {defaut}");
                defaut
            }
        },
    }
}
