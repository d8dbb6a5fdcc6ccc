//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultats, erreur, réglages, démarche)
//! et offrir des opérations simples (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing) : la vue appelle le noyau et dépose le résultat.
//! - Actions déterministes, sans effet de bord caché.
//! - Précision bornée par les réglages du noyau.

use crate::noyau::etape::{Anglais, Francais, Gabarit, Step};
use crate::noyau::reglages::{Reglages, DIGITS_DEFAUT};

/// Langue de la démarche.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Langue {
    #[default]
    Francais,
    Anglais,
}

impl Langue {
    pub fn gabarit(self) -> &'static dyn Gabarit {
        match self {
            Langue::Francais => &Francais,
            Langue::Anglais => &Anglais,
        }
    }

    pub fn autre(self) -> Self {
        match self {
            Langue::Francais => Langue::Anglais,
            Langue::Anglais => Langue::Francais,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Langue::Francais => "FR",
            Langue::Anglais => "EN",
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub exact: String,       // valeur exacte (ou "x = …" pour une équation)
    pub lecture: String,     // lecture décimale tronquée
    pub erreur: String,      // message d’erreur (si l’évaluation échoue)
    pub lecture_dispo: bool, // false pour une équation sans solution unique

    // --- démarche (panneau d’explication) ---
    pub jetons: String,
    pub etapes: Vec<Step>,
    pub langue: Langue,

    // --- paramètres ---
    pub reglages: Reglages,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            exact: String::new(),
            lecture: String::new(),
            erreur: String::new(),
            lecture_dispo: false, // au démarrage : rien à lire
            jetons: String::new(),
            etapes: Vec::new(),
            langue: Langue::default(),
            reglages: Reglages::depuis_env(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + digits par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.reglages = self.reglages.clone().avec_digits(DIGITS_DEFAUT);
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    fn clear_demarche(&mut self) {
        self.jetons.clear();
        self.etapes.clear();
    }

    /// CLR : effacer résultats + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.exact.clear();
        self.lecture.clear();
        self.erreur.clear();
        self.lecture_dispo = false;
        self.clear_demarche();
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    ///
    /// On CONSERVE `exact` (dernier résultat) pour ne pas “effacer l’écran” sur une faute ;
    /// lecture et démarche sont coupées.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();

        self.lecture.clear();
        self.lecture_dispo = false;
        self.clear_demarche();

        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat complet (exact + lecture optionnelle + démarche).
    pub fn set_resultats(
        &mut self,
        exact: impl Into<String>,
        lecture: Option<String>,
        jetons: impl Into<String>,
        etapes: Vec<Step>,
    ) {
        self.erreur.clear();
        self.exact = exact.into();
        self.jetons = jetons.into();
        self.etapes = etapes;

        if let Some(v) = lecture {
            self.lecture_dispo = true;
            self.lecture = v;
        } else {
            self.lecture_dispo = false;
            self.lecture.clear();
        }

        self.focus_entree = true;
    }

    /// Garde-fou : la borne vient des réglages du noyau.
    pub fn set_digits(&mut self, digits: usize) {
        self.reglages = self.reglages.clone().avec_digits(digits);
        self.focus_entree = true;
    }

    pub fn basculer_langue(&mut self) {
        self.langue = self.langue.autre();
    }

    /// Démarche numérotée, dans la langue courante.
    pub fn lignes_demarche(&self) -> Vec<String> {
        let gabarit = self.langue.gabarit();
        self.etapes
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}. {}", i + 1, e.rendre_avec(gabarit)))
            .collect()
    }
}
