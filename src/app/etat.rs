//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultats, erreur, digits, démarche)
//! et offrir des opérations simples (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de noyau, pas de parsing) : la vue passe par le service.
//! - Actions déterministes, sans effet de bord caché.
//! - Défense en profondeur : bornes sur la lecture décimale (digits).

use crate::config::{Reglages, DIGITS_MAX};
use crate::service::CalcService;

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub nettoyee: String,
    pub rpn: String,
    pub note: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub exact: String,       // affichage EXACT (entier ou p/q)
    pub lecture: String,     // décimal tronqué
    pub erreur: String,      // message de la frontière (si l’évaluation échoue)
    pub lecture_dispo: bool, // false si erreur / vide

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub digits: usize,

    // --- frontière ---
    pub service: CalcService,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Reglages::default())
    }
}

impl AppCalc {
    pub fn new(reglages: Reglages) -> Self {
        Self {
            entree: String::new(),
            exact: String::new(),
            lecture: String::new(),
            erreur: String::new(),
            lecture_dispo: false, // au démarrage : rien à lire
            demarche: Demarche::default(),
            digits: reglages.digits.min(DIGITS_MAX),
            service: CalcService::new(reglages),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + digits des réglages).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.digits = self.service.reglages().digits.min(DIGITS_MAX);
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    fn clear_demarche(&mut self) {
        self.demarche = Demarche::default();
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
    /// Choix UX :
    /// - On CONSERVE `exact` (dernier résultat) pour ne pas “effacer l’écran” sur une faute.
    /// - On coupe la lecture + démarche (non fiables si l’évaluation échoue).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();

        self.lecture.clear();
        self.lecture_dispo = false;

        self.clear_demarche();

        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat complet (EXACT + lecture + démarche).
    pub fn set_resultats(
        &mut self,
        exact: impl Into<String>,
        lecture: impl Into<String>,
        demarche: Demarche,
    ) {
        self.erreur.clear();
        self.exact = exact.into();
        self.lecture = lecture.into();
        self.lecture_dispo = true;
        self.demarche = demarche;
        self.focus_entree = true;
    }

    /// Garde-fou : limite digits.
    pub fn set_digits(&mut self, digits: usize) {
        self.digits = digits.min(DIGITS_MAX);
        self.focus_entree = true;
    }
}
