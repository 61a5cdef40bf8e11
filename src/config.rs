//! src/config.rs
//!
//! Réglages (défauts + surcharges par variables d’environnement).
//!
//! - CALC_LONGUEUR_MAX : plafond de longueur d’entrée (octets) appliqué par la frontière
//! - CALC_DIGITS       : chiffres de la lecture décimale tronquée
//!
//! Valeur illisible => ignorée (warn) et défaut conservé.
//! Natif seulement : la version web (wasm) tourne toujours avec les défauts.

#[cfg(not(target_arch = "wasm32"))]
use tracing::warn;

/// Précision de la lecture décimale par défaut.
pub const DIGITS_DEFAUT: usize = 20;

/// Garde-fou : on borne la précision (anti-abus / anti-gel).
pub const DIGITS_MAX: usize = 200;

/// Plafond d’entrée par défaut.
pub const LONGUEUR_MAX_DEFAUT: usize = 4096;

#[cfg(not(target_arch = "wasm32"))]
pub const ENV_LONGUEUR_MAX: &str = "CALC_LONGUEUR_MAX";
#[cfg(not(target_arch = "wasm32"))]
pub const ENV_DIGITS: &str = "CALC_DIGITS";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reglages {
    pub longueur_max: usize,
    pub digits: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            longueur_max: LONGUEUR_MAX_DEFAUT,
            digits: DIGITS_DEFAUT,
        }
    }
}

// Pas d’environnement de processus côté web : le wasm garde les défauts.
#[cfg(not(target_arch = "wasm32"))]
impl Reglages {
    /// Lit l’environnement du processus.
    pub fn depuis_env() -> Self {
        Self::depuis_source(|cle| std::env::var(cle).ok())
    }

    /// Lit une source clé -> valeur quelconque (testable sans toucher à l’environnement).
    pub fn depuis_source(source: impl Fn(&str) -> Option<String>) -> Self {
        let mut r = Self::default();

        if let Some(v) = lire_usize(&source, ENV_LONGUEUR_MAX) {
            if v == 0 {
                warn!(cle = ENV_LONGUEUR_MAX, "plafond nul ignoré");
            } else {
                r.longueur_max = v;
            }
        }

        if let Some(v) = lire_usize(&source, ENV_DIGITS) {
            r.digits = v.min(DIGITS_MAX);
        }

        r
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn lire_usize(source: &impl Fn(&str) -> Option<String>, cle: &str) -> Option<usize> {
    let brut = source(cle)?;
    match brut.trim().parse::<usize>() {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(cle, valeur = %brut, erreur = %e, "réglage illisible ignoré");
            None
        }
    }
}
