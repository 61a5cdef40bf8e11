//! src/service.rs
//!
//! Frontière requête/réponse autour du noyau.
//!
//! Rôle :
//! - extraire le champ `expression` (refus si absent ou pas une chaîne)
//! - appliquer le plafond de longueur (réglages)
//! - appeler le noyau
//! - traduire l’échec unique du noyau en réponse « Bad Request »
//!
//! Le noyau ne connaît pas les codes de statut : tout se passe ici.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Reglages;
use crate::noyau::{eval_expression, EvaluationError, Resultat};

// Surface JSON (requête -> nombre brut) : natif seulement, le web passe par `evaluer`.
#[cfg(not(target_arch = "wasm32"))]
use num_rational::BigRational;
#[cfg(not(target_arch = "wasm32"))]
use num_traits::ToPrimitive;
#[cfg(not(target_arch = "wasm32"))]
use serde_json::{Number, Value};
#[cfg(not(target_arch = "wasm32"))]
use tracing::warn;

#[cfg(not(target_arch = "wasm32"))]
use crate::noyau::evaluate;

#[cfg(not(target_arch = "wasm32"))]
pub const STATUT_OK: u16 = 200;
pub const STATUT_BAD_REQUEST: u16 = 400;

pub const MESSAGE_EXPRESSION_INVALIDE: &str = "Invalid expression provided";
pub const LIBELLE_BAD_REQUEST: &str = "Bad Request";

/// Corps de requête : `{ "expression": "..." }`.
///
/// Le champ est gardé en `Value` pour refuser proprement un nombre, un tableau, null…
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RequeteCalcul {
    #[serde(default)]
    pub expression: Option<Value>,
}

#[cfg(not(target_arch = "wasm32"))]
impl RequeteCalcul {
    pub fn texte(expression: impl Into<String>) -> Self {
        Self {
            expression: Some(Value::String(expression.into())),
        }
    }
}

/// Corps d’erreur client : `{ "statusCode": 400, "message": ..., "error": "Bad Request" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{status_code} {error}: {message}")]
pub struct ReponseErreur {
    pub status_code: u16,
    pub message: String,
    pub error: String,
}

impl ReponseErreur {
    pub fn expression_invalide() -> Self {
        Self {
            status_code: STATUT_BAD_REQUEST,
            message: MESSAGE_EXPRESSION_INVALIDE.to_string(),
            error: LIBELLE_BAD_REQUEST.to_string(),
        }
    }
}

impl From<EvaluationError> for ReponseErreur {
    fn from(e: EvaluationError) -> Self {
        match e {
            EvaluationError::InvalidExpression => Self::expression_invalide(),
        }
    }
}

/// Service sans état (hors réglages) : appels concurrents sans verrou.
#[derive(Clone, Debug, Default)]
pub struct CalcService {
    reglages: Reglages,
}

impl CalcService {
    pub fn new(reglages: Reglages) -> Self {
        Self { reglages }
    }

    pub fn reglages(&self) -> &Reglages {
        &self.reglages
    }

    fn verifier_longueur(&self, expression: &str) -> Result<(), ReponseErreur> {
        if expression.len() > self.reglages.longueur_max {
            debug!(
                longueur = expression.len(),
                max = self.reglages.longueur_max,
                "expression trop longue"
            );
            return Err(ReponseErreur::expression_invalide());
        }
        Ok(())
    }

    /// Évaluation détaillée (EXACT + lecture + démarche) derrière la frontière.
    pub fn evaluer(&self, expression: &str, digits: usize) -> Result<Resultat, ReponseErreur> {
        self.verifier_longueur(expression)?;
        Ok(eval_expression(expression, digits)?)
    }

    /// Requête -> nombre brut, ou corps d’erreur client.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn calculate_expression(&self, requete: &RequeteCalcul) -> Result<Number, ReponseErreur> {
        let expression = match &requete.expression {
            Some(Value::String(s)) => s.as_str(),
            autre => {
                debug!(champ = ?autre, "champ `expression` absent ou non textuel");
                return Err(ReponseErreur::expression_invalide());
            }
        };

        debug!(longueur = expression.len(), "requête de calcul");
        self.verifier_longueur(expression)?;

        let valeur = evaluate(expression)?;
        vers_nombre(&valeur)
    }

    /// Corps JSON brut -> (statut, corps JSON).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn traiter_json(&self, corps: &str) -> (u16, String) {
        let resultat = serde_json::from_str::<RequeteCalcul>(corps)
            .map_err(|e| {
                debug!(erreur = %e, "corps de requête illisible");
                ReponseErreur::expression_invalide()
            })
            .and_then(|requete| self.calculate_expression(&requete));

        vers_reponse(resultat)
    }

    /// Requête déjà désérialisée -> (statut, corps JSON).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn repondre(&self, requete: &RequeteCalcul) -> (u16, String) {
        vers_reponse(self.calculate_expression(requete))
    }
}

/// Entier tenant dans i64 => nombre entier JSON ; sinon double.
#[cfg(not(target_arch = "wasm32"))]
fn vers_nombre(r: &BigRational) -> Result<Number, ReponseErreur> {
    if r.is_integer() {
        if let Some(i) = r.numer().to_i64() {
            return Ok(Number::from(i));
        }
    }
    r.to_f64()
        .and_then(Number::from_f64)
        .ok_or_else(ReponseErreur::expression_invalide)
}

#[cfg(not(target_arch = "wasm32"))]
fn vers_reponse(resultat: Result<Number, ReponseErreur>) -> (u16, String) {
    match resultat {
        Ok(n) => (STATUT_OK, n.to_string()),
        Err(e) => (e.status_code, corps_json(&e)),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn corps_json<T: Serialize>(v: &T) -> String {
    serde_json::to_string(v).unwrap_or_else(|e| {
        warn!(erreur = %e, "sérialisation de la réponse impossible");
        String::new()
    })
}
