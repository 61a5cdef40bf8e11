// src/noyau/erreur.rs
//
// Deux niveaux d’erreur :
// - Rejet            : cause précise (interne, visible seulement dans les traces)
// - EvaluationError  : ce que voit l’appelant (une seule sorte : InvalidExpression)

use thiserror::Error;

/// Cause interne d’un refus. Jamais exposée telle quelle hors du noyau.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejet {
    #[error("entrée vide")]
    Vide,

    #[error("caractère interdit: {0:?}")]
    CaractereInterdit(char),

    #[error("nombre invalide: {0}")]
    NombreInvalide(String),

    #[error("parenthèses déséquilibrées")]
    ParenthesesDesequilibrees,

    /// Opérateur ou ')' là où une valeur était attendue (ou fin d’entrée).
    #[error("opérande manquant en position {0}")]
    OperandeManquant(usize),

    /// Nombre ou '(' juste après une valeur (ex: "(1)2").
    #[error("opérande inattendu en position {0}")]
    OperandeInattendu(usize),

    #[error("jeton inattendu en RPN: {0}")]
    JetonInattendu(String),

    #[error("pile d’évaluation vide")]
    PileVide,

    #[error("{0} valeurs restantes sur la pile (1 attendue)")]
    PileNonUnitaire(usize),

    #[error("division par zéro")]
    DivisionParZero,

    #[error("résultat non représentable (hors f64)")]
    ResultatNonFini,

    #[error("résultat non nul trop petit pour un f64")]
    ResultatNonRepresentable,
}

/// Erreur publique : toutes les causes sont repliées en une seule sorte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("invalid expression")]
    InvalidExpression,
}

impl From<Rejet> for EvaluationError {
    fn from(_: Rejet) -> Self {
        EvaluationError::InvalidExpression
    }
}
