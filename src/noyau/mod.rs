//! Noyau exact : évaluation d’expressions arithmétiques
//!
//! Organisation interne :
//! - jetons.rs   : jetons + validation de l’alphabet
//! - rpn.rs      : shunting-yard (infix -> RPN), nombres lus au vol
//! - eval.rs     : pile d’évaluation + finalisation + pipeline complet
//! - lecture.rs  : EXACT (p/q) + lecture décimale tronquée
//! - erreur.rs   : causes internes (Rejet) + erreur publique (InvalidExpression)

pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod lecture;
pub mod rpn;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::EvaluationError;
pub use eval::{eval_expression, Resultat};
#[cfg(not(target_arch = "wasm32"))]
pub use eval::evaluate;
