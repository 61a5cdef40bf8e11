//! Noyau — évaluation (pipeline réel)
//!
//! validate -> RPN (shunting-yard) -> pile d’évaluation -> finalisation
//!
//! Modèle numérique : rationnels exacts (BigRational). La division est exacte,
//! la division par zéro échoue tout de suite. La finalisation exige un résultat
//! représentable en f64 fini (c’est ce que la frontière renvoie).

use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};
use tracing::debug;

use super::erreur::{EvaluationError, Rejet};
use super::jetons::{format_tokens, validate, Tok};
use super::lecture::{format_exact, lecture_decimale};
use super::rpn::to_postfix;

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub nettoyee: String,
    pub rpn: String,
    pub note: String,
}

/// Résultat complet pour l’affichage : valeur exacte + lectures + démarche.
#[derive(Clone, Debug)]
pub struct Resultat {
    pub exact: String,
    pub lecture: String,
    pub demarche: DemarcheNoyau,
}

/// Évalue une suite RPN sur une pile de rationnels.
///
/// Pour chaque opérateur : b = sommet, a = dessous, on empile `a OP b`.
/// La pile doit finir avec exactement une valeur.
pub fn evaluate_postfix(rpn: &[Tok]) -> Result<BigRational, Rejet> {
    let mut st: Vec<BigRational> = Vec::with_capacity(rpn.len());

    for tok in rpn {
        match tok {
            Tok::Num(n) => st.push(BigRational::from_integer(n.clone())),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                let b = st.pop().ok_or(Rejet::PileVide)?;
                let a = st.pop().ok_or(Rejet::PileVide)?;

                let v = match tok {
                    Tok::Plus => a + b,
                    Tok::Minus => a - b,
                    Tok::Star => a * b,
                    _ => {
                        if b.is_zero() {
                            return Err(Rejet::DivisionParZero);
                        }
                        a / b
                    }
                };

                st.push(v);
            }

            Tok::LPar => {
                return Err(Rejet::JetonInattendu(format_tokens(std::slice::from_ref(tok))))
            }
        }
    }

    if st.len() != 1 {
        return Err(Rejet::PileNonUnitaire(st.len()));
    }
    st.pop().ok_or(Rejet::PileVide)
}

/// Dernière porte : le résultat doit tenir dans un f64 fini,
/// et un résultat non nul ne doit pas s’écraser sur 0.
fn finaliser(r: BigRational) -> Result<BigRational, Rejet> {
    match r.to_f64() {
        Some(x) if !x.is_finite() => Err(Rejet::ResultatNonFini),
        Some(x) if x == 0.0 && !r.is_zero() => Err(Rejet::ResultatNonRepresentable),
        Some(_) => Ok(r),
        None => Err(Rejet::ResultatNonFini),
    }
}

/// Pipeline interne : garde la cause précise du refus.
fn pipeline(expression: &str) -> Result<(String, Vec<Tok>, BigRational), Rejet> {
    let nettoyee = validate(expression)?;
    let rpn = to_postfix(&nettoyee)?;
    let valeur = finaliser(evaluate_postfix(&rpn)?)?;
    Ok((nettoyee, rpn, valeur))
}

fn replier(expression: &str, cause: Rejet) -> EvaluationError {
    debug!(expression, cause = %cause, "expression rejetée");
    EvaluationError::from(cause)
}

/// API publique : évalue une expression et renvoie sa valeur exacte.
///
/// Fonction pure : même entrée => même sortie, aucun état partagé.
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
pub fn evaluate(expression: &str) -> Result<BigRational, EvaluationError> {
    pipeline(expression)
        .map(|(_, _, valeur)| valeur)
        .map_err(|cause| replier(expression, cause))
}

/// API publique : évalue et retourne aussi EXACT, lecture décimale et démarche.
pub fn eval_expression(expression: &str, digits: usize) -> Result<Resultat, EvaluationError> {
    let (nettoyee, rpn, valeur) = pipeline(expression).map_err(|cause| replier(expression, cause))?;

    let demarche = DemarcheNoyau {
        nettoyee,
        rpn: format_tokens(&rpn),
        note: "Pipeline: validation → RPN (shunting-yard) → pile → finalisation.".into(),
    };

    Ok(Resultat {
        exact: format_exact(&valeur),
        lecture: lecture_decimale(&valeur, digits),
        demarche,
    })
}
