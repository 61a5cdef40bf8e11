// src/noyau/jetons.rs

use num_bigint::BigInt;

use super::erreur::Rejet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    Num(BigInt),

    Plus,
    Minus,
    Star,
    Slash,

    LPar,
}

impl Tok {
    /// Opérateur binaire (+ - * /) pour un caractère, sinon None.
    pub fn operateur(c: char) -> Option<Tok> {
        match c {
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            _ => None,
        }
    }

    pub fn est_operateur(&self) -> bool {
        matches!(self, Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash)
    }
}

/// Alphabet accepté après retrait des espaces : chiffres ASCII, + - * / ( ).
/// Les chiffres unicode (ex: '٣') sont refusés.
fn caractere_autorise(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')')
}

/// Valide une entrée brute et renvoie la forme nettoyée (sans aucun espace).
///
/// - vide ou seulement des espaces => Rejet::Vide
/// - tout caractère hors alphabet => Rejet::CaractereInterdit
pub fn validate(raw: &str) -> Result<String, Rejet> {
    if raw.trim().is_empty() {
        return Err(Rejet::Vide);
    }

    let propre: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if let Some(c) = propre.chars().find(|c| !caractere_autorise(*c)) {
        return Err(Rejet::CaractereInterdit(c));
    }

    Ok(propre)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(n) => n.to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),

            Tok::LPar => "(".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
