// src/noyau/rpn.rs
//
// Shunting-yard : infix nettoyé -> RPN (postfix)
// Objectif:
// - Un seul balayage gauche -> droite, les nombres sont lus au vol (pas de passe jetons séparée)
// - Précédence : + - => 1 ; * / => 2 ; tous associatifs à gauche (dépile si >=)
//
// Règles de structure (refus explicites, avant toute évaluation):
// - on suit si une VALEUR est attendue (début, après opérateur, après '(')
// - opérateur ou ')' quand une valeur est attendue => OperandeManquant
//     "-3+2", "3++2", "(*2)", "()", "1+"
// - nombre ou '(' quand une valeur vient d’être lue => OperandeInattendu
//     "(1)2", "2(3)", "(1)(2)"
// - ')' sans '(' ouvrant, ou '(' jamais fermé => ParenthesesDesequilibrees

use num_bigint::BigInt;

use super::erreur::Rejet;
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        _ => 0,
    }
}

/// Convertit une expression nettoyée (voir `validate`) en RPN.
///
/// Exemple:
///   infix: "2+3*4"
///   rpn:   [Num(2), Num(3), Num(4), Star, Plus]
pub fn to_postfix(infix: &str) -> Result<Vec<Tok>, Rejet> {
    let chars: Vec<char> = infix.chars().collect();

    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // true au début, après un opérateur, après '('.
    let mut attend_valeur = true;

    let mut i: usize = 0;
    while i < chars.len() {
        let c = chars[i];

        // Nombre : chiffres consécutifs => un seul jeton
        if c.is_ascii_digit() {
            if !attend_valeur {
                return Err(Rejet::OperandeInattendu(i));
            }
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let txt: String = chars[start..i].iter().collect();
            let n = BigInt::parse_bytes(txt.as_bytes(), 10)
                .ok_or_else(|| Rejet::NombreInvalide(txt.clone()))?;

            out.push(Tok::Num(n));
            attend_valeur = false;
            continue;
        }

        match c {
            '(' => {
                if !attend_valeur {
                    return Err(Rejet::OperandeInattendu(i));
                }
                ops.push(Tok::LPar);
                attend_valeur = true;
            }

            ')' => {
                if attend_valeur {
                    return Err(Rejet::OperandeManquant(i));
                }
                // dépile jusqu’à '(' (qui est jetée)
                loop {
                    match ops.pop() {
                        Some(Tok::LPar) => break,
                        Some(top) => out.push(top),
                        None => return Err(Rejet::ParenthesesDesequilibrees),
                    }
                }
                attend_valeur = false;
            }

            _ => {
                let tok = Tok::operateur(c).ok_or(Rejet::CaractereInterdit(c))?;
                if attend_valeur {
                    return Err(Rejet::OperandeManquant(i));
                }

                // dépile tant que le sommet est un opérateur de précédence >=
                // ('(' bloque : on le remet en place)
                let p_tok = precedence(&tok);
                while let Some(top) = ops.pop() {
                    if top.est_operateur() && precedence(&top) >= p_tok {
                        out.push(top);
                    } else {
                        ops.push(top);
                        break;
                    }
                }

                ops.push(tok);
                attend_valeur = true;
            }
        }

        i += 1;
    }

    // opérateur final sans opérande droit (ou entrée vide)
    if attend_valeur {
        return Err(Rejet::OperandeManquant(chars.len()));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(Rejet::ParenthesesDesequilibrees);
        }
        out.push(op);
    }

    Ok(out)
}
