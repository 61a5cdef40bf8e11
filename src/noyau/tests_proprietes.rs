//! Tests de propriétés : précédence, associativité, espaces, limites contrôlées.
//!
//! But : vérifier le contrat de `evaluate` sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//! - refus : toujours la même erreur publique, quelle que soit la cause

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;

use super::{eval_expression, evaluate, EvaluationError};

fn rat(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

fn assert_vaut(expr: &str, n: i64, d: i64) {
    let v = evaluate(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    assert_eq!(v, rat(n, d), "expr={expr:?}");
}

fn assert_invalide(expr: &str) {
    assert_eq!(
        evaluate(expr),
        Err(EvaluationError::InvalidExpression),
        "expr={expr:?}"
    );
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Précédence / associativité ------------------------ */

#[test]
fn prop_precedence_melangee() {
    assert_vaut("1+2*3-4/2", 5, 1);
    assert_vaut("2*3+4*5", 26, 1);
    assert_vaut("100-10*3/5", 94, 1);
    assert_vaut("1+2*(3-4)/2", 0, 1);
}

#[test]
fn prop_associativite_gauche_meme_niveau() {
    // (8-3)-2 et non 8-(3-2)
    assert_vaut("8-3-2", 3, 1);
    // (2/3)/4 et non 2/(3/4)
    assert_vaut("2/3/4", 1, 6);
    // * et / au même niveau : (12/3)*2
    assert_vaut("12/3*2", 8, 1);
    // + et - au même niveau : (5-2)+1
    assert_vaut("5-2+1", 4, 1);
}

#[test]
fn prop_parentheses_forcent_la_droite() {
    assert_vaut("8-(3-2)", 7, 1);
    assert_vaut("2/(3/4)", 8, 3);
}

/* ------------------------ Espaces ------------------------ */

#[test]
fn prop_espaces_insensibles() {
    for (a, b) in [
        ("1 + 2", "1+2"),
        (" ( 2 + 3 ) * 4 ", "(2+3)*4"),
        ("1\t0 0", "100"),
        ("8 - 3 -\n2", "8-3-2"),
    ] {
        assert_eq!(evaluate(a), evaluate(b), "a={a:?} b={b:?}");
    }
}

#[test]
fn prop_espace_colle_les_chiffres() {
    // Les espaces sont retirés AVANT la lecture des nombres.
    assert_vaut("1 2 + 3", 15, 1);
}

/* ------------------------ Refus ------------------------ */

#[test]
fn prop_refus_uniformes() {
    for expr in [
        "", "abc", "(1+2", "1+2)", "1/0", "3++2", "-3+2", "+1", "()", "2(3)", "(1)(2)", "1+",
        "*", "1..2", "1,5", "1 + x", "2^3",
    ] {
        assert_invalide(expr);
    }
}

#[test]
fn prop_refus_deterministe() {
    // Même entrée => même échec, sans état caché entre appels.
    for _ in 0..3 {
        assert_invalide("(1+2");
        assert_vaut("1+2", 3, 1);
    }
}

/* ------------------------ Limites contrôlées ------------------------ */

#[test]
fn prop_imbrication_profonde() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let n = 2000;
    let expr = format!("{}1+2{}", "(".repeat(n), ")".repeat(n));
    assert_vaut(&expr, 3, 1);

    let mal = format!("{}1+2{}", "(".repeat(n), ")".repeat(n - 1));
    assert_invalide(&mal);

    budget(t0, max);
}

#[test]
fn prop_longue_chaine() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    // 1+1+...+1 (5000 termes)
    let expr = vec!["1"; 5000].join("+");
    assert_vaut(&expr, 5000, 1);

    // 2*2*...*2 (64 facteurs) : reste exact au-delà de u64
    let expr = vec!["2"; 64].join("*");
    let v = evaluate(&expr).unwrap();
    assert_eq!(v, BigRational::from_integer(BigInt::from(2).pow(64)));

    budget(t0, max);
}

#[test]
fn prop_grands_litteraux() {
    assert_vaut("99999999999999999999-99999999999999999998", 1, 1);
    assert_vaut("000042", 42, 1);
}

#[test]
fn prop_lecture_decimale() {
    let r = eval_expression("1/3", 10).unwrap();
    assert_eq!(r.exact, "1/3");
    assert_eq!(r.lecture, "0.3333333333");

    let r = eval_expression("1-4/3", 4).unwrap();
    assert_eq!(r.exact, "-1/3");
    assert_eq!(r.lecture, "-0.3333");
}
