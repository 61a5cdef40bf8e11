//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - la valeur attendue est calculée PENDANT la génération (None si division par zéro)

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use super::{evaluate, EvaluationError};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

type Attendu = Option<BigRational>;

fn appliquer(op: char, a: Attendu, b: Attendu) -> Attendu {
    let (a, b) = (a?, b?);
    match op {
        '+' => Some(a + b),
        '-' => Some(a - b),
        '*' => Some(a * b),
        _ => {
            if b.is_zero() {
                None
            } else {
                Some(a / b)
            }
        }
    }
}

fn gen_op(rng: &mut Rng) -> char {
    match rng.pick(4) {
        0 => '+',
        1 => '-',
        2 => '*',
        _ => '/',
    }
}

fn gen_atom(rng: &mut Rng) -> (String, Attendu) {
    // 0 inclus : les divisions par zéro doivent arriver
    let n = rng.pick(13) as i64;
    (format!("{n}"), Some(BigRational::from_integer(BigInt::from(n))))
}

fn espace(rng: &mut Rng) -> &'static str {
    if rng.pick(4) == 0 {
        " "
    } else {
        ""
    }
}

/// Expressions entièrement parenthésées : la précédence ne joue pas.
fn gen_expr(rng: &mut Rng, depth: usize) -> (String, Attendu) {
    if depth == 0 || rng.pick(4) == 0 {
        return gen_atom(rng);
    }

    let (ga, va) = gen_expr(rng, depth - 1);
    let (gb, vb) = gen_expr(rng, depth - 1);
    let op = gen_op(rng);
    let e1 = espace(rng);
    let e2 = espace(rng);

    (format!("({ga}{e1}{op}{e2}{gb})"), appliquer(op, va, vb))
}

/// Chaîne plate "a op b op c ..." : la précédence et l’associativité jouent.
/// Référence : termes (* /) de gauche à droite, puis somme (+ -) de gauche à droite.
fn gen_chaine(rng: &mut Rng, n: usize) -> (String, Attendu) {
    let (mut txt, premier) = gen_atom(rng);

    let mut somme: Attendu = Some(BigRational::zero());
    let mut signe = '+';
    let mut terme = premier;

    for _ in 1..n {
        let op = gen_op(rng);
        let (g, v) = gen_atom(rng);
        txt.push(op);
        txt.push_str(&g);

        if op == '*' || op == '/' {
            terme = appliquer(op, terme, v);
        } else {
            somme = appliquer(signe, somme, terme);
            signe = op;
            terme = v;
        }
    }

    (txt, appliquer(signe, somme, terme))
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_parenthese_contre_reference() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let (expr, attendu) = gen_expr(&mut rng, 5);

        match (evaluate(&expr), attendu) {
            (Ok(v), Some(a)) => {
                assert_eq!(v, a, "expr={expr:?}");
                seen_ok += 1;
            }
            (Err(EvaluationError::InvalidExpression), None) => seen_err += 1,
            (obtenu, attendu) => {
                panic!("expr={expr:?} obtenu={obtenu:?} attendu={attendu:?}")
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune division par zéro vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_chaines_plates_precedence() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..200 {
        budget(t0, max);

        let n = 1 + rng.pick(8) as usize;
        let (expr, attendu) = gen_chaine(&mut rng, n);

        match attendu {
            Some(a) => assert_eq!(evaluate(&expr), Ok(a), "expr={expr:?}"),
            None => assert_eq!(
                evaluate(&expr),
                Err(EvaluationError::InvalidExpression),
                "expr={expr:?}"
            ),
        }
    }
}

#[test]
fn fuzz_safe_alphabet_aleatoire_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    const ALPHABET: [char; 10] = ['1', '2', '0', '+', '-', '*', '/', '(', ')', ' '];

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..500 {
        budget(t0, max);

        let len = rng.pick(16) as usize;
        let expr: String = (0..len)
            .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
            .collect();

        // Aucune panique ; déterminisme d’un appel à l’autre.
        let a = evaluate(&expr);
        let b = evaluate(&expr);
        assert_eq!(a, b, "expr={expr:?}");

        // Un refus ne dit jamais pourquoi.
        if let Err(e) = a {
            assert_eq!(e, EvaluationError::InvalidExpression);
        }
        if rng.coin() {
            assert_eq!(evaluate(&format!(" {expr} ")), b, "expr={expr:?}");
        }
    }
}
