//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : vérifier la grammaire et l’évaluation contre les identités connues,
//! sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//!
//! Notes :
//! - Tout est en f64 : on compare avec une tolérance, jamais à l’égalité stricte
//!   (sauf quand le calcul est exact en binaire : entiers, puissances de 2).
//! - Le compilateur est itératif (deux piles) : la profondeur d’imbrication ne coûte
//!   pas de pile d’appels, on peut donc stresser plus fort que sur un AST récursif.

use std::f64::consts::PI;
use std::time::{Duration, Instant};

use super::erreurs::{ErreurCompilation, ErreurDomaine, ErreurEval, ErreurSyntaxe};
use super::{compiler, echantillonner, evaluer, segments, Fenetre};

const EPS: f64 = 1e-9;

fn val(expr: &str, x: f64) -> f64 {
    let p = compiler(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    evaluer(&p, x).unwrap_or_else(|e| panic!("expr={expr:?} x={x} err={e}"))
}

fn assert_val(expr: &str, x: f64, attendu: f64) {
    let v = val(expr, x);
    assert!(
        (v - attendu).abs() <= EPS * attendu.abs().max(1.0),
        "expr={expr:?} x={x}: {v} != {attendu}"
    );
}

fn assert_meme_courbe(a: &str, b: &str) {
    let pa = compiler(a).unwrap_or_else(|e| panic!("expr={a:?} err={e}"));
    let pb = compiler(b).unwrap_or_else(|e| panic!("expr={b:?} err={e}"));
    for k in -40..=40 {
        let x = k as f64 * 0.173;
        match (evaluer(&pa, x), evaluer(&pb, x)) {
            (Ok(u), Ok(v)) => assert!(
                (u - v).abs() <= EPS * u.abs().max(1.0),
                "{a:?} / {b:?} diffèrent en x={x}: {u} vs {v}"
            ),
            (Err(e), Err(f)) => assert_eq!(e.est_domaine(), f.est_domaine()),
            (u, v) => panic!("{a:?} / {b:?} en x={x}: {u:?} vs {v:?}"),
        }
    }
}

fn assert_indefini(expr: &str, x: f64) {
    let p = compiler(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    match evaluer(&p, x) {
        Err(ErreurEval::Domaine(_)) => {}
        autre => panic!("expr={expr:?} x={x}: attendu indéfini, obtenu {autre:?}"),
    }
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Grammaire : précédence / associativité ------------------------ */

#[test]
fn sci_table_de_precedence() {
    assert_val("2+3*4", 0.0, 14.0);
    assert_val("2*3^2", 0.0, 18.0);
    assert_val("2^3^2", 0.0, 512.0);
    assert_val("(2^3)^2", 0.0, 64.0);
    assert_val("100/10/5", 0.0, 2.0);
    assert_val("10-2-3", 0.0, 5.0);
    assert_val("-2^2", 0.0, -4.0);
    assert_val("(-2)^2", 0.0, 4.0);
    assert_val("2^-1", 0.0, 0.5);
    assert_val("-x^2", 3.0, -9.0);
    assert_val("1--1", 0.0, 2.0);
    assert_val("2*-3", 0.0, -6.0);
}

#[test]
fn sci_multiplication_implicite_equivalente() {
    assert_meme_courbe("2x", "2*x");
    assert_meme_courbe("x(x+1)", "x*(x+1)");
    assert_meme_courbe("(x+1)(x-1)", "x^2-1");
    assert_meme_courbe("3sin(x)cos(x)", "3*sin(x)*cos(x)");
    assert_meme_courbe("2pi x", "2*pi*x");
    assert_meme_courbe("x^2x", "x^3");
}

#[test]
fn sci_casse_et_espaces() {
    assert_meme_courbe("  SIN ( X ) * X ", "sin(x)*x");
    assert_meme_courbe("Ln(E x)", "1 + ln(x)");
}

/* ------------------------ Identités ------------------------ */

#[test]
fn sci_identites_trig() {
    // sin² + cos² = 1
    assert_meme_courbe("sin(x)^2 + cos(x)^2", "1");
    // sin(-x) = -sin(x)
    assert_meme_courbe("sin(-x)", "-sin(x)");
    // cos(-x) = cos(x)
    assert_meme_courbe("cos(-x)", "cos(x)");
    // tan = sin / cos
    assert_meme_courbe("tan(x)", "sin(x)/cos(x)");
}

#[test]
fn sci_periodicite() {
    assert_meme_courbe("sin(x + 2pi)", "sin(x)");
    assert_meme_courbe("cos(x - 2pi)", "cos(x)");
    assert_meme_courbe("tan(x + pi)", "tan(x)");
}

#[test]
fn sci_logarithmes() {
    assert_val("log(100)", 0.0, 2.0);
    assert_val("ln(e^3)", 0.0, 3.0);
    assert_val("log(x)/log(e)", 7.0, 7.0_f64.ln());
    assert_val("abs(-x)", 4.0, 4.0);
    assert_val("sqrt(x)^2", 2.0, 2.0);
}

/* ------------------------ Domaine : un point indéfini, pas une erreur de compilation ------------------------ */

#[test]
fn sci_indefinis() {
    assert_indefini("sqrt(x)", -0.5);
    assert_indefini("ln(x)", 0.0);
    assert_indefini("log(-x)", 2.0);
    assert_indefini("1/(x-1)", 1.0);
    assert_indefini("(-8)^(1/3)", 0.0);

    // propagation : 1 + indéfini reste indéfini
    assert_indefini("1 + sqrt(x)", -1.0);
    assert_indefini("sqrt(x) * 0", -1.0);
}

#[test]
fn sci_erreurs_de_compilation() {
    for (s, attendu) in [
        ("2+", "opérande manquant"),
        ("(2+3", "parenthèses non fermées"),
        ("2+3)", "sans ouvrante"),
        ("cosh(x)", "fonction inconnue"),
        ("sqrt 4", "parenthèse"),
        ("", "Entrée vide"),
        ("3 % 2", "caractère inattendu"),
    ] {
        let e = compiler(s).expect_err(s);
        assert!(
            e.to_string().contains(attendu),
            "expr={s:?}: {e} ne contient pas {attendu:?}"
        );
    }

    let e = compiler("x y").unwrap_err();
    assert!(matches!(e, ErreurCompilation::Syntaxe(ErreurSyntaxe::FonctionInconnue { .. })));
}

/* ------------------------ Échantillonnage ------------------------ */

#[test]
fn sci_echantillons_alignes_sur_les_colonnes() {
    let p = compiler("x^2 - 4").unwrap();
    let f = Fenetre::default();
    let pts = echantillonner(&p, 400, 300, &f);
    assert_eq!(pts.len(), 401);
    for (i, pt) in pts.iter().enumerate() {
        let (px, _) = pt.unwrap_or_else(|| panic!("trou inattendu en colonne {i}"));
        assert_eq!(px, i as f64);
    }
}

#[test]
fn sci_parabole_symetrique() {
    let p = compiler("x^2").unwrap();
    let pts = echantillonner(&p, 200, 100, &Fenetre::default());
    for i in 0..=200 {
        let (_, a) = pts[i].unwrap();
        let (_, b) = pts[200 - i].unwrap();
        assert!((a - b).abs() < 1e-9, "colonnes {i} / {}", 200 - i);
    }
}

#[test]
fn sci_hyperbole_deux_branches() {
    // 1/x en x = 0 : trou explicite (colonne centrale)
    let p = compiler("1/x").unwrap();
    let pts = echantillonner(&p, 200, 100, &Fenetre::default());
    assert_eq!(pts[100], None);
    assert!(segments(&pts, 100.0).len() >= 2);
}

#[test]
fn sci_tan_plusieurs_asymptotes() {
    let p = compiler("tan(x)").unwrap();
    let f = Fenetre::default();
    let pts = echantillonner(&p, 800, 400, &f);
    // 6 pôles dans [-10, 10] : ±π/2, ±3π/2, ±5π/2
    let segs = segments(&pts, 400.0);
    assert!(segs.len() >= 7, "{} tracés seulement", segs.len());

    for k in [-5.0, -3.0, -1.0, 1.0, 3.0, 5.0] {
        let col = f.vers_pixel_x(k * PI / 2.0, 800.0);
        for s in &segs {
            assert!(
                !s.windows(2).any(|w| w[0].0 < col && w[1].0 > col),
                "un tracé traverse le pôle {k}π/2"
            );
        }
    }
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_parentheses_profondes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    let n = 2000;
    let expr = format!("{}x{}", "(".repeat(n), ")".repeat(n));
    budget(t0, max);

    assert_val(&expr, 1.5, 1.5);
    budget(t0, max);
}

#[test]
fn sci_stress_fonctions_imbriquees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    let mut expr = "x".to_string();
    for _ in 0..500 {
        expr = format!("abs({expr})");
    }
    budget(t0, max);

    assert_val(&expr, -3.0, 3.0);
}

#[test]
fn sci_stress_moins_unaires() {
    // 1001 négations
    let expr = format!("{}x", "-".repeat(1001));
    assert_val(&expr, 2.0, -2.0);
}

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    let expr = vec!["x"; 5000].join(" + ");
    budget(t0, max);

    // somme d’entiers : exacte en f64
    assert_eq!(val(&expr, 1.0), 5000.0);
    budget(t0, max);
}

#[test]
fn sci_depassement_est_un_domaine() {
    let p = compiler("x^x^x").unwrap();
    assert_eq!(
        evaluer(&p, 10.0),
        Err(ErreurEval::Domaine(ErreurDomaine::NonFini))
    );
}
