//! Noyau — compilation et évaluation
//!
//! texte -> jetons -> RPN validée -> sonde (x = 1) -> Programme
//! Programme + x -> f64 (ou erreur explicite, jamais NaN comme valeur)
//!
//! Remarque : la sonde ne rejette que les programmes malformés (pile).
//! Un résultat indéfini en x = 1 (ex: log(x-5)) est normal pour un graphe.

use log::{debug, warn};

use super::erreurs::{ErreurCompilation, ErreurDomaine, ErreurEval, ErreurPile};
use super::jetons::{tokenize_avec, ModeLecture};
use super::programme::{Fonction, Instr, OpBinaire, Programme};
use super::rpn::to_rpn;

/// Valeur de x pour la sonde de validation par défaut.
pub const SONDE_DEFAUT: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OptionsCompilation {
    pub mode: ModeLecture,
    /// None : pas de sonde.
    pub sonde: Option<f64>,
}

impl Default for OptionsCompilation {
    fn default() -> Self {
        Self {
            mode: ModeLecture::Strict,
            sonde: Some(SONDE_DEFAUT),
        }
    }
}

/// API publique : compile une expression avec les options par défaut.
pub fn compiler(expr_str: &str) -> Result<Programme, ErreurCompilation> {
    compiler_avec(expr_str, &OptionsCompilation::default())
}

pub fn compiler_avec(
    expr_str: &str,
    options: &OptionsCompilation,
) -> Result<Programme, ErreurCompilation> {
    // 1) Jetons
    let jetons = tokenize_avec(expr_str, options.mode)?;

    // 2) RPN (validée structurellement)
    let prog = to_rpn(&jetons)?;

    // 3) Sonde
    if let Some(x) = options.sonde {
        match evaluer(&prog, x) {
            Ok(v) => debug!("sonde x={x} -> {v}"),
            Err(ErreurEval::Domaine(d)) => debug!("sonde x={x} indéfinie: {d}"),
            Err(ErreurEval::Pile(p)) => {
                warn!("programme [{prog}] rejeté par la sonde: {p}");
                return Err(ErreurCompilation::Sonde(p));
            }
        }
    }

    Ok(prog)
}

/// Refuse NaN / ±inf : une valeur non finie n’est jamais poussée sur la pile.
fn fini(v: f64, sinon: ErreurDomaine) -> Result<f64, ErreurEval> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(sinon.into())
    }
}

fn binaire(op: OpBinaire, a: f64, b: f64) -> Result<f64, ErreurEval> {
    match op {
        OpBinaire::Add => fini(a + b, ErreurDomaine::NonFini),
        OpBinaire::Sub => fini(a - b, ErreurDomaine::NonFini),
        OpBinaire::Mul => fini(a * b, ErreurDomaine::NonFini),
        OpBinaire::Div => {
            if b == 0.0 {
                return Err(ErreurDomaine::DivisionParZero.into());
            }
            fini(a / b, ErreurDomaine::NonFini)
        }
        OpBinaire::Pow => {
            let r = a.powf(b);
            // base négative + exposant fractionnaire => NaN
            if r.is_nan() {
                return Err(ErreurDomaine::PuissanceNonReelle.into());
            }
            fini(r, ErreurDomaine::NonFini)
        }
    }
}

fn appel(f: Fonction, a: f64) -> Result<f64, ErreurEval> {
    let r = match f {
        Fonction::Sin => a.sin(),
        Fonction::Cos => a.cos(),
        Fonction::Tan => a.tan(),
        Fonction::Sqrt => {
            if a < 0.0 {
                return Err(ErreurDomaine::RacineNegative.into());
            }
            a.sqrt()
        }
        Fonction::Log | Fonction::Ln => {
            if a <= 0.0 {
                return Err(ErreurDomaine::LogarithmeNonPositif.into());
            }
            if f == Fonction::Log {
                a.log10()
            } else {
                a.ln()
            }
        }
        Fonction::Abs => a.abs(),
    };
    fini(r, ErreurDomaine::NonFini)
}

/// Évalue le programme pour une valeur de x (une passe, une pile).
pub fn evaluer(prog: &Programme, x: f64) -> Result<f64, ErreurEval> {
    let mut pile: Vec<f64> = Vec::with_capacity(16);

    for instr in prog.instrs() {
        let v = match *instr {
            Instr::Const(c) => fini(c, ErreurDomaine::NonFini)?,
            Instr::X => fini(x, ErreurDomaine::NonFini)?,
            Instr::Binaire(op) => {
                // droite d’abord, puis gauche
                let b = pile.pop().ok_or(ErreurPile::Vide)?;
                let a = pile.pop().ok_or(ErreurPile::Vide)?;
                binaire(op, a, b)?
            }
            Instr::Neg => -pile.pop().ok_or(ErreurPile::Vide)?,
            Instr::Appel(f) => appel(f, pile.pop().ok_or(ErreurPile::Vide)?)?,
        };
        pile.push(v);
    }

    match (pile.pop(), pile.len()) {
        (Some(v), 0) => Ok(v),
        (None, _) => Err(ErreurPile::Vide.into()),
        (Some(_), n) => Err(ErreurPile::Residuel { restants: n + 1 }.into()),
    }
}
