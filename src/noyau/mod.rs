//! Noyau du grapheur
//!
//! Organisation interne :
//! - erreurs.rs   : erreurs typées (lexicale, syntaxe, domaine, pile)
//! - jetons.rs    : tokenisation (strict / souple)
//! - programme.rs : instructions RPN + fonctions reconnues
//! - rpn.rs       : shunting-yard + validation structurelle
//! - eval.rs      : compilation (pipeline + sonde) et évaluation
//! - trace.rs     : fenêtre de vue, échantillonnage, découpe en tracés

pub mod erreurs;
pub mod eval;
pub mod jetons;
pub mod programme;
pub mod rpn;
pub mod trace;

#[cfg(test)]
mod tests_scientifiques;


// API publique minimale
pub use erreurs::{ErreurCompilation, ErreurEval};
pub use eval::{compiler, compiler_avec, evaluer, OptionsCompilation};
pub use programme::Programme;
pub use trace::{echantillonner, segments, Fenetre};
