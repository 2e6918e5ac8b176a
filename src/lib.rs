//! Grapheur live — bibliothèque
//!
//! Le noyau (texte -> programme RPN -> points écran) est exposé ici,
//! sans egui : l’exécutable (src/main.rs) n’en est qu’un client.

pub mod noyau;
