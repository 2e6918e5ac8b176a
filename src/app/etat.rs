//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état du grapheur (entrée, programme compilé, erreur, fenêtre de vue)
//! et offrir des opérations simples (saisie retardée, zoom, reset, exemples)
//! sans logique d’affichage.
//!
//! Contrats :
//! - La compilation passe uniquement par le noyau (`compiler_avec`).
//! - Le temps est fourni par l’appelant (secondes, horloge egui) : pas d’horloge ici.
//! - La fenêtre garde min < max : un zoom refusé laisse la vue intacte.

use log::{debug, warn};

use grapheur_live::noyau::jetons::{format_tokens, tokenize_avec, ModeLecture};
use grapheur_live::noyau::{compiler_avec, Fenetre, OptionsCompilation, Programme};

/// Délai entre la dernière frappe et la compilation.
pub const DEBOUNCE_S: f64 = 0.3;

pub const ZOOM_AVANT: f64 = 0.8;
pub const ZOOM_ARRIERE: f64 = 1.2;

pub const ENTREE_INITIALE: &str = "sin(x) * x";

pub const EXEMPLES: [&str; 6] = [
    "sin(x)",
    "x^2 - 4",
    "tan(x)",
    "sin(x) / x",
    "log(x)",
    "x * sin(x^2)",
];

#[derive(Clone, Debug)]
pub struct AppGraphe {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub programme: Option<Programme>,
    pub jetons: String, // jetons lus (démarche)
    pub rpn: String,    // programme affiché (notation postfixée)
    pub erreur: String, // message d’erreur de compilation

    // --- vue ---
    pub fenetre: Fenetre,

    // --- paramètres ---
    pub mode: ModeLecture,

    // --- UX ---
    /// Instant (s) de la dernière frappe pas encore compilée.
    pub modifie_a: Option<f64>,
    pub focus_entree: bool,
}

impl Default for AppGraphe {
    fn default() -> Self {
        let mut app = Self {
            entree: ENTREE_INITIALE.to_string(),
            programme: None,
            jetons: String::new(),
            rpn: String::new(),
            erreur: String::new(),
            fenetre: Fenetre::default(),
            mode: ModeLecture::default(),
            modifie_a: None,
            focus_entree: true,
        };
        app.compiler_entree();
        app
    }
}

impl AppGraphe {
    /* ------------------------ Saisie retardée ------------------------ */

    /// À appeler quand le texte change : la compilation attendra `DEBOUNCE_S`.
    pub fn saisie_modifiee(&mut self, maintenant: f64) {
        self.modifie_a = Some(maintenant);
    }

    /// Compile si le délai est écoulé. Rend le temps restant sinon (pour redemander un rendu).
    pub fn tick(&mut self, maintenant: f64) -> Option<f64> {
        let t = self.modifie_a?;
        let ecoule = maintenant - t;
        if ecoule >= DEBOUNCE_S {
            self.modifie_a = None;
            self.compiler_entree();
            None
        } else {
            Some(DEBOUNCE_S - ecoule)
        }
    }

    /// Compile l’entrée tout de suite (sonde x = 1 incluse).
    pub fn compiler_entree(&mut self) {
        self.modifie_a = None;

        let s = self.entree.trim();
        if s.is_empty() {
            // entrée vide : pas de courbe, pas d’erreur affichée
            self.programme = None;
            self.jetons.clear();
            self.rpn.clear();
            self.erreur.clear();
            return;
        }

        let options = OptionsCompilation {
            mode: self.mode,
            ..OptionsCompilation::default()
        };

        match compiler_avec(s, &options) {
            Ok(p) => {
                debug!("entrée {s:?} compilée: [{p}]");
                // déjà lus sans erreur par compiler_avec
                self.jetons = tokenize_avec(s, self.mode)
                    .map(|t| format_tokens(&t))
                    .unwrap_or_default();
                self.rpn = p.to_string();
                self.programme = Some(p);
                self.erreur.clear();
            }
            Err(e) => {
                self.programme = None;
                self.jetons.clear();
                self.rpn.clear();
                self.erreur = e.to_string();
            }
        }
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    pub fn choisir_exemple(&mut self, expr: &str) {
        self.entree = expr.to_string();
        self.compiler_entree();
        self.focus_entree = true;
    }

    /// C : effacer l’entrée (et donc la courbe).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.compiler_entree();
        self.focus_entree = true;
    }

    pub fn set_mode(&mut self, mode: ModeLecture) {
        if self.mode != mode {
            self.mode = mode;
            self.compiler_entree();
        }
    }

    pub fn zoom(&mut self, facteur: f64) {
        match self.fenetre.zoom(facteur) {
            Some(f) => self.fenetre = f,
            None => warn!("zoom x{facteur} refusé: fenêtre dégénérée"),
        }
    }

    pub fn reset_vue(&mut self) {
        self.fenetre.reset();
    }
}
