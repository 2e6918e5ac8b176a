// src/app.rs
//
// Grapheur live — module App (racine)
// -----------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppGraphe (pour main.rs: use crate::app::AppGraphe;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Disposition : panneau de contrôle à droite, canevas au centre.

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppGraphe;`
pub use etat::AppGraphe;

use eframe::egui;

impl eframe::App for AppGraphe {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = retour à la vue par défaut
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.reset_vue();
        }

        egui::SidePanel::right("panneau_controle")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| self.ui_panneau(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui_graphe(ui);
        });
    }
}
