// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppGraphe (etat.rs) pour natif + wasm
// - Saisie : compilation retardée (DEBOUNCE_S), Enter compile tout de suite
// - Canevas : grille + axes + courbe, redessinés à chaque frame
//
// Note :
// - La courbe est tracée par morceaux (`segments`) : jamais de trait à travers un trou
//   ni à travers une asymptote verticale.

use std::time::Duration;

use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, Sense, Stroke};

use super::etat::{AppGraphe, EXEMPLES, ZOOM_ARRIERE, ZOOM_AVANT};
use grapheur_live::noyau::jetons::ModeLecture;
use grapheur_live::noyau::{echantillonner, segments};

const FOND: Color32 = Color32::from_rgb(17, 24, 39);
const GRILLE: Color32 = Color32::from_rgb(55, 65, 81);
const LEGENDE: Color32 = Color32::from_rgb(156, 163, 175);
const AXES: Color32 = Color32::from_rgb(229, 231, 235);
const COURBE: Color32 = Color32::from_rgb(96, 165, 250);

impl AppGraphe {
    /// Panneau de contrôle : à appeler depuis eframe::App::update(...)
    pub fn ui_panneau(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        ui.heading("Grapheur live");
        ui.add_space(6.0);

        self.ui_entree(ui);

        ui.add_space(8.0);
        ui.separator();
        ui.add_space(8.0);

        self.ui_exemples(ui);

        ui.add_space(8.0);
        ui.separator();
        ui.add_space(8.0);

        self.ui_vue(ui);
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("f(x) =");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: sin(x) * x, 2x^2 - 3, sqrt(abs(x))")
                .id_salt("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        let maintenant = ui.input(|i| i.time);
        if resp.changed() {
            self.saisie_modifiee(maintenant);
        }

        // Enter : pas d’attente
        if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.compiler_entree();
            self.focus_entree = true;
        }

        // Délai en cours : on redemande une frame quand il expire
        if let Some(reste) = self.tick(maintenant) {
            ui.ctx()
                .request_repaint_after(Duration::from_secs_f64(reste.max(0.0)));
        }

        ui.horizontal(|ui| {
            if ui
                .add_sized([56.0, 30.0], egui::Button::new("C"))
                .on_hover_text("Efface l’entrée")
                .clicked()
            {
                self.clear_entree();
            }

            ui.separator();

            let mut mode = self.mode;
            ui.radio_value(&mut mode, ModeLecture::Strict, "strict")
                .on_hover_text("Caractère inconnu = erreur");
            ui.radio_value(&mut mode, ModeLecture::Souple, "souple")
                .on_hover_text("Caractère inconnu = ignoré");
            self.set_mode(mode);
        });

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }

        if !self.rpn.is_empty() {
            ui.add_space(6.0);
            egui::CollapsingHeader::new("Démarche")
                .default_open(false)
                .show(ui, |ui| {
                    Self::champ_monospace(ui, "Jetons", &self.jetons);
                    Self::champ_monospace(ui, "RPN", &self.rpn);
                    if let Some(p) = &self.programme {
                        if !p.depend_de_x() {
                            ui.label("(constante : la courbe est une droite horizontale)");
                        }
                    }
                });
        }
    }

    fn champ_monospace(ui: &mut egui::Ui, titre: &str, contenu: &str) {
        ui.label(format!("{titre} :"));
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.monospace(contenu);
            });
    }

    fn ui_exemples(&mut self, ui: &mut egui::Ui) {
        ui.label("Exemples :");
        ui.horizontal_wrapped(|ui| {
            for ex in EXEMPLES {
                if ui.button(ex).clicked() {
                    self.choisir_exemple(ex);
                }
            }
        });
    }

    fn ui_vue(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Zoom +").on_hover_text("Zoom avant").clicked() {
                self.zoom(ZOOM_AVANT);
            }
            if ui.button("Zoom −").on_hover_text("Zoom arrière").clicked() {
                self.zoom(ZOOM_ARRIERE);
            }
            if ui.button("Reset").on_hover_text("Vue par défaut").clicked() {
                self.reset_vue();
            }
        });

        let f = &self.fenetre;
        ui.monospace(format!(
            "x ∈ [{:.2}, {:.2}]\ny ∈ [{:.2}, {:.2}]",
            f.x_min, f.x_max, f.y_min, f.y_max
        ));
    }

    /// Canevas : grille, axes, courbe.
    pub fn ui_graphe(&mut self, ui: &mut egui::Ui) {
        let taille = ui.available_size();
        let (resp, painter) = ui.allocate_painter(taille, Sense::hover());
        let rect = resp.rect;
        // taille entière : la même pour la grille, les axes et l’échantillonnage
        let (largeur, hauteur) = (rect.width().floor() as f64, rect.height().floor() as f64);

        painter.rect_filled(rect, 8.0, FOND);
        if largeur < 1.0 || hauteur < 1.0 {
            return;
        }

        let f = self.fenetre;
        let vers_ecran =
            |px: f64, py: f64| Pos2::new(rect.min.x + px as f32, rect.min.y + py as f32);
        let police = FontId::proportional(10.0);

        // 1) Grille + graduations
        let trait_grille = Stroke::new(1.0, GRILLE);
        for gx in f.graduations_x() {
            let px = f.vers_pixel_x(gx, largeur);
            painter.line_segment([vers_ecran(px, 0.0), vers_ecran(px, hauteur)], trait_grille);
            if gx.abs() > 1e-3 {
                painter.text(
                    vers_ecran(px + 4.0, hauteur - 10.0),
                    Align2::LEFT_BOTTOM,
                    format!("{gx:.1}"),
                    police.clone(),
                    LEGENDE,
                );
            }
        }
        for gy in f.graduations_y() {
            let py = f.vers_pixel_y(gy, hauteur);
            painter.line_segment([vers_ecran(0.0, py), vers_ecran(largeur, py)], trait_grille);
            if gy.abs() > 1e-3 {
                painter.text(
                    vers_ecran(5.0, py - 4.0),
                    Align2::LEFT_BOTTOM,
                    format!("{gy:.1}"),
                    police.clone(),
                    LEGENDE,
                );
            }
        }

        // 2) Axes (si visibles)
        let trait_axes = Stroke::new(2.0, AXES);
        let ax = f.vers_pixel_x(0.0, largeur);
        if (0.0..=largeur).contains(&ax) {
            painter.line_segment([vers_ecran(ax, 0.0), vers_ecran(ax, hauteur)], trait_axes);
        }
        let ay = f.vers_pixel_y(0.0, hauteur);
        if (0.0..=hauteur).contains(&ay) {
            painter.line_segment([vers_ecran(0.0, ay), vers_ecran(largeur, ay)], trait_axes);
        }

        // 3) Courbe
        if let Some(prog) = &self.programme {
            let pts = echantillonner(prog, largeur as usize, hauteur as usize, &f);
            let trait_courbe = Stroke::new(3.0, COURBE);

            for seg in segments(&pts, hauteur) {
                let chemin: Vec<Pos2> = seg.iter().map(|&(px, py)| vers_ecran(px, py)).collect();
                // point isolé : un point, pas un trait
                if chemin.len() == 1 {
                    painter.circle_filled(chemin[0], 1.5, COURBE);
                } else {
                    painter.add(egui::Shape::line(chemin, trait_courbe));
                }
            }
        }

        painter.text(
            rect.right_top() + egui::vec2(-12.0, 12.0),
            Align2::RIGHT_TOP,
            format!("Rés: {}x{}", largeur.round(), hauteur.round()),
            FontId::monospace(10.0),
            LEGENDE,
        );
    }
}
