//! Noyau — échantillonnage de courbe
//!
//! Une colonne de pixels = une évaluation. Chaque colonne est indépendante :
//! le programme est partagé en lecture seule, l’ordre du résultat suit les colonnes.
//!
//! Contrats :
//! - `echantillonner` rend `largeur + 1` points (ou rien si le canevas est vide).
//! - Une évaluation ratée ou non finie donne un trou (`None`), jamais une valeur.
//! - `segments` coupe aussi entre deux points dont l’écart vertical dépasse la hauteur
//!   du canevas (asymptotes verticales, ex: tan(x) en π/2).

use log::trace;

use super::eval::evaluer;
use super::programme::Programme;

/// Fenêtre par défaut : [-10, 10] sur les deux axes.
pub const BORNE_DEFAUT: f64 = 10.0;

/// Nombre de pas de graduation par axe.
pub const PAS_GRILLE: usize = 10;

/// Point écran, ou trou.
pub type Echantillon = Option<(f64, f64)>;

/// Intervalles visibles (horizontal, vertical). Invariant : min < max sur les deux axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fenetre {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Fenetre {
    fn default() -> Self {
        Self {
            x_min: -BORNE_DEFAUT,
            x_max: BORNE_DEFAUT,
            y_min: -BORNE_DEFAUT,
            y_max: BORNE_DEFAUT,
        }
    }
}

impl Fenetre {
    /// None si un intervalle est vide, inversé ou non fini.
    pub fn new(x: (f64, f64), y: (f64, f64)) -> Option<Self> {
        let ok = |(a, b): (f64, f64)| a.is_finite() && b.is_finite() && a < b;
        if ok(x) && ok(y) {
            Some(Self {
                x_min: x.0,
                x_max: x.1,
                y_min: y.0,
                y_max: y.1,
            })
        } else {
            None
        }
    }

    /// Zoom autour de l’origine (les deux intervalles multipliés par `facteur`).
    /// Facteur < 1 : on se rapproche. Refusé (None) si la fenêtre deviendrait dégénérée.
    pub fn zoom(&self, facteur: f64) -> Option<Self> {
        if !(facteur.is_finite() && facteur > 0.0) {
            return None;
        }
        Self::new(
            (self.x_min * facteur, self.x_max * facteur),
            (self.y_min * facteur, self.y_max * facteur),
        )
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn vers_pixel_x(&self, x: f64, largeur: f64) -> f64 {
        (x - self.x_min) / (self.x_max - self.x_min) * largeur
    }

    pub fn vers_pixel_y(&self, y: f64, hauteur: f64) -> f64 {
        hauteur - (y - self.y_min) / (self.y_max - self.y_min) * hauteur
    }

    pub fn graduations_x(&self) -> Vec<f64> {
        graduations(self.x_min, self.x_max)
    }

    pub fn graduations_y(&self) -> Vec<f64> {
        graduations(self.y_min, self.y_max)
    }
}

/// Multiples du pas (étendue / 10) compris dans [min, max].
fn graduations(min: f64, max: f64) -> Vec<f64> {
    let pas = (max - min) / PAS_GRILLE as f64;
    let premier = (min / pas).ceil() as i64;
    // +1 pour l’arrondi quand max tombe pile sur une graduation
    (premier..=premier + PAS_GRILLE as i64 + 1)
        .map(|k| k as f64 * pas)
        .filter(|v| *v <= max + pas * 1e-9)
        .collect()
}

fn colonne(prog: &Programme, i: usize, largeur: usize, hauteur: f64, f: &Fenetre) -> Echantillon {
    let x = f.x_min + i as f64 * (f.x_max - f.x_min) / largeur as f64;
    match evaluer(prog, x) {
        Ok(y) => {
            let py = f.vers_pixel_y(y, hauteur);
            py.is_finite().then_some((i as f64, py))
        }
        Err(_) => None,
    }
}

/// Échantillonne la courbe : un point par colonne de pixels, de 0 à `largeur` inclus.
pub fn echantillonner(
    prog: &Programme,
    largeur: usize,
    hauteur: usize,
    fenetre: &Fenetre,
) -> Vec<Echantillon> {
    if largeur == 0 || hauteur == 0 {
        return Vec::new();
    }
    let h = hauteur as f64;

    #[cfg(feature = "parallele")]
    let points: Vec<Echantillon> = {
        use rayon::prelude::*;
        (0..=largeur)
            .into_par_iter()
            .map(|i| colonne(prog, i, largeur, h, fenetre))
            .collect()
    };

    #[cfg(not(feature = "parallele"))]
    let points: Vec<Echantillon> = (0..=largeur)
        .map(|i| colonne(prog, i, largeur, h, fenetre))
        .collect();

    trace!(
        "échantillonnage: {} colonnes, {} trous",
        points.len(),
        points.iter().filter(|p| p.is_none()).count()
    );
    points
}

/// Découpe les points en tracés continus : coupure sur un trou,
/// et sur un saut vertical plus grand que la hauteur du canevas.
pub fn segments(points: &[Echantillon], hauteur: f64) -> Vec<Vec<(f64, f64)>> {
    let mut out: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut courant: Vec<(f64, f64)> = Vec::new();

    for p in points {
        match *p {
            None => {
                if !courant.is_empty() {
                    out.push(std::mem::take(&mut courant));
                }
            }
            Some(pt) => {
                if let Some(&(_, y_prec)) = courant.last() {
                    if (pt.1 - y_prec).abs() > hauteur {
                        out.push(std::mem::take(&mut courant));
                    }
                }
                courant.push(pt);
            }
        }
    }

    if !courant.is_empty() {
        out.push(courant);
    }
    out
}
