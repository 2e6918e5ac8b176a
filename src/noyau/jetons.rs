// src/noyau/jetons.rs

use std::f64::consts::{E, PI};

use super::erreurs::ErreurLexicale;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // La variable (toujours "x")
    X,

    // Tout autre mot en minuscules : le compilateur décidera si c’est une fonction connue.
    Fonction(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    LPar,
    RPar,
}

impl Tok {
    /// Jeton qui peut terminer un opérande (nombre, x, parenthèse fermante).
    pub fn termine_operande(&self) -> bool {
        matches!(self, Tok::Num(_) | Tok::X | Tok::RPar)
    }

    /// Jeton qui peut commencer un opérande (nombre, x, fonction, parenthèse ouvrante).
    pub fn commence_operande(&self) -> bool {
        matches!(self, Tok::Num(_) | Tok::X | Tok::Fonction(_) | Tok::LPar)
    }
}

/// Politique face à un caractère qui ne correspond à aucun jeton.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeLecture {
    /// Erreur lexicale au premier caractère inconnu.
    #[default]
    Strict,
    /// Le caractère est ignoré (comportement historique du grapheur).
    Souple,
}

/// Tokenize en mode strict.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurLexicale> {
    tokenize_avec(s, ModeLecture::Strict)
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, 3., .5)
/// - x (variable), pi et e (constantes, développées en nombres)
/// - mots [a-z]+ (fonctions, validées plus tard)
/// - opérateurs + - * / ^ et parenthèses ( )
///
/// L’entrée est mise en minuscules avant lecture ; les espaces sont ignorés.
/// Une position d’erreur est un indice de caractère dans le texte saisi.
/// Un littéral trop grand pour f64 est refusé (jamais de constante infinie).
pub fn tokenize_avec(s: &str, mode: ModeLecture) -> Result<Vec<Tok>, ErreurLexicale> {
    let mut out = Vec::new();
    // caractère par caractère : un indice ici = un indice dans `s`
    let chars: Vec<char> = s
        .chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Nombre : chiffres [. chiffres*] ou . chiffres
        let debut_fraction = c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit());
        if c.is_ascii_digit() || debut_fraction {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            let txt: String = chars[start..i].iter().collect();
            let v = txt
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or(ErreurLexicale {
                    position: start,
                    caractere: c,
                })?;
            out.push(Tok::Num(v));
            continue;
        }

        // Mots : x, pi, e, sinon fonction
        if c.is_ascii_lowercase() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_lowercase() {
                i += 1;
            }
            let mot: String = chars[start..i].iter().collect();
            out.push(match mot.as_str() {
                "x" => Tok::X,
                "pi" => Tok::Num(PI),
                "e" => Tok::Num(E),
                _ => Tok::Fonction(mot),
            });
            continue;
        }

        let tok = match c {
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            _ => None,
        };

        match (tok, mode) {
            (Some(t), _) => out.push(t),
            (None, ModeLecture::Souple) => {}
            (None, ModeLecture::Strict) => {
                return Err(ErreurLexicale {
                    position: i,
                    caractere: c,
                })
            }
        }
        i += 1;
    }

    Ok(out)
}

/// Format utilitaire (debug/affichage) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::X => "x".to_string(),
            Tok::Fonction(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
