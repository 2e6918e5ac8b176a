//! Noyau — erreurs typées
//!
//! Deux familles bien séparées :
//! - compilation (texte -> programme) : lexicale ou syntaxique, on refuse le programme ;
//! - évaluation (programme, x -> valeur) : domaine (ce point seulement) ou pile (programme malformé).

use thiserror::Error;

/// Caractère non reconnu en lecture stricte.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("caractère inattendu: '{caractere}' (position {position})")]
pub struct ErreurLexicale {
    pub position: usize,
    pub caractere: char,
}

/// Suite de jetons structurellement invalide.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurSyntaxe {
    #[error("Entrée vide")]
    Vide,

    #[error("parenthèses non fermées")]
    ParentheseNonFermee,

    #[error("parenthèse fermante sans ouvrante")]
    ParentheseNonOuverte,

    #[error("opérande manquant pour '{operateur}'")]
    OperandeManquant { operateur: String },

    #[error("fonction inconnue: '{nom}'")]
    FonctionInconnue { nom: String },

    #[error("la fonction '{nom}' doit être suivie d’une parenthèse")]
    FonctionSansParenthese { nom: String },

    #[error("expression incomplète ({restants} valeurs sans opérateur)")]
    ExpressionIncomplete { restants: usize },
}

/// Erreur de `compiler` : tout ce qui empêche d’obtenir un programme.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCompilation {
    #[error(transparent)]
    Lexicale(#[from] ErreurLexicale),

    #[error(transparent)]
    Syntaxe(#[from] ErreurSyntaxe),

    #[error("programme rejeté par la sonde: {0}")]
    Sonde(ErreurPile),
}

/// Résultat mathématiquement indéfini pour un x donné.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ErreurDomaine {
    #[error("racine carrée d’un nombre négatif")]
    RacineNegative,

    #[error("logarithme d’un nombre non positif")]
    LogarithmeNonPositif,

    #[error("puissance non réelle")]
    PuissanceNonReelle,

    #[error("division par zéro")]
    DivisionParZero,

    #[error("résultat non fini")]
    NonFini,
}

/// Programme malformé détecté à l’exécution (défaut du compilateur).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ErreurPile {
    #[error("pile vide")]
    Vide,

    #[error("pile résiduelle: {restants} valeurs au lieu d’une")]
    Residuel { restants: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ErreurEval {
    #[error("indéfini: {0}")]
    Domaine(#[from] ErreurDomaine),

    #[error("programme invalide: {0}")]
    Pile(#[from] ErreurPile),
}

impl ErreurEval {
    pub fn est_domaine(&self) -> bool {
        matches!(self, ErreurEval::Domaine(_))
    }
}
