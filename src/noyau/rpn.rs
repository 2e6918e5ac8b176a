// src/noyau/rpn.rs
//
// Shunting-yard -> programme postfixé
// Objectif:
// - Convertir une suite de Tok en instructions RPN, en une passe, sans récursion
// - Puis vérifier la structure (chaque opérateur a ses opérandes, une seule valeur à la fin)
//
// Règles:
// - Multiplication implicite : "2x", "x(2)", "(2)(3)", "2sin(x)" => '*' injecté
// - Moins unaire:
//    - si '-' est le premier jeton, ou suit un opérateur ou '(' => Neg (préfixe)
//    - Neg se lie plus fort que tout, sauf '^' à sa droite : "-x^2" = -(x^2), "2^-2" = 2^(-2)
//
// NOTE:
// - Les fonctions sont empilées comme des opérateurs “collés” à leur argument
//   et sortent après la parenthèse fermante.

use std::str::FromStr;

use log::debug;

use super::erreurs::ErreurSyntaxe;
use super::jetons::Tok;
use super::programme::{Fonction, Instr, OpBinaire, Programme};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Op {
    Binaire(OpBinaire),
    Neg,
}

/// Contenu de la pile d’opérateurs.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Empile {
    LPar,
    Fonction(Fonction),
    Op(Op),
}

fn precedence(op: Op) -> u8 {
    match op {
        Op::Binaire(OpBinaire::Add | OpBinaire::Sub) => 1,
        Op::Binaire(OpBinaire::Mul | OpBinaire::Div) => 2,
        Op::Binaire(OpBinaire::Pow) => 3,
        Op::Neg => 4,
    }
}

fn is_right_associative(op: Op) -> bool {
    matches!(op, Op::Binaire(OpBinaire::Pow) | Op::Neg)
}

fn vers_instr(op: Op) -> Instr {
    match op {
        Op::Binaire(b) => Instr::Binaire(b),
        Op::Neg => Instr::Neg,
    }
}

/// Le moins est unaire en tête, après un opérateur (hors ')') ou après '('.
fn moins_est_unaire(prev: Option<&Tok>) -> bool {
    match prev {
        None => true,
        Some(t) => matches!(
            t,
            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret | Tok::LPar
        ),
    }
}

/// Dépile selon précédence/associativité, puis empile l’opérateur binaire entrant.
fn pousser_binaire(op: OpBinaire, ops: &mut Vec<Empile>, out: &mut Vec<Instr>) {
    let entrant = Op::Binaire(op);
    let p_tok = precedence(entrant);

    while let Some(Empile::Op(top)) = ops.last().copied() {
        // '^' à droite d’un Neg reste son opérande : -x^2 = -(x^2)
        if top == Op::Neg && op == OpBinaire::Pow {
            break;
        }

        let p_top = precedence(top);
        let doit_pop = if is_right_associative(entrant) {
            p_top > p_tok
        } else {
            p_top >= p_tok
        };

        if !doit_pop {
            break;
        }
        ops.pop();
        out.push(vers_instr(top));
    }

    ops.push(Empile::Op(entrant));
}

fn binaire_de(t: &Tok) -> Option<OpBinaire> {
    match t {
        Tok::Plus => Some(OpBinaire::Add),
        Tok::Minus => Some(OpBinaire::Sub),
        Tok::Star => Some(OpBinaire::Mul),
        Tok::Slash => Some(OpBinaire::Div),
        Tok::Caret => Some(OpBinaire::Pow),
        _ => None,
    }
}

/// Convertit une suite de jetons en programme RPN validé.
///
/// Exemple:
///   tokens: [Fonction("sin"), LPar, Num(2), X, RPar]
///   rpn:    [Const(2), X, Mul, Appel(Sin)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Programme, ErreurSyntaxe> {
    if tokens.is_empty() {
        return Err(ErreurSyntaxe::Vide);
    }

    let mut out: Vec<Instr> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Empile> = Vec::new();
    let mut prev: Option<&Tok> = None;

    for tok in tokens {
        // une fonction doit être immédiatement suivie de '('
        if let Some(Tok::Fonction(nom)) = prev {
            if *tok != Tok::LPar {
                return Err(ErreurSyntaxe::FonctionSansParenthese { nom: nom.clone() });
            }
        }

        // multiplication implicite
        if tok.commence_operande() && prev.is_some_and(Tok::termine_operande) {
            pousser_binaire(OpBinaire::Mul, &mut ops, &mut out);
        }

        match tok {
            Tok::Num(v) => out.push(Instr::Const(*v)),
            Tok::X => out.push(Instr::X),

            Tok::Fonction(nom) => {
                let f = Fonction::from_str(nom)
                    .map_err(|_| ErreurSyntaxe::FonctionInconnue { nom: nom.clone() })?;
                ops.push(Empile::Fonction(f));
            }

            Tok::LPar => ops.push(Empile::LPar),

            Tok::RPar => {
                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Empile::LPar) => break,
                        Some(Empile::Op(op)) => out.push(vers_instr(op)),
                        Some(Empile::Fonction(f)) => out.push(Instr::Appel(f)),
                        None => return Err(ErreurSyntaxe::ParentheseNonOuverte),
                    }
                }

                // si une fonction est au sommet, elle prend la valeur du groupe
                if let Some(Empile::Fonction(f)) = ops.last().copied() {
                    ops.pop();
                    out.push(Instr::Appel(f));
                }
            }

            Tok::Minus if moins_est_unaire(prev) => {
                // préfixe : rien à gauche à dépiler
                ops.push(Empile::Op(Op::Neg));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if let Some(op) = binaire_de(tok) {
                    pousser_binaire(op, &mut ops, &mut out);
                }
            }
        }

        prev = Some(tok);
    }

    if let Some(Tok::Fonction(nom)) = prev {
        return Err(ErreurSyntaxe::FonctionSansParenthese { nom: nom.clone() });
    }

    // vide la pile ops
    while let Some(e) = ops.pop() {
        match e {
            Empile::LPar => return Err(ErreurSyntaxe::ParentheseNonFermee),
            Empile::Op(op) => out.push(vers_instr(op)),
            Empile::Fonction(f) => out.push(Instr::Appel(f)),
        }
    }

    verifier(&out)?;

    let prog = Programme::new(out);
    debug!("rpn: {} jetons -> [{prog}]", tokens.len());
    Ok(prog)
}

/// Simule la hauteur de pile : chaque instruction doit trouver ses opérandes,
/// et il doit rester exactement une valeur.
fn verifier(instrs: &[Instr]) -> Result<(), ErreurSyntaxe> {
    let mut hauteur: usize = 0;

    for i in instrs {
        let (consomme, produit) = i.arite();
        if hauteur < consomme {
            return Err(ErreurSyntaxe::OperandeManquant {
                operateur: i.to_string(),
            });
        }
        hauteur = hauteur - consomme + produit;
    }

    match hauteur {
        0 => Err(ErreurSyntaxe::Vide),
        1 => Ok(()),
        n => Err(ErreurSyntaxe::ExpressionIncomplete { restants: n }),
    }
}
