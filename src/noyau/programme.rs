// src/noyau/programme.rs
//
// Programme postfixé (RPN) : suite linéaire d’instructions, sans structure imbriquée.
// Produit une seule fois par `compiler`, puis partagé en lecture seule par l’échantillonneur.

use std::fmt;

use strum::{Display, EnumIter, EnumString};

/// Fonctions reconnues (vocabulaire fermé).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Sqrt,
    /// Logarithme décimal.
    Log,
    /// Logarithme naturel.
    Ln,
    Abs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl OpBinaire {
    pub fn symbole(self) -> char {
        match self {
            OpBinaire::Add => '+',
            OpBinaire::Sub => '-',
            OpBinaire::Mul => '*',
            OpBinaire::Div => '/',
            OpBinaire::Pow => '^',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Instr {
    Const(f64),
    X,
    Binaire(OpBinaire),
    /// Moins unaire (distinct du moins binaire).
    Neg,
    Appel(Fonction),
}

impl Instr {
    /// Effet net sur la hauteur de pile : (valeurs consommées, valeurs produites).
    pub fn arite(&self) -> (usize, usize) {
        match self {
            Instr::Const(_) | Instr::X => (0, 1),
            Instr::Binaire(_) => (2, 1),
            Instr::Neg | Instr::Appel(_) => (1, 1),
        }
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Const(v) => write!(f, "{v}"),
            Instr::X => f.write_str("x"),
            Instr::Binaire(op) => write!(f, "{}", op.symbole()),
            Instr::Neg => f.write_str("neg"),
            Instr::Appel(fun) => write!(f, "{fun}"),
        }
    }
}

/// Programme compilé. Immuable une fois construit.
#[derive(Clone, Debug, PartialEq)]
pub struct Programme {
    instrs: Vec<Instr>,
}

impl Programme {
    pub(crate) fn new(instrs: Vec<Instr>) -> Self {
        Self { instrs }
    }

    pub fn instrs(&self) -> &[Instr] {
        &self.instrs
    }

    /// Vrai si le programme lit x (sinon la courbe est une constante).
    pub fn depend_de_x(&self) -> bool {
        self.instrs.iter().any(|i| matches!(i, Instr::X))
    }
}

impl fmt::Display for Programme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, i) in self.instrs.iter().enumerate() {
            if k > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{i}")?;
        }
        Ok(())
    }
}
