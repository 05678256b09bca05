// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    implicant::Implicant,
    pattern::{Pattern, Symbol},
};
use itertools::{Itertools, Position};
use std::fmt;

const ALPHABET: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// How pattern positions map to variable names.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub enum VariableNaming {
    /// The fixed alphabet A through H. Hard capacity of 8 variables; a
    /// wider function is rejected at the solve boundary.
    Alphabetic,
    /// Programmatic names x0, x1, … for functions wider than the alphabet.
    Indexed,
}

impl VariableNaming {
    /// The widest pattern this naming can label, if bounded.
    pub fn capacity(self) -> Option<usize> {
        match self {
            VariableNaming::Alphabetic => Some(ALPHABET.len()),
            VariableNaming::Indexed => None,
        }
    }

    /// The name of the variable at `position` (0 is the most significant
    /// pattern position).
    pub fn symbol(self, position: usize) -> VariableSymbol {
        match self {
            VariableNaming::Alphabetic => {
                assert!(
                    position < ALPHABET.len(),
                    "position {} must be in range 0..{}",
                    position,
                    ALPHABET.len()
                );
                VariableSymbol::Char(ALPHABET[position])
            }
            VariableNaming::Indexed => VariableSymbol::String(format!("x{}", position)),
        }
    }
}

impl Default for VariableNaming {
    fn default() -> Self {
        Self::Alphabetic
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VariableSymbol {
    Char(char),
    String(String),
}

impl fmt::Display for VariableSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VariableSymbol::Char(ch) => write!(f, "{}", *ch),
            VariableSymbol::String(s) => write!(f, "{}", s),
        }
    }
}

impl Pattern {
    /// Displays this pattern as a product term: the plain variable for a 1,
    /// the complemented variable for a 0, nothing for a dash.
    #[inline]
    pub fn product_display(self, naming: VariableNaming) -> ProductTermDisplay {
        ProductTermDisplay {
            pattern: self,
            naming,
        }
    }
}

pub struct ProductTermDisplay {
    pattern: Pattern,
    naming: VariableNaming,
}

impl fmt::Display for ProductTermDisplay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // A term with no literal is the constant true.
        if self.pattern.is_all_dashes() {
            return write!(f, "1");
        }
        for position in 0..self.pattern.width() {
            match self.pattern.symbol_at(position) {
                Symbol::One => write!(f, "{}", self.naming.symbol(position))?,
                Symbol::Zero => write!(f, "{}'", self.naming.symbol(position))?,
                Symbol::Dash => {}
            }
        }
        Ok(())
    }
}

/// Displays implicants as a sum of products, OR-joined with ` + ` in the
/// given order.
pub struct ExpressionDisplay<'a> {
    terms: &'a [Implicant],
    naming: VariableNaming,
}

impl<'a> ExpressionDisplay<'a> {
    pub fn new(terms: &'a [Implicant], naming: VariableNaming) -> Self {
        Self { terms, naming }
    }
}

impl<'a> fmt::Display for ExpressionDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for term in self.terms.iter().with_position() {
            match term {
                Position::First(term) | Position::Middle(term) => {
                    write!(f, "{} + ", term.pattern().product_display(self.naming))?;
                }
                Position::Last(term) | Position::Only(term) => {
                    write!(f, "{}", term.pattern().product_display(self.naming))?;
                }
            }
        }
        Ok(())
    }
}
