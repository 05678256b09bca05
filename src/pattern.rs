// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::{ConsistencyError, ParsePatternError};
use arrayvec::ArrayVec;
use std::{fmt, str::FromStr};

/// Structural cap on pattern width: one bit per mask position.
///
/// This is the word size of the underlying masks, not the variable-naming
/// ceiling — see [`VariableNaming`](crate::expression::VariableNaming) for
/// that.
pub const MAX_WIDTH: usize = 64;

/// A fixed-width ternary pattern over {0, 1, -}.
///
/// Stored as two equal-width bitmasks: `bits` holds the 1 positions and
/// `dashes` the don't-care positions, so merge candidacy is a pair of mask
/// compares plus a popcount instead of a character scan. The two masks are
/// disjoint; position 0 of the string form is the most significant bit.
///
/// ```
/// use qm_min::pattern::Pattern;
///
/// let five = Pattern::encode(5, 4).unwrap();
/// assert_eq!(five.to_string(), "0101");
/// assert_eq!(five.popcount(), 2);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern {
    width: u8,
    bits: u64,
    dashes: u64,
}

impl Pattern {
    /// Encodes `value` as a width-bit binary pattern, zero-padded on the
    /// left. Fails if `value` needs more than `width` bits; the solve
    /// pipeline computes the width from the largest input, so that failure
    /// surfaces as a consistency error.
    pub fn encode(value: u64, width: usize) -> Result<Self, ConsistencyError> {
        assert!(
            width >= 1 && width <= MAX_WIDTH,
            "width {} must be in range 1..={}",
            width,
            MAX_WIDTH
        );
        if width < MAX_WIDTH && value >> width != 0 {
            return Err(ConsistencyError::ValueOutOfRange { value, width });
        }
        Ok(Pattern {
            width: width as u8,
            bits: value,
            dashes: 0,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// Count of 1 positions; dashes are excluded.
    #[inline]
    pub fn popcount(&self) -> u32 {
        self.bits.count_ones()
    }

    #[inline]
    pub fn dash_count(&self) -> u32 {
        self.dashes.count_ones()
    }

    #[inline]
    pub fn is_all_dashes(&self) -> bool {
        self.dashes == self.width_mask()
    }

    /// The decimal this pattern encodes, if it has no dashes.
    #[inline]
    pub fn value(&self) -> Option<u64> {
        if self.dashes == 0 {
            Some(self.bits)
        } else {
            None
        }
    }

    /// True if `value` matches this pattern at every non-dash position.
    pub fn covers(&self, value: u64) -> bool {
        if self.width() < MAX_WIDTH && value >> self.width != 0 {
            return false;
        }
        let care = self.width_mask() & !self.dashes;
        (value ^ self.bits) & care == 0
    }

    /// Merges two patterns that differ in exactly one position.
    ///
    /// The patterns must have the same width and identical dash masks: a
    /// dash never counts as the differing position and never merges with a
    /// non-dash. The differing position becomes a dash in the result.
    pub fn merge(&self, other: &Pattern) -> Option<Pattern> {
        if self.width != other.width || self.dashes != other.dashes {
            return None;
        }
        let diff = self.bits ^ other.bits;
        if diff.count_ones() != 1 {
            return None;
        }
        Some(Pattern {
            width: self.width,
            bits: self.bits & !diff,
            dashes: self.dashes | diff,
        })
    }

    /// The symbol at `position`, counted from the most significant end
    /// (position 0 is the leftmost symbol of the string form).
    pub fn symbol_at(&self, position: usize) -> Symbol {
        assert!(
            position < self.width(),
            "position {} must be in range 0..{}",
            position,
            self.width()
        );
        let bit = 1u64 << (self.width() - 1 - position);
        if self.dashes & bit != 0 {
            Symbol::Dash
        } else if self.bits & bit != 0 {
            Symbol::One
        } else {
            Symbol::Zero
        }
    }

    /// All symbols, most significant first.
    pub fn symbols(&self) -> ArrayVec<Symbol, { MAX_WIDTH }> {
        (0..self.width()).map(|position| self.symbol_at(position)).collect()
    }

    /// The powers of two of the dash positions, most significant first.
    ///
    /// A dash at bit position `i` means the pattern covers decimals `2^i`
    /// apart, so the coverage chart labels a merged pattern by these
    /// differences.
    pub fn dash_differences(&self) -> ArrayVec<u64, { MAX_WIDTH }> {
        (0..self.width())
            .rev()
            .filter(|&bit| self.dashes & (1u64 << bit) != 0)
            .map(|bit| 1u64 << bit)
            .collect()
    }

    /// Displays the dash differences comma-joined, or the plain pattern when
    /// there is no dash.
    #[inline]
    pub fn differences_display(&self) -> PatternDifferencesDisplay<'_> {
        PatternDifferencesDisplay { pattern: self }
    }

    #[inline]
    fn width_mask(&self) -> u64 {
        if self.width() == MAX_WIDTH {
            u64::MAX
        } else {
            (1u64 << self.width) - 1
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for symbol in self.symbols() {
            write!(f, "{}", symbol.as_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pattern({})", self)
    }
}

impl FromStr for Pattern {
    type Err = ParsePatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParsePatternError {
            input: s.to_owned(),
        };
        let width = s.chars().count();
        if width == 0 || width > MAX_WIDTH {
            return Err(error());
        }
        let mut bits = 0u64;
        let mut dashes = 0u64;
        for (position, ch) in s.chars().enumerate() {
            let bit = 1u64 << (width - 1 - position);
            match ch {
                '0' => {}
                '1' => bits |= bit,
                '-' => dashes |= bit,
                _ => return Err(error()),
            }
        }
        Ok(Pattern {
            width: width as u8,
            bits,
            dashes,
        })
    }
}

/// One position of a ternary pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    Zero,
    One,
    Dash,
}

impl Symbol {
    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Symbol::Zero => '0',
            Symbol::One => '1',
            Symbol::Dash => '-',
        }
    }
}

pub struct PatternDifferencesDisplay<'a> {
    pattern: &'a Pattern,
}

impl<'a> fmt::Display for PatternDifferencesDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.pattern.dash_count() == 0 {
            return write!(f, "{}", self.pattern);
        }
        let differences = self.pattern.dash_differences();
        for (ix, difference) in differences.iter().enumerate() {
            if ix > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", difference)?;
        }
        Ok(())
    }
}
