// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::InputError;
use std::collections::BTreeSet;

/// A single-output Boolean function given as the decimals of its on-set
/// plus optional don't-cares.
///
/// Both collections have set semantics: duplicates collapse. A value listed
/// in both collections behaves as an ordinary minterm — every inclusion test
/// downstream is against the minterm set, so the don't-care listing of an
/// overlapping value is inert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BooleanFunction {
    minterms: BTreeSet<u64>,
    dont_cares: BTreeSet<u64>,
}

impl BooleanFunction {
    pub fn new(
        minterms: impl IntoIterator<Item = u64>,
        dont_cares: impl IntoIterator<Item = u64>,
    ) -> Self {
        Self {
            minterms: minterms.into_iter().collect(),
            dont_cares: dont_cares.into_iter().collect(),
        }
    }

    /// Parses comma-separated decimal lists, e.g. `"0, 1, 2,5"` and `"3,4"`.
    /// Whitespace around tokens is ignored and empty segments are skipped;
    /// anything else that fails to parse as a non-negative integer is an
    /// [`InputError::InvalidToken`].
    pub fn parse(minterms: &str, dont_cares: &str) -> Result<Self, InputError> {
        Ok(Self {
            minterms: parse_term_list(minterms)?,
            dont_cares: parse_term_list(dont_cares)?,
        })
    }

    #[inline]
    pub fn minterms(&self) -> &BTreeSet<u64> {
        &self.minterms
    }

    #[inline]
    pub fn dont_cares(&self) -> &BTreeSet<u64> {
        &self.dont_cares
    }

    /// Minterms and don't-cares together, the decimals the combination
    /// rounds start from.
    pub fn all_terms(&self) -> BTreeSet<u64> {
        self.minterms.union(&self.dont_cares).copied().collect()
    }

    /// The pattern width: bits needed for the largest input, with a floor
    /// of 1 so the zero-only function still gets a one-variable pattern.
    pub fn width(&self) -> usize {
        let max = self
            .minterms
            .iter()
            .chain(&self.dont_cares)
            .max()
            .copied()
            .unwrap_or(0);
        if max == 0 {
            1
        } else {
            (64 - max.leading_zeros()) as usize
        }
    }
}

/// Parses one comma-separated list of non-negative decimals.
pub fn parse_term_list(input: &str) -> Result<BTreeSet<u64>, InputError> {
    let mut terms = BTreeSet::new();
    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let value = token.parse::<u64>().map_err(|_| InputError::InvalidToken {
            token: token.to_owned(),
        })?;
        terms.insert(value);
    }
    Ok(terms)
}
