// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{errors::ConsistencyError, pattern::Pattern};
use itertools::Itertools;
use std::{cmp::Ordering, collections::BTreeSet, fmt};

/// A pattern together with the set of input decimals it subsumes.
///
/// Leaf implicants encode a single input decimal; merged implicants carry
/// the union of their parents' covered decimals, which may include
/// don't-cares.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct Implicant {
    pattern: Pattern,
    covers: BTreeSet<u64>,
}

impl Implicant {
    #[inline]
    pub fn new(pattern: Pattern, covers: BTreeSet<u64>) -> Self {
        Self { pattern, covers }
    }

    /// The leaf implicant for a single input decimal.
    pub fn from_value(value: u64, width: usize) -> Result<Self, ConsistencyError> {
        let pattern = Pattern::encode(value, width)?;
        let mut covers = BTreeSet::new();
        covers.insert(value);
        Ok(Self { pattern, covers })
    }

    #[inline]
    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    #[inline]
    pub fn covers(&self) -> &BTreeSet<u64> {
        &self.covers
    }

    #[inline]
    pub fn popcount(&self) -> u32 {
        self.pattern.popcount()
    }

    #[inline]
    pub fn contains(&self, value: u64) -> bool {
        self.covers.contains(&value)
    }

    /// Combines two implicants whose patterns differ in exactly one
    /// position (identical dash masks, see [`Pattern::merge`]). The result
    /// covers the union of both covered sets. Pure: no effect beyond the
    /// return value.
    pub fn combine(&self, other: &Implicant) -> Option<Implicant> {
        let pattern = self.pattern.merge(&other.pattern)?;
        let covers = self.covers.union(&other.covers).copied().collect();
        Some(Implicant { pattern, covers })
    }

    /// The subset of `minterms` this implicant covers.
    pub fn covered_minterms(&self, minterms: &BTreeSet<u64>) -> BTreeSet<u64> {
        self.covers.intersection(minterms).copied().collect()
    }

    /// True if the covered set intersects `minterms`. Implicants covering
    /// only don't-cares exist to enable merges and are dropped from every
    /// output.
    pub fn covers_any(&self, minterms: &BTreeSet<u64>) -> bool {
        self.covers.iter().any(|value| minterms.contains(value))
    }
}

// Implicants order by covered set first so that groups, prime sets, and
// traces list terms in ascending minterm order.
impl Ord for Implicant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.covers
            .cmp(&other.covers)
            .then_with(|| self.pattern.cmp(&other.pattern))
    }
}

impl PartialOrd for Implicant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Implicant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.pattern, self.covers.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn implicant(pattern: &str, covers: &[u64]) -> Implicant {
        Implicant::new(pattern.parse().unwrap(), covers.iter().copied().collect())
    }

    #[test]
    fn test_from_value() {
        let leaf = Implicant::from_value(5, 4).unwrap();
        assert_eq!(leaf.pattern().to_string(), "0101");
        assert_eq!(leaf.covers().iter().copied().collect::<Vec<_>>(), vec![5]);
        assert_eq!(leaf.popcount(), 2);
    }

    #[test]
    fn test_combine_unions_covers() {
        let a = implicant("0101", &[5]);
        let b = implicant("0111", &[7]);
        let merged = a.combine(&b).unwrap();
        assert_eq!(merged.pattern().to_string(), "01-1");
        assert_eq!(
            merged.covers().iter().copied().collect::<Vec<_>>(),
            vec![5, 7]
        );
    }

    #[test]
    fn test_combine_rejects_dash_mismatch() {
        let a = implicant("01-1", &[5, 7]);
        let b = implicant("0111", &[7]);
        assert_eq!(a.combine(&b), None);

        let c = implicant("0-11", &[3, 7]);
        assert_eq!(a.combine(&c), None, "differing dash positions never merge");
    }

    #[test]
    fn test_minterm_intersection() {
        let minterms: BTreeSet<u64> = [1, 2, 3].iter().copied().collect();
        let merged = implicant("0--", &[0, 1, 2, 3]);
        assert!(merged.covers_any(&minterms));
        assert_eq!(
            merged.covered_minterms(&minterms).iter().copied().collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        let dc_only = implicant("00-", &[0]);
        assert!(!dc_only.covers_any(&minterms));
    }

    #[test]
    fn test_duplicate_pattern_distinct_covers_retained() {
        // Identity is (covered set, pattern): the same pattern paired with
        // two different covered sets stays two distinct entries rather than
        // being merged. Set-semantics inputs never produce this during a
        // solve, but the retention behavior is pinned here.
        let a = implicant("01-1", &[5, 7]);
        let b = implicant("01-1", &[5]);
        let set: BTreeSet<Implicant> = vec![a.clone(), b.clone(), a.clone()].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&a) && set.contains(&b));
    }

    #[test]
    fn test_display() {
        assert_eq!(implicant("01-1", &[5, 7]).to_string(), "01-1 (5, 7)");
    }
}
