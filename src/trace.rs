// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{implicant::Implicant, pattern::Pattern};
use std::collections::{BTreeMap, BTreeSet};

/// The ordered record of one solve, one [`Step`] per phase.
///
/// Purely observational: the recorder never feeds data back into the
/// algorithm, and every record carries clones of the exact state the solve
/// used, so a renderer can reconstruct each phase without re-running
/// anything. Append-only; the sequence is final once the solve returns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    steps: Vec<Step>,
}

impl Trace {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record(&mut self, step: Step) {
        self.steps.push(step);
    }

    #[inline]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[inline]
    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

/// One phase of the solve, tagged by kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    /// The initial popcount grouping of the input decimals.
    Grouping { groups: Vec<PopcountGroup> },
    /// One successful combination round: the merged terms regrouped by
    /// popcount, plus the patterns consumed by a merge this round.
    Combination {
        round: usize,
        groups: Vec<PopcountGroup>,
        used: BTreeSet<Pattern>,
    },
    /// The coverage chart: per-minterm rows and the implicant-indexed
    /// incidence view.
    Coverage {
        rows: Vec<CoverageRow>,
        incidence: Vec<IncidenceEntry>,
    },
    /// The essential prime implicants and the minterms they cover.
    Essentials {
        implicants: Vec<Implicant>,
        covered_minterms: BTreeSet<u64>,
    },
    /// The final sum-of-products expression.
    Expression { expression: String },
}

/// One popcount bucket of a grouping snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct PopcountGroup {
    pub popcount: u32,
    pub terms: Vec<Implicant>,
}

/// One minterm's row of the coverage chart.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageRow {
    pub minterm: u64,
    pub covered_by: Vec<Implicant>,
}

/// One prime implicant's view of the chart: everything it covers, and the
/// subset of that which is a minterm.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct IncidenceEntry {
    pub implicant: Implicant,
    pub covered_minterms: BTreeSet<u64>,
}

pub(crate) fn snapshot_groups(groups: &BTreeMap<u32, Vec<Implicant>>) -> Vec<PopcountGroup> {
    groups
        .iter()
        .map(|(&popcount, terms)| PopcountGroup {
            popcount,
            terms: terms.clone(),
        })
        .collect()
}
