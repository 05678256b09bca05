// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    chart::ChartMatrixDisplay,
    errors::ConsistencyError,
    implicant::Implicant,
    trace::{CoverageRow, IncidenceEntry},
};
use bitvec::vec::BitVec;
use once_cell::sync::OnceCell;
use std::collections::{BTreeMap, BTreeSet};

/// The prime-implicant coverage chart for one set of minterms.
///
/// Built once after the combination fixed point and read-only afterward:
/// one row per minterm listing the prime implicants that cover it, plus an
/// implicant-indexed incidence view for rendering.
#[derive(Clone, Debug)]
pub struct CoverageChart {
    minterms: BTreeSet<u64>,
    implicants: Vec<Implicant>,
    rows: BTreeMap<u64, Vec<usize>>,
    cache: ChartCache,
}

/// Cache for chart data derived from the rows.
#[derive(Clone, Debug, Default)]
struct ChartCache {
    incidence: OnceCell<IncidenceMatrix>,
}

impl CoverageChart {
    /// Builds the chart. Coverage is by covered-set membership, so a
    /// don't-care decimal never gets a row. Every prime-implicant set
    /// produced by the combination rounds covers every minterm; an empty
    /// row therefore signals a defect upstream and is surfaced as a
    /// consistency error rather than ignored.
    pub fn build(
        minterms: &BTreeSet<u64>,
        primes: &BTreeSet<Implicant>,
    ) -> Result<Self, ConsistencyError> {
        let implicants: Vec<Implicant> = primes.iter().cloned().collect();
        let mut rows = BTreeMap::new();
        for &minterm in minterms {
            let covering: Vec<usize> = implicants
                .iter()
                .enumerate()
                .filter(|(_, implicant)| implicant.contains(minterm))
                .map(|(ix, _)| ix)
                .collect();
            if covering.is_empty() {
                return Err(ConsistencyError::UncoveredMinterm { minterm });
            }
            rows.insert(minterm, covering);
        }
        Ok(Self {
            minterms: minterms.clone(),
            implicants,
            rows,
            cache: ChartCache::default(),
        })
    }

    #[inline]
    pub fn minterms(&self) -> &BTreeSet<u64> {
        &self.minterms
    }

    /// The prime implicants, in the chart's canonical row order.
    #[inline]
    pub fn implicants(&self) -> &[Implicant] {
        &self.implicants
    }

    /// Rows keyed by minterm; values index into [`implicants`](Self::implicants).
    #[inline]
    pub fn rows(&self) -> &BTreeMap<u64, Vec<usize>> {
        &self.rows
    }

    /// The implicant-indexed incidence view, built on first use.
    pub fn incidence(&self) -> &IncidenceMatrix {
        self.cache.incidence.get_or_init(|| {
            let columns: Vec<u64> = self.minterms.iter().copied().collect();
            let rows = self
                .implicants
                .iter()
                .enumerate()
                .map(|(implicant_ix, implicant)| {
                    let mut marks = BitVec::repeat(false, columns.len());
                    for (col, &minterm) in columns.iter().enumerate() {
                        if implicant.contains(minterm) {
                            marks.set(col, true);
                        }
                    }
                    IncidenceRow {
                        implicant_ix,
                        marks,
                    }
                })
                .collect();
            IncidenceMatrix { columns, rows }
        })
    }

    /// Row snapshots for the step trace.
    pub fn coverage_rows(&self) -> Vec<CoverageRow> {
        self.rows
            .iter()
            .map(|(&minterm, covering)| CoverageRow {
                minterm,
                covered_by: covering
                    .iter()
                    .map(|&ix| self.implicants[ix].clone())
                    .collect(),
            })
            .collect()
    }

    /// Implicant-indexed snapshots for the step trace.
    pub fn incidence_entries(&self) -> Vec<IncidenceEntry> {
        self.implicants
            .iter()
            .map(|implicant| IncidenceEntry {
                implicant: implicant.clone(),
                covered_minterms: implicant.covered_minterms(&self.minterms),
            })
            .collect()
    }

    /// Selects the essential prime implicants: a minterm with exactly one
    /// covering implicant makes that implicant essential. Minterms are
    /// visited in ascending order and an implicant essential for several
    /// minterms is kept once, at its first position. The covered set of the
    /// selection counts minterms only — a don't-care subsumed by an
    /// essential implicant is never reported as covered output.
    pub fn select_essentials(&self) -> Essentials {
        let mut selected: Vec<usize> = Vec::new();
        for covering in self.rows.values() {
            if let [only] = covering.as_slice() {
                if !selected.contains(only) {
                    selected.push(*only);
                }
            }
        }

        let implicants: Vec<Implicant> = selected
            .iter()
            .map(|&ix| self.implicants[ix].clone())
            .collect();
        let covered_minterms = implicants
            .iter()
            .flat_map(|implicant| implicant.covered_minterms(&self.minterms))
            .collect();
        Essentials {
            implicants,
            covered_minterms,
        }
    }

    #[inline]
    pub fn matrix_display(&self) -> ChartMatrixDisplay<'_> {
        ChartMatrixDisplay::new(self)
    }
}

/// The incidence view: one mark row per prime implicant over the ascending
/// minterm columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncidenceMatrix {
    columns: Vec<u64>,
    rows: Vec<IncidenceRow>,
}

impl IncidenceMatrix {
    #[inline]
    pub fn columns(&self) -> &[u64] {
        &self.columns
    }

    #[inline]
    pub fn rows(&self) -> &[IncidenceRow] {
        &self.rows
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncidenceRow {
    implicant_ix: usize,
    marks: BitVec,
}

impl IncidenceRow {
    #[inline]
    pub fn implicant_ix(&self) -> usize {
        self.implicant_ix
    }

    /// True if this implicant covers the minterm at `column`.
    #[inline]
    pub fn is_marked(&self, column: usize) -> bool {
        self.marks[column]
    }
}

/// The result of essential selection. `covered_minterms` may be a strict
/// subset of the chart's minterms; the remainder needs a separate
/// set-covering stage, which is outside this crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Essentials {
    pub implicants: Vec<Implicant>,
    pub covered_minterms: BTreeSet<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn implicant(pattern: &str, covers: &[u64]) -> Implicant {
        Implicant::new(pattern.parse().unwrap(), covers.iter().copied().collect())
    }

    fn minterm_set(values: &[u64]) -> BTreeSet<u64> {
        values.iter().copied().collect()
    }

    fn prime_set(implicants: &[Implicant]) -> BTreeSet<Implicant> {
        implicants.iter().cloned().collect()
    }

    #[test]
    fn test_build_rows() {
        let minterms = minterm_set(&[0, 1, 5]);
        let primes = prime_set(&[
            implicant("00-", &[0, 1]),
            implicant("-01", &[1, 5]),
        ]);
        let chart = CoverageChart::build(&minterms, &primes).unwrap();

        assert_eq!(chart.rows().len(), 3);
        assert_eq!(chart.rows()[&0], vec![0]);
        assert_eq!(chart.rows()[&1], vec![0, 1]);
        assert_eq!(chart.rows()[&5], vec![1]);
    }

    #[test]
    fn test_build_skips_dont_cares() {
        // 4 is covered by a prime but is not a minterm: no row for it.
        let minterms = minterm_set(&[0]);
        let primes = prime_set(&[implicant("-00", &[0, 4])]);
        let chart = CoverageChart::build(&minterms, &primes).unwrap();
        assert_eq!(chart.rows().keys().copied().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_build_surfaces_uncovered_minterm() {
        let minterms = minterm_set(&[0, 7]);
        let primes = prime_set(&[implicant("00-", &[0, 1])]);
        assert_eq!(
            CoverageChart::build(&minterms, &primes).unwrap_err(),
            ConsistencyError::UncoveredMinterm { minterm: 7 },
        );
    }

    #[test]
    fn test_incidence_marks() {
        let minterms = minterm_set(&[0, 1, 5]);
        let primes = prime_set(&[
            implicant("00-", &[0, 1]),
            implicant("-01", &[1, 5]),
        ]);
        let chart = CoverageChart::build(&minterms, &primes).unwrap();
        let incidence = chart.incidence();

        assert_eq!(incidence.columns(), &[0, 1, 5]);
        assert_eq!(incidence.rows().len(), 2);
        let first = &incidence.rows()[0];
        assert_eq!(first.implicant_ix(), 0);
        assert!(first.is_marked(0) && first.is_marked(1) && !first.is_marked(2));
        let second = &incidence.rows()[1];
        assert!(!second.is_marked(0) && second.is_marked(1) && second.is_marked(2));
    }

    #[test]
    fn test_select_essentials() {
        let minterms = minterm_set(&[0, 1, 5]);
        let primes = prime_set(&[
            implicant("00-", &[0, 1]),
            implicant("-01", &[1, 5]),
        ]);
        let chart = CoverageChart::build(&minterms, &primes).unwrap();
        let essentials = chart.select_essentials();

        // Both implicants are the sole coverer of a minterm.
        assert_eq!(essentials.implicants.len(), 2);
        assert_eq!(essentials.covered_minterms, minterm_set(&[0, 1, 5]));
    }

    #[test]
    fn test_essentials_deduplicate_by_identity() {
        // Sole coverer of both 0 and 2, selected once.
        let minterms = minterm_set(&[0, 2]);
        let primes = prime_set(&[implicant("0-0", &[0, 2])]);
        let chart = CoverageChart::build(&minterms, &primes).unwrap();
        let essentials = chart.select_essentials();
        assert_eq!(essentials.implicants.len(), 1);
    }

    #[test]
    fn test_cyclic_chart_selects_nothing() {
        // Every minterm has two coverers, so nothing is essential.
        let minterms = minterm_set(&[0, 1, 3]);
        let primes = prime_set(&[
            implicant("00-", &[0, 1]),
            implicant("0-1", &[1, 3]),
            implicant("0-0", &[0, 2]),
            implicant("-11", &[3, 7]),
        ]);
        let chart = CoverageChart::build(&minterms, &primes).unwrap();
        let essentials = chart.select_essentials();
        assert!(essentials.implicants.is_empty());
        assert!(essentials.covered_minterms.is_empty());
    }

    #[test]
    fn test_covered_minterms_exclude_dont_cares() {
        // 2 is a don't-care inside the essential implicant's covered set.
        let minterms = minterm_set(&[0]);
        let primes = prime_set(&[implicant("0-0", &[0, 2])]);
        let chart = CoverageChart::build(&minterms, &primes).unwrap();
        let essentials = chart.select_essentials();
        assert_eq!(essentials.covered_minterms, minterm_set(&[0]));
    }
}
