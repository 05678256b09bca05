// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::ConsistencyError,
    function::BooleanFunction,
    implicant::Implicant,
    pattern::Pattern,
    trace::{self, Step, Trace},
};
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};

/// Partitions terms into ascending popcount groups.
///
/// Within a group terms are ordered by ascending covered set, then pattern;
/// the order only affects trace presentation, never correctness.
pub fn group_by_popcount(
    terms: impl IntoIterator<Item = Implicant>,
) -> BTreeMap<u32, Vec<Implicant>> {
    let sorted: BTreeSet<Implicant> = terms.into_iter().collect();
    let mut groups: BTreeMap<u32, Vec<Implicant>> = BTreeMap::new();
    for term in sorted {
        groups.entry(term.popcount()).or_default().push(term);
    }
    groups
}

/// Everything one combination round produces.
struct RoundOutcome {
    /// The merged terms, regrouped by popcount. Empty means the fixed point
    /// is reached.
    merged: BTreeMap<u32, Vec<Implicant>>,
    /// Patterns consumed by at least one successful merge this round.
    used: BTreeSet<Pattern>,
    /// Terms no merge consumed, already filtered to those covering at least
    /// one original minterm.
    frozen: Vec<Implicant>,
}

/// Runs one combination round: every term of group k against every term of
/// group k + 1. A merged pattern arising from several source pairs is
/// deduplicated under one term with the union of their covered sets. Pure;
/// the caller threads the accumulated primes through the loop itself.
fn combine_round(
    groups: &BTreeMap<u32, Vec<Implicant>>,
    minterms: &BTreeSet<u64>,
) -> RoundOutcome {
    let mut merged: BTreeMap<Pattern, BTreeSet<u64>> = BTreeMap::new();
    let mut used: BTreeSet<Pattern> = BTreeSet::new();

    for ((&lower, lower_terms), (&upper, upper_terms)) in groups.iter().tuple_windows() {
        if upper != lower + 1 {
            // A merge changes the popcount by exactly one, so groups across
            // a gap have nothing to combine.
            continue;
        }
        for (a, b) in lower_terms.iter().cartesian_product(upper_terms) {
            if let Some(combined) = a.combine(b) {
                merged
                    .entry(combined.pattern())
                    .or_default()
                    .extend(combined.covers().iter().copied());
                used.insert(a.pattern());
                used.insert(b.pattern());
            }
        }
    }

    let frozen = groups
        .values()
        .flatten()
        .filter(|term| !used.contains(&term.pattern()) && term.covers_any(minterms))
        .cloned()
        .collect();

    let merged = group_by_popcount(
        merged
            .into_iter()
            .map(|(pattern, covers)| Implicant::new(pattern, covers)),
    );
    RoundOutcome {
        merged,
        used,
        frozen,
    }
}

/// Extracts the prime implicants of `function`, recording the initial
/// grouping and every successful combination round on `trace`.
///
/// Each merge adds exactly one dash to the produced pattern and the dash
/// count cannot exceed the width, so the loop runs at most width + 1 rounds.
/// Terms covering only don't-cares are dropped: they exist to enable merges
/// and never appear in the output.
pub fn prime_implicants(
    function: &BooleanFunction,
    trace: &mut Trace,
) -> Result<BTreeSet<Implicant>, ConsistencyError> {
    let width = function.width();
    let leaves = function
        .all_terms()
        .into_iter()
        .map(|value| Implicant::from_value(value, width))
        .collect::<Result<Vec<_>, _>>()?;

    let mut groups = group_by_popcount(leaves);
    trace.record(Step::Grouping {
        groups: trace::snapshot_groups(&groups),
    });

    let mut primes: BTreeSet<Implicant> = BTreeSet::new();
    let mut round = 1;
    loop {
        let outcome = combine_round(&groups, function.minterms());
        primes.extend(outcome.frozen);
        if outcome.merged.is_empty() {
            // Zero merges: the whole residual group froze above.
            break;
        }
        trace.record(Step::Combination {
            round,
            groups: trace::snapshot_groups(&outcome.merged),
            used: outcome.used,
        });
        groups = outcome.merged;
        round += 1;
    }

    Ok(primes)
}
