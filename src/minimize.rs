// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    chart::CoverageChart,
    errors::{Error, InputError},
    expression::{ExpressionDisplay, VariableNaming},
    function::BooleanFunction,
    implicant::Implicant,
    primes,
    trace::{Step, Trace},
};
use std::collections::BTreeSet;

/// The result of one minimization: the outputs plus the full step trace.
///
/// Essential selection alone need not cover every minterm; the gap is a
/// result state, not an error. `uncovered_minterms` holds the remainder and
/// [`is_full_cover`](Self::is_full_cover) distinguishes the two outcomes. A
/// consumer needing a complete minimal cover can run a set-covering stage
/// (e.g. Petrick's method) over the coverage rows in `steps`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    pub prime_implicants: Vec<Implicant>,
    pub essential_implicants: Vec<Implicant>,
    pub covered_minterms: BTreeSet<u64>,
    pub uncovered_minterms: BTreeSet<u64>,
    pub expression: String,
    pub steps: Vec<Step>,
}

impl Solution {
    #[inline]
    pub fn is_full_cover(&self) -> bool {
        self.uncovered_minterms.is_empty()
    }
}

impl BooleanFunction {
    /// Minimizes this function with the default A…H variable naming.
    ///
    /// ```
    /// use qm_min::function::BooleanFunction;
    ///
    /// let function = BooleanFunction::new(vec![1, 2, 3], vec![0]);
    /// let solution = function.minimize().unwrap();
    /// assert_eq!(solution.expression, "1");
    /// ```
    pub fn minimize(&self) -> Result<Solution, Error> {
        self.minimize_with(VariableNaming::default())
    }

    /// Minimizes this function. Validation happens here, before any
    /// combination work: an empty minterm set and a width beyond the naming
    /// capacity are both input errors with no partial output.
    pub fn minimize_with(&self, naming: VariableNaming) -> Result<Solution, Error> {
        if self.minterms().is_empty() {
            return Err(InputError::EmptyMinterms.into());
        }
        let width = self.width();
        if let Some(capacity) = naming.capacity() {
            if width > capacity {
                return Err(InputError::UnsupportedWidth { width, capacity }.into());
            }
        }

        let mut trace = Trace::new();
        let primes = primes::prime_implicants(self, &mut trace)?;

        let chart = CoverageChart::build(self.minterms(), &primes)?;
        trace.record(Step::Coverage {
            rows: chart.coverage_rows(),
            incidence: chart.incidence_entries(),
        });

        let essentials = chart.select_essentials();
        trace.record(Step::Essentials {
            implicants: essentials.implicants.clone(),
            covered_minterms: essentials.covered_minterms.clone(),
        });

        let expression = ExpressionDisplay::new(&essentials.implicants, naming).to_string();
        trace.record(Step::Expression {
            expression: expression.clone(),
        });

        let uncovered_minterms = self
            .minterms()
            .difference(&essentials.covered_minterms)
            .copied()
            .collect();
        Ok(Solution {
            prime_implicants: primes.into_iter().collect(),
            essential_implicants: essentials.implicants,
            covered_minterms: essentials.covered_minterms,
            uncovered_minterms,
            expression,
            steps: trace.into_steps(),
        })
    }
}
