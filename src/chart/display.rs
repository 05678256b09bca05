// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::chart::CoverageChart;
use itertools::Itertools;
use std::{borrow::Cow, fmt};

/// Renders a coverage chart as a mark matrix: one column per minterm, one
/// row per prime implicant.
#[derive(Clone, Debug)]
pub struct ChartMatrixDisplay<'a> {
    chart: &'a CoverageChart,
    label_format: ChartLabelFormat,
    covered_mark: char,
    empty_mark: char,
    column_separator: Cow<'a, str>,
}

impl<'a> ChartMatrixDisplay<'a> {
    pub fn new(chart: &'a CoverageChart) -> Self {
        Self {
            chart,
            label_format: ChartLabelFormat::default(),
            covered_mark: 'x',
            empty_mark: '.',
            column_separator: Cow::Borrowed(" "),
        }
    }

    pub fn with_label_format(mut self, label_format: ChartLabelFormat) -> Self {
        self.label_format = label_format;
        self
    }

    pub fn with_marks(mut self, covered: char, empty: char) -> Self {
        self.covered_mark = covered;
        self.empty_mark = empty;
        self
    }

    pub fn with_column_separator(mut self, separator: impl Into<Cow<'a, str>>) -> Self {
        self.column_separator = separator.into();
        self
    }
}

impl<'a> fmt::Display for ChartMatrixDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let incidence = self.chart.incidence();
        let labels: Vec<String> = self
            .chart
            .implicants()
            .iter()
            .map(|implicant| match self.label_format {
                ChartLabelFormat::Ternary => implicant.to_string(),
                ChartLabelFormat::Differences => format!(
                    "{} ({})",
                    implicant.pattern().differences_display(),
                    implicant.covers().iter().join(", ")
                ),
            })
            .collect();
        let label_width = labels.iter().map(|label| label.chars().count()).max().unwrap_or(0);
        let column_widths: Vec<usize> = incidence
            .columns()
            .iter()
            .map(|minterm| minterm.to_string().chars().count())
            .collect();

        write!(f, "{:label_width$}", "", label_width = label_width)?;
        for (&minterm, &column_width) in incidence.columns().iter().zip(&column_widths) {
            write!(
                f,
                "{}{:>column_width$}",
                self.column_separator,
                minterm,
                column_width = column_width
            )?;
        }
        writeln!(f)?;

        for (row, label) in incidence.rows().iter().zip(&labels) {
            write!(f, "{:<label_width$}", label, label_width = label_width)?;
            for (column, &column_width) in (0..incidence.columns().len()).zip(&column_widths) {
                let mark = if row.is_marked(column) {
                    self.covered_mark
                } else {
                    self.empty_mark
                };
                write!(
                    f,
                    "{}{:>column_width$}",
                    self.column_separator,
                    mark,
                    column_width = column_width
                )?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// How implicant rows are labeled.
#[derive(Copy, Clone, Debug)]
pub enum ChartLabelFormat {
    /// The ternary pattern plus its covered decimals, e.g. `-01 (1, 5)`.
    Ternary,
    /// The dash positions as powers of two, the way merged terms are
    /// usually labeled in a chart, e.g. `4 (1, 5)`.
    Differences,
}

impl Default for ChartLabelFormat {
    fn default() -> Self {
        Self::Ternary
    }
}
