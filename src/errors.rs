// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::{error, fmt};

/// Any failure reported by [`BooleanFunction::minimize`](crate::function::BooleanFunction::minimize).
///
/// Input errors are detected at the boundary, before any combination work
/// runs. Consistency errors indicate a defect in the combination or
/// extraction logic itself and cannot occur for valid input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    Input(InputError),
    Internal(ConsistencyError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Input(err) => write!(f, "invalid input: {}", err),
            Error::Internal(err) => write!(f, "internal consistency error: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Input(err) => Some(err),
            Error::Internal(err) => Some(err),
        }
    }
}

impl From<InputError> for Error {
    fn from(err: InputError) -> Self {
        Error::Input(err)
    }
}

impl From<ConsistencyError> for Error {
    fn from(err: ConsistencyError) -> Self {
        Error::Internal(err)
    }
}

/// Rejected input, reported before the core runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputError {
    /// The minterm collection is empty.
    EmptyMinterms,
    /// A token in a term list could not be parsed as a non-negative integer.
    InvalidToken { token: String },
    /// The required pattern width exceeds what the variable naming scheme
    /// can label.
    UnsupportedWidth { width: usize, capacity: usize },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InputError::EmptyMinterms => {
                write!(f, "at least one minterm is required")
            }
            InputError::InvalidToken { token } => {
                write!(f, "'{}' is not a non-negative integer", token)
            }
            InputError::UnsupportedWidth { width, capacity } => {
                write!(
                    f,
                    "{} variables required, but the naming scheme supports at most {}",
                    width, capacity
                )
            }
        }
    }
}

impl error::Error for InputError {}

/// A violated internal invariant. These never occur for valid input; one
/// showing up means a defect in the combination/extraction logic, so callers
/// should treat them as fatal rather than retry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsistencyError {
    /// A value did not fit in the pattern width computed for the inputs.
    ValueOutOfRange { value: u64, width: usize },
    /// A minterm was covered by no prime implicant.
    UncoveredMinterm { minterm: u64 },
}

impl fmt::Display for ConsistencyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConsistencyError::ValueOutOfRange { value, width } => {
                write!(f, "{} does not fit in a width-{} pattern", value, width)
            }
            ConsistencyError::UncoveredMinterm { minterm } => {
                write!(
                    f,
                    "minterm {} is covered by no prime implicant",
                    minterm
                )
            }
        }
    }
}

impl error::Error for ConsistencyError {}

/// Failure to parse a ternary pattern string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsePatternError {
    pub input: String,
}

impl fmt::Display for ParsePatternError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "'{}' is not a pattern over {{0, 1, -}} of width 1..={}",
            self.input,
            crate::pattern::MAX_WIDTH
        )
    }
}

impl error::Error for ParsePatternError {}
