//! Errors for covariance matrices and reliability estimators (shape and
//! precondition checks, index access, degenerate item counts).
//!
//! This module defines [`ReliabilityError`], shared by the covariance
//! container and the reliability estimators in `reliability`. It implements
//! `Display`/`Error` and converts to `PyErr` for PyO3.
//!
//! ## Conventions
//! - **Indices are 0-based** and validated against the item count `n`.
//! - Shape and precondition violations (non-square input, n < 2 for
//!   Lambda-2, asymmetry, non-finite entries) are rejected at construction
//!   or call time, never computed into silently wrong numbers.
//! - Degenerate configurations that would make a closed-form expression
//!   undefined (item deletion at n = 2) get their own variant instead of
//!   producing NaN.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for reliability operations that may produce [`ReliabilityError`].
pub type RelResult<T> = Result<T, ReliabilityError>;

/// Unified error type for covariance and reliability computations.
///
/// Covers matrix-shape validation, element access, score-matrix
/// construction, and estimator preconditions. Implements `Display`/`Error`
/// and converts to a Python `ValueError` at PyO3 boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum ReliabilityError {
    // ---- Matrix shape validation ----
    /// The supplied matrix has no rows or no columns.
    EmptyMatrix,

    /// The supplied matrix is not square.
    NonSquareMatrix { rows: usize, cols: usize },

    /// A covariance entry is NaN/±inf.
    NonFiniteCovariance { row: usize, col: usize, value: f64 },

    /// A pair of mirrored entries differs by more than the symmetry
    /// tolerance.
    AsymmetricMatrix { row: usize, col: usize, delta: f64 },

    // ---- Element access ----
    /// A row or column index is outside [0, n).
    IndexOutOfRange { index: usize, n: usize },

    // ---- Score-matrix construction ----
    /// Sample covariance needs at least 2 respondent rows.
    TooFewRespondents(usize),

    /// A raw score entry is NaN/±inf.
    NonFiniteScore { row: usize, col: usize, value: f64 },

    // ---- Estimator preconditions ----
    /// Lambda-2 requires at least 2 items so n/(n-1) is defined.
    TooFewItems(usize),

    /// Item-deleted reliability requires at least 3 items; deleting from a
    /// 2-item matrix leaves a single item and an undefined formula.
    ItemDeletedUndefined { n_items: usize },

    /// A variable-name slice does not match the item count.
    NameCountMismatch { names: usize, n: usize },
}

impl std::error::Error for ReliabilityError {}

impl std::fmt::Display for ReliabilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReliabilityError::EmptyMatrix => {
                write!(f, "Covariance matrix must have at least one item.")
            }
            ReliabilityError::NonSquareMatrix { rows, cols } => {
                write!(f, "Covariance matrix must be square; got {rows} rows and {cols} columns.")
            }
            ReliabilityError::NonFiniteCovariance { row, col, value } => {
                write!(
                    f,
                    "Covariance entry ({row}, {col}) is {value}. Must be a finite number."
                )
            }
            ReliabilityError::AsymmetricMatrix { row, col, delta } => {
                write!(
                    f,
                    "Covariance entries ({row}, {col}) and ({col}, {row}) differ by {delta}. \
                     Matrix must be symmetric."
                )
            }
            ReliabilityError::IndexOutOfRange { index, n } => {
                write!(f, "Index {index} is out of range for a matrix of {n} items.")
            }
            ReliabilityError::TooFewRespondents(rows) => {
                write!(
                    f,
                    "Sample covariance needs at least 2 respondent rows; got {rows}."
                )
            }
            ReliabilityError::NonFiniteScore { row, col, value } => {
                write!(f, "Score entry ({row}, {col}) is {value}. Must be a finite number.")
            }
            ReliabilityError::TooFewItems(n) => {
                write!(f, "Guttman's Lambda-2 requires at least 2 items; got {n}.")
            }
            ReliabilityError::ItemDeletedUndefined { n_items } => {
                write!(
                    f,
                    "Item-deleted reliability is undefined for {n_items} items; deleting an \
                     item must leave at least 2."
                )
            }
            ReliabilityError::NameCountMismatch { names, n } => {
                write!(f, "Got {names} variable names for {n} items.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<ReliabilityError> for PyErr {
    fn from(err: ReliabilityError) -> PyErr {
        PyValueError::new_err(format!("ReliabilityError: {err}"))
    }
}
