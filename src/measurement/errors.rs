//! Errors for item response summaries (weight/score validation and
//! undefined-statistic conditions).
//!
//! This module defines [`SummaryError`], the error type shared by the
//! item-level accumulators in `measurement`. It implements
//! `Display`/`Error` and converts to `PyErr` for PyO3.
//!
//! ## Conventions
//! - Weights must be **finite and strictly positive**; a zero weight is
//!   rejected rather than silently dropped.
//! - Numeric responses and explicit scores must be **finite**.
//! - Statistics that are undefined for the accumulated count (proportion
//!   or mean with no observations, variance with a weighted count below 2)
//!   are surfaced as errors at the accessor, never as `NaN`.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for item-summary operations that may produce [`SummaryError`].
pub type SummaryResult<T> = Result<T, SummaryError>;

/// Error conditions for [`ItemResponseSummary`](crate::measurement::ItemResponseSummary).
///
/// Covers increment-time input validation (weights, numeric responses,
/// unscored categories) and undefined-statistic conditions raised by the
/// pure readers. Implements `Display`/`Error` and converts to a Python
/// `ValueError` at PyO3 boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryError {
    // ---- Increment-time validation ----
    /// A numeric response is NaN/±inf and cannot be keyed or scored.
    NonFiniteResponse(f64),

    /// An increment weight is NaN/±inf or not strictly positive.
    InvalidWeight(f64),

    /// An explicitly assigned score is NaN/±inf.
    NonFiniteScore(f64),

    /// A categorical response has no assigned score, so its numeric
    /// contribution to the mean/variance sums cannot be resolved.
    UnscoredCategory(String),

    // ---- Undefined statistics ----
    /// Proportion or mean requested before any observation was recorded.
    NoObservations,

    /// Sample variance requested with a weighted count below 2.
    InsufficientObservations(f64),
}

impl std::error::Error for SummaryError {}

impl std::fmt::Display for SummaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryError::NonFiniteResponse(value) => {
                write!(f, "Invalid response value: {value}. Must be a finite number.")
            }
            SummaryError::InvalidWeight(weight) => {
                write!(f, "Invalid weight: {weight}. Must be finite and strictly positive.")
            }
            SummaryError::NonFiniteScore(score) => {
                write!(f, "Invalid score: {score}. Must be a finite number.")
            }
            SummaryError::UnscoredCategory(value) => {
                write!(
                    f,
                    "Response {value:?} has no assigned score. Call set_score_at before \
                     incrementing categorical responses."
                )
            }
            SummaryError::NoObservations => {
                write!(f, "Statistic is undefined: no observations have been recorded.")
            }
            SummaryError::InsufficientObservations(count) => {
                write!(
                    f,
                    "Sample variance is undefined for a weighted count of {count}. \
                     Need a total weight of at least 2."
                )
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SummaryError> for PyErr {
    fn from(err: SummaryError) -> PyErr {
        PyValueError::new_err(format!("SummaryError: {err}"))
    }
}
