//! reliability — covariance containers and reliability estimators.
//!
//! Purpose
//! -------
//! Collect the classical test-theory reliability machinery: the validated
//! item covariance matrix, Guttman's Lambda-2 estimator with its per-item
//! leave-one-out variants, and the shared validation and error
//! infrastructure, including Python bridges for PyO3-based bindings.
//!
//! Key behaviors
//! -------------
//! - Expose [`CovarianceMatrix`] with construction from pre-built data or
//!   raw respondent-by-item scores, plus the derived sums (diagonal sum,
//!   total composite variance) that reliability formulas consume.
//! - Expose [`GuttmanLambda2`] behind the [`ScoreReliability`] capability
//!   trait with a [`ScoreReliabilityType`] tag, replacing the class
//!   hierarchy of classical implementations with a tagged enumeration.
//! - Centralize shape guards in [`validation`] and report failures via
//!   [`ReliabilityError`] / [`RelResult`] rather than panicking.
//!
//! Invariants & assumptions
//! ------------------------
//! - Covariance matrices are square, finite, symmetric, and immutable
//!   after construction; estimators hold them read-only.
//! - Lambda-2 requires n ≥ 2 items; item deletion requires n ≥ 3. Both
//!   preconditions are enforced before any arithmetic runs, so no formula
//!   ever divides by zero or silently emits NaN.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based throughout; the item-deleted sequence is ordered
//!   by item index.
//! - Error messages are phrased in terms of domain constraints such as
//!   "at least 2 items" rather than low-level details.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use ndarray::array;
//!   use rust_psychometrics::reliability::{CovarianceMatrix, GuttmanLambda2};
//!
//!   let matrix = CovarianceMatrix::new(array![[1.0, 0.5], [0.5, 1.0]])?;
//!   let lambda2 = GuttmanLambda2::new(matrix)?;
//!   let coefficient: f64 = lambda2.value();
//!   # Ok::<(), rust_psychometrics::reliability::ReliabilityError>(())
//!   ```
//!
//! Testing notes
//! -------------
//! - Unit tests in [`errors`] verify `Display` messages and payload
//!   embedding; [`validation`] tests cover every guard branch.
//! - [`covariance`] tests pin the derived sums and the unbiased sample
//!   covariance against hand-computed values; [`guttman_lambda`] tests pin
//!   the closed-form coefficient and brute-force the item-deleted
//!   adjustment.

pub mod covariance;
pub mod errors;
pub mod guttman_lambda;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::covariance::CovarianceMatrix;
pub use self::errors::{RelResult, ReliabilityError};
pub use self::guttman_lambda::{GuttmanLambda2, ScoreReliability, ScoreReliabilityType};
pub use self::validation::{validate_covariance, validate_scores};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::covariance::CovarianceMatrix;
    pub use super::errors::{RelResult, ReliabilityError};
    pub use super::guttman_lambda::{GuttmanLambda2, ScoreReliability, ScoreReliabilityType};
}
