//! measurement — item-level response summaries and their shared infrastructure.
//!
//! Purpose
//! -------
//! Collect the per-item accumulation machinery used alongside reliability
//! analysis: streaming response summaries with frequency, proportion, and
//! moment statistics, plus the error types they report.
//!
//! Key behaviors
//! -------------
//! - Expose the streaming accumulator [`ItemResponseSummary`] with its
//!   normalized observation key type [`Response`].
//! - Provide a dedicated error type [`SummaryError`] and result alias
//!   [`SummaryResult`], plus a conversion layer to Python exceptions when
//!   the `python-bindings` feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Summaries are exclusively owned, single-threaded accumulators; their
//!   readers are pure and consistent with the accumulated state at any time.
//! - All undefined statistics (zero or insufficient observations, unscored
//!   categories) are reported via [`SummaryResult`] and never as NaN.
//!
//! Conventions
//! -----------
//! - This subtree is focused on *item-level accumulation*; covariance and
//!   reliability estimation live under `reliability`.
//! - Error messages are phrased in terms of domain constraints such as
//!   "weight must be finite and strictly positive" rather than low-level
//!   details.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use rust_psychometrics::measurement::{ItemResponseSummary, SummaryResult};
//!
//!   let mut summary = ItemResponseSummary::new("item1");
//!   summary.increment(1.0)?;
//!   let p: f64 = summary.proportion_at(1.0)?;
//!   # Ok::<(), rust_psychometrics::measurement::SummaryError>(())
//!   ```
//!
//! Testing notes
//! -------------
//! - Unit tests in [`errors`] verify `Display` messages and payload
//!   embedding for [`SummaryError`] variants.
//! - Unit tests in [`item_response`] cover key normalization, weighted
//!   increments, moment formulas, and every accessor error branch.

pub mod errors;
pub mod item_response;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{SummaryError, SummaryResult};
pub use self::item_response::{ItemResponseSummary, Response};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::errors::{SummaryError, SummaryResult};
    pub use super::item_response::{ItemResponseSummary, Response};
}
