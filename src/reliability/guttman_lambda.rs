//! reliability::guttman_lambda — Guttman's Lambda-2 reliability coefficient.
//!
//! Purpose
//! -------
//! Implement Guttman's Lambda-2 lower-bound reliability estimator for a
//! composite score, together with its per-item "leave-one-out" variants used
//! to assess each item's contribution. Lambda-2 is a tighter lower bound
//! than Cronbach's alpha because it exploits the squared off-diagonal
//! covariances instead of their plain sum.
//!
//! Key behaviors
//! -------------
//! - Compute λ₁ = 1 − diag(M)/totalVar(M) and
//!   λ₂ = λ₁ + √((n/(n−1))·ssv) / totalVar(M), where ssv is the sum of
//!   squared off-diagonal covariances with each unordered pair counted
//!   twice.
//! - Compute the item-deleted sequence: for each excluded item k, the same
//!   formula over the remaining n−1 items, with the adjusted sums obtained
//!   by subtraction from the full-matrix quantities
//!   (totalVar − 2·Σ_{j≠k} cov(k,j) − cov(k,k), diag − cov(k,k), and the
//!   off-diagonal square sum with row/column k removed).
//! - Expose the estimator capability behind the [`ScoreReliability`] trait
//!   with a [`ScoreReliabilityType`] tag, so variant estimators can be
//!   selected via a tagged enumeration rather than inheritance.
//!
//! Invariants & assumptions
//! ------------------------
//! - Construction rejects matrices with fewer than 2 items, so n/(n−1) is
//!   always defined when [`GuttmanLambda2::value`] runs.
//! - Item deletion requires n ≥ 3; deleting from a 2-item matrix leaves a
//!   single item and an undefined (n−1)/(n−2) factor, reported as
//!   `ReliabilityError::ItemDeletedUndefined` up front rather than as NaN
//!   per element.
//! - The subtraction-based adjustment relies on matrix symmetry: removing
//!   item k removes its variance once and its covariance with every other
//!   item twice, consistent with Var(Σ_{i≠k} Xᵢ). A brute-force sub-matrix
//!   cross-check in the tests guards this factor of two.
//!
//! Conventions
//! -----------
//! - The item-deleted sequence is ordered by item index: element k is the
//!   reliability estimate with item k removed.
//! - All arithmetic is deterministic closed-form; there are no retries and
//!   no mid-formula error handling. Malformed input is rejected at
//!   construction.
//!
//! Downstream usage
//! ----------------
//! - Build a [`CovarianceMatrix`] (directly or from raw scores), wrap it in
//!   [`GuttmanLambda2::new`], and read [`GuttmanLambda2::value`] and
//!   [`GuttmanLambda2::item_deleted_reliability`]. Report printers can use
//!   the `Display` implementation and
//!   [`GuttmanLambda2::item_deleted_summary`] for fixed-decimal text.
//!
//! Testing notes
//! -------------
//! - Unit tests assert the closed-form value on the 2×2 reference matrix
//!   (exactly 2/3), recompute λ₁/ssv independently for a 4×4 matrix, and
//!   cross-check every item-deleted value against Lambda-2 on the directly
//!   extracted sub-matrix.
use std::fmt;

use crate::reliability::{
    covariance::CovarianceMatrix,
    errors::{RelResult, ReliabilityError},
};
use ndarray::Array2;

/// Tag identifying which reliability estimator produced a coefficient.
///
/// Variant estimators all consume a [`CovarianceMatrix`]; the tag lets
/// report printers label coefficients without downcasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreReliabilityType {
    /// Guttman's Lambda-2 lower bound.
    GuttmanLambda2,
}

impl fmt::Display for ScoreReliabilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreReliabilityType::GuttmanLambda2 => write!(f, "Guttman's Lambda-2"),
        }
    }
}

/// Capability: computes a reliability coefficient from a covariance matrix.
///
/// Implementations own (or reference) a validated [`CovarianceMatrix`] and
/// produce a scalar coefficient plus the ordered item-deleted sequence.
pub trait ScoreReliability {
    /// Which estimator this is, for labeling and dispatch.
    fn reliability_type(&self) -> ScoreReliabilityType;

    /// The reliability coefficient for the full item set.
    fn value(&self) -> f64;

    /// The coefficient recomputed with each item excluded in turn; element
    /// k is the estimate without item k.
    fn item_deleted_reliability(&self) -> RelResult<Vec<f64>>;
}

/// `GuttmanLambda2` — Lambda-2 estimator over a validated covariance matrix.
///
/// Purpose
/// -------
/// Pure function of a [`CovarianceMatrix`]: holds the matrix and the item
/// count, no other state. All readers take `&self` and are safe for
/// concurrent use.
///
/// Fields
/// ------
/// - `matrix`: [`CovarianceMatrix`]
///   The item covariance data (n ≥ 2 guaranteed at construction).
/// - `n_items`: `usize`
///   Cached item count, equal to `matrix.number_of_variables()`.
#[derive(Debug, Clone, PartialEq)]
pub struct GuttmanLambda2 {
    matrix: CovarianceMatrix,
    n_items: usize,
}

impl GuttmanLambda2 {
    /// Wrap a covariance matrix for Lambda-2 estimation.
    ///
    /// Parameters
    /// ----------
    /// - `matrix`: [`CovarianceMatrix`]
    ///   Validated covariance data with at least 2 items.
    ///
    /// Returns
    /// -------
    /// `RelResult<GuttmanLambda2>`
    ///   - `Ok(GuttmanLambda2)` when the item count supports the formula.
    ///   - `Err(ReliabilityError::TooFewItems(n))` when n < 2, which would
    ///     make n/(n−1) a division by zero.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use ndarray::array;
    /// use rust_psychometrics::reliability::{CovarianceMatrix, GuttmanLambda2};
    ///
    /// let matrix = CovarianceMatrix::new(array![[1.0, 0.5], [0.5, 1.0]]).unwrap();
    /// let lambda2 = GuttmanLambda2::new(matrix).unwrap();
    /// assert!((lambda2.value() - 2.0 / 3.0).abs() < 1e-12);
    /// ```
    pub fn new(matrix: CovarianceMatrix) -> RelResult<Self> {
        let n_items = matrix.number_of_variables();
        if n_items < 2 {
            return Err(ReliabilityError::TooFewItems(n_items));
        }
        Ok(GuttmanLambda2 { matrix, n_items })
    }

    /// Build the covariance matrix from raw respondent-by-item scores and
    /// wrap it in one step.
    ///
    /// Errors
    /// ------
    /// - Any error of
    ///   [`CovarianceMatrix::from_scores`](CovarianceMatrix::from_scores),
    ///   plus `ReliabilityError::TooFewItems` when fewer than 2 item
    ///   columns are present.
    pub fn from_scores(scores: &Array2<f64>) -> RelResult<Self> {
        GuttmanLambda2::new(CovarianceMatrix::from_scores(scores)?)
    }

    /// The wrapped covariance matrix.
    pub fn matrix(&self) -> &CovarianceMatrix {
        &self.matrix
    }

    /// Number of items n.
    pub fn number_of_items(&self) -> usize {
        self.n_items
    }

    /// Guttman's Lambda-2 for the full item set.
    ///
    /// Computes λ₁ = 1 − diag/totalVar and adds
    /// √((n/(n−1))·ssv) / totalVar, where ssv sums the squared
    /// off-diagonal covariances with each unordered pair counted twice.
    pub fn value(&self) -> f64 {
        let total_variance = self.matrix.total_variance();
        let lambda1 = 1.0 - self.matrix.diagonal_sum() / total_variance;
        let n = self.n_items as f64;
        let ssv = self.ssv_excluding(None);
        lambda1 + ((n / (n - 1.0)) * ssv).sqrt() / total_variance
    }

    /// Lambda-2 recomputed with each item excluded in turn.
    ///
    /// Returns
    /// -------
    /// `RelResult<Vec<f64>>`
    ///   An n-length sequence where element k is the estimate without item
    ///   k, in item index order.
    ///
    /// Errors
    /// ------
    /// - `ReliabilityError::ItemDeletedUndefined { n_items }`
    ///   Returned when n < 3: deleting an item from a 2-item matrix leaves
    ///   a single item, for which the Lambda-2 factor (n−1)/(n−2) is
    ///   undefined. Flagged up front rather than returned as NaN.
    ///
    /// Notes
    /// -----
    /// - The adjusted quantities are obtained by subtraction from the
    ///   full-matrix sums: removing item k removes its variance once from
    ///   the diagonal and, via symmetry, twice its covariance with every
    ///   remaining item from the total variance.
    pub fn item_deleted_reliability(&self) -> RelResult<Vec<f64>> {
        if self.n_items < 3 {
            return Err(ReliabilityError::ItemDeletedUndefined { n_items: self.n_items });
        }

        let total_variance = self.matrix.total_variance();
        let diagonal_sum = self.matrix.diagonal_sum();
        let n_minus_1 = (self.n_items - 1) as f64;

        let mut rel = Vec::with_capacity(self.n_items);
        for k in 0..self.n_items {
            let item_variance = self.matrix.get(k, k);

            // Twice the covariance between item k and all remaining items.
            let mut item_covariance = 0.0;
            for j in 0..self.n_items {
                if j != k {
                    item_covariance += self.matrix.get(k, j);
                }
            }
            item_covariance *= 2.0;

            let total_adjusted = total_variance - item_covariance - item_variance;
            let diagonal_adjusted = diagonal_sum - item_variance;
            let ssv_adjusted = self.ssv_excluding(Some(k));

            let lambda1_adjusted = 1.0 - diagonal_adjusted / total_adjusted;
            rel.push(
                lambda1_adjusted
                    + ((n_minus_1 / (n_minus_1 - 1.0)) * ssv_adjusted).sqrt() / total_adjusted,
            );
        }

        Ok(rel)
    }

    /// Formatted item-deleted table: one row per item with its name and
    /// the 4-decimal reliability estimate without that item.
    ///
    /// Errors
    /// ------
    /// - `ReliabilityError::NameCountMismatch { names, n }`
    ///   Returned when `names.len()` differs from the item count.
    /// - Any error of [`GuttmanLambda2::item_deleted_reliability`].
    pub fn item_deleted_summary<S: AsRef<str>>(&self, names: &[S]) -> RelResult<String> {
        if names.len() != self.n_items {
            return Err(ReliabilityError::NameCountMismatch {
                names: names.len(),
                n: self.n_items,
            });
        }

        let deleted = self.item_deleted_reliability()?;
        let mut out = String::new();
        out.push_str(" Guttman's Lambda-2 if Item Deleted\n");
        out.push_str("====================================\n");
        for (name, value) in names.iter().zip(deleted.iter()) {
            out.push_str(&format!("{:<10} {:>10.4}\n", name.as_ref(), value));
        }
        Ok(out)
    }

    //
    // ---------- Private helpers (compact docs) ----------
    //

    /// Sum of squared off-diagonal covariances, both (i, j) and (j, i)
    /// counted, optionally skipping one item's row and column.
    fn ssv_excluding(&self, excluded: Option<usize>) -> f64 {
        let mut ssv = 0.0;
        for i in 0..self.n_items {
            if Some(i) == excluded {
                continue;
            }
            for j in 0..self.n_items {
                if i == j || Some(j) == excluded {
                    continue;
                }
                ssv += self.matrix.get(i, j).powi(2);
            }
        }
        ssv
    }
}

impl ScoreReliability for GuttmanLambda2 {
    fn reliability_type(&self) -> ScoreReliabilityType {
        ScoreReliabilityType::GuttmanLambda2
    }

    fn value(&self) -> f64 {
        GuttmanLambda2::value(self)
    }

    fn item_deleted_reliability(&self) -> RelResult<Vec<f64>> {
        GuttmanLambda2::item_deleted_reliability(self)
    }
}

impl fmt::Display for GuttmanLambda2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>21}{:.2}", "Guttman's Lambda-2 = ", self.value())
    }
}
