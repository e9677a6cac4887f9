//! reliability::covariance — validated item covariance matrices.
//!
//! Purpose
//! -------
//! Provide the leaf data container consumed by reliability estimators: a
//! square, symmetric matrix of item covariances with item variances on the
//! diagonal, plus the derived quantities the closed-form reliability
//! formulas need (diagonal sum, total composite variance, pairwise access).
//!
//! Key behaviors
//! -------------
//! - [`CovarianceMatrix::new`] wraps a pre-built covariance matrix after
//!   validating shape, finiteness, and symmetry.
//! - [`CovarianceMatrix::from_scores`] derives the matrix from a raw
//!   respondent-by-item score matrix using the unbiased (n−1-denominator)
//!   sample covariance for every pair.
//! - Read-only accessors expose n, single entries, the diagonal sum
//!   Σ cov[i][i], and the total variance Σᵢ Σⱼ cov[i][j].
//!
//! Invariants & assumptions
//! ------------------------
//! - n ≥ 1 and the matrix is n×n.
//! - The matrix is immutable after construction; estimators hold it
//!   read-only, so concurrent reads are safe.
//! - `total_variance` sums the full matrix, not just the diagonal: it is
//!   the variance of the composite score, Var(ΣXᵢ) = ΣΣ Cov(Xᵢ, Xⱼ).
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; out-of-range access is reported via
//!   `ReliabilityError::IndexOutOfRange` rather than panicking.
//! - All covariances use the same (n−1) denominator so the matrix is
//!   internally consistent with the reliability formulas downstream.
//!
//! Downstream usage
//! ----------------
//! - Construct once from raw data or a pre-built matrix, then hand a
//!   reference (or the owned value) to an estimator such as
//!   [`GuttmanLambda2`](crate::reliability::guttman_lambda::GuttmanLambda2).
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction from both entry points, the derived
//!   quantities on hand-computed matrices, and out-of-range access.
use crate::reliability::{
    errors::{RelResult, ReliabilityError},
    validation::{validate_covariance, validate_scores},
};
use ndarray::Array2;

/// `CovarianceMatrix` — square, symmetric item covariance data.
///
/// Purpose
/// -------
/// Store pairwise covariances among n items (variances on the diagonal)
/// and serve the derived sums that reliability estimators consume.
///
/// Fields
/// ------
/// - `cov`: `Array2<f64>`
///   The validated n×n covariance matrix.
///
/// Invariants
/// ----------
/// - `cov` is square with n ≥ 1, finite, and symmetric within the
///   validation tolerance.
/// - Immutable after construction; no method takes `&mut self`.
///
/// Performance
/// -----------
/// - Derived sums are O(n²) single passes; element access is O(1).
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceMatrix {
    cov: Array2<f64>,
}

impl CovarianceMatrix {
    /// Wrap a pre-built covariance matrix after validation.
    ///
    /// Parameters
    /// ----------
    /// - `cov`: `Array2<f64>`
    ///   Candidate covariance matrix. Must be square with n ≥ 1, finite,
    ///   and symmetric within the validation tolerance.
    ///
    /// Returns
    /// -------
    /// `RelResult<CovarianceMatrix>`
    ///   - `Ok(CovarianceMatrix)` when validation passes.
    ///   - `Err(ReliabilityError)` with the first violated constraint.
    ///
    /// Errors
    /// ------
    /// - `ReliabilityError::EmptyMatrix`, `NonSquareMatrix`,
    ///   `NonFiniteCovariance`, or `AsymmetricMatrix` as reported by
    ///   [`validate_covariance`](crate::reliability::validation::validate_covariance).
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use ndarray::array;
    /// use rust_psychometrics::reliability::CovarianceMatrix;
    ///
    /// let matrix = CovarianceMatrix::new(array![[1.0, 0.5], [0.5, 1.0]]).unwrap();
    /// assert_eq!(matrix.number_of_variables(), 2);
    /// assert!((matrix.total_variance() - 3.0).abs() < 1e-12);
    /// ```
    pub fn new(cov: Array2<f64>) -> RelResult<Self> {
        validate_covariance(&cov)?;
        Ok(CovarianceMatrix { cov })
    }

    /// Derive the covariance matrix from a raw respondent-by-item score
    /// matrix.
    ///
    /// Parameters
    /// ----------
    /// - `scores`: `&Array2<f64>`
    ///   One row per respondent, one column per item. Must have at least
    ///   2 rows and 1 column with all entries finite.
    ///
    /// Returns
    /// -------
    /// `RelResult<CovarianceMatrix>`
    ///   The unbiased sample covariance matrix: each entry (i, j) is
    ///   Σₜ (xₜᵢ − x̄ᵢ)(xₜⱼ − x̄ⱼ) / (rows − 1), which is symmetric by
    ///   construction.
    ///
    /// Errors
    /// ------
    /// - `ReliabilityError::EmptyMatrix`, `TooFewRespondents`, or
    ///   `NonFiniteScore` as reported by
    ///   [`validate_scores`](crate::reliability::validation::validate_scores).
    pub fn from_scores(scores: &Array2<f64>) -> RelResult<Self> {
        validate_scores(scores)?;

        let (rows, n) = scores.dim();
        let means: Vec<f64> =
            (0..n).map(|j| scores.column(j).sum() / rows as f64).collect();

        let mut cov = Array2::<f64>::zeros((n, n));
        for i in 0..n {
            for j in i..n {
                let value = sample_covariance(scores, i, j, means[i], means[j]);
                cov[[i, j]] = value;
                cov[[j, i]] = value;
            }
        }

        Ok(CovarianceMatrix { cov })
    }

    /// Number of items n.
    pub fn number_of_variables(&self) -> usize {
        self.cov.nrows()
    }

    /// Covariance between items `i` and `j`.
    ///
    /// Errors
    /// ------
    /// - `ReliabilityError::IndexOutOfRange`
    ///   Returned when `i` or `j` is not in [0, n).
    pub fn covariance_at(&self, i: usize, j: usize) -> RelResult<f64> {
        let n = self.number_of_variables();
        for index in [i, j] {
            if index >= n {
                return Err(ReliabilityError::IndexOutOfRange { index, n });
            }
        }
        Ok(self.cov[[i, j]])
    }

    /// Unchecked element access for estimator internals; callers guarantee
    /// `i, j < n`.
    #[inline]
    pub(crate) fn get(&self, i: usize, j: usize) -> f64 {
        self.cov[[i, j]]
    }

    /// Sum of the item variances Σ cov[i][i].
    pub fn diagonal_sum(&self) -> f64 {
        self.cov.diag().sum()
    }

    /// Variance of the composite score: Σᵢ Σⱼ cov[i][j] over all n²
    /// entries.
    pub fn total_variance(&self) -> f64 {
        self.cov.sum()
    }
}

//
// ---------- Private helpers (compact docs) ----------
//

/// Unbiased sample covariance between item columns `i` and `j` given their
/// precomputed means. Assumes `scores` passed validation (≥ 2 rows, finite).
#[inline]
fn sample_covariance(scores: &Array2<f64>, i: usize, j: usize, mean_i: f64, mean_j: f64) -> f64 {
    let rows = scores.nrows();
    scores
        .column(i)
        .iter()
        .zip(scores.column(j).iter())
        .map(|(&x, &y)| (x - mean_i) * (y - mean_j))
        .sum::<f64>()
        / (rows - 1) as f64
}
