//! reliability::validation — shared input guards for covariance data.
//!
//! Purpose
//! -------
//! Centralize shape and precondition checks for covariance matrices and raw
//! score matrices. This keeps the constructors in `reliability::covariance`
//! thin and guarantees that estimators downstream never see malformed input.
//!
//! Key behaviors
//! -------------
//! - Enforce squareness, non-emptiness, finiteness, and symmetry of
//!   covariance matrices before they are wrapped.
//! - Enforce minimum respondent counts and finiteness of raw score
//!   matrices before sample covariances are computed.
//!
//! Invariants & assumptions
//! ------------------------
//! - Covariance matrices must be square with n ≥ 1 and all entries finite.
//! - Mirrored entries may differ by at most [`SYMMETRY_TOLERANCE`] in
//!   absolute value; larger deviations indicate a construction bug in the
//!   caller rather than rounding noise.
//! - Score matrices are respondent-by-item with at least 2 rows and 1
//!   column, all entries finite.
//!
//! Conventions
//! -----------
//! - This module is purely about *validation*; it performs no I/O and does
//!   not allocate beyond what is required for error construction.
//! - Errors are reported via the crate-local `ReliabilityError` enum, which
//!   is also convertible to `PyErr` in Python-facing layers.
//!
//! Downstream usage
//! ----------------
//! - `CovarianceMatrix::new` calls [`validate_covariance`];
//!   `CovarianceMatrix::from_scores` calls [`validate_scores`].
//! - Treat a successful return (`Ok(())`) as a guarantee that estimators
//!   can index the matrix freely within [0, n).
//!
//! Testing notes
//! -------------
//! - Unit tests in this module cover all error branches of both guards and
//!   a simple success path for each.

use crate::reliability::errors::{RelResult, ReliabilityError};
use ndarray::Array2;

/// Largest absolute difference tolerated between mirrored entries.
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Validate shape, finiteness, and symmetry of a covariance matrix.
///
/// Parameters
/// ----------
/// - `matrix`: `&Array2<f64>`
///   Candidate covariance matrix. Must be square with at least one item,
///   contain only finite values, and be symmetric within
///   [`SYMMETRY_TOLERANCE`].
///
/// Returns
/// -------
/// `RelResult<()>`
///   - `Ok(())` if all constraints are satisfied.
///   - `Err(ReliabilityError)` with a variant encoding which condition
///     failed and the offending location.
///
/// Errors
/// ------
/// - `ReliabilityError::EmptyMatrix`
///   Returned when the matrix has zero rows or columns.
/// - `ReliabilityError::NonSquareMatrix { rows, cols }`
///   Returned when the row and column counts differ.
/// - `ReliabilityError::NonFiniteCovariance { row, col, value }`
///   Returned for the first NaN/±∞ entry encountered.
/// - `ReliabilityError::AsymmetricMatrix { row, col, delta }`
///   Returned for the first mirrored pair differing by more than the
///   tolerance.
///
/// Panics
/// ------
/// - Never panics. All failures are reported via `ReliabilityError`.
///
/// Notes
/// -----
/// - Validation scans the matrix once for finiteness and once over the
///   upper triangle for symmetry; both are O(n²).
pub fn validate_covariance(matrix: &Array2<f64>) -> RelResult<()> {
    let (rows, cols) = matrix.dim();
    if rows == 0 || cols == 0 {
        return Err(ReliabilityError::EmptyMatrix);
    }
    if rows != cols {
        return Err(ReliabilityError::NonSquareMatrix { rows, cols });
    }

    for ((row, col), &value) in matrix.indexed_iter() {
        if !value.is_finite() {
            return Err(ReliabilityError::NonFiniteCovariance { row, col, value });
        }
    }

    for row in 0..rows {
        for col in (row + 1)..cols {
            let delta = (matrix[[row, col]] - matrix[[col, row]]).abs();
            if delta > SYMMETRY_TOLERANCE {
                return Err(ReliabilityError::AsymmetricMatrix { row, col, delta });
            }
        }
    }

    Ok(())
}

/// Validate a raw respondent-by-item score matrix for covariance
/// construction.
///
/// Parameters
/// ----------
/// - `scores`: `&Array2<f64>`
///   Raw scores with one row per respondent and one column per item. Must
///   have at least 2 rows and 1 column, all entries finite.
///
/// Returns
/// -------
/// `RelResult<()>`
///   - `Ok(())` if all constraints are satisfied.
///   - `Err(ReliabilityError)` otherwise.
///
/// Errors
/// ------
/// - `ReliabilityError::EmptyMatrix`
///   Returned when there are no item columns.
/// - `ReliabilityError::TooFewRespondents(rows)`
///   Returned when fewer than 2 rows are present, so the (n−1)
///   denominator of the sample covariance is undefined.
/// - `ReliabilityError::NonFiniteScore { row, col, value }`
///   Returned for the first NaN/±∞ entry encountered.
///
/// Panics
/// ------
/// - Never panics. All failures are reported via `ReliabilityError`.
pub fn validate_scores(scores: &Array2<f64>) -> RelResult<()> {
    let (rows, cols) = scores.dim();
    if cols == 0 {
        return Err(ReliabilityError::EmptyMatrix);
    }
    if rows < 2 {
        return Err(ReliabilityError::TooFewRespondents(rows));
    }

    for ((row, col), &value) in scores.indexed_iter() {
        if !value.is_finite() {
            return Err(ReliabilityError::NonFiniteScore { row, col, value });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Successful validation of well-formed covariance and score matrices.
    // - Each error branch of `validate_covariance`:
    //   * empty matrix,
    //   * non-square shape,
    //   * non-finite entry,
    //   * asymmetry beyond tolerance.
    // - Each error branch of `validate_scores`:
    //   * zero item columns,
    //   * fewer than 2 respondent rows,
    //   * non-finite score entry.
    //
    // They intentionally DO NOT cover:
    // - Covariance arithmetic; that lives in `covariance` and
    //   `guttman_lambda` tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a symmetric, finite 2×2 matrix passes validation.
    //
    // Given
    // -----
    // - The matrix [[1.0, 0.5], [0.5, 1.0]].
    //
    // Expect
    // ------
    // - `validate_covariance` returns `Ok(())`.
    fn validate_covariance_valid_matrix_succeeds() {
        // Arrange
        let matrix = array![[1.0, 0.5], [0.5, 1.0]];

        // Act
        let result = validate_covariance(&matrix);

        // Assert
        assert!(result.is_ok(), "Expected Ok(()) for valid matrix, got {result:?}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure that a matrix with zero items is rejected with
    // `ReliabilityError::EmptyMatrix`.
    //
    // Given
    // -----
    // - A 0×0 matrix.
    //
    // Expect
    // ------
    // - `validate_covariance` returns `Err(ReliabilityError::EmptyMatrix)`.
    fn validate_covariance_empty_matrix_returns_empty_matrix() {
        // Arrange
        let matrix = Array2::<f64>::zeros((0, 0));

        // Act
        let result = validate_covariance(&matrix);

        // Assert
        match result {
            Err(ReliabilityError::EmptyMatrix) => (),
            other => panic!("expected EmptyMatrix error, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure that a non-square matrix is rejected with the offending
    // shape in the payload.
    //
    // Given
    // -----
    // - A 2×3 matrix of zeros.
    //
    // Expect
    // ------
    // - `validate_covariance` returns
    //   `Err(ReliabilityError::NonSquareMatrix { rows: 2, cols: 3 })`.
    fn validate_covariance_non_square_returns_non_square_matrix() {
        // Arrange
        let matrix = Array2::<f64>::zeros((2, 3));

        // Act
        let result = validate_covariance(&matrix);

        // Assert
        match result {
            Err(ReliabilityError::NonSquareMatrix { rows, cols }) => {
                assert_eq!((rows, cols), (2, 3));
            }
            other => panic!("expected NonSquareMatrix error, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that a NaN entry triggers `NonFiniteCovariance` with its
    // location.
    //
    // Given
    // -----
    // - A 2×2 matrix with NaN at (0, 1).
    //
    // Expect
    // ------
    // - `validate_covariance` returns the offending location and value.
    fn validate_covariance_non_finite_entry_returns_non_finite_covariance() {
        // Arrange
        let matrix = array![[1.0, f64::NAN], [0.5, 1.0]];

        // Act
        let result = validate_covariance(&matrix);

        // Assert
        match result {
            Err(ReliabilityError::NonFiniteCovariance { row, col, value }) => {
                assert_eq!((row, col), (0, 1));
                assert!(!value.is_finite());
            }
            other => panic!("expected NonFiniteCovariance error, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that mirrored entries differing by more than the tolerance
    // are rejected as asymmetric.
    //
    // Given
    // -----
    // - A 2×2 matrix with cov(0,1) = 0.5 and cov(1,0) = 0.6.
    //
    // Expect
    // ------
    // - `validate_covariance` returns
    //   `Err(ReliabilityError::AsymmetricMatrix { row: 0, col: 1, .. })`.
    fn validate_covariance_asymmetric_matrix_returns_asymmetric_matrix() {
        // Arrange
        let matrix = array![[1.0, 0.5], [0.6, 1.0]];

        // Act
        let result = validate_covariance(&matrix);

        // Assert
        match result {
            Err(ReliabilityError::AsymmetricMatrix { row, col, delta }) => {
                assert_eq!((row, col), (0, 1));
                assert!((delta - 0.1).abs() < 1e-12);
            }
            other => panic!("expected AsymmetricMatrix error, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that a well-formed score matrix passes validation.
    //
    // Given
    // -----
    // - A 3×2 finite score matrix.
    //
    // Expect
    // ------
    // - `validate_scores` returns `Ok(())`.
    fn validate_scores_valid_matrix_succeeds() {
        // Arrange
        let scores = array![[1.0, 2.0], [2.0, 4.0], [3.0, 6.0]];

        // Act
        let result = validate_scores(&scores);

        // Assert
        assert!(result.is_ok(), "Expected Ok(()) for valid scores, got {result:?}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure that a single-respondent score matrix is rejected, since the
    // (n−1) denominator would be zero.
    //
    // Given
    // -----
    // - A 1×2 score matrix.
    //
    // Expect
    // ------
    // - `validate_scores` returns
    //   `Err(ReliabilityError::TooFewRespondents(1))`.
    fn validate_scores_single_row_returns_too_few_respondents() {
        // Arrange
        let scores = array![[1.0, 2.0]];

        // Act
        let result = validate_scores(&scores);

        // Assert
        match result {
            Err(ReliabilityError::TooFewRespondents(rows)) => assert_eq!(rows, 1),
            other => panic!("expected TooFewRespondents error, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure that a score matrix with no item columns is rejected.
    //
    // Given
    // -----
    // - A 3×0 score matrix.
    //
    // Expect
    // ------
    // - `validate_scores` returns `Err(ReliabilityError::EmptyMatrix)`.
    fn validate_scores_zero_columns_returns_empty_matrix() {
        // Arrange
        let scores = Array2::<f64>::zeros((3, 0));

        // Act
        let result = validate_scores(&scores);

        // Assert
        match result {
            Err(ReliabilityError::EmptyMatrix) => (),
            other => panic!("expected EmptyMatrix error, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that a non-finite score entry is rejected with its location.
    //
    // Given
    // -----
    // - A 2×2 score matrix with +∞ at (1, 0).
    //
    // Expect
    // ------
    // - `validate_scores` returns the offending location and value.
    fn validate_scores_non_finite_entry_returns_non_finite_score() {
        // Arrange
        let scores = array![[1.0, 2.0], [f64::INFINITY, 4.0]];

        // Act
        let result = validate_scores(&scores);

        // Assert
        match result {
            Err(ReliabilityError::NonFiniteScore { row, col, value }) => {
                assert_eq!((row, col), (1, 0));
                assert!(!value.is_finite());
            }
            other => panic!("expected NonFiniteScore error, got {other:?}"),
        }
    }
}
