//! Integration tests for the item-analysis and reliability pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end flow: from streamed item responses, through
//!   per-item summaries and a derived covariance matrix, to Guttman's
//!   Lambda-2 and its item-deleted sequence.
//! - Exercise realistic dichotomous exam data rather than toy edge cases
//!   only, and pin the cross-component identities that make the pieces
//!   composable (summary variance vs covariance diagonal, scored mean vs
//!   proportion).
//!
//! Coverage
//! --------
//! - `measurement::item_response`:
//!   - `ItemResponseSummary` streaming accumulation with explicit category
//!     scores and numeric identity scoring.
//! - `reliability::covariance`:
//!   - `CovarianceMatrix::from_scores` on respondent-by-item data and
//!     construction from a pre-built matrix.
//! - `reliability::guttman_lambda`:
//!   - `GuttmanLambda2` value and item-deleted sequence, including the
//!     `ScoreReliability` trait surface.
//!
//! Exclusions
//! ----------
//! - Fine-grained validation of low-level guards and error branches —
//!   these are covered by unit tests in the respective modules.
//! - Python bindings — those are expected to be tested at the Python
//!   level.
use ndarray::{Array2, array};
use rust_psychometrics::{
    measurement::ItemResponseSummary,
    reliability::{CovarianceMatrix, GuttmanLambda2, ScoreReliability, ScoreReliabilityType},
};

/// Purpose
/// -------
/// Provide a small dichotomous exam dataset: six respondents answering
/// three items, scored 1 for correct and 0 for incorrect.
///
/// Returns
/// -------
/// - A 6×3 respondent-by-item score matrix with varied item difficulty
///   and non-degenerate covariances.
fn dichotomous_scores() -> Array2<f64> {
    array![
        [1.0, 1.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 1.0],
        [1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
    ]
}

/// Purpose
/// -------
/// Build one `ItemResponseSummary` per item by streaming the rows of a
/// score matrix, using numeric identity scoring.
///
/// Returns
/// -------
/// - One summary per item column, named "item1", "item2", … in column
///   order.
fn summaries_from_scores(scores: &Array2<f64>) -> Vec<ItemResponseSummary> {
    let (_, n_items) = scores.dim();
    let mut summaries: Vec<ItemResponseSummary> = (0..n_items)
        .map(|j| ItemResponseSummary::new(format!("item{}", j + 1)))
        .collect();

    for row in scores.rows() {
        for (j, &value) in row.iter().enumerate() {
            summaries[j]
                .increment(value)
                .expect("finite unit-weight increments should succeed");
        }
    }
    summaries
}

#[test]
// Purpose
// -------
// Verify the cross-component identities between item summaries and the
// covariance matrix derived from the same data: the summary mean equals
// the item's column mean, and the summary's unbiased sample variance
// equals the covariance diagonal entry.
//
// Given
// -----
// - The shared 6×3 dichotomous dataset, streamed into summaries and
//   passed to `CovarianceMatrix::from_scores`.
//
// Expect
// ------
// - For every item j: summary mean == column mean and summary variance
//   == cov(j, j), both within 1e-12.
fn summaries_and_covariance_agree_on_moments() {
    // Arrange
    let scores = dichotomous_scores();
    let summaries = summaries_from_scores(&scores);
    let matrix = CovarianceMatrix::from_scores(&scores)
        .expect("covariance should build from finite dichotomous data");

    // Act & Assert
    for (j, summary) in summaries.iter().enumerate() {
        let column_mean = scores.column(j).sum() / scores.nrows() as f64;
        let mean = summary.mean().expect("mean is defined after six observations");
        let variance =
            summary.sample_variance().expect("variance is defined after six observations");

        assert!(
            (mean - column_mean).abs() < 1e-12,
            "summary mean for item {j} should equal the column mean"
        );
        assert!(
            (variance - matrix.covariance_at(j, j).unwrap()).abs() < 1e-12,
            "summary variance for item {j} should equal the covariance diagonal entry"
        );
    }
}

#[test]
// Purpose
// -------
// Run the full pipeline on the dichotomous dataset and verify the
// Lambda-2 value against an independent assembly of the closed-form
// formula from the covariance entries.
//
// Given
// -----
// - The shared 6×3 dataset fed through `GuttmanLambda2::from_scores`.
//
// Expect
// ------
// - The estimator reports 3 items and the `GuttmanLambda2` type tag.
// - value == λ₁ + √((n/(n−1))·ssv)/totalVar within 1e-12, with λ₁ and
//   ssv recomputed here directly from `covariance_at`.
// - The item-deleted sequence has length 3 with all entries finite.
fn pipeline_value_matches_independent_assembly() {
    // Arrange
    let scores = dichotomous_scores();
    let lambda2 = GuttmanLambda2::from_scores(&scores)
        .expect("pipeline should accept finite dichotomous data");
    let matrix = lambda2.matrix();
    let n = lambda2.number_of_items();

    let total: f64 = (0..n)
        .flat_map(|i| (0..n).map(move |j| (i, j)))
        .map(|(i, j)| matrix.covariance_at(i, j).unwrap())
        .sum();
    let diag: f64 = (0..n).map(|i| matrix.covariance_at(i, i).unwrap()).sum();
    let ssv: f64 = (0..n)
        .flat_map(|i| (0..n).map(move |j| (i, j)))
        .filter(|&(i, j)| i != j)
        .map(|(i, j)| matrix.covariance_at(i, j).unwrap().powi(2))
        .sum();
    let expected =
        (1.0 - diag / total) + ((n as f64 / (n as f64 - 1.0)) * ssv).sqrt() / total;

    // Act
    let value = lambda2.value();
    let deleted = lambda2.item_deleted_reliability().expect("n = 3 supports item deletion");

    // Assert
    assert_eq!(n, 3);
    assert_eq!(lambda2.reliability_type(), ScoreReliabilityType::GuttmanLambda2);
    assert!(
        (value - expected).abs() < 1e-12,
        "pipeline value {value} should match independent assembly {expected}"
    );
    assert_eq!(deleted.len(), 3);
    assert!(deleted.iter().all(|v| v.is_finite()));
}

#[test]
// Purpose
// -------
// Verify the categorical branch of the pipeline: multiple-choice
// responses with an answer key produce, via explicit category scores,
// the same item difficulty as the proportion of the keyed option.
//
// Given
// -----
// - One item with options "A".."D", keyed "B" (score 1, others 0).
// - Responses: "B" ×7, "A" ×2, "C" ×2, "D" ×1.
//
// Expect
// ------
// - mean() == proportion_at("B") == 7/12.
// - Proportions across all four options sum to 1 within 1e-12.
fn categorical_pipeline_scored_mean_is_keyed_proportion() {
    // Arrange
    let mut item = ItemResponseSummary::new("mc1");
    for (option, score) in [("A", 0.0), ("B", 1.0), ("C", 0.0), ("D", 0.0)] {
        item.set_score_at(option, score).expect("finite scores should be accepted");
    }

    // Act
    item.increment_by("B", 7.0).expect("keyed responses should accumulate");
    item.increment_by("A", 2.0).expect("distractor responses should accumulate");
    item.increment_by("C", 2.0).expect("distractor responses should accumulate");
    item.increment_by("D", 1.0).expect("distractor responses should accumulate");

    // Assert
    let mean = item.mean().expect("mean is defined after twelve observations");
    assert!((mean - 7.0 / 12.0).abs() < 1e-12);
    assert!((item.proportion_at("B").unwrap() - mean).abs() < 1e-15);

    let proportion_sum: f64 =
        item.observed_values().map(|(_, w)| w / item.total_count()).sum();
    assert!((proportion_sum - 1.0).abs() < 1e-12);
}

#[test]
// Purpose
// -------
// Verify the pre-built-matrix entry point on the documented 2×2
// reference case, end to end through the public surface.
//
// Given
// -----
// - The matrix [[1.0, 0.5], [0.5, 1.0]] supplied directly.
//
// Expect
// ------
// - totalVariance = 3, diagonalSum = 2, and value = 2/3 within 1e-12.
// - Item deletion is rejected for the 2-item matrix rather than
//   producing NaN entries.
fn prebuilt_matrix_reference_case_round_trips() {
    // Arrange
    let matrix = CovarianceMatrix::new(array![[1.0, 0.5], [0.5, 1.0]])
        .expect("reference matrix should validate");

    // Act
    assert!((matrix.total_variance() - 3.0).abs() < 1e-12);
    assert!((matrix.diagonal_sum() - 2.0).abs() < 1e-12);
    let lambda2 = GuttmanLambda2::new(matrix).expect("2 items should be accepted");

    // Assert
    assert!((lambda2.value() - 2.0 / 3.0).abs() < 1e-12);
    assert!(
        lambda2.item_deleted_reliability().is_err(),
        "item deletion must be flagged as undefined for a 2-item matrix"
    );
}
