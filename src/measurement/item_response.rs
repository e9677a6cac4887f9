//! measurement::item_response — per-item response frequency and score summary.
//!
//! Purpose
//! -------
//! Accumulate categorical or numeric response observations for a single test
//! item and derive frequency, proportion, mean, unbiased sample variance, and
//! standard deviation from the accumulated state. Summaries are the item-level
//! companion statistic to reliability analysis: scored item vectors built from
//! them feed a covariance matrix, which in turn feeds a reliability estimator.
//!
//! Key behaviors
//! -------------
//! - Normalize observations into comparable [`Response`] keys so that
//!   numerically equal values (1, 1.0, 2.00's underlying 2) collide while
//!   category labels compare by exact string equality.
//! - Support weighted increments: `increment_by(v, 4.0)` accumulates the same
//!   state as four unit `increment(v)` calls.
//! - Maintain running weighted sums (score sum, squared-score sum, total
//!   count) so moments are available at any time without storing individual
//!   observations.
//! - Resolve the numeric score of an observation as the explicitly assigned
//!   score when one was set via [`ItemResponseSummary::set_score_at`], else
//!   the response's own numeric value.
//!
//! Invariants & assumptions
//! ------------------------
//! - Frequencies are non-negative; weights must be finite and strictly
//!   positive at increment time.
//! - Once at least one observation exists, proportions across all observed
//!   values sum to 1 within floating-point tolerance.
//! - Numeric responses and explicit scores must be finite; NaN never enters
//!   the accumulator.
//! - A categorical response with no assigned score still accumulates
//!   frequency, but poisons the scored statistics: `mean` and
//!   `sample_variance` report [`SummaryError::UnscoredCategory`] until the
//!   summary is rebuilt with scores assigned up front. Assigning the score
//!   afterwards does **not** rescore already-recorded increments.
//!
//! Conventions
//! -----------
//! - `increment` calls mutate the accumulator in a streaming, single-threaded
//!   fashion; readers are pure and may be called at any time (no explicit
//!   "close" step).
//! - [`Response`] keys carry a total order (numeric values first, ordered by
//!   `f64::total_cmp`, then categories in lexicographic order) so frequency
//!   tables iterate deterministically.
//! - Errors are reported via the crate-local [`SummaryError`] enum, which is
//!   also convertible to `PyErr` in Python-facing layers.
//!
//! Downstream usage
//! ----------------
//! - Create one summary per item before data collection, stream observations
//!   via [`ItemResponseSummary::increment`], and read statistics whenever
//!   needed.
//! - Scored means of dichotomous items equal the proportion of the keyed
//!   category (classical item difficulty), which callers can collect into
//!   score vectors for covariance construction.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the normalization contract of [`Response`], the
//!   frequency/proportion bookkeeping, weighted-increment equivalence, the
//!   moment formulas against hand-computed constants, and every error branch
//!   of the accessors.
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::measurement::errors::{SummaryError, SummaryResult};

/// A single observed response value, normalized into a comparable key.
///
/// Purpose
/// -------
/// Act as the map key for frequency and score tables. Numeric responses of
/// equal magnitude must collide (1, 1.0, and the 2 underlying 2.00 are one
/// key), while category labels compare by exact string equality.
///
/// Invariants
/// ----------
/// - `Value(-0.0)` is normalized to `Value(0.0)` before being stored, so the
///   two zeros share one key under `f64::total_cmp`.
/// - `Value(NaN)` is rejected at increment time and never stored.
///
/// Notes
/// -----
/// - The total order places numeric values before categories; numeric values
///   order by `f64::total_cmp` and categories lexicographically. This makes
///   iteration over observed values deterministic.
#[derive(Debug, Clone)]
pub enum Response {
    /// A numeric response, keyed by f64 equality.
    Value(f64),
    /// A categorical response label, keyed by exact string equality.
    Category(String),
}

impl Response {
    /// Collapse `-0.0` into `+0.0` so equal magnitudes share one key.
    fn normalized(self) -> Self {
        match self {
            Response::Value(v) if v == 0.0 => Response::Value(0.0),
            other => other,
        }
    }
}

impl PartialEq for Response {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Response {}

impl PartialOrd for Response {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Response {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Response::Value(a), Response::Value(b)) => a.total_cmp(b),
            (Response::Value(_), Response::Category(_)) => Ordering::Less,
            (Response::Category(_), Response::Value(_)) => Ordering::Greater,
            (Response::Category(a), Response::Category(b)) => a.cmp(b),
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Value(v) => write!(f, "{v}"),
            Response::Category(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for Response {
    fn from(v: f64) -> Self {
        Response::Value(v)
    }
}

impl From<i64> for Response {
    fn from(v: i64) -> Self {
        Response::Value(v as f64)
    }
}

impl From<i32> for Response {
    fn from(v: i32) -> Self {
        Response::Value(f64::from(v))
    }
}

impl From<&str> for Response {
    fn from(s: &str) -> Self {
        Response::Category(s.to_string())
    }
}

impl From<String> for Response {
    fn from(s: String) -> Self {
        Response::Category(s)
    }
}

/// `ItemResponseSummary` — streaming accumulator of item-level response data.
///
/// Purpose
/// -------
/// Track, for one item, the cumulative weighted frequency of each observed
/// response value together with running weighted sums of the scored values,
/// so that frequency, proportion, mean, sample variance, and standard
/// deviation are derivable at any point during data collection.
///
/// Fields
/// ------
/// - `name`: `String`
///   Immutable item identity, opaque to the accumulator.
/// - `frequencies`: `BTreeMap<Response, f64>`
///   Cumulative weight recorded per normalized response key.
/// - `scores`: `BTreeMap<Response, f64>`
///   Explicit response → numeric score assignments; a numeric response with
///   no entry scores as its own value.
/// - `score_sum` / `score_sum_squares`: `f64`
///   Running Σ w·s and Σ w·s² over scored observations.
/// - `total_count`: `f64`
///   Total accumulated weight across all observed values.
/// - `first_unscored`: `Option<String>`
///   First categorical label observed without an assigned score; while set,
///   scored statistics are undefined and report the offending label.
///
/// Invariants
/// ----------
/// - All stored frequencies are strictly positive and sum to `total_count`.
/// - `score_sum` and `score_sum_squares` only ever receive finite
///   contributions; a failed increment leaves the accumulator untouched.
///
/// Notes
/// -----
/// - The accumulator is exclusively owned by its creator; it is not designed
///   for concurrent mutation. Read-only access after accumulation is safe
///   from multiple threads.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemResponseSummary {
    name: String,
    frequencies: BTreeMap<Response, f64>,
    scores: BTreeMap<Response, f64>,
    score_sum: f64,
    score_sum_squares: f64,
    total_count: f64,
    first_unscored: Option<String>,
}

impl ItemResponseSummary {
    /// Create an empty summary for the item identified by `name`.
    pub fn new(name: impl Into<String>) -> Self {
        ItemResponseSummary {
            name: name.into(),
            frequencies: BTreeMap::new(),
            scores: BTreeMap::new(),
            score_sum: 0.0,
            score_sum_squares: 0.0,
            total_count: 0.0,
            first_unscored: None,
        }
    }

    /// Record one observation of `value` with unit weight.
    ///
    /// Equivalent to `increment_by(value, 1.0)`; see
    /// [`ItemResponseSummary::increment_by`] for the full contract.
    pub fn increment<V: Into<Response>>(&mut self, value: V) -> SummaryResult<()> {
        self.increment_by(value, 1.0)
    }

    /// Record `weight` observations' worth of `value` in one call.
    ///
    /// Parameters
    /// ----------
    /// - `value`: `impl Into<Response>`
    ///   The observed response. Numeric values are keyed by f64 equality
    ///   (with `-0.0` collapsed into `+0.0`); strings are keyed by exact
    ///   equality.
    /// - `weight`: `f64`
    ///   Cumulative weight to add. Must be finite and strictly positive;
    ///   fractional weights are supported for pre-aggregated data.
    ///
    /// Returns
    /// -------
    /// `SummaryResult<()>`
    ///   - `Ok(())` once the frequency, total count, and (when the score is
    ///     resolvable) the running score sums have been updated.
    ///   - `Err(SummaryError)` when validation fails; the accumulator is
    ///     left unchanged in that case.
    ///
    /// Errors
    /// ------
    /// - `SummaryError::InvalidWeight(w)`
    ///   Returned when `weight` is NaN, ±∞, zero, or negative.
    /// - `SummaryError::NonFiniteResponse(v)`
    ///   Returned when a numeric response is NaN or ±∞.
    /// - `SummaryError::NonFiniteScore(s)`
    ///   Returned when the explicitly assigned score for `value` is not
    ///   finite (possible only if the score map was corrupted externally;
    ///   `set_score_at` rejects such scores up front).
    ///
    /// Notes
    /// -----
    /// - A categorical response with no assigned score is accepted: its
    ///   frequency and the total count accumulate, but the scored statistics
    ///   become undefined until the summary is rebuilt with scores assigned
    ///   before incrementing. This mirrors purely tabulation-style use where
    ///   only frequencies and proportions are read.
    /// - `increment_by(v, 4.0)` produces the same frequency, proportion,
    ///   mean, and variance as four `increment(v)` calls.
    pub fn increment_by<V: Into<Response>>(&mut self, value: V, weight: f64) -> SummaryResult<()> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(SummaryError::InvalidWeight(weight));
        }

        let key = value.into().normalized();
        if let Response::Value(v) = key {
            if !v.is_finite() {
                return Err(SummaryError::NonFiniteResponse(v));
            }
        }

        // Resolve the score before mutating so a failure leaves state intact.
        match self.resolve_score(&key)? {
            Some(score) => {
                self.score_sum += weight * score;
                self.score_sum_squares += weight * score * score;
            }
            None => {
                if self.first_unscored.is_none() {
                    if let Response::Category(label) = &key {
                        self.first_unscored = Some(label.clone());
                    }
                }
            }
        }

        *self.frequencies.entry(key).or_insert(0.0) += weight;
        self.total_count += weight;
        Ok(())
    }

    /// Assign or overwrite the numeric score for a response value.
    ///
    /// Scores apply only to increments recorded **after** the assignment;
    /// already-accumulated increments are not rescored. Callers that need
    /// retroactive consistency must set all scores before streaming data.
    ///
    /// Errors
    /// ------
    /// - `SummaryError::NonFiniteScore(score)`
    ///   Returned when `score` is NaN or ±∞.
    /// - `SummaryError::NonFiniteResponse(v)`
    ///   Returned when the keyed response itself is a non-finite number.
    pub fn set_score_at<V: Into<Response>>(&mut self, value: V, score: f64) -> SummaryResult<()> {
        if !score.is_finite() {
            return Err(SummaryError::NonFiniteScore(score));
        }
        let key = value.into().normalized();
        if let Response::Value(v) = key {
            if !v.is_finite() {
                return Err(SummaryError::NonFiniteResponse(v));
            }
        }
        self.scores.insert(key, score);
        Ok(())
    }

    /// Cumulative weight recorded for `value`; 0.0 when never observed.
    pub fn frequency_at<V: Into<Response>>(&self, value: V) -> f64 {
        let key = value.into().normalized();
        self.frequencies.get(&key).copied().unwrap_or(0.0)
    }

    /// Proportion of the total weight recorded for `value`.
    ///
    /// Errors
    /// ------
    /// - `SummaryError::NoObservations`
    ///   Returned when nothing has been recorded yet, so the ratio is a
    ///   division by zero.
    pub fn proportion_at<V: Into<Response>>(&self, value: V) -> SummaryResult<f64> {
        if self.total_count == 0.0 {
            return Err(SummaryError::NoObservations);
        }
        Ok(self.frequency_at(value) / self.total_count)
    }

    /// Weighted mean of the scored observations.
    ///
    /// Errors
    /// ------
    /// - `SummaryError::NoObservations`
    ///   Returned when the total weighted count is zero.
    /// - `SummaryError::UnscoredCategory(label)`
    ///   Returned when a categorical response was recorded without an
    ///   assigned score, so the running score sum is incomplete.
    pub fn mean(&self) -> SummaryResult<f64> {
        self.check_scored()?;
        if self.total_count == 0.0 {
            return Err(SummaryError::NoObservations);
        }
        Ok(self.score_sum / self.total_count)
    }

    /// Unbiased sample variance of the scored observations.
    ///
    /// Computed from the running weighted sums as
    /// `(Σ w·s² − n̄·mean²) / (n̄ − 1)` with `n̄` the total weighted count,
    /// so no individual observations need to be stored.
    ///
    /// Errors
    /// ------
    /// - `SummaryError::InsufficientObservations(n̄)`
    ///   Returned when the total weighted count is below 2, making the
    ///   `n̄ − 1` denominator non-positive.
    /// - `SummaryError::UnscoredCategory(label)`
    ///   Returned when an unscored categorical response was recorded.
    pub fn sample_variance(&self) -> SummaryResult<f64> {
        self.check_scored()?;
        if self.total_count < 2.0 {
            return Err(SummaryError::InsufficientObservations(self.total_count));
        }
        let mean = self.score_sum / self.total_count;
        Ok((self.score_sum_squares - self.total_count * mean * mean) / (self.total_count - 1.0))
    }

    /// Square root of [`ItemResponseSummary::sample_variance`].
    pub fn sample_standard_deviation(&self) -> SummaryResult<f64> {
        Ok(self.sample_variance()?.sqrt())
    }

    /// The item's identity, as supplied at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total accumulated weight across all observed values.
    pub fn total_count(&self) -> f64 {
        self.total_count
    }

    /// Observed response values with their cumulative weights, in key order.
    pub fn observed_values(&self) -> impl Iterator<Item = (&Response, f64)> {
        self.frequencies.iter().map(|(k, &w)| (k, w))
    }

    /// One formatted row for `value`: label, frequency, and proportion at
    /// four decimal places.
    ///
    /// Errors
    /// ------
    /// - `SummaryError::NoObservations`
    ///   Returned when nothing has been recorded yet.
    pub fn output_string_at<V: Into<Response>>(&self, value: V) -> SummaryResult<String> {
        if self.total_count == 0.0 {
            return Err(SummaryError::NoObservations);
        }
        let key = value.into().normalized();
        let freq = self.frequency_at(key.clone());
        let prop = freq / self.total_count;
        Ok(format!("{:>10} {:>12.4} {:>12.4}", key.to_string(), freq, prop))
    }

    /// Formatted frequency table over all observed values, one row per value
    /// in key order, followed by a total line.
    ///
    /// Errors
    /// ------
    /// - `SummaryError::NoObservations`
    ///   Returned when nothing has been recorded yet.
    pub fn frequency_table_string(&self) -> SummaryResult<String> {
        if self.total_count == 0.0 {
            return Err(SummaryError::NoObservations);
        }
        let mut out = String::new();
        out.push_str(&format!("{:>10} {:>12} {:>12}\n", "Value", "Frequency", "Proportion"));
        for (key, weight) in self.observed_values() {
            out.push_str(&format!(
                "{:>10} {:>12.4} {:>12.4}\n",
                key.to_string(),
                weight,
                weight / self.total_count
            ));
        }
        out.push_str(&format!("{:>10} {:>12.4}\n", "Total", self.total_count));
        Ok(out)
    }

    //
    // ---------- Private helpers ----------
    //

    /// Resolve the numeric score of `key`: the explicit assignment when one
    /// exists, else the numeric value itself, else `None` for an unscored
    /// category.
    fn resolve_score(&self, key: &Response) -> SummaryResult<Option<f64>> {
        if let Some(&score) = self.scores.get(key) {
            if !score.is_finite() {
                return Err(SummaryError::NonFiniteScore(score));
            }
            return Ok(Some(score));
        }
        match key {
            Response::Value(v) => Ok(Some(*v)),
            Response::Category(_) => Ok(None),
        }
    }

    /// Reject scored-statistic reads while unscored category weight exists.
    fn check_scored(&self) -> SummaryResult<()> {
        match &self.first_unscored {
            Some(label) => Err(SummaryError::UnscoredCategory(label.clone())),
            None => Ok(()),
        }
    }
}

impl fmt::Display for ItemResponseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (n = {:.4})", self.name, self.total_count)
    }
}
