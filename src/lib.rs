//! rust_psychometrics — classical test-theory statistics with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the reliability and item-analysis routines to Python via the
//! `_rust_psychometrics` extension module. When the `python-bindings`
//! feature is enabled, this module defines the Python-facing classes and
//! submodules used by the `rust_psychometrics` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`reliability` and `measurement`) as
//!   the public crate surface.
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for the
//!   `_rust_psychometrics` Python extension.
//! - Create and register Python submodules (`reliability`, `measurement`)
//!   under `rust_psychometrics` so that dot-notation imports work as
//!   expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue, input validation, and error mapping.
//! - When `python-bindings` is enabled, the Python-visible types mirror the
//!   invariants and signatures of their Rust counterparts
//!   (e.g. `GuttmanLambda`, `ItemSummary`).
//!
//! Conventions
//! -----------
//! - Python-exposed classes live under `_rust_psychometrics.<submodule>`
//!   and are typically wrapped by thin pure-Python facades in the top-level
//!   `rust_psychometrics` package.
//! - Errors from core Rust code are propagated as rich error types
//!   internally and converted to `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should usually depend directly on the inner modules
//!   and can ignore the PyO3 items guarded by the `python-bindings`
//!   feature.
//! - External users are expected to interact with either the safe Rust
//!   APIs or the pure-Python wrappers; the PyO3 plumbing is considered
//!   internal.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by the integration tests under `tests/`.
//! - Smoke tests for the PyO3 bindings verify from Python that classes can
//!   be constructed, called, and round-tripped correctly.

pub mod measurement;
pub mod reliability;

#[cfg(feature = "python-bindings")]
use ndarray::Array2;

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray2;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    measurement::{ItemResponseSummary, Response},
    reliability::{CovarianceMatrix, GuttmanLambda2},
};

/// Convert a Python object into a normalized [`Response`] key.
///
/// Accepts floats, ints (via float extraction), and strings, matching the
/// observation types the Rust accumulator keys on.
#[cfg(feature = "python-bindings")]
fn extract_response(value: &Bound<'_, PyAny>) -> PyResult<Response> {
    if let Ok(v) = value.extract::<f64>() {
        return Ok(Response::Value(v));
    }
    if let Ok(s) = value.extract::<String>() {
        return Ok(Response::Category(s));
    }
    Err(PyTypeError::new_err("expected a float, int, or str response value"))
}

/// Convert a 2-D numpy array into an owned `Array2<f64>`.
#[cfg(feature = "python-bindings")]
fn extract_f64_matrix(raw: &Bound<'_, PyAny>) -> PyResult<Array2<f64>> {
    let arr: PyReadonlyArray2<f64> =
        raw.extract().map_err(|_| PyTypeError::new_err("expected a 2-D numpy.ndarray of float64"))?;
    Ok(arr.as_array().to_owned())
}

/// GuttmanLambda — Python-facing wrapper for the Lambda-2 estimator.
///
/// Purpose
/// -------
/// Expose [`GuttmanLambda2`] to Python callers: construct from a 2-D
/// covariance array (or raw scores via `GuttmanLambda.from_scores`) and
/// read the coefficient and item-deleted sequence.
///
/// Notes
/// -----
/// - This type is primarily intended to be used from Python; native Rust
///   code should prefer [`GuttmanLambda2`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_psychometrics.reliability")]
pub struct GuttmanLambda {
    /// Underlying Rust estimator.
    inner: GuttmanLambda2,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl GuttmanLambda {
    /// Build the estimator from a pre-built covariance matrix.
    #[new]
    #[pyo3(text_signature = "(matrix, /)")]
    pub fn new(matrix: &Bound<'_, PyAny>) -> PyResult<Self> {
        let cov = extract_f64_matrix(matrix)?;
        let inner = GuttmanLambda2::new(CovarianceMatrix::new(cov)?)?;
        Ok(GuttmanLambda { inner })
    }

    /// Build the estimator from a raw respondent-by-item score matrix.
    #[staticmethod]
    #[pyo3(text_signature = "(scores, /)")]
    pub fn from_scores(scores: &Bound<'_, PyAny>) -> PyResult<Self> {
        let raw = extract_f64_matrix(scores)?;
        let inner = GuttmanLambda2::from_scores(&raw)?;
        Ok(GuttmanLambda { inner })
    }

    /// Guttman's Lambda-2 for the full item set.
    #[getter]
    pub fn value(&self) -> f64 {
        self.inner.value()
    }

    /// Number of items n.
    #[getter]
    pub fn number_of_items(&self) -> usize {
        self.inner.number_of_items()
    }

    /// Lambda-2 recomputed with each item excluded in turn.
    pub fn item_deleted_reliability(&self) -> PyResult<Vec<f64>> {
        Ok(self.inner.item_deleted_reliability()?)
    }
}

/// ItemSummary — Python-facing wrapper for the item response accumulator.
///
/// Purpose
/// -------
/// Expose [`ItemResponseSummary`] to Python callers: stream observations
/// via `increment`, optionally assign category scores, and read frequency,
/// proportion, and moment statistics.
///
/// Notes
/// -----
/// - This type is primarily intended to be used from Python; native Rust
///   code should prefer [`ItemResponseSummary`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_psychometrics.measurement", unsendable)]
pub struct ItemSummary {
    /// Underlying Rust accumulator.
    inner: ItemResponseSummary,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl ItemSummary {
    /// Create an empty summary for the item identified by `name`.
    #[new]
    #[pyo3(text_signature = "(name, /)")]
    pub fn new(name: String) -> Self {
        ItemSummary { inner: ItemResponseSummary::new(name) }
    }

    /// Record `weight` observations' worth of `value`.
    #[pyo3(signature = (value, weight = 1.0), text_signature = "(self, value, /, weight=1.0)")]
    pub fn increment(&mut self, value: &Bound<'_, PyAny>, weight: f64) -> PyResult<()> {
        let response = extract_response(value)?;
        Ok(self.inner.increment_by(response, weight)?)
    }

    /// Assign or overwrite the numeric score for a response value.
    #[pyo3(text_signature = "(self, value, score, /)")]
    pub fn set_score_at(&mut self, value: &Bound<'_, PyAny>, score: f64) -> PyResult<()> {
        let response = extract_response(value)?;
        Ok(self.inner.set_score_at(response, score)?)
    }

    /// Cumulative weight recorded for `value`; 0.0 when never observed.
    pub fn frequency_at(&self, value: &Bound<'_, PyAny>) -> PyResult<f64> {
        Ok(self.inner.frequency_at(extract_response(value)?))
    }

    /// Proportion of the total weight recorded for `value`.
    pub fn proportion_at(&self, value: &Bound<'_, PyAny>) -> PyResult<f64> {
        let response = extract_response(value)?;
        Ok(self.inner.proportion_at(response)?)
    }

    /// Weighted mean of the scored observations.
    pub fn mean(&self) -> PyResult<f64> {
        Ok(self.inner.mean()?)
    }

    /// Unbiased sample variance of the scored observations.
    pub fn sample_variance(&self) -> PyResult<f64> {
        Ok(self.inner.sample_variance()?)
    }

    /// Square root of the sample variance.
    pub fn sample_standard_deviation(&self) -> PyResult<f64> {
        Ok(self.inner.sample_standard_deviation()?)
    }

    /// The item's identity, as supplied at construction.
    #[getter]
    pub fn name(&self) -> String {
        self.inner.name().to_string()
    }

    /// Total accumulated weight across all observed values.
    #[getter]
    pub fn total_count(&self) -> f64 {
        self.inner.total_count()
    }
}

/// _rust_psychometrics — PyO3 module initializer for the Python extension.
///
/// Creates the `reliability` and `measurement` submodules, attaches them to
/// the parent `_rust_psychometrics` module, and registers them in
/// `sys.modules` so dotted imports work from Python. Invoked automatically
/// on import of the compiled extension.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_psychometrics<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let reliability_mod = PyModule::new(_py, "reliability")?;
    let measurement_mod = PyModule::new(_py, "measurement")?;
    reliability_submodule(_py, m, &reliability_mod)?;
    measurement_submodule(_py, m, &measurement_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_psychometrics.reliability", reliability_mod)?;

    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_psychometrics.measurement", measurement_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn reliability_submodule<'py>(
    _py: Python, rust_psychometrics: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<GuttmanLambda>()?;
    rust_psychometrics.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn measurement_submodule<'py>(
    _py: Python, rust_psychometrics: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<ItemSummary>()?;
    rust_psychometrics.add_submodule(m)?;
    Ok(())
}
