//! Error types for chart construction and rendering.
//!
//! Only domain-validation failures are errors. Physically invalid samples
//! (super-saturated states, temperatures outside the property correlations)
//! are NaN points and show up as gaps in the rendered curve.

use thiserror::Error;

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, ChartError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChartError {
    /// Pressure must be strictly positive and finite.
    #[error("invalid pressure: {value} Pa (must be > 0)")]
    InvalidPressure { value: f64 },

    /// View limits that are non-finite or have zero span.
    #[error("invalid limits: {message}")]
    InvalidLimits { message: String },

    #[error("invalid config: {message}")]
    InvalidConfig { message: String },

    #[error("unknown projection: {name}")]
    UnknownProjection { name: String },

    /// The rendering backend failed to draw.
    #[error("render failed: {message}")]
    Render { message: String },

    #[error("config parse failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Accepts finite, strictly positive pressures.
pub(crate) fn check_pressure(value: f64) -> Result<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ChartError::InvalidPressure { value })
    }
}
