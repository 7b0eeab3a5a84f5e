//! Chart configuration.

use serde::{Deserialize, Serialize};

use crate::curve::DEFAULT_SAMPLE_POINTS;
use crate::error::{ChartError, Result};
use crate::psychro::STANDARD_PRESSURE;
use crate::transform::ScreenRect;

/// Everything needed to build a chart, loadable from JSON.
///
/// Missing fields take their defaults:
///
/// ```
/// let config = mollier::ChartConfig::from_json(r#"{ "pressure": 90000 }"#).unwrap();
/// assert_eq!(config.pressure, 90_000.0);
/// assert_eq!(config.sample_points, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Barometric pressure, Pa.
    pub pressure: f64,
    /// Samples per parametric curve.
    pub sample_points: usize,
    /// Samples per isotherm; two suffice since isotherms are straight.
    pub isotherm_points: usize,
    /// Humidity ratio view limits, kg/kg.
    pub x_limits: [f64; 2],
    /// Sheared enthalpy view limits, J/kg.
    pub y_limits: [f64; 2],
    pub device: ScreenRect<f64>,
    pub grid: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            pressure: STANDARD_PRESSURE,
            sample_points: DEFAULT_SAMPLE_POINTS,
            isotherm_points: 2,
            x_limits: [0.0, 0.04],
            y_limits: [-1e4, 5e4],
            device: ScreenRect {
                x: 0.0,
                y: 0.0,
                width: 640.0,
                height: 480.0,
            },
            grid: true,
        }
    }
}

fn invalid(message: String) -> ChartError {
    ChartError::InvalidConfig { message }
}

impl ChartConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        crate::error::check_pressure(self.pressure)?;
        if self.sample_points == 0 {
            return Err(invalid("sample_points must be at least 1".into()));
        }
        if self.isotherm_points == 0 {
            return Err(invalid("isotherm_points must be at least 1".into()));
        }
        for (axis, [lo, hi]) in [("x", self.x_limits), ("y", self.y_limits)] {
            if !(lo.is_finite() && hi.is_finite()) || lo == hi {
                return Err(invalid(format!("{axis}_limits [{lo}, {hi}] are degenerate")));
            }
        }
        if self.device.is_empty() {
            return Err(invalid(format!(
                "device {}x{} is empty",
                self.device.width, self.device.height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ChartConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.isotherm_points, 2);
        assert_eq!(config.y_limits, [-1e4, 5e4]);
    }

    #[test]
    fn json_overrides_and_defaults() {
        let config = ChartConfig::from_json(
            r#"{ "x_limits": [0.0, 0.02], "grid": false, "device": { "x": 0, "y": 0, "width": 320, "height": 240 } }"#,
        )
        .unwrap();
        assert_eq!(config.x_limits, [0.0, 0.02]);
        assert!(!config.grid);
        assert_eq!(config.device.width, 320.0);
        assert_eq!(config.pressure, STANDARD_PRESSURE);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            ChartConfig::from_json(r#"{ "pressure": -5 }"#),
            Err(ChartError::InvalidPressure { .. })
        ));
        assert!(matches!(
            ChartConfig::from_json(r#"{ "sample_points": 0 }"#),
            Err(ChartError::InvalidConfig { .. })
        ));
        assert!(matches!(
            ChartConfig::from_json(r#"{ "y_limits": [1, 1] }"#),
            Err(ChartError::InvalidConfig { .. })
        ));
        assert!(matches!(
            ChartConfig::from_json("{ not json"),
            Err(ChartError::Json(_))
        ));
    }

    #[test]
    fn json_round_trip_keeps_values() {
        let config = ChartConfig {
            pressure: 75_000.0,
            ..ChartConfig::default()
        };
        let back = ChartConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }
}
