//! Named chart factories.
//!
//! ```
//! use mollier::{ChartConfig, ProjectionRegistry};
//!
//! let registry = ProjectionRegistry::default();
//! let chart = registry.create("mollier", &ChartConfig::default()).unwrap();
//! assert_eq!(chart.name(), "mollier");
//! assert!(registry.create("polar", &ChartConfig::default()).is_err());
//! ```

use std::collections::BTreeMap;

use log::debug;

use crate::chart::{Chart, MollierChart, SkewChart};
use crate::config::ChartConfig;
use crate::error::{check_pressure, ChartError, Result};
use crate::surface::SkewSurface;

/// Builds one kind of chart from a configuration.
pub trait Projection {
    fn name(&self) -> &str;

    fn create(&self, config: &ChartConfig) -> Result<Box<dyn Chart>>;
}

/// The Mollier chart, optionally pinned to a pressure that overrides the
/// configured one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MollierProjection {
    pub pressure: Option<f64>,
}

impl MollierProjection {
    pub fn with_pressure(pressure: f64) -> Result<Self> {
        Ok(Self {
            pressure: Some(check_pressure(pressure)?),
        })
    }
}

impl Projection for MollierProjection {
    fn name(&self) -> &str {
        "mollier"
    }

    fn create(&self, config: &ChartConfig) -> Result<Box<dyn Chart>> {
        let config = ChartConfig {
            pressure: self.pressure.unwrap_or(config.pressure),
            ..config.clone()
        };
        Ok(Box::new(MollierChart::from_config(&config)?))
    }
}

/// A chart sheared by a fixed angle in degrees, for caller-supplied curves.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SkewYProjection {
    pub skew_deg: f64,
}

impl Projection for SkewYProjection {
    fn name(&self) -> &str {
        "skewy"
    }

    fn create(&self, config: &ChartConfig) -> Result<Box<dyn Chart>> {
        config.validate()?;
        let [x0, x1] = config.x_limits;
        let [y0, y1] = config.y_limits;
        let surface = SkewSurface::new(
            self.skew_deg.to_radians(),
            (x0, x1),
            (y0, y1),
            config.device,
        )?;
        let mut chart = SkewChart::new(surface);
        chart.frame_mut().style.grid = config.grid;
        Ok(Box::new(chart))
    }
}

/// Projections by name.
pub struct ProjectionRegistry {
    projections: BTreeMap<String, Box<dyn Projection>>,
}

impl Default for ProjectionRegistry {
    /// Registry holding `"mollier"` and an unskewed `"skewy"`.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(MollierProjection::default());
        registry.register(SkewYProjection::default());
        registry
    }
}

impl ProjectionRegistry {
    pub fn empty() -> Self {
        Self {
            projections: BTreeMap::new(),
        }
    }

    /// Registers `projection` under its name, returning the one it replaces.
    pub fn register(
        &mut self,
        projection: impl Projection + 'static,
    ) -> Option<Box<dyn Projection>> {
        let name = projection.name().to_owned();
        debug!("registering projection {name}");
        self.projections.insert(name, Box::new(projection))
    }

    pub fn get(&self, name: &str) -> Option<&dyn Projection> {
        self.projections.get(name).map(|p| p.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.projections.keys().map(String::as_str)
    }

    pub fn create(&self, name: &str, config: &ChartConfig) -> Result<Box<dyn Chart>> {
        let projection = self.get(name).ok_or_else(|| ChartError::UnknownProjection {
            name: name.to_owned(),
        })?;
        debug!("creating {name} chart");
        projection.create(config)
    }
}
