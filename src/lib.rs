//! Skewed psychrometric (Mollier) charts
//!
//! `mollier` draws psychrometric charts on a sheared coordinate system. It
//! provides the coordinate algebra, the view scales and the iso-line families;
//! pixels are left to whatever backend implements [`Renderer`].
//!
//! # Core Concepts
//!
//! ## Skewed surfaces
//!
//! A [`SkewSurface`] shears data space by a fixed angle before mapping the
//! view limits onto the plotting area:
//!
//! ```text
//! DataToSurface = Shear ∘ Limits
//! DataToDevice  = DataToSurface ∘ SurfaceToDevice
//! ```
//!
//! The shear makes the y interval visible along the left edge differ from the
//! one along the right edge. Ticks, gridlines and spines follow both.
//!
//! ## Curves
//!
//! Iso-lines are [`ParametricCurve`]s and [`BoundedParametricCurve`]s: a
//! scalar function of one scan parameter plus a function reporting the scan
//! domain. They are resampled on every draw, so they always match the current
//! view and pressure. Samples outside physical validity are NaN and render as
//! gaps.
//!
//! ## Mollier charts
//!
//! [`MollierChart`] shears humidity ratio against enthalpy by the latent heat
//! of water and offers factories for the usual line families.
//!
//! # Examples
//!
//! ## Drawing a chart
//!
//! ```rust
//! use mollier::{Chart, CurveOptions, MollierChart, RecordingRenderer, Rgb};
//!
//! let mut chart = MollierChart::new(101_325.0).unwrap();
//! chart.draw_saturation_line(&CurveOptions::default());
//! let rh = chart.draw_const_rh_lines(&[0.2, 0.4, 0.6, 0.8], &CurveOptions::default().color(Rgb::RED));
//! assert_eq!(rh.len(), 4);
//!
//! let mut renderer = RecordingRenderer::new();
//! chart.draw(&mut renderer).unwrap();
//! assert!(renderer.paths().count() > 0);
//! ```
//!
//! ## Changing pressure
//!
//! ```rust
//! use mollier::{ChartError, MollierChart};
//!
//! let mut chart = MollierChart::new(101_325.0).unwrap();
//! chart.set_pressure(80_000.0).unwrap();
//! assert!(matches!(chart.set_pressure(0.0), Err(ChartError::InvalidPressure { .. })));
//! assert_eq!(chart.pressure(), 80_000.0);
//! ```
//!
//! ## Scales
//!
//! ```rust
//! use mollier::{Scale, scale::Linear};
//!
//! let mut scale = Linear::<f64, f64>::new(0.0, 100.0);
//! assert_eq!(scale.normalize(&50.0), 0.5);
//!
//! scale.zoom(2.0, Some(0.5));
//! assert_eq!(scale.domain(), (&25.0, &75.0));
//! ```
//!
//! # Features
//!
//! - `plot`: a [`Renderer`] for `plotters` drawing areas.

pub mod chart;
pub mod config;
pub mod curve;
pub mod error;
pub mod projection;
pub mod psychro;
pub mod render;
pub mod scale;
pub mod surface;
pub mod transform;

pub use chart::{Chart, CurveHandle, CurveOptions, MollierChart, MollierView, SkewChart};
pub use config::ChartConfig;
pub use curve::{AxisLine, BoundedParametricCurve, Curve, CurveKind, ParametricCurve};
pub use error::{ChartError, Result};
pub use num_traits::Float;
pub use projection::{MollierProjection, Projection, ProjectionRegistry, SkewYProjection};
pub use psychro::{Ashrae, HumidAir};
pub use render::{LineStyle, RecordingRenderer, Renderer, Rgb, TextStyle};
#[cfg(feature = "plot")]
pub use render::PlottersRenderer;
pub use scale::{Scale, Tick, TickIter};
pub use surface::{CurveHost, SkewSurface};
pub use transform::{Affine2D, PlotPoint, ScreenPoint, ScreenRect};
