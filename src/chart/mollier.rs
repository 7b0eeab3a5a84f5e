//! Psychrometric (Mollier) chart.
//!
//! Humidity ratio runs along x and enthalpy along y, sheared so that lines of
//! constant enthalpy slope down at the latent heat of vaporization of water at
//! 0 °C. Isotherms then come out nearly horizontal, the way Mollier diagrams
//! are usually read.
//!
//! Every pressure-dependent curve reads [`MollierView::pressure`] when it is
//! drawn, so [`MollierChart::set_pressure`] takes effect on the next draw
//! without touching the curves.

use log::debug;

use crate::config::ChartConfig;
use crate::curve::{AxisLine, BoundedParametricCurve, Curve, ParametricCurve};
use crate::error::{check_pressure, Result};
use crate::psychro::{Ashrae, HumidAir, SaturationTable, CP_DRY_AIR, H_EVAP_H2O_0_CELSIUS};
use crate::render::{LineStyle, Renderer, Rgb};
use crate::surface::{CurveHost, Frame, SkewSurface};

use super::{draw_curves, push_curve, Chart, CurveHandle};

/// Z-order of the saturation line, just above the default of other curves.
pub const SATURATION_Z_ORDER: f64 = 2.01;

/// `-atan(2.501e6)`: the shear that makes `y = h - 2.501e6·w`.
pub fn mollier_skew_angle() -> f64 {
    -H_EVAP_H2O_0_CELSIUS.atan()
}

/// Per-call overrides for the curve factories.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CurveOptions {
    pub color: Option<Rgb>,
    pub width: Option<f64>,
    pub z_order: Option<f64>,
    pub sample_points: Option<usize>,
    /// Lower humidity ratio limit of bounded curves; 0 when absent.
    pub x_min: Option<f64>,
    /// Upper humidity ratio limit of bounded curves; the saturation point when absent.
    pub x_max: Option<f64>,
}

impl CurveOptions {
    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn z_order(mut self, z_order: f64) -> Self {
        self.z_order = Some(z_order);
        self
    }

    pub fn sample_points(mut self, n: usize) -> Self {
        self.sample_points = Some(n);
        self
    }

    pub fn x_min(mut self, x_min: f64) -> Self {
        self.x_min = Some(x_min);
        self
    }

    pub fn x_max(mut self, x_max: f64) -> Self {
        self.x_max = Some(x_max);
        self
    }

    fn line_style(&self, default_z_order: f64) -> LineStyle {
        let base = LineStyle::default();
        LineStyle {
            color: self.color.unwrap_or(base.color),
            width: self.width.unwrap_or(base.width),
            z_order: self.z_order.unwrap_or(default_z_order),
        }
    }
}

/// The state Mollier curves are drawn against.
pub struct MollierView {
    surface: SkewSurface,
    pressure: f64,
    air: Box<dyn HumidAir>,
}

impl MollierView {
    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    pub fn air(&self) -> &dyn HumidAir {
        self.air.as_ref()
    }

    /// Temperature window matching the visible enthalpy range.
    fn temperature_window(&self) -> (f64, f64) {
        let (lower, upper) = self.surface.y_bound();
        (lower / CP_DRY_AIR, upper / CP_DRY_AIR)
    }
}

impl CurveHost for MollierView {
    fn surface(&self) -> &SkewSurface {
        &self.surface
    }
}

type MollierCurve = Box<dyn Curve<MollierView>>;

pub struct MollierChart {
    view: MollierView,
    frame: Frame,
    curves: Vec<MollierCurve>,
    sample_points: usize,
    isotherm_points: usize,
}

impl MollierChart {
    /// Chart with the default view at `pressure` Pa.
    pub fn new(pressure: f64) -> Result<Self> {
        Self::from_config(&ChartConfig {
            pressure,
            ..ChartConfig::default()
        })
    }

    pub fn from_config(config: &ChartConfig) -> Result<Self> {
        config.validate()?;
        let [x0, x1] = config.x_limits;
        let [y0, y1] = config.y_limits;
        let surface = SkewSurface::new(mollier_skew_angle(), (x0, x1), (y0, y1), config.device)?;

        let mut frame = Frame::default();
        frame.style.grid = config.grid;

        debug!("mollier chart at {} Pa", config.pressure);
        Ok(Self {
            view: MollierView {
                surface,
                pressure: config.pressure,
                air: Box::new(Ashrae),
            },
            frame,
            curves: Vec::new(),
            sample_points: config.sample_points,
            isotherm_points: config.isotherm_points,
        })
    }

    /// Replaces the humid-air property implementation.
    pub fn with_humid_air(mut self, air: impl HumidAir + 'static) -> Self {
        self.view.air = Box::new(air);
        self
    }

    pub fn pressure(&self) -> f64 {
        self.view.pressure
    }

    /// Sets the barometric pressure. Rejects values that are not finite and
    /// strictly positive, leaving the current pressure unchanged.
    pub fn set_pressure(&mut self, pressure: f64) -> Result<()> {
        self.view.pressure = check_pressure(pressure)?;
        debug!("mollier chart pressure set to {pressure} Pa");
        Ok(())
    }

    pub fn view(&self) -> &MollierView {
        &self.view
    }

    pub fn curve(&self, handle: CurveHandle) -> Option<&dyn Curve<MollierView>> {
        self.curves.get(handle.index()).map(|c| c.as_ref())
    }

    pub fn curves(&self) -> impl Iterator<Item = &dyn Curve<MollierView>> {
        self.curves.iter().map(|c| c.as_ref())
    }

    /// Resamples every curve against the current view without rendering.
    pub fn recalc_curves(&mut self) {
        for curve in &mut self.curves {
            curve.recalc(&self.view);
        }
    }

    fn push(&mut self, curve: impl Curve<MollierView> + 'static) -> CurveHandle {
        push_curve(&mut self.curves, Box::new(curve))
    }

    fn sample_count(&self, options: &CurveOptions) -> usize {
        options.sample_points.unwrap_or(self.sample_points)
    }

    /// Saturation curve (relative humidity 1) over the visible temperature window.
    pub fn draw_saturation_line(&mut self, options: &CurveOptions) -> CurveHandle {
        let curve = ParametricCurve::<MollierView>::new(
            None,
            |t, _, view| {
                let p = view.pressure;
                (view.air.sat_hum_ratio(t, p), view.air.sat_air_enthalpy(t, p))
            },
            MollierView::temperature_window,
        )
        .with_name("saturation")
        .with_sample_points(self.sample_count(options))
        .with_style(options.line_style(SATURATION_Z_ORDER));
        self.push(curve)
    }

    /// One constant relative humidity curve per value in `rel_hums` (0 to 1).
    pub fn draw_const_rh_lines(&mut self, rel_hums: &[f64], options: &CurveOptions) -> Vec<CurveHandle> {
        let style = options.line_style(LineStyle::default().z_order);
        rel_hums
            .iter()
            .map(|&rh| {
                let curve = ParametricCurve::<MollierView>::new(
                    Some(rh),
                    |t, rh, view| {
                        let w = view
                            .air
                            .hum_ratio_from_rel_hum(t, rh.unwrap_or(f64::NAN), view.pressure);
                        (w, view.air.moist_air_enthalpy(t, w))
                    },
                    MollierView::temperature_window,
                )
                .with_name(format!("rh={rh}"))
                .with_sample_points(self.sample_count(options))
                .with_style(style);
                self.push(curve)
            })
            .collect()
    }

    /// One isotherm per dry-bulb temperature in `temps` (°C), from
    /// `x_min` (default 0) to `x_max` (default the saturation humidity ratio).
    pub fn draw_const_tdb_lines(&mut self, temps: &[f64], options: &CurveOptions) -> Vec<CurveHandle> {
        let style = options.line_style(LineStyle::default().z_order);
        let (x_min, x_max) = (options.x_min, options.x_max);
        let n = options.sample_points.unwrap_or(self.isotherm_points);
        temps
            .iter()
            .map(|&tdb| {
                let curve = BoundedParametricCurve::<MollierView>::with_limit_fn(
                    Some(tdb),
                    |w, t, view| view.air.moist_air_enthalpy(t.unwrap_or(f64::NAN), w),
                    move |view| {
                        let max = x_max.unwrap_or_else(|| view.air.sat_hum_ratio(tdb, view.pressure));
                        (Some(x_min.unwrap_or(0.0)), Some(max))
                    },
                )
                .with_name(format!("tdb={tdb}"))
                .with_sample_points(n)
                .with_style(style);
                self.push(curve)
            })
            .collect()
    }

    /// One constant density curve per value in `densities` (kg/m³).
    ///
    /// States beyond saturation come out as NaN. Without `x_max` the curve
    /// ends where it meets the saturation curve; a density outside the
    /// tabulated saturation range leaves the upper end at the view edge.
    pub fn draw_const_density_lines(
        &mut self,
        densities: &[f64],
        options: &CurveOptions,
    ) -> Vec<CurveHandle> {
        let style = options.line_style(LineStyle::default().z_order);
        let (x_min, x_max) = (options.x_min, options.x_max);
        densities
            .iter()
            .map(|&rho| {
                let curve = BoundedParametricCurve::<MollierView>::with_limit_fn(
                    Some(rho),
                    |w, rho, view| {
                        let rho = rho.unwrap_or(f64::NAN);
                        let p = view.pressure;
                        let volume = (1.0 + w) / rho;
                        let t = view.air.t_dry_bulb_from_volume_and_hum_ratio(volume, w, p);
                        if w <= view.air.sat_hum_ratio(t, p) {
                            view.air.moist_air_enthalpy(t, w)
                        } else {
                            f64::NAN
                        }
                    },
                    move |view| {
                        let max = x_max.or_else(|| {
                            SaturationTable::new(
                                view.air(),
                                view.pressure,
                                SaturationTable::DEFAULT_POINTS,
                            )
                            .hum_ratio_at_density(rho)
                        });
                        (Some(x_min.unwrap_or(0.0)), max)
                    },
                )
                .with_name(format!("rho={rho}"))
                .with_sample_points(self.sample_count(options))
                .with_style(style);
                self.push(curve)
            })
            .collect()
    }

    /// Constant enthalpy lines (J/kg), one per value.
    pub fn draw_const_h_lines(&mut self, enthalpies: &[f64], options: &CurveOptions) -> Vec<CurveHandle> {
        let style = options.line_style(LineStyle::default().z_order);
        enthalpies
            .iter()
            .map(|&h| {
                let line = AxisLine::horizontal(h)
                    .with_name(format!("h={h}"))
                    .with_style(style);
                self.push(line)
            })
            .collect()
    }

    /// Constant humidity ratio lines (kg/kg), one per value.
    pub fn draw_const_w_lines(&mut self, hum_ratios: &[f64], options: &CurveOptions) -> Vec<CurveHandle> {
        let style = options.line_style(LineStyle::default().z_order);
        hum_ratios
            .iter()
            .map(|&w| {
                let line = AxisLine::vertical(w)
                    .with_name(format!("w={w}"))
                    .with_style(style);
                self.push(line)
            })
            .collect()
    }
}

impl Chart for MollierChart {
    fn name(&self) -> &str {
        "mollier"
    }

    fn surface(&self) -> &SkewSurface {
        &self.view.surface
    }

    fn surface_mut(&mut self) -> &mut SkewSurface {
        &mut self.view.surface
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn curve_count(&self) -> usize {
        self.curves.len()
    }

    fn draw(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        self.frame.draw(&self.view.surface, renderer)?;
        draw_curves(&self.view, &mut self.curves, renderer)
    }

    fn as_mollier_mut(&mut self) -> Option<&mut MollierChart> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveKind;
    use crate::psychro::STANDARD_PRESSURE;
    use crate::render::RecordingRenderer;
    use approx::assert_relative_eq;

    fn chart() -> MollierChart {
        MollierChart::new(STANDARD_PRESSURE).unwrap()
    }

    #[test]
    fn skew_matches_latent_heat() {
        let chart = chart();
        assert_relative_eq!(chart.surface().shear().b, -2.501e6, max_relative = 1e-6);
        let [a, _, c, d, e, f] = chart.surface().shear().to_values();
        assert_eq!((a, c, d, e, f), (1.0, 0.0, 1.0, 0.0, 0.0));
    }

    #[test]
    fn default_view_intervals() {
        let chart = chart();
        let (rl, ru) = chart.surface().right_interval();
        assert_relative_eq!(rl, 90_040.0, max_relative = 1e-6);
        assert_relative_eq!(ru, 150_040.0, max_relative = 1e-6);
        assert_eq!(chart.surface().view_interval().0, -1e4);
    }

    #[test]
    fn pressure_is_validated() {
        let mut chart = chart();
        assert!(chart.set_pressure(0.0).is_err());
        assert!(chart.set_pressure(-1.0).is_err());
        assert_eq!(chart.pressure(), STANDARD_PRESSURE);
        chart.set_pressure(80_000.0).unwrap();
        assert_eq!(chart.pressure(), 80_000.0);
        assert!(MollierChart::new(0.0).is_err());
    }

    #[test]
    fn isotherm_stops_at_saturation() {
        let mut chart = chart();
        let handle = chart.draw_const_tdb_lines(&[10.0], &CurveOptions::default())[0];
        chart.recalc_curves();

        let curve = chart.curve(handle).unwrap();
        assert_eq!(curve.kind(), CurveKind::Bounded);
        let points = curve.points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].x, 0.0);
        let sat = Ashrae.sat_hum_ratio(10.0, STANDARD_PRESSURE);
        assert_relative_eq!(points[1].x, sat, max_relative = 1e-12);
        assert_relative_eq!(points[0].y, 10.0 * 1006.0, max_relative = 1e-4);
    }

    #[test]
    fn isotherm_limits_can_be_overridden() {
        let mut chart = chart();
        let handle =
            chart.draw_const_tdb_lines(&[20.0], &CurveOptions::default().x_min(0.002).x_max(0.005))[0];
        chart.recalc_curves();

        let points = chart.curve(handle).unwrap().points();
        assert_eq!((points[0].x, points[1].x), (0.002, 0.005));
    }

    #[test]
    fn density_line_ends_on_saturation() {
        let mut chart = chart();
        let handle = chart.draw_const_density_lines(&[1.2], &CurveOptions::default())[0];
        chart.recalc_curves();

        let points = chart.curve(handle).unwrap().points();
        assert_eq!(points.len(), 100);
        assert_eq!(points[0].x, 0.0);
        assert!(points.iter().all(|p| p.x <= 0.04));
        assert!(points.iter().filter(|p| p.y.is_finite()).count() > 90);
    }

    #[test]
    fn density_beyond_saturation_is_nan() {
        let mut chart = chart();
        // Far beyond the saturation humidity ratio of any state at this density.
        let handle =
            chart.draw_const_density_lines(&[1.2], &CurveOptions::default().x_min(0.03).x_max(0.04))[0];
        chart.recalc_curves();

        assert!(chart
            .curve(handle)
            .unwrap()
            .points()
            .iter()
            .all(|p| p.y.is_nan()));
    }

    #[test]
    fn saturation_line_uses_visible_temperature_window() {
        let mut chart = chart();
        let handle = chart.draw_saturation_line(&CurveOptions::default().sample_points(3));
        chart.recalc_curves();

        let curve = chart.curve(handle).unwrap();
        assert_eq!(curve.style().z_order, SATURATION_Z_ORDER);
        assert_eq!(curve.const_value(), None);
        let first = curve.points()[0];
        let t = -1e4 / CP_DRY_AIR;
        assert_relative_eq!(first.x, Ashrae.sat_hum_ratio(t, STANDARD_PRESSURE), max_relative = 1e-12);
    }

    #[test]
    fn draw_renders_frame_and_curves() {
        let mut chart = chart();
        chart.frame_mut().style.labels = false;
        chart.draw_const_rh_lines(&[0.5], &CurveOptions::default().color(Rgb::RED));
        chart.draw_const_h_lines(&[2e4], &CurveOptions::default());
        let mut renderer = RecordingRenderer::new();

        chart.draw(&mut renderer).unwrap();

        assert!(renderer.paths().any(|(_, s)| s.color == Rgb::RED));
        assert_eq!(renderer.texts().count(), 0);
        assert!(chart.curves().all(|c| c.device_path().is_some()));
    }
}
