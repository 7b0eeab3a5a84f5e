//! Constant-value curve families.
//!
//! An iso-line is a function of one scan parameter: temperature for a
//! relative-humidity line, humidity ratio for an isotherm. The curve stores
//! that function and a bound function and resamples itself on every draw,
//! so it always matches the current view, pressure and shear. Nothing is
//! cached between draws except the sample buffer, which is replaced whole.
//!
//! Calc functions are scalar and partial: outside the physically valid
//! domain they return NaN, and the NaN samples render as gaps.

pub mod reference;

pub use reference::{AxisLine, Orientation};

use log::trace;

use crate::error::Result;
use crate::render::{draw_polyline, LineStyle, Renderer};
use crate::surface::CurveHost;
use crate::transform::{PlotPoint, ScreenPoint};

/// Sample count used when a curve does not specify one.
pub const DEFAULT_SAMPLE_POINTS: usize = 100;

/// `(t, const_value, host) → (x, y)`.
pub type CalcFn<H> = Box<dyn Fn(f64, Option<f64>, &H) -> (f64, f64)>;

/// `(x, const_value, host) → y`, for curves scanned along x.
pub type ScanFn<H> = Box<dyn Fn(f64, Option<f64>, &H) -> f64>;

/// Current `(t_min, t_max)` scan domain.
pub type BoundFn<H> = Box<dyn Fn(&H) -> (f64, f64)>;

/// Explicit `(min, max)` clamp; `None` leaves that side unconstrained.
pub type LimitFn<H> = Box<dyn Fn(&H) -> (Option<f64>, Option<f64>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// Scan domain comes from a bound function.
    Parametric,
    /// Scanned along the visible x interval, clamped to explicit limits.
    Bounded,
    /// Axis-aligned reference line, independent of pressure.
    Reference,
}

/// A drawable member of a chart's curve collection.
pub trait Curve<H: CurveHost + ?Sized> {
    fn name(&self) -> &str;

    fn kind(&self) -> CurveKind;

    /// The family parameter; `None` for the saturation curve.
    fn const_value(&self) -> Option<f64>;

    fn sample_points(&self) -> usize;

    /// Data-space samples from the last recalculation.
    fn points(&self) -> &[PlotPoint<f64>];

    fn style(&self) -> &LineStyle;

    fn set_style(&mut self, style: LineStyle);

    /// Device path of the last draw; cleared at the start of every draw.
    fn device_path(&self) -> Option<&[ScreenPoint<f64>]>;

    /// Resamples against the current state of `host`.
    fn recalc(&mut self, host: &H);

    fn draw(&mut self, host: &H, renderer: &mut dyn Renderer) -> Result<()>;
}

/// `n` evenly spaced values over `[start, end]`, both ends included.
///
/// Each value is computed from its index, and the last one is exactly `end`.
pub fn linspace(start: f64, end: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = if n > 1 {
        (end - start) / (n - 1) as f64
    } else {
        0.0
    };
    (0..n).map(move |i| {
        if n > 1 && i == n - 1 {
            end
        } else {
            start + step * i as f64
        }
    })
}

/// State shared by the sampled curve kinds.
struct Samples {
    name: String,
    const_value: Option<f64>,
    sample_points: usize,
    points: Vec<PlotPoint<f64>>,
    device_path: Option<Vec<ScreenPoint<f64>>>,
    style: LineStyle,
}

impl Samples {
    fn new(name: String, const_value: Option<f64>) -> Self {
        Self {
            name,
            const_value,
            sample_points: DEFAULT_SAMPLE_POINTS,
            points: Vec::new(),
            device_path: None,
            style: LineStyle::default(),
        }
    }

    fn resample(&mut self, (t_min, t_max): (f64, f64), f: impl Fn(f64) -> (f64, f64)) {
        trace!(
            "recalc {}: {} samples over [{t_min}, {t_max}]",
            self.name,
            self.sample_points
        );
        self.points = linspace(t_min, t_max, self.sample_points)
            .map(|t| PlotPoint::from(f(t)))
            .collect();
    }

    fn render<H: CurveHost + ?Sized>(&mut self, host: &H, renderer: &mut dyn Renderer) -> Result<()> {
        let to_device = host.surface().data_to_device();
        let path: Vec<ScreenPoint<f64>> = self
            .points
            .iter()
            .map(|p| to_device.transform_to_screen(*p))
            .collect();
        draw_polyline(renderer, &path, &self.style)?;
        self.device_path = Some(path);
        Ok(())
    }
}

/// A curve `t ↦ calc(t, c)` sampled over the domain a bound function reports.
pub struct ParametricCurve<H: ?Sized> {
    samples: Samples,
    calc: CalcFn<H>,
    bound: BoundFn<H>,
}

impl<H: CurveHost + ?Sized> ParametricCurve<H> {
    pub fn new(
        const_value: Option<f64>,
        calc: impl Fn(f64, Option<f64>, &H) -> (f64, f64) + 'static,
        bound: impl Fn(&H) -> (f64, f64) + 'static,
    ) -> Self {
        let name = const_value.map_or_else(|| "curve".to_owned(), |c| format!("curve={c}"));
        Self {
            samples: Samples::new(name, const_value),
            calc: Box::new(calc),
            bound: Box::new(bound),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.samples.name = name.into();
        self
    }

    pub fn with_sample_points(mut self, n: usize) -> Self {
        self.samples.sample_points = n;
        self
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.samples.style = style;
        self
    }

    /// Scan domain for the current state of `host`.
    pub fn bound(&self, host: &H) -> (f64, f64) {
        (self.bound)(host)
    }
}

impl<H: CurveHost + ?Sized> Curve<H> for ParametricCurve<H> {
    fn name(&self) -> &str {
        &self.samples.name
    }

    fn kind(&self) -> CurveKind {
        CurveKind::Parametric
    }

    fn const_value(&self) -> Option<f64> {
        self.samples.const_value
    }

    fn sample_points(&self) -> usize {
        self.samples.sample_points
    }

    fn points(&self) -> &[PlotPoint<f64>] {
        &self.samples.points
    }

    fn style(&self) -> &LineStyle {
        &self.samples.style
    }

    fn set_style(&mut self, style: LineStyle) {
        self.samples.style = style;
    }

    fn device_path(&self) -> Option<&[ScreenPoint<f64>]> {
        self.samples.device_path.as_deref()
    }

    fn recalc(&mut self, host: &H) {
        let bound = (self.bound)(host);
        let c = self.samples.const_value;
        let calc = &self.calc;
        self.samples.resample(bound, |t| calc(t, c, host));
    }

    fn draw(&mut self, host: &H, renderer: &mut dyn Renderer) -> Result<()> {
        self.samples.device_path = None;
        self.recalc(host);
        self.samples.render(host, renderer)
    }
}

/// A curve `x ↦ (x, calc(x, c))` scanned over the visible x interval,
/// clamped to explicit limits.
pub struct BoundedParametricCurve<H: ?Sized> {
    samples: Samples,
    calc: ScanFn<H>,
    limits: LimitFn<H>,
}

impl<H: CurveHost + ?Sized> BoundedParametricCurve<H> {
    /// Curve clamped to fixed limits.
    pub fn new(
        const_value: Option<f64>,
        calc: impl Fn(f64, Option<f64>, &H) -> f64 + 'static,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Self {
        Self::with_limit_fn(const_value, calc, move |_| (min, max))
    }

    /// Curve whose limits are re-read from `host` on every recalculation,
    /// e.g. an isotherm ending at the pressure-dependent saturation point.
    pub fn with_limit_fn(
        const_value: Option<f64>,
        calc: impl Fn(f64, Option<f64>, &H) -> f64 + 'static,
        limits: impl Fn(&H) -> (Option<f64>, Option<f64>) + 'static,
    ) -> Self {
        let name = const_value.map_or_else(|| "curve".to_owned(), |c| format!("curve={c}"));
        Self {
            samples: Samples::new(name, const_value),
            calc: Box::new(calc),
            limits: Box::new(limits),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.samples.name = name.into();
        self
    }

    pub fn with_sample_points(mut self, n: usize) -> Self {
        self.samples.sample_points = n;
        self
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.samples.style = style;
        self
    }

    /// `(max(min, visible_min), min(max, visible_max))`.
    ///
    /// The pair is not reordered. When the limits lie entirely outside the
    /// view, e.g. an isotherm whose saturation point is left of the visible
    /// x range, the scan runs backwards across the window.
    pub fn bound(&self, host: &H) -> (f64, f64) {
        let (visible_min, visible_max) = host.surface().x_bound();
        let (min, max) = (self.limits)(host);
        (
            min.map_or(visible_min, |m| m.max(visible_min)),
            max.map_or(visible_max, |m| m.min(visible_max)),
        )
    }
}

impl<H: CurveHost + ?Sized> Curve<H> for BoundedParametricCurve<H> {
    fn name(&self) -> &str {
        &self.samples.name
    }

    fn kind(&self) -> CurveKind {
        CurveKind::Bounded
    }

    fn const_value(&self) -> Option<f64> {
        self.samples.const_value
    }

    fn sample_points(&self) -> usize {
        self.samples.sample_points
    }

    fn points(&self) -> &[PlotPoint<f64>] {
        &self.samples.points
    }

    fn style(&self) -> &LineStyle {
        &self.samples.style
    }

    fn set_style(&mut self, style: LineStyle) {
        self.samples.style = style;
    }

    fn device_path(&self) -> Option<&[ScreenPoint<f64>]> {
        self.samples.device_path.as_deref()
    }

    fn recalc(&mut self, host: &H) {
        let bound = self.bound(host);
        let c = self.samples.const_value;
        let calc = &self.calc;
        self.samples.resample(bound, |x| (x, calc(x, c, host)));
    }

    fn draw(&mut self, host: &H, renderer: &mut dyn Renderer) -> Result<()> {
        self.samples.device_path = None;
        self.recalc(host);
        self.samples.render(host, renderer)
    }
}
