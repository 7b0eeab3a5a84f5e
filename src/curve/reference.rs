//! Axis-aligned reference lines.
//!
//! Constant-enthalpy and constant-humidity-ratio lines need no sampling: a
//! horizontal line lives at a fixed data y across the full width of the
//! surface, a vertical one at a fixed data x across its full height. Their
//! stored points mix surface fractions and data values and never depend on
//! pressure, so only the device path changes between draws.

use crate::error::Result;
use crate::render::{draw_polyline, LineStyle, Renderer};
use crate::scale::Scale;
use crate::surface::CurveHost;
use crate::transform::{PlotPoint, ScreenPoint};

use super::{Curve, CurveKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Fixed data y; points are `(x fraction, y)`.
    Horizontal,
    /// Fixed data x; points are `(x, y fraction)`.
    Vertical,
}

#[derive(Debug, Clone)]
pub struct AxisLine {
    name: String,
    orientation: Orientation,
    value: f64,
    points: [PlotPoint<f64>; 2],
    device_path: Option<Vec<ScreenPoint<f64>>>,
    style: LineStyle,
}

impl AxisLine {
    pub fn horizontal(value: f64) -> Self {
        Self::new(
            Orientation::Horizontal,
            value,
            [PlotPoint::new(0.0, value), PlotPoint::new(1.0, value)],
        )
    }

    pub fn vertical(value: f64) -> Self {
        Self::new(
            Orientation::Vertical,
            value,
            [PlotPoint::new(value, 0.0), PlotPoint::new(value, 1.0)],
        )
    }

    fn new(orientation: Orientation, value: f64, points: [PlotPoint<f64>; 2]) -> Self {
        Self {
            name: format!("{orientation:?}={value}").to_lowercase(),
            orientation,
            value,
            points,
            device_path: None,
            style: LineStyle::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl<H: CurveHost + ?Sized> Curve<H> for AxisLine {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> CurveKind {
        CurveKind::Reference
    }

    fn const_value(&self) -> Option<f64> {
        Some(self.value)
    }

    fn sample_points(&self) -> usize {
        self.points.len()
    }

    fn points(&self) -> &[PlotPoint<f64>] {
        &self.points
    }

    fn style(&self) -> &LineStyle {
        &self.style
    }

    fn set_style(&mut self, style: LineStyle) {
        self.style = style;
    }

    fn device_path(&self) -> Option<&[ScreenPoint<f64>]> {
        self.device_path.as_deref()
    }

    fn recalc(&mut self, _host: &H) {}

    fn draw(&mut self, host: &H, renderer: &mut dyn Renderer) -> Result<()> {
        self.device_path = None;
        let surface = host.surface();
        let path: Vec<ScreenPoint<f64>> = match self.orientation {
            Orientation::Horizontal => self
                .points
                .iter()
                .map(|p| {
                    surface
                        .data_to_device()
                        .transform_to_screen(surface.y_axis_point(p.x, p.y))
                })
                .collect(),
            Orientation::Vertical => {
                let u = surface.x_scale().normalize(&self.value);
                self.points
                    .iter()
                    .map(|p| {
                        surface
                            .surface_to_device()
                            .transform_to_screen(PlotPoint::new(u, p.y))
                    })
                    .collect()
            }
        };
        draw_polyline(renderer, &path, &self.style)?;
        self.device_path = Some(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;
    use crate::surface::SkewSurface;
    use crate::transform::ScreenRect;
    use approx::assert_relative_eq;

    fn surface(skew: f64) -> SkewSurface {
        SkewSurface::new(
            skew,
            (0.0, 2.0),
            (0.0, 10.0),
            ScreenRect {
                x: 0.0,
                y: 0.0,
                width: 200.0,
                height: 100.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn vertical_line_spans_full_height() {
        let host = surface((-2.0f64).atan());
        let mut line = AxisLine::vertical(1.0);
        let mut renderer = RecordingRenderer::new();

        Curve::<SkewSurface>::draw(&mut line, &host, &mut renderer).unwrap();

        let path = Curve::<SkewSurface>::device_path(&line).unwrap();
        assert_relative_eq!(path[0].x, 100.0, epsilon = 1e-9);
        assert_relative_eq!(path[1].x, 100.0, epsilon = 1e-9);
        assert_relative_eq!(path[0].y, 100.0, epsilon = 1e-9);
        assert_relative_eq!(path[1].y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn horizontal_line_follows_shear() {
        let host = surface((-2.0f64).atan());
        let mut line = AxisLine::horizontal(5.0);
        let mut renderer = RecordingRenderer::new();

        Curve::<SkewSurface>::draw(&mut line, &host, &mut renderer).unwrap();

        // y' = y - 2x: halfway up on the left, 4 units lower on the right.
        let path = Curve::<SkewSurface>::device_path(&line).unwrap();
        assert_relative_eq!(path[0].y, 50.0, epsilon = 1e-9);
        assert_relative_eq!(path[1].y, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn stored_points_ignore_view_changes() {
        let mut host = surface(0.0);
        let mut line = AxisLine::horizontal(3.0);
        let before = Curve::<SkewSurface>::points(&line).to_vec();

        host.set_ylim(-20.0, 20.0).unwrap();
        Curve::<SkewSurface>::recalc(&mut line, &host);

        assert_eq!(Curve::<SkewSurface>::points(&line), before.as_slice());
        assert_eq!(Curve::<SkewSurface>::kind(&line), CurveKind::Reference);
    }
}
