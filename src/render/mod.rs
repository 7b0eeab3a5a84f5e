//! Rendering backend seam.
//!
//! The chart never rasterizes anything itself. Every pass ends in calls to a
//! [`Renderer`], which receives device-space polylines and text. NaN samples
//! never reach a backend: [`draw_polyline`] splits a path at non-finite points
//! so that every backend renders them as gaps.

#[cfg(feature = "plot")]
pub mod backend;

#[cfg(feature = "plot")]
pub use backend::PlottersRenderer;

use crate::error::Result;
use crate::transform::ScreenPoint;

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GRAY: Rgb = Rgb(176, 176, 176);
    pub const RED: Rgb = Rgb(214, 39, 40);
    pub const BLUE: Rgb = Rgb(31, 119, 180);
}

/// Stroke settings for one curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Rgb,
    pub width: f64,
    /// Curves are drawn in ascending z-order; ties keep insertion order.
    pub z_order: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Rgb::BLUE,
            width: 1.5,
            z_order: 2.0,
        }
    }
}

impl LineStyle {
    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn z_order(mut self, z_order: f64) -> Self {
        self.z_order = z_order;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Rgb,
    pub size: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Rgb::BLACK,
            size: 10.0,
        }
    }
}

/// Drawing primitives a host backend supplies.
pub trait Renderer {
    /// Strokes an open polyline. Points are finite device coordinates.
    fn draw_path(&mut self, points: &[ScreenPoint<f64>], style: &LineStyle) -> Result<()>;

    /// Draws text anchored at `at`, rotated counter-clockwise by `rotation_deg`.
    fn draw_text(
        &mut self,
        text: &str,
        at: ScreenPoint<f64>,
        rotation_deg: f64,
        style: &TextStyle,
    ) -> Result<()>;
}

/// Strokes every run of finite points as its own path.
///
/// Runs shorter than two points produce nothing. Returns the number of paths drawn.
pub fn draw_polyline(
    renderer: &mut dyn Renderer,
    points: &[ScreenPoint<f64>],
    style: &LineStyle,
) -> Result<usize> {
    let mut drawn = 0;
    for run in points.split(|p| !p.is_finite()) {
        if run.len() >= 2 {
            renderer.draw_path(run, style)?;
            drawn += 1;
        }
    }
    Ok(drawn)
}

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Path {
        points: Vec<ScreenPoint<f64>>,
        style: LineStyle,
    },
    Text {
        text: String,
        at: ScreenPoint<f64>,
        rotation_deg: f64,
        style: TextStyle,
    },
}

/// In-memory backend that records every call; useful headless and in tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> impl Iterator<Item = (&[ScreenPoint<f64>], &LineStyle)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Path { points, style } => Some((points.as_slice(), style)),
            DrawCommand::Text { .. } => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, f64)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text {
                text, rotation_deg, ..
            } => Some((text.as_str(), *rotation_deg)),
            DrawCommand::Path { .. } => None,
        })
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn draw_path(&mut self, points: &[ScreenPoint<f64>], style: &LineStyle) -> Result<()> {
        self.commands.push(DrawCommand::Path {
            points: points.to_vec(),
            style: *style,
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        at: ScreenPoint<f64>,
        rotation_deg: f64,
        style: &TextStyle,
    ) -> Result<()> {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            at,
            rotation_deg,
            style: *style,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> ScreenPoint<f64> {
        ScreenPoint::new(x, y)
    }

    #[test]
    fn nan_splits_path_into_runs() {
        let mut r = RecordingRenderer::new();
        let points = [
            pt(0.0, 0.0),
            pt(1.0, 1.0),
            pt(f64::NAN, 2.0),
            pt(3.0, 3.0),
            pt(4.0, 4.0),
            pt(5.0, 5.0),
        ];
        let drawn = draw_polyline(&mut r, &points, &LineStyle::default()).unwrap();

        assert_eq!(drawn, 2);
        let lens: Vec<usize> = r.paths().map(|(p, _)| p.len()).collect();
        assert_eq!(lens, vec![2, 3]);
    }

    #[test]
    fn isolated_points_are_dropped() {
        let mut r = RecordingRenderer::new();
        let points = [pt(0.0, 0.0), pt(f64::NAN, 0.0), pt(1.0, f64::INFINITY), pt(2.0, 2.0)];
        assert_eq!(draw_polyline(&mut r, &points, &LineStyle::default()).unwrap(), 0);
        assert!(r.commands.is_empty());
    }

    #[test]
    fn style_builder() {
        let style = LineStyle::default().color(Rgb::RED).width(0.5).z_order(2.01);
        assert_eq!(style.color, Rgb::RED);
        assert_eq!(style.width, 0.5);
        assert_eq!(style.z_order, 2.01);
    }
}
