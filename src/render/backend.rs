//! `plotters` adapter.

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{LineStyle, Renderer, Rgb, TextStyle};
use crate::error::{ChartError, Result};
use crate::transform::ScreenPoint;

/// Draws onto a `plotters` drawing area in backend pixel coordinates.
///
/// `plotters` only rotates text by multiples of 90°, so labels are snapped to
/// the nearest quarter turn.
pub struct PlottersRenderer<'a, DB: DrawingBackend> {
    area: &'a DrawingArea<DB, Shift>,
    font_family: &'static str,
}

impl<'a, DB: DrawingBackend> PlottersRenderer<'a, DB> {
    pub fn new(area: &'a DrawingArea<DB, Shift>) -> Self {
        Self {
            area,
            font_family: "sans-serif",
        }
    }

    pub fn with_font_family(mut self, family: &'static str) -> Self {
        self.font_family = family;
        self
    }
}

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

fn pixel(p: ScreenPoint<f64>) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

fn quarter_turn(rotation_deg: f64) -> FontTransform {
    // plotters rotates clockwise; the renderer contract is counter-clockwise.
    match ((-rotation_deg / 90.0).round() as i64).rem_euclid(4) {
        1 => FontTransform::Rotate90,
        2 => FontTransform::Rotate180,
        3 => FontTransform::Rotate270,
        _ => FontTransform::None,
    }
}

fn render_error<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Render {
        message: err.to_string(),
    }
}

impl<DB: DrawingBackend> Renderer for PlottersRenderer<'_, DB> {
    fn draw_path(&mut self, points: &[ScreenPoint<f64>], style: &LineStyle) -> Result<()> {
        let pixels: Vec<(i32, i32)> = points.iter().copied().map(pixel).collect();
        let stroke = color(style.color).stroke_width(style.width.round().max(1.0) as u32);
        self.area
            .draw(&PathElement::new(pixels, stroke))
            .map_err(render_error)
    }

    fn draw_text(
        &mut self,
        text: &str,
        at: ScreenPoint<f64>,
        rotation_deg: f64,
        style: &TextStyle,
    ) -> Result<()> {
        let font = (self.font_family, style.size)
            .into_font()
            .transform(quarter_turn(rotation_deg))
            .color(&color(style.color));
        self.area
            .draw(&Text::new(text.to_owned(), pixel(at), font))
            .map_err(render_error)
    }
}
