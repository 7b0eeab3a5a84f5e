//! Charts: a skewed surface, its frame and a collection of curves.
//!
//! A chart owns its curves. Curves never hold a reference back to the chart;
//! each draw hands them the chart's current state so pressure and view limits
//! are re-read every time.

pub mod mollier;
pub mod skew;

pub use mollier::{mollier_skew_angle, CurveOptions, MollierChart, MollierView};
pub use skew::SkewChart;

use crate::curve::Curve;
use crate::error::Result;
use crate::render::Renderer;
use crate::surface::{CurveHost, Frame, SkewSurface};

/// Index of a curve in the chart that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurveHandle(usize);

impl CurveHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Interface shared by every chart a projection can create.
pub trait Chart {
    /// Name of the projection that creates this kind of chart.
    fn name(&self) -> &str;

    fn surface(&self) -> &SkewSurface;

    fn surface_mut(&mut self) -> &mut SkewSurface;

    fn frame_mut(&mut self) -> &mut Frame;

    fn curve_count(&self) -> usize;

    /// Renders the frame, then every curve in ascending z-order.
    fn draw(&mut self, renderer: &mut dyn Renderer) -> Result<()>;

    fn as_mollier_mut(&mut self) -> Option<&mut MollierChart> {
        None
    }
}

/// Draws `curves` in ascending z-order. Equal z-orders keep insertion order.
pub(crate) fn draw_curves<H: CurveHost + ?Sized>(
    host: &H,
    curves: &mut [Box<dyn Curve<H>>],
    renderer: &mut dyn Renderer,
) -> Result<()> {
    let mut order: Vec<usize> = (0..curves.len()).collect();
    order.sort_by(|&a, &b| {
        curves[a]
            .style()
            .z_order
            .total_cmp(&curves[b].style().z_order)
    });
    for i in order {
        curves[i].draw(host, renderer)?;
    }
    Ok(())
}

/// Pushes `curve` and returns its handle.
pub(crate) fn push_curve<H: CurveHost + ?Sized>(
    curves: &mut Vec<Box<dyn Curve<H>>>,
    curve: Box<dyn Curve<H>>,
) -> CurveHandle {
    curves.push(curve);
    CurveHandle(curves.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::AxisLine;
    use crate::render::{LineStyle, RecordingRenderer, Rgb};
    use crate::transform::ScreenRect;

    #[test]
    fn curves_draw_in_stable_z_order() {
        let surface = SkewSurface::new(
            0.0,
            (0.0, 1.0),
            (0.0, 1.0),
            ScreenRect {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
            },
        )
        .unwrap();
        let line = |value: f64, color: Rgb, z: f64| -> Box<dyn Curve<SkewSurface>> {
            Box::new(
                AxisLine::horizontal(value).with_style(LineStyle::default().color(color).z_order(z)),
            )
        };
        let mut curves = vec![
            line(0.1, Rgb::RED, 3.0),
            line(0.2, Rgb::BLUE, 1.0),
            line(0.3, Rgb::BLACK, 3.0),
        ];
        let mut renderer = RecordingRenderer::new();

        draw_curves(&surface, &mut curves, &mut renderer).unwrap();

        let colors: Vec<Rgb> = renderer.paths().map(|(_, s)| s.color).collect();
        assert_eq!(colors, vec![Rgb::BLUE, Rgb::RED, Rgb::BLACK]);
    }

    #[test]
    fn handles_are_sequential() {
        let mut curves: Vec<Box<dyn Curve<SkewSurface>>> = Vec::new();
        let a = push_curve(&mut curves, Box::new(AxisLine::vertical(0.5)));
        let b = push_curve(&mut curves, Box::new(AxisLine::vertical(0.6)));
        assert_eq!((a.index(), b.index()), (0, 1));
        assert!(a < b);
    }
}
