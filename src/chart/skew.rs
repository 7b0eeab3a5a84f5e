//! Plain skewed chart for caller-supplied curves.

use crate::curve::Curve;
use crate::error::Result;
use crate::render::Renderer;
use crate::surface::{Frame, SkewSurface};

use super::{draw_curves, push_curve, Chart, CurveHandle};

pub struct SkewChart {
    surface: SkewSurface,
    frame: Frame,
    curves: Vec<Box<dyn Curve<SkewSurface>>>,
}

impl SkewChart {
    pub fn new(surface: SkewSurface) -> Self {
        Self {
            surface,
            frame: Frame::default(),
            curves: Vec::new(),
        }
    }

    pub fn add_curve(&mut self, curve: impl Curve<SkewSurface> + 'static) -> CurveHandle {
        push_curve(&mut self.curves, Box::new(curve))
    }

    pub fn curve(&self, handle: CurveHandle) -> Option<&dyn Curve<SkewSurface>> {
        self.curves.get(handle.index()).map(|c| c.as_ref())
    }

    pub fn curve_mut(&mut self, handle: CurveHandle) -> Option<&mut Box<dyn Curve<SkewSurface>>> {
        self.curves.get_mut(handle.index())
    }
}

impl Chart for SkewChart {
    fn name(&self) -> &str {
        "skewy"
    }

    fn surface(&self) -> &SkewSurface {
        &self.surface
    }

    fn surface_mut(&mut self) -> &mut SkewSurface {
        &mut self.surface
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn curve_count(&self) -> usize {
        self.curves.len()
    }

    fn draw(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        self.frame.draw(&self.surface, renderer)?;
        draw_curves(&self.surface, &mut self.curves, renderer)
    }
}
