//! The skewed plotting surface.
//!
//! [`SkewSurface`] owns the view limits, the shear and every transform
//! derived from them:
//!
//! ```text
//! DataToSurface = Scale ∘ Shear ∘ Limits
//! DataToDevice  = DataToSurface ∘ SurfaceToDevice
//! ```
//!
//! `Scale` is the identity because both view scales are linear. The view
//! limits are expressed in sheared coordinates, so the y interval visible on
//! the left edge of the surface differs from the one visible on the right
//! edge. Both are cached and queried in O(1); the composed transforms are
//! rebuilt whenever limits, skew or device rectangle change, never per draw.

pub mod axis;

pub use axis::{AxisStyle, Frame, SkewTick, TickVisibility, YAxis};

use log::{debug, warn};

use crate::error::{ChartError, Result};
use crate::scale::{Linear, Scale};
use crate::transform::{Affine2D, PlotPoint, ScreenRect};

/// Anything curves can be drawn against: it exposes the current surface so
/// bounds and transforms are read at draw time.
pub trait CurveHost {
    fn surface(&self) -> &SkewSurface;
}

#[derive(Debug, Clone)]
pub struct SkewSurface {
    skew: f64,
    x_scale: Linear<f64, f64>,
    y_scale: Linear<f64, f64>,
    device: ScreenRect<f64>,
    shear: Affine2D,
    data_to_surface: Affine2D,
    surface_to_device: Affine2D,
    data_to_device: Affine2D,
    right_interval: (f64, f64),
}

impl CurveHost for SkewSurface {
    fn surface(&self) -> &SkewSurface {
        self
    }
}

fn check_limits(axis: &str, lo: f64, hi: f64) -> Result<()> {
    if !(lo.is_finite() && hi.is_finite()) {
        return Err(ChartError::InvalidLimits {
            message: format!("{axis} limits ({lo}, {hi}) must be finite"),
        });
    }
    if lo == hi {
        return Err(ChartError::InvalidLimits {
            message: format!("{axis} limits ({lo}, {hi}) have zero span"),
        });
    }
    Ok(())
}

impl SkewSurface {
    /// Creates a surface sheared by `skew` radians.
    ///
    /// Limits are `(first, last)` pairs in sheared coordinates; reversed
    /// pairs give reversed axes.
    pub fn new(
        skew: f64,
        x_limits: (f64, f64),
        y_limits: (f64, f64),
        device: ScreenRect<f64>,
    ) -> Result<Self> {
        check_limits("x", x_limits.0, x_limits.1)?;
        check_limits("y", y_limits.0, y_limits.1)?;
        check_device(&device)?;

        let mut surface = Self {
            skew,
            x_scale: Linear::new(x_limits.0, x_limits.1),
            y_scale: Linear::new(y_limits.0, y_limits.1),
            device,
            shear: Affine2D::skew(0.0, skew),
            data_to_surface: Affine2D::identity(),
            surface_to_device: Affine2D::identity(),
            data_to_device: Affine2D::identity(),
            right_interval: y_limits,
        };
        surface.update_transforms();
        Ok(surface)
    }

    pub fn skew_angle(&self) -> f64 {
        self.skew
    }

    /// Replaces the shear angle and rebuilds the cached transforms.
    pub fn set_skew_angle(&mut self, skew: f64) {
        self.skew = skew;
        self.shear = Affine2D::skew(0.0, skew);
        self.update_transforms();
    }

    pub fn shear(&self) -> &Affine2D {
        &self.shear
    }

    pub fn x_scale(&self) -> &Linear<f64, f64> {
        &self.x_scale
    }

    pub fn y_scale(&self) -> &Linear<f64, f64> {
        &self.y_scale
    }

    pub fn device(&self) -> &ScreenRect<f64> {
        &self.device
    }

    pub fn set_xlim(&mut self, first: f64, last: f64) -> Result<()> {
        check_limits("x", first, last)?;
        self.x_scale.set_domain(first, last);
        self.update_transforms();
        Ok(())
    }

    pub fn set_ylim(&mut self, first: f64, last: f64) -> Result<()> {
        check_limits("y", first, last)?;
        self.y_scale.set_domain(first, last);
        self.update_transforms();
        Ok(())
    }

    pub fn set_device(&mut self, device: ScreenRect<f64>) -> Result<()> {
        check_device(&device)?;
        self.device = device;
        self.update_transforms();
        Ok(())
    }

    /// Pans both view scales by fractions of their spans.
    ///
    /// The view is left unchanged if the new limits would be degenerate.
    pub fn pan(&mut self, dx: f64, dy: f64) -> Result<()> {
        let mut x_scale = self.x_scale;
        let mut y_scale = self.y_scale;
        if !(x_scale.pan(dx) && y_scale.pan(dy)) {
            return Err(ChartError::InvalidLimits {
                message: format!("pan by ({dx}, {dy}) failed"),
            });
        }
        self.commit_scales(x_scale, y_scale)
    }

    /// Zooms both view scales by `factor` (> 1 zooms in) around a
    /// surface-space anchor, the center when `None`.
    ///
    /// The view is left unchanged if the factor is rejected or the new limits
    /// would be degenerate.
    pub fn zoom(&mut self, factor: f64, anchor: Option<PlotPoint<f64>>) -> Result<()> {
        let mut x_scale = self.x_scale;
        let mut y_scale = self.y_scale;
        if !(x_scale.zoom(factor, anchor.map(|a| a.x)) && y_scale.zoom(factor, anchor.map(|a| a.y))) {
            return Err(ChartError::InvalidLimits {
                message: format!("zoom factor {factor} rejected"),
            });
        }
        self.commit_scales(x_scale, y_scale)
    }

    fn commit_scales(&mut self, x_scale: Linear<f64, f64>, y_scale: Linear<f64, f64>) -> Result<()> {
        let (x0, x1) = x_scale.domain();
        check_limits("x", *x0, *x1)?;
        let (y0, y1) = y_scale.domain();
        check_limits("y", *y0, *y1)?;
        self.x_scale = x_scale;
        self.y_scale = y_scale;
        self.update_transforms();
        Ok(())
    }

    /// Visible x interval as `(lower, upper)`.
    pub fn x_bound(&self) -> (f64, f64) {
        self.x_scale.bound()
    }

    /// Visible y interval in sheared coordinates, as `(lower, upper)`.
    pub fn y_bound(&self) -> (f64, f64) {
        self.y_scale.bound()
    }

    /// Data y interval along the left edge: the view interval itself.
    pub fn left_interval(&self) -> (f64, f64) {
        let (first, last) = self.y_scale.domain();
        (*first, *last)
    }

    /// Data y interval along the right edge: the data-space preimage of the
    /// surface corners `(1, 0)` and `(1, 1)`.
    pub fn right_interval(&self) -> (f64, f64) {
        self.right_interval
    }

    /// Envelope of the left and right intervals.
    pub fn view_interval(&self) -> (f64, f64) {
        let (ll, lu) = self.left_interval();
        let (rl, ru) = self.right_interval;
        (ll.min(rl), lu.max(ru))
    }

    pub fn data_to_surface(&self) -> &Affine2D {
        &self.data_to_surface
    }

    pub fn surface_to_device(&self) -> &Affine2D {
        &self.surface_to_device
    }

    pub fn data_to_device(&self) -> &Affine2D {
        &self.data_to_device
    }

    /// Maps a point whose x is a surface fraction and whose y is data, the
    /// coordinate system of y ticks, gridlines and side spines.
    pub fn y_axis_point(&self, x_fraction: f64, y: f64) -> PlotPoint<f64> {
        PlotPoint::new(self.x_scale.denormalize(x_fraction), y)
    }

    /// Counter-clockwise angle in degrees that the sheared x direction makes
    /// with the device's horizontal. Changes with the aspect ratio too, not only the skew.
    pub fn tick_label_rotation(&self) -> f64 {
        let angle = self
            .data_to_device
            .transform_angle(0.0, PlotPoint::new(0.0, 0.0));
        // Device y grows downward.
        -angle.to_degrees()
    }

    fn update_transforms(&mut self) {
        let limits = Affine2D::from_scales(&self.x_scale, &self.y_scale);
        self.data_to_surface = self.shear.then(&limits);
        self.surface_to_device = Affine2D::unit_to_screen(&self.device);
        self.data_to_device = self.data_to_surface.then(&self.surface_to_device);

        self.right_interval = match self.data_to_surface.inverted() {
            Some(inverse) => {
                let lower = inverse.transform_point(PlotPoint::new(1.0, 0.0));
                let upper = inverse.transform_point(PlotPoint::new(1.0, 1.0));
                (lower.y, upper.y)
            }
            None => {
                warn!("surface transform is singular; using left interval on the right edge");
                self.left_interval()
            }
        };

        debug!(
            "surface transforms updated: skew={:.6} rad, left={:?}, right={:?}",
            self.skew,
            self.left_interval(),
            self.right_interval
        );
    }
}

fn check_device(device: &ScreenRect<f64>) -> Result<()> {
    if device.is_empty() {
        return Err(ChartError::InvalidLimits {
            message: format!(
                "device rectangle {}x{} is empty",
                device.width, device.height
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn device() -> ScreenRect<f64> {
        ScreenRect {
            x: 0.0,
            y: 0.0,
            width: 640.0,
            height: 480.0,
        }
    }

    #[test]
    fn unskewed_surface_has_equal_edges() {
        let surface = SkewSurface::new(0.0, (0.0, 1.0), (0.0, 10.0), device()).unwrap();
        assert_eq!(surface.left_interval(), (0.0, 10.0));
        let (lo, hi) = surface.right_interval();
        assert_relative_eq!(lo, 0.0, epsilon = 1e-12);
        assert_relative_eq!(hi, 10.0, epsilon = 1e-12);
        assert_relative_eq!(surface.tick_label_rotation(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn right_interval_follows_shear() {
        // y' = y + x·tan θ with tan θ = -2: the right edge at x = 2 shows data y + 4.
        let surface = SkewSurface::new((-2.0f64).atan(), (0.0, 2.0), (0.0, 10.0), device()).unwrap();
        let (lo, hi) = surface.right_interval();
        assert_relative_eq!(lo, 4.0, epsilon = 1e-9);
        assert_relative_eq!(hi, 14.0, epsilon = 1e-9);
        assert_eq!(surface.view_interval().0, 0.0);
        assert_relative_eq!(surface.view_interval().1, 14.0, epsilon = 1e-9);
    }

    #[test]
    fn set_skew_angle_rebuilds_transforms() {
        let mut surface = SkewSurface::new(0.0, (0.0, 2.0), (0.0, 10.0), device()).unwrap();
        surface.set_skew_angle((-2.0f64).atan());

        assert_relative_eq!(surface.shear().b, -2.0, epsilon = 1e-12);
        assert_relative_eq!(surface.right_interval().0, 4.0, epsilon = 1e-9);
        assert!(surface.tick_label_rotation() < 0.0);
    }

    #[test]
    fn limits_are_validated() {
        let mut surface = SkewSurface::new(0.0, (0.0, 1.0), (0.0, 1.0), device()).unwrap();
        assert!(surface.set_xlim(1.0, 1.0).is_err());
        assert!(surface.set_ylim(0.0, f64::NAN).is_err());
        assert!(surface
            .set_device(ScreenRect {
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 10.0
            })
            .is_err());
        assert_eq!(surface.x_bound(), (0.0, 1.0));
    }

    #[test]
    fn data_corners_land_on_device_corners() {
        let surface = SkewSurface::new(0.7, (0.0, 2.0), (-5.0, 5.0), device()).unwrap();
        let (rl, ru) = surface.right_interval();

        let lower_right = surface
            .data_to_device()
            .transform_to_screen(PlotPoint::new(2.0, rl));
        assert_relative_eq!(lower_right.x, 640.0, epsilon = 1e-9);
        assert_relative_eq!(lower_right.y, 480.0, epsilon = 1e-9);

        let upper_right = surface
            .data_to_device()
            .transform_to_screen(PlotPoint::new(2.0, ru));
        assert_relative_eq!(upper_right.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn zoom_and_pan_move_both_edges() {
        let mut surface = SkewSurface::new((-2.0f64).atan(), (0.0, 2.0), (0.0, 10.0), device()).unwrap();
        surface.pan(0.0, 0.5).unwrap();
        assert_eq!(surface.left_interval(), (5.0, 15.0));
        assert_relative_eq!(surface.right_interval().0, 9.0, epsilon = 1e-9);

        surface.zoom(2.0, None).unwrap();
        assert_eq!(surface.x_bound(), (0.5, 1.5));
        assert!(surface.zoom(-1.0, None).is_err());
        assert_eq!(surface.x_bound(), (0.5, 1.5));
    }

    #[test]
    fn non_finite_pan_and_zoom_keep_view() {
        let mut surface = SkewSurface::new(0.4, (0.0, 2.0), (0.0, 10.0), device()).unwrap();
        let right = surface.right_interval();

        for factor in [f64::NAN, f64::INFINITY] {
            assert!(matches!(
                surface.zoom(factor, None),
                Err(ChartError::InvalidLimits { .. })
            ));
        }
        assert!(matches!(
            surface.pan(f64::NAN, 0.0),
            Err(ChartError::InvalidLimits { .. })
        ));
        assert!(surface.pan(0.0, f64::INFINITY).is_err());

        assert_eq!(surface.x_bound(), (0.0, 2.0));
        assert_eq!(surface.y_bound(), (0.0, 10.0));
        assert_eq!(surface.right_interval(), right);
        assert!(surface.data_to_device().inverted().is_some());
    }

    #[test]
    fn label_rotation_follows_aspect_ratio_and_limits() {
        let theta = 0.6f64;
        let mut surface = SkewSurface::new(theta, (0.0, 2.0), (0.0, 10.0), device()).unwrap();

        // Device direction of the sheared x axis: one data unit of x moves
        // width/x_span to the right and tan θ·height/y_span up.
        let expected = |width: f64, height: f64, x_span: f64, y_span: f64| {
            let dev_dx = width / x_span;
            let dev_dy = -theta.tan() * height / y_span;
            -dev_dy.atan2(dev_dx).to_degrees()
        };

        let landscape = surface.tick_label_rotation();
        assert_relative_eq!(landscape, expected(640.0, 480.0, 2.0, 10.0), epsilon = 1e-9);

        surface
            .set_device(ScreenRect {
                x: 0.0,
                y: 0.0,
                width: 480.0,
                height: 640.0,
            })
            .unwrap();
        let portrait = surface.tick_label_rotation();
        assert_relative_eq!(portrait, expected(480.0, 640.0, 2.0, 10.0), epsilon = 1e-9);
        assert!(portrait > landscape);

        surface.set_ylim(0.0, 40.0).unwrap();
        let zoomed_out = surface.tick_label_rotation();
        assert_relative_eq!(zoomed_out, expected(480.0, 640.0, 2.0, 40.0), epsilon = 1e-9);
        assert!(zoomed_out < portrait);
        assert_eq!(surface.skew_angle(), theta);
    }
}
