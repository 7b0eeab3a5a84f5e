//! Coordinate spaces and the affine algebra that connects them.
//!
//! Four spaces take part in drawing a skewed chart:
//!
//! - **Data space**: humidity ratio on x, enthalpy on y (or whatever the
//!   curves of a generic skewed chart produce).
//! - **Sheared space**: data space after the [`Affine2D::skew`] shear. The
//!   view limits of a skewed surface live here.
//! - **Surface space**: the unit square; `(0, 0)` is the lower left corner of
//!   the plotting area and `(1, 1)` the upper right one.
//! - **Device space**: pixels, origin at the top left, y growing downward.
//!
//! ```rust
//! use mollier::{Affine2D, PlotPoint, ScreenRect};
//!
//! let shear = Affine2D::skew(0.0, 45f64.to_radians());
//! let p = shear.transform_point(PlotPoint::new(1.0, 0.0));
//! assert!((p.y - 1.0).abs() < 1e-12);
//!
//! let device = Affine2D::unit_to_screen(&ScreenRect { x: 0.0, y: 0.0, width: 800.0, height: 600.0 });
//! let top_left = device.transform_to_screen(PlotPoint::new(0.0, 1.0));
//! assert_eq!((top_left.x, top_left.y), (0.0, 0.0));
//! ```

use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::scale::Scale;

/// A rectangle in screen/pixel coordinates, `(x, y)` being the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect<S = f64> {
    pub x: S,
    pub y: S,
    pub width: S,
    pub height: S,
}

impl<S: Float> ScreenRect<S> {
    pub fn is_empty(&self) -> bool {
        !(self.width > S::zero() && self.height > S::zero())
    }
}

/// A point in screen/pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint<S = f64> {
    pub x: S,
    pub y: S,
}

impl<S> ScreenPoint<S> {
    pub const fn new(x: S, y: S) -> Self {
        Self { x, y }
    }
}

impl<S: Float> ScreenPoint<S> {
    /// False when either coordinate is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A point in data (or any unit-less chart) coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlotPoint<D = f64> {
    pub x: D,
    pub y: D,
}

impl<D> PlotPoint<D> {
    pub const fn new(x: D, y: D) -> Self {
        Self { x, y }
    }
}

impl<D> From<(D, D)> for PlotPoint<D> {
    fn from((x, y): (D, D)) -> Self {
        Self { x, y }
    }
}

/// A 2D affine map `(x, y) → (a·x + c·y + e, b·x + d·y + f)`.
///
/// Composition reads left to right: `p.then(&q)` applies `p` first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2D {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine2D {
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Shear by `x_angle` along x and `y_angle` along y (radians).
    ///
    /// `skew(0.0, θ)` maps `(x, y)` to `(x, y + x·tan θ)`.
    pub fn skew(x_angle: f64, y_angle: f64) -> Self {
        Self {
            c: x_angle.tan(),
            b: y_angle.tan(),
            ..Self::identity()
        }
    }

    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::identity()
        }
    }

    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::identity()
        }
    }

    /// Maps the box described by two view scales onto the unit square.
    ///
    /// A zero-span scale produces a singular transform.
    pub fn from_scales<X, Y>(x_scale: &X, y_scale: &Y) -> Self
    where
        X: Scale<Domain = f64, Normalized = f64>,
        Y: Scale<Domain = f64, Normalized = f64>,
    {
        let x0 = x_scale.normalize(&0.0);
        let y0 = y_scale.normalize(&0.0);
        Self {
            a: x_scale.normalize(&1.0) - x0,
            b: 0.0,
            c: 0.0,
            d: y_scale.normalize(&1.0) - y0,
            e: x0,
            f: y0,
        }
    }

    /// Maps the unit square onto a screen rectangle, flipping y so that
    /// surface `(0, 1)` lands on the rectangle's top-left corner.
    pub fn unit_to_screen(rect: &ScreenRect<f64>) -> Self {
        Self {
            a: rect.width,
            b: 0.0,
            c: 0.0,
            d: -rect.height,
            e: rect.x,
            f: rect.y + rect.height,
        }
    }

    /// `self` followed by `next`.
    pub fn then(&self, next: &Affine2D) -> Self {
        Self {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            e: next.a * self.e + next.c * self.f + next.e,
            f: next.b * self.e + next.d * self.f + next.f,
        }
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// `None` when the linear part is singular or not finite.
    pub fn inverted(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Self {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }

    pub fn transform_point(&self, p: PlotPoint<f64>) -> PlotPoint<f64> {
        PlotPoint::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    pub fn transform_to_screen(&self, p: PlotPoint<f64>) -> ScreenPoint<f64> {
        let q = self.transform_point(p);
        ScreenPoint::new(q.x, q.y)
    }

    /// Direction (radians) of the image of a ray leaving `at` at `angle`.
    ///
    /// For an affine map the result does not depend on `at`; the argument is
    /// kept so callers read like the general case.
    pub fn transform_angle(&self, angle: f64, at: PlotPoint<f64>) -> f64 {
        let origin = self.transform_point(at);
        let tip = self.transform_point(PlotPoint::new(at.x + angle.cos(), at.y + angle.sin()));
        (tip.y - origin.y).atan2(tip.x - origin.x)
    }

    /// Coefficients in `(a, b, c, d, e, f)` order.
    pub fn to_values(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }
}
