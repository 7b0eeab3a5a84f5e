//! View scales.
//!
//! A scale holds the visible domain of one chart axis and maps it onto the
//! normalized `[0, 1]` range. The skewed surface keeps one scale per axis;
//! together they form the view-limit box that the limits transform maps onto
//! the unit square.
//!
//! Only [`Linear`] scales exist: the shear is affine, and a non-linear scale
//! would bend iso-lines that are supposed to stay straight.

pub mod linear;
pub mod tick_iter;
pub mod util;

pub use linear::Linear;
pub use tick_iter::TickIter;

use num_traits::{Float, Zero};

/// A tick mark produced by a scale.
///
/// `level` 0 marks a major tick, 1 a minor tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick<D> {
    pub value: D,
    pub level: u8,
}

impl<D> Tick<D> {
    /// Returns true for major ticks.
    pub fn is_major(&self) -> bool {
        self.level == 0
    }
}

/// Mapping between a data domain and the normalized `[0, 1]` range.
///
/// The `_opt` methods are the primitives; the plain variants fall back to
/// zero when a numeric conversion is not representable.
pub trait Scale {
    type Domain: Float;
    type Normalized: Float;

    /// Current domain as `(min, max)`, in the order it was set.
    fn domain(&self) -> (&Self::Domain, &Self::Domain);

    /// Replaces the domain. Reversed domains are kept as given.
    fn set_domain(&mut self, min: Self::Domain, max: Self::Domain);

    fn normalize_opt(&self, value: &Self::Domain) -> Option<Self::Normalized>;

    fn denormalize_opt(&self, t: Self::Normalized) -> Option<Self::Domain>;

    /// Shifts the domain by `delta_norm` times its span.
    fn pan_opt(&mut self, delta_norm: Self::Normalized) -> Option<()>;

    /// Zooms by `factor` (> 1 zooms in) around `anchor_norm`, the center by default.
    fn zoom_opt(
        &mut self,
        factor: Self::Normalized,
        anchor_norm: Option<Self::Normalized>,
    ) -> Option<()>;

    fn tick_iter(&self) -> TickIter<Self::Domain>;

    fn normalize(&self, value: &Self::Domain) -> Self::Normalized {
        self.normalize_opt(value)
            .unwrap_or_else(Self::Normalized::zero)
    }

    fn denormalize(&self, t: Self::Normalized) -> Self::Domain {
        self.denormalize_opt(t).unwrap_or_else(Self::Domain::zero)
    }

    /// Returns false when the conversion failed or the factor was rejected.
    fn pan(&mut self, delta_norm: Self::Normalized) -> bool {
        self.pan_opt(delta_norm).is_some()
    }

    fn zoom(&mut self, factor: Self::Normalized, anchor_norm: Option<Self::Normalized>) -> bool {
        self.zoom_opt(factor, anchor_norm).is_some()
    }

    fn ticks(&self) -> Vec<Tick<Self::Domain>> {
        self.tick_iter().collect()
    }

    /// Domain as `(lower, upper)` regardless of the stored orientation.
    fn bound(&self) -> (Self::Domain, Self::Domain) {
        let (a, b) = self.domain();
        util::sorted_pair(*a, *b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A scale whose conversions always fail.
    struct Broken;

    impl Scale for Broken {
        type Domain = f64;
        type Normalized = f32;

        fn domain(&self) -> (&f64, &f64) {
            (&1.0, &2.0)
        }

        fn set_domain(&mut self, _min: f64, _max: f64) {}

        fn normalize_opt(&self, _value: &f64) -> Option<f32> {
            None
        }

        fn denormalize_opt(&self, _t: f32) -> Option<f64> {
            None
        }

        fn pan_opt(&mut self, _delta_norm: f32) -> Option<()> {
            None
        }

        fn zoom_opt(&mut self, _factor: f32, _anchor_norm: Option<f32>) -> Option<()> {
            None
        }

        fn tick_iter(&self) -> TickIter<f64> {
            TickIter::from_vec(Vec::new())
        }
    }

    #[test]
    fn failed_conversions_fall_back_to_zero() {
        let mut scale = Broken;
        assert_eq!(scale.normalize(&1.5), 0.0f32);
        assert_eq!(scale.denormalize(0.5), 0.0f64);
        assert!(!scale.pan(0.1));
        assert!(!scale.zoom(2.0, None));
        assert!(scale.ticks().is_empty());
        assert_eq!(scale.bound(), (1.0, 2.0));
    }
}
