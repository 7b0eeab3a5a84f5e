use num_traits::Float;

/// Return `(min, max)` for two owned values.
pub fn sorted_pair<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Inclusive containment test on an interval given in either order.
///
/// NaN is never contained.
pub fn interval_contains<T: PartialOrd + Copy>(interval: (T, T), value: T) -> bool {
    let (lo, hi) = sorted_pair(interval.0, interval.1);
    lo <= value && value <= hi
}

/// Tolerance used when snapping ticks onto the domain ends: a tenth of the step.
pub fn epsilon_from_step<T: Float>(step: T) -> T {
    step / T::from(10.0).unwrap_or_else(T::one)
}
