use super::{util, Scale, Tick, TickIter};
use num_traits::Float;

/// Linear view scale: affine mapping of the visible domain onto `[0, 1]`.
///
/// The domain is kept exactly as set, so reversed axes work. Values outside
/// the domain are not clamped and map below 0 or above 1; the limits
/// transform relies on that to place off-screen points.
///
/// ```rust
/// use mollier::{Scale, scale::Linear};
///
/// // Enthalpy axis from -10 kJ/kg to 50 kJ/kg.
/// let mut scale = Linear::<f64, f64>::new(-1.0e4, 5.0e4);
/// assert_eq!(scale.normalize(&2.0e4), 0.5);
///
/// scale.zoom(2.0, None);
/// assert_eq!(scale.domain(), (&5.0e3, &3.5e4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linear<D, N = f64>
where
    D: Float,
    N: Float,
{
    min: D,
    max: D,
    _phantom: std::marker::PhantomData<N>,
}

fn lit<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::zero)
}

/// Smallest value of the 1-2-5 series that is not below `raw_step`.
fn nice_step<D: Float>(raw_step: D) -> D {
    let ten: D = lit(10.0);
    let abs_step = raw_step.abs();
    if abs_step == D::zero() || !abs_step.is_finite() {
        return abs_step;
    }

    let mut decade = D::one();
    while decade * ten < abs_step {
        decade = decade * ten;
    }
    while decade > abs_step {
        decade = decade / ten;
    }

    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| decade * lit(m))
        .find(|c| *c >= abs_step)
        .unwrap_or(decade * ten)
}

const MAX_MINOR_TICKS: usize = 100_000;
const MINOR_PER_MAJOR: usize = 10;

/// Major ticks at a 1-2-5 step (about ten per domain) with ten minor
/// divisions each, clipped to the domain.
pub struct LinearTickIter<D: Float> {
    state: LinearTickState<D>,
    remaining: usize,
}

enum LinearTickState<D: Float> {
    Single(Option<D>),
    Sweep(Sweep<D>),
    Done,
}

struct Sweep<D: Float> {
    start: D,
    minor_step: D,
    index: usize,
    lo: D,
    hi: D,
    epsilon: D,
    last: Option<D>,
}

impl<D: Float> LinearTickIter<D> {
    pub(crate) fn new(min: D, max: D) -> Self {
        if min == max {
            return Self {
                state: LinearTickState::Single(Some(min)),
                remaining: 1,
            };
        }

        let (lo, hi) = util::sorted_pair(min, max);
        let major_step = nice_step((hi - lo) / lit(10.0));
        let minor_step = major_step / lit(MINOR_PER_MAJOR as f64);
        if minor_step == D::zero() || !minor_step.is_finite() {
            return Self {
                state: LinearTickState::Single(Some(lo)),
                remaining: 1,
            };
        }

        Self {
            state: LinearTickState::Sweep(Sweep {
                start: (lo / major_step).floor() * major_step,
                minor_step,
                index: 0,
                lo,
                hi,
                epsilon: util::epsilon_from_step(minor_step),
                last: None,
            }),
            remaining: MAX_MINOR_TICKS,
        }
    }
}

impl<D: Float> Iterator for LinearTickIter<D> {
    type Item = Tick<D>;

    fn next(&mut self) -> Option<Self::Item> {
        let sweep = match &mut self.state {
            LinearTickState::Single(slot) => {
                return slot.take().map(|value| Tick { value, level: 0 });
            }
            LinearTickState::Sweep(sweep) => sweep,
            LinearTickState::Done => return None,
        };

        while self.remaining > 0 {
            self.remaining -= 1;
            let index = sweep.index;
            sweep.index += 1;

            // Index-based so rounding errors do not accumulate along the sweep.
            let mut value = sweep.start + sweep.minor_step * lit(index as f64);
            if value < sweep.lo {
                if sweep.lo - value > sweep.epsilon {
                    continue;
                }
                value = sweep.lo;
            } else if value > sweep.hi {
                if value - sweep.hi > sweep.epsilon {
                    break;
                }
                value = sweep.hi;
            }

            if sweep.last == Some(value) {
                continue;
            }
            sweep.last = Some(value);

            let level = if index % MINOR_PER_MAJOR == 0 { 0 } else { 1 };
            return Some(Tick { value, level });
        }

        self.state = LinearTickState::Done;
        None
    }
}

impl<D, N> Linear<D, N>
where
    D: Float,
    N: Float,
{
    pub fn new(min: D, max: D) -> Self {
        Self {
            min,
            max,
            _phantom: std::marker::PhantomData,
        }
    }

    fn span(&self) -> D {
        self.max - self.min
    }
}

impl<D, N> Scale for Linear<D, N>
where
    D: Float + 'static,
    N: Float,
{
    type Domain = D;
    type Normalized = N;

    fn domain(&self) -> (&D, &D) {
        (&self.min, &self.max)
    }

    fn set_domain(&mut self, min: D, max: D) {
        self.min = min;
        self.max = max;
    }

    fn normalize_opt(&self, value: &D) -> Option<N> {
        let span = self.span();
        if span == D::zero() {
            return Some(N::zero());
        }
        Some(N::from(*value - self.min)? / N::from(span)?)
    }

    fn denormalize_opt(&self, t: N) -> Option<D> {
        let scaled = t * N::from(self.span())?;
        Some(self.min + D::from(scaled)?)
    }

    fn pan_opt(&mut self, delta_norm: N) -> Option<()> {
        let shift = D::from(N::from(self.span())? * delta_norm)?;
        self.min = self.min + shift;
        self.max = self.max + shift;
        Some(())
    }

    fn zoom_opt(&mut self, factor: N, anchor_norm: Option<N>) -> Option<()> {
        if factor <= N::zero() {
            return None;
        }

        let anchor_norm = anchor_norm.unwrap_or_else(|| N::one() / (N::one() + N::one()));
        let anchor = self.denormalize_opt(anchor_norm)?;
        let new_span = N::from(self.span())? / factor;

        let below: D = D::from(new_span * anchor_norm)?;
        let above: D = D::from(new_span * (N::one() - anchor_norm))?;
        self.min = anchor - below;
        self.max = anchor + above;
        Some(())
    }

    fn tick_iter(&self) -> TickIter<D> {
        TickIter::from_linear(LinearTickIter::new(self.min, self.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_and_back() {
        let scale = Linear::<f64, f64>::new(0.0, 0.04);

        assert_eq!(scale.normalize(&0.0), 0.0);
        assert_eq!(scale.normalize(&0.02), 0.5);
        assert_eq!(scale.denormalize(1.0), 0.04);
    }

    #[test]
    fn reversed_domain_is_kept() {
        let scale = Linear::<f64, f64>::new(100.0, 0.0);

        assert_eq!(scale.normalize(&100.0), 0.0);
        assert_eq!(scale.normalize(&0.0), 1.0);
        assert_eq!(scale.bound(), (0.0, 100.0));
    }

    #[test]
    fn out_of_range_is_not_clamped() {
        let scale = Linear::<f64, f64>::new(0.0, 100.0);

        assert_eq!(scale.normalize(&150.0), 1.5);
        assert_eq!(scale.normalize(&-50.0), -0.5);
    }

    #[test]
    fn pan_shifts_by_span_fraction() {
        let mut scale = Linear::<f64, f64>::new(0.0, 100.0);
        assert!(scale.pan(0.1));
        assert_eq!(scale.domain(), (&10.0, &110.0));
    }

    #[test]
    fn zoom_around_anchor() {
        let mut scale = Linear::<f64, f64>::new(0.0, 100.0);
        assert!(scale.zoom(2.0, Some(0.25)));
        assert_eq!(scale.domain(), (&12.5, &62.5));

        assert!(!scale.zoom(0.0, None));
        assert_eq!(scale.domain(), (&12.5, &62.5));
    }

    #[test]
    fn ticks_stay_inside_domain_and_are_sorted() {
        let scale = Linear::<f64, f64>::new(-1.0e4, 5.0e4);
        let ticks = scale.ticks();

        assert!(!ticks.is_empty());
        for pair in ticks.windows(2) {
            assert!(pair[1].value > pair[0].value);
        }
        for tick in &ticks {
            assert!(tick.value >= -1.0e4 && tick.value <= 5.0e4);
        }

        let majors: Vec<f64> = ticks
            .iter()
            .filter(|t| t.is_major())
            .map(|t| t.value)
            .collect();
        assert!(majors.contains(&0.0));
        assert!(majors.contains(&5.0e4));
    }

    #[test]
    fn degenerate_domain_yields_single_tick() {
        let scale = Linear::<f64, f64>::new(3.0, 3.0);
        assert_eq!(scale.ticks(), vec![Tick { value: 3.0, level: 0 }]);
    }

    #[test]
    fn nice_step_picks_series_value() {
        assert_eq!(nice_step(6000.0f64), 10000.0);
        assert!((nice_step(0.004f64) - 0.005).abs() < 1e-15);
        assert_eq!(nice_step(1.5f64), 2.0);
    }
}
