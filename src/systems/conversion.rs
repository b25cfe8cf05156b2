//! Prestige-currency conversion.
//!
//! A cumulative conversion reads a base resource, maps it through a
//! monotonic [`Formula`] and grants the floored result to a gain resource.
//! Because the formula is invertible, the conversion can also report how
//! much base is needed for the next whole point.

use crate::mechanics::Decimal;
use crate::systems::formula::Formula;
use crate::systems::resource::Resource;
use crate::systems::sdk::Lens;

/// Upper bound on correction steps in [`Conversion::next_at`].
const MAX_NUDGES: usize = 64;

pub struct Conversion<S> {
    pub base: Lens<S, Resource>,
    pub gain: Lens<S, Resource>,
    /// Base value to (unfloored) gain. Must be non-decreasing.
    pub formula: Formula<S>,
}

impl<S> Conversion<S> {
    pub fn new(base: Lens<S, Resource>, gain: Lens<S, Resource>, formula: Formula<S>) -> Self {
        Self { base, gain, formula }
    }

    /// Raw formula output for a hypothetical base value.
    pub fn gain_at(&self, state: &S, base: Decimal) -> Decimal {
        self.formula.evaluate(state, base)
    }

    /// Whole units a conversion would grant right now. Never negative;
    /// NaN if the formula is undefined at the current base.
    pub fn actual_gain(&self, state: &S) -> Decimal {
        self.gain_at(state, self.base.get(state).value())
            .floor()
            .max(Decimal::ZERO)
    }

    /// Smallest base value whose gain reaches `actual_gain + 1`.
    pub fn next_at(&self, state: &S) -> Decimal {
        let current = self.actual_gain(state);
        if !current.is_finite() {
            return current;
        }
        let target = current + Decimal::ONE;
        let reaches = |x: Decimal| self.gain_at(state, x) >= target;

        let mut x = self.formula.invert(state, target);
        if !x.is_finite() {
            return x;
        }
        // Float error can leave the inverse a hair off in either direction.
        for _ in 0..MAX_NUDGES {
            if reaches(x) {
                break;
            }
            x = nudge_up(x);
        }
        for _ in 0..MAX_NUDGES {
            let lower = nudge_down(x);
            if !reaches(lower) {
                break;
            }
            x = lower;
        }
        x
    }

    /// Grants `actual_gain` to the gain resource and returns it.
    /// Does not touch the base resource; resets are the caller's concern.
    pub fn convert(&self, state: &mut S) -> Decimal {
        let gain = self.actual_gain(state);
        if gain > Decimal::ZERO {
            self.gain.get_mut(state).add(gain);
        }
        gain
    }
}

fn nudge_up(x: Decimal) -> Decimal {
    if x.is_zero() {
        return Decimal::from_f64(f64::MIN_POSITIVE);
    }
    x + x.abs() * f64::EPSILON * 4.0
}

fn nudge_down(x: Decimal) -> Decimal {
    x - x.abs() * f64::EPSILON * 4.0
}
