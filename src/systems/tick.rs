//! Simulation clock and gain accumulation.

use crate::config::GameConfig;
use crate::mechanics::Decimal;
use crate::systems::resource::Resource;

/// Converts wall-clock deltas into simulated seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Clock {
    dev_speed: f64,
    max_delta: f64,
    tick: u64,
    elapsed: f64,
}

impl Clock {
    pub fn new(dev_speed: f64, max_delta: f64) -> Self {
        Self {
            dev_speed,
            max_delta,
            tick: 0,
            elapsed: 0.0,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.dev_speed, config.max_tick_seconds)
    }

    pub fn dev_speed(&self) -> f64 {
        self.dev_speed
    }

    /// Non-finite or negative speeds are stored as zero (paused).
    pub fn set_dev_speed(&mut self, dev_speed: f64) {
        self.dev_speed = if dev_speed.is_finite() { dev_speed.max(0.0) } else { 0.0 };
    }

    pub fn max_delta(&self) -> f64 {
        self.max_delta
    }

    /// Ticks advanced so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds so far.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Starts a new tick and returns its simulated length. Garbage deltas
    /// (negative, NaN, infinite) count as zero; long gaps are capped.
    pub fn advance(&mut self, real_delta: f64) -> f64 {
        let real = if real_delta.is_finite() { real_delta.max(0.0) } else { 0.0 };
        let delta = real.min(self.max_delta) * self.dev_speed;
        self.tick += 1;
        self.elapsed += delta;
        delta
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// `resource += gain * delta`. A zero-length tick changes nothing, even
/// when `gain` is infinite or NaN.
pub fn accumulate(resource: &mut Resource, gain: Decimal, delta: f64) {
    if delta > 0.0 {
        resource.add(gain * delta);
    }
}
