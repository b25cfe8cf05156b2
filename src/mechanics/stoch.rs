/// Seeded randomness for simulated frame timing.
/// Uses `bevy_prng::WyRand` behind a `RefCell` so closures handed to the
/// driver loop stay `Fn` while still advancing RNG state.
use std::cell::RefCell;

use bevy_prng::WyRand;
use rand_core::{RngCore, SeedableRng};

/// Reproducible generator from a `u64` seed.
pub fn seeded(seed: u64) -> RefCell<WyRand> {
    RefCell::new(WyRand::from_seed(seed.to_le_bytes()))
}

/// Uniform in `[0, 1)` from the top 53 bits.
#[inline]
pub fn uniform01(rng: &RefCell<WyRand>) -> f64 {
    let x = rng.borrow_mut().next_u64();
    ((x >> 11) as f64) / ((1u64 << 53) as f64)
}

/// Gaussian(0,1) via Box-Muller.
#[inline]
pub fn gaussian01(rng: &RefCell<WyRand>) -> f64 {
    // 1 - u keeps the log argument in (0, 1].
    let u1 = 1.0 - uniform01(rng);
    let u2 = uniform01(rng);
    let r = (-2.0 * u1.ln()).sqrt();
    let t = 2.0 * std::f64::consts::PI * u2;
    r * t.cos()
}

/// Frame length `base * max(0, 1 + N(0,1) * jitter)`.
#[inline]
pub fn frame_delta(rng: &RefCell<WyRand>, base: f64, jitter: f64) -> f64 {
    base * (1.0 + gaussian01(rng) * jitter).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_frames() {
        let a = seeded(7);
        let b = seeded(7);
        for _ in 0..16 {
            assert_eq!(frame_delta(&a, 0.05, 0.2), frame_delta(&b, 0.05, 0.2));
        }
    }

    #[test]
    fn zero_jitter_is_exact() {
        let rng = seeded(1);
        assert_eq!(frame_delta(&rng, 0.05, 0.0), 0.05);
    }
}
