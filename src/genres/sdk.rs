// src/genres/sdk.rs

//! # Genre SDK
//!
//! Glue for building **genres**: concrete games assembled from the neutral
//! systems in `crate::systems`.
//!
//! ## What a genre is
//! A genre owns one state type (every resource, flag and amount the game
//! persists) and a set of **layers**, one per prestige tier. Each layer is a
//! bundle of system definitions (modifiers, purchasables, a conversion, a
//! reset scope) that reach into the shared state through lenses. The genre
//! wires layers together with a reset graph and drives them from a tick.
//!
//! ## Cross-layer reads
//! Layers read each other's state freely but only through `&S`. When one
//! layer's formula depends on another layer's *modifier output* (which may
//! in turn depend on the first layer), read it from [`Signals`] instead of
//! recomputing it: signals are refreshed at the end of every tick and after
//! every player action that changes state, so the dependency resolves to an
//! already-computed value and never recurses.
//!
//! ## The tick
//! [`accumulate_layers`] computes every layer's gain from the same snapshot
//! before crediting any of them, so the order layers are listed in never
//! changes the result of a tick. A genre's tick typically runs:
//! 1. advance the clock,
//! 2. `accumulate_layers`,
//! 3. evaluate achievements,
//! 4. run auto-purchase rules,
//! 5. refresh signals.
//!
//! ## Steps to add a new genre
//! 1. Create `src/genres/<name>/` with a state module and one module per layer.
//! 2. Implement [`Layer`] for each layer.
//! 3. Implement `ResetTarget` for the state and build a `ResetGraph`.
//! 4. Expose a game object that owns the definitions and the state.

use crate::mechanics::Decimal;
use crate::systems::resource::Resource;
use crate::systems::tick;

/// Cross-layer values memoized per tick and after each player action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Signals {
    /// Tick number these values were computed at.
    pub tick: u64,
    pub rebirth_gain_mult: Decimal,
    pub super_gain_mult: Decimal,
}

impl Default for Signals {
    fn default() -> Self {
        Self {
            tick: 0,
            rebirth_gain_mult: Decimal::ONE,
            super_gain_mult: Decimal::ONE,
        }
    }
}

/// One prestige tier as seen by the tick loop.
pub trait Layer<S> {
    fn name(&self) -> &'static str;

    fn points<'a>(&self, state: &'a S) -> &'a Resource;

    fn points_mut<'a>(&self, state: &'a mut S) -> &'a mut Resource;

    /// Passive gain per simulated second; `None` if the layer has none.
    fn point_gain(&self, _state: &S) -> Option<Decimal> {
        None
    }
}

/// Credits every layer's passive gain for `delta` simulated seconds.
/// All gains are computed before any resource changes.
pub fn accumulate_layers<S>(state: &mut S, layers: &[&dyn Layer<S>], delta: f64) {
    let gains: Vec<Option<Decimal>> = layers
        .iter()
        .map(|layer| layer.point_gain(state))
        .collect();
    for (layer, gain) in layers.iter().zip(gains) {
        if let Some(gain) = gain {
            tracing::trace!(layer = layer.name(), %gain, delta, "accumulate");
            tick::accumulate(layer.points_mut(state), gain, delta);
        }
    }
}
