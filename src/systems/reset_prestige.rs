//! Reset propagation and the prestige state machine.
//!
//! A prestige moves through `Idle -> Triggered -> Validating -> Applying ->
//! Propagating -> Idle`. Validation is the only phase that can fail, and it
//! runs before anything is written. Planning the cascade is a pure read of
//! the pre-reset state; applying the plan is the only mutation.
//!
//! What a layer resets is not a fixed list: each layer carries a scope
//! resolver `(state, trigger) -> entities`, so permanent unlocks can shrink
//! the scope at reset time.

use std::collections::VecDeque;
use std::fmt;

#[cfg(feature = "system-conversion")]
use crate::error::PrestigeError;
#[cfg(feature = "system-conversion")]
use crate::mechanics::Decimal;
#[cfg(feature = "system-conversion")]
use crate::systems::conversion::Conversion;
use crate::systems::sdk::Predicate;

/// Implemented by the game state for every entity key it can restore.
pub trait ResetTarget<K> {
    /// Restores one entity to its construction-time default.
    fn reset_entity(&mut self, key: &K);
}

/// Scope resolver for one layer. `L` is the layer that started the cascade.
pub struct Reset<S, L, K> {
    scope: Box<dyn Fn(&S, &L) -> Vec<K>>,
}

impl<S, L, K> Reset<S, L, K> {
    pub fn new(scope: impl Fn(&S, &L) -> Vec<K> + 'static) -> Self {
        Self {
            scope: Box::new(scope),
        }
    }

    /// The same entities on every reset.
    pub fn fixed(keys: Vec<K>) -> Self
    where
        K: Clone + 'static,
    {
        Self::new(move |_, _| keys.clone())
    }

    pub fn resolve(&self, state: &S, trigger: &L) -> Vec<K> {
        (self.scope)(state, trigger)
    }
}

/// Resetting `start` also resets `end` while `enabled` holds.
pub struct Branch<S, L> {
    pub start: L,
    pub end: L,
    pub enabled: Predicate<S>,
}

impl<S, L> Branch<S, L> {
    pub fn new(start: L, end: L) -> Self {
        Self {
            start,
            end,
            enabled: Predicate::always(),
        }
    }

    pub fn enabled_when(mut self, enabled: impl Into<Predicate<S>>) -> Self {
        self.enabled = enabled.into();
        self
    }
}

/// Layers reached by a cascade and the entities to restore, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct ResetPlan<L, K> {
    pub trigger: L,
    pub layers: Vec<L>,
    pub entities: Vec<K>,
}

impl<L, K> ResetPlan<L, K> {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

pub struct ResetGraph<S, L, K> {
    resets: Vec<(L, Reset<S, L, K>)>,
    branches: Vec<Branch<S, L>>,
}

impl<S, L, K> Default for ResetGraph<S, L, K> {
    fn default() -> Self {
        Self {
            resets: Vec::new(),
            branches: Vec::new(),
        }
    }
}

impl<S, L: Copy + PartialEq + fmt::Debug, K> ResetGraph<S, L, K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reset(mut self, layer: L, reset: Reset<S, L, K>) -> Self {
        self.resets.push((layer, reset));
        self
    }

    pub fn with_branch(mut self, branch: Branch<S, L>) -> Self {
        self.branches.push(branch);
        self
    }

    pub fn reset_for(&self, layer: L) -> Option<&Reset<S, L, K>> {
        self.resets
            .iter()
            .find(|(owner, _)| *owner == layer)
            .map(|(_, reset)| reset)
    }

    /// Layers directly downstream of `layer` through enabled branches.
    pub fn children(&self, state: &S, layer: L) -> Vec<L> {
        self.branches
            .iter()
            .filter(|branch| branch.start == layer && branch.enabled.get(state))
            .map(|branch| branch.end)
            .collect()
    }

    /// Breadth-first walk of enabled branches from `trigger`. Each layer is
    /// visited once, cycles are cut, and `trigger` itself is excluded. All
    /// scopes resolve against the state as it is now.
    pub fn plan(&self, state: &S, trigger: L) -> ResetPlan<L, K> {
        let mut visited = vec![trigger];
        let mut queue = VecDeque::from([trigger]);
        let mut layers = Vec::new();
        while let Some(layer) = queue.pop_front() {
            for child in self.children(state, layer) {
                if visited.contains(&child) {
                    continue;
                }
                visited.push(child);
                layers.push(child);
                queue.push_back(child);
            }
        }

        let entities = layers
            .iter()
            .filter_map(|&layer| self.reset_for(layer))
            .flat_map(|reset| reset.resolve(state, &trigger))
            .collect();
        ResetPlan {
            trigger,
            layers,
            entities,
        }
    }

    pub fn apply(&self, state: &mut S, plan: &ResetPlan<L, K>)
    where
        S: ResetTarget<K>,
    {
        for key in &plan.entities {
            state.reset_entity(key);
        }
    }

    /// Plans and applies in one step.
    pub fn reset(&self, state: &mut S, trigger: L) -> ResetPlan<L, K>
    where
        S: ResetTarget<K>,
    {
        let plan = self.plan(state, trigger);
        self.apply(state, &plan);
        plan
    }
}

/// Conditions a layer's prestige must meet.
#[cfg(feature = "system-conversion")]
pub struct PrestigeGate<S> {
    pub min_gain: Decimal,
    pub unlocked: Predicate<S>,
}

#[cfg(feature = "system-conversion")]
impl<S> PrestigeGate<S> {
    pub fn new(min_gain: impl Into<Decimal>) -> Self {
        Self {
            min_gain: min_gain.into(),
            unlocked: Predicate::always(),
        }
    }

    pub fn unlocked_when(mut self, unlocked: impl Into<Predicate<S>>) -> Self {
        self.unlocked = unlocked.into();
        self
    }

    pub fn check(&self, state: &S, gain: Decimal) -> Result<(), PrestigeError> {
        if !self.unlocked.get(state) {
            return Err(PrestigeError::Locked);
        }
        if !(gain >= self.min_gain) {
            return Err(PrestigeError::InsufficientGain {
                gain,
                required: self.min_gain,
            });
        }
        Ok(())
    }
}

/// Runs one prestige of `trigger`: validate, cascade resets downstream,
/// then grant the conversion gain. Returns the gain granted.
///
/// The gain is computed before the cascade, since the cascade usually
/// resets the conversion's base resource.
#[cfg(feature = "system-conversion")]
pub fn prestige<S, L, K>(
    state: &mut S,
    trigger: L,
    conversion: &Conversion<S>,
    gate: &PrestigeGate<S>,
    graph: &ResetGraph<S, L, K>,
) -> Result<Decimal, PrestigeError>
where
    S: ResetTarget<K>,
    L: Copy + PartialEq + fmt::Debug,
{
    let span = tracing::debug_span!("prestige", layer = ?trigger);
    let _enter = span.enter();

    let gain = {
        let _validating = tracing::debug_span!("validating").entered();
        let gain = conversion.actual_gain(state);
        if let Err(err) = gate.check(state, gain) {
            tracing::debug!(%err, "prestige rejected");
            return Err(err);
        }
        gain
    };

    let plan = {
        let _propagating = tracing::debug_span!("propagating").entered();
        graph.plan(state, trigger)
    };
    {
        let _applying = tracing::debug_span!("applying", entities = plan.entities.len()).entered();
        graph.apply(state, &plan);
    }
    conversion.gain.get_mut(state).add(gain);

    tracing::info!(%gain, layers = ?plan.layers, "prestige complete");
    Ok(gain)
}
