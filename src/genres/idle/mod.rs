// src/genres/idle/mod.rs
#![cfg(feature = "genre-idle")]

//! Idle genre: a three-tier prestige game.
//!
//! Layers, leaf first:
//! - **Cash** → produced every tick by Money Printers, boosted by upgrades
//! - **Rebirth** → resets Cash for RP; RP upgrades boost Cash
//! - **Super** → resets Rebirth (and through it Cash) for SRP; SRP
//!   milestones automate purchases and shrink what later resets touch
//!
//! [`IdleGame`] owns the definitions of all three layers plus the state
//! they operate on, and exposes the in-process surface a presentation layer
//! needs: points, gains, effects, purchase and prestige actions, and the
//! tick entry point.
//!
//! Tick order is fixed: gains are computed from one snapshot and credited,
//! then achievements are evaluated, then auto-purchase rules run, and
//! finally the cross-layer [`Signals`] are refreshed for the next tick.
//! Player actions (`purchase`, `prestige`) happen between ticks and refresh
//! the signals again when they succeed, so an achievement earned in a tick
//! is always in effect before any reset the player triggers afterwards and a
//! reset that re-locks a layer is visible to the very next action.

pub mod cash;
pub mod playthrough;
pub mod rebirth;
pub mod state;
pub mod super_rebirth;

pub use cash::{CashEffects, CashLayer};
pub use rebirth::{RebirthEffects, RebirthLayer};
pub use state::*;
pub use super_rebirth::{SuperEffects, SuperLayer};

use crate::config::GameConfig;
use crate::error::{ConfigError, PrestigeError, PurchaseError};
use crate::genres::sdk::{accumulate_layers, Layer, Signals};
use crate::mechanics::Decimal;
use crate::systems::auto_purchase::AutoPurchaser;
use crate::systems::modifier::TermRow;
use crate::systems::requirement::PurchaseStatus;
use crate::systems::reset_prestige::{self, Branch, ResetGraph};
use crate::systems::resource::Resource;
use crate::systems::sdk::{Operand, Predicate};
use crate::systems::tick::Clock;

/// Progression milestone reached by completing a Super Rebirth.
pub const PROGRESSION_SUPER: u32 = 4;
/// Progression milestone reached with the 50 SRP achievement.
pub const PROGRESSION_CHALLENGES: u32 = 5;

pub(crate) fn computed(f: fn(&IdleState) -> Decimal) -> Operand<IdleState> {
    Operand::from_fn(f)
}

pub(crate) fn when(f: fn(&IdleState) -> bool) -> Predicate<IdleState> {
    Predicate::from_fn(f)
}

/// Pre-Super upgrades cost nothing once 1 SRP has been reached.
pub(crate) fn pre_super_pays(state: &IdleState) -> bool {
    !state.has_achievement(SuperAchievement::One)
}

/// Rebirth cascades into Cash once Rebirth is unlocked; Super cascades into
/// Rebirth once Continuity is bought or a Super Rebirth has happened.
pub fn reset_graph() -> ResetGraph<IdleState, LayerId, IdleEntity> {
    ResetGraph::new()
        .with_reset(LayerId::Cash, CashLayer::reset())
        .with_reset(LayerId::Rebirth, RebirthLayer::reset())
        .with_reset(LayerId::Super, SuperLayer::reset())
        .with_branch(Branch::new(LayerId::Rebirth, LayerId::Cash).enabled_when(when(|s| {
            s.has_cash_upgrade(CashUpgrade::GoingPublic)
                || s.rebirth.points.best() > Decimal::ZERO
        })))
        .with_branch(Branch::new(LayerId::Super, LayerId::Rebirth).enabled_when(when(|s| {
            s.has_rebirth_upgrade(RebirthUpgrade::Continuity) || s.progression >= PROGRESSION_SUPER
        })))
}

pub struct IdleGame {
    config: GameConfig,
    clock: Clock,
    state: IdleState,
    cash: CashLayer,
    rebirth: RebirthLayer,
    super_rebirth: SuperLayer,
    graph: ResetGraph<IdleState, LayerId, IdleEntity>,
    auto_purchaser: AutoPurchaser<IdleState, Target>,
}

impl IdleGame {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_state(config, IdleState::default())
    }

    /// Resumes from persisted state. Signals are recomputed immediately.
    pub fn with_state(config: GameConfig, state: IdleState) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut game = Self {
            clock: Clock::from_config(&config),
            config,
            state,
            cash: CashLayer::new(),
            rebirth: RebirthLayer::new(),
            super_rebirth: SuperLayer::new(),
            graph: reset_graph(),
            auto_purchaser: SuperLayer::auto_purchaser(),
        };
        game.refresh_signals();
        Ok(game)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn state(&self) -> &IdleState {
        &self.state
    }

    pub fn into_state(self) -> IdleState {
        self.state
    }

    pub fn signals(&self) -> &Signals {
        &self.state.signals
    }

    pub fn cash_layer(&self) -> &CashLayer {
        &self.cash
    }

    pub fn rebirth_layer(&self) -> &RebirthLayer {
        &self.rebirth
    }

    pub fn super_layer(&self) -> &SuperLayer {
        &self.super_rebirth
    }

    pub fn points(&self, layer: LayerId) -> &Resource {
        self.state.points(layer)
    }

    /// Passive gain per second. Only Cash has one.
    pub fn point_gain(&self, layer: LayerId) -> Decimal {
        self.layer(layer)
            .point_gain(&self.state)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn cash_effects(&self) -> CashEffects {
        self.cash.effects(&self.state)
    }

    pub fn rebirth_effects(&self) -> RebirthEffects {
        self.rebirth.effects(&self.state)
    }

    pub fn super_effects(&self) -> SuperEffects {
        self.super_rebirth.effects(&self.state)
    }

    /// Term-by-term view of a layer's headline modifier: Cash gain from a
    /// base of 0, or the Rebirth/Super gain multiplier from a base of 1.
    pub fn gain_breakdown(&self, layer: LayerId) -> Vec<TermRow> {
        match layer {
            LayerId::Cash => self.cash.gain.breakdown(&self.state, Decimal::ZERO),
            LayerId::Rebirth => self.rebirth.gain_mult.breakdown(&self.state, Decimal::ONE),
            LayerId::Super => self.super_rebirth.gain_mult.breakdown(&self.state, Decimal::ONE),
        }
    }

    pub fn status(&self, target: Target) -> Option<PurchaseStatus> {
        match target {
            Target::CashUpgrade(u) => self.cash.upgrades.status(&self.state, u.index()),
            Target::CashBuyable(b) => self.cash.buyables.status(&self.state, b.index()),
            Target::RebirthUpgrade(u) => self.rebirth.upgrades.status(&self.state, u.index()),
            Target::RebirthBuyable(b) => self.rebirth.buyables.status(&self.state, b.index()),
        }
    }

    /// Price of the next purchase of `target`.
    pub fn cost(&self, target: Target) -> Option<Decimal> {
        match target {
            Target::CashUpgrade(u) => self.cash.upgrades.cost(&self.state, u.index()),
            Target::CashBuyable(b) => self.cash.buyables.cost(&self.state, b.index()),
            Target::RebirthUpgrade(u) => self.rebirth.upgrades.cost(&self.state, u.index()),
            Target::RebirthBuyable(b) => self.rebirth.buyables.cost(&self.state, b.index()),
        }
    }

    pub fn can_purchase(&self, target: Target) -> bool {
        self.status(target)
            .is_some_and(PurchaseStatus::is_purchasable)
    }

    pub fn purchase(&mut self, target: Target) -> Result<(), PurchaseError> {
        let result = purchase_target(&self.cash, &self.rebirth, &mut self.state, target);
        match &result {
            Ok(()) => self.refresh_signals(),
            Err(err) => tracing::debug!(%target, %err, "purchase rejected"),
        }
        result
    }

    /// RP or SRP a prestige would grant now; `None` for Cash.
    pub fn actual_gain(&self, layer: LayerId) -> Option<Decimal> {
        self.conversion(layer)
            .map(|conversion| conversion.actual_gain(&self.state))
    }

    /// Base needed for one more point of prestige currency; `None` for Cash.
    pub fn next_at(&self, layer: LayerId) -> Option<Decimal> {
        self.conversion(layer)
            .map(|conversion| conversion.next_at(&self.state))
    }

    pub fn can_prestige(&self, layer: LayerId) -> bool {
        match (self.conversion(layer), self.gate(layer)) {
            (Some(conversion), Some(gate)) => gate
                .check(&self.state, conversion.actual_gain(&self.state))
                .is_ok(),
            _ => false,
        }
    }

    /// Resets downstream layers and grants the gain. Rejected with no side
    /// effects when the gate is not met.
    pub fn prestige(&mut self, layer: LayerId) -> Result<Decimal, PrestigeError> {
        let (conversion, gate) = match layer {
            LayerId::Cash => return Err(PrestigeError::NoConversion),
            LayerId::Rebirth => (&self.rebirth.conversion, &self.rebirth.gate),
            LayerId::Super => (&self.super_rebirth.conversion, &self.super_rebirth.gate),
        };
        let gain = reset_prestige::prestige(&mut self.state, layer, conversion, gate, &self.graph)?;
        if layer == LayerId::Super {
            self.state.raise_progression(PROGRESSION_SUPER);
        }
        // A reset can flip gates such as "Unable to Rebirth".
        self.refresh_signals();
        Ok(gain)
    }

    pub fn set_dev_speed(&mut self, dev_speed: f64) {
        self.clock.set_dev_speed(dev_speed);
        self.config.dev_speed = self.clock.dev_speed();
    }

    /// Advances the game by `real_delta` wall-clock seconds and returns the
    /// simulated seconds credited.
    pub fn tick(&mut self, real_delta: f64) -> f64 {
        let delta = self.clock.advance(real_delta);
        let _span = tracing::trace_span!("tick", tick = self.clock.tick(), delta).entered();

        let layers: [&dyn Layer<IdleState>; 3] = [&self.cash, &self.rebirth, &self.super_rebirth];
        accumulate_layers(&mut self.state, &layers, delta);

        let earned = self.super_rebirth.achievements.evaluate(&mut self.state);
        if earned.contains(&SuperAchievement::Fifty.index()) {
            self.state.raise_progression(PROGRESSION_CHALLENGES);
        }

        if self.config.auto_purchase {
            let (cash, rebirth) = (&self.cash, &self.rebirth);
            let bought = self
                .auto_purchaser
                .run(&mut self.state, |state, target| purchase_target(cash, rebirth, state, target));
            if bought > 0 {
                tracing::trace!(bought, "auto-purchase");
            }
        }

        self.refresh_signals();
        delta
    }

    fn refresh_signals(&mut self) {
        let signals = Signals {
            tick: self.clock.tick(),
            rebirth_gain_mult: self.rebirth.gain_mult.apply(&self.state, Decimal::ONE),
            super_gain_mult: self.super_rebirth.gain_mult.apply(&self.state, Decimal::ONE),
        };
        self.state.signals = signals;
    }

    fn layer(&self, layer: LayerId) -> &dyn Layer<IdleState> {
        match layer {
            LayerId::Cash => &self.cash,
            LayerId::Rebirth => &self.rebirth,
            LayerId::Super => &self.super_rebirth,
        }
    }

    fn conversion(&self, layer: LayerId) -> Option<&crate::systems::conversion::Conversion<IdleState>> {
        match layer {
            LayerId::Cash => None,
            LayerId::Rebirth => Some(&self.rebirth.conversion),
            LayerId::Super => Some(&self.super_rebirth.conversion),
        }
    }

    fn gate(&self, layer: LayerId) -> Option<&reset_prestige::PrestigeGate<IdleState>> {
        match layer {
            LayerId::Cash => None,
            LayerId::Rebirth => Some(&self.rebirth.gate),
            LayerId::Super => Some(&self.super_rebirth.gate),
        }
    }
}

fn purchase_target(
    cash: &CashLayer,
    rebirth: &RebirthLayer,
    state: &mut IdleState,
    target: Target,
) -> Result<(), PurchaseError> {
    match target {
        Target::CashUpgrade(u) => cash.upgrades.purchase(state, u.index()),
        Target::CashBuyable(b) => cash.buyables.purchase(state, b.index()),
        Target::RebirthUpgrade(u) => rebirth.upgrades.purchase(state, u.index()),
        Target::RebirthBuyable(b) => rebirth.buyables.purchase(state, b.index()),
    }
}
