//! Rebirth: the first prestige tier, converting Cash into RP.

use crate::genres::idle::state::{
    CashUpgrade, IdleEntity, IdleState, LayerId, RebirthBuyable, RebirthUpgrade, SuperAchievement,
};
use crate::genres::idle::{computed, pre_super_pays, super_rebirth, when};
use crate::genres::sdk::Layer;
use crate::lens;
use crate::mechanics::Decimal;
use crate::systems::conversion::Conversion;
use crate::systems::formula::Formula;
use crate::systems::modifier::{Modifier, Term};
use crate::systems::purchasable::{Repeatable, Repeatables, Upgrade, Upgrades};
use crate::systems::requirement::CostRequirement;
use crate::systems::reset_prestige::{PrestigeGate, Reset};
use crate::systems::resource::Resource;

/// Display values of the Rebirth layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RebirthEffects {
    /// Cash multiplier from lifetime RP, active with Going Public.
    pub rp_innate: Decimal,
    pub upgrade_count: usize,
    pub polynomial_synergy: Decimal,
    pub printer_scaling: Decimal,
    pub exponential_synergy: Decimal,
    pub free_printers: Decimal,
    pub injection_mult: Decimal,
    /// Multiplier on RP from a Rebirth, as of the last refresh.
    pub gain_mult: Decimal,
}

/// `log10(max(total, 0) * 12 + 1) + 1`
pub fn rp_innate(state: &IdleState) -> Decimal {
    (state.rebirth.points.total().max(Decimal::ZERO) * 12.0 + 1.0).log10() + 1.0
}

fn upgrade_count(state: &IdleState) -> Decimal {
    Decimal::from(state.rebirth_upgrade_count())
}

/// Added to Polynomial Growth's per-printer boost.
pub fn polynomial_synergy(state: &IdleState) -> Decimal {
    upgrade_count(state) * 0.02
}

/// Factor on the printer cost growth rate.
pub fn printer_scaling(state: &IdleState) -> Decimal {
    Decimal::from_f64(1.1).pow(upgrade_count(state)).recip()
}

/// Added to Exponential Growth's per-ten-printers boost.
pub fn exponential_synergy(state: &IdleState) -> Decimal {
    upgrade_count(state) * 0.05
}

pub fn free_printers(state: &IdleState) -> Decimal {
    upgrade_count(state) * 5.0
}

/// `1.5 ^ cash_injections`
pub fn injection_mult(state: &IdleState) -> Decimal {
    Decimal::from(state.rebirth_amount(RebirthBuyable::CashInjection)).pow_base(Decimal::from_f64(1.5))
}

pub struct RebirthLayer {
    pub upgrades: Upgrades<IdleState>,
    pub buyables: Repeatables<IdleState>,
    /// Base 1; feeds the conversion through `Signals::rebirth_gain_mult`.
    pub gain_mult: Modifier<IdleState>,
    pub conversion: Conversion<IdleState>,
    pub gate: PrestigeGate<IdleState>,
}

impl RebirthLayer {
    pub fn new() -> Self {
        let points = lens!(IdleState => rebirth.points);

        let upgrade = |which: RebirthUpgrade, cost: f64| {
            Upgrade::new(
                which.to_string(),
                CostRequirement::flat(points, cost).with_requires_pay(when(pre_super_pays)),
            )
        };

        let upgrades = Upgrades::new(lens!(IdleState => rebirth.upgrades))
            .with(upgrade(RebirthUpgrade::PolynomialSynergy, 3.0))
            .with(upgrade(RebirthUpgrade::CheaperPrinters, 3.0))
            .with(upgrade(RebirthUpgrade::ExponentialSynergy, 3.0))
            .with(upgrade(RebirthUpgrade::FreePrinters, 3.0))
            .with(upgrade(RebirthUpgrade::Continuity, 1e9));

        let buyables = Repeatables::new(lens!(IdleState => rebirth.buyables)).with(Repeatable::new(
            RebirthBuyable::CashInjection.to_string(),
            CostRequirement::scaling(points, Formula::variable().pow_base(3.0).mul(5.0))
                .with_requires_pay(when(|s| !s.has_achievement(SuperAchievement::Three))),
        ));

        let gain_mult = Modifier::new()
            .with(Term::multiplicative("SRP Effect", computed(super_rebirth::srp_effect)))
            .with(
                Term::multiplicative("Unable to Rebirth", 0.0)
                    .enabled_when(when(|s| !s.has_cash_upgrade(CashUpgrade::GoingPublic))),
            );

        let conversion = Conversion::new(
            lens!(IdleState => cash.points),
            points,
            Formula::variable()
                .div(500_000.0)
                .pow(0.3)
                .mul(computed(|s| s.signals.rebirth_gain_mult)),
        );

        Self {
            upgrades,
            buyables,
            gain_mult,
            conversion,
            gate: PrestigeGate::new(1.0),
        }
    }

    pub fn effects(&self, state: &IdleState) -> RebirthEffects {
        RebirthEffects {
            rp_innate: rp_innate(state),
            upgrade_count: state.rebirth_upgrade_count(),
            polynomial_synergy: polynomial_synergy(state),
            printer_scaling: printer_scaling(state),
            exponential_synergy: exponential_synergy(state),
            free_printers: free_printers(state),
            injection_mult: injection_mult(state),
            gain_mult: state.signals.rebirth_gain_mult,
        }
    }

    /// Points, tracking and the buyable always reset. With the 10 SRP
    /// milestone, one upgrade per milestone past it survives.
    pub fn reset() -> Reset<IdleState, LayerId, IdleEntity> {
        Reset::new(|state: &IdleState, _trigger: &LayerId| {
            let keep = if state.has_achievement(SuperAchievement::Ten) {
                state.achievement_count().saturating_sub(3)
            } else {
                0
            };
            vec![
                IdleEntity::Points(LayerId::Rebirth),
                IdleEntity::Tracking(LayerId::Rebirth),
                IdleEntity::Buyables(LayerId::Rebirth),
                IdleEntity::Upgrades {
                    layer: LayerId::Rebirth,
                    keep,
                },
            ]
        })
    }
}

impl Default for RebirthLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer<IdleState> for RebirthLayer {
    fn name(&self) -> &'static str {
        "Rebirth"
    }

    fn points<'a>(&self, state: &'a IdleState) -> &'a Resource {
        &state.rebirth.points
    }

    fn points_mut<'a>(&self, state: &'a mut IdleState) -> &'a mut Resource {
        &mut state.rebirth.points
    }
}
