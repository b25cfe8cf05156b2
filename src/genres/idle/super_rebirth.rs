//! Super Rebirth: the second prestige tier, converting RP into SRP and
//! awarding permanent milestones.

use strum::IntoEnumIterator;

use crate::genres::idle::state::{
    IdleEntity, IdleState, LayerId, RebirthBuyable, RebirthUpgrade, SuperAchievement, Target,
};
use crate::genres::idle::{computed, when};
use crate::genres::sdk::Layer;
use crate::lens;
use crate::mechanics::Decimal;
use crate::systems::achievement::{Achievement, Achievements};
use crate::systems::auto_purchase::{AutoPurchaseRule, AutoPurchaser};
use crate::systems::conversion::Conversion;
use crate::systems::formula::Formula;
use crate::systems::modifier::Modifier;
use crate::systems::reset_prestige::{PrestigeGate, Reset};
use crate::systems::resource::Resource;
use crate::systems::sdk::Predicate;

/// Display values of the Super Rebirth layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SuperEffects {
    /// RP gain multiplier from held SRP.
    pub srp_effect: Decimal,
    /// Cash gain multiplier from held SRP.
    pub srp_cash_effect: Decimal,
    /// Multiplier on SRP from a Super Rebirth, as of the last refresh.
    pub gain_mult: Decimal,
    pub achievements: usize,
    pub upgrades_free: bool,
    pub injection_free: bool,
    /// Cash upgrades (from the first) that survive a Super Rebirth.
    pub cash_upgrades_kept: usize,
    /// RP upgrades (from the first) that survive a Super Rebirth.
    pub rebirth_upgrades_kept: usize,
    pub assembly_line_unlocked: bool,
}

/// `(max(SRP, 0) + 1) ^ 1.25`
pub fn srp_effect(state: &IdleState) -> Decimal {
    (state.super_rebirth.points.value().max(Decimal::ZERO) + 1.0).powf(1.25)
}

/// `(max(SRP, 0) + 1) ^ 1.75`
pub fn srp_cash_effect(state: &IdleState) -> Decimal {
    (state.super_rebirth.points.value().max(Decimal::ZERO) + 1.0).powf(1.75)
}

pub struct SuperLayer {
    pub achievements: Achievements<IdleState>,
    /// Base 1; feeds the conversion through `Signals::super_gain_mult`.
    pub gain_mult: Modifier<IdleState>,
    pub conversion: Conversion<IdleState>,
    pub gate: PrestigeGate<IdleState>,
}

impl SuperLayer {
    pub fn new() -> Self {
        let achievements = SuperAchievement::iter().fold(
            Achievements::new(lens!(IdleState => super_rebirth.achievements)),
            |achievements, milestone| {
                let threshold = milestone.threshold();
                let earned = Predicate::from_fn(move |s: &IdleState| {
                    s.super_rebirth.points.value() >= threshold
                });
                let visible = match milestone.prerequisite() {
                    Some(prerequisite) => {
                        Predicate::from_fn(move |s: &IdleState| s.has_achievement(prerequisite))
                    }
                    None => Predicate::always(),
                };
                achievements.with(Achievement::new(milestone.to_string(), earned).visible_when(visible))
            },
        );

        // log_100(rp / 1e14) ^ 2.4; undefined (NaN) below 1e14 RP.
        let conversion = Conversion::new(
            lens!(IdleState => rebirth.points),
            lens!(IdleState => super_rebirth.points),
            Formula::variable()
                .div(1e14)
                .log(100.0)
                .pow(2.4)
                .mul(computed(|s| s.signals.super_gain_mult)),
        );

        Self {
            achievements,
            gain_mult: Modifier::new(),
            conversion,
            gate: PrestigeGate::new(1.0)
                .unlocked_when(when(|s| s.has_rebirth_upgrade(RebirthUpgrade::Continuity))),
        }
    }

    pub fn effects(&self, state: &IdleState) -> SuperEffects {
        let earned = self.achievements.earned_count(state);
        let milestones_kept = state.has_achievement(SuperAchievement::Ten);
        SuperEffects {
            srp_effect: srp_effect(state),
            srp_cash_effect: srp_cash_effect(state),
            gain_mult: state.signals.super_gain_mult,
            achievements: earned,
            upgrades_free: state.has_achievement(SuperAchievement::One),
            injection_free: state.has_achievement(SuperAchievement::Three),
            cash_upgrades_kept: if milestones_kept { earned } else { 0 },
            rebirth_upgrades_kept: if milestones_kept { earned.saturating_sub(3) } else { 0 },
            assembly_line_unlocked: state.has_achievement(SuperAchievement::TwentyFive),
        }
    }

    /// Milestone automation: each rule buys through the normal purchase path.
    pub fn auto_purchaser() -> AutoPurchaser<IdleState, Target> {
        let rule = |milestone: SuperAchievement, target: Target| {
            AutoPurchaseRule::new(
                Predicate::from_fn(move |s: &IdleState| s.has_achievement(milestone)),
                vec![target],
            )
        };
        AutoPurchaser::new()
            .with_rule(rule(SuperAchievement::One, RebirthUpgrade::PolynomialSynergy.into()))
            .with_rule(rule(SuperAchievement::Three, RebirthUpgrade::CheaperPrinters.into()))
            .with_rule(rule(SuperAchievement::Ten, RebirthUpgrade::ExponentialSynergy.into()))
            .with_rule(rule(SuperAchievement::Fifty, RebirthBuyable::CashInjection.into()))
    }

    pub fn reset() -> Reset<IdleState, LayerId, IdleEntity> {
        Reset::fixed(vec![
            IdleEntity::Points(LayerId::Super),
            IdleEntity::Tracking(LayerId::Super),
            IdleEntity::Achievements,
        ])
    }
}

impl Default for SuperLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer<IdleState> for SuperLayer {
    fn name(&self) -> &'static str {
        "Super"
    }

    fn points<'a>(&self, state: &'a IdleState) -> &'a Resource {
        &state.super_rebirth.points
    }

    fn points_mut<'a>(&self, state: &'a mut IdleState) -> &'a mut Resource {
        &mut state.super_rebirth.points
    }
}
