//! Cash: the base layer, produced passively by Money Printers.

use crate::genres::idle::state::{
    CashBuyable, CashUpgrade, IdleEntity, IdleState, LayerId, RebirthBuyable, RebirthUpgrade,
    SuperAchievement,
};
use crate::genres::idle::{computed, pre_super_pays, rebirth, super_rebirth, when};
use crate::genres::sdk::Layer;
use crate::lens;
use crate::mechanics::Decimal;
use crate::systems::formula::Formula;
use crate::systems::modifier::{Modifier, Term};
use crate::systems::purchasable::{Repeatable, Repeatables, Upgrade, Upgrades};
use crate::systems::requirement::CostRequirement;
use crate::systems::reset_prestige::Reset;
use crate::systems::resource::Resource;

/// Display values of the Cash layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CashEffects {
    /// Owned plus free printers.
    pub printers: Decimal,
    pub polynomial_per: Decimal,
    pub polynomial: Decimal,
    pub exponential_per: Decimal,
    pub exponential: Decimal,
    /// Growth factor of the printer cost per band.
    pub printer_scaling: Decimal,
    /// Printers per cost band.
    pub printer_steps: Decimal,
    pub assembly_exponent: Decimal,
    pub upgrade_count: usize,
    /// Cash per second.
    pub gain: Decimal,
    /// Orders of magnitude of Cash gained per second at the current rate.
    pub oomps: Decimal,
}

pub fn printers(state: &IdleState) -> Decimal {
    let owned = Decimal::from(state.cash_amount(CashBuyable::MoneyPrinters));
    if state.has_rebirth_upgrade(RebirthUpgrade::FreePrinters) {
        owned + rebirth::free_printers(state)
    } else {
        owned
    }
}

pub fn polynomial_per(state: &IdleState) -> Decimal {
    let base = Decimal::from_f64(0.1);
    if state.has_rebirth_upgrade(RebirthUpgrade::PolynomialSynergy) {
        base + rebirth::polynomial_synergy(state)
    } else {
        base
    }
}

/// `1 + printers * per`
pub fn polynomial(state: &IdleState) -> Decimal {
    printers(state) * polynomial_per(state) + 1.0
}

pub fn exponential_per(state: &IdleState) -> Decimal {
    let base = Decimal::from_f64(1.5);
    if state.has_rebirth_upgrade(RebirthUpgrade::ExponentialSynergy) {
        base + rebirth::exponential_synergy(state)
    } else {
        base
    }
}

/// `per ^ floor(printers / 10)`
pub fn exponential(state: &IdleState) -> Decimal {
    (printers(state) / 10.0).floor().pow_base(exponential_per(state))
}

pub fn printer_scaling(state: &IdleState) -> Decimal {
    let mut scaling = Decimal::TEN;
    if state.has_cash_upgrade(CashUpgrade::CouponCode) {
        scaling /= 1.25;
    }
    if state.has_rebirth_upgrade(RebirthUpgrade::CheaperPrinters) {
        scaling *= rebirth::printer_scaling(state);
    }
    scaling
}

pub fn printer_steps(state: &IdleState) -> Decimal {
    if state.has_cash_upgrade(CashUpgrade::Overstocked) {
        Decimal::from_f64(15.0)
    } else {
        Decimal::TEN
    }
}

/// `1 + 0.01 * assembly_lines`
pub fn assembly_exponent(state: &IdleState) -> Decimal {
    Decimal::from(state.cash_amount(CashBuyable::AssemblyLine)) * 0.01 + 1.0
}

/// `log10(points + gain) - log10(points)`, both floored at 1.
pub fn oomps(points: Decimal, gain: Decimal) -> Decimal {
    let before = points.max(Decimal::ONE);
    let after = (points + gain.max(Decimal::ZERO)).max(Decimal::ONE);
    after.log10() - before.log10()
}

pub struct CashLayer {
    pub upgrades: Upgrades<IdleState>,
    pub buyables: Repeatables<IdleState>,
    /// Applied to a base of 0 each tick.
    pub gain: Modifier<IdleState>,
}

impl CashLayer {
    pub fn new() -> Self {
        let points = lens!(IdleState => cash.points);

        let upgrade = |which: CashUpgrade, cost: f64| {
            Upgrade::new(
                which.to_string(),
                CostRequirement::flat(points, cost).with_requires_pay(when(pre_super_pays)),
            )
        };
        let upgrades = Upgrades::new(lens!(IdleState => cash.upgrades))
            .with(upgrade(CashUpgrade::PolynomialGrowth, 100.0))
            .with(upgrade(CashUpgrade::CouponCode, 1_000.0))
            .with(upgrade(CashUpgrade::ExponentialGrowth, 5_000.0))
            .with(upgrade(CashUpgrade::Overstocked, 50_000.0))
            .with(upgrade(CashUpgrade::GoingPublic, 250_000.0));

        // 10 * scaling ^ floor(amount / steps)
        let printer_cost = Formula::variable()
            .div(computed(printer_steps))
            .floor()
            .pow_base(computed(printer_scaling))
            .mul(10.0);
        let buyables = Repeatables::new(lens!(IdleState => cash.buyables))
            .with(Repeatable::new(
                CashBuyable::MoneyPrinters.to_string(),
                CostRequirement::scaling(points, printer_cost),
            ))
            .with(
                Repeatable::new(
                    CashBuyable::AssemblyLine.to_string(),
                    CostRequirement::scaling(points, Formula::variable().pow_base(4.0).mul(1e6)),
                )
                .visible_when(when(|s| s.has_achievement(SuperAchievement::TwentyFive))),
            );

        let gain = Modifier::new()
            .with(Term::additive("Money Printers", computed(printers)))
            .with(
                Term::multiplicative("Polynomial Growth", computed(polynomial))
                    .enabled_when(when(|s| s.has_cash_upgrade(CashUpgrade::PolynomialGrowth))),
            )
            .with(
                Term::multiplicative("Exponential Growth", computed(exponential))
                    .enabled_when(when(|s| s.has_cash_upgrade(CashUpgrade::ExponentialGrowth))),
            )
            .with(
                Term::multiplicative("Cash Injection", computed(rebirth::injection_mult))
                    .enabled_when(when(|s| s.rebirth_amount(RebirthBuyable::CashInjection) > 0)),
            )
            .with(
                Term::multiplicative("RP Effect", computed(rebirth::rp_innate))
                    .enabled_when(when(|s| s.has_cash_upgrade(CashUpgrade::GoingPublic))),
            )
            .with(Term::multiplicative("SRP Effect", computed(super_rebirth::srp_cash_effect)))
            .with(
                Term::exponential("Assembly Line", computed(assembly_exponent))
                    .enabled_when(when(|s| s.cash_amount(CashBuyable::AssemblyLine) > 0)),
            );

        Self {
            upgrades,
            buyables,
            gain,
        }
    }

    pub fn effects(&self, state: &IdleState) -> CashEffects {
        let gain = self.gain.apply(state, Decimal::ZERO);
        CashEffects {
            printers: printers(state),
            polynomial_per: polynomial_per(state),
            polynomial: polynomial(state),
            exponential_per: exponential_per(state),
            exponential: exponential(state),
            printer_scaling: printer_scaling(state),
            printer_steps: printer_steps(state),
            assembly_exponent: assembly_exponent(state),
            upgrade_count: self.upgrades.bought_count(state),
            gain,
            oomps: oomps(state.cash.points.value(), gain),
        }
    }

    /// Points, tracking and buyables always reset. With the 10 SRP
    /// milestone, upgrades survive a Rebirth and one per milestone survives
    /// a Super Rebirth.
    pub fn reset() -> Reset<IdleState, LayerId, IdleEntity> {
        Reset::new(|state: &IdleState, trigger: &LayerId| {
            let mut keys = vec![
                IdleEntity::Points(LayerId::Cash),
                IdleEntity::Tracking(LayerId::Cash),
                IdleEntity::Buyables(LayerId::Cash),
            ];
            let keep = if !state.has_achievement(SuperAchievement::Ten) {
                Some(0)
            } else if *trigger == LayerId::Rebirth {
                None
            } else {
                Some(state.achievement_count())
            };
            if let Some(keep) = keep {
                keys.push(IdleEntity::Upgrades {
                    layer: LayerId::Cash,
                    keep,
                });
            }
            keys
        })
    }
}

impl Default for CashLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer<IdleState> for CashLayer {
    fn name(&self) -> &'static str {
        "Cash"
    }

    fn points<'a>(&self, state: &'a IdleState) -> &'a Resource {
        &state.cash.points
    }

    fn points_mut<'a>(&self, state: &'a mut IdleState) -> &'a mut Resource {
        &mut state.cash.points
    }

    fn point_gain(&self, state: &IdleState) -> Option<Decimal> {
        Some(self.gain.apply(state, Decimal::ZERO))
    }
}
