//! Persisted state of the idle game and the keys its resets work on.

use std::fmt;

use strum::EnumCount;

use crate::genres::sdk::Signals;
use crate::systems::achievement::AchievementState;
use crate::systems::purchasable::{RepeatableState, UpgradeState};
use crate::systems::reset_prestige::ResetTarget;
use crate::systems::resource::Resource;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
    strum::Display, strum::EnumIter, strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayerId {
    Cash,
    Rebirth,
    Super,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash,
    strum::Display, strum::EnumIter, strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CashUpgrade {
    #[strum(to_string = "Polynomial Growth")]
    PolynomialGrowth,
    #[strum(to_string = "Coupon Code")]
    CouponCode,
    #[strum(to_string = "Exponential Growth")]
    ExponentialGrowth,
    Overstocked,
    #[strum(to_string = "Going Public")]
    GoingPublic,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash,
    strum::Display, strum::EnumIter, strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CashBuyable {
    #[strum(to_string = "Money Printers")]
    MoneyPrinters,
    #[strum(to_string = "Assembly Line")]
    AssemblyLine,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash,
    strum::Display, strum::EnumIter, strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RebirthUpgrade {
    #[strum(to_string = "Polynomial Synergy")]
    PolynomialSynergy,
    #[strum(to_string = "Cheaper Printers")]
    CheaperPrinters,
    #[strum(to_string = "Exponential Synergy")]
    ExponentialSynergy,
    #[strum(to_string = "Free Printers")]
    FreePrinters,
    Continuity,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash,
    strum::Display, strum::EnumIter, strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RebirthBuyable {
    #[strum(to_string = "Cash Injection")]
    CashInjection,
}

/// SRP milestones, in evaluation order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash,
    strum::Display, strum::EnumIter, strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SuperAchievement {
    #[strum(to_string = "1 SRP")]
    One,
    #[strum(to_string = "3 SRP")]
    Three,
    #[strum(to_string = "10 SRP")]
    Ten,
    #[strum(to_string = "25 SRP")]
    TwentyFive,
    #[strum(to_string = "50 SRP")]
    Fifty,
}

impl SuperAchievement {
    /// SRP needed to earn it.
    pub const fn threshold(self) -> f64 {
        match self {
            Self::One => 1.0,
            Self::Three => 3.0,
            Self::Ten => 10.0,
            Self::TwentyFive => 25.0,
            Self::Fifty => 50.0,
        }
    }

    /// Milestone that must be earned before this one shows up.
    pub const fn prerequisite(self) -> Option<Self> {
        match self {
            Self::Ten => Some(Self::One),
            Self::TwentyFive => Some(Self::Three),
            Self::Fifty => Some(Self::Ten),
            Self::One | Self::Three => None,
        }
    }
}

macro_rules! slot_index {
    ($($ty:ty),*) => {$(
        impl $ty {
            /// Position in the persisted state vector.
            pub const fn index(self) -> usize {
                self as usize
            }
        }
    )*};
}

slot_index!(CashUpgrade, CashBuyable, RebirthUpgrade, RebirthBuyable, SuperAchievement);

/// Anything the player can buy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    CashUpgrade(CashUpgrade),
    CashBuyable(CashBuyable),
    RebirthUpgrade(RebirthUpgrade),
    RebirthBuyable(RebirthBuyable),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CashUpgrade(upgrade) => write!(f, "{upgrade}"),
            Self::CashBuyable(buyable) => write!(f, "{buyable}"),
            Self::RebirthUpgrade(upgrade) => write!(f, "{upgrade}"),
            Self::RebirthBuyable(buyable) => write!(f, "{buyable}"),
        }
    }
}

impl Target {
    pub const fn layer(self) -> LayerId {
        match self {
            Self::CashUpgrade(_) | Self::CashBuyable(_) => LayerId::Cash,
            Self::RebirthUpgrade(_) | Self::RebirthBuyable(_) => LayerId::Rebirth,
        }
    }

    /// Every purchasable in the game, layer by layer.
    pub fn all() -> impl Iterator<Item = Target> {
        use strum::IntoEnumIterator;

        CashBuyable::iter()
            .map(Target::CashBuyable)
            .chain(CashUpgrade::iter().map(Target::CashUpgrade))
            .chain(RebirthBuyable::iter().map(Target::RebirthBuyable))
            .chain(RebirthUpgrade::iter().map(Target::RebirthUpgrade))
    }
}

impl From<CashUpgrade> for Target {
    fn from(upgrade: CashUpgrade) -> Self {
        Self::CashUpgrade(upgrade)
    }
}

impl From<CashBuyable> for Target {
    fn from(buyable: CashBuyable) -> Self {
        Self::CashBuyable(buyable)
    }
}

impl From<RebirthUpgrade> for Target {
    fn from(upgrade: RebirthUpgrade) -> Self {
        Self::RebirthUpgrade(upgrade)
    }
}

impl From<RebirthBuyable> for Target {
    fn from(buyable: RebirthBuyable) -> Self {
        Self::RebirthBuyable(buyable)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CashState {
    pub points: Resource,
    pub upgrades: Vec<UpgradeState>,
    pub buyables: Vec<RepeatableState>,
}

impl Default for CashState {
    fn default() -> Self {
        Self {
            points: Resource::new("Cash", 10.0),
            upgrades: vec![UpgradeState::default(); CashUpgrade::COUNT],
            buyables: vec![RepeatableState::default(); CashBuyable::COUNT],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RebirthState {
    pub points: Resource,
    pub upgrades: Vec<UpgradeState>,
    pub buyables: Vec<RepeatableState>,
}

impl Default for RebirthState {
    fn default() -> Self {
        Self {
            points: Resource::new("RP", 0.0),
            upgrades: vec![UpgradeState::default(); RebirthUpgrade::COUNT],
            buyables: vec![RepeatableState::default(); RebirthBuyable::COUNT],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SuperState {
    pub points: Resource,
    pub achievements: Vec<AchievementState>,
}

impl Default for SuperState {
    fn default() -> Self {
        Self {
            points: Resource::new("SRP", 0.0),
            achievements: vec![AchievementState::default(); SuperAchievement::COUNT],
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdleState {
    pub cash: CashState,
    pub rebirth: RebirthState,
    pub super_rebirth: SuperState,
    /// Highest story milestone reached; never decreases.
    pub progression: u32,
    /// Derived from the rest of the state, never persisted.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub signals: Signals,
}

impl IdleState {
    pub fn points(&self, layer: LayerId) -> &Resource {
        match layer {
            LayerId::Cash => &self.cash.points,
            LayerId::Rebirth => &self.rebirth.points,
            LayerId::Super => &self.super_rebirth.points,
        }
    }

    pub fn points_mut(&mut self, layer: LayerId) -> &mut Resource {
        match layer {
            LayerId::Cash => &mut self.cash.points,
            LayerId::Rebirth => &mut self.rebirth.points,
            LayerId::Super => &mut self.super_rebirth.points,
        }
    }

    pub fn has_cash_upgrade(&self, upgrade: CashUpgrade) -> bool {
        self.cash
            .upgrades
            .get(upgrade.index())
            .is_some_and(|slot| slot.bought)
    }

    pub fn cash_amount(&self, buyable: CashBuyable) -> u64 {
        self.cash
            .buyables
            .get(buyable.index())
            .map_or(0, |slot| slot.amount)
    }

    pub fn has_rebirth_upgrade(&self, upgrade: RebirthUpgrade) -> bool {
        self.rebirth
            .upgrades
            .get(upgrade.index())
            .is_some_and(|slot| slot.bought)
    }

    pub fn rebirth_amount(&self, buyable: RebirthBuyable) -> u64 {
        self.rebirth
            .buyables
            .get(buyable.index())
            .map_or(0, |slot| slot.amount)
    }

    pub fn rebirth_upgrade_count(&self) -> usize {
        self.rebirth.upgrades.iter().filter(|slot| slot.bought).count()
    }

    pub fn has_achievement(&self, achievement: SuperAchievement) -> bool {
        self.super_rebirth
            .achievements
            .get(achievement.index())
            .is_some_and(|slot| slot.earned)
    }

    pub fn achievement_count(&self) -> usize {
        self.super_rebirth
            .achievements
            .iter()
            .filter(|slot| slot.earned)
            .count()
    }

    pub fn raise_progression(&mut self, milestone: u32) {
        self.progression = self.progression.max(milestone);
    }
}

/// One resettable piece of [`IdleState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdleEntity {
    Points(LayerId),
    /// `best` and `total` of a layer's points.
    Tracking(LayerId),
    Buyables(LayerId),
    /// Upgrades from index `keep` onward; the first `keep` survive.
    Upgrades { layer: LayerId, keep: usize },
    Achievements,
}

impl ResetTarget<IdleEntity> for IdleState {
    fn reset_entity(&mut self, key: &IdleEntity) {
        match *key {
            IdleEntity::Points(layer) => self.points_mut(layer).reset(),
            IdleEntity::Tracking(layer) => self.points_mut(layer).reset_tracking(),
            IdleEntity::Buyables(LayerId::Cash) => reset_from(&mut self.cash.buyables, 0),
            IdleEntity::Buyables(LayerId::Rebirth) => reset_from(&mut self.rebirth.buyables, 0),
            IdleEntity::Upgrades { layer: LayerId::Cash, keep } => {
                reset_from(&mut self.cash.upgrades, keep)
            }
            IdleEntity::Upgrades { layer: LayerId::Rebirth, keep } => {
                reset_from(&mut self.rebirth.upgrades, keep)
            }
            IdleEntity::Achievements => reset_from(&mut self.super_rebirth.achievements, 0),
            // Super has no buyables or upgrades.
            IdleEntity::Buyables(LayerId::Super) | IdleEntity::Upgrades { layer: LayerId::Super, .. } => {}
        }
    }
}

fn reset_from<T: Default>(slots: &mut [T], keep: usize) {
    for slot in slots.iter_mut().skip(keep) {
        *slot = T::default();
    }
}
