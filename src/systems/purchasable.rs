//! One-shot upgrades and repeatable buyables.
//!
//! Definitions live here; their persisted state (`bought` flags, owned
//! amounts) lives in the game state behind a [`Lens`] over a `Vec`, so the
//! persistence collaborator can store it as plain booleans and integers.
//! A state vector shorter than the definition list is tolerated: the
//! missing entries read as unknown and reject purchases.

use crate::error::PurchaseError;
use crate::mechanics::Decimal;
use crate::systems::requirement::{CostRequirement, PurchaseStatus};
use crate::systems::sdk::{Lens, Predicate};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeState {
    pub bought: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepeatableState {
    pub amount: u64,
}

pub struct Upgrade<S> {
    pub name: String,
    pub requirement: CostRequirement<S>,
    pub visible: Predicate<S>,
}

impl<S> Upgrade<S> {
    pub fn new(name: impl Into<String>, requirement: CostRequirement<S>) -> Self {
        Self {
            name: name.into(),
            requirement,
            visible: Predicate::always(),
        }
    }

    pub fn visible_when(mut self, visible: impl Into<Predicate<S>>) -> Self {
        self.visible = visible.into();
        self
    }
}

pub struct Upgrades<S> {
    states: Lens<S, Vec<UpgradeState>>,
    defs: Vec<Upgrade<S>>,
}

impl<S> Upgrades<S> {
    pub fn new(states: Lens<S, Vec<UpgradeState>>) -> Self {
        Self {
            states,
            defs: Vec::new(),
        }
    }

    pub fn with(mut self, upgrade: Upgrade<S>) -> Self {
        self.defs.push(upgrade);
        self
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Upgrade<S>> {
        self.defs.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Upgrade<S>> {
        self.defs.iter()
    }

    /// Fresh state vector matching the definitions.
    pub fn default_states(&self) -> Vec<UpgradeState> {
        vec![UpgradeState::default(); self.defs.len()]
    }

    pub fn is_bought(&self, state: &S, index: usize) -> bool {
        self.states
            .get(state)
            .get(index)
            .is_some_and(|upgrade| upgrade.bought)
    }

    pub fn bought_count(&self, state: &S) -> usize {
        (0..self.defs.len())
            .filter(|&index| self.is_bought(state, index))
            .count()
    }

    pub fn cost(&self, state: &S, index: usize) -> Option<Decimal> {
        self.defs
            .get(index)
            .map(|upgrade| upgrade.requirement.cost_at(state, 0))
    }

    /// `None` for an index with no definition or no persisted state.
    pub fn status(&self, state: &S, index: usize) -> Option<PurchaseStatus> {
        let upgrade = self.defs.get(index)?;
        let persisted = self.states.get(state).get(index)?;
        Some(if persisted.bought {
            PurchaseStatus::Bought
        } else if !upgrade.visible.get(state) {
            PurchaseStatus::Locked
        } else if upgrade.requirement.can_afford(state, 0) {
            PurchaseStatus::Affordable
        } else {
            PurchaseStatus::Unaffordable
        })
    }

    pub fn can_purchase(&self, state: &S, index: usize) -> bool {
        self.status(state, index)
            .is_some_and(PurchaseStatus::is_purchasable)
    }

    pub fn purchase(&self, state: &mut S, index: usize) -> Result<(), PurchaseError> {
        let unknown = PurchaseError::Unknown { index };
        let upgrade = self.defs.get(index).ok_or(unknown)?;
        let persisted = *self.states.get(state).get(index).ok_or(unknown)?;
        if persisted.bought {
            return Err(PurchaseError::AlreadyBought);
        }
        if !upgrade.visible.get(state) {
            return Err(PurchaseError::Locked);
        }
        let paid = upgrade.requirement.pay(state, 0)?;
        if let Some(slot) = self.states.get_mut(state).get_mut(index) {
            slot.bought = true;
        }
        tracing::debug!(upgrade = %upgrade.name, %paid, "upgrade bought");
        Ok(())
    }
}

pub struct Repeatable<S> {
    pub name: String,
    /// Cost as a function of the amount owned *before* the purchase.
    pub requirement: CostRequirement<S>,
    pub visible: Predicate<S>,
    pub limit: Option<u64>,
}

impl<S> Repeatable<S> {
    pub fn new(name: impl Into<String>, requirement: CostRequirement<S>) -> Self {
        Self {
            name: name.into(),
            requirement,
            visible: Predicate::always(),
            limit: None,
        }
    }

    pub fn visible_when(mut self, visible: impl Into<Predicate<S>>) -> Self {
        self.visible = visible.into();
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

pub struct Repeatables<S> {
    states: Lens<S, Vec<RepeatableState>>,
    defs: Vec<Repeatable<S>>,
}

impl<S> Repeatables<S> {
    pub fn new(states: Lens<S, Vec<RepeatableState>>) -> Self {
        Self {
            states,
            defs: Vec::new(),
        }
    }

    pub fn with(mut self, repeatable: Repeatable<S>) -> Self {
        self.defs.push(repeatable);
        self
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Repeatable<S>> {
        self.defs.get(index)
    }

    pub fn default_states(&self) -> Vec<RepeatableState> {
        vec![RepeatableState::default(); self.defs.len()]
    }

    /// Owned amount; zero for unknown indices.
    pub fn amount(&self, state: &S, index: usize) -> u64 {
        self.states
            .get(state)
            .get(index)
            .map_or(0, |repeatable| repeatable.amount)
    }

    /// Price of the next unit, recomputed from the current amount.
    pub fn cost(&self, state: &S, index: usize) -> Option<Decimal> {
        let repeatable = self.defs.get(index)?;
        Some(repeatable.requirement.cost_at(state, self.amount(state, index)))
    }

    pub fn status(&self, state: &S, index: usize) -> Option<PurchaseStatus> {
        let repeatable = self.defs.get(index)?;
        let amount = self.states.get(state).get(index)?.amount;
        Some(if !repeatable.visible.get(state) {
            PurchaseStatus::Locked
        } else if repeatable.limit.is_some_and(|limit| amount >= limit) {
            PurchaseStatus::Maxed
        } else if repeatable.requirement.can_afford(state, amount) {
            PurchaseStatus::Affordable
        } else {
            PurchaseStatus::Unaffordable
        })
    }

    pub fn can_purchase(&self, state: &S, index: usize) -> bool {
        self.status(state, index)
            .is_some_and(PurchaseStatus::is_purchasable)
    }

    /// Buys one unit.
    pub fn purchase(&self, state: &mut S, index: usize) -> Result<(), PurchaseError> {
        let unknown = PurchaseError::Unknown { index };
        let repeatable = self.defs.get(index).ok_or(unknown)?;
        let amount = self.states.get(state).get(index).ok_or(unknown)?.amount;
        if !repeatable.visible.get(state) {
            return Err(PurchaseError::Locked);
        }
        if let Some(limit) = repeatable.limit.filter(|&limit| amount >= limit) {
            return Err(PurchaseError::AtLimit { limit });
        }
        let paid = repeatable.requirement.pay(state, amount)?;
        if let Some(slot) = self.states.get_mut(state).get_mut(index) {
            slot.amount = amount + 1;
        }
        tracing::debug!(repeatable = %repeatable.name, amount = amount + 1, %paid, "repeatable bought");
        Ok(())
    }
}
