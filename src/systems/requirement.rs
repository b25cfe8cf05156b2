//! Cost gates: "can this resource pay for it, and deduct it".

use crate::error::PurchaseError;
use crate::mechanics::Decimal;
use crate::systems::formula::Formula;
use crate::systems::resource::Resource;
use crate::systems::sdk::{Lens, Operand, Predicate};

/// Price of a purchasable, optionally a function of how many are owned.
pub enum Cost<S> {
    Flat(Operand<S>),
    /// Curve over the owned amount. Must be non-decreasing.
    Scaling(Formula<S>),
}

impl<S> Cost<S> {
    pub fn at(&self, state: &S, owned: u64) -> Decimal {
        match self {
            Self::Flat(op) => op.get(state),
            Self::Scaling(formula) => formula.evaluate(state, Decimal::from(owned)),
        }
    }
}

pub struct CostRequirement<S> {
    pub resource: Lens<S, Resource>,
    pub cost: Cost<S>,
    /// When false the gate still checks affordability but deducts nothing.
    pub requires_pay: Predicate<S>,
}

impl<S> CostRequirement<S> {
    pub fn new(resource: Lens<S, Resource>, cost: Cost<S>) -> Self {
        Self {
            resource,
            cost,
            requires_pay: Predicate::always(),
        }
    }

    pub fn flat(resource: Lens<S, Resource>, cost: impl Into<Operand<S>>) -> Self {
        Self::new(resource, Cost::Flat(cost.into()))
    }

    pub fn scaling(resource: Lens<S, Resource>, formula: Formula<S>) -> Self {
        Self::new(resource, Cost::Scaling(formula))
    }

    pub fn with_requires_pay(mut self, requires_pay: impl Into<Predicate<S>>) -> Self {
        self.requires_pay = requires_pay.into();
        self
    }

    pub fn cost_at(&self, state: &S, owned: u64) -> Decimal {
        self.cost.at(state, owned)
    }

    /// `cost <= value`. A NaN on either side is never affordable.
    pub fn can_afford(&self, state: &S, owned: u64) -> bool {
        self.cost_at(state, owned) <= self.resource.get(state).value()
    }

    /// Checks affordability and deducts the cost unless payment is waived.
    /// Returns the amount actually deducted.
    pub fn pay(&self, state: &mut S, owned: u64) -> Result<Decimal, PurchaseError> {
        let cost = self.cost_at(state, owned);
        let available = self.resource.get(state).value();
        if !(cost <= available) {
            return Err(PurchaseError::Unaffordable { cost, available });
        }
        if !self.requires_pay.get(state) {
            return Ok(Decimal::ZERO);
        }
        self.resource.get_mut(state).sub(cost);
        Ok(cost)
    }
}

/// Where a purchasable sits in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PurchaseStatus {
    /// Visibility predicate is false.
    Locked,
    Unaffordable,
    Affordable,
    /// Terminal for one-shot upgrades.
    Bought,
    /// Repeatable at its limit.
    Maxed,
}

impl PurchaseStatus {
    pub fn is_purchasable(self) -> bool {
        self == Self::Affordable
    }
}
