//! Per-tick automatic purchasing.
//!
//! Rules run as an explicit post-pass at the end of a tick and go through
//! the ordinary purchase path, so every automatic buy obeys the same
//! visibility, affordability and payment rules as a manual one.

use crate::error::PurchaseError;
use crate::systems::sdk::Predicate;

/// While `enabled` holds, try to buy each target once per tick.
pub struct AutoPurchaseRule<S, T> {
    pub enabled: Predicate<S>,
    pub targets: Vec<T>,
}

impl<S, T> AutoPurchaseRule<S, T> {
    pub fn new(enabled: impl Into<Predicate<S>>, targets: Vec<T>) -> Self {
        Self {
            enabled: enabled.into(),
            targets,
        }
    }
}

pub struct AutoPurchaser<S, T> {
    rules: Vec<AutoPurchaseRule<S, T>>,
}

impl<S, T> Default for AutoPurchaser<S, T> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<S, T: Copy + std::fmt::Debug> AutoPurchaser<S, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: AutoPurchaseRule<S, T>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[AutoPurchaseRule<S, T>] {
        &self.rules
    }

    /// Runs every enabled rule through `purchase`. Rejections are expected
    /// (already bought, unaffordable) and ignored. Returns the number of
    /// successful purchases.
    pub fn run(
        &self,
        state: &mut S,
        mut purchase: impl FnMut(&mut S, T) -> Result<(), PurchaseError>,
    ) -> usize {
        let mut bought = 0;
        for rule in &self.rules {
            if !rule.enabled.get(state) {
                continue;
            }
            for &target in &rule.targets {
                match purchase(state, target) {
                    Ok(()) => bought += 1,
                    Err(err) => tracing::trace!(?target, %err, "auto-purchase skipped"),
                }
            }
        }
        bought
    }
}
