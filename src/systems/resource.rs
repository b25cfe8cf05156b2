use crate::mechanics::Decimal;

/// A named quantity with tracked best and cumulative total.
///
/// `best` and `total` are only ever updated as a side effect of changing
/// `value`; nothing outside this type can assign them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resource {
    display_name: String,
    value: Decimal,
    initial: Decimal,
    best: Decimal,
    total: Decimal,
}

impl Resource {
    pub fn new(display_name: impl Into<String>, initial: impl Into<Decimal>) -> Self {
        let initial = initial.into();
        Self {
            display_name: display_name.into(),
            value: initial,
            initial,
            best: initial,
            total: Decimal::ZERO,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Construction-time default that [`Resource::reset`] restores.
    pub fn initial(&self) -> Decimal {
        self.initial
    }

    /// Highest value ever held.
    pub fn best(&self) -> Decimal {
        self.best
    }

    /// Sum of every positive change since the last tracking reset.
    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn set(&mut self, value: Decimal) {
        let delta = value - self.value;
        if delta > Decimal::ZERO {
            self.total += delta;
        }
        if value > self.best {
            self.best = value;
        }
        self.value = value;
    }

    pub fn add(&mut self, amount: Decimal) {
        self.set(self.value + amount);
    }

    pub fn sub(&mut self, amount: Decimal) {
        self.set(self.value - amount);
    }

    /// Restores the construction default. Does not count toward `total`.
    pub fn reset(&mut self) {
        self.value = self.initial;
    }

    /// Forgets `best` and `total`.
    pub fn reset_tracking(&mut self) {
        self.best = self.initial;
        self.total = Decimal::ZERO;
    }

    pub fn is_default(&self) -> bool {
        self.value == self.initial
    }
}
