//! Ordered composition of additive, multiplicative and exponential terms.
//!
//! A [`Modifier`] folds its terms over a base value in declaration order,
//! each term consuming the running value of the previous one. Disabled terms
//! pass the value through unchanged but keep their slot, so toggling one
//! term never reorders the others.

use crate::mechanics::Decimal;
use crate::systems::sdk::{Operand, Predicate};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TermKind {
    Additive,
    Multiplicative,
    Exponential,
}

impl TermKind {
    #[inline]
    pub fn combine(self, value: Decimal, operand: Decimal) -> Decimal {
        match self {
            Self::Additive => value + operand,
            Self::Multiplicative => value * operand,
            Self::Exponential => value.pow(operand),
        }
    }
}

pub struct Term<S> {
    pub kind: TermKind,
    pub operand: Operand<S>,
    pub enabled: Predicate<S>,
    pub description: String,
}

impl<S> Term<S> {
    pub fn new(kind: TermKind, description: impl Into<String>, operand: impl Into<Operand<S>>) -> Self {
        Self {
            kind,
            operand: operand.into(),
            enabled: Predicate::always(),
            description: description.into(),
        }
    }

    pub fn additive(description: impl Into<String>, addend: impl Into<Operand<S>>) -> Self {
        Self::new(TermKind::Additive, description, addend)
    }

    pub fn multiplicative(description: impl Into<String>, multiplier: impl Into<Operand<S>>) -> Self {
        Self::new(TermKind::Multiplicative, description, multiplier)
    }

    pub fn exponential(description: impl Into<String>, exponent: impl Into<Operand<S>>) -> Self {
        Self::new(TermKind::Exponential, description, exponent)
    }

    /// Replaces the enablement predicate (default: always enabled).
    pub fn enabled_when(mut self, enabled: impl Into<Predicate<S>>) -> Self {
        self.enabled = enabled.into();
        self
    }

    pub fn is_enabled(&self, state: &S) -> bool {
        self.enabled.get(state)
    }
}

/// One row of [`Modifier::breakdown`].
#[derive(Clone, Debug, PartialEq)]
pub struct TermRow {
    pub description: String,
    pub kind: TermKind,
    pub enabled: bool,
    /// `None` for disabled terms; their operand is never evaluated.
    pub operand: Option<Decimal>,
    /// Running value after this term.
    pub value: Decimal,
}

pub struct Modifier<S> {
    terms: Vec<Term<S>>,
}

impl<S> Default for Modifier<S> {
    fn default() -> Self {
        Self { terms: Vec::new() }
    }
}

impl<S> Modifier<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, term: Term<S>) -> Self {
        self.terms.push(term);
        self
    }

    pub fn push(&mut self, term: Term<S>) {
        self.terms.push(term);
    }

    pub fn terms(&self) -> &[Term<S>] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Folds every enabled term over `base`. Pure: reads `state` only.
    pub fn apply(&self, state: &S, base: Decimal) -> Decimal {
        self.terms
            .iter()
            .filter(|term| term.is_enabled(state))
            .fold(base, |value, term| term.kind.combine(value, term.operand.get(state)))
    }

    pub fn enabled_terms<'a>(&'a self, state: &'a S) -> impl Iterator<Item = &'a Term<S>> + 'a {
        self.terms.iter().filter(move |term| term.is_enabled(state))
    }

    /// Per-term trace of [`Modifier::apply`], for tooltips and modifier tables.
    pub fn breakdown(&self, state: &S, base: Decimal) -> Vec<TermRow> {
        let mut value = base;
        self.terms
            .iter()
            .map(|term| {
                let enabled = term.is_enabled(state);
                let operand = enabled.then(|| term.operand.get(state));
                if let Some(operand) = operand {
                    value = term.kind.combine(value, operand);
                }
                TermRow {
                    description: term.description.clone(),
                    kind: term.kind,
                    enabled,
                    operand,
                    value,
                }
            })
            .collect()
    }
}
