//! Invertible single-variable formulas.
//!
//! A [`Formula`] is a chain of steps applied to one variable `x`. The same
//! chain can be run backwards: [`Formula::invert`] undoes the steps in
//! reverse order, which is how cost curves answer "how many can I buy" and
//! conversions answer "how much base do I need for the next point".

use crate::mechanics::Decimal;
use crate::systems::sdk::Operand;

pub enum Step<S> {
    Add(Operand<S>),
    Sub(Operand<S>),
    Mul(Operand<S>),
    Div(Operand<S>),
    /// `x ^ p`
    Pow(Operand<S>),
    /// `b ^ x`
    PowBase(Operand<S>),
    /// `log_b(x)`
    Log(Operand<S>),
    Sqrt,
    /// Inverts as the identity, which is exact for integral targets.
    Floor,
}

impl<S> Step<S> {
    fn forward(&self, state: &S, x: Decimal) -> Decimal {
        match self {
            Self::Add(op) => x + op.get(state),
            Self::Sub(op) => x - op.get(state),
            Self::Mul(op) => x * op.get(state),
            Self::Div(op) => x / op.get(state),
            Self::Pow(op) => x.pow(op.get(state)),
            Self::PowBase(op) => x.pow_base(op.get(state)),
            Self::Log(op) => x.log(op.get(state)),
            Self::Sqrt => x.sqrt(),
            Self::Floor => x.floor(),
        }
    }

    fn backward(&self, state: &S, y: Decimal) -> Decimal {
        match self {
            Self::Add(op) => y - op.get(state),
            Self::Sub(op) => y + op.get(state),
            Self::Mul(op) => y / op.get(state),
            Self::Div(op) => y * op.get(state),
            Self::Pow(op) => y.pow(op.get(state).recip()),
            Self::PowBase(op) => y.log(op.get(state)),
            Self::Log(op) => y.pow_base(op.get(state)),
            Self::Sqrt => y * y,
            Self::Floor => y,
        }
    }
}

/// `x -> step_n(... step_1(x))`. An empty formula is the identity.
pub struct Formula<S> {
    steps: Vec<Step<S>>,
}

impl<S> Default for Formula<S> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<S> Formula<S> {
    /// The bare variable.
    pub fn variable() -> Self {
        Self::default()
    }

    pub fn then(mut self, step: Step<S>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn add(self, operand: impl Into<Operand<S>>) -> Self {
        self.then(Step::Add(operand.into()))
    }

    pub fn sub(self, operand: impl Into<Operand<S>>) -> Self {
        self.then(Step::Sub(operand.into()))
    }

    pub fn mul(self, operand: impl Into<Operand<S>>) -> Self {
        self.then(Step::Mul(operand.into()))
    }

    pub fn div(self, operand: impl Into<Operand<S>>) -> Self {
        self.then(Step::Div(operand.into()))
    }

    pub fn pow(self, exponent: impl Into<Operand<S>>) -> Self {
        self.then(Step::Pow(exponent.into()))
    }

    pub fn pow_base(self, base: impl Into<Operand<S>>) -> Self {
        self.then(Step::PowBase(base.into()))
    }

    pub fn log(self, base: impl Into<Operand<S>>) -> Self {
        self.then(Step::Log(base.into()))
    }

    pub fn sqrt(self) -> Self {
        self.then(Step::Sqrt)
    }

    pub fn floor(self) -> Self {
        self.then(Step::Floor)
    }

    pub fn steps(&self) -> &[Step<S>] {
        &self.steps
    }

    pub fn evaluate(&self, state: &S, x: Decimal) -> Decimal {
        self.steps.iter().fold(x, |x, step| step.forward(state, x))
    }

    /// Solves `evaluate(x) = y` for `x`.
    pub fn invert(&self, state: &S, y: Decimal) -> Decimal {
        self.steps
            .iter()
            .rev()
            .fold(y, |y, step| step.backward(state, y))
    }
}
