// src/systems/sdk.rs

//! # Systems SDK
//!
//! Shared plumbing for building **systems**: genre-neutral pieces of an
//! incremental game (resources, modifiers, cost gates, conversions, resets,
//! achievements, auto-purchase) that are generic over a caller-owned game
//! state `S`.
//!
//! ## State lives in one place
//! Systems never own mutable game data. A system is a *definition* (costs,
//! terms, predicates) plus a way to reach the data it works on inside `S`.
//! Two small tools make that possible:
//!
//! - [`Source<S, T>`]: a value that is either a constant or a closure
//!   `Fn(&S) -> T`, evaluated lazily every time it is read. Terms that say
//!   "×printer count" read the current count, not the count at construction.
//!   [`Operand<S>`] and [`Predicate<S>`] are the two aliases used everywhere.
//!
//! - [`Lens<S, T>`]: a pair of plain function pointers that give shared and
//!   mutable access to one field of `S`. Definitions hold lenses instead of
//!   references, so there is no global registry and no initialization order:
//!   every read goes through an explicit `&S`, every write through `&mut S`.
//!
//! ## When to create a new system
//! Create a system when a mechanic has a clear, reusable contract that does
//! not depend on any particular game, e.g.:
//! - **modifier**: ordered additive/multiplicative/exponential terms
//! - **requirement**: "is this affordable, and deduct it"
//! - **conversion**: "how much prestige currency would a reset grant"
//! - **reset_prestige**: "which entities go back to default, and in what order"
//!
//! Game-specific numbers (costs, thresholds, effect formulas) belong to a
//! genre, not to a system.
//!
//! ## Purity
//! - Reading a `Source` must never mutate state. Closures only see `&S`.
//! - Anything that mutates (`purchase`, `convert`, `apply`) takes `&mut S`
//!   and either completes or returns an error *before* the first write.
//!
//! ## Feature flags & reuse
//! - Keep systems under `src/systems/*` and gate optional ones with
//!   `feature = "system-*"`.
//! - Do not import genre code here; genres compose systems, not vice versa.
//!
//! ## Testing a system
//! - Integration tests at `tests/<system>.rs` over a small hand-written state
//!   struct; no genre needed.

use core::fmt;

use crate::mechanics::Decimal;

/// A constant or a lazily evaluated function of the game state.
pub enum Source<S, T> {
    Const(T),
    Computed(Box<dyn Fn(&S) -> T>),
}

/// Numeric operand of a term, cost or formula step.
pub type Operand<S> = Source<S, Decimal>;
/// Enablement or visibility condition.
pub type Predicate<S> = Source<S, bool>;

impl<S, T: Clone> Source<S, T> {
    pub fn constant(value: T) -> Self {
        Self::Const(value)
    }

    pub fn from_fn(f: impl Fn(&S) -> T + 'static) -> Self {
        Self::Computed(Box::new(f))
    }

    /// Current value.
    #[inline]
    pub fn get(&self, state: &S) -> T {
        match self {
            Self::Const(value) => value.clone(),
            Self::Computed(f) => f(state),
        }
    }

    pub fn is_const(&self) -> bool {
        matches!(self, Self::Const(_))
    }
}

impl<S> Predicate<S> {
    pub fn always() -> Self {
        Self::Const(true)
    }

    pub fn never() -> Self {
        Self::Const(false)
    }
}

impl<S> From<Decimal> for Operand<S> {
    fn from(value: Decimal) -> Self {
        Self::Const(value)
    }
}

impl<S> From<f64> for Operand<S> {
    fn from(value: f64) -> Self {
        Self::Const(Decimal::from_f64(value))
    }
}

impl<S> From<bool> for Predicate<S> {
    fn from(value: bool) -> Self {
        Self::Const(value)
    }
}

impl<S, T: fmt::Debug> fmt::Debug for Source<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(value) => f.debug_tuple("Const").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Shared and mutable access to one field of `S`.
pub struct Lens<S, T> {
    get: fn(&S) -> &T,
    get_mut: fn(&mut S) -> &mut T,
}

impl<S, T> Lens<S, T> {
    pub const fn new(get: fn(&S) -> &T, get_mut: fn(&mut S) -> &mut T) -> Self {
        Self { get, get_mut }
    }

    #[inline]
    pub fn get<'a>(&self, state: &'a S) -> &'a T {
        (self.get)(state)
    }

    #[inline]
    pub fn get_mut<'a>(&self, state: &'a mut S) -> &'a mut T {
        (self.get_mut)(state)
    }
}

// Manual impls: derives would demand `S: Clone` and `T: Clone`.
impl<S, T> Clone for Lens<S, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, T> Copy for Lens<S, T> {}

impl<S, T> fmt::Debug for Lens<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Lens(..)")
    }
}

/// Builds a [`Lens`] from a field path, e.g. `lens!(IdleState => cash.points)`.
#[macro_export]
macro_rules! lens {
    ($state:ty => $($field:ident).+) => {
        $crate::systems::sdk::Lens::new(
            |s: &$state| &s.$($field).+,
            |s: &mut $state| &mut s.$($field).+,
        )
    };
}
