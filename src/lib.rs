/*!
`idle_prestige`: a deterministic engine for layered idle/prestige games.

What it does
- Represents very large and very small numbers with [`Decimal`], a
  mantissa/exponent number that never panics and propagates NaN.
- Models a game as **layers**: each layer owns a currency
  (`systems::resource`), ordered effect pipelines (`systems::modifier`),
  purchasables gated by costs (`systems::requirement`,
  `systems::purchasable`), and optionally a prestige conversion from a lower
  layer's currency (`systems::conversion`).
- Propagates prestige resets down a graph of layers with per-layer scope
  resolvers, validating before anything is written
  (`systems::reset_prestige`).
- Drives everything from a clamped, speed-scaled tick (`systems::tick`).

How to use (call surface only)
- Use the ready-made three-tier game: `genres::idle::IdleGame::new(config)`,
  then call `tick(real_delta)` from the host loop and `purchase`/`prestige`
  from input handlers.
- Or assemble a new genre from the neutral systems (see `genres::sdk`).
- `run_until(state, step, done, max_steps)` repeats a step function until a
  predicate holds; the autoplay harness is built on it.

What it does NOT do
- No rendering, no save-file encoding, no wall clock. The host supplies
  elapsed time and stores the serde-serializable state wherever it likes.
*/

pub mod config;
pub mod error;
pub mod genres;
pub mod mechanics;
pub mod systems;

pub use config::GameConfig;
pub use error::{ConfigError, ParseDecimalError, PrestigeError, PurchaseError};
pub use mechanics::Decimal;

/// Final state of a [`run_until`] loop.
#[derive(Clone, Debug)]
pub struct RunOutcome<T> {
    pub state: T,
    /// Steps actually taken.
    pub steps: usize,
    /// Whether `done` held when the loop stopped.
    pub finished: bool,
}

/// Deterministic driver: applies `step` until `done(&state)` holds or
/// `max_steps` steps have been taken. `done` is checked before every step,
/// so a state that is already done takes zero steps.
pub fn run_until<T, Step, Done>(
    mut state: T,
    mut step: Step,
    mut done: Done,
    max_steps: usize,
) -> RunOutcome<T>
where
    Step: FnMut(&mut T),
    Done: FnMut(&T) -> bool,
{
    for steps in 0..max_steps {
        if done(&state) {
            return RunOutcome {
                state,
                steps,
                finished: true,
            };
        }
        step(&mut state);
    }
    let finished = done(&state);
    RunOutcome {
        state,
        steps: max_steps,
        finished,
    }
}
