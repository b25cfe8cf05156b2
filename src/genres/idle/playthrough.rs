//! Greedy autoplay over [`IdleGame`], for pacing checks.
//!
//! Each frame the harness ticks the game by a jittered frame length, then
//! plays like an impatient player:
//! - prestige Super, then Rebirth, as soon as the gain at least matches the
//!   currency already held (and is at least 1),
//! - then keep buying the cheapest affordable item in each currency until
//!   nothing is affordable.
//!
//! Frame jitter comes from a seeded `WyRand`, so a given
//! [`PlaythroughConfig`] always produces the same [`PlaythroughReport`].

use std::cmp::Ordering;

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::genres::idle::state::{LayerId, Target};
use crate::genres::idle::IdleGame;
use crate::mechanics::{stoch, Decimal};
use crate::run_until;

/// Upper bound on manual purchases in one frame.
const MAX_PURCHASES_PER_FRAME: usize = 256;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaythroughConfig {
    pub seed: u64,
    /// Mean real seconds per frame.
    pub frame_seconds: f64,
    /// Relative standard deviation of the frame length.
    pub jitter: f64,
    pub max_frames: usize,
    pub dev_speed: f64,
    /// Stop once this many Super Rebirths have happened.
    pub target_super_rebirths: u32,
}

impl PlaythroughConfig {
    pub const DEFAULT_SEED: u64 = 0x5eed;
    pub const DEFAULT_FRAME_SECONDS: f64 = 1.0;
    pub const DEFAULT_JITTER: f64 = 0.1;
    pub const DEFAULT_MAX_FRAMES: usize = 20_000;

    pub fn new() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            frame_seconds: Self::DEFAULT_FRAME_SECONDS,
            jitter: Self::DEFAULT_JITTER,
            max_frames: Self::DEFAULT_MAX_FRAMES,
            dev_speed: GameConfig::DEFAULT_DEV_SPEED,
            target_super_rebirths: 1,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn with_dev_speed(mut self, dev_speed: f64) -> Self {
        self.dev_speed = dev_speed;
        self
    }

    pub fn with_frame_seconds(mut self, frame_seconds: f64, jitter: f64) -> Self {
        self.frame_seconds = frame_seconds;
        self.jitter = jitter;
        self
    }
}

impl Default for PlaythroughConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaythroughReport {
    pub frames: usize,
    pub simulated_seconds: f64,
    /// Manual purchases only; auto-purchases are not counted.
    pub purchases: usize,
    pub rebirths: u32,
    pub super_rebirths: u32,
    pub best_cash: Decimal,
    pub best_rp: Decimal,
    pub progression: u32,
    /// Whether the Super Rebirth target was reached within `max_frames`.
    pub finished: bool,
}

struct Autoplay {
    game: IdleGame,
    report: PlaythroughReport,
}

impl Autoplay {
    fn frame(&mut self, real_delta: f64) {
        self.report.simulated_seconds += self.game.tick(real_delta);
        self.try_prestige(LayerId::Super);
        self.try_prestige(LayerId::Rebirth);
        self.buy_cheapest();
        self.track_best();
    }

    fn try_prestige(&mut self, layer: LayerId) {
        let held = self.game.points(layer).value().max(Decimal::ONE);
        let worth_it = self
            .game
            .actual_gain(layer)
            .is_some_and(|gain| gain >= held);
        if !worth_it || !self.game.can_prestige(layer) {
            return;
        }
        // Record the pre-reset peak before the cascade clears it.
        self.track_best();
        if self.game.prestige(layer).is_ok() {
            match layer {
                LayerId::Rebirth => self.report.rebirths += 1,
                LayerId::Super => self.report.super_rebirths += 1,
                LayerId::Cash => {}
            }
        }
    }

    fn buy_cheapest(&mut self) {
        for _ in 0..MAX_PURCHASES_PER_FRAME {
            let mut bought = false;
            for layer in [LayerId::Cash, LayerId::Rebirth] {
                if let Some(target) = self.cheapest(layer) {
                    if self.game.purchase(target).is_ok() {
                        self.report.purchases += 1;
                        bought = true;
                    }
                }
            }
            if !bought {
                break;
            }
        }
    }

    fn cheapest(&self, layer: LayerId) -> Option<Target> {
        Target::all()
            .filter(|target| target.layer() == layer && self.game.can_purchase(*target))
            .filter_map(|target| self.game.cost(target).map(|cost| (target, cost)))
            .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .map(|(target, _)| target)
    }

    fn track_best(&mut self) {
        let cash = self.game.points(LayerId::Cash).best();
        let rp = self.game.points(LayerId::Rebirth).best();
        self.report.best_cash = self.report.best_cash.max(cash);
        self.report.best_rp = self.report.best_rp.max(rp);
    }
}

/// Plays until the Super Rebirth target or `max_frames`, whichever first.
pub fn run(config: &PlaythroughConfig) -> Result<PlaythroughReport, ConfigError> {
    let game = IdleGame::new(GameConfig::new().with_dev_speed(config.dev_speed))?;
    let rng = stoch::seeded(config.seed);
    let target = config.target_super_rebirths;

    let outcome = run_until(
        Autoplay {
            game,
            report: PlaythroughReport::default(),
        },
        |play| play.frame(stoch::frame_delta(&rng, config.frame_seconds, config.jitter)),
        |play| play.report.super_rebirths >= target,
        config.max_frames,
    );

    let Autoplay { game, mut report } = outcome.state;
    report.frames = outcome.steps;
    report.finished = outcome.finished;
    report.progression = game.state().progression;
    tracing::info!(
        frames = report.frames,
        rebirths = report.rebirths,
        super_rebirths = report.super_rebirths,
        best_cash = %report.best_cash,
        "playthrough finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_frames_reports_nothing() {
        let report = run(&PlaythroughConfig::new().with_max_frames(0)).unwrap();
        assert_eq!(report.frames, 0);
        assert_eq!(report.simulated_seconds, 0.0);
        assert!(!report.finished);
    }

    #[test]
    fn invalid_speed_is_rejected() {
        let err = run(&PlaythroughConfig::new().with_dev_speed(-1.0)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDevSpeed(speed) if speed == -1.0));
    }
}
