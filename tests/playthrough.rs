// tests/playthrough.rs
use idle_prestige::run_until;

/* ──────────────────────────────────────────────────────────────────────────
1) Driver loop
────────────────────────────────────────────────────────────────────────── */

#[test]
fn run_until_stops_when_done() {
    let outcome = run_until(0u32, |n| *n += 3, |n| *n >= 10, 100);
    assert!(outcome.finished);
    assert_eq!(outcome.state, 12);
    assert_eq!(outcome.steps, 4);
}

#[test]
fn run_until_respects_the_step_budget() {
    let outcome = run_until(0u32, |n| *n += 1, |_| false, 25);
    assert!(!outcome.finished);
    assert_eq!(outcome.state, 25);
    assert_eq!(outcome.steps, 25);
}

#[test]
fn already_done_takes_no_steps() {
    let outcome = run_until(String::from("done"), |s| s.push('!'), |s| s == "done", 10);
    assert!(outcome.finished);
    assert_eq!(outcome.steps, 0);
    assert_eq!(outcome.state, "done");
}

#[test]
fn last_step_can_finish() {
    let outcome = run_until(0u32, |n| *n += 1, |n| *n == 5, 5);
    assert!(outcome.finished, "done is re-checked after the final step");
    assert_eq!(outcome.steps, 5);
}

/* ──────────────────────────────────────────────────────────────────────────
2) Frame jitter is a plain WyRand stream
────────────────────────────────────────────────────────────────────────── */

#[test]
fn seeded_stream_matches_wyrand() {
    use bevy_prng::WyRand;
    use idle_prestige::mechanics::stoch;
    use rand_core::{RngCore, SeedableRng};

    let jitter = stoch::seeded(99);
    let mut raw = WyRand::from_seed(99u64.to_le_bytes());
    for _ in 0..8 {
        let expected = ((raw.next_u64() >> 11) as f64) / ((1u64 << 53) as f64);
        assert_eq!(stoch::uniform01(&jitter), expected);
    }
}

#[test]
fn frame_lengths_are_never_negative() {
    use idle_prestige::mechanics::stoch;

    let rng = stoch::seeded(3);
    let frames: Vec<f64> = (0..2_000).map(|_| stoch::frame_delta(&rng, 1.0, 2.0)).collect();
    assert!(frames.iter().all(|&dt| dt >= 0.0));
    assert!(frames.iter().any(|&dt| dt == 0.0), "heavy jitter clamps some frames to zero");
    let mean = frames.iter().sum::<f64>() / frames.len() as f64;
    assert!(mean > 0.5, "mean frame {mean}");
}

/* ──────────────────────────────────────────────────────────────────────────
3) Greedy autoplay over the idle game
────────────────────────────────────────────────────────────────────────── */

#[cfg(feature = "genre-idle")]
mod autoplay {
    use idle_prestige::genres::idle::playthrough::{run, PlaythroughConfig};
    use idle_prestige::mechanics::Decimal;

    #[test]
    fn same_seed_same_report() {
        let config = PlaythroughConfig::new().with_seed(11).with_max_frames(2_000);
        let a = run(&config).unwrap();
        let b = run(&config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.frames, 2_000);
    }

    #[test]
    fn seed_changes_frame_timing() {
        let a = run(&PlaythroughConfig::new().with_seed(1).with_max_frames(500)).unwrap();
        let b = run(&PlaythroughConfig::new().with_seed(2).with_max_frames(500)).unwrap();
        assert_ne!(a.simulated_seconds, b.simulated_seconds);
    }

    #[test]
    fn greedy_player_reaches_rebirth() {
        let report = run(&PlaythroughConfig::new().with_max_frames(20_000)).unwrap();

        assert!(report.purchases > 0, "greedy player buys things");
        assert!(report.rebirths >= 1, "no rebirth in {} frames: {report:?}", report.frames);
        assert!(report.best_cash >= Decimal::from(500_000), "rebirth needs 500k cash");
        assert!(report.best_rp >= Decimal::ONE);
    }

    #[test]
    fn paused_game_makes_no_progress() {
        let report = run(&PlaythroughConfig::new().with_dev_speed(0.0).with_max_frames(300)).unwrap();
        assert_eq!(report.simulated_seconds, 0.0);
        assert_eq!(report.rebirths, 0);
        // Only the starting 10 cash is ever spent: one Money Printer.
        assert_eq!(report.purchases, 1);
    }
}
