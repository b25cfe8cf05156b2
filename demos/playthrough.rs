// demos/playthrough.rs
// Run with:
//   RUST_LOG=idle_prestige=info cargo run --example playthrough
//
// Plays the idle game greedily with seeded frame jitter, then prints the
// milestone summary and the current Cash breakdown of a fresh game.

use idle_prestige::genres::idle::playthrough::{run, PlaythroughConfig};
use idle_prestige::genres::idle::{CashBuyable, CashUpgrade, IdleGame, LayerId};
use idle_prestige::mechanics::{format, format_whole, DEFAULT_PRECISION};
use idle_prestige::GameConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = PlaythroughConfig::new()
        .with_seed(2024)
        .with_max_frames(40_000)
        .with_frame_seconds(1.0, 0.15);
    let report = run(&config)?;

    println!("== Greedy playthrough (seed {}) ==", config.seed);
    println!("frames            : {}", report.frames);
    println!("simulated seconds : {:.0}", report.simulated_seconds);
    println!("manual purchases  : {}", report.purchases);
    println!("rebirths          : {}", report.rebirths);
    println!("super rebirths    : {}", report.super_rebirths);
    println!("best cash         : {}", format(report.best_cash, DEFAULT_PRECISION));
    println!("best RP           : {}", format(report.best_rp, DEFAULT_PRECISION));
    println!("progression       : {}", report.progression);
    println!("reached target    : {}", report.finished);

    // A hand-played opening, tick by tick.
    let mut game = IdleGame::new(GameConfig::default())?;
    game.purchase(CashBuyable::MoneyPrinters.into())?;
    for _ in 0..120 {
        game.tick(1.0);
        while game.can_purchase(CashBuyable::MoneyPrinters.into()) {
            game.purchase(CashBuyable::MoneyPrinters.into())?;
        }
        if game.can_purchase(CashUpgrade::PolynomialGrowth.into()) {
            game.purchase(CashUpgrade::PolynomialGrowth.into())?;
        }
    }

    println!();
    println!("== Opening after 120s ==");
    println!(
        "cash {} (+{}/s), printers {}",
        format(game.points(LayerId::Cash).value(), DEFAULT_PRECISION),
        format(game.point_gain(LayerId::Cash), DEFAULT_PRECISION),
        format_whole(game.cash_effects().printers),
    );
    for row in game.gain_breakdown(LayerId::Cash) {
        let state = if row.enabled { "on " } else { "off" };
        println!(
            "  [{state}] {:<20} {:<14} -> {}",
            row.description,
            row.kind.to_string(),
            format(row.value, DEFAULT_PRECISION)
        );
    }
    Ok(())
}
