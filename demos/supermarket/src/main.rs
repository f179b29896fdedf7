//! supermarket — a day at a small self-contained store.
//!
//! Spawns shoppers at the entry at a fixed interval, lets each brain kind's
//! policy make their purchase, navigation and distraction decisions, and
//! prints a per-brain summary once the run ends.
//!
//! ```text
//! cargo run -p supermarket -- --agents 60 --ticks 36000
//! RUST_LOG=shop_sim=debug cargo run -p supermarket -- --config store.toml
//! ```

mod store;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shop_brain::{BrainKind, DecisionCategory, Delivery};
use shop_catalog::load_catalog_csv;
use shop_checkout::CheckoutDone;
use shop_core::{SimConfig, SimRng, Tick};
use shop_nav::WalkingNavigator;
use shop_shopper::RetiredShopper;
use shop_sim::{SimBuilder, SimObserver};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "supermarket", about = "Run the shopper simulation on a synthetic store.")]
struct Cli {
    /// TOML file with `SimConfig` fields; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Aisle catalog CSV (`name,class,x,y,z`).  Defaults to the built-in store.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Overrides the config seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Overrides the config tick count.
    #[arg(long)]
    ticks: Option<u64>,

    /// Shoppers to spawn over the run.
    #[arg(long, default_value_t = 40)]
    agents: usize,

    /// Simulated seconds between arrivals.
    #[arg(long, default_value_t = 5.0)]
    spawn_every: f32,

    /// Relative share of goal-oriented, impulse and wanderer shoppers.
    #[arg(long, value_delimiter = ',', default_values_t = [0.5_f32, 0.3, 0.2])]
    brain_mix: Vec<f32>,
}

fn load_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            toml::from_str::<SimConfig>(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(ticks) = cli.ticks {
        config.total_ticks = ticks;
    }
    config.validate()?;
    Ok(config)
}

/// Pick a brain kind with probability proportional to `mix`.
fn pick_brain(rng: &mut SimRng, mix: &[f32]) -> BrainKind {
    let total: f32 = mix.iter().sum();
    let mut r = rng.gen_range(0.0..total);
    for (kind, w) in BrainKind::ALL.into_iter().zip(mix) {
        if r < *w {
            return kind;
        }
        r -= w;
    }
    BrainKind::GoalOriented
}

// ── Report ────────────────────────────────────────────────────────────────────

#[derive(Default, Clone, Copy)]
struct BrainTotals {
    retired:      u32,
    seconds:      f64,
    bought:       u32,
    browsed:      u32,
    left_on_list: u32,
    decisions:    u64,
    invalid:      u64,
    reward:       f64,
    episodes:     u32,
}

/// Collects the summary and logs progress once per simulated minute.
struct Report {
    per_brain:        [BrainTotals; 3],
    checkouts:        u32,
    service_secs:     f64,
    ticks_per_minute: u64,
}

impl Report {
    fn new(config: &SimConfig) -> Self {
        Self {
            per_brain:        [BrainTotals::default(); 3],
            checkouts:        0,
            service_secs:     0.0,
            ticks_per_minute: config.make_clock().ticks_for_secs(60.0).max(1),
        }
    }
}

impl SimObserver for Report {
    fn on_tick_end(&mut self, tick: Tick, active: usize) {
        if tick.0 > 0 && tick.0.is_multiple_of(self.ticks_per_minute) {
            info!(%tick, active, checkouts = self.checkouts, "progress");
        }
    }

    fn on_decision(&mut self, _tick: Tick, brain: BrainKind, delivery: &Delivery) {
        let t = &mut self.per_brain[brain.index()];
        match delivery.decision {
            Some(_) => t.decisions += 1,
            None    => t.invalid += 1,
        }
        t.reward += delivery.reward as f64;
    }

    fn on_episode_end(&mut self, _tick: Tick, brain: BrainKind, completed: u32) {
        self.per_brain[brain.index()].episodes = completed;
    }

    fn on_checkout_done(&mut self, _tick: Tick, done: &CheckoutDone) {
        self.checkouts += 1;
        self.service_secs += done.service_secs as f64;
    }

    fn on_agent_retired(&mut self, _tick: Tick, shopper: &RetiredShopper) {
        let t = &mut self.per_brain[shopper.brain.index()];
        t.retired += 1;
        t.seconds += shopper.time_spent_secs as f64;
        t.bought += shopper.counters.total_bought;
        t.browsed += shopper.counters.total_browsed;
        t.left_on_list += shopper.list_remaining as u32;
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        info!(%final_tick, "simulation finished");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    ensure!(cli.brain_mix.len() == 3, "--brain-mix takes exactly three weights");
    ensure!(
        cli.brain_mix.iter().all(|w| *w >= 0.0) && cli.brain_mix.iter().sum::<f32>() > 0.0,
        "--brain-mix weights must be non-negative and not all zero"
    );
    ensure!(cli.spawn_every > 0.0, "--spawn-every must be positive");

    // 1. Config and store.
    let config = load_config(&cli)?;
    let catalog = match &cli.catalog {
        Some(path) => load_catalog_csv(path).with_context(|| format!("loading {}", path.display()))?,
        None => store::catalog()?,
    };
    let layout = store::layout();
    println!("=== supermarket — shopper simulation ===");
    println!(
        "Aisles: {}  |  Stations: {}  |  Shoppers: {}  |  Seed: {}",
        catalog.len(),
        store::stations().len(),
        cli.agents,
        config.seed
    );

    // 2. Build sim.
    let nav = WalkingNavigator::new(config.walk_speed).with_floor(store::floor());
    let mut sim = SimBuilder::new(config.clone(), catalog, layout)
        .navigator(nav)
        .stations(store::stations())
        .build()?;

    // 3. Run, spawning at the entry between ticks.
    let mut report = Report::new(&config);
    let mut spawner = SimRng::new(config.seed).child(0xA11CE);
    let spawn_ticks = config.make_clock().ticks_for_secs(cli.spawn_every).max(1);
    let mut spawned = 0;

    let t0 = Instant::now();
    while sim.clock.current_tick.0 < config.total_ticks {
        if spawned < cli.agents && sim.clock.current_tick.0.is_multiple_of(spawn_ticks) {
            let kind = pick_brain(&mut spawner, &cli.brain_mix);
            let entry = sim.layout.entry;
            sim.spawn(kind, entry);
            spawned += 1;
        }
        sim.run_ticks(1, &mut report);
    }
    report.on_sim_end(sim.clock.current_tick);
    let elapsed = t0.elapsed();

    // 4. Summary.
    println!("Simulated {} in {:.3} s", sim.clock, elapsed.as_secs_f64());
    println!(
        "Spawned {spawned}, retired {}, still inside {}",
        sim.retired_shoppers(),
        sim.active_shoppers()
    );
    if report.checkouts > 0 {
        println!(
            "Checkouts: {}  (mean service {:.1} s)",
            report.checkouts,
            report.service_secs / report.checkouts as f64
        );
    }
    println!();

    println!(
        "{:<10} {:>7} {:>9} {:>7} {:>8} {:>8} {:>10} {:>8} {:>9}",
        "Brain", "Retired", "Mean min", "Bought", "Browsed", "Left", "Decisions", "Invalid", "Episodes"
    );
    println!("{}", "-".repeat(86));
    for kind in BrainKind::ALL {
        let t = report.per_brain[kind.index()];
        let mean_min = if t.retired > 0 { t.seconds / t.retired as f64 / 60.0 } else { 0.0 };
        println!(
            "{:<10} {:>7} {:>9.1} {:>7} {:>8} {:>8} {:>10} {:>8} {:>9}",
            kind.name(),
            t.retired,
            mean_min,
            t.bought,
            t.browsed,
            t.left_on_list,
            t.decisions,
            t.invalid,
            t.episodes,
        );
    }
    println!();

    println!("{:<10} {:>10} {:>12} {:>12}", "Brain", "Purchase", "Navigation", "Distraction");
    println!("{}", "-".repeat(47));
    for kind in BrainKind::ALL {
        let [p, n, d] = DecisionCategory::ALL.map(|c| sim.tracker.category_total(kind, c));
        let reward = report.per_brain[kind.index()].reward;
        println!("{:<10} {:>10} {:>12} {:>12}   reward {reward:+.1}", kind.name(), p, n, d);
    }
    println!();

    println!("{:<16} {:>7} {:>8} {:>8}", "Aisle", "Bought", "Browsed", "Ignored");
    println!("{}", "-".repeat(42));
    for (aisle, stats) in sim.ledger.iter() {
        let name = sim.catalog.name_of(aisle).unwrap_or("?");
        println!("{:<16} {:>7} {:>8} {:>8}", name, stats.bought, stats.browsed, stats.ignored);
    }

    Ok(())
}
