//! compare: runs the bus-stop simulation once per dispatch policy.
//!
//! All three runs share one configuration and seed, so they see the same
//! arrival stream up to the point where boarding decisions diverge.
//!
//! ```bash
//! cargo run -p compare                       # built-in defaults
//! cargo run -p compare -- stop.json          # overrides from a JSON file
//! cargo run -p compare -- --verbose        # per-event trace
//! ```
//!
//! The JSON file may set any subset of the configuration fields; missing
//! fields keep their defaults.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use shuttle_fleet::ShuttleConfig;
use shuttle_sim::{LogObserver, NoopObserver, SimBuilder, SimObserver, SimReport};

// ── Policies ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Policy {
    Naive,
    Smart,
    Hybrid,
}

impl Policy {
    const ALL: [Policy; 3] = [Policy::Naive, Policy::Smart, Policy::Hybrid];

    fn name(self) -> &'static str {
        match self {
            Policy::Naive  => "naive",
            Policy::Smart  => "smart",
            Policy::Hybrid => "hybrid",
        }
    }

    fn apply(self, base: &ShuttleConfig) -> ShuttleConfig {
        let (smart_driver, hybrid) = match self {
            Policy::Naive  => (false, false),
            Policy::Smart  => (true, false),
            Policy::Hybrid => (true, true),
        };
        ShuttleConfig { smart_driver, hybrid, ..base.clone() }
    }
}

// ── Config loading ────────────────────────────────────────────────────────────

fn load_config(path: Option<&str>) -> Result<ShuttleConfig> {
    let Some(path) = path else {
        return Ok(ShuttleConfig::default());
    };
    let text = std::fs::read_to_string(Path::new(path))
        .with_context(|| format!("reading config file {path}"))?;
    let config: ShuttleConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing config file {path}"))?;
    Ok(config)
}

fn run_policy(policy: Policy, base: &ShuttleConfig, verbose: bool) -> Result<SimReport> {
    let config = policy.apply(base);
    let mut sim = SimBuilder::new(config)
        .build()
        .with_context(|| format!("building the {} simulation", policy.name()))?;

    let mut trace = LogObserver;
    let mut silent = NoopObserver;
    let observer: &mut dyn SimObserver = if verbose { &mut trace } else { &mut silent };
    sim.run(observer)?;
    Ok(sim.into_report())
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| format!("{v:.2}"))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose");

    // RUST_LOG still wins when set.
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
    let path = args.iter().find(|a| !a.starts_with("--")).map(String::as_str);

    let config = load_config(path)?;
    config.validate()?;

    println!("=== compare: shuttle bus-stop dispatch policies ===");
    println!(
        "Fleet: {} buses x {} seats  |  Passengers: {}  |  Horizon: {}  |  Seed: {}",
        config.fleet_size, config.bus_capacity, config.max_passengers, config.max_sim_time, config.seed
    );
    println!();

    let mut reports = Vec::with_capacity(Policy::ALL.len());
    for policy in Policy::ALL {
        let t0 = Instant::now();
        let report = run_policy(policy, &config, verbose)?;
        log::info!("{} run finished in {:.3} s", policy.name(), t0.elapsed().as_secs_f64());
        reports.push((policy, report));
    }

    println!(
        "{:<8} {:>8} {:>8} {:>9} {:>8} {:>10} {:>10} {:>9}",
        "Policy", "Arrived", "Served", "Stranded", "Trips", "Early", "Mean wait", "Load"
    );
    println!("{}", "-".repeat(78));
    for (policy, report) in &reports {
        println!(
            "{:<8} {:>8} {:>8} {:>9} {:>8} {:>10} {:>10} {:>9}",
            policy.name(),
            report.ledger.len(),
            report.served(),
            report.stranded(),
            report.total_travels(),
            report.early_departures(),
            fmt_opt(report.mean_waiting_time()),
            fmt_opt(report.mean_load_factor()),
        );
    }
    println!();

    // Per-bus travel counts.
    println!("{:<8} {}", "Policy", "Trips per bus");
    println!("{}", "-".repeat(32));
    for (policy, report) in &reports {
        let per_bus: Vec<String> = report
            .travels
            .iter()
            .map(|(bus, n)| format!("{}={n}", bus.0))
            .collect();
        println!("{:<8} {}", policy.name(), per_bus.join(" "));
    }

    Ok(())
}
