//! Scenario 1 — demonstrating deadlock.
//!
//! Runs the same table twice for 10 s: first under the naive policy (left
//! fork, a 100 ms pause, then right fork — the pause makes the all-left-
//! forks-held state likely within the window), then under the admission
//! gate.  The naive run is expected to stall partway: the status stream goes
//! quiet, no further EATING lines appear, and the final table shows low or
//! zero meal counts.  The arbitrated run keeps eating to the end.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use dp_core::{Policy, ScenarioConfig, TimeRange};
use dp_engine::Simulation;
use dp_report::{render_final_table, ConsoleReporter};

const RUN_SECS: u64 = 10;

fn scenario(policy: Policy) -> ScenarioConfig {
    let config = ScenarioConfig::new(5, policy)
        .think_time(TimeRange::from_millis(500, 900))
        .eat_time(TimeRange::from_millis(2_000, 3_000))
        .run_for(Duration::from_secs(RUN_SECS))
        .stop_grace(Duration::from_secs(1));
    match policy {
        Policy::Naive => config.acquisition_gap(Duration::from_millis(100)),
        Policy::Arbitrated => config,
    }
}

fn run_version(label: &str, policy: Policy) -> Result<()> {
    println!("\n=== STARTING {label} ===");
    let handle = Simulation::start(scenario(policy), Arc::new(ConsoleReporter::new()))?;
    let report = handle.run_to_end();

    println!("\n=== FINAL STATISTICS ===");
    print!("{}", render_final_table(&report));
    Ok(())
}

fn main() -> Result<()> {
    println!("=== THE DINING PHILOSOPHERS ===");
    println!("Scenario 1: demonstrating deadlock");
    println!("5 philosophers, short thinking (<1 s), long meals (2-3 s), {RUN_SECS} s per version");

    run_version("NAIVE VERSION (deadlock expected)", Policy::Naive)?;
    println!("\n==================================================");
    run_version("ARBITRATED VERSION (admission gate)", Policy::Arbitrated)?;

    println!("\n=== END OF SCENARIO ===");
    println!("The naive version should stall once every philosopher holds its left fork;");
    println!("the admission-controlled version keeps everyone eating.");
    Ok(())
}
