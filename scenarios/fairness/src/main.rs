//! Scenario 2 — fairness analysis.
//!
//! A 60 s arbitrated run with balanced timing (think 1-2 s, eat 0.5-1 s)
//! and a checkpoint every 10 s.  The goal is to verify the absence of
//! starvation: every philosopher should eat a comparable number of meals,
//! and the normalized fairness spread should land in the acceptable band.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use dp_core::{Policy, ScenarioConfig, TimeRange};
use dp_engine::Simulation;
use dp_report::{render_fairness_analysis, render_final_table, ConsoleReporter};

const RUN_SECS: u64 = 60;

fn main() -> Result<()> {
    println!("=== THE DINING PHILOSOPHERS ===");
    println!("Scenario 2: fairness analysis");
    println!("5 philosophers, balanced timing (think 1-2 s, eat 0.5-1 s), {RUN_SECS} s");
    println!("Goal: no starvation - every philosopher eats a fair share\n");

    let config = ScenarioConfig::new(5, Policy::Arbitrated)
        .think_time(TimeRange::from_millis(1_000, 2_000))
        .eat_time(TimeRange::from_millis(500, 1_000))
        .run_for(Duration::from_secs(RUN_SECS))
        .checkpoint_every(Duration::from_secs(10))
        .stop_grace(Duration::from_secs(2));

    let handle = Simulation::start(config, Arc::new(ConsoleReporter::new()))?;
    let report = handle.run_to_end();

    println!("\n=== FINAL STATISTICS ===");
    print!("{}", render_final_table(&report));
    println!();
    print!("{}", render_fairness_analysis(&report));

    println!("\n=== END OF SCENARIO 2 ===");
    println!("The admission gate bounds how many philosophers compete for forks,");
    println!("which is what keeps the meal counts close together.");
    Ok(())
}
