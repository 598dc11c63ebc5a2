//! Scenario 3 — robustness under rapid cycling.
//!
//! A small table (3 philosophers) with very short think/eat times, run for
//! 30 s with 10 s checkpoints.  The interesting numbers here are the
//! attempt/success counters and the transition throughput: with cycles two
//! orders of magnitude faster than scenario 2, the gate and forks are under
//! constant churn.  Per-transition status lines are suppressed; at this
//! rate they would swamp the checkpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use dp_core::{Policy, ScenarioConfig, TimeRange};
use dp_engine::Simulation;
use dp_report::{render_final_table, render_robustness_analysis, ConsoleReporter};

const RUN_SECS: u64 = 30;

fn main() -> Result<()> {
    println!("=== THE DINING PHILOSOPHERS ===");
    println!("Scenario 3: robustness under rapid cycling");
    println!("3 philosophers, think 50-100 ms, eat 100-300 ms, {RUN_SECS} s\n");

    let config = ScenarioConfig::new(3, Policy::Arbitrated)
        .think_time(TimeRange::from_millis(50, 100))
        .eat_time(TimeRange::from_millis(100, 300))
        .run_for(Duration::from_secs(RUN_SECS))
        .checkpoint_every(Duration::from_secs(10))
        .stop_grace(Duration::from_secs(2));

    let handle = Simulation::start(config, Arc::new(ConsoleReporter::quiet()))?;
    let report = handle.run_to_end();

    println!("\n=== FINAL STATISTICS ===");
    print!("{}", render_final_table(&report));
    println!();
    print!("{}", render_robustness_analysis(&report));

    println!("\n=== END OF SCENARIO 3 ===");
    Ok(())
}
