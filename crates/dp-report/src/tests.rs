//! Formatter tests.

use std::time::Duration;

use dp_core::{AgentAction, AgentId, TransitionEvent};
use dp_engine::{MetricsCollector, NoopObserver, RunReport};

use crate::{
    render_fairness_analysis, render_final_table, render_robustness_analysis,
    render_status_line, FairnessVerdict, RobustnessVerdict,
};

/// A report with the given meal distribution, `extra_attempts` failed
/// attempts on top of the successful ones, over `elapsed`.  Every meal
/// contributes two transitions (Eating + DoneEating).
fn report_with(meals: &[u64], extra_attempts: u64, elapsed: Duration) -> RunReport {
    let collector = MetricsCollector::new(meals.len());
    for (agent, &n) in meals.iter().enumerate() {
        for _ in 0..n {
            collector.record_attempt();
            collector.record_transition(AgentId(agent as u32), AgentAction::Eating, &NoopObserver);
            collector.record_transition(AgentId(agent as u32), AgentAction::DoneEating, &NoopObserver);
        }
    }
    for _ in 0..extra_attempts {
        collector.record_attempt();
    }
    collector.snapshot(elapsed)
}

fn report_with_meals(meals: &[u64]) -> RunReport {
    report_with(meals, 0, Duration::from_secs(10))
}

#[test]
fn status_line_shows_flags_and_meals() {
    let event = TransitionEvent {
        elapsed: Duration::from_secs(7),
        agent: AgentId(2),
        action: AgentAction::Eating,
        meals: 3,
        eating: vec![false, false, true, false, false],
    };
    assert_eq!(
        render_status_line(&event),
        "[07s] Philosopher 2: EATING | Meals: 3 | Table: T0 T1 E2 T3 T4"
    );
}

#[test]
fn final_table_totals_match() {
    let table = render_final_table(&report_with_meals(&[2, 3]));
    assert!(table.contains("TOTAL |     5 |"), "table was:\n{table}");
}

#[test]
fn fairness_verdict_bands() {
    // [5, 5, 5]: spread 0% → excellent.
    assert_eq!(
        FairnessVerdict::for_report(&report_with_meals(&[5, 5, 5])),
        FairnessVerdict::Excellent
    );
    // [4, 5]: mean 4.5, spread 22.2% → acceptable.
    assert_eq!(
        FairnessVerdict::for_report(&report_with_meals(&[4, 5])),
        FairnessVerdict::Acceptable
    );
    // [1, 9]: mean 5, spread 160% → starvation.
    assert_eq!(
        FairnessVerdict::for_report(&report_with_meals(&[1, 9])),
        FairnessVerdict::PossibleStarvation
    );
}

#[test]
fn fairness_analysis_names_the_verdict() {
    let text = render_fairness_analysis(&report_with_meals(&[1, 9]));
    assert!(text.contains("POSSIBLE STARVATION"), "got:\n{text}");
    assert!(text.contains("Min: 1, Max: 9"));
}

#[test]
fn robustness_verdict_bands() {
    // [10, 10] over 1 s: 100% success, 40 transitions/s, spread 0 → excellent.
    assert_eq!(
        RobustnessVerdict::for_report(&report_with(&[10, 10], 0, Duration::from_secs(1))),
        RobustnessVerdict::Excellent
    );
    // [20, 20, 20] + 4 failed attempts over 10 s: 93.75% success drops out of
    // the excellent band; 12 transitions/s and spread 0 keep it acceptable.
    assert_eq!(
        RobustnessVerdict::for_report(&report_with(&[20, 20, 20], 4, Duration::from_secs(10))),
        RobustnessVerdict::Acceptable
    );
    // [1, 9] over 10 s: 2 transitions/s and a 160% spread → deficient.
    assert_eq!(
        RobustnessVerdict::for_report(&report_with(&[1, 9], 0, Duration::from_secs(10))),
        RobustnessVerdict::Deficient
    );
}

#[test]
fn robustness_analysis_names_the_verdict() {
    let text = render_robustness_analysis(&report_with(&[10, 10], 0, Duration::from_secs(1)));
    assert!(text.contains("EXCELLENT ROBUSTNESS"), "got:\n{text}");
    assert!(text.contains("Success rate: 100.0%"));
    assert!(text.contains("(40.0/s)"));
}
