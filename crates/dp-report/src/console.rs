//! Console reporter and the pure formatters behind it.

use std::fmt::Write as _;

use dp_core::{AgentId, TransitionEvent};
use dp_engine::{RunObserver, RunReport};

// ── Status lines ──────────────────────────────────────────────────────────────

/// One status line per transition, e.g.
///
/// `[07s] Philosopher 2: EATING | Meals: 3 | Table: T0 T1 E2 T3 T4`
///
/// `E`/`T` marks each seat as eating or thinking, mirroring the flag
/// snapshot taken with the event.
pub fn render_status_line(event: &TransitionEvent) -> String {
    let mut line = format!(
        "[{:02}s] Philosopher {}: {} | Meals: {} | Table:",
        event.elapsed.as_secs(),
        event.agent.0,
        event.action.label(),
        event.meals,
    );
    for (i, eating) in event.eating.iter().enumerate() {
        let mark = if *eating { 'E' } else { 'T' };
        let _ = write!(line, " {mark}{i}");
    }
    line
}

// ── Report tables ─────────────────────────────────────────────────────────────

/// The per-agent meal table of a finished (or checkpointed) run.
pub fn render_final_table(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Agent | Meals | Share");
    let _ = writeln!(out, "------+-------+------");
    for (agent, &meals) in report.per_agent_meals.iter().enumerate() {
        let share = if report.total_meals > 0 {
            meals as f64 / report.total_meals as f64 * 100.0
        } else {
            0.0
        };
        let _ = writeln!(out, "  {agent}   | {meals:5} | {share:4.1}%");
    }
    let _ = writeln!(out, "------+-------+------");
    let _ = writeln!(out, "TOTAL | {:5} |", report.total_meals);
    out
}

/// The intermediate checkpoint block: meal table plus the robustness
/// counters (attempts, successes, throughput).
pub fn render_checkpoint(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== CHECKPOINT ({}s) ===", report.elapsed.as_secs());
    out.push_str(&render_final_table(report));
    let _ = writeln!(
        out,
        "Attempts: {} | Successes: {} | Success rate: {:.1}%",
        report.attempts, report.successes, report.success_rate_pct
    );
    let _ = writeln!(out, "Transitions: {} ({:.1}/s)", report.transitions, report.throughput_per_sec);
    out
}

// ── Fairness analysis ─────────────────────────────────────────────────────────

/// Verdict bands for the fairness spread.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FairnessVerdict {
    /// Spread below 20 % of the mean.
    Excellent,
    /// Spread below 40 % of the mean.
    Acceptable,
    /// Spread at or above 40 % — some agent is being starved.
    PossibleStarvation,
}

impl FairnessVerdict {
    pub fn for_report(report: &RunReport) -> Self {
        if report.fairness_spread_pct < 20.0 {
            FairnessVerdict::Excellent
        } else if report.fairness_spread_pct < 40.0 {
            FairnessVerdict::Acceptable
        } else {
            FairnessVerdict::PossibleStarvation
        }
    }

    fn describe(self) -> &'static str {
        match self {
            FairnessVerdict::Excellent => "EXCELLENT FAIRNESS (spread < 20%)",
            FairnessVerdict::Acceptable => "ACCEPTABLE FAIRNESS (spread < 40%)",
            FairnessVerdict::PossibleStarvation => "POSSIBLE STARVATION (spread >= 40%)",
        }
    }
}

/// The fairness block: totals, min/max, normalized spread, and the verdict.
pub fn render_fairness_analysis(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== FAIRNESS ANALYSIS ===");
    let _ = writeln!(out, "Total meals: {}", report.total_meals);
    let _ = writeln!(out, "Mean per agent: {:.1}", report.mean_meals());
    let _ = writeln!(out, "Min: {}, Max: {}", report.min_meals, report.max_meals);
    let _ = writeln!(
        out,
        "Spread: {} ({:.1}% of mean)",
        report.max_meals - report.min_meals,
        report.fairness_spread_pct
    );
    let _ = writeln!(out, "VERDICT: {}", FairnessVerdict::for_report(report).describe());
    out
}

// ── Robustness analysis ───────────────────────────────────────────────────────

/// Verdict bands for a high-churn run, combining success rate, transition
/// throughput, and fairness spread.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RobustnessVerdict {
    /// Success rate ≥ 95 %, ≥ 10 transitions/s, spread < 30 %.
    Excellent,
    /// Success rate ≥ 90 %, ≥ 5 transitions/s, spread < 50 %.
    Acceptable,
    /// Anything weaker — contention or distribution problems.
    Deficient,
}

impl RobustnessVerdict {
    pub fn for_report(report: &RunReport) -> Self {
        if report.success_rate_pct >= 95.0
            && report.throughput_per_sec >= 10.0
            && report.fairness_spread_pct < 30.0
        {
            RobustnessVerdict::Excellent
        } else if report.success_rate_pct >= 90.0
            && report.throughput_per_sec >= 5.0
            && report.fairness_spread_pct < 50.0
        {
            RobustnessVerdict::Acceptable
        } else {
            RobustnessVerdict::Deficient
        }
    }

    fn describe(self) -> &'static str {
        match self {
            RobustnessVerdict::Excellent => {
                "EXCELLENT ROBUSTNESS (high churn, high success rate, even meals)"
            }
            RobustnessVerdict::Acceptable => {
                "ACCEPTABLE ROBUSTNESS (moderate churn, acceptable success rate)"
            }
            RobustnessVerdict::Deficient => {
                "DEFICIENT ROBUSTNESS (contention or distribution problems)"
            }
        }
    }
}

/// The robustness block: meal distribution, attempt/success counters,
/// throughput, and the verdict.
pub fn render_robustness_analysis(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== ROBUSTNESS ANALYSIS ===");
    let _ = writeln!(out, "Total meals: {}", report.total_meals);
    let _ = writeln!(out, "Mean per agent: {:.1}", report.mean_meals());
    let _ = writeln!(out, "Min: {}, Max: {}", report.min_meals, report.max_meals);
    let _ = writeln!(
        out,
        "Spread: {} ({:.1}% of mean)",
        report.max_meals - report.min_meals,
        report.fairness_spread_pct
    );
    let _ = writeln!(
        out,
        "Attempts: {} | Successes: {} | Success rate: {:.1}%",
        report.attempts, report.successes, report.success_rate_pct
    );
    let _ = writeln!(out, "Transitions: {} ({:.1}/s)", report.transitions, report.throughput_per_sec);
    let _ = writeln!(out, "VERDICT: {}", RobustnessVerdict::for_report(report).describe());
    out
}

// ── ConsoleReporter ───────────────────────────────────────────────────────────

/// The observer the scenario binaries share: status lines per transition,
/// checkpoint blocks at the configured cadence, and a warning line for any
/// agent that ignores cancellation.
///
/// `println!` serializes through stdout's own lock, and transitions arrive
/// already ordered by the metrics lock, so lines never interleave.
pub struct ConsoleReporter {
    /// Suppress per-transition lines (checkpoints and warnings still print).
    quiet: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    /// A reporter that only prints checkpoints and warnings.
    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RunObserver for ConsoleReporter {
    fn on_transition(&self, event: &TransitionEvent) {
        if !self.quiet {
            println!("{}", render_status_line(event));
        }
    }

    fn on_checkpoint(&self, report: &RunReport) {
        println!("\n{}", render_checkpoint(report));
    }

    fn on_stop_timeout(&self, agent: AgentId) {
        println!(
            "WARNING: philosopher {} did not acknowledge stop within the grace period",
            agent.0
        );
    }
}
