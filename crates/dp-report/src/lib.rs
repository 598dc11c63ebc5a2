//! `dp-report` — renders engine events and reports for the console.
//!
//! The engine knows nothing about presentation; it emits
//! [`TransitionEvent`][dp_core::TransitionEvent]s and
//! [`RunReport`][dp_engine::RunReport]s through the
//! [`RunObserver`][dp_engine::RunObserver] trait.  This crate supplies the
//! one observer the scenario binaries share — [`ConsoleReporter`] — plus the
//! pure `render_*` formatters it is built from, kept as functions returning
//! `String` so they are testable without capturing stdout.

pub mod console;

#[cfg(test)]
mod tests;

pub use console::{
    render_checkpoint, render_fairness_analysis, render_final_table,
    render_robustness_analysis, render_status_line, ConsoleReporter, FairnessVerdict,
    RobustnessVerdict,
};
