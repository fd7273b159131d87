//! Command implementations for confsync-cli

pub mod apply;
pub mod check;
pub mod run;
pub mod sync;

pub use apply::run_apply;
pub use check::run_check;
pub use run::run_pipeline;
pub use sync::run_sync;

use colored::Colorize;
use confsync_core::UpdateReport;
use serde_json::Value;

use crate::error::Result;

/// Print a JSON value in pretty form.
pub(crate) fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Human-readable summary of one dispatch cycle.
pub(crate) fn print_update_report(report: &UpdateReport) {
    for path in &report.written {
        println!("   {} {}", "+".green(), path.display().to_string().cyan());
    }
    for path in &report.unchanged {
        println!("   {} {} (unchanged)", "=".dimmed(), path.display());
    }
    if report.submitted > 0 {
        println!(
            "   {} {} task(s) submitted, ran {}",
            "->".blue(),
            report.submitted,
            report.operators_run.join(", ").cyan()
        );
    }
    if report.is_empty() && report.unchanged.is_empty() {
        println!("   {} Nothing to distribute.", "-".dimmed());
    }
}
