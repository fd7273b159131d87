//! Full pipeline: sync, then update on change

use std::path::Path;

use colored::Colorize;
use confsync_core::sync_and_update;

use super::{print_json, print_update_report};
use crate::error::Result;

/// Run the `run` command.
pub fn run_pipeline(remote: &str, dir: &Path, json: bool) -> Result<()> {
    let report = sync_and_update(remote, dir)?;

    if json {
        return print_json(&serde_json::to_value(&report)?);
    }

    match (&report.update, &report.head) {
        (None, head) => println!(
            "{} Already up to date at {}.",
            "OK".green().bold(),
            head.as_deref().unwrap_or("(no commits)")
        ),
        (Some(update), head) => {
            println!(
                "{} Working copy updated to {}.",
                "=>".blue().bold(),
                head.as_deref().unwrap_or("(no commits)")
            );
            print_update_report(update);
        }
    }

    Ok(())
}
