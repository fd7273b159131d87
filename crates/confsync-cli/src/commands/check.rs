//! Routing config validation

use std::path::Path;

use colored::Colorize;
use confsync_updater::{RoutingConfig, load};

use super::print_json;
use crate::error::Result;

/// Run the `check` command.
pub fn run_check(dir: &Path, json: bool) -> Result<()> {
    let config = load(dir)?;

    if json {
        return print_json(&serde_json::to_value(&config)?);
    }

    match &config {
        RoutingConfig::DirectCopy(entries) => {
            println!(
                "{} config.json is valid: direct copy, {} entr{}.",
                "OK".green().bold(),
                entries.len(),
                if entries.len() == 1 { "y" } else { "ies" }
            );
            for entry in entries {
                println!(
                    "   {} {} -> {}",
                    "-".blue(),
                    entry.source.cyan(),
                    entry.destination.join(entry.file_name()).display()
                );
            }
        }
        RoutingConfig::TaskRouting(entries) => {
            println!(
                "{} config.json is valid: task routing, {} entr{}.",
                "OK".green().bold(),
                entries.len(),
                if entries.len() == 1 { "y" } else { "ies" }
            );
            for entry in entries {
                for task in &entry.tasks {
                    println!(
                        "   {} {} -> {} {}",
                        "-".blue(),
                        entry.source.cyan(),
                        task.name.yellow(),
                        task.args.join(" ").dimmed()
                    );
                }
            }
        }
    }

    Ok(())
}
