//! Update from the working copy as it is

use std::path::Path;

use colored::Colorize;
use confsync_updater::{Updater, UpdaterConfig};

use super::{print_json, print_update_report};
use crate::error::Result;

/// Run the `apply` command.
///
/// No operators are registered, so only direct-copy configs (and empty
/// task-routing configs) can be applied from the command line.
pub fn run_apply(dir: &Path, json: bool) -> Result<()> {
    let report = Updater::new(UpdaterConfig::new(dir))?.update()?;

    if json {
        return print_json(&serde_json::to_value(&report)?);
    }

    println!("{} Applied {}.", "=>".blue().bold(), dir.display());
    print_update_report(&report);
    Ok(())
}
