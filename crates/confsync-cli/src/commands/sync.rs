//! Synchronization without update

use std::path::Path;

use colored::Colorize;
use confsync_git::{GitSyncer, SyncOutcome, SyncTarget, Synchronizer};
use serde_json::json;

use super::print_json;
use crate::error::Result;

/// Run the `sync` command.
pub fn run_sync(remote: &str, dir: &Path, json: bool) -> Result<()> {
    let outcome = GitSyncer::new(SyncTarget::new(remote, dir)).sync()?;

    if json {
        return print_json(&json!({
            "changed": outcome.changed(),
            "head": outcome.head().map(|oid| oid.to_string()),
        }));
    }

    match outcome {
        SyncOutcome::Cloned { head } => println!(
            "{} Cloned {} into {} at {}.",
            "=>".blue().bold(),
            remote.cyan(),
            dir.display(),
            head.map(|oid| oid.to_string())
                .unwrap_or_else(|| "(no commits)".to_string())
        ),
        SyncOutcome::FastForwarded { from, to } => println!(
            "{} Fast-forwarded {} -> {}.",
            "=>".blue().bold(),
            from.map(|oid| oid.to_string())
                .unwrap_or_else(|| "(no commits)".to_string()),
            to
        ),
        SyncOutcome::UpToDate { .. } => {
            println!("{} Already up to date.", "OK".green().bold())
        }
    }

    Ok(())
}
