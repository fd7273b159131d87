//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// ConfSync - keep configuration files in step with a git repository
#[derive(Parser, Debug)]
#[command(name = "confsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Remote repository and local working copy
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct TargetArgs {
    /// URL or path of the remote repository
    #[arg(short, long, env = "CONFSYNC_REMOTE")]
    pub remote: String,

    #[command(flatten)]
    pub dir: DirArgs,
}

/// Local working copy
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DirArgs {
    /// Local working copy directory
    #[arg(short, long, env = "CONFSYNC_DIR")]
    pub dir: PathBuf,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Synchronize the working copy and apply config.json if anything changed
    Run {
        #[command(flatten)]
        target: TargetArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Clone or fast-forward the working copy without applying anything
    Sync {
        #[command(flatten)]
        target: TargetArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Apply config.json from the working copy as it is now
    Apply {
        #[command(flatten)]
        dir: DirArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Validate config.json and list its routing entries
    Check {
        #[command(flatten)]
        dir: DirArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
