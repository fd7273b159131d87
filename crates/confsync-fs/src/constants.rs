//! Well-known names inside a synchronized working copy.

/// Routing configuration file, relative to the working copy root.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Git metadata directory of a non-bare working copy.
pub const GIT_DIR_NAME: &str = ".git";
