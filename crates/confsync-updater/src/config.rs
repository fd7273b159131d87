//! Routing configuration loaded from `config.json`
//!
//! The file is a JSON object keyed by source path (relative to the working
//! copy). Every value is either a destination directory or a task list:
//!
//! ```json
//! { "hosts/app.conf": "/etc/app" }
//! ```
//!
//! ```json
//! { "hosts/app.conf": [ { "name": "reload", "args": ["app"] } ] }
//! ```
//!
//! The two shapes cannot be mixed in one file.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use confsync_fs::CONFIG_FILE_NAME;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One task routed to an operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Operator name, resolved against the registry.
    pub name: String,
    /// Arguments passed to the operator verbatim.
    #[serde(default)]
    pub args: Vec<String>,
}

/// Direct-copy entry: copy `source` into the `destination` directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyEntry {
    pub source: String,
    pub destination: PathBuf,
}

/// Task-routing entry: hand `source` to each listed operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskEntry {
    pub source: String,
    pub tasks: Vec<TaskSpec>,
}

impl CopyEntry {
    pub fn file_name(&self) -> &str {
        base_name(&self.source)
    }
}

impl TaskEntry {
    pub fn file_name(&self) -> &str {
        base_name(&self.source)
    }
}

/// Parsed routing configuration, sorted by source path.
///
/// Source paths are unique, relative, and stay inside the working copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "entries", rename_all = "snake_case")]
pub enum RoutingConfig {
    DirectCopy(Vec<CopyEntry>),
    TaskRouting(Vec<TaskEntry>),
}

impl RoutingConfig {
    /// Number of routing entries.
    pub fn len(&self) -> usize {
        match self {
            Self::DirectCopy(entries) => entries.len(),
            Self::TaskRouting(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Source paths of all entries, in order.
    pub fn sources(&self) -> Vec<&str> {
        match self {
            Self::DirectCopy(entries) => entries.iter().map(|e| e.source.as_str()).collect(),
            Self::TaskRouting(entries) => entries.iter().map(|e| e.source.as_str()).collect(),
        }
    }
}

/// Load the routing configuration of the working copy at `source_dir`.
///
/// # Errors
///
/// - [`Error::ConfigNotFound`] if `config.json` does not exist
/// - [`Error::ConfigRead`] if it exists but cannot be read
/// - [`Error::ConfigParse`] if its content is not a valid routing config
pub fn load(source_dir: &Path) -> Result<RoutingConfig> {
    let path = source_dir.join(CONFIG_FILE_NAME);

    let content = match fs::read(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::ConfigNotFound { path });
        }
        Err(source) => return Err(Error::ConfigRead { path, source }),
    };

    let config: RoutingConfig =
        serde_json::from_slice(&content).map_err(|source| Error::ConfigParse {
            path: path.clone(),
            source,
        })?;

    tracing::debug!(path = %path.display(), entries = config.len(), "Loaded routing config");
    Ok(config)
}

fn base_name(source: &str) -> &str {
    Path::new(source)
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or(source)
}

/// Reject source paths that are empty, absolute, or climb out of the
/// working copy.
fn validate_source(source: &str) -> std::result::Result<(), String> {
    if source.trim().is_empty() {
        return Err("source path is empty".to_string());
    }

    let path = Path::new(source);
    if path.is_absolute() || source.starts_with('/') || source.starts_with('\\') {
        return Err(format!("source path `{source}` must be relative"));
    }

    let mut depth = 0usize;
    for component in path.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    format!("source path `{source}` escapes the working copy")
                })?;
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(format!("source path `{source}` must be relative"));
            }
        }
    }

    if depth == 0 || path.file_name().is_none() {
        return Err(format!("source path `{source}` does not name a file"));
    }

    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Destination(PathBuf),
    Tasks(Vec<TaskSpec>),
}

impl<'de> Deserialize<'de> for RoutingConfig {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RoutingVisitor)
    }
}

struct RoutingVisitor;

impl<'de> Visitor<'de> for RoutingVisitor {
    type Value = RoutingConfig;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping source paths to a destination directory or a task list")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<RoutingConfig, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut seen = BTreeSet::new();
        let mut copies = Vec::new();
        let mut routes = Vec::new();

        while let Some(source) = map.next_key::<String>()? {
            validate_source(&source).map_err(de::Error::custom)?;

            if !seen.insert(source.clone()) {
                return Err(de::Error::custom(format!(
                    "duplicate routing entry for `{source}`"
                )));
            }

            match map.next_value::<RawEntry>()? {
                RawEntry::Destination(destination) => {
                    copies.push(CopyEntry { source, destination })
                }
                RawEntry::Tasks(tasks) => routes.push(TaskEntry { source, tasks }),
            }
        }

        if !copies.is_empty() && !routes.is_empty() {
            return Err(de::Error::custom(
                "config mixes destination directories and task lists",
            ));
        }

        if copies.is_empty() {
            routes.sort_by(|a, b| a.source.cmp(&b.source));
            Ok(RoutingConfig::TaskRouting(routes))
        } else {
            copies.sort_by(|a, b| a.source.cmp(&b.source));
            Ok(RoutingConfig::DirectCopy(copies))
        }
    }
}
