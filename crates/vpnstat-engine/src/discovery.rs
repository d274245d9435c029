//! Entity discovery.
//!
//! Each OpenVPN configuration file `<conf_dir>/<name>.<ext>` defines one
//! entity called `<name>`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use vpnstat_core::model::entity::{truncate_name, validate_name};

use crate::errors::{io_error, Result};

/// Source of the ordered entity names polled on each tick
pub trait EntitySource {
    /// List entity names in discovery order
    ///
    /// # Errors
    ///
    /// Returns an error when the source cannot be read; the tick is skipped.
    fn discover(&self) -> Result<Vec<String>>;
}

/// Discovers entities from configuration files in a directory
#[derive(Debug, Clone)]
pub struct ConfDirDiscovery {
    dir: PathBuf,
    extension: String,
    limit: Option<usize>,
}

impl ConfDirDiscovery {
    pub fn new(dir: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.trim_start_matches('.').to_string(),
            limit: None,
        }
    }

    /// Stop after `limit` names
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn name_for(&self, path: &Path) -> Option<String> {
        if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        Some(truncate_name(stem))
    }
}

impl EntitySource for ConfDirDiscovery {
    fn discover(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| io_error("discover", e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error("discover", e))?;
            let path = entry.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for path in &paths {
            let Some(name) = self.name_for(path) else {
                continue;
            };
            if let Err(err) = validate_name(&name) {
                tracing::warn!(path = %path.display(), error = %err, "Skipping unusable config file");
                continue;
            }
            if !seen.insert(name.clone()) {
                tracing::warn!(
                    path = %path.display(),
                    entity = %name,
                    "Skipping duplicate entity name"
                );
                continue;
            }
            names.push(name);
            if self.limit.is_some_and(|limit| names.len() >= limit) {
                break;
            }
        }

        tracing::debug!(
            dir = %self.dir.display(),
            entity_count = names.len(),
            "Discovered entities"
        );
        Ok(names)
    }
}
