use crate::error::ShellError;
use mathbasics::LIBRARY_NAME;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Resource root used for `mathbasics` when nothing else is configured.
pub const DEFAULT_RESOURCE_ROOT: &str = "resources/mathbasics";

/// Shell configuration.
///
/// Base paths are only ever taken from here; the shell never guesses them
/// from its environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Library name → base path.
    pub resource_roots: BTreeMap<String, String>,
    /// Where manifests of libraries without a resource root are looked up.
    pub manifest_dir: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        let mut resource_roots = BTreeMap::new();
        resource_roots.insert(LIBRARY_NAME.to_string(), DEFAULT_RESOURCE_ROOT.to_string());
        Self {
            resource_roots,
            manifest_dir: None,
        }
    }
}

impl ShellConfig {
    pub fn load(path: &Path) -> Result<Self, ShellError> {
        let config_error = |reason: String| ShellError::Config {
            path: path.to_path_buf(),
            reason,
        };
        let content = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let config = serde_json::from_str(&content).map_err(|e| config_error(e.to_string()))?;
        log::debug!("Loaded shell config from {:?}", path);
        Ok(config)
    }

    /// Applies a `NAME=PATH` override.
    pub fn apply_override(&mut self, spec: &str) -> Result<(), String> {
        match spec.split_once('=') {
            Some((name, path)) if !name.trim().is_empty() && !path.trim().is_empty() => {
                self.resource_roots
                    .insert(name.trim().to_string(), path.trim().to_string());
                Ok(())
            }
            _ => Err(format!("expected NAME=PATH, got '{}'", spec)),
        }
    }
}
