//! Configuration loading from file, environment, and CLI arguments.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{KuGraphError, KuGraphResult};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "KUG_CONFIG";

/// Config file picked up from the working directory.
pub const LOCAL_CONFIG: &str = "kug.toml";

/// Settings for the `kug` tool and the link service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KugConfig {
    /// Log level used when neither `--verbose` nor `RUST_LOG` is set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Refuse links whose source and target are the same unit.
    #[serde(default = "default_reject_self_links")]
    pub reject_self_links: bool,
    /// Output format when `--format` is not given: "text" or "json".
    #[serde(default = "default_format")]
    pub default_format: String,
    /// Treat rejected links in scripts as a failure.
    #[serde(default)]
    pub strict: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_reject_self_links() -> bool {
    true
}

fn default_format() -> String {
    "text".to_string()
}

impl Default for KugConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            reject_self_links: default_reject_self_links(),
            default_format: default_format(),
            strict: false,
        }
    }
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> KuGraphResult<KugConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        KuGraphError::Config(format!("Failed to read config file {}: {e}", path.display()))
    })?;
    parse_config(&content)
}

/// Parse configuration from TOML text. Missing keys take their defaults.
pub fn parse_config(content: &str) -> KuGraphResult<KugConfig> {
    toml::from_str(content).map_err(|e| KuGraphError::Config(format!("Failed to parse config: {e}")))
}

/// Resolve the config file path using priority order:
/// 1. Explicit path (CLI arg)
/// 2. KUG_CONFIG environment variable
/// 3. kug.toml in current directory
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(env_path));
    }

    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        return Some(local);
    }

    None
}

/// Resolve and load, falling back to defaults when no file is found.
pub fn load_or_default(explicit: Option<&Path>) -> KuGraphResult<KugConfig> {
    match resolve_config_path(explicit) {
        Some(path) => load_config(&path),
        None => Ok(KugConfig::default()),
    }
}
