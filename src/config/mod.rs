pub mod types;

pub use types::{AnalyzeConfig, SuppressionRule};

use crate::error::{ConfigError, Result};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".gateway-lint.toml";

/// Get the global config file path (~/.gateway-lint.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (dir/.gateway-lint.toml)
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Parse configuration from a TOML string.
pub fn load_from_str(content: &str) -> Result<AnalyzeConfig> {
    toml::from_str(content)
        .map_err(|e| ConfigError::ParsingFailed(e.to_string()).into())
}

/// Load configuration from a TOML file.
pub fn load_from_file(path: &Path) -> Result<AnalyzeConfig> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    load_from_str(&content)
}

/// Load configuration.
///
/// An explicit path must exist and parse. Otherwise the local config in the
/// current directory is tried, then the global one, then defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<AnalyzeConfig> {
    if let Some(path) = explicit {
        log::debug!("loading config from {}", path.display());
        return load_from_file(path);
    }

    let local = local_config_path(Path::new("."));
    let candidates = std::iter::once(local).chain(global_config_path());
    for candidate in candidates {
        if candidate.exists() {
            log::debug!("loading config from {}", candidate.display());
            return load_from_file(&candidate);
        }
    }

    Ok(AnalyzeConfig::default())
}

/// Save configuration to a TOML file.
pub fn save_config(config: &AnalyzeConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::ParsingFailed(e.to_string()))?;
    fs::write(path, content)?;
    Ok(())
}
