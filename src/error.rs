use std::path::PathBuf;
use thiserror::Error;

use crate::analyzer::parser::ParseError;

#[derive(Error, Debug)]
pub enum GatewayLintError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Manifest error: {0}")]
    Parse(#[from] ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown analyzer: {0}")]
    UnknownAnalyzer(String),

    #[error("Invalid suppression '{0}', expected CODE or CODE=Kind name.namespace")]
    InvalidSuppression(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {message}")]
    Unreadable { path: PathBuf, message: String },

    #[error("Config parsing failed: {0}")]
    ParsingFailed(String),
}

pub type Result<T> = std::result::Result<T, GatewayLintError>;
