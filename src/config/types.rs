//! Configuration for gateway analysis.
//!
//! - Analyzer inclusion/exclusion
//! - Path ignoring
//! - Message suppression
//! - Severity floor and failure threshold

use crate::analyzer::types::{Diagnostic, Severity};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeConfig {
    /// Analyzers to run. Empty means all built-in analyzers.
    pub include: Vec<String>,

    /// Analyzers to skip.
    pub exclude: Vec<String>,

    /// Glob patterns for paths to ignore.
    pub ignore_paths: Vec<String>,

    /// Namespace assigned to resources that do not declare one.
    pub default_namespace: String,

    /// Diagnostics below this severity are not reported.
    pub min_severity: Severity,

    /// Lowest severity that makes the run fail.
    pub failure_threshold: Severity,

    /// If true, never return a non-zero exit code.
    pub no_fail: bool,

    /// Suppressed messages.
    pub suppress: Vec<SuppressionRule>,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            ignore_paths: Vec::new(),
            default_namespace: "default".to_string(),
            min_severity: Severity::Info,
            failure_threshold: Severity::Error,
            no_fail: false,
            suppress: Vec::new(),
        }
    }
}

impl AnalyzeConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an analyzer to the include list.
    pub fn include(mut self, analyzer: impl Into<String>) -> Self {
        self.include.push(analyzer.into());
        self
    }

    /// Add an analyzer to the exclude list.
    pub fn exclude(mut self, analyzer: impl Into<String>) -> Self {
        self.exclude.push(analyzer.into());
        self
    }

    /// Add a path pattern to ignore.
    pub fn ignore_path(mut self, pattern: impl Into<String>) -> Self {
        self.ignore_paths.push(pattern.into());
        self
    }

    /// Add a suppression rule.
    pub fn suppress(mut self, rule: SuppressionRule) -> Self {
        self.suppress.push(rule);
        self
    }

    /// Set the failure threshold.
    pub fn with_threshold(mut self, threshold: Severity) -> Self {
        self.failure_threshold = threshold;
        self
    }

    /// Set the reporting floor.
    pub fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }

    /// Set the namespace for resources without one.
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    /// Whether the named analyzer should run.
    pub fn is_analyzer_enabled(&self, name: &str) -> bool {
        if self.exclude.iter().any(|e| e == name) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|i| i == name)
    }

    /// Check if a file path should be ignored based on ignore_paths patterns.
    pub fn should_ignore_path(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        self.ignore_paths.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|glob| glob.matches(&path_str))
                .unwrap_or(false)
                || path_str.contains(pattern.as_str())
        })
    }

    /// Whether a config-level rule suppresses this diagnostic.
    pub fn is_suppressed(&self, diagnostic: &Diagnostic) -> bool {
        self.suppress.iter().any(|rule| rule.matches(diagnostic))
    }
}

/// Suppresses a message code for resources matching a glob.
///
/// `resource` is matched against `Kind name.namespace`, e.g.
/// `Gateway httpbin-gateway.default` or `Gateway *.staging`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressionRule {
    /// Message code (e.g., "IST0104") or `*` for every code.
    pub code: String,
    /// Resource glob; `*` when omitted.
    #[serde(default = "match_all")]
    pub resource: String,
}

fn match_all() -> String {
    "*".to_string()
}

impl SuppressionRule {
    pub fn new(code: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            resource: resource.into(),
        }
    }

    /// Parse the command-line form `CODE=Kind name.namespace` (or just `CODE`).
    pub fn parse(s: &str) -> Option<Self> {
        let (code, resource) = match s.split_once('=') {
            Some((code, resource)) => (code.trim(), resource.trim()),
            None => (s.trim(), "*"),
        };
        if code.is_empty() || resource.is_empty() {
            return None;
        }
        Some(Self::new(code, resource))
    }

    pub fn matches(&self, diagnostic: &Diagnostic) -> bool {
        if self.code != "*" && self.code != diagnostic.code() {
            return false;
        }
        glob::Pattern::new(&self.resource)
            .map(|p| p.matches(&diagnostic.origin.suppression_key()))
            .unwrap_or(false)
    }
}
