//! Analysis orchestration.
//!
//! Ties together manifest loading, analyzers and suppression to provide the
//! main analysis API.

use crate::analyzer::context::{ContextImpl, Snapshot};
use crate::analyzer::parser::{self, yaml};
use crate::analyzer::pragma::is_suppressed_by_annotation;
use crate::analyzer::types::{Diagnostic, Severity};
use crate::analyzer::{Analyzer, all_analyzers};
use crate::config::AnalyzeConfig;

use std::path::Path;

/// Result of analyzing a set of manifests.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Diagnostics that survived suppression and severity filtering.
    pub diagnostics: Vec<Diagnostic>,
    /// Files or documents that could not be loaded.
    pub parse_errors: Vec<String>,
    /// Summary of the run.
    pub summary: AnalysisSummary,
}

/// Summary of an analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisSummary {
    /// Number of resources loaded.
    pub resources_analyzed: usize,
    /// Number of analyzers run.
    pub analyzers_run: usize,
    /// Number of diagnostics dropped by suppression.
    pub suppressed: usize,
    /// Whether the run passed (no diagnostics at or above the failure threshold).
    pub passed: bool,
}

impl AnalysisResult {
    /// Create a new empty result.
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
            parse_errors: Vec::new(),
            summary: AnalysisSummary {
                resources_analyzed: 0,
                analyzers_run: 0,
                suppressed: 0,
                passed: true,
            },
        }
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    /// Get the maximum severity in the results.
    pub fn max_severity(&self) -> Option<Severity> {
        self.diagnostics.iter().map(|d| d.severity).max()
    }

    /// Check if the results should cause a non-zero exit.
    pub fn should_fail(&self, config: &AnalyzeConfig) -> bool {
        if config.no_fail {
            return false;
        }

        self.max_severity()
            .is_some_and(|max| max >= config.failure_threshold)
    }

    /// Drop diagnostics below `floor`.
    pub fn filter_by_severity(&mut self, floor: Severity) {
        self.diagnostics.retain(|d| d.severity >= floor);
    }

    /// Sort diagnostics by file path and line number.
    pub fn sort(&mut self) {
        self.diagnostics.sort();
    }
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Analyze manifests from a file or directory.
pub fn analyze_path(path: &Path, config: &AnalyzeConfig) -> AnalysisResult {
    analyze_paths(&[path], config)
}

/// Analyze manifests from several files or directories as one snapshot.
///
/// Resources from all paths are cross-referenced together, so a gateway in one
/// file can be backed by a service in another.
pub fn analyze_paths<P: AsRef<Path>>(paths: &[P], config: &AnalyzeConfig) -> AnalysisResult {
    let mut snapshot = Snapshot::new();
    let mut parse_errors = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if config.should_ignore_path(path) {
            log::info!("ignoring {}", path.display());
            continue;
        }

        let loaded = parser::load_path(path, &config.default_namespace);
        for resource in loaded.snapshot.resources() {
            if config.should_ignore_path(&resource.metadata.file_path) {
                continue;
            }
            snapshot.add(resource.clone());
        }
        parse_errors.extend(loaded.errors.iter().map(|e| e.to_string()));
    }

    let mut result = analyze_snapshot(&snapshot, config);
    result.parse_errors = parse_errors;
    result
}

/// Analyze YAML content directly.
pub fn analyze_content(content: &str, config: &AnalyzeConfig) -> AnalysisResult {
    match yaml::parse_yaml(content, &config.default_namespace) {
        Ok(resources) => analyze_snapshot(&resources.into_iter().collect(), config),
        Err(err) => {
            let mut result = AnalysisResult::new();
            result.parse_errors.push(err.to_string());
            result
        }
    }
}

/// Run all enabled analyzers over a snapshot.
pub fn analyze_snapshot(snapshot: &Snapshot, config: &AnalyzeConfig) -> AnalysisResult {
    let analyzers: Vec<Box<dyn Analyzer>> = all_analyzers()
        .into_iter()
        .filter(|a| config.is_analyzer_enabled(a.metadata().name))
        .collect();

    run_analyzers(snapshot, &analyzers, config)
}

/// Run the given analyzers over a snapshot.
pub fn run_analyzers(
    snapshot: &Snapshot,
    analyzers: &[Box<dyn Analyzer>],
    config: &AnalyzeConfig,
) -> AnalysisResult {
    let mut result = AnalysisResult::new();
    result.summary.resources_analyzed = snapshot.len();
    result.summary.analyzers_run = analyzers.len();

    for analyzer in analyzers {
        let metadata = analyzer.metadata();
        log::info!(
            "running {} over {} resource(s)",
            metadata.name,
            snapshot.len()
        );

        let ctx = ContextImpl::new(snapshot, &metadata.inputs);
        analyzer.analyze(&ctx);
        let diagnostics = ctx.into_diagnostics();
        log::debug!(
            "{} reported {} diagnostic(s)",
            metadata.name,
            diagnostics.len()
        );

        for diagnostic in diagnostics {
            if config.is_suppressed(&diagnostic)
                || is_suppressed_by_annotation(snapshot, &diagnostic)
            {
                log::debug!("suppressed {} on {}", diagnostic.code(), diagnostic.origin);
                result.summary.suppressed += 1;
                continue;
            }
            result.diagnostics.push(diagnostic);
        }
    }

    result.filter_by_severity(config.min_severity);
    result.sort();
    result.summary.passed = !result.should_fail(config);

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::types::MessageType;
    use crate::config::SuppressionRule;

    const UNEXPOSED_PORT: &str = r#"
apiVersion: networking.istio.io/v1alpha3
kind: Gateway
metadata:
  name: gw
  namespace: ns
spec:
  selector:
    app: gw
  servers:
  - port:
      number: 443
      name: https
      protocol: HTTPS
    hosts:
    - "*"
---
apiVersion: v1
kind: Pod
metadata:
  name: gw-pod
  namespace: ns
  labels:
    app: gw
---
apiVersion: v1
kind: Service
metadata:
  name: gw-svc
  namespace: ns
spec:
  selector:
    app: gw
  ports:
  - port: 80
    protocol: TCP
"#;

    #[test]
    fn test_analysis_result_new() {
        let result = AnalysisResult::new();
        assert!(result.diagnostics.is_empty());
        assert!(result.parse_errors.is_empty());
        assert!(result.summary.passed);
    }

    #[test]
    fn test_analyze_content_empty() {
        let result = analyze_content("", &AnalyzeConfig::default());
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.summary.resources_analyzed, 0);
    }

    #[test]
    fn test_analyze_content_finds_port_mismatch() {
        let result = analyze_content(UNEXPOSED_PORT, &AnalyzeConfig::default());

        assert_eq!(result.summary.resources_analyzed, 3);
        assert_eq!(result.summary.analyzers_run, 1);
        assert_eq!(result.diagnostics.len(), 1);
        let d = &result.diagnostics[0];
        assert_eq!(d.message_type, MessageType::GatewayPortNotOnWorkload);
        assert_eq!(d.origin.identifier(), "Gateway ns/gw");
        assert_eq!(d.origin.line, Some(2));
        // Warning does not reach the default Error threshold
        assert!(result.summary.passed);
    }

    #[test]
    fn test_should_fail() {
        let result = analyze_content(UNEXPOSED_PORT, &AnalyzeConfig::default());

        let config = AnalyzeConfig::default().with_threshold(Severity::Warning);
        assert!(result.should_fail(&config));

        let config = AnalyzeConfig::default().with_threshold(Severity::Error);
        assert!(!result.should_fail(&config));

        let mut no_fail = AnalyzeConfig::default().with_threshold(Severity::Info);
        no_fail.no_fail = true;
        assert!(!result.should_fail(&no_fail));
    }

    #[test]
    fn test_min_severity_filters() {
        let config = AnalyzeConfig::default().with_min_severity(Severity::Error);
        let result = analyze_content(UNEXPOSED_PORT, &config);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_excluded_analyzer_not_run() {
        let config = AnalyzeConfig::default()
            .exclude("gateway.IngressGatewayPortAnalyzer");
        let result = analyze_content(UNEXPOSED_PORT, &config);
        assert_eq!(result.summary.analyzers_run, 0);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_config_suppression() {
        let config = AnalyzeConfig::default()
            .suppress(SuppressionRule::new("IST0104", "Gateway gw.ns"));
        let result = analyze_content(UNEXPOSED_PORT, &config);
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.summary.suppressed, 1);
    }

    #[test]
    fn test_annotation_suppression() {
        let yaml = r#"
apiVersion: networking.istio.io/v1alpha3
kind: Gateway
metadata:
  name: gw
  annotations:
    galley.istio.io/analyze-suppress: IST0101
spec:
  selector:
    app: nothing
"#;
        let result = analyze_content(yaml, &AnalyzeConfig::default());
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.summary.suppressed, 1);
    }

    #[test]
    fn test_missing_selector_fails_run() {
        let yaml = r#"
apiVersion: networking.istio.io/v1beta1
kind: Gateway
metadata:
  name: gw
spec:
  selector:
    app: unknown
  servers:
  - port:
      number: 8080
"#;
        let result = analyze_content(yaml, &AnalyzeConfig::default());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(
            result.diagnostics[0].message_type,
            MessageType::ReferencedResourceNotFound
        );
        assert!(result.has_errors());
        assert!(!result.summary.passed);
    }

    #[test]
    fn test_parse_error_reported() {
        let result = analyze_content("kind: [", &AnalyzeConfig::default());
        assert_eq!(result.parse_errors.len(), 1);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_commented_separator_and_listener_order() {
        let yaml = r#"
apiVersion: networking.istio.io/v1alpha3
kind: Gateway
metadata:
  name: gw
spec:
  selector:
    app: gw
  servers:
  - port:
      number: 9
  - port:
      number: 10
  - port:
      number: 80
--- # pods
apiVersion: v1
kind: Pod
metadata:
  name: gw-a
  labels:
    app: gw
---
apiVersion: v1
kind: Pod
metadata:
  name: gw-b
  labels:
    app: gw
--- # services
apiVersion: v1
kind: Service
metadata:
  name: gw
spec:
  selector:
    app: gw
  ports:
  - port: 80
"#;
        let result = analyze_content(yaml, &AnalyzeConfig::default());
        assert!(result.parse_errors.is_empty(), "{:?}", result.parse_errors);
        assert_eq!(result.summary.resources_analyzed, 4);

        let ports: Vec<&str> = result
            .diagnostics
            .iter()
            .filter_map(|d| d.detail("port"))
            .collect();
        assert_eq!(ports, vec!["9", "10"]);
    }

    #[test]
    fn test_idempotent() {
        let config = AnalyzeConfig::default();
        let first = analyze_content(UNEXPOSED_PORT, &config);
        let second = analyze_content(UNEXPOSED_PORT, &config);
        assert_eq!(first.diagnostics, second.diagnostics);
    }
}
