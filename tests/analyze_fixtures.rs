use gateway_lint::analyzer::lint::analyze_paths;
use gateway_lint::analyzer::{MessageType, Severity, analyze_path};
use gateway_lint::config::{AnalyzeConfig, SuppressionRule};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

#[test]
fn test_port_not_exposed_by_service() {
    let result = analyze_path(&fixture("port_not_exposed.yaml"), &AnalyzeConfig::default());

    assert!(result.parse_errors.is_empty());
    assert_eq!(result.summary.resources_analyzed, 3);
    assert_eq!(result.diagnostics.len(), 1);

    let d = &result.diagnostics[0];
    assert_eq!(d.message_type, MessageType::GatewayPortNotOnWorkload);
    assert_eq!(d.severity, Severity::Warning);
    assert_eq!(d.origin.identifier(), "Gateway edge/httpbin-gateway");
    assert_eq!(d.origin.line, Some(1));
    assert_eq!(d.detail("selector"), Some("app=edge-gw"));
    assert_eq!(d.detail("port"), Some("443"));
}

#[test]
fn test_selector_matching_nothing() {
    let result = analyze_path(&fixture("no_workload.yaml"), &AnalyzeConfig::default());

    assert_eq!(result.diagnostics.len(), 1);
    let d = &result.diagnostics[0];
    assert_eq!(d.message_type, MessageType::ReferencedResourceNotFound);
    assert_eq!(d.severity, Severity::Error);
    assert_eq!(d.origin.identifier(), "Gateway default/orphan-gateway");
    assert_eq!(d.detail("refValue"), Some("app=nowhere"));
    assert!(!result.summary.passed);
}

#[test]
fn test_system_ingress_falls_back_to_default_ports() {
    let result = analyze_path(&fixture("default_ingress.yaml"), &AnalyzeConfig::default());

    // 80 is a stock ingress port, 8080 is not
    assert_eq!(result.diagnostics.len(), 1);
    let d = &result.diagnostics[0];
    assert_eq!(d.message_type, MessageType::GatewayPortNotOnWorkload);
    assert_eq!(d.detail("port"), Some("8080"));
    assert_eq!(d.detail("selector"), Some("istio=ingressgateway"));
}

#[test]
fn test_ports_unioned_across_services() {
    let result = analyze_path(&fixture("clean.yaml"), &AnalyzeConfig::default());

    assert_eq!(result.summary.resources_analyzed, 4);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    assert!(result.summary.passed);
}

#[test]
fn test_resources_cross_referenced_across_files() {
    let result = analyze_path(&fixture("mesh"), &AnalyzeConfig::default());

    assert!(result.parse_errors.is_empty());
    assert_eq!(result.summary.resources_analyzed, 3);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].detail("port"), Some("9000"));
    let origin = &result.diagnostics[0].origin;
    assert!(origin.file_path.ends_with("gateway.yaml"));
}

#[test]
fn test_multiple_paths_form_one_snapshot() {
    let paths = [fixture("mesh/gateway.yaml"), fixture("mesh/workload.yaml")];
    let together = analyze_paths(&paths, &AnalyzeConfig::default());
    assert_eq!(together.diagnostics.len(), 1);

    // Without the workload file the selector matches nothing
    let alone = analyze_path(&paths[0], &AnalyzeConfig::default());
    assert_eq!(alone.diagnostics.len(), 1);
    assert_eq!(
        alone.diagnostics[0].message_type,
        MessageType::ReferencedResourceNotFound
    );
}

#[test]
fn test_whole_fixture_directory() {
    let result = analyze_path(&fixtures_dir(), &AnalyzeConfig::default());

    let mut codes: Vec<&str> = result.diagnostics.iter().map(|d| d.code()).collect();
    codes.sort();
    assert_eq!(codes, vec!["IST0101", "IST0104", "IST0104", "IST0104"]);
    assert!(result.has_errors());
}

#[test]
fn test_ignore_paths() {
    let config = AnalyzeConfig::default().ignore_path("no_workload.yaml");
    let result = analyze_path(&fixtures_dir(), &config);

    assert!(!result.has_errors());
    assert_eq!(result.diagnostics.len(), 3);
}

#[test]
fn test_config_suppression_by_namespace_glob() {
    let config = AnalyzeConfig::default()
        .suppress(SuppressionRule::new("IST0104", "Gateway *.edge"));
    let result = analyze_path(&fixture("port_not_exposed.yaml"), &config);

    assert!(result.diagnostics.is_empty());
    assert_eq!(result.summary.suppressed, 1);
}

#[test]
fn test_broken_file_does_not_stop_analysis() {
    let temp_dir = TempDir::new().unwrap();
    let gw = temp_dir.path().join("gw.yaml");
    fs::copy(fixture("no_workload.yaml"), gw).unwrap();
    fs::write(temp_dir.path().join("broken.yaml"), "kind: [\n").unwrap();

    let result = analyze_path(temp_dir.path(), &AnalyzeConfig::default());

    assert_eq!(result.parse_errors.len(), 1);
    assert!(result.parse_errors[0].contains("broken.yaml"));
    assert_eq!(result.diagnostics.len(), 1);
}

#[test]
fn test_default_namespace_override() {
    let config = AnalyzeConfig::default().with_default_namespace("team-a");
    let result = analyze_path(&fixture("no_workload.yaml"), &config);

    assert_eq!(
        result.diagnostics[0].origin.identifier(),
        "Gateway team-a/orphan-gateway"
    );
}
