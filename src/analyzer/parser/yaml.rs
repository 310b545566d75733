//! YAML parsing for Istio and Kubernetes manifests.

use crate::analyzer::context::object::*;
use crate::analyzer::parser::ParseError;
use crate::analyzer::selector::{Labels, Selector};
use std::collections::BTreeMap;
use std::path::Path;

const ISTIO_NETWORKING_GROUP: &str = "networking.istio.io";

/// True for `.yaml` / `.yml` files.
pub fn is_yaml_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Parse a YAML string containing one or more manifests.
pub fn parse_yaml(content: &str, default_namespace: &str) -> Result<Vec<Resource>, ParseError> {
    parse_yaml_with_path(content, Path::new("<stdin>"), default_namespace)
}

/// Parse a YAML file.
pub fn parse_yaml_file(path: &Path, default_namespace: &str) -> Result<Vec<Resource>, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|e| ParseError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    parse_yaml_with_path(&content, path, default_namespace)
}

/// Parse YAML content with a source file path.
///
/// Documents are separated by `---` lines. Kinds other than Gateway, Pod and
/// Service are skipped; `List` objects are flattened.
pub fn parse_yaml_with_path(
    content: &str,
    path: &Path,
    default_namespace: &str,
) -> Result<Vec<Resource>, ParseError> {
    let mut resources = Vec::new();

    for (doc, line) in split_documents(content) {
        let value = serde_yaml::from_str::<serde_yaml::Value>(&doc)
            .map_err(|e| syntax_error(path, line, e))?;

        collect_resources(&value, path, line, default_namespace, &mut resources);
    }

    Ok(resources)
}

/// Syntax error with the line made absolute within the file.
fn syntax_error(path: &Path, start: u32, err: serde_yaml::Error) -> ParseError {
    let line = err.location().map_or(start, |l| start + l.line() as u32 - 1);
    ParseError::Syntax {
        path: path.to_path_buf(),
        line,
        message: err.to_string(),
    }
}

/// Split content on `---` separator lines.
///
/// Returns each non-empty document with the 1-indexed line of its first
/// meaningful line.
fn split_documents(content: &str) -> Vec<(String, u32)> {
    let mut docs = Vec::new();
    let mut current = String::new();
    let mut start: Option<u32> = None;

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx as u32 + 1;
        if is_document_separator(line) {
            if let Some(s) = start.take() {
                docs.push((std::mem::take(&mut current), s));
            }
            continue;
        }

        let trimmed = line.trim();
        if start.is_none() {
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            start = Some(line_no);
        }
        current.push_str(line);
        current.push('\n');
    }

    if let Some(s) = start {
        docs.push((current, s));
    }

    docs
}

/// `---` alone, or followed by whitespace and an optional `# comment`.
fn is_document_separator(line: &str) -> bool {
    let Some(rest) = line.strip_prefix("---") else {
        return false;
    };
    let rest = rest.trim_start();
    rest.is_empty() || rest.starts_with('#')
}

fn collect_resources(
    value: &serde_yaml::Value,
    path: &Path,
    line: u32,
    default_namespace: &str,
    out: &mut Vec<Resource>,
) {
    let Some(kind) = value.get("kind").and_then(|k| k.as_str()) else {
        return;
    };
    let api_version = value
        .get("apiVersion")
        .and_then(|v| v.as_str())
        .unwrap_or_default();

    if kind.ends_with("List") && value.get("items").is_some() {
        if let Some(items) = value.get("items").and_then(|i| i.as_sequence()) {
            for item in items {
                collect_resources(item, path, line, default_namespace, out);
            }
        }
        return;
    }

    let payload = match kind {
        "Gateway" if api_group(api_version) == ISTIO_NETWORKING_GROUP => {
            ResourcePayload::Gateway(Box::new(parse_gateway(value)))
        }
        "Pod" if api_group(api_version).is_empty() => ResourcePayload::Pod(Box::default()),
        "Service" if api_group(api_version).is_empty() => {
            ResourcePayload::Service(Box::new(parse_service(value)))
        }
        _ => {
            log::trace!("ignoring {} {} in {}", api_version, kind, path.display());
            return;
        }
    };

    let metadata = parse_metadata(value, default_namespace, path, line);
    out.push(Resource::new(metadata, payload));
}

/// API group of an `apiVersion` (empty for the core group).
fn api_group(api_version: &str) -> &str {
    api_version
        .rsplit_once('/')
        .map(|(group, _)| group)
        .unwrap_or("")
}

// ============================================================================
// Parse helper functions
// ============================================================================

fn get_string(value: &serde_yaml::Value, key: &str) -> Option<String> {
    value.get(key)?.as_str().map(|s| s.to_string())
}

fn get_u32(value: &serde_yaml::Value, key: &str) -> Option<u32> {
    value.get(key)?.as_u64().and_then(|n| u32::try_from(n).ok())
}

fn get_string_map(value: &serde_yaml::Value, key: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    if let Some(mapping) = value.get(key).and_then(|m| m.as_mapping()) {
        for (k, v) in mapping {
            let Some(key) = k.as_str() else { continue };
            let val = match v {
                serde_yaml::Value::String(s) => s.clone(),
                serde_yaml::Value::Bool(b) => b.to_string(),
                serde_yaml::Value::Number(n) => n.to_string(),
                _ => continue,
            };
            map.insert(key.to_string(), val);
        }
    }
    map
}

fn get_selector(spec: Option<&serde_yaml::Value>) -> Selector {
    spec.map(|s| get_string_map(s, "selector"))
        .unwrap_or_default()
        .into()
}

fn parse_metadata(
    value: &serde_yaml::Value,
    default_namespace: &str,
    path: &Path,
    line: u32,
) -> ResourceMetadata {
    let metadata = value.get("metadata");
    let name = metadata
        .and_then(|m| get_string(m, "name"))
        .unwrap_or_default();
    let namespace = metadata
        .and_then(|m| get_string(m, "namespace"))
        .filter(|ns| !ns.is_empty())
        .unwrap_or_else(|| default_namespace.to_string());
    let labels: Labels = metadata
        .map(|m| get_string_map(m, "labels"))
        .unwrap_or_default();
    let annotations = metadata
        .map(|m| get_string_map(m, "annotations"))
        .unwrap_or_default();

    ResourceMetadata {
        full_name: FullName::new(namespace, name),
        labels,
        annotations,
        file_path: path.to_path_buf(),
        line_number: Some(line),
    }
}

fn parse_gateway(value: &serde_yaml::Value) -> GatewaySpec {
    let spec = value.get("spec");

    GatewaySpec {
        selector: get_selector(spec),
        servers: spec
            .and_then(|s| s.get("servers"))
            .and_then(|s| s.as_sequence())
            .map(|arr| arr.iter().map(parse_gateway_server).collect())
            .unwrap_or_default(),
    }
}

fn parse_gateway_server(server: &serde_yaml::Value) -> GatewayServer {
    GatewayServer {
        port: server.get("port").and_then(|p| {
            Some(GatewayPort {
                number: get_u32(p, "number")?,
                name: get_string(p, "name"),
                protocol: get_string(p, "protocol"),
            })
        }),
        hosts: server
            .get("hosts")
            .and_then(|h| h.as_sequence())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(|s| s.to_string()))
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn parse_service(value: &serde_yaml::Value) -> ServiceSpec {
    let spec = value.get("spec");

    ServiceSpec {
        selector: get_selector(spec),
        ports: spec
            .and_then(|s| s.get("ports"))
            .and_then(|p| p.as_sequence())
            .map(|arr| {
                arr.iter()
                    .filter_map(|p| {
                        Some(ServicePort {
                            name: get_string(p, "name"),
                            port: get_u32(p, "port")?,
                            // Kubernetes defaults an unset protocol to TCP
                            protocol: get_string(p, "protocol")
                                .unwrap_or_else(|| "TCP".to_string()),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default(),
    }
}
