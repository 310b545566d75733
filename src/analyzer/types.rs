//! Core types for gateway analysis diagnostics.
//!
//! - `Severity` - Diagnostic severity levels
//! - `MessageType` - Typed diagnostic kinds with stable `ISTxxxx` codes
//! - `Origin` - The resource a diagnostic is attached to
//! - `Diagnostic` - A single finding produced by an analyzer

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

/// Severity levels for diagnostics.
///
/// Ordered from most severe to least severe:
/// `Error > Warning > Info`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Misconfiguration that will break traffic
    Error,
    /// Likely misconfiguration
    #[default]
    Warning,
    /// Informational finding
    Info,
}

impl Severity {
    /// Parse a severity from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None,
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Capitalized label used in plain output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Warning => 1,
            Self::Info => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so Error > Warning > Info
        other.rank().cmp(&self.rank())
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Typed diagnostic kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    /// A resource references something that does not exist.
    ReferencedResourceNotFound,
    /// A gateway listener port is not exposed by any backing service.
    GatewayPortNotOnWorkload,
}

impl MessageType {
    /// All known message types.
    pub const ALL: &'static [MessageType] = &[
        MessageType::ReferencedResourceNotFound,
        MessageType::GatewayPortNotOnWorkload,
    ];

    /// Stable message code (e.g., "IST0101").
    pub fn code(&self) -> &'static str {
        match self {
            Self::ReferencedResourceNotFound => "IST0101",
            Self::GatewayPortNotOnWorkload => "IST0104",
        }
    }

    /// Message type name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReferencedResourceNotFound => "ReferencedResourceNotFound",
            Self::GatewayPortNotOnWorkload => "GatewayPortNotOnWorkload",
        }
    }

    /// Default severity for this message type.
    pub fn severity(&self) -> Severity {
        match self {
            Self::ReferencedResourceNotFound => Severity::Error,
            Self::GatewayPortNotOnWorkload => Severity::Warning,
        }
    }

    /// Look up a message type by its code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.code() == code)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The resource a diagnostic is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    /// Resource kind (e.g., "Gateway").
    pub kind: String,
    /// Namespace of the resource.
    pub namespace: String,
    /// Name of the resource.
    pub name: String,
    /// File the resource was loaded from.
    pub file_path: PathBuf,
    /// Line the resource document starts on (1-indexed).
    pub line: Option<u32>,
}

impl Origin {
    /// `Kind namespace/name` form.
    pub fn identifier(&self) -> String {
        format!("{} {}/{}", self.kind, self.namespace, self.name)
    }

    /// `Kind name.namespace` form, used for resource-scoped suppression.
    pub fn suppression_key(&self) -> String {
        format!("{} {}.{}", self.kind, self.name, self.namespace)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

/// A diagnostic reported by an analyzer.
///
/// Carries the message type, the originating resource, and free-form detail
/// parameters in the order they were supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Message type.
    pub message_type: MessageType,
    /// Severity (the message type's default unless overridden).
    pub severity: Severity,
    /// Resource the diagnostic is attached to.
    pub origin: Origin,
    /// Field of the resource the diagnostic points at, if any.
    pub field: Option<String>,
    /// Detail parameters as `(key, value)` pairs.
    pub details: Vec<(String, String)>,
    /// Rendered human-readable text.
    pub message: String,
}

impl Diagnostic {
    /// `ReferencedResourceNotFound` for a missing `ref_type` named `ref_value`.
    pub fn referenced_resource_not_found(
        origin: Origin,
        ref_type: impl Into<String>,
        ref_value: impl Into<String>,
    ) -> Self {
        let ref_type = ref_type.into();
        let ref_value = ref_value.into();
        let message = format!("Referenced {} not found: \"{}\"", ref_type, ref_value);
        Self {
            message_type: MessageType::ReferencedResourceNotFound,
            severity: MessageType::ReferencedResourceNotFound.severity(),
            origin,
            field: Some(ref_type.clone()),
            details: vec![
                ("refType".to_string(), ref_type),
                ("refValue".to_string(), ref_value),
            ],
            message,
        }
    }

    /// `GatewayPortNotOnWorkload` for `port` under the rendered `selector`.
    pub fn gateway_port_not_on_workload(
        origin: Origin,
        selector: impl Into<String>,
        port: u32,
    ) -> Self {
        let selector = selector.into();
        let message = format!(
            "The gateway refers to a port that is not exposed on the workload (pod selector {}; port {})",
            selector, port
        );
        Self {
            message_type: MessageType::GatewayPortNotOnWorkload,
            severity: MessageType::GatewayPortNotOnWorkload.severity(),
            origin,
            field: Some("servers.port".to_string()),
            details: vec![
                ("selector".to_string(), selector),
                ("port".to_string(), port.to_string()),
            ],
            message,
        }
    }

    /// Message code shortcut.
    pub fn code(&self) -> &'static str {
        self.message_type.code()
    }

    /// Look up a detail parameter by key.
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a comma-separated suppression list (codes or `*`) covers this diagnostic.
    pub fn suppressed_by(&self, codes: &str) -> bool {
        codes
            .split(',')
            .map(str::trim)
            .any(|code| code == "*" || code == self.code())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] ({}) {}",
            self.severity.label(),
            self.code(),
            self.origin,
            self.message
        )
    }
}

impl Ord for Diagnostic {
    fn cmp(&self, other: &Self) -> Ordering {
        self.origin
            .file_path
            .cmp(&other.origin.file_path)
            .then_with(|| match (self.origin.line, other.origin.line) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| self.code().cmp(other.code()))
    }
}

impl PartialOrd for Diagnostic {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin(file: &str, line: Option<u32>) -> Origin {
        Origin {
            kind: "Gateway".to_string(),
            namespace: "default".to_string(),
            name: "gw".to_string(),
            file_path: PathBuf::from(file),
            line,
        }
    }

    #[test]
    fn test_suppressed_by() {
        let d = Diagnostic::gateway_port_not_on_workload(origin("gw.yaml", Some(1)), "app=gw", 443);
        assert!(d.suppressed_by("IST0104"));
        assert!(d.suppressed_by("IST0101, IST0104"));
        assert!(d.suppressed_by("*"));
        assert!(!d.suppressed_by("IST0101"));
        assert!(!d.suppressed_by(""));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!(Severity::parse("error"), Some(Severity::Error));
        assert_eq!(Severity::parse("WARNING"), Some(Severity::Warning));
        assert_eq!(Severity::parse("Info"), Some(Severity::Info));
        assert_eq!(Severity::parse("invalid"), None);
    }

    #[test]
    fn test_message_type_codes() {
        assert_eq!(MessageType::ReferencedResourceNotFound.code(), "IST0101");
        assert_eq!(MessageType::GatewayPortNotOnWorkload.code(), "IST0104");
        assert_eq!(
            MessageType::from_code("IST0104"),
            Some(MessageType::GatewayPortNotOnWorkload)
        );
        assert_eq!(MessageType::from_code("IST9999"), None);
    }

    #[test]
    fn test_diagnostic_text() {
        let d = Diagnostic::referenced_resource_not_found(
            origin("a.yaml", None),
            "selector",
            "app=gw",
        );
        assert_eq!(d.message, "Referenced selector not found: \"app=gw\"");
        assert_eq!(d.severity, Severity::Error);
        assert_eq!(d.detail("refValue"), Some("app=gw"));

        let d = Diagnostic::gateway_port_not_on_workload(origin("a.yaml", None), "app=gw", 443);
        assert_eq!(d.detail("port"), Some("443"));
        assert_eq!(
            d.to_string(),
            "Warning [IST0104] (Gateway default/gw) The gateway refers to a port that is not exposed on the workload (pod selector app=gw; port 443)"
        );
    }

    #[test]
    fn test_diagnostic_ordering() {
        let d1 = Diagnostic::gateway_port_not_on_workload(origin("a.yaml", Some(10)), "x=y", 80);
        let d2 = Diagnostic::referenced_resource_not_found(
            origin("a.yaml", Some(2)),
            "selector",
            "x=y",
        );
        let d3 = Diagnostic::gateway_port_not_on_workload(origin("b.yaml", None), "x=y", 80);

        let mut all = vec![d3.clone(), d1.clone(), d2.clone()];
        all.sort();
        assert_eq!(all, vec![d2, d1, d3]);
    }

    #[test]
    fn test_sort_keeps_listener_order() {
        let mut all = Vec::new();
        for port in [9, 10, 80] {
            let at = origin("a.yaml", Some(1));
            all.push(Diagnostic::gateway_port_not_on_workload(at, "app=gw", port));
        }
        all.sort();

        let sorted: Vec<&str> = all.iter().filter_map(|d| d.detail("port")).collect();
        assert_eq!(sorted, vec!["9", "10", "80"]);
    }
}
