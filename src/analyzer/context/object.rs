//! Typed resource wrappers for analysis.

use crate::analyzer::selector::{Labels, Selector};
use crate::analyzer::types::Origin;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Resource kinds an analyzer can declare as inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    Gateway,
    Pod,
    Service,
}

impl ResourceKind {
    /// Kubernetes kind name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gateway => "Gateway",
            Self::Pod => "Pod",
            Self::Service => "Service",
        }
    }

    /// Collection name used when declaring analyzer inputs.
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Gateway => "istio/networking/v1alpha3/gateways",
            Self::Pod => "k8s/core/v1/pods",
            Self::Service => "k8s/core/v1/services",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Namespace-qualified resource name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FullName {
    pub namespace: String,
    pub name: String,
}

impl FullName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Metadata about a loaded resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceMetadata {
    pub full_name: FullName,
    pub labels: Labels,
    pub annotations: BTreeMap<String, String>,
    /// The file path where this resource was defined.
    pub file_path: PathBuf,
    /// Line number of the document in the source file (1-indexed).
    pub line_number: Option<u32>,
}

impl Default for FullName {
    fn default() -> Self {
        Self::new("default", "")
    }
}

/// A single port a gateway server listens on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayPort {
    pub number: u32,
    pub name: Option<String>,
    pub protocol: Option<String>,
}

/// One listener entry of a gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayServer {
    /// Listener port, if the server declares one.
    pub port: Option<GatewayPort>,
    pub hosts: Vec<String>,
}

/// Gateway spec: which workload it runs on and what it listens on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewaySpec {
    pub selector: Selector,
    pub servers: Vec<GatewayServer>,
}

/// Pod (workload) spec.
///
/// Pods are matched on their labels, which live on the resource metadata, so
/// nothing from the pod spec itself is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodSpec {}

/// A port exposed by a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePort {
    pub name: Option<String>,
    pub port: u32,
    pub protocol: String,
}

impl ServicePort {
    pub fn tcp(port: u32) -> Self {
        Self {
            name: None,
            port,
            protocol: "TCP".to_string(),
        }
    }

    pub fn is_tcp(&self) -> bool {
        self.protocol == "TCP"
    }
}

/// Service spec.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSpec {
    pub selector: Selector,
    pub ports: Vec<ServicePort>,
}

/// Typed resource payload, resolved once at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourcePayload {
    Gateway(Box<GatewaySpec>),
    Pod(Box<PodSpec>),
    Service(Box<ServiceSpec>),
}

impl ResourcePayload {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Gateway(_) => ResourceKind::Gateway,
            Self::Pod(_) => ResourceKind::Pod,
            Self::Service(_) => ResourceKind::Service,
        }
    }
}

/// A loaded resource ready for analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub metadata: ResourceMetadata,
    pub payload: ResourcePayload,
}

impl Resource {
    pub fn new(metadata: ResourceMetadata, payload: ResourcePayload) -> Self {
        Self { metadata, payload }
    }

    pub fn kind(&self) -> ResourceKind {
        self.payload.kind()
    }

    pub fn name(&self) -> &str {
        &self.metadata.full_name.name
    }

    pub fn namespace(&self) -> &str {
        &self.metadata.full_name.namespace
    }

    pub fn labels(&self) -> &Labels {
        &self.metadata.labels
    }

    pub fn annotations(&self) -> &BTreeMap<String, String> {
        &self.metadata.annotations
    }

    pub fn as_gateway(&self) -> Option<&GatewaySpec> {
        match &self.payload {
            ResourcePayload::Gateway(g) => Some(g),
            _ => None,
        }
    }


    pub fn as_service(&self) -> Option<&ServiceSpec> {
        match &self.payload {
            ResourcePayload::Service(s) => Some(s),
            _ => None,
        }
    }

    /// Origin to attach diagnostics about this resource to.
    pub fn origin(&self) -> Origin {
        Origin {
            kind: self.kind().as_str().to_string(),
            namespace: self.namespace().to_string(),
            name: self.name().to_string(),
            file_path: self.metadata.file_path.clone(),
            line: self.metadata.line_number,
        }
    }
}
