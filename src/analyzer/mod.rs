//! # Analyzer Module
//!
//! Cross-resource analysis of Istio networking configuration.
//!
//! Resources are loaded once into a typed [`Snapshot`](context::Snapshot).
//! Each [`Analyzer`] declares the resource kinds it needs and is run against
//! a context exposing only those kinds; findings come back as
//! [`Diagnostic`](types::Diagnostic)s.
//!
//! # Example
//!
//! ```rust,no_run
//! use gateway_lint::analyzer::analyze_path;
//! use gateway_lint::config::AnalyzeConfig;
//! use std::path::Path;
//!
//! let result = analyze_path(Path::new("./manifests"), &AnalyzeConfig::default());
//! for diagnostic in &result.diagnostics {
//!     println!("{}", diagnostic);
//! }
//! ```

pub mod context;
pub mod formatter;
pub mod gateway;
pub mod lint;
pub mod parser;
pub mod pragma;
pub mod selector;
pub mod types;

use context::{AnalysisContext, ResourceKind};

pub use formatter::{OutputFormat, format_result, format_result_to_string};
pub use gateway::IngressGatewayPortAnalyzer;
pub use lint::{AnalysisResult, AnalysisSummary, analyze_content, analyze_path, analyze_snapshot};
pub use types::{Diagnostic, MessageType, Origin, Severity};

/// Static description of an analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Unique analyzer name (e.g., "gateway.IngressGatewayPortAnalyzer").
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Resource kinds this analyzer reads.
    pub inputs: Vec<ResourceKind>,
}

/// A cross-resource analyzer.
pub trait Analyzer: Send + Sync {
    /// Name, description and declared inputs.
    fn metadata(&self) -> Metadata;

    /// Run over everything the context exposes, reporting findings to it.
    fn analyze(&self, ctx: &dyn AnalysisContext);
}

/// All built-in analyzers.
pub fn all_analyzers() -> Vec<Box<dyn Analyzer>> {
    vec![Box::new(IngressGatewayPortAnalyzer::new())]
}

/// Find a built-in analyzer by name.
pub fn find_analyzer(name: &str) -> Option<Box<dyn Analyzer>> {
    all_analyzers()
        .into_iter()
        .find(|a| a.metadata().name == name)
}
