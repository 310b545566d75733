//! Annotation-based message suppression.
//!
//! A resource can carry `galley.istio.io/analyze-suppress` with a
//! comma-separated list of message codes (or `*`) to silence them for that
//! resource only.

use crate::analyzer::context::Snapshot;
use crate::analyzer::types::Diagnostic;

/// Annotation holding suppressed message codes.
pub const SUPPRESS_ANNOTATION: &str = "galley.istio.io/analyze-suppress";

/// Whether the resource a diagnostic is attached to suppresses it.
pub fn is_suppressed_by_annotation(snapshot: &Snapshot, diagnostic: &Diagnostic) -> bool {
    let origin = &diagnostic.origin;
    snapshot
        .resources()
        .iter()
        .filter(|r| {
            r.kind().as_str() == origin.kind
                && r.name() == origin.name
                && r.namespace() == origin.namespace
                && r.metadata.file_path == origin.file_path
        })
        .filter_map(|r| r.annotations().get(SUPPRESS_ANNOTATION))
        .any(|codes| diagnostic.suppressed_by(codes))
}
