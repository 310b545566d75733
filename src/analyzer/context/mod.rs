//! Analysis context for loaded resources.
//!
//! The snapshot holds every resource loaded for a run. An analyzer sees it
//! through an [`AnalysisContext`], which only iterates the kinds the analyzer
//! declared as inputs and collects the diagnostics it reports.

pub mod object;

pub use object::{
    FullName, GatewayPort, GatewayServer, GatewaySpec, PodSpec, Resource, ResourceKind,
    ResourceMetadata, ResourcePayload, ServicePort, ServiceSpec,
};

use crate::analyzer::types::Diagnostic;
use parking_lot::Mutex;

/// What an analyzer sees during a run.
pub trait AnalysisContext: Send + Sync {
    /// Invoke `visitor` once per resource of `kind`, in load order.
    /// Iteration stops early when the visitor returns `false`.
    fn for_each(&self, kind: ResourceKind, visitor: &mut dyn FnMut(&Resource) -> bool);

    /// Attach a diagnostic to the current run.
    fn report(&self, kind: ResourceKind, diagnostic: Diagnostic);
}

/// Immutable set of resources for one analysis pass.
#[derive(Debug, Default, Clone)]
pub struct Snapshot {
    resources: Vec<Resource>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource to the snapshot.
    pub fn add(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    /// All resources in load order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Resources of one kind in load order.
    pub fn of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = &Resource> {
        self.resources.iter().filter(move |r| r.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl FromIterator<Resource> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        Self {
            resources: iter.into_iter().collect(),
        }
    }
}

impl Extend<Resource> for Snapshot {
    fn extend<I: IntoIterator<Item = Resource>>(&mut self, iter: I) {
        self.resources.extend(iter);
    }
}

/// Default implementation of AnalysisContext.
#[derive(Debug)]
pub struct ContextImpl<'a> {
    snapshot: &'a Snapshot,
    inputs: Vec<ResourceKind>,
    reported: Mutex<Vec<(ResourceKind, Diagnostic)>>,
}

impl<'a> ContextImpl<'a> {
    /// Create a context over `snapshot` that exposes only `inputs`.
    pub fn new(snapshot: &'a Snapshot, inputs: &[ResourceKind]) -> Self {
        Self {
            snapshot,
            inputs: inputs.to_vec(),
            reported: Mutex::new(Vec::new()),
        }
    }

    /// Consume the context, returning the reported diagnostics in report order.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.reported
            .into_inner()
            .into_iter()
            .map(|(_, d)| d)
            .collect()
    }

    /// Number of diagnostics reported so far.
    pub fn reported_count(&self) -> usize {
        self.reported.lock().len()
    }
}

impl AnalysisContext for ContextImpl<'_> {
    fn for_each(&self, kind: ResourceKind, visitor: &mut dyn FnMut(&Resource) -> bool) {
        if !self.inputs.contains(&kind) {
            log::debug!(
                "collection {} was not declared as an input; skipping iteration",
                kind.collection()
            );
            return;
        }

        for resource in self.snapshot.of_kind(kind) {
            if !visitor(resource) {
                break;
            }
        }
    }

    fn report(&self, kind: ResourceKind, diagnostic: Diagnostic) {
        log::trace!("reported {} on {}", diagnostic.code(), diagnostic.origin);
        self.reported.lock().push((kind, diagnostic));
    }
}
