//! Gateway listener port analysis.
//!
//! Cross-references each gateway's listener ports against the TCP ports of
//! the services that front the workloads the gateway selects.

use crate::analyzer::context::{AnalysisContext, Resource, ResourceKind};
use crate::analyzer::selector::{LabelSetMatcher, SelectorMatcher};
use crate::analyzer::types::Diagnostic;
use crate::analyzer::{Analyzer, Metadata};
use std::collections::BTreeSet;

/// Ports of the stock `istio-ingressgateway` service.
///
/// Used only when a gateway selects the system ingress gateway and that
/// workload is not part of the analyzed resources.
pub const DEFAULT_INGRESS_GATEWAY_PORTS: [u32; 4] = [80, 443, 31400, 15443];

/// Label pair the system ingress gateway is selected by.
pub const SYSTEM_INGRESS_SELECTOR: (&str, &str) = ("istio", "ingressgateway");

/// Set of TCP ports reachable for one gateway.
pub type PortSet = BTreeSet<u32>;

/// Checks a gateway's ports against the gateway's Kubernetes service ports.
#[derive(Debug, Clone, Default)]
pub struct IngressGatewayPortAnalyzer<M = LabelSetMatcher> {
    matcher: M,
}

impl IngressGatewayPortAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: SelectorMatcher> IngressGatewayPortAnalyzer<M> {
    /// Use a custom selector matcher.
    pub fn with_matcher(matcher: M) -> Self {
        Self { matcher }
    }

    fn analyze_gateway(&self, gateway: &Resource, ctx: &dyn AnalysisContext) {
        let Some(spec) = gateway.as_gateway() else {
            return;
        };

        // With several services offering different TCP port combinations,
        // a port is fine if *any* of them exposes it.
        let mut service_ports = PortSet::new();
        let mut selector_matches = 0usize;

        ctx.for_each(ResourceKind::Pod, &mut |pod| {
            if !self.matcher.matches(&spec.selector, pod.labels()) {
                return true;
            }
            selector_matches += 1;

            ctx.for_each(ResourceKind::Service, &mut |service| {
                // Services only select pods in their own namespace
                if service.namespace() != pod.namespace() {
                    return true;
                }
                let Some(svc) = service.as_service() else {
                    return true;
                };
                if self.matcher.matches(&svc.selector, pod.labels()) {
                    let tcp = svc.ports.iter().filter(|p| p.is_tcp());
                    service_ports.extend(tcp.map(|p| p.port));
                }
                true
            });
            true
        });

        let selector = spec.selector.to_string();

        if selector_matches == 0 {
            // Users often analyze only their own namespaces, so the system
            // ingress gateway being absent is not worth reporting.
            let (key, value) = SYSTEM_INGRESS_SELECTOR;
            if !spec.selector.is_exactly(key, value) {
                let diagnostic = Diagnostic::referenced_resource_not_found(
                    gateway.origin(),
                    "selector",
                    selector,
                );
                ctx.report(ResourceKind::Gateway, diagnostic);
                return;
            }
            service_ports = DEFAULT_INGRESS_GATEWAY_PORTS.into_iter().collect();
        }

        log::debug!(
            "gateway {}: {} workload(s) matched, service ports {:?}",
            gateway.metadata.full_name,
            selector_matches,
            service_ports
        );

        for server in &spec.servers {
            let Some(port) = &server.port else {
                continue;
            };
            if !service_ports.contains(&port.number) {
                let diagnostic = Diagnostic::gateway_port_not_on_workload(
                    gateway.origin(),
                    &selector,
                    port.number,
                );
                ctx.report(ResourceKind::Gateway, diagnostic);
            }
        }
    }
}

impl<M: SelectorMatcher> Analyzer for IngressGatewayPortAnalyzer<M> {
    fn metadata(&self) -> Metadata {
        Metadata {
            name: "gateway.IngressGatewayPortAnalyzer",
            description: "Checks a gateway's ports against the gateway's Kubernetes service ports",
            inputs: vec![
                ResourceKind::Gateway,
                ResourceKind::Pod,
                ResourceKind::Service,
            ],
        }
    }

    fn analyze(&self, ctx: &dyn AnalysisContext) {
        ctx.for_each(ResourceKind::Gateway, &mut |gateway| {
            self.analyze_gateway(gateway, ctx);
            true
        });
    }
}
