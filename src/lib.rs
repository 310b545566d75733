//! # gateway-lint
//!
//! Checks that the listener ports declared on Istio `Gateway` resources are
//! actually exposed by the Kubernetes services in front of the workloads the
//! gateway selects.
//!
//! For every gateway, the pods matching its selector are found, the TCP ports
//! of every service selecting those pods (within the pod's namespace) are
//! unioned, and each listener port is checked against that set. A gateway
//! whose selector matches nothing is reported as a missing reference, unless
//! it selects the system ingress gateway (`istio=ingressgateway`), in which
//! case the stock ingress ports are assumed.
//!
//! ## Example
//!
//! ```rust
//! use gateway_lint::analyzer::{analyze_content, MessageType};
//! use gateway_lint::config::AnalyzeConfig;
//!
//! let manifests = r#"
//! apiVersion: networking.istio.io/v1alpha3
//! kind: Gateway
//! metadata:
//!   name: gw
//! spec:
//!   selector:
//!     istio: ingressgateway
//!   servers:
//!   - port:
//!       number: 8080
//! "#;
//!
//! let result = analyze_content(manifests, &AnalyzeConfig::default());
//! assert_eq!(result.diagnostics.len(), 1);
//! assert_eq!(result.diagnostics[0].message_type, MessageType::GatewayPortNotOnWorkload);
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;

// Re-export commonly used types and functions
pub use analyzer::{Analyzer, AnalysisResult, Diagnostic, analyze_content, analyze_path};
pub use config::AnalyzeConfig;
pub use error::{GatewayLintError, Result};

use cli::Commands;
use handlers::AnalyzeOptions;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Execute a parsed command with an already-loaded config.
///
/// Returns `true` if the process should exit non-zero.
pub fn run_command(command: Commands, config: AnalyzeConfig) -> Result<bool> {
    match command {
        Commands::Analyze {
            paths,
            format,
            output,
            suppress,
            failure_threshold,
            min_severity,
            default_namespace,
            no_fail,
        } => {
            let options = AnalyzeOptions {
                paths,
                format: format.into(),
                output,
                suppress,
                failure_threshold: failure_threshold.map(Into::into),
                min_severity: min_severity.map(Into::into),
                default_namespace,
                no_fail,
            };
            handlers::handle_analyze(options, config)
        }
        Commands::ListAnalyzers => {
            handlers::handle_list_analyzers();
            Ok(false)
        }
    }
}
