use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::analyzer::types::Severity;
use crate::analyzer::OutputFormat;

#[derive(Parser)]
#[command(name = "gateway-lint")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check Istio gateway listener ports against the services that back them")]
#[command(long_about = "Loads Istio Gateways, Pods and Services from manifests and reports gateway listener ports that no service in front of the selected workload exposes, and gateways whose selector matches no workload.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze manifests and report gateway port problems
    Analyze {
        /// Manifest files or directories, analyzed together
        #[arg(value_name = "PATH", required = true, num_args = 1..)]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: FormatArg,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Suppress a message: CODE or CODE=Kind name.namespace (repeatable)
        #[arg(short, long, value_name = "RULE")]
        suppress: Vec<String>,

        /// Lowest severity that makes the command exit non-zero
        #[arg(long, value_enum)]
        failure_threshold: Option<SeverityArg>,

        /// Do not report diagnostics below this severity
        #[arg(long, value_enum)]
        min_severity: Option<SeverityArg>,

        /// Namespace for resources that do not declare one
        #[arg(long, value_name = "NAMESPACE")]
        default_namespace: Option<String>,

        /// Always exit zero
        #[arg(long)]
        no_fail: bool,
    },

    /// List the built-in analyzers and their inputs
    ListAnalyzers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Plain,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => OutputFormat::Plain,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeverityArg {
    Info,
    Warning,
    Error,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Info => Severity::Info,
            SeverityArg::Warning => Severity::Warning,
            SeverityArg::Error => Severity::Error,
        }
    }
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
