use crate::analyzer::lint::{AnalysisResult, analyze_paths};
use crate::analyzer::types::Severity;
use crate::analyzer::{OutputFormat, format_result_to_string};
use crate::config::{AnalyzeConfig, SuppressionRule};
use crate::error::{GatewayLintError, Result};
use std::fs;
use std::path::PathBuf;

/// Command-line overrides for an analyze run.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub paths: Vec<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub suppress: Vec<String>,
    pub failure_threshold: Option<Severity>,
    pub min_severity: Option<Severity>,
    pub default_namespace: Option<String>,
    pub no_fail: bool,
}

impl AnalyzeOptions {
    /// Layer the command-line overrides on top of the loaded config.
    pub fn apply(&self, mut config: AnalyzeConfig) -> Result<AnalyzeConfig> {
        for raw in &self.suppress {
            let rule = SuppressionRule::parse(raw)
                .ok_or_else(|| GatewayLintError::InvalidSuppression(raw.clone()))?;
            config.suppress.push(rule);
        }
        if let Some(threshold) = self.failure_threshold {
            config.failure_threshold = threshold;
        }
        if let Some(floor) = self.min_severity {
            config.min_severity = floor;
        }
        if let Some(ns) = &self.default_namespace {
            config.default_namespace = ns.clone();
        }
        if self.no_fail {
            config.no_fail = true;
        }
        Ok(config)
    }
}

/// Run an analysis and emit the report.
///
/// Returns `true` if the run should exit non-zero.
pub fn handle_analyze(options: AnalyzeOptions, config: AnalyzeConfig) -> Result<bool> {
    let config = options.apply(config)?;

    for path in &options.paths {
        if !path.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )
            .into());
        }
    }

    let result = analyze_paths(&options.paths, &config);
    report_parse_errors(&result);

    let report = format_result_to_string(&result, options.format);
    match &options.output {
        Some(file) => {
            fs::write(file, &report)?;
            log::info!("report written to {}", file.display());
        }
        None => print!("{}", report),
    }

    Ok(result.should_fail(&config))
}

fn report_parse_errors(result: &AnalysisResult) {
    for err in &result.parse_errors {
        eprintln!("Warning: {}", err);
    }
}
