//! Output formatters for analysis results.

pub mod json;
pub mod plain;

use crate::analyzer::lint::AnalysisResult;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text output.
    #[default]
    Plain,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parse from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "plain" | "text" | "log" => Some(Self::Plain),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Format an analysis result to a string.
pub fn format_result_to_string(result: &AnalysisResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Plain => plain::format(result),
        OutputFormat::Json => json::format(result),
    }
}

/// Format and print an analysis result.
pub fn format_result(result: &AnalysisResult, format: OutputFormat) {
    print!("{}", format_result_to_string(result, format));
}
