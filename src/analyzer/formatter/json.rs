//! JSON formatter.

use crate::analyzer::lint::AnalysisResult;
use crate::analyzer::types::Diagnostic;
use serde::Serialize;
use std::collections::BTreeMap;

/// Format an analysis result as JSON.
pub fn format(result: &AnalysisResult) -> String {
    let output = JsonOutput::from(result);
    serde_json::to_string_pretty(&output)
        .unwrap_or_else(|_| "{}".to_string())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput {
    diagnostics: Vec<JsonDiagnostic>,
    parse_errors: Vec<String>,
    summary: JsonSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDiagnostic {
    code: String,
    name: String,
    level: String,
    origin: String,
    file_path: String,
    line: Option<u32>,
    field: Option<String>,
    details: BTreeMap<String, String>,
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    resources_analyzed: usize,
    analyzers_run: usize,
    suppressed: usize,
    total_diagnostics: usize,
    passed: bool,
}

impl From<&AnalysisResult> for JsonOutput {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            diagnostics: result
                .diagnostics
                .iter()
                .map(JsonDiagnostic::from)
                .collect(),
            parse_errors: result.parse_errors.clone(),
            summary: JsonSummary {
                resources_analyzed: result.summary.resources_analyzed,
                analyzers_run: result.summary.analyzers_run,
                suppressed: result.summary.suppressed,
                total_diagnostics: result.diagnostics.len(),
                passed: result.summary.passed,
            },
        }
    }
}

impl From<&Diagnostic> for JsonDiagnostic {
    fn from(d: &Diagnostic) -> Self {
        Self {
            code: d.code().to_string(),
            name: d.message_type.name().to_string(),
            level: d.severity.label().to_string(),
            origin: d.origin.identifier(),
            file_path: d.origin.file_path.display().to_string(),
            line: d.origin.line,
            field: d.field.clone(),
            details: d.details.iter().cloned().collect(),
            message: d.message.clone(),
        }
    }
}
