//! Plain text formatter.

use crate::analyzer::lint::AnalysisResult;

/// Format an analysis result as plain text, one diagnostic per line.
pub fn format(result: &AnalysisResult) -> String {
    let mut output = String::new();

    for d in &result.diagnostics {
        let location = match d.origin.line {
            Some(line) => format!("{}:{}", d.origin.file_path.display(), line),
            None => d.origin.file_path.display().to_string(),
        };

        output.push_str(&format!(
            "{} [{}] ({} {}) {}\n",
            d.severity.label(),
            d.code(),
            d.origin,
            location,
            d.message,
        ));
    }

    if result.diagnostics.is_empty() {
        output.push_str("\u{2714} No validation issues found.\n");
    } else {
        output.push_str(&format!(
            "\nFound {} issue(s) in {} resource(s).\n",
            result.diagnostics.len(),
            result.summary.resources_analyzed
        ));
    }

    output
}
