use crate::analyzer::all_analyzers;

/// Print the built-in analyzers and the collections they read.
pub fn handle_list_analyzers() {
    print!("{}", list_analyzers_to_string());
}

pub fn list_analyzers_to_string() -> String {
    let mut output = String::new();
    for analyzer in all_analyzers() {
        let meta = analyzer.metadata();
        output.push_str(&format!("{}\n", meta.name));
        output.push_str(&format!("  {}\n  inputs:\n", meta.description));
        for input in &meta.inputs {
            output.push_str(&format!("    - {}\n", input.collection()));
        }
    }
    output
}
