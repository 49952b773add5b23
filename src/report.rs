//! Output formatting for the chosen option.
//!
//! Pure functions: (Choice, OutputFormat) → String. No I/O.

use crate::types::Choice;

/// How the chosen option is printed on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Format the committed option for output.
pub fn format_choice(choice: &Choice, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(choice),
        OutputFormat::Json => format_json(choice),
    }
}

fn format_human(choice: &Choice) -> String {
    format!("{} {}", choice.label, choice.value)
}

fn format_json(choice: &Choice) -> String {
    let doc = serde_json::json!({
        "label": choice.label,
        "value": choice.value.to_json(),
    });
    doc.to_string()
}

// ============================================================================
// TESTS
// ============================================================================
