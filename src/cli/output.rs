//! CLI output formatting

use crate::execution::ExecutionEvent;
use console::Emoji;
use serde_json::Value;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Render a filter result for the terminal.
///
/// Strings print as-is; anything else prints as pretty JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Format the list of discovered filters
pub fn format_filter_list<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = format!("{}", style("Filters list :").yellow());
    for name in names {
        out.push_str(&format!("\n- {}", name));
    }
    out
}

/// Format an execution event for display
pub fn format_execution_event(event: &ExecutionEvent) -> String {
    match event {
        ExecutionEvent::PipelineStarted { run_id, entry } => format!(
            "{} Starting at step {} ({})",
            ROCKET,
            style(entry).bold(),
            style(&run_id.to_string()[..8]).dim()
        ),
        ExecutionEvent::StepStarted { step_id, filter } => format!(
            "{} Run {} {}",
            SPINNER,
            style(filter).green(),
            style(format!("(step {})", step_id)).dim()
        ),
        ExecutionEvent::StepCompleted { step_id, next_step } => match next_step {
            Some(next) => format!("{} {} → {}", CHECK, style(step_id).green(), style(next).cyan()),
            None => format!("{} {}", CHECK, style(step_id).green()),
        },
        ExecutionEvent::StepFailed { step_id } => {
            format!("{} {}", CROSS, style(step_id).red())
        }
        ExecutionEvent::PipelineCompleted { output, .. } => {
            format!("{} Result:\n{}", INFO, format_value(output))
        }
        ExecutionEvent::PipelineFailed { error, .. } => {
            format!("{} {}", CROSS, style(error).red())
        }
    }
}
