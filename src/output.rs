//! Output formatting for diff reports.
//!
//! Renders collected change events in one of three formats: colored terminal
//! output, JSON, or plain text for piping. Events are sorted by ascending
//! from-anchor (then to-anchor) so output is reproducible regardless of
//! traversal order.

use crate::error::OutputError;
use crate::report::{ChangeEvent, Report, ReportStats, Severity};
use colored::*;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored terminal output with ANSI escape codes
    Terminal,
    /// JSON representation of the report
    Json,
    /// Plain text, no colors (suitable for piping)
    Plain,
}

/// Options controlling what event details are printed.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Print the from/to source anchors on each line
    pub show_positions: bool,
    /// Print the scope path of each event
    pub show_paths: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            show_positions: true,
            show_paths: true,
        }
    }
}

/// Formats a report according to the specified format and options.
pub fn format_report(
    report: &Report,
    format: &OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Terminal => Ok(format_terminal(report, options)),
        OutputFormat::Json => format_json(report),
        OutputFormat::Plain => Ok(format_plain(report, options)),
    }
}

/// Events in display order: ascending from-anchor, then to-anchor.
fn sorted_events(report: &Report) -> Vec<&ChangeEvent> {
    let mut events: Vec<&ChangeEvent> = report.events().iter().collect();
    events.sort_by_key(|e| (e.anchor_from, e.anchor_to));
    events
}

fn format_terminal(report: &Report, options: &OutputOptions) -> String {
    let events = sorted_events(report);
    if events.is_empty() {
        return "No changes detected.".dimmed().to_string();
    }

    let mut output = String::new();
    for event in events {
        let line = format_event_line(event, options);
        let colored_line = match event.severity {
            Severity::Added => format!("{} {}", "+".bright_green(), line.green()),
            Severity::Removed => format!("{} {}", "-".bright_red(), line.red()),
            Severity::Changed => format!("{} {}", "~".bright_yellow(), line.yellow()),
        };
        output.push_str(&colored_line);
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format_summary(&report.stats()));
    output
}

fn format_plain(report: &Report, options: &OutputOptions) -> String {
    let events = sorted_events(report);
    if events.is_empty() {
        return "No changes detected.".to_string();
    }

    let mut output = String::new();
    for event in events {
        let symbol = match event.severity {
            Severity::Added => '+',
            Severity::Removed => '-',
            Severity::Changed => '~',
        };
        output.push(symbol);
        output.push(' ');
        output.push_str(&format_event_line(event, options));
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format_summary(&report.stats()));
    output
}

/// One event as `path <from -> to>: message`, with path and anchors subject
/// to the options.
fn format_event_line(event: &ChangeEvent, options: &OutputOptions) -> String {
    let mut prefix = Vec::new();
    if options.show_paths {
        prefix.push(format_path(&event.path));
    }
    if options.show_positions {
        prefix.push(format!("<{} -> {}>", event.anchor_from, event.anchor_to));
    }
    if prefix.is_empty() {
        event.message()
    } else {
        format!("{}: {}", prefix.join(" "), event.message())
    }
}

/// Joins a scope path for display; the unit level has no enclosing name.
fn format_path(path: &[String]) -> String {
    if path.is_empty() {
        "(unit)".to_string()
    } else {
        path.join(".")
    }
}

fn format_json(report: &Report) -> Result<String, OutputError> {
    use serde_json::json;

    let events: Vec<serde_json::Value> = sorted_events(report)
        .iter()
        .map(|e| {
            json!({
                "severity": e.severity.label(),
                "code": e.key.code(),
                "path": e.path,
                "anchor_from": {"line": e.anchor_from.line, "column": e.anchor_from.column},
                "anchor_to": {"line": e.anchor_to.line, "column": e.anchor_to.column},
                "message": e.message(),
                "args": e.args.iter().map(|a| a.to_string()).collect::<Vec<String>>(),
            })
        })
        .collect();

    let stats = report.stats();
    let output = json!({
        "events": events,
        "stats": {
            "added": stats.added,
            "removed": stats.removed,
            "changed": stats.changed,
        }
    });

    serde_json::to_string_pretty(&output)
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}

fn format_summary(stats: &ReportStats) -> String {
    if stats.is_empty() {
        return "Summary: no changes".to_string();
    }

    let mut parts = Vec::new();
    if stats.added > 0 {
        parts.push(format!("{} added", stats.added));
    }
    if stats.removed > 0 {
        parts.push(format!("{} removed", stats.removed));
    }
    if stats.changed > 0 {
        parts.push(format!("{} changed", stats.changed));
    }

    format!("Summary: {}", parts.join(", "))
}
