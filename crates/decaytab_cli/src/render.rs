//! Console rendering of a validation report.

use crate::OutputFormat;
use decaytab_core::{ValidationMetrics, ValidationReport};
use std::io::Write;

/// Writes `report` in `format`.
///
/// Plain output goes to stdout when the run passed and to stderr when it
/// failed; JSON always goes to stdout.
pub(crate) fn emit(
    report: &ValidationReport,
    format: OutputFormat,
    show_ok: bool,
) -> Result<(), String> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report)
                .map_err(|err| format!("failed to encode report: {err}"))?;
            println!("{json}");
            Ok(())
        }
        OutputFormat::Plain => {
            let text = plain_transcript(report, show_ok);
            let written = if report.is_ok() {
                std::io::stdout().lock().write_all(text.as_bytes())
            } else {
                std::io::stderr().lock().write_all(text.as_bytes())
            };
            written.map_err(|err| format!("failed to write report: {err}"))
        }
    }
}

pub(crate) fn plain_transcript(report: &ValidationReport, show_ok: bool) -> String {
    let mut lines: Vec<String> = Vec::new();
    if report.is_ok() {
        lines.push("All checks passed.".to_string());
    } else {
        lines.extend(report.errors().iter().cloned());
    }
    lines.extend(report.warnings().iter().map(|w| format!("warning: {w}")));
    if show_ok && report.is_ok() {
        lines.push(metrics_line(report.metrics()));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn metrics_line(metrics: &ValidationMetrics) -> String {
    format!(
        "checked {} parents, {} channels; {} BR-sum warnings, {} heuristic matches, {} duplicate channels",
        metrics.parents_checked,
        metrics.channels_checked,
        metrics.br_sum_warnings,
        metrics.heuristic_matches,
        metrics.duplicate_channels
    )
}
