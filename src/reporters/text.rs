//! Text (terminal) reporter with colors

use crate::models::{AnalysisReport, Severity};
use anyhow::Result;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "\x1b[91m",   // Light red
        Severity::Medium => "\x1b[33m", // Yellow
        Severity::Low => "\x1b[34m",    // Blue
    }
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "[H]",
        Severity::Medium => "[M]",
        Severity::Low => "[L]",
    }
}

/// Render report as formatted terminal output
pub fn render(report: &AnalysisReport) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}Odeur Analysis{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));

    let summary = &report.summary;
    if summary.total == 0 {
        out.push_str("No code smells found.\n");
        return Ok(out);
    }

    let mut parts = Vec::new();
    if summary.high > 0 {
        parts.push(format!("\x1b[91m{} high{RESET}", summary.high));
    }
    if summary.medium > 0 {
        parts.push(format!("\x1b[33m{} medium{RESET}", summary.medium));
    }
    if summary.low > 0 {
        parts.push(format!("\x1b[34m{} low{RESET}", summary.low));
    }
    out.push_str(&format!(
        "{BOLD}FINDINGS{RESET} ({} total)  {}\n\n",
        summary.total,
        parts.join(" | ")
    ));

    for finding in &report.findings {
        let severity = finding.display_severity();
        let color = severity_color(severity);
        let name = finding.name.as_deref().unwrap_or("<module>");

        out.push_str(&format!(
            "  {color}{}{RESET} line {:<5} {BOLD}{}{RESET} {}\n",
            severity_tag(severity),
            finding.line,
            finding.kind,
            name
        ));
        out.push_str(&format!("      {DIM}{}{RESET}\n", finding.message));
    }

    Ok(out)
}
