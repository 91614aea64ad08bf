//! Finding reporters
//!
//! Render an analysis report for terminals or machine consumption. The JSON
//! shape is the interchange contract: flat finding records with optional
//! fields omitted when absent.

mod json;
mod text;

use crate::models::AnalysisReport;
use anyhow::{bail, Result};

/// Render a report in the requested format (`text` or `json`).
pub fn render(report: &AnalysisReport, format: &str) -> Result<String> {
    match format {
        "text" => text::render(report),
        "json" => json::render(report),
        other => bail!("unknown report format: {other}"),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::models::{AnalysisReport, Finding, Severity, SmellKind};

    pub fn test_report() -> AnalysisReport {
        AnalysisReport::new(vec![
            Finding {
                kind: SmellKind::LongFunction,
                name: Some("busy".to_string()),
                line: 3,
                message: "Function busy has 23 statements (recommended: max 20)".to_string(),
                severity: Severity::Medium,
                predicted_severity: Some(Severity::Medium),
                measured: Some(23),
            },
            Finding {
                kind: SmellKind::GodClass,
                name: Some("Everything".to_string()),
                line: 40,
                message: "Class Everything has 17 methods (possible God Class)".to_string(),
                severity: Severity::High,
                predicted_severity: None,
                measured: Some(17),
            },
        ])
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(super::render(&test_report(), "yaml").is_err());
    }
}
