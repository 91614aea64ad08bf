//! JSON reporter
//!
//! Pretty-printed report for piping to jq or further processing.

use crate::models::AnalysisReport;
use anyhow::Result;

pub fn render(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Single-line variant
#[allow(dead_code)] // Public API helper
pub fn render_compact(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_render_is_valid_json() {
        let report = test_report();
        let rendered = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&rendered).expect("parse JSON");

        let findings = parsed["findings"].as_array().expect("findings array");
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0]["kind"], "LongFunction");
        assert_eq!(findings[0]["severity"], "medium");
        assert_eq!(parsed["summary"]["total"], 2);
    }

    #[test]
    fn test_presence_rules() {
        let report = test_report();
        let rendered = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&rendered).expect("parse JSON");

        let findings = parsed["findings"].as_array().expect("findings array");
        // First finding was classified, second was not.
        assert!(findings[0].get("predicted_severity").is_some());
        assert!(findings[1].get("predicted_severity").is_none());
    }

    #[test]
    fn test_render_compact_single_line() {
        let rendered = render_compact(&test_report()).expect("render compact JSON");
        assert!(!rendered.contains('\n'));
        let _: serde_json::Value = serde_json::from_str(&rendered).expect("parse compact JSON");
    }

    #[test]
    fn test_empty_findings() {
        let report = crate::models::AnalysisReport::new(vec![]);
        let rendered = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&rendered).expect("parse JSON");
        assert_eq!(
            parsed["findings"].as_array().expect("findings array").len(),
            0
        );
    }
}
