//! Core data models for Odeur
//!
//! The `Finding` record is the interchange contract between the analyzer,
//! the classifier, the reporters, and the suggestion generator. Optional
//! fields are omitted from serialized output when absent.

use serde::{Deserialize, Serialize};

/// Severity levels for findings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// Structural smell categories.
///
/// One closed set shared by the walker, the rules, and the feature encoding.
/// Adding a kind means extending the enum plus the two exhaustive matches
/// over it (`analyzer::default_severity`, the feature code table), all
/// checked by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SmellKind {
    LongFunction,
    TooManyParameters,
    GodClass,
    ComplexCondition,
    DeepNesting,
    SyntaxError,
}

impl std::fmt::Display for SmellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SmellKind::LongFunction => write!(f, "LongFunction"),
            SmellKind::TooManyParameters => write!(f, "TooManyParameters"),
            SmellKind::GodClass => write!(f, "GodClass"),
            SmellKind::ComplexCondition => write!(f, "ComplexCondition"),
            SmellKind::DeepNesting => write!(f, "DeepNesting"),
            SmellKind::SyntaxError => write!(f, "SyntaxError"),
        }
    }
}

/// One reported structural issue
///
/// Created once by the rules during an analysis pass, annotated at most once
/// with a `predicted_severity`, then handed off; findings are never merged
/// or deduplicated and carry no identity beyond their content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: SmellKind,
    /// Identifier of the offending construct; absent for document-level
    /// findings such as a syntax error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 1-based source line of the declaration (or of the parse error).
    pub line: u32,
    /// Human-readable description including the measured value and the
    /// configured threshold.
    pub message: String,
    /// Rule-derived default severity, always present.
    pub severity: Severity,
    /// Classifier output; authoritative for display when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_severity: Option<Severity>,
    /// The measured metric (statement, parameter, or method count) as a
    /// structured value, so downstream consumers need not re-parse the
    /// message text. Findings deserialized from external data may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measured: Option<u32>,
}

impl Finding {
    /// The severity to show: the classifier's verdict when available,
    /// otherwise the rule default.
    pub fn display_severity(&self) -> Severity {
        self.predicted_severity.unwrap_or(self.severity)
    }
}

/// Summary of findings by displayed severity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FindingsSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

impl FindingsSummary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut summary = Self::default();
        for f in findings {
            match f.display_severity() {
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
            }
            summary.total += 1;
        }
        summary
    }
}

/// Analysis result for one source text, as handed to the reporters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub findings: Vec<Finding>,
    pub summary: FindingsSummary,
}

impl AnalysisReport {
    pub fn new(findings: Vec<Finding>) -> Self {
        let summary = FindingsSummary::from_findings(&findings);
        Self { findings, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(kind: SmellKind, severity: Severity) -> Finding {
        Finding {
            kind,
            name: Some("sample".to_string()),
            line: 1,
            message: "sample message".to_string(),
            severity,
            predicted_severity: None,
            measured: None,
        }
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
    }

    #[test]
    fn test_display_severity_prefers_prediction() {
        let mut f = finding(SmellKind::LongFunction, Severity::Medium);
        assert_eq!(f.display_severity(), Severity::Medium);

        f.predicted_severity = Some(Severity::High);
        assert_eq!(f.display_severity(), Severity::High);
    }

    #[test]
    fn test_summary_counts_displayed_severity() {
        let mut high = finding(SmellKind::TooManyParameters, Severity::Low);
        high.predicted_severity = Some(Severity::High);

        let summary = FindingsSummary::from_findings(&[
            high,
            finding(SmellKind::LongFunction, Severity::Medium),
            finding(SmellKind::TooManyParameters, Severity::Low),
        ]);

        assert_eq!(summary.high, 1);
        assert_eq!(summary.medium, 1);
        assert_eq!(summary.low, 1);
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn test_optional_fields_omitted_when_absent() {
        let f = Finding {
            kind: SmellKind::SyntaxError,
            name: None,
            line: 3,
            message: "Syntax error: unexpected ':' at line 3".to_string(),
            severity: Severity::High,
            predicted_severity: None,
            measured: None,
        };

        let json = serde_json::to_value(&f).expect("serialize finding");
        let obj = json.as_object().expect("object");
        assert!(!obj.contains_key("name"));
        assert!(!obj.contains_key("predicted_severity"));
        assert!(!obj.contains_key("measured"));
        assert_eq!(obj["kind"], "SyntaxError");
        assert_eq!(obj["severity"], "high");
    }

    #[test]
    fn test_finding_serde_round_trip() {
        let f = Finding {
            kind: SmellKind::GodClass,
            name: Some("UserManager".to_string()),
            line: 42,
            message: "Class UserManager has 16 methods (possible God Class)".to_string(),
            severity: Severity::High,
            predicted_severity: Some(Severity::High),
            measured: Some(16),
        };

        let json = serde_json::to_string(&f).expect("serialize finding");
        let back: Finding = serde_json::from_str(&json).expect("deserialize finding");
        assert_eq!(back, f);
    }
}
