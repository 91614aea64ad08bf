//! Threshold rules for structural smells
//!
//! Each rule compares one measured metric against its threshold and builds
//! the finding, including the structured `measured` value the classifier's
//! feature extraction reads.

use super::walker::{ClassDecl, FunctionDecl};
use crate::config::AnalyzerConfig;
use crate::models::{Finding, Severity, SmellKind};

/// Method count above which a class is flagged as a god class. Fixed, unlike
/// the function thresholds which come from config.
pub const MAX_CLASS_METHODS: usize = 15;

/// Default severity assigned at detection time, before any classifier runs.
///
/// Exhaustive over `SmellKind`: a kind without an entry here does not
/// compile. ComplexCondition and DeepNesting are reserved vocabulary —
/// no rule emits them yet, but they carry severities so the table stays
/// total.
pub fn default_severity(kind: SmellKind) -> Severity {
    match kind {
        SmellKind::LongFunction => Severity::Medium,
        SmellKind::TooManyParameters => Severity::Low,
        SmellKind::GodClass => Severity::High,
        SmellKind::ComplexCondition => Severity::High,
        SmellKind::DeepNesting => Severity::Medium,
        SmellKind::SyntaxError => Severity::High,
    }
}

/// Per-construct threshold checks
#[derive(Debug, Clone)]
pub struct SmellRules {
    max_function_length: usize,
    max_parameters: usize,
}

impl SmellRules {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            max_function_length: config.max_function_length,
            max_parameters: config.max_parameters,
        }
    }

    /// Function checks run in a fixed order and the first match wins: a
    /// function that is both too long and over-parameterized reports
    /// LongFunction only, so each construct yields at most one finding.
    pub(crate) fn check_function(&self, decl: &FunctionDecl) -> Option<Finding> {
        if decl.statement_count > self.max_function_length {
            return Some(Finding {
                kind: SmellKind::LongFunction,
                name: Some(decl.name.clone()),
                line: decl.line,
                message: format!(
                    "Function {} has {} statements (recommended: max {})",
                    decl.name, decl.statement_count, self.max_function_length
                ),
                severity: default_severity(SmellKind::LongFunction),
                predicted_severity: None,
                measured: Some(decl.statement_count as u32),
            });
        }

        if decl.parameter_count > self.max_parameters {
            return Some(Finding {
                kind: SmellKind::TooManyParameters,
                name: Some(decl.name.clone()),
                line: decl.line,
                message: format!(
                    "Function {} has {} parameters (recommended: max {})",
                    decl.name, decl.parameter_count, self.max_parameters
                ),
                severity: default_severity(SmellKind::TooManyParameters),
                predicted_severity: None,
                measured: Some(decl.parameter_count as u32),
            });
        }

        None
    }

    pub(crate) fn check_class(&self, decl: &ClassDecl) -> Option<Finding> {
        if decl.method_count > MAX_CLASS_METHODS {
            return Some(Finding {
                kind: SmellKind::GodClass,
                name: Some(decl.name.clone()),
                line: decl.line,
                message: format!(
                    "Class {} has {} methods (possible God Class)",
                    decl.name, decl.method_count
                ),
                severity: default_severity(SmellKind::GodClass),
                predicted_severity: None,
                measured: Some(decl.method_count as u32),
            });
        }

        None
    }

    /// Document-level finding for source that failed to parse. No name; the
    /// line is the parser's reported error location.
    pub(crate) fn syntax_error(line: u32, detail: &str) -> Finding {
        Finding {
            kind: SmellKind::SyntaxError,
            name: None,
            line,
            message: format!("Syntax error: {detail} at line {line}"),
            severity: default_severity(SmellKind::SyntaxError),
            predicted_severity: None,
            measured: None,
        }
    }
}

impl Default for SmellRules {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}
