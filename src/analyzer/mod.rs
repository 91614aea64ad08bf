//! Structural smell analysis over Python source
//!
//! One analysis pass walks the parse tree in document order and applies the
//! threshold rules to every function and class declaration. Malformed input
//! never raises: it produces exactly one SyntaxError finding and no partial
//! results.

mod rules;
mod walker;

pub use rules::{default_severity, SmellRules, MAX_CLASS_METHODS};

use crate::config::AnalyzerConfig;
use crate::models::Finding;
use walker::{Declaration, WalkOutcome};

/// Analyzes one source text per call; holds only the configured rules.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    rules: SmellRules,
}

impl Analyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            rules: SmellRules::new(config),
        }
    }

    /// Walk the parse tree and apply the threshold rules.
    ///
    /// Findings come out in declaration order. At most one finding per
    /// construct; constructs under every threshold produce nothing.
    pub fn analyze(&self, source: &str) -> Vec<Finding> {
        let findings = match walker::walk(source) {
            WalkOutcome::ParseError { line, detail } => {
                vec![SmellRules::syntax_error(line, &detail)]
            }
            WalkOutcome::Declarations(declarations) => declarations
                .iter()
                .filter_map(|decl| match decl {
                    Declaration::Function(func) => self.rules.check_function(func),
                    Declaration::Class(class) => self.rules.check_class(class),
                })
                .collect(),
        };

        tracing::debug!("analysis produced {} findings", findings.len());
        findings
    }
}
