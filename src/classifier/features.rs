//! Feature extraction for severity classification
//!
//! Maps a finding to a fixed 3-element vector. Extraction is pure and
//! total: the same finding always yields the same vector and no finding
//! shape can make it fail.

use crate::models::{Finding, SmellKind};

/// Width of the feature vector
pub const FEATURE_DIM: usize = 3;

/// Extracts numerical features from findings
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Feature layout:
    /// 0. smell-kind code (see `kind_code`)
    /// 1. line / 1000 — a crude normalization that assumes files rarely run
    ///    past a few thousand lines; known to drift for very large inputs
    /// 2. the measured metric value (see `measured_value`)
    pub fn extract(&self, finding: &Finding) -> [f64; FEATURE_DIM] {
        [
            kind_code(finding.kind),
            f64::from(finding.line) / 1000.0,
            measured_value(finding),
        ]
    }
}

/// Numeric code per smell kind, exhaustive over the enum. SyntaxError sits
/// outside the trained vocabulary and encodes to 0.
fn kind_code(kind: SmellKind) -> f64 {
    match kind {
        SmellKind::SyntaxError => 0.0,
        SmellKind::LongFunction => 1.0,
        SmellKind::TooManyParameters => 2.0,
        SmellKind::GodClass => 3.0,
        SmellKind::ComplexCondition => 4.0,
        SmellKind::DeepNesting => 5.0,
    }
}

/// The measured metric for the finding.
///
/// The rules attach it as a structured field; findings from external data
/// may carry it only inside the message text, in which case the first
/// integer among the whitespace-split tokens is used, 0 when none.
fn measured_value(finding: &Finding) -> f64 {
    if let Some(value) = finding.measured {
        return f64::from(value);
    }

    finding
        .message
        .split_whitespace()
        .find_map(|token| token.parse::<u32>().ok())
        .map(f64::from)
        .unwrap_or(0.0)
}
