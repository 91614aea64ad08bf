//! Severity classification for findings
//!
//! Pipeline: Finding → 3-feature vector → multinomial logistic regression →
//! severity label, with a deterministic rule fallback while no model has
//! been trained or loaded. Train/load always build the new model off to the
//! side and publish it in one swap.

mod encoder;
mod features;
mod model;
mod samples;
mod train;

pub use encoder::LabelEncoder;
pub use features::{FeatureExtractor, FEATURE_DIM};
pub use model::{
    fallback_severity, ModelState, PersistError, SeverityClassifier, SoftmaxModel, TrainedModel,
};
pub use samples::builtin_training_set;
pub use train::{load_labeled, ClassMetrics, EvalReport, MIN_TRAINING_SAMPLES};

use crate::models::Finding;

/// Attach a predicted severity to each finding.
///
/// Prediction is total, so every finding ends up annotated exactly once;
/// the rule-derived `severity` stays in place as the reference value.
pub fn classify_findings(findings: &mut [Finding], classifier: &SeverityClassifier) {
    for finding in findings.iter_mut() {
        finding.predicted_severity = Some(classifier.predict(finding));
    }
}
