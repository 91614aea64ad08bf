//! Multinomial logistic-regression severity model
//!
//! A single linear layer with softmax over standardized features, fitted by
//! batch gradient descent in pure Rust. The classifier around it is an
//! explicit Untrained/Trained state machine: prediction always succeeds,
//! falling back to a deterministic rule table when no model is available.

use super::encoder::LabelEncoder;
use super::features::{FeatureExtractor, FEATURE_DIM};
use crate::models::{Finding, Severity, SmellKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const EPOCHS: usize = 400;
const LEARNING_RATE: f64 = 0.5;

/// Fallback severity used when no trained model is available.
///
/// Deterministic and independent of line numbers or message content.
pub fn fallback_severity(kind: SmellKind) -> Severity {
    match kind {
        SmellKind::GodClass | SmellKind::ComplexCondition => Severity::High,
        SmellKind::LongFunction | SmellKind::DeepNesting => Severity::Medium,
        SmellKind::TooManyParameters | SmellKind::SyntaxError => Severity::Low,
    }
}

/// Linear softmax model: one weight row and bias per class, plus the
/// feature standardization parameters fitted alongside the weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftmaxModel {
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
    feature_means: Vec<f64>,
    feature_scales: Vec<f64>,
}

impl SoftmaxModel {
    /// Fit by full-batch gradient descent on softmax cross-entropy.
    /// Deterministic: zero-initialized weights, fixed epoch count.
    pub(crate) fn fit(
        features: &[[f64; FEATURE_DIM]],
        targets: &[usize],
        class_count: usize,
    ) -> Self {
        let sample_count = features.len().max(1) as f64;

        let mut feature_means = vec![0.0; FEATURE_DIM];
        for x in features {
            for (mean, value) in feature_means.iter_mut().zip(x.iter()) {
                *mean += value / sample_count;
            }
        }

        let mut feature_scales = vec![0.0; FEATURE_DIM];
        for x in features {
            for (scale, (value, mean)) in feature_scales
                .iter_mut()
                .zip(x.iter().zip(feature_means.iter()))
            {
                *scale += (value - mean).powi(2) / sample_count;
            }
        }
        for scale in feature_scales.iter_mut() {
            *scale = scale.sqrt();
            if *scale < 1e-9 {
                *scale = 1.0;
            }
        }

        let mut model = Self {
            weights: vec![vec![0.0; FEATURE_DIM]; class_count],
            bias: vec![0.0; class_count],
            feature_means,
            feature_scales,
        };

        let mut grad_w = vec![vec![0.0; FEATURE_DIM]; class_count];
        let mut grad_b = vec![0.0; class_count];

        for _ in 0..EPOCHS {
            for row in grad_w.iter_mut() {
                row.fill(0.0);
            }
            grad_b.fill(0.0);

            for (x, &target) in features.iter().zip(targets.iter()) {
                let standardized = model.standardize(x);
                let probabilities = softmax(&model.logits(&standardized));

                for class in 0..class_count {
                    let error =
                        probabilities[class] - if class == target { 1.0 } else { 0.0 };
                    grad_b[class] += error;
                    for (g, value) in grad_w[class].iter_mut().zip(standardized.iter()) {
                        *g += error * value;
                    }
                }
            }

            for class in 0..class_count {
                model.bias[class] -= LEARNING_RATE * grad_b[class] / sample_count;
                for (w, g) in model.weights[class].iter_mut().zip(grad_w[class].iter()) {
                    *w -= LEARNING_RATE * g / sample_count;
                }
            }
        }

        model
    }

    /// Index of the highest-scoring class
    pub(crate) fn predict_class(&self, features: &[f64; FEATURE_DIM]) -> usize {
        let standardized = self.standardize(features);
        let logits = self.logits(&standardized);

        let mut best = 0;
        for (class, &logit) in logits.iter().enumerate() {
            if logit > logits[best] {
                best = class;
            }
        }
        best
    }

    fn standardize(&self, x: &[f64; FEATURE_DIM]) -> [f64; FEATURE_DIM] {
        let mut out = [0.0; FEATURE_DIM];
        for i in 0..FEATURE_DIM {
            out[i] = (x[i] - self.feature_means[i]) / self.feature_scales[i];
        }
        out
    }

    fn logits(&self, x: &[f64; FEATURE_DIM]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(self.bias.iter())
            .map(|(row, b)| b + row.iter().zip(x.iter()).map(|(w, v)| w * v).sum::<f64>())
            .collect()
    }
}

fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Fully-fitted model state: the weight matrix plus the encoder that maps
/// class indices back to severity labels. Always built as a whole and
/// published in one step, so a reader never observes a half-updated pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    pub(crate) model: SoftmaxModel,
    pub(crate) encoder: LabelEncoder,
}

/// Explicit classifier mode; no transition back to Untrained except fresh
/// construction.
#[derive(Debug, Clone, Default)]
pub enum ModelState {
    #[default]
    Untrained,
    Trained(TrainedModel),
}

/// Faults from model persistence, kept distinct from "legitimately
/// untrained" so callers can tell the two apart.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("model file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode model file: {0}")]
    Decode(#[from] serde_json::Error),
}

/// On-disk blob: self-describing, reconstructs the whole classifier state
#[derive(Debug, Serialize, Deserialize)]
struct SavedModel {
    is_trained: bool,
    trained_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<TrainedModel>,
}

/// Severity classifier over findings
///
/// Untrained until `train` or `load` succeeds; `predict` is total in both
/// modes.
#[derive(Debug, Clone, Default)]
pub struct SeverityClassifier {
    extractor: FeatureExtractor,
    state: ModelState,
}

impl SeverityClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_trained(&self) -> bool {
        matches!(self.state, ModelState::Trained(_))
    }

    /// Predict a severity for the finding.
    ///
    /// Untrained: the deterministic fallback table. Trained: extract
    /// features, run the model, decode through the fitted encoder. Never
    /// fails on a well-formed finding.
    pub fn predict(&self, finding: &Finding) -> Severity {
        match &self.state {
            ModelState::Untrained => fallback_severity(finding.kind),
            ModelState::Trained(trained) => {
                let features = self.extractor.extract(finding);
                let class = trained.model.predict_class(&features);
                trained
                    .encoder
                    .inverse(class)
                    .unwrap_or_else(|| fallback_severity(finding.kind))
            }
        }
    }

    /// Publish a fully-built model in a single swap.
    pub(crate) fn install(&mut self, trained: TrainedModel) {
        self.state = ModelState::Trained(trained);
    }

    /// Persist the classifier as one self-describing JSON blob.
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        let blob = SavedModel {
            is_trained: self.is_trained(),
            trained_at: Some(chrono::Utc::now().to_rfc3339()),
            model: match &self.state {
                ModelState::Trained(trained) => Some(trained.clone()),
                ModelState::Untrained => None,
            },
        };

        let body = serde_json::to_string_pretty(&blob)?;
        std::fs::write(path, body)?;
        Ok(())
    }

    /// Load a classifier from a persisted blob.
    ///
    /// Returns a fresh, fully-populated classifier; the caller replaces its
    /// current one in a single assignment, so existing state is untouched on
    /// failure. A missing file and a corrupt file are distinct faults —
    /// neither is silently turned into an untrained classifier here.
    pub fn load(path: &Path) -> Result<Self, PersistError> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                PersistError::NotFound(path.to_path_buf())
            } else {
                PersistError::Io(err)
            }
        })?;

        let blob: SavedModel = serde_json::from_str(&raw)?;
        let state = match blob.model {
            Some(trained) if blob.is_trained => ModelState::Trained(trained),
            _ => ModelState::Untrained,
        };

        Ok(Self {
            extractor: FeatureExtractor::new(),
            state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(kind: SmellKind, line: u32, message: &str) -> Finding {
        Finding {
            kind,
            name: Some("sample".to_string()),
            line,
            message: message.to_string(),
            severity: Severity::Low,
            predicted_severity: None,
            measured: None,
        }
    }

    #[test]
    fn test_untrained_fallback_table() {
        let classifier = SeverityClassifier::new();
        assert!(!classifier.is_trained());

        let cases = [
            (SmellKind::GodClass, Severity::High),
            (SmellKind::ComplexCondition, Severity::High),
            (SmellKind::LongFunction, Severity::Medium),
            (SmellKind::DeepNesting, Severity::Medium),
            (SmellKind::TooManyParameters, Severity::Low),
            (SmellKind::SyntaxError, Severity::Low),
        ];
        for (kind, expected) in cases {
            assert_eq!(classifier.predict(&finding(kind, 1, "")), expected);
        }
    }

    #[test]
    fn test_fallback_ignores_line_and_message() {
        let classifier = SeverityClassifier::new();
        let a = finding(SmellKind::GodClass, 1, "Class A has 16 methods");
        let b = finding(SmellKind::GodClass, 9999, "completely different text 42");
        assert_eq!(classifier.predict(&a), classifier.predict(&b));
    }

    #[test]
    fn test_softmax_fit_separates_classes() {
        // Two well-separated clusters on the first feature.
        let features: Vec<[f64; FEATURE_DIM]> = vec![
            [1.0, 0.1, 5.0],
            [1.0, 0.2, 6.0],
            [1.0, 0.3, 7.0],
            [9.0, 0.1, 30.0],
            [9.0, 0.2, 31.0],
            [9.0, 0.3, 32.0],
        ];
        let targets = vec![0, 0, 0, 1, 1, 1];
        let model = SoftmaxModel::fit(&features, &targets, 2);

        for (x, &y) in features.iter().zip(targets.iter()) {
            assert_eq!(model.predict_class(x), y);
        }
    }

    #[test]
    fn test_save_load_round_trip_preserves_predictions() {
        use super::super::samples::builtin_training_set;

        let mut classifier = SeverityClassifier::new();
        classifier
            .train(&builtin_training_set())
            .expect("enough samples to train");
        assert!(classifier.is_trained());

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("severity_model.json");
        classifier.save(&path).expect("save model");

        let loaded = SeverityClassifier::load(&path).expect("load model");
        assert!(loaded.is_trained());

        for sample in builtin_training_set() {
            assert_eq!(loaded.predict(&sample), classifier.predict(&sample));
        }
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let err = SeverityClassifier::load(Path::new("/nonexistent/model.json"))
            .expect_err("missing file must fail");
        assert!(matches!(err, PersistError::NotFound(_)));
    }

    #[test]
    fn test_load_corrupt_file_is_decode_fault() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("severity_model.json");
        std::fs::write(&path, "{not json").expect("write corrupt blob");

        let err = SeverityClassifier::load(&path).expect_err("corrupt file must fail");
        assert!(matches!(err, PersistError::Decode(_)));
    }

    #[test]
    fn test_failed_load_leaves_existing_classifier_intact() {
        use super::super::samples::builtin_training_set;

        let mut classifier = SeverityClassifier::new();
        classifier
            .train(&builtin_training_set())
            .expect("enough samples to train");

        // Caller keeps its classifier when the replacement fails to load.
        let attempt = SeverityClassifier::load(Path::new("/nonexistent/model.json"));
        assert!(attempt.is_err());
        assert!(classifier.is_trained());
    }

    #[test]
    fn test_save_untrained_then_load_stays_untrained() {
        let classifier = SeverityClassifier::new();
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("severity_model.json");
        classifier.save(&path).expect("save model");

        let loaded = SeverityClassifier::load(&path).expect("load model");
        assert!(!loaded.is_trained());
    }
}
