//! Training and holdout evaluation for the severity classifier
//!
//! Fits the model on labeled findings with a stratified 80/20 split and
//! reports holdout accuracy plus per-class precision/recall/F1. The report
//! is for human eyes only; nothing downstream consumes it.

use super::encoder::LabelEncoder;
use super::features::{FeatureExtractor, FEATURE_DIM};
use super::model::{SeverityClassifier, SoftmaxModel, TrainedModel};
use crate::models::{Finding, Severity};
use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;

/// Minimum labeled samples before training does anything
pub const MIN_TRAINING_SAMPLES: usize = 5;

const HOLDOUT_FRACTION: f64 = 0.2;
const SPLIT_SEED: u64 = 42;

/// Holdout metrics for one severity class
#[derive(Debug, Clone, Serialize)]
pub struct ClassMetrics {
    pub label: Severity,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Diagnostics from one training run
#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    pub accuracy: f64,
    pub classes: Vec<ClassMetrics>,
    pub train_size: usize,
    pub holdout_size: usize,
}

impl std::fmt::Display for EvalReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.holdout_size == 0 {
            writeln!(f, "Evaluation (no holdout; scored on training data):")?;
        } else {
            writeln!(
                f,
                "Holdout evaluation ({} train / {} holdout):",
                self.train_size, self.holdout_size
            )?;
        }
        writeln!(f, "  Accuracy: {:.2}%", self.accuracy * 100.0)?;
        for metrics in &self.classes {
            writeln!(
                f,
                "  {:<6} precision {:.2}  recall {:.2}  f1 {:.2}  (n={})",
                metrics.label, metrics.precision, metrics.recall, metrics.f1, metrics.support
            )?;
        }
        Ok(())
    }
}

impl SeverityClassifier {
    /// Fit the model on labeled findings.
    ///
    /// Fewer than `MIN_TRAINING_SAMPLES` is a warned no-op, not an error:
    /// the classifier keeps its current state and `None` is returned, so
    /// callers should check `is_trained()` before relying on model output.
    /// On success the new model is built off to the side and published in a
    /// single swap.
    pub fn train(&mut self, samples: &[Finding]) -> Option<EvalReport> {
        if samples.len() < MIN_TRAINING_SAMPLES {
            tracing::warn!(
                "need at least {} labeled samples, got {}; classifier state unchanged",
                MIN_TRAINING_SAMPLES,
                samples.len()
            );
            return None;
        }

        let labels: Vec<Severity> = samples.iter().map(|s| s.severity).collect();
        let (encoder, targets) = LabelEncoder::fit_transform(&labels);

        let extractor = FeatureExtractor::new();
        let features: Vec<[f64; FEATURE_DIM]> =
            samples.iter().map(|s| extractor.extract(s)).collect();

        let (train_idx, holdout_idx) = stratified_split(&targets, HOLDOUT_FRACTION, SPLIT_SEED);

        let train_x: Vec<[f64; FEATURE_DIM]> = train_idx.iter().map(|&i| features[i]).collect();
        let train_y: Vec<usize> = train_idx.iter().map(|&i| targets[i]).collect();

        let model = SoftmaxModel::fit(&train_x, &train_y, encoder.len());
        let trained = TrainedModel { model, encoder };

        let report = if holdout_idx.is_empty() {
            // Too few samples per class for a holdout; score the fit itself.
            let mut report = evaluate(&trained, &features, &targets, &train_idx);
            report.train_size = train_idx.len();
            report.holdout_size = 0;
            report
        } else {
            evaluate(&trained, &features, &targets, &holdout_idx)
        };

        tracing::info!(
            "trained on {} samples, holdout accuracy {:.2}%",
            train_idx.len(),
            report.accuracy * 100.0
        );

        self.install(trained);
        Some(report)
    }
}

/// Split sample indices per class so the holdout keeps the label
/// distribution. Seeded, hence reproducible for the same input.
fn stratified_split(
    targets: &[usize],
    holdout_fraction: f64,
    seed: u64,
) -> (Vec<usize>, Vec<usize>) {
    let mut by_class: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (index, &target) in targets.iter().enumerate() {
        by_class.entry(target).or_default().push(index);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut holdout = Vec::new();

    for (_, mut members) in by_class {
        members.shuffle(&mut rng);
        let holdout_count = (members.len() as f64 * holdout_fraction).floor() as usize;
        holdout.extend(members.drain(..holdout_count));
        train.extend(members);
    }

    train.sort_unstable();
    holdout.sort_unstable();
    (train, holdout)
}

fn evaluate(
    trained: &TrainedModel,
    features: &[[f64; FEATURE_DIM]],
    targets: &[usize],
    indices: &[usize],
) -> EvalReport {
    let class_count = trained.encoder.len();
    let mut true_positive = vec![0usize; class_count];
    let mut false_positive = vec![0usize; class_count];
    let mut false_negative = vec![0usize; class_count];
    let mut correct = 0usize;

    for &i in indices {
        let predicted = trained.model.predict_class(&features[i]);
        let actual = targets[i];
        if predicted == actual {
            correct += 1;
            true_positive[actual] += 1;
        } else {
            false_positive[predicted] += 1;
            false_negative[actual] += 1;
        }
    }

    let classes = (0..class_count)
        .filter_map(|class| {
            let label = trained.encoder.inverse(class)?;
            let tp = true_positive[class] as f64;
            let precision = ratio(tp, tp + false_positive[class] as f64);
            let recall = ratio(tp, tp + false_negative[class] as f64);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            Some(ClassMetrics {
                label,
                precision,
                recall,
                f1,
                support: true_positive[class] + false_negative[class],
            })
        })
        .collect();

    EvalReport {
        accuracy: ratio(correct as f64, indices.len() as f64),
        classes,
        train_size: targets.len() - indices.len(),
        holdout_size: indices.len(),
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Load labeled findings from a JSONL file, one serialized finding per
/// line. Invalid lines are skipped with a warning rather than aborting the
/// whole load.
pub fn load_labeled(path: &Path) -> Result<Vec<Finding>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open training data {}", path.display()))?;
    let reader = std::io::BufReader::new(file);

    let mut samples = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Finding>(&line) {
            Ok(finding) => samples.push(finding),
            Err(err) => tracing::warn!("skipping invalid training record: {err}"),
        }
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::super::samples::builtin_training_set;
    use super::*;
    use crate::models::SmellKind;
    use std::io::Write;

    #[test]
    fn test_too_few_samples_is_a_no_op() {
        let mut classifier = SeverityClassifier::new();
        let samples: Vec<Finding> = builtin_training_set().into_iter().take(4).collect();

        let report = classifier.train(&samples);
        assert!(report.is_none());
        assert!(!classifier.is_trained());
    }

    #[test]
    fn test_no_op_training_keeps_existing_model() {
        let mut classifier = SeverityClassifier::new();
        classifier
            .train(&builtin_training_set())
            .expect("enough samples");
        assert!(classifier.is_trained());

        let few: Vec<Finding> = builtin_training_set().into_iter().take(3).collect();
        assert!(classifier.train(&few).is_none());
        assert!(classifier.is_trained());
    }

    #[test]
    fn test_train_on_builtin_set() {
        let mut classifier = SeverityClassifier::new();
        let report = classifier
            .train(&builtin_training_set())
            .expect("enough samples");

        assert!(classifier.is_trained());
        assert!(report.accuracy >= 0.0 && report.accuracy <= 1.0);
        assert!(!report.classes.is_empty());
        assert_eq!(report.train_size + report.holdout_size, 15);
    }

    #[test]
    fn test_stratified_split_keeps_distribution() {
        // Ten per class; a 20% holdout takes two of each.
        let targets: Vec<usize> = (0..30).map(|i| i % 3).collect();
        let (train, holdout) = stratified_split(&targets, 0.2, 42);

        assert_eq!(train.len(), 24);
        assert_eq!(holdout.len(), 6);
        for class in 0..3 {
            assert_eq!(holdout.iter().filter(|&&i| targets[i] == class).count(), 2);
        }

        // Same seed, same split.
        let (train2, holdout2) = stratified_split(&targets, 0.2, 42);
        assert_eq!(train, train2);
        assert_eq!(holdout, holdout2);
    }

    #[test]
    fn test_trained_prediction_uses_encoder_labels() {
        let mut classifier = SeverityClassifier::new();
        classifier
            .train(&builtin_training_set())
            .expect("enough samples");

        // Every prediction decodes to a label seen in training.
        let finding = Finding {
            kind: SmellKind::GodClass,
            name: Some("Everything".to_string()),
            line: 60,
            message: "Class Everything has 28 methods (possible God Class)".to_string(),
            severity: Severity::Low,
            predicted_severity: None,
            measured: Some(28),
        };
        let predicted = classifier.predict(&finding);
        assert!(matches!(
            predicted,
            Severity::Low | Severity::Medium | Severity::High
        ));
    }

    #[test]
    fn test_report_display_mentions_accuracy() {
        let mut classifier = SeverityClassifier::new();
        let report = classifier
            .train(&builtin_training_set())
            .expect("enough samples");
        let rendered = report.to_string();
        assert!(rendered.contains("Accuracy"));
    }

    #[test]
    fn test_load_labeled_skips_bad_lines() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("labels.jsonl");

        let mut file = std::fs::File::create(&path).expect("create file");
        let finding = builtin_training_set().remove(0);
        writeln!(file, "{}", serde_json::to_string(&finding).expect("json")).expect("write");
        writeln!(file, "not json at all").expect("write");
        writeln!(file).expect("write");

        let samples = load_labeled(&path).expect("load");
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0], finding);
    }
}
