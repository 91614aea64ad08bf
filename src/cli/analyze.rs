//! `odeur analyze` handler

use crate::analyzer::Analyzer;
use crate::classifier::{classify_findings, SeverityClassifier};
use crate::config::load_config;
use crate::models::AnalysisReport;
use crate::reporters;
use anyhow::{Context, Result};
use std::path::Path;

pub(crate) fn run(
    file: &Path,
    format: &str,
    model: Option<&Path>,
    no_classify: bool,
) -> Result<()> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let config_dir = file.parent().unwrap_or(Path::new("."));
    let config = load_config(config_dir)?;

    let analyzer = Analyzer::new(&config);
    let mut findings = analyzer.analyze(&source);

    if !no_classify {
        let classifier = load_or_fallback(model);
        classify_findings(&mut findings, &classifier);
    }

    let report = AnalysisReport::new(findings);
    println!("{}", reporters::render(&report, format)?);
    Ok(())
}

/// Caller policy for model loading: a missing or unreadable blob is logged
/// and the rule-based fallback classifier is used instead. The distinction
/// between the two faults stays visible in the log.
pub(crate) fn load_or_fallback(model: Option<&Path>) -> SeverityClassifier {
    let path = model
        .map(Path::to_path_buf)
        .unwrap_or_else(super::default_model_path);

    match SeverityClassifier::load(&path) {
        Ok(classifier) => {
            tracing::debug!("loaded model from {}", path.display());
            classifier
        }
        Err(err) => {
            tracing::warn!(
                "no usable model at {} ({err}); using rule-based severities",
                path.display()
            );
            SeverityClassifier::new()
        }
    }
}
