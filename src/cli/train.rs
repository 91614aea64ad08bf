//! `odeur train` handler

use crate::classifier::{builtin_training_set, load_labeled, SeverityClassifier};
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub(crate) fn run(data: Option<&Path>, builtin: bool, output: Option<&Path>) -> Result<()> {
    let samples = match data {
        Some(path) if !builtin => load_labeled(path)?,
        _ => {
            println!("Using the built-in synthetic training set.");
            builtin_training_set()
        }
    };

    let mut classifier = SeverityClassifier::new();
    let Some(report) = classifier.train(&samples) else {
        println!(
            "{} not enough labeled samples ({}); model unchanged",
            style("!").yellow(),
            samples.len()
        );
        return Ok(());
    };

    println!(
        "{} model trained on {} samples",
        style("✓").green(),
        samples.len()
    );
    print!("{report}");

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(super::default_model_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    classifier.save(&path)?;
    println!("Model saved to {}", path.display());

    Ok(())
}
