//! `odeur suggest` handler

use crate::ai::{LlmBackend, SuggestionGenerator};
use crate::analyzer::Analyzer;
use crate::classifier::classify_findings;
use crate::config::load_config;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub(crate) fn run(file: &Path, backend: &str, model: Option<&Path>) -> Result<()> {
    let backend = LlmBackend::parse(backend).unwrap_or_default();
    let generator = SuggestionGenerator::from_env(backend)?;

    let source = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let config = load_config(file.parent().unwrap_or(Path::new(".")))?;

    let mut findings = Analyzer::new(&config).analyze(&source);
    let classifier = super::analyze::load_or_fallback(model);
    classify_findings(&mut findings, &classifier);

    if findings.is_empty() {
        println!("No findings - nothing to suggest.");
        return Ok(());
    }

    // Detection is done; each suggestion is an independent call from here.
    let suggestions = generator.suggest_all(&findings);
    for (finding, suggestion) in findings.iter().zip(suggestions.iter()) {
        let name = finding.name.as_deref().unwrap_or("<module>");
        println!(
            "\n{} {} (line {}, {})",
            style(finding.kind.to_string()).bold(),
            name,
            finding.line,
            finding.display_severity()
        );
        println!("{suggestion}");
    }

    Ok(())
}
