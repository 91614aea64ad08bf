//! Suggestion boundary
//!
//! One finding in, advice text out. Any fault from the external call is
//! rendered into the returned string, so detection results are never lost
//! to a collaborator failure. Detection and suggestion are separate passes,
//! never interleaved per finding.

use super::client::{AiClient, LlmBackend};
use super::prompts::{build_suggestion_prompt, SYSTEM_PROMPT};
use super::AiResult;
use crate::models::Finding;

pub struct SuggestionGenerator {
    client: AiClient,
}

impl SuggestionGenerator {
    pub fn new(client: AiClient) -> Self {
        Self { client }
    }

    pub fn from_env(backend: LlmBackend) -> AiResult<Self> {
        Ok(Self::new(AiClient::from_env(backend)?))
    }

    /// Generate advice for one finding. Total: a failed call yields a
    /// descriptive string instead of an error.
    pub fn suggest(&self, finding: &Finding) -> String {
        match self
            .client
            .generate(SYSTEM_PROMPT, &build_suggestion_prompt(finding))
        {
            Ok(text) => text,
            Err(err) => format!("Error generating suggestion: {err}"),
        }
    }

    /// Generate advice for a batch, in finding order.
    pub fn suggest_all(&self, findings: &[Finding]) -> Vec<String> {
        findings
            .iter()
            .enumerate()
            .map(|(i, finding)| {
                tracing::info!(
                    "generating suggestion {}/{} ({})",
                    i + 1,
                    findings.len(),
                    finding.kind
                );
                self.suggest(finding)
            })
            .collect()
    }
}
