//! Prompt construction for the suggestion generator

use crate::models::Finding;

/// System prompt framing the model as a reviewer
pub const SYSTEM_PROMPT: &str = "\
You are an expert code reviewer specializing in Python best practices.

Your role is to:
1. Analyze code smells and their severity
2. Explain WHY the code smell is problematic
3. Provide SPECIFIC refactoring suggestions with code examples
4. Reference relevant design patterns or principles (SOLID, DRY, etc.)
5. Keep suggestions practical and actionable

When providing suggestions:
- Show concrete code examples (before/after)
- Explain the benefits of the refactoring
- Consider readability, maintainability, and performance
- Be constructive and educational, not critical

Format your response with clear sections:
## Issue Analysis
## Why This Matters
## Suggested Refactoring
## Code Example
## Additional Best Practices
";

/// User prompt for one finding. Uses the displayed severity, so a
/// classifier verdict takes precedence over the rule default.
pub fn build_suggestion_prompt(finding: &Finding) -> String {
    let name = finding.name.as_deref().unwrap_or("<module>");

    format!(
        "Analyze this code smell and provide refactoring suggestions:\n\n\
         **Code Smell Type:** {kind}\n\
         **Location:** {name} (line {line})\n\
         **Severity:** {severity}\n\
         **Details:** {message}\n\n\
         Please provide:\n\
         1. A clear explanation of why this is a problem\n\
         2. Specific refactoring steps\n\
         3. Before/After code examples\n\
         4. Best practices to prevent this in the future\n",
        kind = finding.kind,
        name = name,
        line = finding.line,
        severity = finding.display_severity(),
        message = finding.message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Severity, SmellKind};

    #[test]
    fn test_prompt_contains_finding_fields() {
        let finding = Finding {
            kind: SmellKind::TooManyParameters,
            name: Some("process_user_data".to_string()),
            line: 12,
            message: "Function process_user_data has 9 parameters (recommended: max 5)"
                .to_string(),
            severity: Severity::Low,
            predicted_severity: Some(Severity::Medium),
            measured: Some(9),
        };

        let prompt = build_suggestion_prompt(&finding);
        assert!(prompt.contains("TooManyParameters"));
        assert!(prompt.contains("process_user_data"));
        assert!(prompt.contains("line 12"));
        assert!(prompt.contains("9 parameters"));
        // Predicted severity wins over the rule default.
        assert!(prompt.contains("**Severity:** medium"));
    }

    #[test]
    fn test_prompt_for_nameless_finding() {
        let finding = Finding {
            kind: SmellKind::SyntaxError,
            name: None,
            line: 3,
            message: "Syntax error: unexpected ':' at line 3".to_string(),
            severity: Severity::High,
            predicted_severity: None,
            measured: None,
        };

        let prompt = build_suggestion_prompt(&finding);
        assert!(prompt.contains("<module> (line 3)"));
    }
}
