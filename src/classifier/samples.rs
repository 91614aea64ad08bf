//! Built-in synthetic training set
//!
//! Seeds the classifier when no labeled findings have been collected yet:
//! five samples per severity class, spanning the trained smell vocabulary.

use crate::models::{Finding, Severity, SmellKind};

fn sample(kind: SmellKind, line: u32, measured: u32, message: &str, severity: Severity) -> Finding {
    Finding {
        kind,
        name: None,
        line,
        message: message.to_string(),
        severity,
        predicted_severity: None,
        measured: Some(measured),
    }
}

pub fn builtin_training_set() -> Vec<Finding> {
    use Severity::{High, Low, Medium};
    use SmellKind::{ComplexCondition, DeepNesting, GodClass, LongFunction, TooManyParameters};

    vec![
        // High severity
        sample(GodClass, 50, 25, "Class has 25 methods", High),
        sample(GodClass, 120, 30, "Class has 30 methods", High),
        sample(ComplexCondition, 80, 15, "Cyclomatic complexity 15", High),
        sample(GodClass, 200, 20, "Class has 20 methods", High),
        sample(ComplexCondition, 45, 12, "Cyclomatic complexity 12", High),
        // Medium severity
        sample(LongFunction, 30, 25, "Function has 25 statements", Medium),
        sample(LongFunction, 100, 30, "Function has 30 statements", Medium),
        sample(DeepNesting, 65, 6, "Nesting level 6", Medium),
        sample(LongFunction, 150, 22, "Function has 22 statements", Medium),
        sample(DeepNesting, 90, 5, "Nesting level 5", Medium),
        // Low severity
        sample(TooManyParameters, 10, 6, "Function has 6 parameters", Low),
        sample(TooManyParameters, 40, 7, "Function has 7 parameters", Low),
        sample(TooManyParameters, 70, 8, "Function has 8 parameters", Low),
        sample(TooManyParameters, 110, 9, "Function has 9 parameters", Low),
        sample(TooManyParameters, 140, 10, "Function has 10 parameters", Low),
    ]
}
