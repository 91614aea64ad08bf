//! Label encoding for classifier targets

use crate::models::Severity;
use serde::{Deserialize, Serialize};

/// Maps severity labels to contiguous class indices and back.
///
/// Classes are recorded in order of first appearance in the training set,
/// so index assignment is a property of the fitted encoder instance.
/// Callers must decode through the same encoder; no fixed order such as
/// low < medium < high is guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<Severity>,
}

impl LabelEncoder {
    /// Fit on the labels and return their encoded indices in one pass.
    pub fn fit_transform(labels: &[Severity]) -> (Self, Vec<usize>) {
        let mut classes: Vec<Severity> = Vec::new();
        let mut indices = Vec::with_capacity(labels.len());

        for &label in labels {
            let index = match classes.iter().position(|c| *c == label) {
                Some(existing) => existing,
                None => {
                    classes.push(label);
                    classes.len() - 1
                }
            };
            indices.push(index);
        }

        (Self { classes }, indices)
    }

    pub fn transform(&self, label: Severity) -> Option<usize> {
        self.classes.iter().position(|c| *c == label)
    }

    pub fn inverse(&self, index: usize) -> Option<Severity> {
        self.classes.get(index).copied()
    }

    /// Number of distinct classes seen at fit time
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> &[Severity] {
        &self.classes
    }
}
