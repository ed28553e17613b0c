use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashSet;

use crate::ClassifierError;

/// Allowed drift of the probability sum away from 1.0.
pub const SUM_TOLERANCE: f32 = 1e-4;

/// Label → probability mapping in the model's class order.
///
/// Serializes as a JSON object whose keys follow the class order, so every label
/// of the model appears exactly once in an API response.
#[derive(Debug, Clone, PartialEq)]
pub struct Probabilities {
    entries: Vec<(String, f32)>,
}

impl Probabilities {
    /// Zips `labels` with `scores`.
    ///
    /// Both must have the same length, labels must be distinct, every score must lie
    /// in `[0, 1]` and the scores must sum to 1 within [`SUM_TOLERANCE`].
    pub fn from_scores(labels: &[String], scores: Vec<f32>) -> Result<Self, ClassifierError> {
        if labels.len() != scores.len() {
            return Err(ClassifierError::InvalidOutput(format!(
                "model returned {} scores for {} labels",
                scores.len(),
                labels.len()
            )));
        }
        if labels.is_empty() {
            return Err(ClassifierError::InvalidOutput("empty label set".into()));
        }
        if let Some(dup) = first_duplicate(labels) {
            return Err(ClassifierError::InvalidOutput(format!(
                "label '{dup}' appears more than once"
            )));
        }
        if let Some(bad) = scores
            .iter()
            .find(|p| !p.is_finite() || !(0.0..=1.0).contains(*p))
        {
            return Err(ClassifierError::InvalidOutput(format!(
                "probability {bad} is outside [0, 1]"
            )));
        }
        let sum: f32 = scores.iter().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(ClassifierError::InvalidOutput(format!(
                "probabilities sum to {sum}, expected 1"
            )));
        }

        let entries = labels.iter().cloned().zip(scores).collect();
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.entries.iter().map(|(label, p)| (label.as_str(), *p))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn get(&self, label: &str) -> Option<f32> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, p)| *p)
    }

    pub fn sum(&self) -> f32 {
        self.entries.iter().map(|(_, p)| p).sum()
    }

    /// Highest-probability entry. Ties go to the earliest label in class order.
    pub fn argmax(&self) -> Option<(&str, f32)> {
        let mut best: Option<(&str, f32)> = None;
        for (label, p) in self.iter() {
            match best {
                Some((_, top)) if p <= top => {}
                _ => best = Some((label, p)),
            }
        }
        best
    }

    /// Maximum probability across the mapping.
    pub fn confidence(&self) -> f32 {
        self.argmax().map(|(_, p)| p).unwrap_or(0.0)
    }
}

impl Serialize for Probabilities {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, p) in &self.entries {
            map.serialize_entry(label, p)?;
        }
        map.end()
    }
}

/// Rejects a class set that names the same label twice.
pub(crate) fn ensure_unique_labels(labels: &[String]) -> Result<(), ClassifierError> {
    match first_duplicate(labels) {
        Some(dup) => Err(ClassifierError::InvalidConfig(format!(
            "label '{dup}' is listed more than once"
        ))),
        None => Ok(()),
    }
}

fn first_duplicate(labels: &[String]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(labels.len());
    labels
        .iter()
        .find(|label| !seen.insert(label.as_str()))
        .map(String::as_str)
}

/// One inference result: the argmax label plus the full distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub probabilities: Probabilities,
}

impl Prediction {
    /// Derives the label from the distribution so the two can never disagree.
    pub fn from_probabilities(probabilities: Probabilities) -> Result<Self, ClassifierError> {
        let label = probabilities
            .argmax()
            .map(|(label, _)| label.to_string())
            .ok_or_else(|| ClassifierError::InvalidOutput("empty probability mapping".into()))?;
        Ok(Self {
            label,
            probabilities,
        })
    }

    pub fn confidence(&self) -> f32 {
        self.probabilities.confidence()
    }
}
