use log::debug;

use crate::{ClosestMatch, Sequence, SpeakerIdError, Template, TemplateMatcher, TemplateSet};

/// Outcome of identifying every utterance of a labeled test set.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub total: usize,
    pub misclassified: usize,
    /// Closest match per test utterance, in test set order.
    pub results: Vec<ClosestMatch>,
}
impl EvaluationReport {
    /// Fraction of misclassified utterances, 0 for an empty test set.
    pub fn error_rate(&self) -> f32 {
        if self.total == 0 {
            0.
        } else {
            self.misclassified as f32 / self.total as f32
        }
    }
    pub fn accuracy(&self) -> f32 {
        1. - self.error_rate()
    }
}

/// Identifies each test utterance against the templates and compares the result with its label.
pub fn evaluate<const D: usize>(
    matcher: &TemplateMatcher,
    templates: &TemplateSet<D>,
    test_set: &TemplateSet<D>,
) -> EvaluationReport {
    let mut misclassified = 0;
    let mut results = Vec::with_capacity(test_set.len());
    for utterance in test_set {
        let result = matcher.best_match_in(&utterance.sequence, templates);
        if result.label != utterance.label {
            debug!(
                "Utterance of '{}' identified as '{}'",
                utterance.label, result.label
            );
            misclassified += 1;
        }
        results.push(result);
    }
    EvaluationReport {
        total: test_set.len(),
        misclassified,
        results,
    }
}

/// Joins every `group_size` consecutive utterances of the same label into a longer one.
///
/// Utterances keep their relative order, trailing utterances that do not fill a group are dropped.
pub fn concatenate_utterances<const D: usize>(
    utterances: &TemplateSet<D>,
    group_size: usize,
) -> Result<TemplateSet<D>, SpeakerIdError> {
    if group_size == 0 {
        return Err(SpeakerIdError::InvalidInput(
            "group size must be at least 1".to_string(),
        ));
    }
    let mut grouped = TemplateSet::new();
    for label in utterances.labels() {
        let sequences = utterances
            .iter()
            .filter(|utterance| utterance.label == label)
            .map(|utterance| &utterance.sequence)
            .collect::<Vec<_>>();
        for group in sequences.chunks_exact(group_size) {
            let frames = group
                .iter()
                .flat_map(|sequence| sequence.frames().iter().copied())
                .collect();
            grouped.push(Template::new(label, Sequence::new(frames)?));
        }
    }
    Ok(grouped)
}
