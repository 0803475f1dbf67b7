use std::sync::Arc;
use serde::Serialize;
use tokenizers::Tokenizer;

use super::error::ClassifierError;
use super::labels::{label_for_index, recommendation_for, CLASS_NAMES, NUM_CLASSES};
use super::model::SequenceModel;
use super::sequence::TextSequencing;

/// The outcome of classifying one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// One of the fixed class labels
    pub label: String,
    /// Probability of `label` as a percentage in `[0, 100]`
    pub confidence: f32,
    /// Static recommendation for `label`
    pub recommendation: String,
    /// Probability of every class, in class order
    pub probabilities: Vec<(String, f32)>,
}

/// A thread-safe text classifier over a fixed set of mental-health classes.
///
/// # Thread Safety
///
/// This type is automatically `Send + Sync`: the tokenizer and the model are
/// wrapped in `Arc` and never mutated after construction, so one instance can
/// serve every request of the process.
///
/// ```rust,no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use nervease::{ArtifactPaths, Classifier};
///
/// let classifier = Classifier::builder()
///     .with_artifacts(&ArtifactPaths::new("model_LSTM_fin.onnx", "tokenizer.json"))?
///     .build()?;
///
/// let prediction = classifier.predict("Saya merasa tertekan dan tidak bisa tidur")?;
/// println!("{} ({:.2}%)", prediction.label, prediction.confidence);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Classifier {
    pub model_path: String,
    pub tokenizer_path: String,
    pub tokenizer: Arc<Tokenizer>,
    pub model: Arc<dyn SequenceModel>,
    pub max_sequence_length: usize,
    pub oov_token_id: Option<u32>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Classifier>();
    }
};

impl TextSequencing for Classifier {
    fn tokenizer(&self) -> Option<&Tokenizer> {
        Some(&self.tokenizer)
    }

    fn max_sequence_length(&self) -> Option<usize> {
        Some(self.max_sequence_length)
    }

    fn oov_token_id(&self) -> Option<u32> {
        self.oov_token_id
    }
}

impl Classifier {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    /// Returns information about the classifier's current state
    pub fn info(&self) -> super::ClassifierInfo {
        super::ClassifierInfo {
            model_path: self.model_path.clone(),
            tokenizer_path: self.tokenizer_path.clone(),
            max_sequence_length: self.max_sequence_length,
            vocab_size: self.tokenizer.get_vocab_size(true),
            class_labels: CLASS_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Classifies one text.
    ///
    /// # Errors
    /// - `ValidationError` if the text is empty or whitespace only
    /// - `TokenizerError` / `ModelError` from encoding or inference
    /// - `PredictionError` if the model output is unusable
    pub fn predict(&self, text: &str) -> Result<Prediction, ClassifierError> {
        if text.trim().is_empty() {
            return Err(ClassifierError::ValidationError("Input text cannot be empty".into()));
        }

        let input = self.to_padded_sequence(text)?;
        let scores = self.model.predict_proba(&input)?;
        let prediction = Self::interpret(&scores)?;

        log::debug!("Predicted '{}' ({:.2}%)", prediction.label, prediction.confidence);
        Ok(prediction)
    }

    /// Turns raw class scores into a [`Prediction`].
    pub(crate) fn interpret(scores: &[f32]) -> Result<Prediction, ClassifierError> {
        if scores.len() != NUM_CLASSES {
            return Err(ClassifierError::PredictionError(format!(
                "Model returned {} scores, expected {}", scores.len(), NUM_CLASSES
            )));
        }
        if let Some(pos) = scores.iter().position(|s| !s.is_finite()) {
            return Err(ClassifierError::PredictionError(format!(
                "Model returned a non-finite score for class {}", pos
            )));
        }

        // Strict comparison keeps the first index on ties
        let mut best = 0;
        for (i, &s) in scores.iter().enumerate().skip(1) {
            if s > scores[best] {
                best = i;
            }
        }

        let probabilities: Vec<f32> = scores.iter().map(|s| s.clamp(0.0, 1.0)).collect();

        let label = label_for_index(best)
            .ok_or_else(|| ClassifierError::PredictionError(format!("No label for index {}", best)))?;
        let recommendation = recommendation_for(label)
            .ok_or_else(|| ClassifierError::PredictionError(format!("No recommendation for '{}'", label)))?;

        Ok(Prediction {
            label: label.to_string(),
            confidence: probabilities[best] * 100.0,
            recommendation: recommendation.to_string(),
            probabilities: CLASS_NAMES.iter()
                .zip(probabilities.iter())
                .map(|(name, &p)| (name.to_string(), p))
                .collect(),
        })
    }
}
