use serde::Serialize;

mod error;
mod sequence;
mod model;
mod classifier;
pub mod builder;
pub mod labels;

pub use error::ClassifierError;
pub use classifier::{Classifier, Prediction};
pub use builder::{ClassifierBuilder, DEFAULT_MAX_SEQUENCE_LENGTH};
pub use model::{InputType, OnnxSequenceModel, SequenceModel};
pub use sequence::{pad_sequence, PAD_ID};

/// Information about the current state and configuration of a classifier
#[derive(Debug, Clone, Serialize)]
pub struct ClassifierInfo {
    /// Path to the ONNX model file
    pub model_path: String,
    /// Path to the tokenizer file
    pub tokenizer_path: String,
    /// Length every input is truncated or padded to
    pub max_sequence_length: usize,
    /// Number of entries in the tokenizer vocabulary
    pub vocab_size: usize,
    /// Labels of the classes, in model output order
    pub class_labels: Vec<String>,
}
