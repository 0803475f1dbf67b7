use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use ndarray::Array2;
use ort::session::Session;
use ort::value::{DynValue, Tensor};

use super::error::ClassifierError;
use crate::runtime::{RuntimeConfig, create_session_builder};

/// Element type the model's input tensor was exported with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum InputType {
    /// `float32`, the default for a Keras model exported without an explicit input signature
    #[default]
    F32,
    /// `int64` token ids
    I64,
}

/// A classifier that maps one padded id sequence to one score per class.
///
/// Implementations must be shareable across request handlers, so the trait
/// requires `Send + Sync`.
pub trait SequenceModel: Send + Sync + fmt::Debug {
    /// Runs a forward pass on a `[1, sequence_length]` input and returns the
    /// class probabilities of the single batch row.
    fn predict_proba(&self, input: &Array2<i64>) -> Result<Vec<f32>, ClassifierError>;
}

/// [`SequenceModel`] backed by an ONNX Runtime session.
///
/// # Model Input Format
/// - One input tensor of shape `[batch_size=1, sequence_length]`, element type per [`InputType`]
///
/// # Model Output Format
/// - First output of shape `[batch_size=1, num_classes]` holding probabilities
pub struct OnnxSequenceModel {
    session: Session,
    input_name: String,
    input_type: InputType,
}

impl fmt::Debug for OnnxSequenceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnnxSequenceModel")
            .field("input_name", &self.input_name)
            .field("input_type", &self.input_type)
            .finish()
    }
}

impl OnnxSequenceModel {
    /// Loads the model from an ONNX file and validates its structure.
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        config: &RuntimeConfig,
        input_type: InputType,
    ) -> Result<Self, ClassifierError> {
        let session = create_session_builder(config)?
            .commit_from_file(path.as_ref())
            .map_err(|e| {
                log::error!("Failed to load model from {:?}: {}", path.as_ref(), e);
                ClassifierError::ModelError(format!("Failed to load model: {}", e))
            })?;

        Self::validate_model(&session)?;
        log::info!("Model structure validated successfully");

        let input_name = session.inputs[0].name.clone();
        log::info!("Model input '{}' expects {:?} values", input_name, input_type);

        Ok(Self {
            session,
            input_name,
            input_type,
        })
    }

    /// Validates that the model has the expected input/output structure
    ///
    /// # Returns
    /// * `Result<(), ClassifierError>` - Ok if validation passes, or an error if:
    ///   - The model doesn't have exactly one input tensor
    ///   - The model doesn't have any output tensors
    fn validate_model(session: &Session) -> Result<(), ClassifierError> {
        let inputs = &session.inputs;
        if inputs.len() != 1 {
            return Err(ClassifierError::ModelError(
                format!("Model must have exactly 1 input (the token sequence), found {}", inputs.len())
            ));
        }

        let outputs = &session.outputs;
        if outputs.is_empty() {
            return Err(ClassifierError::ModelError(
                "Model must have at least 1 output for class probabilities".to_string()
            ));
        }

        Ok(())
    }

    fn input_value(&self, input: &Array2<i64>) -> Result<DynValue, ClassifierError> {
        let value = match self.input_type {
            InputType::F32 => Tensor::from_array(input.mapv(|id| id as f32))
                .map(|t| t.into_dyn()),
            InputType::I64 => Tensor::from_array(input.clone())
                .map(|t| t.into_dyn()),
        };
        value.map_err(|e| ClassifierError::ModelError(format!("Failed to create input tensor: {}", e)))
    }
}

impl SequenceModel for OnnxSequenceModel {
    fn predict_proba(&self, input: &Array2<i64>) -> Result<Vec<f32>, ClassifierError> {
        let mut input_tensors = HashMap::new();
        input_tensors.insert(self.input_name.as_str(), self.input_value(input)?);

        let outputs = self.session.run(input_tensors)
            .map_err(|e| ClassifierError::ModelError(format!("Failed to run model: {}", e)))?;
        let output_tensor = outputs[0].try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::ModelError(format!("Failed to extract output tensor: {}", e)))?;

        if output_tensor.shape().first().copied().unwrap_or(0) != 1 {
            return Err(ClassifierError::PredictionError(
                format!("Expected a single output row, got shape {:?}", output_tensor.shape())
            ));
        }

        Ok(output_tensor.iter().copied().collect())
    }
}
