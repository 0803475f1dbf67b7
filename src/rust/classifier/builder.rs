use std::sync::Arc;
use tokenizers::Tokenizer;
use log::{info, error};

use super::error::ClassifierError;
use super::classifier::Classifier;
use super::labels::NUM_CLASSES;
use super::model::{InputType, OnnxSequenceModel, SequenceModel};
use super::sequence::{TextSequencing, check_vocab_size, resolve_oov_id};
use crate::artifacts::ArtifactPaths;
use crate::runtime::RuntimeConfig;

/// Sequence length the classifier was trained with.
pub const DEFAULT_MAX_SEQUENCE_LENGTH: usize = 100;

const WARMUP_TEXT: &str = "warmup";

/// A builder for constructing a Classifier with a fluent interface.
#[derive(Debug)]
pub struct ClassifierBuilder {
    model_path: Option<String>,
    tokenizer_path: Option<String>,
    tokenizer: Option<Tokenizer>,
    model: Option<Arc<dyn SequenceModel>>,
    max_sequence_length: usize,
    oov_token: Option<String>,
    input_type: InputType,
    runtime_config: RuntimeConfig,
}

impl Default for ClassifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSequencing for ClassifierBuilder {
    fn tokenizer(&self) -> Option<&Tokenizer> {
        self.tokenizer.as_ref()
    }

    fn max_sequence_length(&self) -> Option<usize> {
        Some(self.max_sequence_length)
    }

    fn oov_token_id(&self) -> Option<u32> {
        let tokenizer = self.tokenizer.as_ref()?;
        self.oov_token.as_deref().and_then(|t| tokenizer.token_to_id(t))
    }
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder instance with default configuration
    pub fn new() -> Self {
        Self {
            model_path: None,
            tokenizer_path: None,
            tokenizer: None,
            model: None,
            max_sequence_length: DEFAULT_MAX_SEQUENCE_LENGTH,
            oov_token: None,
            input_type: InputType::default(),
            runtime_config: RuntimeConfig::default(),
        }
    }

    /// Sets the runtime configuration for ONNX model execution.
    /// Must be called before the model is loaded to take effect.
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Sets the element type of the model input. Must be called before the model is loaded.
    pub fn with_input_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    /// Sets the fixed length every input is truncated or padded to.
    pub fn with_max_sequence_length(mut self, max_sequence_length: usize) -> Self {
        self.max_sequence_length = max_sequence_length;
        self
    }

    /// Names the vocabulary's out-of-vocabulary token; its ids are skipped during encoding.
    pub fn with_oov_token(mut self, oov_token: impl Into<String>) -> Self {
        self.oov_token = Some(oov_token.into());
        self
    }

    /// Verifies and loads the ONNX model and tokenizer from disk.
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance if successful, or an error if:
    ///   - The model or tokenizer paths are empty
    ///   - The model or tokenizer is already set
    ///   - The files don't exist or fail digest verification
    ///   - The model or tokenizer failed to load
    ///   - The model structure is invalid
    pub fn with_artifacts(mut self, paths: &ArtifactPaths) -> Result<Self, ClassifierError> {
        if paths.model.as_os_str().is_empty() || paths.tokenizer.as_os_str().is_empty() {
            return Err(ClassifierError::BuildError("Model and tokenizer paths cannot be empty".to_string()));
        }
        if self.model.is_some() || self.tokenizer.is_some() {
            return Err(ClassifierError::BuildError("Model and tokenizer already set".to_string()));
        }

        paths.verify()?;

        let tokenizer = Tokenizer::from_file(&paths.tokenizer)
            .map_err(|e| {
                error!("Failed to load tokenizer: {}", e);
                ClassifierError::BuildError(format!("Failed to load tokenizer: {}", e))
            })?;
        info!("Tokenizer loaded successfully from {:?}", paths.tokenizer);

        let model = OnnxSequenceModel::from_file(&paths.model, &self.runtime_config, self.input_type)?;
        info!("Model loaded successfully from {:?}", paths.model);

        self.model_path = Some(paths.model.to_string_lossy().to_string());
        self.tokenizer_path = Some(paths.tokenizer.to_string_lossy().to_string());
        self.tokenizer = Some(tokenizer);
        self.model = Some(Arc::new(model));
        Ok(self)
    }

    /// Uses an already loaded tokenizer.
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Result<Self, ClassifierError> {
        if self.tokenizer.is_some() {
            return Err(ClassifierError::BuildError("Tokenizer already set".to_string()));
        }
        self.tokenizer_path = Some("<memory>".to_string());
        self.tokenizer = Some(tokenizer);
        Ok(self)
    }

    /// Uses an already loaded model.
    pub fn with_model(mut self, model: Arc<dyn SequenceModel>) -> Result<Self, ClassifierError> {
        if self.model.is_some() {
            return Err(ClassifierError::BuildError("Model already set".to_string()));
        }
        self.model_path = Some("<memory>".to_string());
        self.model = Some(model);
        Ok(self)
    }

    /// Builds and returns the final Classifier instance
    ///
    /// # Returns
    /// * `Result<Classifier, ClassifierError>` - The constructed Classifier if successful, or an error if:
    ///   - No model or tokenizer is set
    ///   - The max sequence length is zero
    ///   - The configured OOV token is not in the vocabulary
    ///   - A warm-up prediction does not yield one score per class
    pub fn build(mut self) -> Result<Classifier, ClassifierError> {
        if self.max_sequence_length == 0 {
            return Err(ClassifierError::ValidationError("Max sequence length must be positive".to_string()));
        }

        let tokenizer = self.tokenizer.as_ref()
            .ok_or_else(|| ClassifierError::BuildError("No tokenizer loaded".into()))?;
        let vocab_size = check_vocab_size(tokenizer)?;
        info!("Tokenizer vocabulary size: {}", vocab_size);

        let oov_token_id = match self.oov_token.as_deref() {
            Some(token) => Some(resolve_oov_id(tokenizer, token)?),
            None => None,
        };

        let model = self.model.take()
            .ok_or_else(|| ClassifierError::BuildError("No model loaded".into()))?;

        let warmup = self.to_padded_sequence(WARMUP_TEXT)?;
        let scores = model.predict_proba(&warmup)?;
        if scores.len() != NUM_CLASSES {
            error!("Warm-up prediction returned {} scores", scores.len());
            return Err(ClassifierError::BuildError(format!(
                "Model produces {} scores per input, expected {}", scores.len(), NUM_CLASSES
            )));
        }
        info!("Warm-up prediction succeeded, model emits {} class scores", NUM_CLASSES);

        let tokenizer = self.tokenizer.take()
            .ok_or_else(|| ClassifierError::BuildError("No tokenizer loaded".into()))?;

        Ok(Classifier {
            model_path: self.model_path.take().unwrap_or_default(),
            tokenizer_path: self.tokenizer_path.take().unwrap_or_default(),
            tokenizer: Arc::new(tokenizer),
            model,
            max_sequence_length: self.max_sequence_length,
            oov_token_id,
        })
    }
}
