use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::artifacts::ArtifactPaths;
use crate::classifier::{ClassifierBuilder, ClassifierError, InputType, DEFAULT_MAX_SEQUENCE_LENGTH};
use crate::runtime::{OptimizationLevel, RuntimeConfig};

/// Command line and environment configuration of the NervEase server.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct AppConfig {
    /// Path to the ONNX classification model
    #[arg(long, env = "NERVEASE_MODEL", default_value = "model_LSTM_fin.onnx")]
    pub model: PathBuf,

    /// Path to the tokenizer.json file
    #[arg(long, env = "NERVEASE_TOKENIZER", default_value = "tokenizer.json")]
    pub tokenizer: PathBuf,

    /// Expected SHA-256 of the model file
    #[arg(long, env = "NERVEASE_MODEL_SHA256")]
    pub model_sha256: Option<String>,

    /// Expected SHA-256 of the tokenizer file
    #[arg(long, env = "NERVEASE_TOKENIZER_SHA256")]
    pub tokenizer_sha256: Option<String>,

    /// Length every input is truncated or padded to
    #[arg(long, env = "NERVEASE_MAX_LEN", default_value_t = DEFAULT_MAX_SEQUENCE_LENGTH)]
    pub max_len: usize,

    /// Element type of the model input tensor
    #[arg(long, env = "NERVEASE_INPUT_TYPE", value_enum, default_value_t = InputType::F32)]
    pub input_type: InputType,

    /// Out-of-vocabulary token whose ids are skipped during encoding
    #[arg(long, env = "NERVEASE_OOV_TOKEN")]
    pub oov_token: Option<String>,

    /// Address the web form is served on
    #[arg(long, env = "NERVEASE_BIND", default_value = "127.0.0.1:8501")]
    pub bind: SocketAddr,

    /// ONNX Runtime intra-op threads (0 lets the runtime decide)
    #[arg(long, default_value_t = 0)]
    pub intra_threads: usize,

    /// ONNX Runtime inter-op threads (0 lets the runtime decide)
    #[arg(long, default_value_t = 0)]
    pub inter_threads: usize,

    /// Graph optimization level
    #[arg(long, value_enum, default_value_t = OptimizationLevel::Level3)]
    pub optimization: OptimizationLevel,
}

impl AppConfig {
    pub fn artifact_paths(&self) -> ArtifactPaths {
        let mut paths = ArtifactPaths::new(&self.model, &self.tokenizer);
        if let Some(digest) = &self.model_sha256 {
            paths = paths.with_model_sha256(digest.clone());
        }
        if let Some(digest) = &self.tokenizer_sha256 {
            paths = paths.with_tokenizer_sha256(digest.clone());
        }
        paths
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            inter_threads: self.inter_threads,
            intra_threads: self.intra_threads,
            optimization_level: self.optimization,
        }
    }

    /// Returns a builder carrying every setting except the artifacts themselves.
    pub fn classifier_builder(&self) -> ClassifierBuilder {
        let mut builder = ClassifierBuilder::new()
            .with_runtime_config(self.runtime_config())
            .with_input_type(self.input_type)
            .with_max_sequence_length(self.max_len);
        if let Some(token) = &self.oov_token {
            builder = builder.with_oov_token(token.clone());
        }
        builder
    }

    /// Builds the classifier from the configured artifacts.
    pub fn load_classifier(&self) -> Result<crate::Classifier, ClassifierError> {
        self.classifier_builder()
            .with_artifacts(&self.artifact_paths())?
            .build()
    }
}
