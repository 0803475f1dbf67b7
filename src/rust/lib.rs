//! NervEase: an early mental-health screening form backed by an ONNX text classifier.
//!
//! The library loads a serialized classification model and tokenizer once,
//! classifies free text into one of six fixed classes and serves a
//! single-page web form around that operation.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use nervease::{ArtifactPaths, Classifier};
//!
//! let classifier = Classifier::builder()
//!     .with_max_sequence_length(100)
//!     .with_artifacts(&ArtifactPaths::new("model_LSTM_fin.onnx", "tokenizer.json"))?
//!     .build()?;
//!
//! let prediction = classifier.predict("Saya merasa cemas setiap malam")?;
//! println!("{}: {:.2}%", prediction.label, prediction.confidence);
//! println!("{}", prediction.recommendation);
//! # Ok(())
//! # }
//! ```
//!
//! # Serving the form
//!
//! ```rust,no_run
//! # async fn run(classifier: nervease::Classifier) -> std::io::Result<()> {
//! use nervease::web::{self, AppState};
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8501").await?;
//! web::serve(listener, AppState::new(classifier), web::shutdown_signal()).await
//! # }
//! ```

pub mod artifacts;
pub mod classifier;
pub mod config;
mod runtime;
pub mod web;

pub use artifacts::{ArtifactError, ArtifactPaths};
pub use classifier::{
    Classifier, ClassifierBuilder, ClassifierError, ClassifierInfo, InputType, Prediction, SequenceModel,
};
pub use classifier::labels::{CLASS_NAMES, NUM_CLASSES, RECOMMENDATIONS};
pub use config::AppConfig;
pub use runtime::{OptimizationLevel, RuntimeConfig, create_session_builder};

pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
