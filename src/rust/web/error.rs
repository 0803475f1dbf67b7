use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::classifier::ClassifierError;

/// Warning shown when the submitted text is empty or whitespace only.
pub const EMPTY_INPUT_WARNING: &str = "Masukkan tidak boleh kosong.";

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("{}", EMPTY_INPUT_WARNING)]
    EmptyInput,
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error("Inference task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::EmptyInput | Self::Classifier(ClassifierError::ValidationError(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
