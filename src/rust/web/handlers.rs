use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::{Form, Json};
use serde::Deserialize;

use super::error::{WebError, EMPTY_INPUT_WARNING};
use super::page::{self, Outcome, PageView};
use super::AppState;
use crate::classifier::{ClassifierInfo, Prediction};

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub text: String,
}

pub async fn index() -> Html<String> {
    Html(page::render(&PageView::default()))
}

/// Form submission: validates, classifies and re-renders the page with the outcome.
pub async fn submit(
    State(state): State<AppState>,
    Form(request): Form<PredictRequest>,
) -> (StatusCode, Html<String>) {
    let outcome = match predict(&state, &request.text).await {
        Ok(prediction) => Outcome::Result(prediction),
        Err(WebError::EmptyInput) => Outcome::Warning(EMPTY_INPUT_WARNING.to_string()),
        Err(e) => {
            log::error!("Prediction failed: {}", e);
            let view = PageView::with_outcome(request.text, Outcome::Failure(e.to_string()));
            return (e.status(), Html(page::render(&view)));
        }
    };
    let view = PageView::with_outcome(request.text, outcome);
    (StatusCode::OK, Html(page::render(&view)))
}

pub async fn api_predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<Prediction>, WebError> {
    predict(&state, &request.text).await.map(Json)
}

pub async fn health(State(state): State<AppState>) -> Json<ClassifierInfo> {
    Json(state.classifier.info())
}

/// Runs one prediction on the blocking pool. Empty input is rejected before
/// the classifier is touched.
async fn predict(state: &AppState, text: &str) -> Result<Prediction, WebError> {
    if text.trim().is_empty() {
        log::info!("Rejected empty submission");
        return Err(WebError::EmptyInput);
    }

    let classifier = Arc::clone(&state.classifier);
    let text = text.to_string();
    let prediction = tokio::task::spawn_blocking(move || classifier.predict(&text)).await??;

    log::info!("Predicted '{}' ({:.2}%)", prediction.label, prediction.confidence);
    Ok(prediction)
}
