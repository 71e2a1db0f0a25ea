use super::types::{
    ANALYZE_ERROR_MESSAGE, ASK_ERROR_MESSAGE, AnalyzeRequest, AskRequest, AssistResponse,
};
use crate::{
    Error, Result, data_url,
    llm::{GenerateRequest, ModelClient},
    prompts,
};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, Json},
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn ModelClient>,
}

impl AppState {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self { model }
    }
}

type Reply = (StatusCode, Json<AssistResponse>);

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> &'static str {
    "OK"
}

/// Describes the scene in a camera frame. Every failure, whatever its cause,
/// becomes the same fixed 500 reply.
pub async fn analyze(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Reply {
    let request_id = Uuid::new_v4();
    info!(%request_id, "Received analyze request");

    match describe_scene(&state, payload).await {
        Ok(response) => {
            info!(%request_id, "Analysis complete");
            (StatusCode::OK, Json(AssistResponse::new(response)))
        }
        Err(e) => {
            error!(%request_id, "Analysis failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AssistResponse::new(ANALYZE_ERROR_MESSAGE)),
            )
        }
    }
}

pub async fn ask(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AskRequest>, JsonRejection>,
) -> Reply {
    let request_id = Uuid::new_v4();
    info!(%request_id, "Received ask request");

    match answer_question(&state, payload).await {
        Ok(response) => {
            info!(%request_id, "Question answered");
            (StatusCode::OK, Json(AssistResponse::new(response)))
        }
        Err(e) => {
            error!(%request_id, "Ask failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AssistResponse::new(ASK_ERROR_MESSAGE)),
            )
        }
    }
}

async fn describe_scene(
    state: &AppState,
    payload: std::result::Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<String> {
    let Json(request) = payload.map_err(|e| Error::invalid_request(e.body_text()))?;
    let image = data_url::decode_image_blocking(request.image).await?;

    let reply = state
        .model
        .generate(GenerateRequest::with_image(prompts::SCENE_PROMPT, image))
        .await?;

    Ok(reply.trim().to_string())
}

async fn answer_question(
    state: &AppState,
    payload: std::result::Result<Json<AskRequest>, JsonRejection>,
) -> Result<String> {
    let Json(request) = payload.map_err(|e| Error::invalid_request(e.body_text()))?;

    let reply = state
        .model
        .generate(GenerateRequest::text(prompts::question_prompt(&request.query)))
        .await?;

    Ok(reply.trim().to_string())
}
