use super::state::AppState;
use crate::evaluate::{EvaluateError, EvaluationKind};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ToggleSessionRequest {
    /// Optional language override applied when this toggle starts a session
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeLanguageRequest {
    /// BCP-47 language tag (e.g. "en-US", "zh-CN")
    pub language: String,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    /// Which evaluation to run
    pub kind: EvaluationKind,

    /// Text to evaluate; defaults to the current session transcript
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub kind: EvaluationKind,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct PunctuateRequest {
    pub text: String,
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct PunctuateResponse {
    pub result: String,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    /// Committed text followed by the interim tail
    pub transcript: String,
    pub committed: String,
    pub interim: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /session/toggle
/// Start recognition when idle, stop it when active
pub async fn toggle_session(
    State(state): State<AppState>,
    body: Option<Json<ToggleSessionRequest>>,
) -> impl IntoResponse {
    let language = body.and_then(|Json(req)| req.language);

    let result = if state.session.is_active() {
        state.session.stop().await
    } else {
        state.session.start(language).await
    };

    if let Err(e) = result {
        error!("Failed to toggle session: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response();
    }

    (StatusCode::OK, Json(state.session.stats().await)).into_response()
}

/// POST /session/language
/// Switch recognition language; restarts the stream if one is active
pub async fn change_language(
    State(state): State<AppState>,
    Json(req): Json<ChangeLanguageRequest>,
) -> impl IntoResponse {
    info!("Switching recognition language to {}", req.language);

    match state.session.change_language(req.language).await {
        Ok(()) => (StatusCode::OK, Json(state.session.stats().await)).into_response(),
        Err(e) => {
            error!("Failed to change language: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /session/status
/// Current session statistics
pub async fn session_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.session.stats().await)
}

/// GET /session/transcript
/// Accumulated transcript (committed text plus interim tail)
pub async fn session_transcript(State(state): State<AppState>) -> impl IntoResponse {
    let transcript = state.session.transcript().await;

    Json(TranscriptResponse {
        transcript: transcript.display(),
        committed: transcript.committed().to_string(),
        interim: transcript.interim().to_string(),
    })
}

/// POST /evaluate
/// Run a text-quality evaluation over the given or current transcript
pub async fn evaluate(
    State(state): State<AppState>,
    Json(req): Json<EvaluateRequest>,
) -> impl IntoResponse {
    let text = match req.text {
        Some(text) => text,
        None => state.session.transcript().await.display(),
    };

    match state.dispatcher.evaluate(req.kind, &text).await {
        Ok(Some(result)) => (
            StatusCode::OK,
            Json(EvaluateResponse {
                kind: result.kind,
                text: result.text,
            }),
        )
            .into_response(),

        // A newer request took the result slot while this one was in flight.
        Ok(None) => StatusCode::NO_CONTENT.into_response(),

        Err(e @ EvaluateError::EmptyInput(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),

        Err(e) => {
            error!("Evaluation failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// POST /punctuate
/// Forward text to the completion API and return the punctuated result
pub async fn punctuate(
    State(state): State<AppState>,
    Json(req): Json<PunctuateRequest>,
) -> impl IntoResponse {
    match state.punctuation.punctuate(&req.text, &req.language).await {
        Ok(result) => (StatusCode::OK, Json(PunctuateResponse { result })).into_response(),
        Err(e) => {
            error!("Punctuation request failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
