//! API route handlers for the gateway.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::{Json, response::IntoResponse};
use serde::Deserialize;
use uuid::Uuid;

use saarthi_agent::GuidanceRequest;
use saarthi_core::error::SaarthiError;

use super::server::AppState;

/// HTTP status a Saarthi error surfaces as.
fn status_for(err: &SaarthiError) -> StatusCode {
    match err {
        // The engine's single in-flight slot is taken; the caller should
        // retry once the pending request resolves.
        SaarthiError::Busy => StatusCode::CONFLICT,
        // Upstream generation failed.
        SaarthiError::Provider(_) | SaarthiError::Http(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_body(err: &SaarthiError) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": false, "error": err.to_string() }))
}

/// Health check endpoint.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "saarthi-gateway",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// System information endpoint.
pub async fn system_info(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let uptime = state.start_time.elapsed();
    Json(serde_json::json!({
        "service": "saarthi",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": uptime.as_secs(),
        "provider": state.engine.provider_name(),
        "corpus_verses": state.engine.corpus().len(),
        "busy": state.engine.is_busy(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct MatchParams {
    /// The seeker's problem statement.
    #[serde(default)]
    pub q: String,
}

/// Retrieval preview: the verses the matcher would ground guidance in,
/// with no provider call.
pub async fn match_verses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MatchParams>,
) -> impl IntoResponse {
    match state.engine.find_verses(&params.q) {
        Ok(verses) => {
            let verses: Vec<_> = verses.into_iter().cloned().collect();
            (
                StatusCode::OK,
                Json(serde_json::json!({ "ok": true, "verses": verses })),
            )
        }
        Err(err) => (status_for(&err), error_body(&err)),
    }
}

#[derive(Debug, Deserialize)]
pub struct GuidanceBody {
    pub problem: String,
    #[serde(default)]
    pub language: String,
}

/// The guidance endpoint: retrieve, augment, generate.
pub async fn seek_guidance(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GuidanceBody>,
) -> impl IntoResponse {
    // Blank input never reaches the engine or claims its in-flight slot.
    if body.problem.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "ok": false, "error": "problem must not be empty" })),
        );
    }

    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, language = %body.language, "guidance request");

    let request = GuidanceRequest { problem: body.problem, language: body.language };
    match state.engine.seek_guidance(&request).await {
        Ok(response) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "ok": true,
                "guidance": response.guidance,
                "verses": response.verses,
                "model": response.model,
            })),
        ),
        Err(err) => {
            tracing::warn!(%request_id, error = %err, "guidance request failed");
            (status_for(&err), error_body(&err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saarthi_agent::GuidanceEngine;
    use saarthi_core::config::SaarthiConfig;

    fn state() -> Arc<AppState> {
        let engine = GuidanceEngine::new(&SaarthiConfig::default()).unwrap();
        Arc::new(AppState::new(Arc::new(engine)))
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&SaarthiError::Busy), StatusCode::CONFLICT);
        assert_eq!(
            status_for(&SaarthiError::Provider("boom".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&SaarthiError::InvalidCorpus("empty".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_health_check_shape() {
        let Json(body) = health_check().await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "saarthi-gateway");
    }

    #[tokio::test]
    async fn test_match_verses_returns_matches() {
        let response =
            match_verses(State(state()), Query(MatchParams { q: "anger and fear".into() }))
                .await
                .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_match_verses_empty_query_falls_back() {
        // No tokens → the general verse, still a 200 with one verse.
        let response = match_verses(State(state()), Query(MatchParams { q: String::new() }))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_guidance_rejects_blank_problem() {
        let body = GuidanceBody { problem: "   ".into(), language: String::new() };
        let response = seek_guidance(State(state()), Json(body)).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
