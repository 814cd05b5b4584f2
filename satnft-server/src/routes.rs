use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use satnft_core::{GenerationRequest, GenerationResult, SatNftError, TelemetryRecord};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub const GENERATE_NFT_PATH: &str = "/api/generate-nft";
pub const LATEST_RECORD_PATH: &str = "/api/satellite/latest";
pub const PING_PATH: &str = "/api/ping";

const MAX_BODY_BYTES: usize = 64 * 1024;
const LATEST_RECORD_FAILURE_MESSAGE: &str = "Failed to load satellite data";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(PING_PATH, get(ping))
        .route(LATEST_RECORD_PATH, get(latest_record))
        .route(GENERATE_NFT_PATH, post(generate_nft))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn ping(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "message": state.ping_message.as_ref() }))
}

async fn generate_nft(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> (StatusCode, Json<GenerationResult>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "rejected generation request");
            return (
                StatusCode::BAD_REQUEST,
                Json(GenerationResult::failure(
                    "Invalid generation request",
                    rejection.body_text(),
                )),
            );
        }
    };

    let outcome = state.pipeline.generate(&request).await;
    let status = match &outcome {
        Ok(_) => StatusCode::OK,
        Err(err) => {
            tracing::error!(error = %err, stage = err.stage(), "nft generation failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(GenerationResult::from_outcome(&outcome)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LatestRecordResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    satellite_data: Option<TelemetryRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn latest_record(
    State(state): State<AppState>,
) -> (StatusCode, Json<LatestRecordResponse>) {
    match state.pipeline.latest_record().await {
        Ok(record) => (
            StatusCode::OK,
            Json(LatestRecordResponse {
                success: true,
                message: None,
                satellite_data: Some(record),
                error: None,
            }),
        ),
        Err(err) => {
            let status = match err {
                SatNftError::NotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            tracing::warn!(error = %err, "failed to load latest telemetry record");
            (
                status,
                Json(LatestRecordResponse {
                    success: false,
                    message: Some(LATEST_RECORD_FAILURE_MESSAGE),
                    satellite_data: None,
                    error: Some(err.to_string()),
                }),
            )
        }
    }
}
