use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use satnft_core::{ArtifactStore, PinnedArtifact, SatNftError, TelemetrySource};
use satnft_server::{router, AppState};

struct FixedSource(Option<Value>);

#[async_trait]
impl TelemetrySource for FixedSource {
    async fn fetch_document(&self) -> Result<Option<Value>, SatNftError> {
        Ok(self.0.clone())
    }
}

struct FixedStore(Result<&'static str, &'static str>);

#[async_trait]
impl ArtifactStore for FixedStore {
    async fn pin(&self, _bytes: Vec<u8>, _file_name: &str) -> Result<PinnedArtifact, SatNftError> {
        match self.0 {
            Ok(hash) => Ok(PinnedArtifact::new(hash)),
            Err(message) => Err(SatNftError::Publish(message.to_string())),
        }
    }
}

fn telemetry() -> Value {
    json!({
        "a": {"timestamp": "2024-01-01T00:00:00Z", "temperature": 20, "humidity": 50, "light": 100, "air_quality": 5},
        "b": {"timestamp": "2024-06-01T00:00:00Z", "temperature": 25, "humidity": 40, "light": 200, "air_quality": 8}
    })
}

fn state(source: Option<Value>, store: Result<&'static str, &'static str>) -> AppState {
    AppState::new(
        Arc::new(FixedSource(source)),
        Arc::new(FixedStore(store)),
        "0xContract",
        "pong",
    )
}

fn generate_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/generate-nft")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

const VALID_BODY: &str = r#"{"transactionHash":"0xtx","walletAddress":"0xwallet","amount":"0.1"}"#;

#[tokio::test]
async fn generate_returns_success_envelope() {
    let (status, body) = send(
        state(Some(telemetry()), Ok("QmHash")),
        generate_request(VALID_BODY),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Satellite NFT generated successfully!"));
    assert!(body["qrCodeUrl"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));
    assert_eq!(body["ipfsUrl"], json!("ipfs://QmHash"));
    assert_eq!(body["contractAddress"], json!("0xContract"));
    assert_eq!(body["satelliteData"]["timestamp"], json!("2024-06-01T00:00:00Z"));
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn publish_failure_returns_500_without_locator() {
    let (status, body) = send(
        state(Some(telemetry()), Err("pinata api error 403: forbidden")),
        generate_request(VALID_BODY),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Failed to generate satellite NFT"));
    assert!(body["error"].as_str().unwrap().contains("403"));
    assert!(body.get("ipfsUrl").is_none());
    assert!(body.get("qrCodeUrl").is_none());
    assert!(body.get("satelliteData").is_none());
}

#[tokio::test]
async fn empty_store_returns_500_failure_envelope() {
    let (status, body) = send(
        state(Some(json!({})), Ok("QmHash")),
        generate_request(VALID_BODY),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("No telemetry data found"));
}

#[tokio::test]
async fn missing_fields_return_400_failure_envelope() {
    let (status, body) = send(
        state(Some(telemetry()), Ok("QmHash")),
        generate_request(r#"{"walletAddress":"0xwallet"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("transactionHash"));
}

#[tokio::test]
async fn latest_record_route_echoes_selected_record() {
    let request = Request::builder()
        .uri("/api/satellite/latest")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(state(Some(telemetry()), Ok("QmHash")), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["satelliteData"]["temperature"], json!(25));
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn latest_record_route_is_404_when_store_is_empty() {
    let request = Request::builder()
        .uri("/api/satellite/latest")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(state(None, Ok("QmHash")), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Failed to load satellite data"));
    assert!(body["error"].as_str().unwrap().starts_with("No telemetry data found"));
    assert!(body.get("satelliteData").is_none());
}

#[tokio::test]
async fn ping_returns_configured_message() {
    let request = Request::builder().uri("/api/ping").body(Body::empty()).unwrap();
    let (status, body) = send(state(None, Ok("QmHash")), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "pong"}));
}
