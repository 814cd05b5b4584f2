use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use satnft_core::{ArtifactStore, SatNftError};
use satnft_pinata::{PinataClient, PinataError};

// Kept ASCII so body matchers can inspect the multipart payload as text.
const PNG: &[u8] = b"fake-png-bytes";

fn client_for(server: &MockServer) -> PinataClient {
    PinataClient::builder()
        .api_url(server.uri())
        .jwt("test-jwt")
        .build()
        .unwrap()
}

#[tokio::test]
async fn pin_file_sends_bearer_multipart_upload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pinning/pinFileToIPFS"))
        .and(header("authorization", "Bearer test-jwt"))
        .and(body_string_contains(
            "filename=\"satellite-nft-1.png\"",
        ))
        .and(body_string_contains("image/png"))
        .and(body_string_contains("name=\"pinataMetadata\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "IpfsHash": "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG",
            "PinSize": 1234,
            "Timestamp": "2024-06-01T00:00:00.000Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pinned = client_for(&server)
        .pin_file(PNG.to_vec(), "satellite-nft-1.png")
        .await
        .unwrap();

    assert_eq!(
        pinned.locator(),
        "ipfs://QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
    );
    assert_eq!(pinned.pin_size, Some(1234));
    assert_eq!(pinned.timestamp.as_deref(), Some("2024-06-01T00:00:00.000Z"));
}

#[tokio::test]
async fn identical_uploads_are_not_deduplicated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pinning/pinFileToIPFS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"IpfsHash": "QmSame"})))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.pin_file(PNG.to_vec(), "a.png").await.unwrap();
    client.pin_file(PNG.to_vec(), "b.png").await.unwrap();
}

#[tokio::test]
async fn non_200_status_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pinning/pinFileToIPFS"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({
                "error": {"reason": "INVALID_CREDENTIALS", "details": "Invalid authentication"}
            })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .pin_file(PNG.to_vec(), "x.png")
        .await
        .unwrap_err();
    match err {
        PinataError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid authentication");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn other_success_statuses_are_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pinning/pinFileToIPFS"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"IpfsHash": "QmLater"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .pin(PNG.to_vec(), "x.png")
        .await
        .unwrap_err();
    assert!(matches!(err, SatNftError::Publish(_)));
    assert!(err.to_string().contains("202"));
}

#[tokio::test]
async fn missing_hash_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pinning/pinFileToIPFS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"PinSize": 10})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .pin_file(PNG.to_vec(), "x.png")
        .await
        .unwrap_err();
    assert!(matches!(err, PinataError::Malformed(_)));
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    let client = PinataClient::builder()
        .api_url("http://127.0.0.1:1")
        .jwt("test-jwt")
        .build()
        .unwrap();
    let err = client.pin_file(PNG.to_vec(), "x.png").await.unwrap_err();
    assert!(matches!(err, PinataError::Transport(_)));
}

#[tokio::test]
async fn slow_pinning_service_hits_request_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pinning/pinFileToIPFS"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"IpfsHash": "QmSlow", "PinSize": 1}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = PinataClient::builder()
        .api_url(server.uri())
        .jwt("test-jwt")
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let err = client.pin_file(PNG.to_vec(), "x.png").await.unwrap_err();
    assert!(matches!(err, PinataError::Transport(_)));

    let err = ArtifactStore::pin(&client, PNG.to_vec(), "x.png").await.unwrap_err();
    assert!(matches!(err, SatNftError::Publish(_)));
}
