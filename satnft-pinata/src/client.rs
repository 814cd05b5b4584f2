use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use satnft_core::{ArtifactStore, PinnedArtifact, SatNftError};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::Instrument;

use crate::types::{PinFileResponse, PinataMetadata};
use crate::{PinataClientBuilder, PinataError};

const PIN_FILE_PATH: &str = "/pinning/pinFileToIPFS";
const PNG_MIME: &str = "image/png";

#[derive(Clone)]
pub struct PinataClient {
    http: Client,
    api_url: String,
    jwt: SecretString,
}

impl fmt::Debug for PinataClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinataClient")
            .field("api_url", &self.api_url)
            .field("jwt", &"<redacted>")
            .finish()
    }
}

impl PinataClient {
    pub fn builder() -> PinataClientBuilder {
        PinataClientBuilder::new()
    }

    pub fn new(api_url: String, jwt: SecretString, timeout: Duration) -> Result<Self, PinataError> {
        if jwt.expose_secret().trim().is_empty() {
            return Err(PinataError::Config("jwt cannot be empty".to_string()));
        }

        reqwest::Url::parse(&api_url)
            .map_err(|err| PinataError::Config(format!("invalid api_url: {err}")))?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PinataError::Config(format!("failed to build http client: {err}")))?;

        Ok(Self { http, api_url, jwt })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Uploads one PNG in a single attempt.
    ///
    /// Only HTTP 200 counts as success; the response must carry `IpfsHash`.
    pub async fn pin_file(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<PinnedArtifact, PinataError> {
        let url = format!("{}{}", self.api_url.trim_end_matches('/'), PIN_FILE_PATH);
        let size = bytes.len();

        let file = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(PNG_MIME)
            .map_err(|err| PinataError::Config(err.to_string()))?;
        let metadata = serde_json::to_string(&PinataMetadata { name: file_name })
            .map_err(|err| PinataError::Config(err.to_string()))?;
        let form = Form::new()
            .part("file", file)
            .text("pinataMetadata", metadata);

        tracing::debug!(file_name = %file_name, size, "uploading artifact to pinata");
        let response = self
            .http
            .post(url)
            .bearer_auth(self.jwt.expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(|err| PinataError::Transport(err.without_url().to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(PinataError::Api {
                status: status.as_u16(),
                message: pinata_error_message(&body),
            });
        }

        let body = response
            .json::<PinFileResponse>()
            .await
            .map_err(|err| PinataError::Malformed(err.to_string()))?;
        let content_address = body
            .ipfs_hash
            .filter(|hash| !hash.trim().is_empty())
            .ok_or_else(|| PinataError::Malformed("response missing 'IpfsHash'".to_string()))?;

        Ok(PinnedArtifact {
            content_address,
            pin_size: body.pin_size,
            timestamp: body.timestamp,
        })
    }
}

// Pinata reports errors either as a bare string or as `{ reason, details }`.
fn pinata_error_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "unknown pinata error".to_string();
    }

    let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
        return trimmed.to_string();
    };
    match value.get("error") {
        Some(Value::String(message)) => message.clone(),
        Some(Value::Object(detail)) => detail
            .get("details")
            .or_else(|| detail.get("reason"))
            .and_then(Value::as_str)
            .unwrap_or("unknown pinata error")
            .to_string(),
        _ => value
            .get("message")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| trimmed.to_string()),
    }
}

#[async_trait]
impl ArtifactStore for PinataClient {
    async fn pin(&self, bytes: Vec<u8>, file_name: &str) -> Result<PinnedArtifact, SatNftError> {
        self.pin_file(bytes, file_name)
            .instrument(tracing::info_span!("pinata_pin_file", file_name = %file_name))
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "failed to upload artifact to pinata");
                SatNftError::from(err)
            })
    }
}
