use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use satnft_core::{SatNftError, TelemetrySource};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::Instrument;

use crate::{FirebaseClientBuilder, FirebaseError};

/// REST client for a Firebase realtime database path.
///
/// `base_url` names the node to read, e.g.
/// `https://project-default-rtdb.firebaseio.com/satellite`; the client appends
/// `.json` and authenticates with the database secret as the `auth` query
/// parameter.
#[derive(Clone)]
pub struct FirebaseClient {
    http: Client,
    base_url: String,
    document_url: String,
    secret: SecretString,
}

impl fmt::Debug for FirebaseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirebaseClient")
            .field("base_url", &self.base_url)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl FirebaseClient {
    pub fn builder() -> FirebaseClientBuilder {
        FirebaseClientBuilder::new()
    }

    pub fn new(
        base_url: String,
        secret: SecretString,
        timeout: Duration,
    ) -> Result<Self, FirebaseError> {
        if secret.expose_secret().trim().is_empty() {
            return Err(FirebaseError::Config("secret cannot be empty".to_string()));
        }

        let parsed = reqwest::Url::parse(&base_url)
            .map_err(|err| FirebaseError::Config(format!("invalid base_url: {err}")))?;
        let document_url = document_url(&base_url, parsed.path());

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| FirebaseError::Config(format!("failed to build http client: {err}")))?;

        Ok(Self {
            http,
            base_url,
            document_url,
            secret,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Reads the whole subtree. A JSON `null` body means the path is empty.
    pub async fn read_document(&self) -> Result<Option<Value>, FirebaseError> {
        let response = self
            .http
            .get(self.document_url.as_str())
            .query(&[("auth", self.secret.expose_secret())])
            .send()
            .await
            .map_err(|err| FirebaseError::Transport(err.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response
                .json::<Value>()
                .await
                .unwrap_or_else(|_| Value::String(String::new()));
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown firebase error")
                .to_string();
            return Err(FirebaseError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let document = response
            .json::<Value>()
            .await
            .map_err(|err| FirebaseError::Malformed(err.without_url().to_string()))?;

        Ok(match document {
            Value::Null => None,
            other => Some(other),
        })
    }
}

// The database root reads as `/.json`; any other node as `<path>.json`.
fn document_url(base_url: &str, path: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if path.trim_matches('/').is_empty() {
        format!("{trimmed}/.json")
    } else {
        format!("{trimmed}.json")
    }
}

#[async_trait]
impl TelemetrySource for FirebaseClient {
    async fn fetch_document(&self) -> Result<Option<Value>, SatNftError> {
        self.read_document()
            .instrument(tracing::info_span!("firebase_fetch", base_url = %self.base_url))
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "failed to fetch telemetry document");
                SatNftError::from(err)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_url_reads_root_document() {
        assert_eq!(
            document_url("https://x.firebaseio.com/", "/"),
            "https://x.firebaseio.com/.json"
        );
        assert_eq!(
            document_url("https://x.firebaseio.com", "/"),
            "https://x.firebaseio.com/.json"
        );
    }

    #[test]
    fn node_url_gets_json_suffix() {
        assert_eq!(
            document_url("https://x.firebaseio.com/satellite/", "/satellite/"),
            "https://x.firebaseio.com/satellite.json"
        );
        assert_eq!(
            document_url("https://x.firebaseio.com/a/b", "/a/b"),
            "https://x.firebaseio.com/a/b.json"
        );
    }
}
