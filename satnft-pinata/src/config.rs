use std::fmt;
use std::time::Duration;

use secrecy::SecretString;

use crate::{PinataClient, PinataError};

pub const DEFAULT_API_URL: &str = "https://api.pinata.cloud";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Default)]
pub struct PinataClientBuilder {
    api_url: Option<String>,
    jwt: Option<SecretString>,
    timeout: Option<Duration>,
}

impl fmt::Debug for PinataClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let jwt = if self.jwt.is_some() {
            "<redacted>"
        } else {
            "<none>"
        };

        f.debug_struct("PinataClientBuilder")
            .field("api_url", &self.api_url)
            .field("jwt", &jwt)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl PinataClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_url(mut self, value: impl Into<String>) -> Self {
        self.api_url = Some(value.into());
        self
    }

    pub fn jwt(mut self, value: impl Into<String>) -> Self {
        self.jwt = Some(SecretString::new(value.into()));
        self
    }

    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = Some(value);
        self
    }

    pub fn api_url_from_env(mut self, var_name: &str) -> Self {
        if let Ok(value) = std::env::var(var_name) {
            self.api_url = Some(value);
        }
        self
    }

    pub fn jwt_from_env(mut self, var_name: &str) -> Self {
        if let Ok(value) = std::env::var(var_name) {
            self.jwt = Some(SecretString::new(value));
        }
        self
    }

    pub fn build(self) -> Result<PinataClient, PinataError> {
        let jwt = self
            .jwt
            .ok_or_else(|| PinataError::Config("jwt is required".to_string()))?;
        let api_url = self
            .api_url
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        PinataClient::new(api_url, jwt, self.timeout.unwrap_or(DEFAULT_TIMEOUT))
    }
}
