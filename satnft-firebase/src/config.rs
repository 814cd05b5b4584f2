use std::fmt;
use std::time::Duration;

use secrecy::SecretString;

use crate::{FirebaseClient, FirebaseError};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Default)]
pub struct FirebaseClientBuilder {
    base_url: Option<String>,
    secret: Option<SecretString>,
    timeout: Option<Duration>,
}

impl fmt::Debug for FirebaseClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secret = if self.secret.is_some() {
            "<redacted>"
        } else {
            "<none>"
        };

        f.debug_struct("FirebaseClientBuilder")
            .field("base_url", &self.base_url)
            .field("secret", &secret)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl FirebaseClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, value: impl Into<String>) -> Self {
        self.base_url = Some(value.into());
        self
    }

    pub fn secret(mut self, value: impl Into<String>) -> Self {
        self.secret = Some(SecretString::new(value.into()));
        self
    }

    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = Some(value);
        self
    }

    pub fn base_url_from_env(mut self, var_name: &str) -> Self {
        if let Ok(value) = std::env::var(var_name) {
            self.base_url = Some(value);
        }
        self
    }

    pub fn secret_from_env(mut self, var_name: &str) -> Self {
        if let Ok(value) = std::env::var(var_name) {
            self.secret = Some(SecretString::new(value));
        }
        self
    }

    pub fn build(self) -> Result<FirebaseClient, FirebaseError> {
        let base_url = self
            .base_url
            .ok_or_else(|| FirebaseError::Config("base_url is required".to_string()))?;
        let secret = self
            .secret
            .ok_or_else(|| FirebaseError::Config("secret is required".to_string()))?;

        FirebaseClient::new(base_url, secret, self.timeout.unwrap_or(DEFAULT_TIMEOUT))
    }
}
