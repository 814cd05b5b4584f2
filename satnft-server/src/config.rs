use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {0} must be set")]
    Missing(&'static str),
    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
    #[error("failed to initialise {name} client: {reason}")]
    Client { name: &'static str, reason: String },
}

/// Command line flags, each of which can also come from the environment.
#[derive(Clone, Parser)]
#[command(
    name = "satnft-server",
    version,
    about = "Serves satellite telemetry NFT generation over HTTP"
)]
pub struct ServerArgs {
    /// Realtime database path holding the telemetry tree.
    #[arg(long, env = "FIREBASE_URL")]
    pub firebase_url: String,
    #[arg(long, env = "FIREBASE_SECRET", hide_env_values = true)]
    pub firebase_secret: String,
    #[arg(long, env = "PINATA_JWT", hide_env_values = true)]
    pub pinata_jwt: String,
    /// Echoed back to callers; no contract call is made.
    #[arg(long, env = "NFT_CONTRACT_ADDRESS")]
    pub contract_address: String,
    #[arg(long, env = "PINATA_API_URL", default_value = satnft_pinata::DEFAULT_API_URL)]
    pub pinata_api_url: String,
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,
    /// Timeout applied to each outbound request.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,
    #[arg(long, env = "PING_MESSAGE", default_value = "ping")]
    pub ping_message: String,
}

/// Validated startup configuration, passed explicitly to whatever needs it.
#[derive(Clone)]
pub struct AppConfig {
    pub firebase_url: String,
    pub firebase_secret: SecretString,
    pub pinata_jwt: SecretString,
    pub pinata_api_url: String,
    pub contract_address: String,
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
    pub ping_message: String,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("firebase_url", &self.firebase_url)
            .field("firebase_secret", &"<redacted>")
            .field("pinata_jwt", &"<redacted>")
            .field("pinata_api_url", &self.pinata_api_url)
            .field("contract_address", &self.contract_address)
            .field("bind_addr", &self.bind_addr)
            .field("request_timeout", &self.request_timeout)
            .field("ping_message", &self.ping_message)
            .finish()
    }
}

impl TryFrom<ServerArgs> for AppConfig {
    type Error = ConfigError;

    fn try_from(args: ServerArgs) -> Result<Self, Self::Error> {
        let firebase_url = required("FIREBASE_URL", args.firebase_url)?;
        let firebase_secret = required("FIREBASE_SECRET", args.firebase_secret)?;
        let pinata_jwt = required("PINATA_JWT", args.pinata_jwt)?;
        let contract_address = required("NFT_CONTRACT_ADDRESS", args.contract_address)?;

        validate_url("FIREBASE_URL", &firebase_url)?;
        validate_url("PINATA_API_URL", &args.pinata_api_url)?;

        if args.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "REQUEST_TIMEOUT_SECS",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Self {
            firebase_url,
            firebase_secret: SecretString::new(firebase_secret),
            pinata_jwt: SecretString::new(pinata_jwt),
            pinata_api_url: args.pinata_api_url,
            contract_address,
            bind_addr: args.bind_addr,
            request_timeout: Duration::from_secs(args.request_timeout_secs),
            ping_message: args.ping_message,
        })
    }
}

impl AppConfig {
    pub fn firebase_secret(&self) -> &str {
        self.firebase_secret.expose_secret()
    }

    pub fn pinata_jwt(&self) -> &str {
        self.pinata_jwt.expose_secret()
    }
}

fn required(name: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Missing(name));
    }
    Ok(trimmed.to_string())
}

fn validate_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    match value.parse::<axum::http::Uri>() {
        Ok(uri) if uri.scheme().is_some() && uri.host().is_some() => Ok(()),
        Ok(_) => Err(ConfigError::Invalid {
            name,
            reason: format!("'{value}' is not an absolute URL"),
        }),
        Err(err) => Err(ConfigError::Invalid {
            name,
            reason: err.to_string(),
        }),
    }
}
