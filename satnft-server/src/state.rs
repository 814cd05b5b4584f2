use std::sync::Arc;

use satnft_core::{ArtifactStore, NftPipeline, TelemetrySource};
use satnft_firebase::FirebaseClient;
use satnft_pinata::PinataClient;

use crate::{AppConfig, ConfigError};

pub type SharedPipeline = NftPipeline<Arc<dyn TelemetrySource>, Arc<dyn ArtifactStore>>;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SharedPipeline>,
    pub ping_message: Arc<str>,
}

impl AppState {
    pub fn new(
        source: Arc<dyn TelemetrySource>,
        store: Arc<dyn ArtifactStore>,
        contract_address: impl Into<String>,
        ping_message: impl Into<String>,
    ) -> Self {
        Self {
            pipeline: Arc::new(NftPipeline::new(source, store, contract_address)),
            ping_message: Arc::from(ping_message.into()),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let firebase = FirebaseClient::builder()
            .base_url(config.firebase_url.clone())
            .secret(config.firebase_secret())
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| ConfigError::Client {
                name: "firebase",
                reason: err.to_string(),
            })?;

        let pinata = PinataClient::builder()
            .api_url(config.pinata_api_url.clone())
            .jwt(config.pinata_jwt())
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| ConfigError::Client {
                name: "pinata",
                reason: err.to_string(),
            })?;

        Ok(Self::new(
            Arc::new(firebase),
            Arc::new(pinata),
            config.contract_address.clone(),
            config.ping_message.clone(),
        ))
    }
}
