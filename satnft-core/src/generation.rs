use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::{SatNftError, TelemetryRecord};

pub const SUCCESS_MESSAGE: &str = "Satellite NFT generated successfully!";
pub const FAILURE_MESSAGE: &str = "Failed to generate satellite NFT";

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";
const IPFS_SCHEME: &str = "ipfs://";

/// Caller intent. None of the fields are checked against a ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub transaction_hash: String,
    pub wallet_address: String,
    pub amount: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinnedArtifact {
    pub content_address: String,
    pub pin_size: Option<u64>,
    pub timestamp: Option<String>,
}

impl PinnedArtifact {
    pub fn new(content_address: impl Into<String>) -> Self {
        Self {
            content_address: content_address.into(),
            pin_size: None,
            timestamp: None,
        }
    }

    pub fn locator(&self) -> String {
        format!("{IPFS_SCHEME}{}", self.content_address)
    }
}

#[derive(Clone, Debug)]
pub struct GeneratedArtifact {
    pub record: TelemetryRecord,
    pub png: Vec<u8>,
    pub pinned: PinnedArtifact,
    pub contract_address: String,
}

impl GeneratedArtifact {
    pub fn qr_code_data_url(&self) -> String {
        format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(&self.png))
    }
}

/// Response envelope returned to the caller for both outcomes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipfs_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satellite_data: Option<TelemetryRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResult {
    pub fn success(artifact: &GeneratedArtifact) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            qr_code_url: Some(artifact.qr_code_data_url()),
            ipfs_url: Some(artifact.pinned.locator()),
            satellite_data: Some(artifact.record.clone()),
            contract_address: Some(artifact.contract_address.clone()),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            qr_code_url: None,
            ipfs_url: None,
            satellite_data: None,
            contract_address: None,
            error: Some(error.into()),
        }
    }

    pub fn from_outcome(outcome: &Result<GeneratedArtifact, SatNftError>) -> Self {
        match outcome {
            Ok(artifact) => Self::success(artifact),
            Err(err) => Self::failure(FAILURE_MESSAGE, err.to_string()),
        }
    }
}
