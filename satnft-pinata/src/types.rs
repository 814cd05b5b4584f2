use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize)]
pub struct PinataMetadata<'a> {
    pub name: &'a str,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PinFileResponse {
    #[serde(default)]
    pub ipfs_hash: Option<String>,
    #[serde(default)]
    pub pin_size: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}
