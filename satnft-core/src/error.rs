use thiserror::Error;

#[derive(Debug, Error)]
pub enum SatNftError {
    #[error("No telemetry data found: {0}")]
    NotFound(String),
    #[error("Failed to fetch telemetry data: {0}")]
    Fetch(String),
    #[error("Failed to generate QR code: {0}")]
    Encoding(String),
    #[error("Failed to publish artifact: {0}")]
    Publish(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SatNftError {
    /// Name of the pipeline stage that produced the error.
    pub fn stage(&self) -> &'static str {
        match self {
            SatNftError::NotFound(_) | SatNftError::Fetch(_) => "select",
            SatNftError::Encoding(_) => "encode",
            SatNftError::Publish(_) => "publish",
            SatNftError::Config(_) => "config",
        }
    }
}

impl From<qrcode::types::QrError> for SatNftError {
    fn from(err: qrcode::types::QrError) -> Self {
        SatNftError::Encoding(err.to_string())
    }
}

impl From<image::ImageError> for SatNftError {
    fn from(err: image::ImageError) -> Self {
        SatNftError::Encoding(err.to_string())
    }
}
