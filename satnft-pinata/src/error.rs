use satnft_core::SatNftError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PinataError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("pinata api error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<PinataError> for SatNftError {
    fn from(value: PinataError) -> Self {
        match value {
            PinataError::Config(message) => SatNftError::Config(message),
            other => SatNftError::Publish(other.to_string()),
        }
    }
}
