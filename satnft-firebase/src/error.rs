use satnft_core::SatNftError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FirebaseError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("firebase api error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<FirebaseError> for SatNftError {
    fn from(value: FirebaseError) -> Self {
        match value {
            FirebaseError::Config(message) => SatNftError::Config(message),
            other => SatNftError::Fetch(other.to_string()),
        }
    }
}
