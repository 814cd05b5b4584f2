use async_trait::async_trait;
use serde_json::Value;

use crate::{PinnedArtifact, SatNftError};

/// Remote store holding the raw telemetry tree.
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Fetches the whole document. `Ok(None)` means the store is empty.
    async fn fetch_document(&self) -> Result<Option<Value>, SatNftError>;
}

/// Content-addressed storage for rendered artifacts.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn pin(&self, bytes: Vec<u8>, file_name: &str) -> Result<PinnedArtifact, SatNftError>;
}

#[async_trait]
impl<T> TelemetrySource for std::sync::Arc<T>
where
    T: TelemetrySource + ?Sized,
{
    async fn fetch_document(&self) -> Result<Option<Value>, SatNftError> {
        (**self).fetch_document().await
    }
}

#[async_trait]
impl<T> ArtifactStore for std::sync::Arc<T>
where
    T: ArtifactStore + ?Sized,
{
    async fn pin(&self, bytes: Vec<u8>, file_name: &str) -> Result<PinnedArtifact, SatNftError> {
        (**self).pin(bytes, file_name).await
    }
}
