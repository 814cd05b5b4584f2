use chrono::Utc;
use tracing::Instrument;

use crate::encoder::encode_record;
use crate::{
    ArtifactStore, GeneratedArtifact, GenerationRequest, LatestRecordSelector, SatNftError,
    TelemetryRecord, TelemetrySource,
};

/// Runs select, encode and publish in strict sequence.
///
/// Nothing is retried. Publishing is the last fallible step, so a pinned
/// artifact is never orphaned by a later failure.
pub struct NftPipeline<S, A> {
    selector: LatestRecordSelector<S>,
    store: A,
    contract_address: String,
}

impl<S, A> NftPipeline<S, A>
where
    S: TelemetrySource,
    A: ArtifactStore,
{
    pub fn new(source: S, store: A, contract_address: impl Into<String>) -> Self {
        Self {
            selector: LatestRecordSelector::new(source),
            store,
            contract_address: contract_address.into(),
        }
    }

    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }

    pub async fn latest_record(&self) -> Result<TelemetryRecord, SatNftError> {
        self.selector
            .latest()
            .instrument(tracing::info_span!("select_latest_record"))
            .await
    }

    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedArtifact, SatNftError> {
        tracing::info!(
            transaction_hash = %request.transaction_hash,
            wallet_address = %request.wallet_address,
            amount = %request.amount,
            "starting nft generation"
        );

        let record = self.latest_record().await?;
        tracing::info!(timestamp = %record.timestamp, "selected telemetry record");

        let png = tracing::info_span!("encode_qr_code").in_scope(|| encode_record(&record))?;

        let file_name = artifact_file_name(Utc::now().timestamp_millis());
        let pinned = self
            .store
            .pin(png.clone(), &file_name)
            .instrument(tracing::info_span!("publish_artifact", file_name = %file_name))
            .await?;
        tracing::info!(locator = %pinned.locator(), "nft generation completed");

        Ok(GeneratedArtifact {
            record,
            png,
            pinned,
            contract_address: self.contract_address.clone(),
        })
    }
}

pub fn artifact_file_name(unix_millis: i64) -> String {
    format!("satellite-nft-{unix_millis}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_embeds_millis() {
        assert_eq!(
            artifact_file_name(1_717_200_000_123),
            "satellite-nft-1717200000123.png"
        );
    }
}
