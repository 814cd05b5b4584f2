//! Core types for turning satellite telemetry into pinned QR-code artifacts.
//!
//! The pipeline is provider-agnostic: the telemetry store and the pinning
//! service are reached through [`TelemetrySource`] and [`ArtifactStore`],
//! implemented by the `satnft-firebase` and `satnft-pinata` crates.

pub mod encoder;
mod error;
mod generation;
pub mod pipeline;
mod provider;
mod record;
pub mod selector;

pub use encoder::{canonical_payload, encode_record, render_png, QrRenderOptions};
pub use error::SatNftError;
pub use generation::{
    GeneratedArtifact, GenerationRequest, GenerationResult, PinnedArtifact, FAILURE_MESSAGE,
    SUCCESS_MESSAGE,
};
pub use pipeline::NftPipeline;
pub use provider::{ArtifactStore, TelemetrySource};
pub use record::TelemetryRecord;
pub use selector::{select_latest, LatestRecordSelector, Node};
