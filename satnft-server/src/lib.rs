//! HTTP entry point for satellite telemetry NFT generation.

mod config;
pub mod logging;
pub mod routes;
mod state;

pub use config::{AppConfig, ConfigError, ServerArgs};
pub use routes::router;
pub use state::{AppState, SharedPipeline};
