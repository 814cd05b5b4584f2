//! Pinata IPFS pinning integration for satnft.
//!
//! Environment variables commonly used:
//! - `PINATA_JWT`
//! - `PINATA_API_URL` (optional, defaults to `https://api.pinata.cloud`)

mod client;
mod config;
mod error;
mod types;

pub use client::PinataClient;
pub use config::{PinataClientBuilder, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use error::PinataError;
