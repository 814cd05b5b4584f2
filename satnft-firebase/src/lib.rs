//! Firebase realtime database integration for satnft.
//!
//! Environment variables commonly used:
//! - `FIREBASE_URL`
//! - `FIREBASE_SECRET`

mod client;
mod config;
mod error;

pub use client::FirebaseClient;
pub use config::{FirebaseClientBuilder, DEFAULT_TIMEOUT};
pub use error::FirebaseError;
