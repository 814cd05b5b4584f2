//! Wallet bridge over an injected EIP-1193 provider.
//!
//! The bridge never signs or sends transactions; it only tracks which account
//! is connected and keeps the wallet on the expected Avalanche network.

mod bridge;
mod chain;
mod error;
mod provider;

pub use bridge::{WalletBridge, WalletState};
pub use chain::{ChainParams, NativeCurrency};
pub use error::{ProviderRpcError, WalletError, UNRECOGNIZED_CHAIN, USER_REJECTED};
pub use provider::{Listener, Subscription, SubscriptionId, WalletEvent, WalletProvider};
