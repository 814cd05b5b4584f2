use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::ProviderRpcError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WalletEvent {
    AccountsChanged,
    ChainChanged,
}

impl WalletEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletEvent::AccountsChanged => "accountsChanged",
            WalletEvent::ChainChanged => "chainChanged",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

pub type Listener = Arc<dyn Fn(Value) + Send + Sync>;

/// The wallet capability handed to the bridge, typically an EIP-1193
/// provider injected by a browser extension.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderRpcError>;
    fn subscribe(&self, event: WalletEvent, listener: Listener) -> SubscriptionId;
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Listener registration that is removed when the handle is dropped.
pub struct Subscription {
    provider: Arc<dyn WalletProvider>,
    event: WalletEvent,
    id: SubscriptionId,
}

impl Subscription {
    pub fn new(provider: Arc<dyn WalletProvider>, event: WalletEvent, listener: Listener) -> Self {
        let id = provider.subscribe(event, listener);
        Self {
            provider,
            event,
            id,
        }
    }

    pub fn event(&self) -> WalletEvent {
        self.event
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("event", &self.event)
            .field("id", &self.id)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        tracing::debug!(
            event = self.event.as_str(),
            id = self.id.0,
            "unsubscribing wallet listener"
        );
        self.provider.unsubscribe(self.id);
    }
}
