use std::sync::{Arc, PoisonError, RwLock};

use serde_json::{json, Value};

use crate::{
    ChainParams, Listener, Subscription, WalletError, WalletEvent, WalletProvider,
    UNRECOGNIZED_CHAIN,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalletState {
    pub address: Option<String>,
    pub chain_id: Option<String>,
    pub last_error: Option<String>,
}

/// Connection state over an injected wallet provider.
///
/// Listeners registered on connect live exactly as long as the bridge stays
/// connected; `disconnect` and `Drop` release them. A failed `connect` also
/// drops any earlier connection, leaving only `last_error` set.
pub struct WalletBridge {
    provider: Arc<dyn WalletProvider>,
    chain: ChainParams,
    state: Arc<RwLock<WalletState>>,
    subscriptions: Vec<Subscription>,
}

impl WalletBridge {
    pub fn new(provider: Arc<dyn WalletProvider>, chain: ChainParams) -> Self {
        Self {
            provider,
            chain,
            state: Arc::new(RwLock::new(WalletState::default())),
            subscriptions: Vec::new(),
        }
    }

    pub fn chain(&self) -> &ChainParams {
        &self.chain
    }

    pub fn state(&self) -> WalletState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn address(&self) -> Option<String> {
        self.state().address
    }

    pub fn is_connected(&self) -> bool {
        self.state().address.is_some()
    }

    pub async fn connect(&mut self) -> Result<String, WalletError> {
        match self.try_connect().await {
            Ok(address) => Ok(address),
            Err(err) => {
                tracing::warn!(error = %err, "wallet connection failed");
                self.subscriptions.clear();
                self.update(|state| {
                    *state = WalletState {
                        last_error: Some(err.to_string()),
                        ..WalletState::default()
                    }
                });
                Err(err)
            }
        }
    }

    async fn try_connect(&mut self) -> Result<String, WalletError> {
        let accounts = self
            .provider
            .request("eth_requestAccounts", json!([]))
            .await?;
        let address = first_account(&accounts)?.ok_or(WalletError::NoAccounts)?;

        self.ensure_chain().await?;
        self.listen();

        let chain_id = self.chain.chain_id.clone();
        self.update(|state| {
            state.address = Some(address.clone());
            state.chain_id = Some(chain_id);
            state.last_error = None;
        });
        tracing::info!(address = %address, chain_id = %self.chain.chain_id, "wallet connected");
        Ok(address)
    }

    async fn ensure_chain(&self) -> Result<(), WalletError> {
        let switch_params = json!([{ "chainId": self.chain.chain_id }]);
        match self
            .provider
            .request("wallet_switchEthereumChain", switch_params.clone())
            .await
        {
            Ok(_) => Ok(()),
            Err(err) if err.code == UNRECOGNIZED_CHAIN => {
                tracing::info!(chain_id = %self.chain.chain_id, "adding unknown chain to wallet");
                let add_params = serde_json::to_value(&self.chain)
                    .map_err(|err| WalletError::Malformed(err.to_string()))?;
                self.provider
                    .request("wallet_addEthereumChain", json!([add_params]))
                    .await?;
                self.provider
                    .request("wallet_switchEthereumChain", switch_params)
                    .await?;
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn listen(&mut self) {
        self.subscriptions.clear();

        let state = Arc::clone(&self.state);
        let on_accounts: Listener = Arc::new(move |accounts: Value| {
            let address = first_account(&accounts).ok().flatten();
            let mut guard = state.write().unwrap_or_else(PoisonError::into_inner);
            guard.address = address;
        });

        let state = Arc::clone(&self.state);
        let on_chain: Listener = Arc::new(move |chain_id: Value| {
            let mut guard = state.write().unwrap_or_else(PoisonError::into_inner);
            guard.chain_id = chain_id.as_str().map(ToOwned::to_owned);
        });

        self.subscriptions.push(Subscription::new(
            Arc::clone(&self.provider),
            WalletEvent::AccountsChanged,
            on_accounts,
        ));
        self.subscriptions.push(Subscription::new(
            Arc::clone(&self.provider),
            WalletEvent::ChainChanged,
            on_chain,
        ));
    }

    pub fn disconnect(&mut self) {
        self.subscriptions.clear();
        self.update(|state| *state = WalletState::default());
        tracing::info!("wallet disconnected");
    }

    fn update(&self, apply: impl FnOnce(&mut WalletState)) {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        apply(&mut guard);
    }
}

fn first_account(accounts: &Value) -> Result<Option<String>, WalletError> {
    let list = accounts
        .as_array()
        .ok_or_else(|| WalletError::Malformed("accounts must be an array".to_string()))?;
    Ok(list.first().and_then(Value::as_str).map(ToOwned::to_owned))
}
