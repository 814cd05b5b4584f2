use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Parameters for `wallet_addEthereumChain` (EIP-3085).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainParams {
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl ChainParams {
    pub fn avalanche_mainnet() -> Self {
        Self {
            chain_id: "0xa86a".to_string(),
            chain_name: "Avalanche C-Chain".to_string(),
            native_currency: avax(),
            rpc_urls: vec!["https://api.avax.network/ext/bc/C/rpc".to_string()],
            block_explorer_urls: vec!["https://snowtrace.io/".to_string()],
        }
    }

    pub fn avalanche_fuji() -> Self {
        Self {
            chain_id: "0xa869".to_string(),
            chain_name: "Avalanche Fuji Testnet".to_string(),
            native_currency: avax(),
            rpc_urls: vec!["https://api.avax-test.network/ext/bc/C/rpc".to_string()],
            block_explorer_urls: vec!["https://testnet.snowtrace.io/".to_string()],
        }
    }
}

fn avax() -> NativeCurrency {
    NativeCurrency {
        name: "Avalanche".to_string(),
        symbol: "AVAX".to_string(),
        decimals: 18,
    }
}
