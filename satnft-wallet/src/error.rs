use thiserror::Error;

/// EIP-1193 code for a request the user rejected.
pub const USER_REJECTED: i64 = 4001;
/// EIP-3326 code for a chain the wallet does not know about.
pub const UNRECOGNIZED_CHAIN: i64 = 4902;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("provider error {code}: {message}")]
pub struct ProviderRpcError {
    pub code: i64,
    pub message: String,
}

impl ProviderRpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("request rejected by user: {0}")]
    Rejected(String),
    #[error("wallet returned no accounts")]
    NoAccounts,
    #[error("wallet rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("malformed wallet response: {0}")]
    Malformed(String),
}

impl From<ProviderRpcError> for WalletError {
    fn from(err: ProviderRpcError) -> Self {
        if err.code == USER_REJECTED {
            WalletError::Rejected(err.message)
        } else {
            WalletError::Rpc {
                code: err.code,
                message: err.message,
            }
        }
    }
}
