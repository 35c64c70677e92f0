use thiserror::Error;

use birthday_chain::ChainError;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("wallet not connected")]
    NotConnected,

    #[error("no account found")]
    NoAccount,

    #[error("wallet not found: {0}")]
    WalletNotFound(String),

    #[error("wallet {0} is not installed")]
    NotInstalled(String),

    #[error("this wallet cannot sign transactions")]
    SigningUnavailable,

    #[error("transaction rejected: {0}")]
    Rejected(String),

    #[error("signer error: {0}")]
    Signer(String),

    #[error("a transaction is already in progress")]
    TransactionInProgress,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Chain(#[from] ChainError),
}
