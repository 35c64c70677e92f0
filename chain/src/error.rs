use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("no account found")]
    NoAccount,

    #[error("request failed: {0}")]
    Http(String),

    #[error("{status}, {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ChainError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ChainError::Decode(e.to_string())
        } else {
            ChainError::Http(e.to_string())
        }
    }
}
