use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("{exchange}: request to {url} failed: {source}")]
    Transport {
        exchange: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{exchange}: {url} responded with {status}: {body}")]
    Status {
        exchange: String,
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("{exchange}: API error {code}: {message}")]
    Api {
        exchange: String,
        code: i64,
        message: String,
    },

    #[error("{exchange}: malformed payload from {url}: {source}")]
    Decode {
        exchange: String,
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ExchangeError {
    pub fn exchange(&self) -> &str {
        match self {
            Self::Transport { exchange, .. }
            | Self::Status { exchange, .. }
            | Self::Api { exchange, .. }
            | Self::Decode { exchange, .. } => exchange,
        }
    }
}
