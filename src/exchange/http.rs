use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::{config::HttpConfig, exchange::errors::ExchangeError};

const BODY_EXCERPT_LIMIT: usize = 256;

/// Shared HTTP transport for the quote sources.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    /// GETs `url` and decodes the JSON body. Non-2xx responses and undecodable
    /// bodies are errors; the body is read fully before decoding.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        exchange: &str,
        url: &str,
    ) -> Result<T, ExchangeError> {
        debug!("GET {} ({})", url, exchange);

        let transport = |source: reqwest::Error| ExchangeError::Transport {
            exchange: exchange.to_string(),
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ExchangeError::Status {
                exchange: exchange.to_string(),
                url: url.to_string(),
                status,
                body: excerpt(&text),
            });
        }

        let body = response.text().await.map_err(transport)?;
        debug!("{} returned {} bytes", url, body.len());

        serde_json::from_str(&body).map_err(|source| ExchangeError::Decode {
            exchange: exchange.to_string(),
            url: url.to_string(),
            source,
        })
    }
}

fn excerpt(text: &str) -> String {
    match text.char_indices().nth(BODY_EXCERPT_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
