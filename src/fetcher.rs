//! HTTP GET abstraction used for both the catalog and the spec documents

use async_trait::async_trait;

use crate::config::HttpConfig;
use crate::error::{Error, Result};

/// Something that can fetch a URL and hand back the body as text
///
/// The downloader only ever issues plain GETs and treats bodies as opaque text,
/// so this is the whole surface it needs from the network.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` and return the body
    ///
    /// Non-success status codes are errors ([`Error::HttpStatus`]); transport
    /// failures surface as [`Error::Network`].
    async fn get_text(&self, url: &str) -> Result<String>;
}

/// [`Fetcher`] backed by a reused `reqwest::Client`
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client from HTTP settings
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                tracing::debug!(url, "request timed out");
            } else if e.is_connect() {
                tracing::debug!(url, "connection failed");
            }
            Error::Network(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(url, bytes = body.len(), "fetched");
        Ok(body)
    }
}
