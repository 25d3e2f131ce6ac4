use crate::i18n::{DictionaryError, TranslationDictionary};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Failure to obtain a content document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid JSON in {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected document shape in {url}: {source}")]
    Shape {
        url: String,
        #[source]
        source: DictionaryError,
    },
}

/// Fetches named JSON documents from `<base_url>/json/<name>.json`.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    client: reqwest::Client,
    base_url: String,
}

impl ContentLoader {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the document called `name` (without the `.json` suffix).
    pub fn document_url(&self, name: &str) -> String {
        format!("{}/json/{}.json", self.base_url, name)
    }

    /// Fetch and parse a document. Non-2xx responses are errors.
    pub async fn load(&self, name: &str) -> Result<Value, LoadError> {
        let url = self.document_url(name);
        debug!("Fetching: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| LoadError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        debug!("Response for {}: {}", url, status);
        if !status.is_success() {
            return Err(LoadError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| LoadError::Request {
            url: url.clone(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| LoadError::Parse { url, source })
    }

    /// Fetch the translations document and check its shape.
    pub async fn load_dictionary(&self) -> Result<TranslationDictionary, LoadError> {
        let value = self.load("translations").await?;
        TranslationDictionary::from_value(value).map_err(|source| LoadError::Shape {
            url: self.document_url("translations"),
            source,
        })
    }
}
