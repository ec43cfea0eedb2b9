use async_trait::async_trait;
use quickdef_config::dictionary::DictionaryConfig;
use quickdef_core::entry::DictionaryEntry;
use quickdef_core::{DictionaryProvider, ProviderMetadata, RemoteError};
use reqwest::Url;

use crate::http::{map_error, status_text};

/// Client for the public Free Dictionary API (dictionaryapi.dev)
#[derive(Clone)]
pub struct FreeDictionaryClient {
    client: reqwest::Client,
    api_url: String,
}

impl FreeDictionaryClient {
    pub fn new(client: reqwest::Client, config: &DictionaryConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
        }
    }

    /// `{api_url}/{word}` with the word percent-encoded as one path segment
    pub fn entry_url(&self, word: &str) -> Result<Url, RemoteError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| RemoteError::Network(format!("invalid dictionary URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| RemoteError::Network(format!("invalid dictionary URL: {}", self.api_url)))?
            .pop_if_empty()
            .push(&word.to_lowercase());
        Ok(url)
    }
}

#[async_trait]
impl DictionaryProvider for FreeDictionaryClient {
    async fn fetch_entries(&self, word: &str) -> Result<Vec<DictionaryEntry>, RemoteError> {
        let url = self.entry_url(word)?;
        tracing::debug!(%url, "GET dictionary entry");

        let response = self.client.get(url).send().await.map_err(map_error)?;

        // Unknown words come back as 404, which counts as a failed call
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message: status_text(status),
            });
        }

        let body = response.text().await.map_err(map_error)?;
        parse_entries(&body)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Free Dictionary API".to_string(),
            requires_api_key: false,
        }
    }
}

pub fn parse_entries(body: &str) -> Result<Vec<DictionaryEntry>, RemoteError> {
    serde_json::from_str(body)
        .map_err(|e| RemoteError::Malformed(format!("Failed to parse dictionary response: {e}")))
}
