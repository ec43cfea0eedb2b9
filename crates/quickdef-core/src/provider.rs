use async_trait::async_trait;

use crate::entry::DictionaryEntry;
use crate::error::RemoteError;

/// Remote dictionary backend
#[async_trait]
pub trait DictionaryProvider: Send + Sync {
    /// Fetch all entries for an already normalized word.
    /// An unknown word is an empty vector, not an error.
    async fn fetch_entries(&self, word: &str) -> Result<Vec<DictionaryEntry>, RemoteError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

/// Language-model backend producing child-friendly explanations
#[async_trait]
pub trait Explainer: Send + Sync {
    /// Returns the first completion's text, or `None` when the reply
    /// carried no usable content
    async fn explain(&self, word: &str, api_key: &str) -> Result<Option<String>, RemoteError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
}
