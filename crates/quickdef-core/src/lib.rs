pub mod cache;
pub mod entry;
pub mod error;
pub mod provider;
pub mod service;
pub mod settings;
pub mod word;

pub use cache::{CacheKey, LookupCache};
pub use error::{LookupError, RemoteError};
pub use provider::{DictionaryProvider, Explainer, ProviderMetadata};
pub use service::LookupService;
pub use settings::{MemorySettings, SettingsStore};
