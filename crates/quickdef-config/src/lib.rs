use std::env;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::explainer::ExplainerConfig;
use self::network::NetworkConfig;

pub mod dictionary;
pub mod explainer;
pub mod network;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub dictionary: DictionaryConfig,
    pub explainer: ExplainerConfig,
}

impl Config {
    /// Apply `QUICKDEF_*` environment variables on top of the current values
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(timeout) = env::var("QUICKDEF_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.network.timeout_seconds = timeout;
        }

        if let Ok(url) = env::var("QUICKDEF_DICTIONARY_URL") {
            self.dictionary.api_url = url;
        }

        if let Ok(url) = env::var("QUICKDEF_EXPLAINER_URL") {
            self.explainer.api_url = url;
        }

        if let Ok(model) = env::var("QUICKDEF_MODEL") {
            self.explainer.model = model;
        }

        self
    }
}
