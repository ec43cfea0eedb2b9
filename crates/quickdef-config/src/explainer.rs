use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    150
}

fn default_temperature() -> f32 {
    0.7
}

fn default_cache_ttl_days() -> u64 {
    7
}

/// Chat-completion provider used for "explain like I'm five"
///
/// The API key is not stored here: it lives in the user settings store
/// and is read on every explanation lookup.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ExplainerConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_cache_ttl_days")]
    pub cache_ttl_days: u64,
}

impl Default for ExplainerConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            cache_ttl_days: default_cache_ttl_days(),
        }
    }
}

impl ExplainerConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_days.saturating_mul(24 * 60 * 60))
    }
}
