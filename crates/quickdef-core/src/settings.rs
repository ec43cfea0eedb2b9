use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

/// Settings key holding the language-model API key
pub const API_KEY: &str = "openaiApiKey";

/// Read side of the user settings; the write path belongs to the front end
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

impl<T: SettingsStore + ?Sized> SettingsStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Process-local settings, for embedding and tests
#[derive(Default)]
pub struct MemorySettings {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let settings = Self::new();
        settings.set(key, value);
        settings
    }

    pub fn set(&self, key: &str, value: &str) {
        self.values.write().insert(key.to_string(), value.to_string());
    }

    pub fn remove(&self, key: &str) {
        self.values.write().remove(key);
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }
}
