use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use parking_lot::RwLock;
use quickdef_core::SettingsStore;
use quickdef_core::settings::API_KEY;
use serde_json::{Map, Value};

/// User settings persisted as a flat JSON object, written through on every `set`
pub struct JsonSettingsStore {
    path: PathBuf,
    values: RwLock<Map<String, Value>>,
}

impl JsonSettingsStore {
    /// Open the settings file, seeding it with install defaults on first run
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();

        if path.exists() {
            let data = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            let values: Map<String, Value> = serde_json::from_str(&data)
                .with_context(|| format!("Invalid settings file {}", path.display()))?;
            return Ok(Self {
                path,
                values: RwLock::new(values),
            });
        }

        let mut defaults = Map::new();
        defaults.insert(API_KEY.to_string(), Value::String(String::new()));

        let store = Self {
            path,
            values: RwLock::new(defaults),
        };
        store.persist()?;
        tracing::info!("Created settings file at {}", store.path.display());
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set(&self, key: &str, value: impl Into<Value>) -> anyhow::Result<()> {
        self.values.write().insert(key.to_string(), value.into());
        self.persist()
    }

    fn persist(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&*self.values.read())?;
        fs::write(&self.path, data)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

impl SettingsStore for JsonSettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.values.read().get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
