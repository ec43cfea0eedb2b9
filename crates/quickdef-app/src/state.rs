use std::sync::Arc;

use quickdef_config::Config;
use quickdef_core::LookupService;
use quickdef_lang_english::{FreeDictionaryClient, OpenAiExplainer, build_client};

use crate::settings::JsonSettingsStore;

pub type Service = LookupService<FreeDictionaryClient, OpenAiExplainer, Arc<JsonSettingsStore>>;

pub struct AppState {
    pub config: Config,
    pub service: Arc<Service>,
}

impl AppState {
    pub fn new(config: Config, settings: Arc<JsonSettingsStore>) -> anyhow::Result<Self> {
        let client = build_client(&config.network)?;
        let dictionary = FreeDictionaryClient::new(client.clone(), &config.dictionary);
        let explainer = OpenAiExplainer::new(client, &config.explainer);
        let service = LookupService::new(dictionary, explainer, settings, &config);

        Ok(Self {
            config,
            service: Arc::new(service),
        })
    }
}
