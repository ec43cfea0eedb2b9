use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use quickdef_config::Config;
use quickdef_types::{Action, LookupKind, LookupResult, Request, Response};

use crate::cache::{CacheKey, LookupCache};
use crate::error::LookupError;
use crate::provider::{DictionaryProvider, Explainer};
use crate::settings::{API_KEY, SettingsStore};
use crate::word::is_valid_word;

pub const EXPLANATION_FALLBACK: &str = "Sorry, I couldn't explain that word right now.";
pub const OFFLINE_MESSAGE: &str = "No internet connection";

/// Cache-first lookups in front of a dictionary and an explainer.
///
/// `is_online` only reflects the outcome of the last remote attempt. Once a
/// call fails every uncached lookup short-circuits with
/// [`LookupError::Offline`] until a call succeeds or [`set_online`] is used.
///
/// [`set_online`]: LookupService::set_online
pub struct LookupService<D, E, S> {
    dictionary: D,
    explainer: E,
    settings: S,
    words: LookupCache<LookupResult>,
    explanations: LookupCache<String>,
    word_ttl: Duration,
    explain_ttl: Duration,
    online: AtomicBool,
}

impl<D, E, S> LookupService<D, E, S>
where
    D: DictionaryProvider,
    E: Explainer,
    S: SettingsStore,
{
    pub fn new(dictionary: D, explainer: E, settings: S, config: &Config) -> Self {
        Self {
            dictionary,
            explainer,
            settings,
            words: LookupCache::new(),
            explanations: LookupCache::new(),
            word_ttl: config.dictionary.cache_ttl(),
            explain_ttl: config.explainer.cache_ttl(),
            online: AtomicBool::new(true),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    /// External network signal, e.g. the host reporting connectivity is back
    pub fn set_online(&self, online: bool) {
        self.record_attempt(online);
    }

    pub fn clear_cache(&self) {
        self.words.clear();
        self.explanations.clear();
    }

    /// Dictionary definition of `word`, served from cache for 24 hours
    pub async fn lookup_word(&self, word: &str) -> Result<LookupResult, LookupError> {
        let key = CacheKey::new(LookupKind::Word, word);
        if let Some(hit) = self.words.get_fresh(&key, self.word_ttl) {
            tracing::debug!(word = key.word(), "definition cache hit");
            return Ok(hit);
        }

        self.ensure_online()?;

        tracing::info!(
            word = key.word(),
            provider = %self.dictionary.metadata().name,
            "fetching definition"
        );
        let entries = match self.dictionary.fetch_entries(key.word()).await {
            Ok(entries) => {
                self.record_attempt(true);
                entries
            }
            Err(e) => {
                self.record_attempt(false);
                tracing::warn!(word = key.word(), "dictionary lookup failed: {e}");
                return Err(e.into());
            }
        };

        let Some(entry) = entries.first() else {
            tracing::debug!(word = key.word(), "no dictionary entries");
            return Err(LookupError::NotFound(key.word().to_string()));
        };

        let result = entry.to_lookup_result();
        self.words.set(key, result.clone());
        Ok(result)
    }

    /// Child-friendly explanation of `word`, served from cache for 7 days
    pub async fn explain(&self, word: &str) -> Result<String, LookupError> {
        let key = CacheKey::new(LookupKind::Explain, word);
        if let Some(hit) = self.explanations.get_fresh(&key, self.explain_ttl) {
            tracing::debug!(word = key.word(), "explanation cache hit");
            return Ok(hit);
        }

        self.ensure_online()?;

        let api_key = self
            .settings
            .get(API_KEY)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| LookupError::Configuration("API key not configured".to_string()))?;

        tracing::info!(
            word = key.word(),
            provider = %self.explainer.metadata().name,
            "requesting explanation"
        );
        let content = match self.explainer.explain(key.word(), &api_key).await {
            Ok(content) => {
                self.record_attempt(true);
                content
            }
            Err(e) => {
                self.record_attempt(false);
                tracing::warn!(word = key.word(), "explanation request failed: {e}");
                return Err(e.into());
            }
        };

        let explanation = content
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| EXPLANATION_FALLBACK.to_string());
        self.explanations.set(key, explanation.clone());
        Ok(explanation)
    }

    /// Message that a front end should show for `error`
    pub fn describe_error(&self, error: &LookupError) -> String {
        if self.is_online() {
            error.to_string()
        } else {
            OFFLINE_MESSAGE.to_string()
        }
    }

    /// Dispatch a front-end request and wrap the outcome in a tagged reply
    pub async fn handle(&self, request: Request) -> Response {
        let word = request.word.trim();
        if !is_valid_word(word) {
            let error = LookupError::InvalidWord(request.word.clone());
            return Response::failure(request.id, error.to_string());
        }

        match request.action {
            Action::FetchWordData => match self.lookup_word(word).await {
                Ok(data) => Response::word_data(request.id, data),
                Err(e) => Response::failure(request.id, self.describe_error(&e)),
            },
            Action::ExplainLikeFive => match self.explain(word).await {
                Ok(explanation) => Response::explanation(request.id, explanation),
                Err(e) => Response::failure(request.id, self.describe_error(&e)),
            },
        }
    }

    fn ensure_online(&self) -> Result<(), LookupError> {
        if self.is_online() {
            Ok(())
        } else {
            Err(LookupError::Offline)
        }
    }

    fn record_attempt(&self, success: bool) {
        let was_online = self.online.swap(success, Ordering::SeqCst);
        if was_online != success {
            if success {
                tracing::info!("back online");
            } else {
                tracing::warn!("marked offline");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use tokio::sync::Notify;

    use super::*;
    use crate::entry::{Definition, DictionaryEntry, Meaning};
    use crate::error::RemoteError;
    use crate::provider::ProviderMetadata;
    use crate::settings::MemorySettings;

    /// Dictionary that replays a fixed outcome and counts calls
    #[derive(Clone)]
    struct FakeDictionary {
        outcome: Arc<Mutex<Result<Vec<DictionaryEntry>, RemoteError>>>,
        calls: Arc<AtomicUsize>,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl FakeDictionary {
        fn returning(outcome: Result<Vec<DictionaryEntry>, RemoteError>) -> Self {
            Self {
                outcome: Arc::new(Mutex::new(outcome)),
                calls: Arc::new(AtomicUsize::new(0)),
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn set(&self, outcome: Result<Vec<DictionaryEntry>, RemoteError>) {
            *self.outcome.lock() = outcome;
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DictionaryProvider for FakeDictionary {
        async fn fetch_entries(&self, word: &str) -> Result<Vec<DictionaryEntry>, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().push(word.to_string());
            self.outcome.lock().clone()
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "fake-dictionary".to_string(),
                requires_api_key: false,
            }
        }
    }

    #[derive(Clone)]
    struct FakeExplainer {
        outcome: Arc<Mutex<Result<Option<String>, RemoteError>>>,
        calls: Arc<AtomicUsize>,
        keys: Arc<Mutex<Vec<String>>>,
    }

    impl FakeExplainer {
        fn returning(outcome: Result<Option<String>, RemoteError>) -> Self {
            Self {
                outcome: Arc::new(Mutex::new(outcome)),
                calls: Arc::new(AtomicUsize::new(0)),
                keys: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Explainer for FakeExplainer {
        async fn explain(&self, _word: &str, api_key: &str) -> Result<Option<String>, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.keys.lock().push(api_key.to_string());
            self.outcome.lock().clone()
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "fake-explainer".to_string(),
                requires_api_key: true,
            }
        }
    }

    type TestService = LookupService<FakeDictionary, FakeExplainer, Arc<MemorySettings>>;

    fn mouse_entry() -> DictionaryEntry {
        DictionaryEntry {
            meanings: vec![Meaning {
                definitions: vec![Definition {
                    definition: Some("a rodent".to_string()),
                    example: Some("the cat chased the mouse".to_string()),
                }],
                synonyms: vec!["rat".to_string(), "vermin".to_string()],
            }],
        }
    }

    fn network_error() -> RemoteError {
        RemoteError::Network("connection refused".to_string())
    }

    fn service(
        dictionary: &FakeDictionary,
        explainer: &FakeExplainer,
        settings: &Arc<MemorySettings>,
    ) -> TestService {
        LookupService::new(
            dictionary.clone(),
            explainer.clone(),
            settings.clone(),
            &Config::default(),
        )
    }

    fn fixture() -> (FakeDictionary, FakeExplainer, Arc<MemorySettings>, TestService) {
        let dictionary = FakeDictionary::returning(Ok(vec![mouse_entry()]));
        let explainer = FakeExplainer::returning(Ok(Some("A mouse is a tiny furry animal.".into())));
        let settings = Arc::new(MemorySettings::with(API_KEY, "sk-test"));
        let svc = service(&dictionary, &explainer, &settings);
        (dictionary, explainer, settings, svc)
    }

    #[tokio::test]
    async fn mouse_lookup_is_parsed_and_cached() {
        let (dictionary, _, _, svc) = fixture();

        let result = svc.lookup_word("mouse").await.unwrap();
        assert_eq!(
            result,
            LookupResult {
                definition: "a rodent".to_string(),
                synonyms: vec!["rat".to_string(), "vermin".to_string()],
                example: Some("the cat chased the mouse".to_string()),
            }
        );

        let again = svc.lookup_word("Mouse").await.unwrap();
        assert_eq!(again, result);
        assert_eq!(dictionary.calls(), 1);
        assert_eq!(*dictionary.seen.lock(), vec!["mouse".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn word_cache_expires_after_a_day() {
        let (dictionary, _, _, svc) = fixture();

        svc.lookup_word("mouse").await.unwrap();
        tokio::time::advance(Duration::from_secs(24 * 60 * 60 - 1)).await;
        svc.lookup_word("mouse").await.unwrap();
        assert_eq!(dictionary.calls(), 1);

        tokio::time::advance(Duration::from_secs(1)).await;
        svc.lookup_word("mouse").await.unwrap();
        assert_eq!(dictionary.calls(), 2);
    }

    #[tokio::test]
    async fn offline_before_call_makes_no_remote_attempt() {
        let (dictionary, explainer, _, svc) = fixture();
        svc.set_online(false);

        assert_eq!(svc.lookup_word("mouse").await, Err(LookupError::Offline));
        assert_eq!(svc.explain("mouse").await, Err(LookupError::Offline));
        assert_eq!(dictionary.calls(), 0);
        assert_eq!(explainer.calls(), 0);
    }

    #[tokio::test]
    async fn cached_value_is_served_while_offline() {
        let (dictionary, _, _, svc) = fixture();
        svc.lookup_word("mouse").await.unwrap();
        svc.set_online(false);

        assert!(svc.lookup_word("mouse").await.is_ok());
        assert_eq!(dictionary.calls(), 1);
    }

    #[tokio::test]
    async fn failed_call_raises_remote_error_and_marks_offline() {
        let (dictionary, _, _, svc) = fixture();
        dictionary.set(Err(network_error()));

        assert_eq!(
            svc.lookup_word("mouse").await,
            Err(LookupError::Remote(network_error()))
        );
        assert!(!svc.is_online());

        // Sticky until something succeeds
        dictionary.set(Ok(vec![mouse_entry()]));
        assert_eq!(svc.lookup_word("mouse").await, Err(LookupError::Offline));
        assert_eq!(dictionary.calls(), 1);
    }

    #[tokio::test]
    async fn successful_call_marks_online() {
        let (dictionary, _, _, svc) = fixture();
        dictionary.set(Err(RemoteError::Timeout));
        svc.lookup_word("mouse").await.unwrap_err();
        assert!(!svc.is_online());

        svc.set_online(true);
        dictionary.set(Ok(vec![mouse_entry()]));
        svc.lookup_word("mouse").await.unwrap();
        assert!(svc.is_online());
    }

    /// "mouse" waits for the gate and then succeeds, every other word fails at once
    #[derive(Clone)]
    struct GatedDictionary {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl DictionaryProvider for GatedDictionary {
        async fn fetch_entries(&self, word: &str) -> Result<Vec<DictionaryEntry>, RemoteError> {
            if word == "mouse" {
                self.gate.notified().await;
                Ok(vec![mouse_entry()])
            } else {
                Err(network_error())
            }
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "gated-dictionary".to_string(),
                requires_api_key: false,
            }
        }
    }

    #[tokio::test]
    async fn overlapping_success_restores_online_after_failure() {
        let gate = Arc::new(Notify::new());
        let svc = LookupService::new(
            GatedDictionary { gate: gate.clone() },
            FakeExplainer::returning(Ok(None)),
            Arc::new(MemorySettings::new()),
            &Config::default(),
        );

        let slow = svc.lookup_word("mouse");
        let fast = async {
            let result = svc.lookup_word("qwzx").await;
            assert!(!svc.is_online());
            gate.notify_one();
            result
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert_eq!(fast, Err(LookupError::Remote(network_error())));
        assert_eq!(slow.unwrap().definition, "a rodent");
        assert!(svc.is_online());
    }

    #[tokio::test]
    async fn empty_response_is_not_found_but_online() {
        let (dictionary, _, _, svc) = fixture();
        dictionary.set(Ok(vec![]));

        assert_eq!(
            svc.lookup_word("qwzx").await,
            Err(LookupError::NotFound("qwzx".to_string()))
        );
        assert!(svc.is_online());

        // Not cached
        svc.lookup_word("qwzx").await.unwrap_err();
        assert_eq!(dictionary.calls(), 2);
    }

    #[tokio::test]
    async fn explain_without_api_key_is_configuration_error() {
        let (_, explainer, settings, svc) = fixture();
        settings.remove(API_KEY);
        assert!(matches!(
            svc.explain("mouse").await,
            Err(LookupError::Configuration(_))
        ));

        settings.set(API_KEY, "   ");
        assert!(matches!(
            svc.explain("mouse").await,
            Err(LookupError::Configuration(_))
        ));

        assert_eq!(explainer.calls(), 0);
        assert!(svc.is_online());
    }

    #[tokio::test]
    async fn explanation_is_cached_and_uses_trimmed_key() {
        let (_, explainer, settings, svc) = fixture();
        settings.set(API_KEY, "  sk-test \n");

        let first = svc.explain("mouse").await.unwrap();
        let second = svc.explain("MOUSE").await.unwrap();
        assert_eq!(first, "A mouse is a tiny furry animal.");
        assert_eq!(first, second);
        assert_eq!(explainer.calls(), 1);
        assert_eq!(*explainer.keys.lock(), vec!["sk-test".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn explanation_cache_lasts_a_week() {
        let (_, explainer, _, svc) = fixture();

        svc.explain("mouse").await.unwrap();
        tokio::time::advance(Duration::from_secs(6 * 24 * 60 * 60)).await;
        svc.explain("mouse").await.unwrap();
        assert_eq!(explainer.calls(), 1);

        tokio::time::advance(Duration::from_secs(24 * 60 * 60)).await;
        svc.explain("mouse").await.unwrap();
        assert_eq!(explainer.calls(), 2);
    }

    #[tokio::test]
    async fn missing_content_uses_fallback() {
        let dictionary = FakeDictionary::returning(Ok(vec![]));
        let explainer = FakeExplainer::returning(Ok(None));
        let settings = Arc::new(MemorySettings::with(API_KEY, "sk-test"));
        let svc = service(&dictionary, &explainer, &settings);

        assert_eq!(svc.explain("mouse").await.unwrap(), EXPLANATION_FALLBACK);
    }

    #[tokio::test]
    async fn explainer_failure_marks_offline() {
        let dictionary = FakeDictionary::returning(Ok(vec![mouse_entry()]));
        let status = RemoteError::Status {
            status: 401,
            message: "Incorrect API key provided".to_string(),
        };
        let explainer = FakeExplainer::returning(Err(status.clone()));
        let settings = Arc::new(MemorySettings::with(API_KEY, "sk-bad"));
        let svc = service(&dictionary, &explainer, &settings);

        assert_eq!(svc.explain("mouse").await, Err(LookupError::Remote(status)));
        assert!(!svc.is_online());
    }

    #[tokio::test]
    async fn word_and_explanation_caches_are_separate() {
        let (dictionary, explainer, _, svc) = fixture();

        svc.lookup_word("mouse").await.unwrap();
        svc.explain("mouse").await.unwrap();
        svc.lookup_word("mouse").await.unwrap();
        svc.explain("mouse").await.unwrap();

        assert_eq!(dictionary.calls(), 1);
        assert_eq!(explainer.calls(), 1);

        svc.clear_cache();
        svc.lookup_word("mouse").await.unwrap();
        assert_eq!(dictionary.calls(), 2);
    }

    #[tokio::test]
    async fn handle_dispatches_by_action() {
        let (_, _, _, svc) = fixture();

        let request = Request::fetch_word_data("mouse");
        let id = request.id;
        let response = svc.handle(request).await;
        assert!(response.success);
        assert_eq!(response.id, id);
        assert_eq!(response.data.unwrap().definition, "a rodent");

        let response = svc.handle(Request::explain_like_five(" mouse ")).await;
        assert!(response.success);
        assert_eq!(
            response.explanation.as_deref(),
            Some("A mouse is a tiny furry animal.")
        );
    }

    #[tokio::test]
    async fn handle_rejects_invalid_words_without_remote_call() {
        let (dictionary, _, _, svc) = fixture();

        let response = svc.handle(Request::fetch_word_data("x1")).await;
        assert!(!response.success);
        assert!(response.error.unwrap().starts_with("Invalid word"));
        assert_eq!(dictionary.calls(), 0);
    }

    #[tokio::test]
    async fn handle_reports_offline_message_after_failure() {
        let (dictionary, _, _, svc) = fixture();
        dictionary.set(Err(network_error()));

        let response = svc.handle(Request::fetch_word_data("mouse")).await;
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some(OFFLINE_MESSAGE));
    }

    #[tokio::test]
    async fn describe_error_uses_error_text_while_online() {
        let (_, _, _, svc) = fixture();
        let error = LookupError::Configuration("API key not configured".to_string());
        assert_eq!(
            svc.describe_error(&error),
            "Configuration error: API key not configured"
        );
    }
}
