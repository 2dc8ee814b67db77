use std::sync::Arc;

use crate::cache::{ResultCache, fingerprint};
use crate::fallback::generate_fallback;
use crate::metrics::{CACHE_HITS, CACHE_MISSES, FALLBACK_TOTAL, PROVIDER_FAILURES};
use crate::models::{ContentSource, GenerationRequest};
use crate::prompt::{build_prompt, template_for};
use crate::provider::{Provider, ProviderClient};

// Content plus where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub content: String,
    pub source: ContentSource,
}

/// Cache, then providers in declared order, then fallback templates.
/// Owned once per process and shared through the app state.
pub struct GenerationOrchestrator {
    providers: Vec<Provider>,
    client: Arc<dyn ProviderClient>,
    cache: ResultCache,
}

impl GenerationOrchestrator {
    pub fn new(providers: Vec<Provider>, client: Arc<dyn ProviderClient>, cache: ResultCache) -> Self {
        Self {
            providers,
            client,
            cache,
        }
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub async fn generate_content(&self, req: &GenerationRequest) -> String {
        self.generate(req).await.content
    }

    pub async fn generate(&self, req: &GenerationRequest) -> Generation {
        let key = fingerprint(req);

        // check cache first
        if let Some(content) = self.cache.get(&key) {
            CACHE_HITS.inc();
            tracing::debug!(fingerprint = %key, "cache hit");
            return Generation {
                content,
                source: ContentSource::Cache,
            };
        }
        CACHE_MISSES.inc();

        let template = template_for(req.content_type);
        let prompt = build_prompt(&req.topic, template, req.language, req.tone);

        for provider in self.providers.iter().filter(|p| p.enabled) {
            tracing::debug!(provider = %provider.name, "calling provider");
            match self.client.call(provider, &prompt).await {
                Ok(content) => {
                    tracing::info!(provider = %provider.name, fingerprint = %key, "provider succeeded");
                    self.cache.set(key, content.clone());
                    return Generation {
                        content,
                        source: ContentSource::Provider(provider.name.clone()),
                    };
                }
                Err(e) => {
                    PROVIDER_FAILURES.with_label_values(&[provider.name.as_str()]).inc();
                    tracing::warn!(provider = %e.provider, error = %e.message, "provider failed, trying next");
                }
            }
        }

        FALLBACK_TOTAL.inc();
        tracing::info!(fingerprint = %key, "all providers unavailable, using fallback template");
        let content = generate_fallback(&req.topic, req.content_type, req.language, req.tone);
        self.cache.set(key, content.clone());
        Generation {
            content,
            source: ContentSource::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::models::{ContentType, Language, Tone};
    use crate::provider::ProviderKind;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    // Scripted client: answers per provider name and records every call
    #[derive(Default)]
    struct ScriptedClient {
        answers: HashMap<String, Result<String, String>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn answer(mut self, provider: &str, answer: Result<&str, &str>) -> Self {
            let answer = answer.map(str::to_string).map_err(str::to_string);
            self.answers.insert(provider.to_string(), answer);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProviderClient for ScriptedClient {
        async fn call(&self, provider: &Provider, _prompt: &str) -> Result<String, ProviderError> {
            self.calls.lock().unwrap().push(provider.name.clone());
            match self.answers.get(&provider.name) {
                Some(Ok(text)) => Ok(text.clone()),
                Some(Err(msg)) => Err(ProviderError::new(&provider.name, msg.clone())),
                None => Err(ProviderError::new(&provider.name, "unscripted")),
            }
        }
    }

    fn providers() -> Vec<Provider> {
        vec![
            Provider::new("first", ProviderKind::HuggingFace, "http://a", "m"),
            Provider::new("second", ProviderKind::Ollama, "http://b", "m"),
            Provider::new("third", ProviderKind::TextGen, "http://c", "m"),
        ]
    }

    fn orchestrator(
        providers: Vec<Provider>,
        client: Arc<ScriptedClient>,
        ttl: Duration,
    ) -> GenerationOrchestrator {
        GenerationOrchestrator::new(providers, client, ResultCache::new(ttl))
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new("distributed tracing", ContentType::Document)
    }

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let client = Arc::new(
            ScriptedClient::default()
                .answer("first", Err("down"))
                .answer("second", Ok("from second"))
                .answer("third", Ok("from third")),
        );
        let orch = orchestrator(providers(), client.clone(), Duration::from_secs(3600));

        let generation = orch.generate(&request()).await;
        assert_eq!(generation.content, "from second");
        assert_eq!(generation.source, ContentSource::Provider("second".into()));
        assert_eq!(client.calls(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_repeat_request_is_served_from_cache() {
        let client = Arc::new(ScriptedClient::default().answer("first", Ok("cached text")));
        let orch = orchestrator(providers(), client.clone(), Duration::from_secs(3600));

        let first = orch.generate_content(&request()).await;
        let second = orch.generate(&request()).await;

        assert_eq!(first, "cached text");
        assert_eq!(second.content, "cached text");
        assert_eq!(second.source, ContentSource::Cache);
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_reinvokes_providers() {
        let client = Arc::new(ScriptedClient::default().answer("first", Ok("fresh")));
        let orch = orchestrator(providers(), client.clone(), Duration::ZERO);

        orch.generate(&request()).await;
        let again = orch.generate(&request()).await;

        assert_eq!(again.source, ContentSource::Provider("first".into()));
        assert_eq!(client.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_disabled_providers_are_never_called() {
        let providers = providers()
            .into_iter()
            .map(|p| p.with_enabled(false))
            .collect();
        let client = Arc::new(ScriptedClient::default().answer("first", Ok("unused")));
        let orch = orchestrator(providers, client.clone(), Duration::from_secs(3600));

        let req = request();
        let generation = orch.generate(&req).await;

        assert!(client.calls().is_empty());
        assert_eq!(generation.source, ContentSource::Fallback);
        assert_eq!(
            generation.content,
            generate_fallback(&req.topic, req.content_type, req.language, req.tone)
        );
    }

    #[tokio::test]
    async fn test_all_failures_fall_back_deterministically() {
        let req = GenerationRequest::new("zero trust networking", ContentType::Email)
            .with_language(Language::Spanish)
            .with_tone(Tone::Friendly);

        let mut outputs = Vec::new();
        for _ in 0..2 {
            let client = Arc::new(
                ScriptedClient::default()
                    .answer("first", Err("500"))
                    .answer("second", Err("timeout"))
                    .answer("third", Err("bad json")),
            );
            let orch = orchestrator(providers(), client.clone(), Duration::from_secs(3600));
            let generation = orch.generate(&req).await;
            assert_eq!(client.calls(), vec!["first", "second", "third"]);
            assert_eq!(generation.source, ContentSource::Fallback);
            outputs.push(generation.content);
        }

        assert!(!outputs[0].is_empty());
        assert_eq!(outputs[0], outputs[1]);
        assert!(outputs[0].starts_with("[Content in Spanish]"));
    }

    #[tokio::test]
    async fn test_fallback_result_is_cached() {
        let client = Arc::new(ScriptedClient::default());
        let orch = orchestrator(providers(), client.clone(), Duration::from_secs(3600));

        orch.generate(&request()).await;
        let second = orch.generate(&request()).await;

        assert_eq!(second.source, ContentSource::Cache);
        assert_eq!(client.calls().len(), 3);
        assert_eq!(orch.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_different_tone_is_a_different_entry() {
        let client = Arc::new(ScriptedClient::default().answer("first", Ok("text")));
        let orch = orchestrator(providers(), client.clone(), Duration::from_secs(3600));

        orch.generate(&request()).await;
        orch.generate(&request().with_tone(Tone::Casual)).await;

        assert_eq!(client.calls().len(), 2);
        assert_eq!(orch.cache().len(), 2);
    }
}
