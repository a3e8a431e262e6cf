//! Memoized translation over an external provider.
//!
//! Lookups are keyed by `(text, target language)`. Failures never propagate:
//! a failed provider call warns through the notification sink and falls back
//! to the untranslated text.

use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use shared::TranslateRequest;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use crate::config::PreferenceStore;
use crate::provider::{NotificationSink, TranslationProvider};

/// Languages offered by the product.
pub const DEFAULT_LANGUAGES: &[&str] = &["en", "fi", "sv", "de", "fr", "es"];

/// Language content is authored in unless the caller says otherwise.
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";

/// Upper bound on memoized translations per session.
pub const DEFAULT_CACHE_CAPACITY: usize = 512;

/// Tunables for a [`Translator`].
#[derive(Debug, Clone)]
pub struct TranslatorOptions {
    /// Language codes `set_language` accepts.
    pub languages: Vec<String>,
    /// Assumed source language when the caller gives none.
    pub source_language: String,
    /// Cache entry bound; least-recently-used entries are evicted beyond it.
    pub cache_capacity: usize,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            languages: DEFAULT_LANGUAGES.iter().map(ToString::to_string).collect(),
            source_language: DEFAULT_SOURCE_LANGUAGE.to_string(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Session-scoped translation state. Cloning shares the same cache and
/// active language.
#[derive(Clone)]
pub struct Translator {
    inner: Arc<TranslatorInner>,
}

struct TranslatorInner {
    options: TranslatorOptions,
    provider: Arc<dyn TranslationProvider>,
    sink: Arc<dyn NotificationSink>,
    prefs: Arc<dyn PreferenceStore>,
    language: RwLock<String>,
    cache: Mutex<TranslationCache>,
    /// Concurrent identical requests coalesce onto one provider call.
    in_flight: DashMap<CacheKey, Shared<BoxFuture<'static, String>>>,
}

impl Translator {
    /// Builds a translator, restoring the persisted language when it is
    /// still among the configured languages.
    pub fn new(
        options: TranslatorOptions,
        provider: Arc<dyn TranslationProvider>,
        sink: Arc<dyn NotificationSink>,
        prefs: Arc<dyn PreferenceStore>,
    ) -> Self {
        let language = match prefs.load_language() {
            Some(code) if options.languages.iter().any(|l| *l == code) => code,
            Some(code) => {
                tracing::warn!(%code, "persisted language no longer available, using default");
                options.source_language.clone()
            }
            None => options.source_language.clone(),
        };

        Self {
            inner: Arc::new(TranslatorInner {
                cache: Mutex::new(TranslationCache::new(options.cache_capacity)),
                options,
                provider,
                sink,
                prefs,
                language: RwLock::new(language),
                in_flight: DashMap::new(),
            }),
        }
    }

    /// Current target language.
    pub fn language(&self) -> String {
        self.inner
            .language
            .read()
            .expect("language lock poisoned")
            .clone()
    }

    /// Switches the target language and persists the choice. Unsupported
    /// codes are logged and ignored.
    pub fn set_language(&self, code: &str) {
        if !self.inner.options.languages.iter().any(|l| l == code) {
            tracing::warn!(%code, "ignoring unsupported language code");
            return;
        }

        *self
            .inner
            .language
            .write()
            .expect("language lock poisoned") = code.to_string();
        tracing::info!(%code, "language changed");

        if let Err(err) = self.inner.prefs.save_language(code) {
            tracing::warn!(%err, "failed to persist language preference");
        }
    }

    /// Translates `text` into the active language.
    ///
    /// Returns `text` unchanged when the active language equals the source
    /// language (identity, no provider call) and when the provider fails
    /// (fail-open, after warning through the notification sink).
    pub async fn translate(&self, text: &str, source_language: Option<&str>) -> String {
        let source = source_language.unwrap_or(&self.inner.options.source_language);
        let target = self.language();
        if target == source {
            return text.to_string();
        }

        let key = CacheKey {
            text: text.to_string(),
            language: target,
        };
        if let Some(hit) = self.inner.lock_cache().get(&key) {
            return hit;
        }

        // Lock scope ends before the await below.
        let fut = {
            let entry = self
                .inner
                .in_flight
                .entry(key.clone())
                .or_insert_with(|| fetch(Arc::clone(&self.inner), key, source.to_string()));
            entry.value().clone()
        };
        fut.await
    }
}

impl TranslatorInner {
    fn lock_cache(&self) -> MutexGuard<'_, TranslationCache> {
        self.cache.lock().expect("translation cache lock poisoned")
    }
}

/// One provider call shared by every caller waiting on the same key.
/// Resolves to the translated text, or to the source text on failure.
fn fetch(
    inner: Arc<TranslatorInner>,
    key: CacheKey,
    source_language: String,
) -> Shared<BoxFuture<'static, String>> {
    async move {
        let request = TranslateRequest {
            text: key.text.clone(),
            target_language: key.language.clone(),
            source_language,
        };

        let out = match inner.provider.translate(&request).await {
            Ok(translated) => {
                inner.lock_cache().insert(key.clone(), translated.clone());
                tracing::debug!(language = %key.language, "translation cached");
                translated
            }
            Err(err) => {
                tracing::warn!(%err, language = %key.language, "translation failed, showing source text");
                inner
                    .sink
                    .warn("Translation is temporarily unavailable. Showing original text.");
                key.text.clone()
            }
        };

        inner.in_flight.remove(&key);
        out
    }
    .boxed()
    .shared()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    text: String,
    language: String,
}

/// LRU map from `(text, language)` to translated text.
struct TranslationCache {
    capacity: usize,
    tick: u64,
    entries: HashMap<CacheKey, CacheEntry>,
}

struct CacheEntry {
    value: String,
    last_used: u64,
}

impl TranslationCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            tick: 0,
            entries: HashMap::new(),
        }
    }

    fn get(&mut self, key: &CacheKey) -> Option<String> {
        self.tick += 1;
        let tick = self.tick;
        self.entries.get_mut(key).map(|entry| {
            entry.last_used = tick;
            entry.value.clone()
        })
    }

    fn insert(&mut self, key: CacheKey, value: String) {
        self.tick += 1;
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                tracing::debug!(text = %oldest.text, language = %oldest.language, "evicting translation");
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(
            key,
            CacheEntry {
                value,
                last_used: self.tick,
            },
        );
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}
