//! Application-level wiring of the session-derived stores.

use std::sync::Arc;

use crate::config::{FilePreferenceStore, PreferenceStore};
use crate::provider::{NotificationSink, TranslationProvider};
use crate::toast::{NewToast, ToastOptions, ToastStore};
use crate::translator::{Translator, TranslatorOptions};

/// Translation failures surface through the toast queue.
impl NotificationSink for ToastStore {
    fn warn(&self, message: &str) {
        self.add(NewToast::destructive(message));
    }
}

/// The stores owned for the lifetime of the application instance.
/// Constructed once at startup and handed to consumers by reference.
#[derive(Clone)]
pub struct AppState {
    pub toasts: ToastStore,
    pub translator: Translator,
}

impl AppState {
    /// Builds the state layer with default options and file-backed
    /// preferences.
    pub fn new(provider: Arc<dyn TranslationProvider>) -> Self {
        Self::with_options(
            ToastOptions::default(),
            TranslatorOptions::default(),
            provider,
            Arc::new(FilePreferenceStore),
        )
    }

    pub fn with_options(
        toast_options: ToastOptions,
        translator_options: TranslatorOptions,
        provider: Arc<dyn TranslationProvider>,
        prefs: Arc<dyn PreferenceStore>,
    ) -> Self {
        let toasts = ToastStore::new(toast_options);
        let translator = Translator::new(
            translator_options,
            provider,
            Arc::new(toasts.clone()),
            prefs,
        );
        tracing::info!("application state initialized");

        Self { toasts, translator }
    }

    /// Tears down timers; call once when the application instance exits.
    pub fn shutdown(&self) {
        self.toasts.shutdown();
    }
}
