//! Session-derived presentation state for the FixFlow client.
//!
//! Everything here derives display state from the read-only
//! [`shared::SessionEnvelope`]: the toast queue, the translation cache, the
//! trial banner, and role-based navigation. Session construction, refresh,
//! and expiry belong to the identity provider and are out of scope.

pub mod config;
pub mod provider;
pub mod roles;
pub mod state;
pub mod toast;
pub mod translator;
pub mod trial;

pub use config::{FilePreferenceStore, PreferenceStore, Preferences};
pub use provider::{
    HttpTranslationProvider, NotificationSink, ProviderError, TranslationProvider,
};
pub use roles::{nav_sections, NavSection, RoleExperience};
pub use state::AppState;
pub use toast::{
    NewToast, ToastOptions, ToastRecord, ToastStore, ToastSubscription, ToastVariant,
};
pub use translator::{Translator, TranslatorOptions};
pub use trial::{derive_trial_status, derive_trial_status_at, TrialDisplayState};
