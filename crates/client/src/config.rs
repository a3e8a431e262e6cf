use anyhow::Result;
use directories::ProjectDirs;
use mockall::automock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Durable user preferences, written on every language change and read once
/// at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

impl Preferences {
    pub fn preferences_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "fixflow", "fixflow")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        Ok(config_dir.join("preferences.toml"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::preferences_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let prefs: Preferences = toml::from_str(&content)?;
        Ok(prefs)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::preferences_path()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Storage seam for the active-language preference.
#[automock]
pub trait PreferenceStore: Send + Sync {
    /// Returns the persisted language code, if any.
    fn load_language(&self) -> Option<String>;

    /// Persists the language code.
    fn save_language(&self, code: &str) -> Result<()>;
}

/// File-backed preference store under the platform config directory.
#[derive(Debug, Clone, Default)]
pub struct FilePreferenceStore;

impl PreferenceStore for FilePreferenceStore {
    fn load_language(&self) -> Option<String> {
        match Preferences::load() {
            Ok(prefs) => Some(prefs.language),
            Err(err) => {
                tracing::warn!(%err, "failed to load preferences, using defaults");
                None
            }
        }
    }

    fn save_language(&self, code: &str) -> Result<()> {
        let mut prefs = Preferences::load().unwrap_or_default();
        prefs.language = code.to_string();
        prefs.save()
    }
}
