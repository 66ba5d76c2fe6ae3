use anyhow::Context;
use quire_theme::{FileStorage, PersistMode, ThemeStore};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_CONFIG_NAME: &str = "quire.config.json";

/// Quire configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding the persisted theme collection
    #[serde(default = "default_themes_dir")]
    pub themes_dir: String,

    /// Theme documents are resolved against
    #[serde(default = "default_active_theme")]
    pub active_theme: String,

    /// Default log filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub persist_mode: ConfigPersistMode,
}

/// When theme changes reach disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigPersistMode {
    /// Write after every change
    #[default]
    EveryChange,
    /// Write once when the command finishes
    OnExit,
}

impl From<ConfigPersistMode> for PersistMode {
    fn from(mode: ConfigPersistMode) -> Self {
        match mode {
            ConfigPersistMode::EveryChange => PersistMode::EveryChange,
            ConfigPersistMode::OnExit => PersistMode::Manual,
        }
    }
}

fn default_themes_dir() -> String {
    ".quire/themes".to_string()
}

fn default_active_theme() -> String {
    quire_theme::PLAIN_ID.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", config_path.display()))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn save(&self, cwd: &str) -> anyhow::Result<()> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);
        std::fs::write(config_path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Get absolute path to the themes directory
    pub fn get_themes_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.themes_dir)
    }

    /// Open the theme store and select the configured theme.
    ///
    /// An unknown `activeTheme` falls back to the store default.
    pub fn open_themes(&self, cwd: &str) -> anyhow::Result<ThemeStore<FileStorage>> {
        let storage = FileStorage::new(self.get_themes_dir(cwd));
        let mut store = ThemeStore::load(storage)?.with_persist_mode(self.persist_mode.into());
        if let Err(e) = store.set_active_theme(&self.active_theme) {
            warn!(theme_id = %self.active_theme, error = %e, "Configured theme unavailable");
        }
        Ok(store)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            themes_dir: default_themes_dir(),
            active_theme: default_active_theme(),
            log_level: default_log_level(),
            persist_mode: ConfigPersistMode::default(),
        }
    }
}
