use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub theme: Theme,
    pub color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}' (values: light, dark)", other)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                url: String::new(),
                anon_key: String::new(),
            },
            ui: UiConfig {
                theme: Theme::Dark,
                color: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        Self::load_custom(&Self::config_file_path())
    }

    pub fn ensure_config_exists() -> AppResult<()> {
        let config_path = Self::config_file_path();
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save()?;
        }
        Ok(())
    }

    pub fn load_custom(config_path: &std::path::Path) -> AppResult<Self> {
        let mut config = if config_path.exists() {
            let content =
                std::fs::read_to_string(config_path).map_err(|e| AppError::Io(e.to_string()))?;

            toml::from_str(&content)
                .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?
        } else {
            let default_config = Config::default();
            default_config.save()?;
            default_config
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Environment variables take precedence over the config file.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("TABLERO_SUPABASE_URL") {
            if !url.is_empty() {
                self.backend.url = url;
            }
        }
        if let Ok(key) = std::env::var("TABLERO_SUPABASE_ANON_KEY") {
            if !key.is_empty() {
                self.backend.anon_key = key;
            }
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if !self.backend.url.is_empty()
            && !self.backend.url.starts_with("http://")
            && !self.backend.url.starts_with("https://")
        {
            return Err(AppError::Config(format!(
                "Backend URL must start with http:// or https:// (got '{}')",
                self.backend.url
            )));
        }
        Ok(())
    }

    /// Commands that reach the backend call this first; a blank URL or key
    /// is a fatal startup condition.
    pub fn require_backend(&self) -> AppResult<&BackendConfig> {
        if self.backend.url.is_empty() || self.backend.anon_key.is_empty() {
            return Err(AppError::Config(
                "Missing backend configuration. Set backend.url and backend.anon_key in the config file, or use TABLERO_SUPABASE_URL / TABLERO_SUPABASE_ANON_KEY environment variables".to_string(),
            ));
        }
        Ok(&self.backend)
    }

    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_file_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Io(e.to_string()))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content).map_err(|e| AppError::Io(e.to_string()))?;

        Ok(())
    }

    pub fn config_file_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tablero")
            .join("config.toml")
    }
}
