use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{defaults, endpoints, models};
use crate::error::ConfigError;

/// Startup configuration for the Gemini client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Base for the resumable upload endpoint. Falls back to `base_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_base_url: Option<String>,
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
}

fn default_api_key_env() -> String {
    defaults::API_KEY_ENV.to_string()
}

fn default_base_url() -> String {
    endpoints::GEMINI_BASE_URL.to_string()
}

fn default_text_model() -> String {
    models::DEFAULT_TEXT_MODEL.to_string()
}

fn default_image_model() -> String {
    models::DEFAULT_IMAGE_MODEL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            upload_base_url: None,
            text_model: default_text_model(),
            image_model: default_image_model(),
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(defaults::CONFIG_DIR)
            .join(defaults::CONFIG_FILE)
    }

    /// Load settings from the default config location.
    ///
    /// Unlike most settings in a desktop app there is no silent fallback here:
    /// without a settings file the client cannot be constructed, so the host
    /// must handle the error at startup.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::config_path())
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        settings.api_key()?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// The configured API key, or the value of `api_key_env` when the file
    /// does not carry one.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            return Ok(key.to_string());
        }
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey(self.api_key_env.clone()))
    }

    pub fn upload_base_url(&self) -> &str {
        self.upload_base_url.as_deref().unwrap_or(&self.base_url)
    }

    /// Override both the text and the image model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.text_model = model.clone();
        self.image_model = model;
        self
    }
}
