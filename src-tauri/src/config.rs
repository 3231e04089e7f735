//! Application configuration
//!
//! Stored as JSON in the app data directory; environment variables win over the file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const ENV_API_URL: &str = "STOCK_DESK_API_URL";
pub const ENV_API_TOKEN: &str = "STOCK_DESK_API_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "STOCK_DESK_TIMEOUT_SECS";

fn default_api_url() -> String {
    "http://127.0.0.1:8000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_limit() -> u32 {
    1000
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Page size used when loading the products offered at checkout
    #[serde(default = "default_page_limit")]
    pub product_page_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_token: None,
            request_timeout_secs: default_timeout_secs(),
            product_page_limit: default_page_limit(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> AppResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load, apply `.env` and process environment overrides, then validate.
    pub fn resolve(path: &Path) -> AppResult<Self> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }
        let mut config = Self::load(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(token) = lookup(ENV_API_TOKEN) {
            self.api_token = Some(token).filter(|t| !t.is_empty());
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            self.request_timeout_secs = secs
                .parse()
                .map_err(|_| AppError::Config(format!("{} must be a number", ENV_TIMEOUT_SECS)))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.api_url.trim().is_empty() {
            return Err(AppError::Config("api_url is empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::Config("request_timeout_secs must be positive".into()));
        }
        if self.product_page_limit == 0 {
            return Err(AppError::Config("product_page_limit must be positive".into()));
        }
        Ok(())
    }
}
