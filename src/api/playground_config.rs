use serde::{Deserialize, Serialize};

use crate::error::{PlaygroundError, PlaygroundResult};

pub const API_BASE_URL_ENV: &str = "API_BASE_URL";
pub const API_TIMEOUT_SECS_ENV: &str = "API_TIMEOUT_SECS";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8001";
pub const DEFAULT_UPLOAD_PATH: &str = "/api/upload-csv";
pub const DEFAULT_GENERATE_PATH: &str = "/api/generate-chart";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Remote API settings.
///
/// Serializable so hosts can keep it next to their own settings; every field
/// falls back to its default when missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaygroundConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_upload_path")]
    pub upload_path: String,
    #[serde(default = "default_generate_path")]
    pub generate_path: String,
    /// Transport timeout. `None` leaves the transport default in place.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            upload_path: default_upload_path(),
            generate_path: default_generate_path(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl PlaygroundConfig {
    /// Reads `API_BASE_URL` and `API_TIMEOUT_SECS` from the process
    /// environment.
    pub fn from_env() -> PlaygroundResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`PlaygroundConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PlaygroundResult<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup(API_BASE_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                config.api_base_url = url.to_owned();
            }
        }
        if let Some(raw) = lookup(API_TIMEOUT_SECS_ENV) {
            let raw = raw.trim();
            let secs = raw.parse::<u64>().map_err(|_| {
                PlaygroundError::InvalidSettings(format!(
                    "{API_TIMEOUT_SECS_ENV} must be a whole number of seconds, got `{raw}`"
                ))
            })?;
            config.request_timeout_secs = (secs > 0).then_some(secs);
        }
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_upload_path(mut self, path: impl Into<String>) -> Self {
        self.upload_path = path.into();
        self
    }

    #[must_use]
    pub fn with_generate_path(mut self, path: impl Into<String>) -> Self {
        self.generate_path = path.into();
        self
    }

    #[must_use]
    pub fn with_request_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn validate(&self) -> PlaygroundResult<()> {
        let host = self
            .api_base_url
            .strip_prefix("http://")
            .or_else(|| self.api_base_url.strip_prefix("https://"))
            .ok_or_else(|| {
                PlaygroundError::InvalidSettings(format!(
                    "api base url must start with http:// or https://, got `{}`",
                    self.api_base_url
                ))
            })?;
        if host.trim_matches('/').is_empty() {
            return Err(PlaygroundError::InvalidSettings(
                "api base url must name a host".to_owned(),
            ));
        }
        for (name, path) in [
            ("upload_path", &self.upload_path),
            ("generate_path", &self.generate_path),
        ] {
            if !path.starts_with('/') {
                return Err(PlaygroundError::InvalidSettings(format!(
                    "`{name}` must start with `/`, got `{path}`"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn upload_url(&self) -> String {
        join_url(&self.api_base_url, &self.upload_path)
    }

    #[must_use]
    pub fn generate_url(&self) -> String {
        join_url(&self.api_base_url, &self.generate_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_owned()
}

fn default_upload_path() -> String {
    DEFAULT_UPLOAD_PATH.to_owned()
}

fn default_generate_path() -> String {
    DEFAULT_GENERATE_PATH.to_owned()
}

fn default_request_timeout_secs() -> Option<u64> {
    Some(DEFAULT_REQUEST_TIMEOUT_SECS)
}
