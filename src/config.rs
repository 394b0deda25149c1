use std::time::Duration;

use crate::error::{PanelError, Result};

/// Configuration for the panel client.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Origin of the admin backend (e.g. `https://admin.example.com`).
    pub base_url: String,
    /// Path prefix shared by all resource endpoints.
    pub api_prefix: String,
    /// Rows requested per page when a loader does not override it.
    pub per_page: u64,
    /// Language used for translation files.
    pub language: String,
    /// Language tried when the requested one fails to load.
    pub default_language: String,
    /// Token sent as `X-CSRF-Token` on mutating requests.
    pub csrf_token: Option<String>,
    /// Send updates as `POST` with `_method=PUT` instead of a real `PUT`.
    pub emulate_put: bool,
    /// Lifetime of lookup cache entries.
    pub lookup_ttl: Duration,
    /// How long a notification stays visible.
    pub notification_duration: Duration,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_prefix: "/api".into(),
            per_page: 10,
            language: "en".into(),
            default_language: "en".into(),
            csrf_token: None,
            emulate_put: false,
            lookup_ttl: Duration::from_secs(300),
            notification_duration: crate::notify::DEFAULT_DURATION,
        }
    }
}

impl PanelConfig {
    /// Build a config for `base_url` with every other field defaulted.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Read the config from `PANEL_*` environment variables, loading `.env`
    /// first when present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let base_url = dotenvy::var("PANEL_BASE_URL")
            .map_err(|_| PanelError::Config("PANEL_BASE_URL is required".into()))?;
        let mut config = Self::new(base_url);

        if let Ok(v) = dotenvy::var("PANEL_PER_PAGE") {
            config.per_page = v
                .parse()
                .map_err(|_| PanelError::Config(format!("invalid PANEL_PER_PAGE: {v}")))?;
        }
        if let Ok(v) = dotenvy::var("PANEL_LANGUAGE") {
            config.language = v;
        }
        if let Ok(v) = dotenvy::var("PANEL_CSRF_TOKEN") {
            config.csrf_token = Some(v);
        }
        if let Ok(v) = dotenvy::var("PANEL_EMULATE_PUT") {
            config.emulate_put = matches!(v.as_str(), "1" | "true" | "yes");
        }

        Ok(config)
    }

    /// Full URL of an API resource, e.g. `brands` -> `<base>/api/brands`.
    pub fn resource_url(&self, resource: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_prefix.trim_end_matches('/'),
            resource.trim_start_matches('/')
        )
    }
}
