//! Storefront configuration: which theme, which backend, which policies.
//!
//! The three storefront themes share one implementation and differ only in
//! the [`StorefrontPolicy`] they run with.

use core::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_core::CategoryKey;
use storefront_products::CommentPolicy;

pub const ENV_THEME: &str = "STOREFRONT_THEME";
pub const ENV_API_URL: &str = "STOREFRONT_API_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "STOREFRONT_HTTP_TIMEOUT_SECS";

/// Categories whose comment files the client-side aggregation reads.
const COMMENT_CATEGORIES: [&str; 4] = ["ayakkabi", "sapka", "sweat", "tshirt"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown theme: {0}")]
    UnknownTheme(String),
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Storefront theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Classic,
    NordWood,
    NeonGrid,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Classic => "classic",
            Theme::NordWood => "nordwood",
            Theme::NeonGrid => "neongrid",
        }
    }

    /// Backend each theme talks to when no URL is configured.
    pub fn default_api_url(&self) -> &'static str {
        match self {
            Theme::Classic => "http://127.0.0.1:8001",
            Theme::NordWood => "http://127.0.0.1:8002",
            Theme::NeonGrid => "http://127.0.0.1:8003",
        }
    }
}

impl FromStr for Theme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" | "ecommerce1" => Ok(Theme::Classic),
            "nordwood" | "ecommerce2" => Ok(Theme::NordWood),
            "neongrid" | "ecommerce3" => Ok(Theme::NeonGrid),
            other => Err(ConfigError::UnknownTheme(other.to_string())),
        }
    }
}

/// Where listing-page ratings come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RatingSource {
    /// `/rating-summary?flat=true`, computed by the backend.
    FlatSummary,
    /// `/comments/{category}` for each category, aggregated here.
    CommentDocuments { categories: Vec<CategoryKey> },
}

/// Behaviour that differs between themes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontPolicy {
    pub rating_source: RatingSource,
    #[serde(default)]
    pub comment_policy: CommentPolicy,
    /// Use a product's own `rating` field when no summary exists.
    #[serde(default)]
    pub static_rating_fallback: bool,
}

impl StorefrontPolicy {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Classic => Self {
                rating_source: RatingSource::FlatSummary,
                comment_policy: CommentPolicy::Lenient,
                static_rating_fallback: true,
            },
            Theme::NordWood => Self {
                rating_source: RatingSource::FlatSummary,
                comment_policy: CommentPolicy::Lenient,
                static_rating_fallback: false,
            },
            Theme::NeonGrid => Self {
                rating_source: RatingSource::CommentDocuments {
                    categories: COMMENT_CATEGORIES
                        .iter()
                        .filter_map(|c| CategoryKey::new(*c).ok())
                        .collect(),
                },
                comment_policy: CommentPolicy::Strict,
                static_rating_fallback: false,
            },
        }
    }
}

/// Full client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub theme: Theme,
    pub api_url: String,
    pub policy: StorefrontPolicy,
    /// Per-request timeout; `None` waits as long as the backend takes.
    pub http_timeout: Option<Duration>,
}

impl StorefrontConfig {
    pub fn for_theme(theme: Theme) -> Self {
        Self {
            theme,
            api_url: theme.default_api_url().to_string(),
            policy: StorefrontPolicy::for_theme(theme),
            http_timeout: None,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_policy(mut self, policy: StorefrontPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Read `STOREFRONT_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_theme(None)
    }

    /// Like [`from_env`](Self::from_env), with `theme` taking precedence over
    /// `STOREFRONT_THEME`. The other variables still apply.
    pub fn from_env_with_theme(theme: Option<Theme>) -> Result<Self, ConfigError> {
        Self::from_lookup_with_theme(|name| std::env::var(name).ok(), theme)
    }

    /// Build a config from any variable source (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup_with_theme(lookup, None)
    }

    pub fn from_lookup_with_theme<F>(lookup: F, theme: Option<Theme>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let theme = match (theme, lookup(ENV_THEME)) {
            (Some(theme), _) => theme,
            (None, Some(value)) if !value.trim().is_empty() => value.parse()?,
            _ => Theme::default(),
        };

        let mut config = Self::for_theme(theme);

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config.api_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_HTTP_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: ENV_HTTP_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            config.http_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}
