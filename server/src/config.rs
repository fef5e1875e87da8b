use std::time::Duration;

pub const DEFAULT_REVALIDATE_SECS: u64 = 60;
pub const DETAIL_REVALIDATE_SECS: u64 = 3600;
pub const STATIC_PAGE_MAX_AGE_SECS: u64 = 86400;

pub const MAX_PAGE_NUMBER: u32 = 1000;
pub const MAX_MEMBERS_PREVIEW: usize = 4;
pub const SITEMAP_CHARACTER_PAGES: u32 = 50;

pub const DEFAULT_SITE_URL: &str = "https://naruto-universe.com";
pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS: u64 = 3;

const API_BASE_URL_VAR: &str = "API_BASE_URL";
const SITE_URL_VAR: &str = "SITE_URL";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{name} must be an absolute http(s) URL, got {value:?}")]
    InvalidUrl { name: &'static str, value: String },
}

/// Process-wide settings, resolved once in `main` before the listener starts.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Upstream API origin without a trailing slash.
    pub api_base_url: String,
    /// Public origin of this site, used for the sitemap and canonical links.
    pub site_url: String,
    pub port: u16,
    pub upstream_http_timeout: Duration,
    pub upstream_connect_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = std::env::var(API_BASE_URL_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(API_BASE_URL_VAR))?;
        let api_base_url = parse_http_url(API_BASE_URL_VAR, &api_base_url)?;

        let site_url = match std::env::var(SITE_URL_VAR) {
            Ok(value) if !value.trim().is_empty() => parse_http_url(SITE_URL_VAR, &value)?,
            _ => DEFAULT_SITE_URL.to_owned(),
        };

        Ok(Self {
            site_url,
            port: server_port(),
            upstream_http_timeout: upstream_http_timeout(),
            upstream_connect_timeout: upstream_connect_timeout(),
            ..Self::with_api_base_url(&api_base_url)
        })
    }

    /// Defaults for everything except the upstream origin.
    pub fn with_api_base_url(api_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.trim().trim_end_matches('/').to_owned(),
            site_url: DEFAULT_SITE_URL.to_owned(),
            port: DEFAULT_SERVER_PORT,
            upstream_http_timeout: Duration::from_secs(DEFAULT_UPSTREAM_HTTP_TIMEOUT_SECS),
            upstream_connect_timeout: Duration::from_secs(DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS),
        }
    }
}

fn parse_http_url(name: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    match reqwest::Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
            Ok(trimmed.trim_end_matches('/').to_owned())
        }
        _ => Err(ConfigError::InvalidUrl {
            name,
            value: raw.to_owned(),
        }),
    }
}

pub fn server_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

pub fn upstream_http_timeout() -> Duration {
    std::env::var("UPSTREAM_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_UPSTREAM_HTTP_TIMEOUT_SECS))
}

pub fn upstream_connect_timeout() -> Duration {
    std::env::var("UPSTREAM_CONNECT_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS))
}
