use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use crate::config::AppConfig;
use crate::upstream::ApiClient;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub config: Arc<AppConfig>,
    pub observability: Arc<ObservabilityCounters>,
}

#[derive(Debug, Default)]
pub struct ObservabilityCounters {
    page_requests_total: AtomicU64,
    upstream_errors_total: AtomicU64,
    not_found_total: AtomicU64,
    dropped_member_previews_total: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ObservabilitySnapshot {
    pub page_requests_total: u64,
    pub upstream_errors_total: u64,
    pub not_found_total: u64,
    pub dropped_member_previews_total: u64,
}

impl ObservabilityCounters {
    pub fn snapshot(&self) -> ObservabilitySnapshot {
        ObservabilitySnapshot {
            page_requests_total: self.page_requests_total.load(Ordering::Relaxed),
            upstream_errors_total: self.upstream_errors_total.load(Ordering::Relaxed),
            not_found_total: self.not_found_total.load(Ordering::Relaxed),
            dropped_member_previews_total: self
                .dropped_member_previews_total
                .load(Ordering::Relaxed),
        }
    }

    pub fn record_page_request(&self) {
        self.page_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_upstream_error(&self) {
        self.upstream_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_not_found(&self) {
        self.not_found_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped_member_previews(&self, count: u64) {
        self.dropped_member_previews_total
            .fetch_add(count, Ordering::Relaxed);
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, reqwest::Error> {
        let http = build_http_client(&config)?;
        Ok(Self {
            api: ApiClient::new(http, &config.api_base_url),
            config: Arc::new(config),
            observability: Arc::new(ObservabilityCounters::default()),
        })
    }
}

fn build_http_client(config: &AppConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent("shinobi-atlas/0.1")
        .timeout(config.upstream_http_timeout)
        .connect_timeout(config.upstream_connect_timeout)
        .build()
        .or_else(|e| {
            warn!(
                error = %e,
                "failed to build configured HTTP client, retrying without custom user-agent"
            );
            reqwest::Client::builder()
                .timeout(config.upstream_http_timeout)
                .connect_timeout(config.upstream_connect_timeout)
                .build()
        })
}
