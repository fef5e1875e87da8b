//! Typed access to the upstream REST API.
//!
//! One GET per call, no retries. Non-success statuses become [`ApiError`]; when a
//! schema is supplied the decoded body must also pass it, otherwise the call fails
//! with a [`ValidationError`] that names the endpoint.

use std::sync::Arc;

use reqwest::header::CACHE_CONTROL;
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::{Validate, ValidationErrors};

use crate::config::DEFAULT_REVALIDATE_SECS;
use crate::error::{ApiError, FetchError, ValidationError};

const CACHE_TAG: &str = "cache-tag";

pub type Schema<T> = fn(&T) -> Result<(), ValidationErrors>;

/// Per-call caching hints and optional schema.
///
/// `revalidate` and `tags` are forwarded to the upstream as request headers and are
/// otherwise opaque here.
pub struct FetchOptions<T> {
    pub revalidate: u64,
    pub tags: Vec<String>,
    pub schema: Option<Schema<T>>,
}

impl<T> Default for FetchOptions<T> {
    fn default() -> Self {
        Self {
            revalidate: DEFAULT_REVALIDATE_SECS,
            tags: Vec::new(),
            schema: None,
        }
    }
}

impl<T> FetchOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revalidate(mut self, seconds: u64) -> Self {
        self.revalidate = seconds;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn schema(mut self, schema: Schema<T>) -> Self {
        self.schema = Some(schema);
        self
    }
}

impl<T: Validate> FetchOptions<T> {
    /// Validate the decoded body with its `validator` rules.
    pub fn validated(self) -> Self {
        self.schema(<T as Validate>::validate)
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_data<T: DeserializeOwned>(
        &self,
        path: &str,
        options: FetchOptions<T>,
    ) -> Result<T, FetchError> {
        let endpoint = normalize_endpoint(path);
        let url = format!("{}{endpoint}", self.base_url);
        debug!(
            %endpoint,
            revalidate = options.revalidate,
            tags = ?options.tags,
            "fetching upstream"
        );

        let mut request = self
            .http
            .get(&url)
            .header(CACHE_CONTROL, format!("max-age={}", options.revalidate));
        if !options.tags.is_empty() {
            request = request.header(CACHE_TAG, options.tags.join(","));
        }

        let response = request
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                endpoint,
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            )
            .into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;
        let data: T = serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            endpoint: endpoint.clone(),
            source,
        })?;

        if let Some(schema) = options.schema {
            schema(&data).map_err(|errors| ValidationError::from_errors(endpoint, &errors))?;
        }

        Ok(data)
    }
}

/// `characters/1` and `/characters/1` name the same endpoint.
pub fn normalize_endpoint(path: &str) -> String {
    if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}
