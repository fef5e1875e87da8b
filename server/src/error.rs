use std::fmt::Write as _;

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::debug;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::views::PageMeta;

/// Coarse classification of a non-success upstream status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    NotFound,
    Client,
    Server,
    Other,
}

impl ApiErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => Self::NotFound,
            400..=499 => Self::Client,
            500..=599 => Self::Server,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to fetch {endpoint}: {status} {status_text}")]
pub struct ApiError {
    pub endpoint: String,
    pub status: u16,
    pub status_text: String,
}

impl ApiError {
    pub fn new(endpoint: impl Into<String>, status: u16, status_text: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            status,
            status_text: status_text.into(),
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        ApiErrorKind::from_status(self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ApiErrorKind::NotFound
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed for {endpoint}: {}", summarize(.issues))]
pub struct ValidationError {
    pub endpoint: String,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn from_errors(endpoint: impl Into<String>, errors: &ValidationErrors) -> Self {
        let mut issues = Vec::new();
        collect_issues("", errors, &mut issues);
        issues.sort_by(|a, b| a.path.cmp(&b.path));
        Self {
            endpoint: endpoint.into(),
            issues,
        }
    }
}

fn collect_issues(prefix: &str, errors: &ValidationErrors, issues: &mut Vec<ValidationIssue>) {
    for (field, kind) in errors.errors() {
        let field = wire_name(field);
        let path = if prefix.is_empty() {
            field
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(failures) => {
                issues.extend(failures.iter().map(|failure| ValidationIssue {
                    path: path.clone(),
                    reason: describe_failure(failure),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_issues(&path, nested, issues),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_issues(&format!("{path}[{index}]"), nested, issues);
                }
            }
        }
    }
}

/// Upstream payloads are camelCase; `current_page` is reported as `currentPage`.
fn wire_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = !name.is_empty();
        } else if upper {
            name.extend(ch.to_uppercase());
            upper = false;
        } else {
            name.push(ch);
        }
    }
    name
}

fn describe_failure(failure: &validator::ValidationError) -> String {
    if let Some(message) = &failure.message {
        return message.to_string();
    }

    let mut params: Vec<_> = failure
        .params
        .iter()
        .filter(|(name, _)| {
            let name: &str = name;
            name != "value"
        })
        .collect();
    if params.is_empty() {
        return failure.code.to_string();
    }

    params.sort_by(|(a, _), (b, _)| a.cmp(b));
    let mut reason = format!("{} (", failure.code);
    for (i, (name, value)) in params.into_iter().enumerate() {
        if i > 0 {
            reason.push_str(", ");
        }
        let _ = write!(reason, "{name} = {value}");
    }
    reason.push(')');
    reason
}

fn summarize(issues: &[ValidationIssue]) -> String {
    if issues.is_empty() {
        return "schema rejected the payload".to_owned();
    }

    issues
        .iter()
        .map(|issue| format!("{}: {}", issue.path, issue.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Everything [`crate::upstream::ApiClient::fetch_data`] can fail with.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        source: reqwest::Error,
    },
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Transport { endpoint, .. } | Self::Decode { endpoint, .. } => endpoint,
            Self::Api(error) => &error.endpoint,
            Self::Validation(error) => &error.endpoint,
        }
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_not_found)
    }
}

/// Failure of a page handler, rendered as the matching error view.
#[derive(Debug)]
pub enum PageError {
    NotFound(PageMeta),
    Upstream(FetchError),
}

#[derive(Serialize)]
struct ErrorView<'a> {
    error: &'static str,
    message: &'a str,
    retryable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<&'a PageMeta>,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, view) = match &self {
            Self::NotFound(meta) => (
                StatusCode::NOT_FOUND,
                ErrorView {
                    error: "not_found",
                    message: &meta.description,
                    retryable: false,
                    meta: Some(meta),
                },
            ),
            Self::Upstream(error) => {
                debug!(endpoint = error.endpoint(), "rendering upstream failure");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorView {
                        error: "upstream_unavailable",
                        message: "Something went wrong while loading this page. Please try again.",
                        retryable: true,
                        meta: None,
                    },
                )
            }
        };

        let mut response = (status, Json(view)).into_response();
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        response
    }
}
