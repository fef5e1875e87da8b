pub mod api;
pub mod pages;
pub mod sitemap;

use axum::body::Body;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use bytes::Bytes;
use serde::Serialize;

use crate::error::PageError;
use crate::views::PageMeta;

/// Serialize a view and mark it cacheable for `max_age_secs`.
pub(crate) fn json_view<T: Serialize>(view: &T, max_age_secs: u64) -> Response {
    let body = match serde_json::to_vec(view) {
        Ok(body) => Bytes::from(body),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize view");
            let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
            response
                .headers_mut()
                .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
            return response;
        }
    };

    let mut response = Response::new(Body::from(body));
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    if let Ok(cache_control) = HeaderValue::try_from(format!("public, max-age={max_age_secs}")) {
        headers.insert(header::CACHE_CONTROL, cache_control);
    }
    response
}

pub(crate) async fn not_found() -> PageError {
    PageError::NotFound(PageMeta::page_not_found())
}

/// The site root lands on the characters index.
pub(crate) async fn home() -> Redirect {
    Redirect::temporary("/characters")
}
