use std::fmt::Write as _;

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::state::{AppState, ObservabilitySnapshot};

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let observability = state.observability.snapshot();
    Json(serde_json::json!({
        "status": "ok",
        "upstream": state.api.base_url(),
        "observability": {
            "page_requests_total": observability.page_requests_total,
            "upstream_errors_total": observability.upstream_errors_total,
            "not_found_total": observability.not_found_total,
            "dropped_member_previews_total": observability.dropped_member_previews_total,
        }
    }))
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = render_prometheus_metrics(state.observability.snapshot());

    (
        [
            (header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-store"),
        ],
        body,
    )
}

fn render_prometheus_metrics(observability: ObservabilitySnapshot) -> String {
    let counters = [
        (
            "shinobi_page_requests_total",
            "Total page requests served (listings, details, about).",
            observability.page_requests_total,
        ),
        (
            "shinobi_upstream_errors_total",
            "Total page requests that failed because of the upstream API.",
            observability.upstream_errors_total,
        ),
        (
            "shinobi_not_found_total",
            "Total page requests answered with a not-found view.",
            observability.not_found_total,
        ),
        (
            "shinobi_dropped_member_previews_total",
            "Total group member previews left out after a failed lookup.",
            observability.dropped_member_previews_total,
        ),
    ];

    let mut body = String::new();
    for (name, help, value) in counters {
        let _ = writeln!(body, "# HELP {name} {help}");
        let _ = writeln!(body, "# TYPE {name} counter");
        let _ = writeln!(body, "{name} {value}");
    }
    body
}
