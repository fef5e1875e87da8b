//! Fake upstream API and server spawning helpers for HTTP-level tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tokio::task::JoinHandle;

use crate::config::AppConfig;
use crate::state::AppState;

/// Character id the fake upstream answers with a 500.
pub(crate) const FAILING_CHARACTER_ID: u64 = 2;
/// Character id whose payload has a blank name.
pub(crate) const BLANK_NAME_CHARACTER_ID: u64 = 999;
/// List page the fake upstream answers with a 503.
pub(crate) const UNAVAILABLE_PAGE: u32 = 503;
/// List page the fake upstream answers with a 404.
pub(crate) const MISSING_PAGE: u32 = 404;
/// List page whose envelope reports `currentPage: 0`.
pub(crate) const INVALID_PAGE: u32 = 422;
/// List page that contains a record with a blank name.
pub(crate) const BLANK_NAME_PAGE: u32 = 7;

#[derive(Clone, Default)]
struct RequestLog(Arc<Mutex<Vec<String>>>);

#[derive(Clone, Default)]
struct FakeState {
    log: RequestLog,
    character_latency: Duration,
}

pub(crate) struct FakeUpstream {
    addr: SocketAddr,
    log: RequestLog,
    handle: JoinHandle<()>,
}

impl FakeUpstream {
    pub(crate) fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Path and query of every request received so far, in arrival order.
    pub(crate) fn requests(&self) -> Vec<String> {
        self.log.0.lock().expect("request log lock").clone()
    }
}

impl Drop for FakeUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub(crate) async fn spawn_router(app: Router) -> (SocketAddr, JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test app");
    });
    (addr, handle)
}

pub(crate) async fn spawn_fake_upstream() -> FakeUpstream {
    spawn_fake_upstream_with_latency(Duration::ZERO).await
}

/// Fake upstream that holds every `/characters/{id}` answer back by `character_latency`.
pub(crate) async fn spawn_fake_upstream_with_latency(character_latency: Duration) -> FakeUpstream {
    let state = FakeState {
        log: RequestLog::default(),
        character_latency,
    };
    let log = state.log.clone();
    let app = Router::new()
        .route("/characters", get(characters_page))
        .route("/characters/{id}", get(character_by_id))
        .route("/clans", get(clans_page))
        .route("/villages", get(villages_page))
        .route("/status/{code}", get(status))
        .route("/malformed", get(malformed))
        .route("/echo-headers", get(echo_headers))
        .layer(middleware::from_fn_with_state(state, record_request));
    let (addr, handle) = spawn_router(app).await;
    FakeUpstream { addr, log, handle }
}

/// Application state wired to the given fake upstream.
pub(crate) fn state_for(upstream: &FakeUpstream) -> AppState {
    AppState::new(AppConfig::with_api_base_url(&upstream.base_url())).expect("build app state")
}

async fn record_request(State(state): State<FakeState>, request: Request, next: Next) -> Response {
    let target = request
        .uri()
        .path_and_query()
        .map(|target| target.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let delayed = request.uri().path().starts_with("/characters/");
    state.log.0.lock().expect("request log lock").push(target);

    if delayed && !state.character_latency.is_zero() {
        tokio::time::sleep(state.character_latency).await;
    }
    next.run(request).await
}

#[derive(Deserialize)]
struct PageParams {
    page: Option<u32>,
}

async fn characters_page(Query(params): Query<PageParams>) -> Response {
    let page = params.page.unwrap_or(1);
    match page {
        UNAVAILABLE_PAGE => return StatusCode::SERVICE_UNAVAILABLE.into_response(),
        INVALID_PAGE => {
            return Json(json!({"characters": [], "currentPage": 0, "pageSize": 20, "total": 0}))
                .into_response();
        }
        BLANK_NAME_PAGE => {
            return Json(json!({
                "characters": [
                    {"id": 1, "name": "Naruto Uzumaki"},
                    {"id": 2, "name": ""}
                ],
                "currentPage": page,
                "pageSize": 20,
                "total": 1431
            }))
            .into_response();
        }
        _ => {}
    }

    Json(json!({
        "characters": [
            {
                "id": 1,
                "name": "Naruto Uzumaki",
                "images": ["https://img.example/naruto.png"],
                "jutsu": ["Rasengan", "Shadow Clone Technique"],
                "natureType": ["Wind Release"],
                "personal": {"clan": "Uzumaki", "affiliation": ["Konohagakure"], "team": ["Team Kakashi"]}
            },
            {
                "id": 3,
                "name": "Sakura Haruno",
                "jutsu": ["Cherry Blossom Impact"],
                "personal": {"clan": null, "affiliation": ["Konohagakure"], "occupation": "Medical-nin"}
            },
            {
                "id": 8,
                "name": "Gaara",
                "personal": {"affiliation": ["Sunagakure"], "classification": ["Jinchūriki", "Kage"]}
            }
        ],
        "currentPage": page,
        "pageSize": 20,
        "total": 1431
    }))
    .into_response()
}

async fn character_by_id(Path(id): Path<u64>) -> Response {
    match id {
        404 => StatusCode::NOT_FOUND.into_response(),
        FAILING_CHARACTER_ID => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        BLANK_NAME_CHARACTER_ID => Json(json!({"id": id, "name": ""})).into_response(),
        1 => Json(json!({
            "id": 1,
            "name": "Naruto Uzumaki",
            "images": ["https://img.example/naruto.png"],
            "jutsu": ["Rasengan", "Shadow Clone Technique"],
            "personal": {"clan": "Uzumaki", "affiliation": ["Konohagakure", "Mount Myōboku"]},
            "voiceActors": {"japanese": "Junko Takeuchi", "english": ["Maile Flanagan"]}
        }))
        .into_response(),
        3 => Json(json!({"id": 3, "name": "Sasuke Uchiha", "images": []})).into_response(),
        _ => Json(json!({
            "id": id,
            "name": format!("Shinobi {id}"),
            "images": [format!("https://img.example/{id}.png")]
        }))
        .into_response(),
    }
}

async fn clans_page(Query(params): Query<PageParams>) -> Response {
    let page = params.page.unwrap_or(1);
    match page {
        UNAVAILABLE_PAGE => return StatusCode::SERVICE_UNAVAILABLE.into_response(),
        INVALID_PAGE => {
            return Json(json!({"clans": [], "currentPage": 1, "pageSize": 0, "total": 0}))
                .into_response();
        }
        BLANK_NAME_PAGE => {
            return Json(json!({
                "clans": [{"id": 13, "name": "", "characters": [BLANK_NAME_CHARACTER_ID]}],
                "currentPage": page,
                "pageSize": 20,
                "total": 41
            }))
            .into_response();
        }
        _ => {}
    }

    Json(json!({
        "clans": [
            {"id": 10, "name": "Uchiha", "characters": [1, 2, 3, 4, 5, 6]},
            {"id": 11, "name": "nara", "characters": [7]},
            {"id": 12, "name": "Ōtsutsuki", "characters": []}
        ],
        "currentPage": page,
        "pageSize": 20,
        "total": 41
    }))
    .into_response()
}

async fn villages_page(Query(params): Query<PageParams>) -> Response {
    let page = params.page.unwrap_or(1);
    if page == MISSING_PAGE {
        return StatusCode::NOT_FOUND.into_response();
    }

    Json(json!({
        "villages": [
            {"id": 20, "name": "Konohagakure", "characters": [1, 3]}
        ],
        "currentPage": page,
        "pageSize": 20,
        "total": 1
    }))
    .into_response()
}

async fn status(Path(code): Path<u16>) -> Response {
    StatusCode::from_u16(code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        .into_response()
}

async fn malformed() -> Response {
    ([(header::CONTENT_TYPE, "application/json")], "<html>not json</html>").into_response()
}

async fn echo_headers(headers: HeaderMap) -> Json<serde_json::Value> {
    let read = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    Json(json!({
        "cacheControl": read("cache-control"),
        "cacheTag": read("cache-tag"),
    }))
}
