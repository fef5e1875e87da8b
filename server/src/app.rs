use axum::Router;
use axum::routing::get;
use tower_http::compression::CompressionLayer;

use crate::routes;
use crate::state::AppState;

/// Page views, served at the site paths that canonical links and the sitemap point to.
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/characters", get(routes::pages::list_characters))
        .route("/characters/{id}", get(routes::pages::character_detail))
        .route("/clans", get(routes::pages::list_clans))
        .route("/villages", get(routes::pages::list_villages))
        .route("/about", get(routes::pages::about))
}

pub(crate) fn build_app(state: AppState) -> Router {
    let api = page_routes()
        .route("/health", get(routes::api::health))
        .route("/metrics", get(routes::api::metrics));

    Router::new()
        .route("/", get(routes::home))
        .merge(page_routes())
        .nest("/api", api)
        .route("/sitemap.xml", get(routes::sitemap::sitemap))
        .fallback(routes::not_found)
        .layer(CompressionLayer::new())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::build_app;
    use crate::config::AppConfig;
    use crate::state::AppState;
    use crate::test_support::{spawn_fake_upstream, state_for};

    fn offline_app() -> axum::Router {
        build_app(
            AppState::new(AppConfig::with_api_base_url("http://127.0.0.1:9"))
                .expect("build state"),
        )
    }

    #[tokio::test]
    async fn unknown_routes_render_json_not_found() {
        let response = offline_app()
            .oneshot(
                Request::builder()
                    .uri("/api/jutsu")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("fallback response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .and_then(|value| value.to_str().ok()),
            Some("no-store")
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(json["error"], "not_found");
        assert_eq!(json["meta"]["title"], "Page Not Found");
    }

    #[tokio::test]
    async fn compresses_when_client_accepts_gzip() {
        let response = offline_app()
            .oneshot(
                Request::builder()
                    .uri("/api/about")
                    .header(header::ACCEPT_ENCODING, "gzip")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("about response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_ENCODING)
                .and_then(|value| value.to_str().ok()),
            Some("gzip")
        );
    }

    #[tokio::test]
    async fn advertised_site_paths_serve_page_views() {
        let upstream = spawn_fake_upstream().await;
        let app = build_app(state_for(&upstream));

        for (path, title) in [
            ("/characters", "Characters"),
            ("/characters/1", "Naruto Uzumaki | Naruto Characters"),
            ("/clans", "Clans"),
            ("/villages", "Villages"),
            ("/about", "About"),
        ] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(path).body(Body::empty()).expect("request"))
                .await
                .expect("page response");
            assert_eq!(response.status(), StatusCode::OK, "{path}");

            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .expect("read body");
            let json: serde_json::Value = serde_json::from_slice(&body).expect("json body");
            assert_eq!(json["meta"]["title"], title, "{path}");
        }
    }

    #[tokio::test]
    async fn site_root_redirects_to_characters() {
        let response = offline_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
            .await
            .expect("root response");

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/characters")
        );
    }
}
