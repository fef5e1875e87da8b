use std::fmt::Write as _;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::SITEMAP_CHARACTER_PAGES;
use crate::state::AppState;

const SITEMAP_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

struct SitemapEntry {
    path: String,
    change_frequency: &'static str,
    priority: &'static str,
}

pub async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    let body = render_sitemap(&state.config.site_url, Utc::now());
    (
        [
            (header::CONTENT_TYPE, SITEMAP_CONTENT_TYPE),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        body,
    )
}

/// Home and the characters index, then the first character listing pages.
fn sitemap_entries() -> Vec<SitemapEntry> {
    let mut entries = vec![
        SitemapEntry {
            path: String::new(),
            change_frequency: "weekly",
            priority: "1.0",
        },
        SitemapEntry {
            path: "/characters".to_owned(),
            change_frequency: "daily",
            priority: "0.9",
        },
    ];
    entries.extend((1..=SITEMAP_CHARACTER_PAGES).map(|page| SitemapEntry {
        path: format!("/characters?page={page}"),
        change_frequency: "weekly",
        priority: "0.7",
    }));
    entries
}

fn render_sitemap(site_url: &str, last_modified: DateTime<Utc>) -> String {
    let last_modified = last_modified.to_rfc3339_opts(SecondsFormat::Secs, true);
    let site_url = site_url.trim_end_matches('/');

    let mut body = String::new();
    let _ = writeln!(body, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        body,
        r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#
    );
    for entry in sitemap_entries() {
        let loc = escape_xml(&format!("{site_url}{}", entry.path));
        let _ = writeln!(body, "<url>");
        let _ = writeln!(body, "<loc>{loc}</loc>");
        let _ = writeln!(body, "<lastmod>{last_modified}</lastmod>");
        let _ = writeln!(body, "<changefreq>{}</changefreq>", entry.change_frequency);
        let _ = writeln!(body, "<priority>{}</priority>", entry.priority);
        let _ = writeln!(body, "</url>");
    }
    let _ = writeln!(body, "</urlset>");
    body
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
