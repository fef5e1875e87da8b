use axum::extract::{Path, Query, State};
use axum::response::Response;
use serde::Deserialize;
use shinobi_shared::{Character, CharactersResponse, GroupKind, filter_entities};
use tracing::{debug, warn};

use super::json_view;
use crate::config::{
    DEFAULT_REVALIDATE_SECS, DETAIL_REVALIDATE_SECS, MAX_PAGE_NUMBER, STATIC_PAGE_MAX_AGE_SECS,
};
use crate::error::{FetchError, PageError};
use crate::services::member_aggregator::{fetch_groups_with_members, unresolved_previews};
use crate::state::AppState;
use crate::upstream::FetchOptions;
use crate::views::{
    AboutView, CharacterDetailView, CharactersView, GroupsView, PageMeta, PaginationView,
};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub q: Option<String>,
}

impl ListParams {
    fn page(&self) -> u32 {
        validate_page(self.page.as_deref())
    }

    fn query(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// Page number from a raw query value.
///
/// Reads the leading integer (`"12abc"` is 12). Missing, unparsable and values below 1
/// give 1; anything above [`MAX_PAGE_NUMBER`] is clamped to it.
pub fn validate_page(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return 1;
    };

    let trimmed = raw.trim_start();
    if trimmed.starts_with('-') {
        return 1;
    }
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let digits: Vec<u64> = unsigned
        .chars()
        .map_while(|ch| ch.to_digit(10))
        .map(u64::from)
        .collect();
    if digits.is_empty() {
        return 1;
    }

    let value = digits
        .into_iter()
        .fold(0u64, |acc, digit| acc.saturating_mul(10).saturating_add(digit));
    let clamped = value.clamp(1, u64::from(MAX_PAGE_NUMBER));
    u32::try_from(clamped).unwrap_or(MAX_PAGE_NUMBER)
}

fn parse_character_id(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok()
}

/// Map a fetch failure to the page error, keeping counters and logs in step.
fn upstream_failure(state: &AppState, error: FetchError, not_found: fn() -> PageMeta) -> PageError {
    if error.is_not_found() {
        debug!(endpoint = error.endpoint(), "upstream resource not found");
        state.observability.record_not_found();
        return PageError::NotFound(not_found());
    }

    match &error {
        FetchError::Validation(validation) => warn!(
            endpoint = %validation.endpoint,
            issues = ?validation.issues,
            "upstream payload failed validation"
        ),
        FetchError::Api(api) => warn!(
            endpoint = %api.endpoint,
            status = api.status,
            kind = ?api.kind(),
            "upstream returned an error status"
        ),
        _ => warn!(error = %error, "upstream request failed"),
    }
    state.observability.record_upstream_error();
    PageError::Upstream(error)
}

pub async fn list_characters(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, PageError> {
    state.observability.record_page_request();
    let page = params.page();
    let query = params.query();

    let response: CharactersResponse = state
        .api
        .fetch_data(
            &format!("/characters?page={page}"),
            FetchOptions::new()
                .revalidate(DEFAULT_REVALIDATE_SECS)
                .tag("characters")
                .tag(format!("characters-page-{page}"))
                .validated(),
        )
        .await
        .map_err(|e| upstream_failure(&state, e, PageMeta::page_not_found))?;

    let meta = response.meta();
    let characters = filter_entities(&response.characters, query.unwrap_or_default());
    debug!(page, query = ?query, matches = characters.len(), "rendering characters");

    let view = CharactersView {
        characters,
        query,
        total: meta.total,
        pagination: if query.is_some() {
            None
        } else {
            PaginationView::new(&meta)
        },
        meta: PageMeta::characters(query, page),
    };
    Ok(json_view(&view, DEFAULT_REVALIDATE_SECS))
}

pub async fn character_detail(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, PageError> {
    state.observability.record_page_request();
    let Some(id) = parse_character_id(&raw_id) else {
        state.observability.record_not_found();
        return Err(PageError::NotFound(PageMeta::character_not_found()));
    };

    let character: Character = state
        .api
        .fetch_data(
            &format!("/characters/{id}"),
            FetchOptions::new()
                .revalidate(DETAIL_REVALIDATE_SECS)
                .tag(format!("character-{id}")),
        )
        .await
        .map_err(|e| upstream_failure(&state, e, PageMeta::character_not_found))?;

    let view = CharacterDetailView {
        meta: PageMeta::character(&character),
        character: &character,
    };
    Ok(json_view(&view, DETAIL_REVALIDATE_SECS))
}

pub async fn list_clans(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, PageError> {
    list_groups(&state, GroupKind::Clan, &params).await
}

pub async fn list_villages(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, PageError> {
    list_groups(&state, GroupKind::Village, &params).await
}

async fn list_groups(
    state: &AppState,
    kind: GroupKind,
    params: &ListParams,
) -> Result<Response, PageError> {
    state.observability.record_page_request();
    let page = params.page();

    let group_page = fetch_groups_with_members(&state.api, kind, page)
        .await
        .map_err(|e| upstream_failure(state, e, PageMeta::page_not_found))?;

    let dropped = unresolved_previews(&group_page.groups);
    if dropped > 0 {
        state
            .observability
            .record_dropped_member_previews(dropped as u64);
    }

    let view = GroupsView::new(&group_page, PageMeta::groups(kind, page));
    Ok(json_view(&view, DEFAULT_REVALIDATE_SECS))
}

pub async fn about(State(state): State<AppState>) -> Response {
    state.observability.record_page_request();
    json_view(&AboutView::new(), STATIC_PAGE_MAX_AGE_SECS)
}
