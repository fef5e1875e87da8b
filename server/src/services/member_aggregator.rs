use futures::future::join_all;
use shinobi_shared::{
    Character, Group, GroupKind, GroupMember, GroupPage, GroupWithMembers, GroupsResponse,
};
use tracing::{debug, warn};

use crate::config::{DEFAULT_REVALIDATE_SECS, MAX_MEMBERS_PREVIEW};
use crate::error::FetchError;
use crate::upstream::{ApiClient, FetchOptions};

/// Fetch one page of clans or villages and attach member previews to each group.
///
/// A failing list request fails the whole call. Individual member lookups never do.
pub async fn fetch_groups_with_members(
    client: &ApiClient,
    kind: GroupKind,
    page: u32,
) -> Result<GroupPage, FetchError> {
    let collection = kind.collection();
    let response: GroupsResponse = client
        .fetch_data(
            &format!("/{collection}?page={page}"),
            FetchOptions::new()
                .revalidate(DEFAULT_REVALIDATE_SECS)
                .tag(collection)
                .tag(format!("{collection}-page-{page}"))
                .validated(),
        )
        .await?;

    let meta = response.meta();
    let groups = join_all(response.groups.into_iter().map(|group| async move {
        let members = fetch_group_members(client, &group, MAX_MEMBERS_PREVIEW).await;
        GroupWithMembers { group, members }
    }))
    .await;

    debug!(collection, page, groups = groups.len(), "enriched group page");
    Ok(GroupPage { kind, groups, meta })
}

/// Previews for the first `limit` members of `group`, in roster order.
///
/// All lookups run concurrently and are awaited together; failed ones are
/// logged and left out.
pub async fn fetch_group_members(
    client: &ApiClient,
    group: &Group,
    limit: usize,
) -> Vec<GroupMember> {
    let lookups = group
        .characters
        .iter()
        .take(limit)
        .map(|&character_id| fetch_member_preview(client, character_id));

    join_all(lookups).await.into_iter().flatten().collect()
}

async fn fetch_member_preview(client: &ApiClient, character_id: u64) -> Option<GroupMember> {
    let options = FetchOptions::new()
        .revalidate(DEFAULT_REVALIDATE_SECS)
        .tag(format!("character-{character_id}"));

    match client
        .fetch_data::<Character>(&format!("/characters/{character_id}"), options)
        .await
    {
        Ok(character) => Some(GroupMember::from(&character)),
        Err(e) => {
            warn!(character_id, error = %e, "dropping member preview");
            None
        }
    }
}

/// Previews that should have been shown but could not be resolved.
pub fn unresolved_previews(groups: &[GroupWithMembers]) -> usize {
    groups
        .iter()
        .map(|group| {
            group
                .member_count()
                .min(MAX_MEMBERS_PREVIEW)
                .saturating_sub(group.members.len())
        })
        .sum()
}
