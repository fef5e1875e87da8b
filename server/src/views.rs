//! JSON view models: the data each page renders from.

use serde::Serialize;
use shinobi_shared::{
    Character, Entity, EntitySize, GroupKind, GroupPage, GroupWithMembers, PageItem,
    PaginationMeta, avatar_color_hex, initial, visible_pages,
};

use crate::config::MAX_MEMBERS_PREVIEW;

const CHARACTERS_DESCRIPTION: &str = "Browse and search through over 1400 characters from the Naruto universe. Find information about their jutsu, clans, villages, and abilities.";
const CLANS_DESCRIPTION: &str = "Explore the legendary clans of the Naruto universe. Discover the Uchiha, Hyuga, Uzumaki, and many more powerful ninja families.";
const VILLAGES_DESCRIPTION: &str = "Explore the hidden villages of the Naruto universe. Discover Konohagakure, Sunagakure, Kirigakure, and many more ninja villages.";
const ABOUT_DESCRIPTION: &str = "Learn about Naruto Universe, our mission to explore the ninja world, and the API powering our application.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    /// Whether search engines may index the page.
    pub index: bool,
}

impl PageMeta {
    /// Searches and pages past the first are not indexed.
    pub fn characters(query: Option<&str>, page: u32) -> Self {
        let (title, description) = match query {
            Some(query) => (
                format!("Search: {query}"),
                format!(
                    "Search results for \"{query}\" in Naruto characters database. Find information about jutsu, clans, villages, and abilities."
                ),
            ),
            None => ("Characters".to_owned(), CHARACTERS_DESCRIPTION.to_owned()),
        };

        Self {
            title,
            description,
            canonical: Some("/characters".to_owned()),
            index: query.is_none() && page <= 1,
        }
    }

    pub fn groups(kind: GroupKind, page: u32) -> Self {
        let label = kind.label();
        let description = match kind {
            GroupKind::Clan => CLANS_DESCRIPTION,
            GroupKind::Village => VILLAGES_DESCRIPTION,
        };
        let first_page = page <= 1;

        Self {
            title: if first_page {
                label.to_owned()
            } else {
                format!("{label} - Page {page}")
            },
            description: description.to_owned(),
            canonical: Some(format!("/{}", kind.collection())),
            index: first_page,
        }
    }

    pub fn character(character: &Character) -> Self {
        let clan = character.clan().unwrap_or("Unknown Clan");
        let affiliation = character
            .affiliations()
            .first()
            .map_or("Unknown Village", String::as_str);

        let mut description = format!("Learn about {} from the {clan} clan.", character.name());
        let jutsu = character.jutsu_count();
        if jutsu > 0 {
            description.push_str(&format!(" Master of {jutsu} jutsu techniques."));
        }
        description.push_str(&format!(" Affiliated with {affiliation}."));

        Self {
            title: format!("{} | Naruto Characters", character.name()),
            description,
            canonical: Some(format!("/characters/{}", character.id())),
            index: true,
        }
    }

    pub fn character_not_found() -> Self {
        Self {
            title: "Character Not Found | Naruto Characters".to_owned(),
            description: "The requested character could not be found.".to_owned(),
            canonical: None,
            index: false,
        }
    }

    pub fn page_not_found() -> Self {
        Self {
            title: "Page Not Found".to_owned(),
            description: "The page you are looking for does not exist or has been moved."
                .to_owned(),
            canonical: None,
            index: false,
        }
    }

    pub fn about() -> Self {
        Self {
            title: "About".to_owned(),
            description: ABOUT_DESCRIPTION.to_owned(),
            canonical: Some("/about".to_owned()),
            index: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u32,
    pub pages: Vec<PageItem>,
    pub previous: Option<u32>,
    pub next: Option<u32>,
}

impl PaginationView {
    /// `None` when everything fits on one page.
    pub fn new(meta: &PaginationMeta) -> Option<Self> {
        if !meta.has_multiple_pages() {
            return None;
        }

        let current = meta.current_page;
        let total = meta.total_pages;
        Some(Self {
            current_page: current,
            total_pages: total,
            pages: visible_pages(current, total),
            previous: (current > 1).then(|| current - 1),
            next: (current < total).then(|| current + 1),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CharactersView<'a> {
    pub characters: Vec<&'a Character>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<&'a str>,
    /// Upstream total, not the number of filtered results.
    pub total: u64,
    pub pagination: Option<PaginationView>,
    pub meta: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct CharacterDetailView<'a> {
    pub character: &'a Character,
    pub meta: PageMeta,
}

/// One avatar in a group card's member stack.
///
/// Without an image the card shows the initial on a colour derived from the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberAvatar {
    pub id: u64,
    pub name: String,
    pub href: String,
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCard {
    pub id: u64,
    pub name: String,
    pub initial: Option<String>,
    pub member_count: usize,
    pub size: EntitySize,
    pub avatars: Vec<MemberAvatar>,
    /// Members beyond the preview cap, rendered as "+N".
    pub overflow: usize,
}

impl From<&GroupWithMembers> for GroupCard {
    fn from(group: &GroupWithMembers) -> Self {
        let avatars = group
            .members
            .iter()
            .take(MAX_MEMBERS_PREVIEW)
            .map(|member| {
                let fallback = member.image.is_none();
                MemberAvatar {
                    id: member.id,
                    name: member.name.clone(),
                    href: format!("/characters/{}", member.id),
                    image: member.image.clone(),
                    initial: if fallback { initial(&member.name) } else { None },
                    color: fallback.then(|| avatar_color_hex(&member.name)),
                }
            })
            .collect();

        let member_count = group.member_count();
        Self {
            id: group.group.id(),
            name: group.group.name().to_owned(),
            initial: initial(group.group.name()),
            member_count,
            size: group.size(),
            avatars,
            overflow: member_count.saturating_sub(MAX_MEMBERS_PREVIEW),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GroupsView {
    pub kind: GroupKind,
    pub groups: Vec<GroupCard>,
    pub total: u64,
    pub pagination: Option<PaginationView>,
    pub meta: PageMeta,
}

impl GroupsView {
    pub fn new(page: &GroupPage, meta: PageMeta) -> Self {
        Self {
            kind: page.kind,
            groups: page.groups.iter().map(GroupCard::from).collect(),
            total: page.meta.total,
            pagination: PaginationView::new(&page.meta),
            meta,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExploreLink {
    pub title: &'static str,
    pub description: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MissionCard {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ExternalLink {
    pub label: &'static str,
    pub href: &'static str,
    pub primary: bool,
}

pub const EXPLORE_LINKS: [ExploreLink; 3] = [
    ExploreLink {
        title: "Characters",
        description: "Discover detailed profiles of all ninja warriors and their unique abilities",
        href: "/characters",
    },
    ExploreLink {
        title: "Clans",
        description: "Learn about powerful ninja families and their incredible legacies",
        href: "/clans",
    },
    ExploreLink {
        title: "Villages",
        description: "Explore the hidden villages and the stories that shape them",
        href: "/villages",
    },
];

pub const MISSION_CARDS: [MissionCard; 2] = [
    MissionCard {
        title: "Comprehensive Database",
        description: "Access detailed information about over 1400 characters, their abilities, affiliations, and relationships within the Naruto universe.",
    },
    MissionCard {
        title: "Always Updated",
        description: "Our database is continuously updated with the latest information from the Naruto and Boruto series to keep you informed about all ninja world developments.",
    },
];

pub const API_LINKS: [ExternalLink; 2] = [
    ExternalLink {
        label: "Dattebayo API",
        href: "https://api-dattebayo.vercel.app/",
        primary: true,
    },
    ExternalLink {
        label: "API Documentation",
        href: "https://api-dattebayo.vercel.app/docs",
        primary: false,
    },
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutView {
    pub explore: &'static [ExploreLink],
    pub mission: &'static [MissionCard],
    pub api_links: &'static [ExternalLink],
    pub meta: PageMeta,
}

impl AboutView {
    pub fn new() -> Self {
        Self {
            explore: &EXPLORE_LINKS,
            mission: &MISSION_CARDS,
            api_links: &API_LINKS,
            meta: PageMeta::about(),
        }
    }
}

impl Default for AboutView {
    fn default() -> Self {
        Self::new()
    }
}
