use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Era-keyed values ("Part I", "Part II", "Blank Period", ...). Keys are known upstream
/// but never enforced: any subset may be present.
pub type EraValues = BTreeMap<String, String>;

/// Common surface of every record the upstream API serves.
pub trait Entity {
    fn id(&self) -> u64;
    fn name(&self) -> &str;
}

/// Identity shared by characters, clans and villages. Embedded (flattened) into each kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBase {
    pub id: u64,
    pub name: String,
}

impl EntityBase {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Upstream fields that are sometimes a single string and sometimes a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        };
        values.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_owned).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    #[serde(flatten)]
    pub base: EntityBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debut: Option<Debut>,
    /// Relation name ("father", "adoptiveSon", ...) to relative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jutsu: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nature_type: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal: Option<Personal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<Rank>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_actors: Option<VoiceActors>,
}

impl Character {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            base: EntityBase::new(id, name),
            images: None,
            debut: None,
            family: None,
            jutsu: None,
            nature_type: None,
            personal: None,
            rank: None,
            tools: None,
            voice_actors: None,
        }
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .as_deref()
            .and_then(<[String]>::first)
            .map(String::as_str)
    }

    pub fn clan(&self) -> Option<&str> {
        self.personal.as_ref()?.clan.as_deref()
    }

    pub fn affiliations(&self) -> &[String] {
        self.personal
            .as_ref()
            .and_then(|personal| personal.affiliation.as_deref())
            .unwrap_or_default()
    }

    pub fn jutsu_count(&self) -> usize {
        self.jutsu.as_ref().map_or(0, Vec::len)
    }
}

impl Entity for Character {
    fn id(&self) -> u64 {
        self.base.id
    }

    fn name(&self) -> &str {
        &self.base.name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debut {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manga: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub novel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ova: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appears_in: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<EraValues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<EraValues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<EraValues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kekkei_genkai: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rank {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ninja_rank: Option<EraValues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ninja_registration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceActors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub japanese: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english: Option<OneOrMany>,
}
