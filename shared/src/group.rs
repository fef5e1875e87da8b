use serde::{Deserialize, Serialize};

use crate::entity::{Character, Entity, EntityBase};
use crate::pagination::PaginationMeta;

/// Which collection a [`Group`] was listed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Clan,
    Village,
}

impl GroupKind {
    /// Upstream collection path segment, also the JSON key of the list payload.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Clan => "clans",
            Self::Village => "villages",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Clan => "Clans",
            Self::Village => "Villages",
        }
    }
}

/// A clan or village. Members are referenced by character id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(flatten)]
    pub base: EntityBase,
    #[serde(default)]
    pub characters: Vec<u64>,
}

impl Group {
    pub fn member_count(&self) -> usize {
        self.characters.len()
    }
}

impl Entity for Group {
    fn id(&self) -> u64 {
        self.base.id
    }

    fn name(&self) -> &str {
        &self.base.name
    }
}

/// Reduced character projection used for avatar previews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: u64,
    pub name: String,
    pub image: Option<String>,
}

impl From<&Character> for GroupMember {
    fn from(character: &Character) -> Self {
        Self {
            id: character.id(),
            name: character.name().to_owned(),
            image: character.primary_image().map(str::to_owned),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupWithMembers {
    #[serde(flatten)]
    pub group: Group,
    pub members: Vec<GroupMember>,
}

impl GroupWithMembers {
    /// Full roster size, independent of how many previews resolved.
    pub fn member_count(&self) -> usize {
        self.group.member_count()
    }

    pub fn size(&self) -> EntitySize {
        EntitySize::from_member_count(self.member_count())
    }
}

/// A page of groups after member enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPage {
    pub kind: GroupKind,
    pub groups: Vec<GroupWithMembers>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntitySize {
    Small,
    Medium,
    Large,
}

impl EntitySize {
    pub fn from_member_count(count: usize) -> Self {
        if count >= 10 {
            Self::Large
        } else if count >= 5 {
            Self::Medium
        } else {
            Self::Small
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EntitySize, Group, GroupKind, GroupMember, GroupWithMembers};
    use crate::entity::{Character, EntityBase};

    #[test]
    fn size_thresholds() {
        assert_eq!(EntitySize::from_member_count(0), EntitySize::Small);
        assert_eq!(EntitySize::from_member_count(4), EntitySize::Small);
        assert_eq!(EntitySize::from_member_count(5), EntitySize::Medium);
        assert_eq!(EntitySize::from_member_count(9), EntitySize::Medium);
        assert_eq!(EntitySize::from_member_count(10), EntitySize::Large);
    }

    #[test]
    fn member_projection_takes_first_image_or_none() {
        let mut character = Character::new(12, "Shino Aburame");
        assert_eq!(GroupMember::from(&character).image, None);

        character.images = Some(vec!["a.png".to_string(), "b.png".to_string()]);
        let member = GroupMember::from(&character);
        assert_eq!(member.id, 12);
        assert_eq!(member.name, "Shino Aburame");
        assert_eq!(member.image.as_deref(), Some("a.png"));
    }

    #[test]
    fn member_count_reflects_roster_not_previews() {
        let group = GroupWithMembers {
            group: Group {
                base: EntityBase::new(3, "Hyūga"),
                characters: (1..=12).collect(),
            },
            members: vec![GroupMember {
                id: 1,
                name: "Hinata Hyūga".to_string(),
                image: None,
            }],
        };

        assert_eq!(group.member_count(), 12);
        assert_eq!(group.size(), EntitySize::Large);
    }

    #[test]
    fn group_decodes_without_member_ids() {
        let group: Group = serde_json::from_str(r#"{"id": 4, "name": "Nara"}"#)
            .expect("group without characters should decode");
        assert!(group.characters.is_empty());
    }

    #[test]
    fn enriched_group_serializes_flat_with_null_images() {
        let group = GroupWithMembers {
            group: Group {
                base: EntityBase::new(1, "Uchiha"),
                characters: vec![5, 6],
            },
            members: vec![GroupMember {
                id: 5,
                name: "Itachi Uchiha".to_string(),
                image: None,
            }],
        };

        let json = serde_json::to_value(&group).expect("serialize group");
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Uchiha");
        assert_eq!(json["characters"], serde_json::json!([5, 6]));
        assert!(json["members"][0]["image"].is_null());
    }

    #[test]
    fn kind_paths() {
        assert_eq!(GroupKind::Clan.collection(), "clans");
        assert_eq!(GroupKind::Village.collection(), "villages");
        assert_eq!(GroupKind::Village.label(), "Villages");
    }
}
