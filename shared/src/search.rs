use crate::entity::{Character, Entity, OneOrMany};

/// Free-text matching over an entity's searchable fields.
pub trait Searchable {
    /// `needle` is already trimmed and lowercased and never empty.
    fn matches(&self, needle: &str) -> bool;
}

pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Entities matching `query` in their original order. A blank query keeps everything.
pub fn filter_entities<'a, T: Searchable>(entities: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return entities.iter().collect();
    }
    entities
        .iter()
        .filter(|entity| entity.matches(&needle))
        .collect()
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn field_matches(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|value| contains(value, needle))
}

fn list_matches(field: Option<&[String]>, needle: &str) -> bool {
    field.is_some_and(|values| values.iter().any(|value| contains(value, needle)))
}

fn one_or_many_matches(field: Option<&OneOrMany>, needle: &str) -> bool {
    field.is_some_and(|values| values.iter().any(|value| contains(value, needle)))
}

impl Searchable for Character {
    fn matches(&self, needle: &str) -> bool {
        let personal = self.personal.as_ref();

        contains(self.name(), needle)
            || field_matches(personal.and_then(|p| p.clan.as_deref()), needle)
            || list_matches(personal.and_then(|p| p.affiliation.as_deref()), needle)
            || list_matches(self.jutsu.as_deref(), needle)
            || list_matches(self.nature_type.as_deref(), needle)
            || one_or_many_matches(personal.and_then(|p| p.classification.as_ref()), needle)
            || one_or_many_matches(personal.and_then(|p| p.occupation.as_ref()), needle)
            || list_matches(personal.and_then(|p| p.team.as_deref()), needle)
            || list_matches(personal.and_then(|p| p.titles.as_deref()), needle)
            || list_matches(self.tools.as_deref(), needle)
            || list_matches(personal.and_then(|p| p.kekkei_genkai.as_deref()), needle)
    }
}
