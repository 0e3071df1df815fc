//! Team-composition scoring.
//!
//! Weighted rule tables over champion tags and base ratings: archetype
//! classification, strength/weakness labeling, synergy scoring and
//! win-probability estimation. Pure functions over catalog data; the only
//! non-determinism is the outcome-prediction jitter, injected by the
//! caller.

pub mod composition;
pub mod outcome;
pub mod tables;

use crate::models::ChampionData;

/// The distinct tags present across a team, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct TagSet {
    order: Vec<String>,
}

impl TagSet {
    pub fn from_champions(champions: &[&ChampionData]) -> Self {
        let mut set = TagSet::default();
        for champ in champions {
            for tag in &champ.tags {
                set.insert(tag);
            }
        }
        set
    }

    pub fn insert(&mut self, tag: &str) {
        if !self.contains(tag) {
            self.order.push(tag.to_string());
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.order.iter().any(|t| t == tag)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.order.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn champ(name: &str, tags: &[&str]) -> ChampionData {
        serde_json::from_value(serde_json::json!({
            "id": name,
            "name": name,
            "tags": tags,
        }))
        .unwrap()
    }

    #[test]
    fn test_tag_set_dedups_preserving_order() {
        let a = champ("Malphite", &["Tank", "Fighter"]);
        let b = champ("Garen", &["Fighter", "Tank"]);
        let set = TagSet::from_champions(&[&a, &b]);

        assert_eq!(set.len(), 2);
        assert_eq!(set.as_slice(), &["Tank".to_string(), "Fighter".to_string()]);
    }

    #[test]
    fn test_tag_set_membership() {
        let a = champ("Lux", &["Mage", "Support"]);
        let set = TagSet::from_champions(&[&a]);

        assert!(set.contains("Mage"));
        assert!(!set.contains("Tank"));
    }
}
