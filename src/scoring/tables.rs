//! Fixed rule tables for composition scoring.
//!
//! Immutable constants; nothing here mutates at runtime. Archetype order
//! matters: classification scans front to back and ties keep the earlier
//! entry.

/// A team archetype with the tags that indicate it.
#[derive(Debug, Clone, Copy)]
pub struct Archetype {
    pub name: &'static str,
    pub required_tags: &'static [&'static str],
    pub bonus_tags: &'static [&'static str],
    pub description: &'static str,
}

pub const TEAM_ARCHETYPES: &[Archetype] = &[
    Archetype {
        name: "Poke",
        required_tags: &["Mage"],
        bonus_tags: &["Marksman"],
        description: "Long-range damage and siege potential",
    },
    Archetype {
        name: "Engage",
        required_tags: &["Tank"],
        bonus_tags: &["Fighter", "Assassin"],
        description: "Strong initiation and team fight",
    },
    Archetype {
        name: "Protect",
        required_tags: &["Support", "Marksman"],
        bonus_tags: &["Tank"],
        description: "Protect the carry strategy",
    },
    Archetype {
        name: "Split Push",
        required_tags: &["Fighter"],
        bonus_tags: &["Assassin"],
        description: "1-3-1 or 1-4 split push strategy",
    },
    Archetype {
        name: "Teamfight",
        required_tags: &["Tank", "Mage"],
        bonus_tags: &["Support"],
        description: "5v5 team fight focused",
    },
    Archetype {
        name: "Pick",
        required_tags: &["Assassin"],
        bonus_tags: &["Support"],
        description: "Catch enemies out of position",
    },
];

pub const BALANCED_DESCRIPTION: &str = "Balanced team composition";

/// Tags that play well together, as ordered (tag, partners) pairs.
const TAG_SYNERGIES: &[(&str, &[&str])] = &[
    ("Tank", &["Marksman", "Mage"]),
    ("Fighter", &["Support", "Mage"]),
    ("Assassin", &["Tank", "Support"]),
    ("Mage", &["Tank", "Support"]),
    ("Marksman", &["Tank", "Support"]),
    ("Support", &["Marksman", "Mage"]),
];

/// Partner tags that synergize with `tag`.
pub fn synergy_partners(tag: &str) -> &'static [&'static str] {
    TAG_SYNERGIES
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, partners)| *partners)
        .unwrap_or(&[])
}

/// Weight applied to team difficulty: harder champions pay off more in
/// higher ranks. Unknown rank strings fall back to 0.8.
pub fn rank_multiplier(rank: &str) -> f64 {
    match rank.to_ascii_uppercase().as_str() {
        "IRON" => 0.5,
        "BRONZE" => 0.6,
        "SILVER" => 0.7,
        "GOLD" => 0.8,
        "PLATINUM" => 0.9,
        "DIAMOND" => 1.0,
        "MASTER+" => 1.1,
        _ => 0.8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archetype_table_order() {
        let names: Vec<&str> = TEAM_ARCHETYPES.iter().map(|a| a.name).collect();
        assert_eq!(
            names,
            vec!["Poke", "Engage", "Protect", "Split Push", "Teamfight", "Pick"]
        );
    }

    #[test]
    fn test_synergy_partners() {
        assert_eq!(synergy_partners("Tank"), &["Marksman", "Mage"]);
        assert_eq!(synergy_partners("Support"), &["Marksman", "Mage"]);
        assert!(synergy_partners("NotATag").is_empty());
    }

    #[test]
    fn test_rank_multipliers() {
        assert_eq!(rank_multiplier("IRON"), 0.5);
        assert_eq!(rank_multiplier("gold"), 0.8);
        assert_eq!(rank_multiplier("DIAMOND"), 1.0);
        assert_eq!(rank_multiplier("MASTER+"), 1.1);
    }

    #[test]
    fn test_unknown_rank_defaults() {
        assert_eq!(rank_multiplier("WOOD"), 0.8);
        assert_eq!(rank_multiplier(""), 0.8);
    }
}
