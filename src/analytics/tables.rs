//! Fixed id-to-name tables for runes, summoner spells and queues.
//!
//! Loaded as immutable constants; unknown ids are labeled rather than
//! dropped so new patches degrade gracefully.

/// Rune tree name for a perk style id.
pub fn rune_tree_name(style_id: i64) -> String {
    match style_id {
        8000 => "Precision".to_string(),
        8100 => "Domination".to_string(),
        8200 => "Sorcery".to_string(),
        8300 => "Resolve".to_string(),
        8400 => "Inspiration".to_string(),
        other => format!("Unknown_{}", other),
    }
}

/// Summoner spell name for a spell id.
pub fn summoner_spell_name(spell_id: i64) -> String {
    match spell_id {
        1 => "Cleanse".to_string(),
        3 => "Exhaust".to_string(),
        4 => "Flash".to_string(),
        6 => "Ghost".to_string(),
        7 => "Heal".to_string(),
        11 => "Smite".to_string(),
        12 => "Teleport".to_string(),
        13 => "Clarity".to_string(),
        14 => "Ignite".to_string(),
        21 => "Barrier".to_string(),
        32 => "Mark/Dash".to_string(),
        other => format!("Unknown_{}", other),
    }
}

/// Queue id used when filtering match history by queue type.
///
/// Returns `None` for "all" (no filter) and for unknown queue names.
pub fn queue_filter(queue_type: &str) -> Option<u32> {
    match queue_type.to_ascii_lowercase().as_str() {
        // Solo/Duo; Flex (440) exists but the history filter takes one id
        "ranked" => Some(420),
        "normal" => Some(430),
        "aram" => Some(450),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rune_trees() {
        assert_eq!(rune_tree_name(8000), "Precision");
        assert_eq!(rune_tree_name(8400), "Inspiration");
    }

    #[test]
    fn test_unknown_rune_tree_is_labeled() {
        assert_eq!(rune_tree_name(9999), "Unknown_9999");
    }

    #[test]
    fn test_summoner_spells() {
        assert_eq!(summoner_spell_name(4), "Flash");
        assert_eq!(summoner_spell_name(14), "Ignite");
        assert_eq!(summoner_spell_name(32), "Mark/Dash");
    }

    #[test]
    fn test_unknown_spell_is_labeled() {
        assert_eq!(summoner_spell_name(55), "Unknown_55");
    }

    #[test]
    fn test_queue_filter() {
        assert_eq!(queue_filter("ranked"), Some(420));
        assert_eq!(queue_filter("ARAM"), Some(450));
        assert_eq!(queue_filter("all"), None);
        assert_eq!(queue_filter("urf"), None);
    }
}
