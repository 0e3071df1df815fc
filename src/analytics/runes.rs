//! Rune usage aggregation over a window of recent matches.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{tables::rune_tree_name, Counter};
use crate::models::MatchRecord;

#[derive(Debug, Serialize)]
pub struct RuneOverall {
    pub most_used_primary_trees: Map<String, Value>,
    pub most_used_secondary_trees: Map<String, Value>,
    pub most_used_keystones: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct RuneReport {
    pub matches_analyzed: usize,
    pub overall_stats: RuneOverall,
    pub champion_breakdown: Map<String, Value>,
}

#[derive(Debug, Default)]
struct ChampionRunes {
    games: u32,
    primary_trees: Counter,
    secondary_trees: Counter,
    keystones: Counter,
}

/// Reduce the window into rune usage statistics.
///
/// The primary style's first selection is the keystone. Unknown tree ids
/// keep a synthetic `Unknown_<id>` label. Matches without the player's row,
/// with a non-matching champion filter, or with fewer than two perk styles
/// are skipped and do not count toward `matches_analyzed`.
pub fn aggregate_runes(
    puuid: &str,
    matches: &[MatchRecord],
    champion_filter: Option<&str>,
) -> Option<RuneReport> {
    let mut analyzed = 0usize;
    let mut primary_trees = Counter::new();
    let mut secondary_trees = Counter::new();
    let mut keystones = Counter::new();
    let mut champion_order: Vec<String> = Vec::new();
    let mut champions: std::collections::HashMap<String, ChampionRunes> =
        std::collections::HashMap::new();

    for record in matches {
        let Some(player) = record.participant(puuid) else {
            continue;
        };

        let champion = if player.champion_name.is_empty() {
            "Unknown".to_string()
        } else {
            player.champion_name.clone()
        };
        if let Some(filter) = champion_filter {
            if !champion.eq_ignore_ascii_case(filter) {
                continue;
            }
        }

        let styles = &player.perks.styles;
        if styles.len() < 2 {
            continue;
        }

        let primary = &styles[0];
        let secondary = &styles[1];
        let primary_name = rune_tree_name(primary.style);
        let secondary_name = rune_tree_name(secondary.style);

        primary_trees.add(&primary_name);
        secondary_trees.add(&secondary_name);

        let keystone = primary.selections.first().map(|s| s.perk);
        if let Some(keystone) = keystone {
            keystones.add(keystone.to_string());
        }

        if !champions.contains_key(&champion) {
            champion_order.push(champion.clone());
        }
        let entry = champions.entry(champion).or_default();
        entry.games += 1;
        entry.primary_trees.add(&primary_name);
        entry.secondary_trees.add(&secondary_name);
        if let Some(keystone) = keystone {
            entry.keystones.add(keystone.to_string());
        }

        analyzed += 1;
    }

    if analyzed == 0 {
        return None;
    }

    let mut champion_breakdown = Map::new();
    for champion in champion_order {
        let data = &champions[&champion];
        champion_breakdown.insert(
            champion,
            serde_json::json!({
                "games_played": data.games,
                "primary_trees": data.primary_trees.to_map(2),
                "secondary_trees": data.secondary_trees.to_map(2),
                "keystones": data.keystones.to_map(3),
            }),
        );
    }

    Some(RuneReport {
        matches_analyzed: analyzed,
        overall_stats: RuneOverall {
            most_used_primary_trees: primary_trees.to_map(3),
            most_used_secondary_trees: secondary_trees.to_map(3),
            most_used_keystones: keystones.to_map(5),
        },
        champion_breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        MatchInfo, MatchMetadata, ParticipantStat, PerkSelection, PerkStyle, Perks,
    };

    fn make_match(
        id: &str,
        puuid: &str,
        champion: &str,
        primary_style: i64,
        secondary_style: i64,
        keystone: i64,
    ) -> MatchRecord {
        let player = ParticipantStat {
            puuid: puuid.to_string(),
            champion_name: champion.to_string(),
            perks: Perks {
                styles: vec![
                    PerkStyle {
                        description: "primaryStyle".to_string(),
                        style: primary_style,
                        selections: vec![PerkSelection { perk: keystone }],
                    },
                    PerkStyle {
                        description: "subStyle".to_string(),
                        style: secondary_style,
                        selections: vec![],
                    },
                ],
            },
            ..Default::default()
        };
        MatchRecord {
            metadata: MatchMetadata {
                match_id: id.to_string(),
            },
            info: MatchInfo {
                game_duration: 1500,
                game_mode: "CLASSIC".to_string(),
                queue_id: 420,
                participants: vec![player],
            },
        }
    }

    #[test]
    fn test_tree_and_keystone_counting() {
        let matches = vec![
            make_match("M1", "me", "Lux", 8200, 8100, 8229),
            make_match("M2", "me", "Lux", 8200, 8300, 8229),
        ];
        let report = aggregate_runes("me", &matches, None).unwrap();

        assert_eq!(report.matches_analyzed, 2);
        assert_eq!(report.overall_stats.most_used_primary_trees["Sorcery"], 2);
        assert_eq!(report.overall_stats.most_used_keystones["8229"], 2);
    }

    #[test]
    fn test_unknown_tree_id_gets_synthetic_label() {
        let matches = vec![make_match("M1", "me", "Lux", 4242, 8100, 8112)];
        let report = aggregate_runes("me", &matches, None).unwrap();

        assert_eq!(
            report.overall_stats.most_used_primary_trees["Unknown_4242"],
            1
        );
    }

    #[test]
    fn test_champion_filter_is_case_insensitive() {
        let matches = vec![
            make_match("M1", "me", "Lux", 8200, 8100, 8229),
            make_match("M2", "me", "Jinx", 8000, 8100, 8008),
        ];
        let report = aggregate_runes("me", &matches, Some("lux")).unwrap();

        assert_eq!(report.matches_analyzed, 1);
        assert!(report.champion_breakdown.contains_key("Lux"));
        assert!(!report.champion_breakdown.contains_key("Jinx"));
    }

    #[test]
    fn test_breakdown_covers_every_champion_seen() {
        let matches = vec![
            make_match("M1", "me", "Lux", 8200, 8100, 8229),
            make_match("M2", "me", "Jinx", 8000, 8100, 8008),
        ];
        let report = aggregate_runes("me", &matches, None).unwrap();

        assert_eq!(report.champion_breakdown.len(), 2);
        assert_eq!(report.champion_breakdown["Jinx"]["games_played"], 1);
    }

    #[test]
    fn test_missing_styles_skip_match() {
        let mut incomplete = make_match("M1", "me", "Lux", 8200, 8100, 8229);
        incomplete.info.participants[0].perks.styles.truncate(1);

        assert!(aggregate_runes("me", &[incomplete], None).is_none());
    }

    #[test]
    fn test_no_player_rows_yields_none() {
        let matches = vec![make_match("M1", "other", "Lux", 8200, 8100, 8229)];
        assert!(aggregate_runes("me", &matches, None).is_none());
    }
}
