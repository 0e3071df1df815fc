//! Summoner spell usage aggregation over a window of recent matches.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use super::{round1, tables::summoner_spell_name};
use crate::models::MatchRecord;

#[derive(Debug, Clone, Serialize)]
pub struct SpellPairStats {
    pub games: u32,
    pub wins: u32,
    pub win_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct SpellOverall {
    pub most_used_combinations: Map<String, Value>,
    pub spell_effectiveness: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct SpellReport {
    pub matches_analyzed: usize,
    pub overall_stats: SpellOverall,
    pub champion_breakdown: Map<String, Value>,
    pub role_breakdown: Map<String, Value>,
}

/// Games/wins per spell pair, remembering first-seen pair order.
#[derive(Debug, Default)]
struct PairTally {
    order: Vec<String>,
    stats: HashMap<String, (u32, u32)>,
}

impl PairTally {
    fn add(&mut self, combo: &str, win: bool) {
        if !self.stats.contains_key(combo) {
            self.order.push(combo.to_string());
        }
        let entry = self.stats.entry(combo.to_string()).or_insert((0, 0));
        entry.0 += 1;
        if win {
            entry.1 += 1;
        }
    }

    fn entries(&self) -> Vec<(String, SpellPairStats)> {
        self.order
            .iter()
            .map(|combo| {
                let (games, wins) = self.stats[combo];
                (
                    combo.clone(),
                    SpellPairStats {
                        games,
                        wins,
                        win_rate: round1(wins as f64 / games.max(1) as f64 * 100.0),
                    },
                )
            })
            .collect()
    }

    fn to_stats_map(&self) -> Map<String, Value> {
        self.entries()
            .into_iter()
            .map(|(combo, stats)| (combo, serde_json::to_value(stats).unwrap_or(Value::Null)))
            .collect()
    }
}

/// Normalize a spell pair into one bucket label, insensitive to slot order.
fn combo_label(spell1_id: i64, spell2_id: i64) -> String {
    let mut names = [
        summoner_spell_name(spell1_id),
        summoner_spell_name(spell2_id),
    ];
    names.sort();
    format!("{} + {}", names[0], names[1])
}

/// Reduce the window into summoner spell usage statistics.
///
/// Spell pairs are order-normalized before counting, so Flash+Ignite and
/// Ignite+Flash land in the same bucket. Unknown spell ids keep a synthetic
/// `Unknown_<id>` label.
pub fn aggregate_spells(
    puuid: &str,
    matches: &[MatchRecord],
    champion_filter: Option<&str>,
) -> Option<SpellReport> {
    let mut analyzed = 0usize;
    let mut overall = PairTally::default();
    let mut champion_order: Vec<String> = Vec::new();
    let mut champions: HashMap<String, PairTally> = HashMap::new();
    let mut role_order: Vec<String> = Vec::new();
    let mut roles: HashMap<String, PairTally> = HashMap::new();

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
        let role = if player.team_position.is_empty() {
            "UNKNOWN".to_string()
        } else {
            player.team_position.clone()
        };

        let combo = combo_label(player.summoner1_id, player.summoner2_id);
        overall.add(&combo, player.win);

        if !champions.contains_key(&champion) {
            champion_order.push(champion.clone());
        }
        champions.entry(champion).or_default().add(&combo, player.win);

        if !roles.contains_key(&role) {
            role_order.push(role.clone());
        }
        roles.entry(role).or_default().add(&combo, player.win);

        analyzed += 1;
    }

    if analyzed == 0 {
        return None;
    }

    // Top pairs by usage
    let mut by_usage = overall.entries();
    by_usage.sort_by(|a, b| b.1.games.cmp(&a.1.games));
    let most_used_combinations: Map<String, Value> = by_usage
        .iter()
        .take(5)
        .map(|(combo, stats)| (combo.clone(), Value::from(stats.games)))
        .collect();

    // Top pairs by win rate
    let mut by_win_rate = overall.entries();
    by_win_rate.sort_by(|a, b| {
        b.1.win_rate
            .partial_cmp(&a.1.win_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let spell_effectiveness: Map<String, Value> = by_win_rate
        .into_iter()
        .take(5)
        .map(|(combo, stats)| (combo, serde_json::to_value(stats).unwrap_or(Value::Null)))
        .collect();

    let mut champion_breakdown = Map::new();
    for champion in champion_order {
        champion_breakdown.insert(
            champion.clone(),
            Value::Object(champions[&champion].to_stats_map()),
        );
    }

    let mut role_breakdown = Map::new();
    for role in role_order {
        role_breakdown.insert(role.clone(), Value::Object(roles[&role].to_stats_map()));
    }

    Some(SpellReport {
        matches_analyzed: analyzed,
        overall_stats: SpellOverall {
            most_used_combinations,
            spell_effectiveness,
        },
        champion_breakdown,
        role_breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchInfo, MatchMetadata, ParticipantStat};
    use pretty_assertions::assert_eq;

    fn make_match(
        id: &str,
        puuid: &str,
        champion: &str,
        role: &str,
        spell1: i64,
        spell2: i64,
        win: bool,
    ) -> MatchRecord {
        let player = ParticipantStat {
            puuid: puuid.to_string(),
            champion_name: champion.to_string(),
            team_position: role.to_string(),
            summoner1_id: spell1,
            summoner2_id: spell2,
            win,
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
    fn test_pair_order_invariance() {
        // Flash+Ignite in one match, Ignite+Flash in the next: one bucket
        let matches = vec![
            make_match("M1", "me", "Lux", "MIDDLE", 4, 14, true),
            make_match("M2", "me", "Lux", "MIDDLE", 14, 4, false),
        ];
        let report = aggregate_spells("me", &matches, None).unwrap();

        assert_eq!(report.matches_analyzed, 2);
        assert_eq!(
            report.overall_stats.most_used_combinations["Flash + Ignite"],
            2
        );
        assert_eq!(report.overall_stats.most_used_combinations.len(), 1);
    }

    #[test]
    fn test_win_rate_per_bucket() {
        let matches = vec![
            make_match("M1", "me", "Lux", "MIDDLE", 4, 14, true),
            make_match("M2", "me", "Lux", "MIDDLE", 14, 4, false),
        ];
        let report = aggregate_spells("me", &matches, None).unwrap();
        let stats = &report.overall_stats.spell_effectiveness["Flash + Ignite"];

        assert_eq!(stats["games"], 2);
        assert_eq!(stats["wins"], 1);
        assert_eq!(stats["win_rate"], 50.0);
    }

    #[test]
    fn test_unknown_spell_id_is_labeled() {
        let matches = vec![make_match("M1", "me", "Lux", "MIDDLE", 4, 99, true)];
        let report = aggregate_spells("me", &matches, None).unwrap();

        assert!(report
            .overall_stats
            .most_used_combinations
            .contains_key("Flash + Unknown_99"));
    }

    #[test]
    fn test_role_breakdown() {
        let matches = vec![
            make_match("M1", "me", "Lux", "MIDDLE", 4, 14, true),
            make_match("M2", "me", "Thresh", "UTILITY", 4, 14, true),
        ];
        let report = aggregate_spells("me", &matches, None).unwrap();

        assert!(report.role_breakdown.contains_key("MIDDLE"));
        assert!(report.role_breakdown.contains_key("UTILITY"));
    }

    #[test]
    fn test_champion_filter() {
        let matches = vec![
            make_match("M1", "me", "Lux", "MIDDLE", 4, 14, true),
            make_match("M2", "me", "Thresh", "UTILITY", 4, 3, true),
        ];
        let report = aggregate_spells("me", &matches, Some("THRESH")).unwrap();

        assert_eq!(report.matches_analyzed, 1);
        assert!(report
            .overall_stats
            .most_used_combinations
            .contains_key("Exhaust + Flash"));
    }

    #[test]
    fn test_empty_window_yields_none() {
        assert!(aggregate_spells("me", &[], None).is_none());
    }
}
