//! Simulated champion meta statistics.
//!
//! Real win/pick/ban rates would need large-scale match analysis, so this
//! view derives plausible numbers from champion characteristics plus
//! bounded random perturbations. Responses carry an explicit disclaimer;
//! nothing here pretends to be measured data.

use rand::Rng;
use serde::Serialize;

use super::round1;
use crate::models::ChampionRoster;

/// Champions that see outsized play; their pick/ban rates are boosted.
const POPULAR_CHAMPIONS: &[&str] = &["Jinx", "Yasuo", "Lee Sin", "Thresh", "Lux", "Ezreal"];

#[derive(Debug, Clone, Serialize)]
pub struct ChampionMetaStat {
    pub name: String,
    pub title: String,
    pub champion_id: String,
    pub tags: Vec<String>,
    pub win_rate: f64,
    pub pick_rate: f64,
    pub ban_rate: f64,
    pub games_played: i64,
    pub primary_role: String,
}

#[derive(Debug, Serialize)]
pub struct MetaSummary {
    pub avg_win_rate: f64,
    pub avg_pick_rate: f64,
    pub avg_ban_rate: f64,
    pub highest_win_rate: HighlightEntry,
    pub most_picked: HighlightEntry,
    pub most_banned: HighlightEntry,
}

#[derive(Debug, Serialize)]
pub struct HighlightEntry {
    pub champion: Option<String>,
    #[serde(flatten)]
    pub metric: serde_json::Map<String, serde_json::Value>,
}

fn highlight(champion: Option<&ChampionMetaStat>, key: &str, value: f64) -> HighlightEntry {
    let mut metric = serde_json::Map::new();
    metric.insert(key.to_string(), serde_json::Value::from(value));
    HighlightEntry {
        champion: champion.map(|c| c.name.clone()),
        metric,
    }
}

fn has_tag(tags: &[String], tag: &str) -> bool {
    tags.iter().any(|t| t == tag)
}

/// The lane a champion most plausibly occupies, from its tags.
fn primary_role(tags: &[String], rng: &mut impl Rng) -> &'static str {
    if has_tag(tags, "Marksman") {
        "BOTTOM"
    } else if has_tag(tags, "Support") {
        "UTILITY"
    } else if has_tag(tags, "Assassin") {
        "MIDDLE"
    } else if has_tag(tags, "Tank") && !has_tag(tags, "Fighter") {
        "TOP"
    } else if has_tag(tags, "Fighter") {
        if rng.gen_bool(0.5) {
            "TOP"
        } else {
            "JUNGLE"
        }
    } else if has_tag(tags, "Mage") {
        "MIDDLE"
    } else {
        "TOP"
    }
}

/// Simulate meta stats for the whole roster, optionally filtered to a role.
///
/// Champions are visited in sorted key order so the output shape is stable
/// for a fixed RNG.
pub fn simulate_champion_stats(
    roster: &ChampionRoster,
    rank: &str,
    role: &str,
    rng: &mut impl Rng,
) -> Vec<ChampionMetaStat> {
    let mut keys: Vec<&String> = roster.data.keys().collect();
    keys.sort();

    let rank = rank.to_ascii_uppercase();
    let role = role.to_ascii_uppercase();
    let mut stats = Vec::new();

    for key in keys {
        let champ = &roster.data[key];
        let tags = &champ.tags;

        // Archetype spread around an even baseline
        let mut win_rate: f64 = 50.0;
        if has_tag(tags, "Assassin") {
            win_rate += rng.gen_range(-3.0..5.0);
        } else if has_tag(tags, "Tank") {
            win_rate += rng.gen_range(-1.0..3.0);
        } else if has_tag(tags, "Marksman") {
            win_rate += rng.gen_range(-2.0..4.0);
        } else if has_tag(tags, "Mage") {
            win_rate += rng.gen_range(-2.0..6.0);
        } else if has_tag(tags, "Support") {
            win_rate += rng.gen_range(0.0..3.0);
        } else if has_tag(tags, "Fighter") {
            win_rate += rng.gen_range(-1.0..4.0);
        }

        // Higher ranks reward mechanically demanding picks
        let rank_multiplier = match rank.as_str() {
            "MASTER" | "GRANDMASTER" | "CHALLENGER"
                if has_tag(tags, "Assassin") || has_tag(tags, "Mage") =>
            {
                1.1
            }
            "IRON" | "BRONZE" | "SILVER" if has_tag(tags, "Tank") || has_tag(tags, "Support") => {
                1.05
            }
            "IRON" | "BRONZE" | "SILVER" if has_tag(tags, "Assassin") => 0.95,
            _ => 1.0,
        };

        let win_rate = (win_rate * rank_multiplier).clamp(35.0, 65.0);

        let mut pick_rate = rng.gen_range(0.5..15.0);
        let mut ban_rate = rng.gen_range(0.1..25.0);
        if POPULAR_CHAMPIONS.contains(&champ.name.as_str()) {
            pick_rate *= 1.5;
            ban_rate *= 1.3;
        }

        let champion_role = primary_role(tags, rng);
        if role != "ALL" && champion_role != role {
            continue;
        }

        stats.push(ChampionMetaStat {
            name: champ.name.clone(),
            title: champ.title.clone(),
            champion_id: key.clone(),
            tags: tags.clone(),
            win_rate: round1(win_rate),
            pick_rate: round1(pick_rate),
            ban_rate: round1(ban_rate),
            games_played: (pick_rate * 1000.0) as i64,
            primary_role: champion_role.to_string(),
        });
    }

    stats
}

/// Sort in place by the requested key. Unknown keys leave the order as-is.
pub fn sort_champion_stats(stats: &mut [ChampionMetaStat], sort_by: &str) {
    match sort_by {
        "win_rate" => stats.sort_by(|a, b| {
            b.win_rate
                .partial_cmp(&a.win_rate)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        "pick_rate" => stats.sort_by(|a, b| {
            b.pick_rate
                .partial_cmp(&a.pick_rate)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        "ban_rate" => stats.sort_by(|a, b| {
            b.ban_rate
                .partial_cmp(&a.ban_rate)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        "name" => stats.sort_by(|a, b| a.name.cmp(&b.name)),
        _ => {}
    }
}

/// Roster-wide averages and top performers.
pub fn meta_summary(stats: &[ChampionMetaStat]) -> MetaSummary {
    let total = stats.len() as f64;
    let avg = |f: fn(&ChampionMetaStat) -> f64| {
        if stats.is_empty() {
            0.0
        } else {
            round1(stats.iter().map(f).sum::<f64>() / total)
        }
    };

    let top_by = |f: fn(&ChampionMetaStat) -> f64| {
        stats.iter().max_by(|a, b| {
            f(a).partial_cmp(&f(b)).unwrap_or(std::cmp::Ordering::Equal)
        })
    };

    let top_win = top_by(|c| c.win_rate);
    let top_pick = top_by(|c| c.pick_rate);
    let top_ban = top_by(|c| c.ban_rate);

    MetaSummary {
        avg_win_rate: avg(|c| c.win_rate),
        avg_pick_rate: avg(|c| c.pick_rate),
        avg_ban_rate: avg(|c| c.ban_rate),
        highest_win_rate: highlight(top_win, "win_rate", top_win.map_or(0.0, |c| c.win_rate)),
        most_picked: highlight(top_pick, "pick_rate", top_pick.map_or(0.0, |c| c.pick_rate)),
        most_banned: highlight(top_ban, "ban_rate", top_ban.map_or(0.0, |c| c.ban_rate)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn roster() -> ChampionRoster {
        serde_json::from_str(
            r#"{
            "data": {
                "Jinx": {"id": "Jinx", "name": "Jinx", "title": "the Loose Cannon",
                         "tags": ["Marksman"],
                         "info": {"attack": 9, "defense": 2, "magic": 4, "difficulty": 6}},
                "Malphite": {"id": "Malphite", "name": "Malphite", "title": "Shard of the Monolith",
                             "tags": ["Tank", "Fighter"],
                             "info": {"attack": 5, "defense": 9, "magic": 7, "difficulty": 2}},
                "Ahri": {"id": "Ahri", "name": "Ahri", "title": "the Nine-Tailed Fox",
                         "tags": ["Mage", "Assassin"],
                         "info": {"attack": 3, "defense": 4, "magic": 8, "difficulty": 5}}
            }
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_win_rates_stay_in_bounds() {
        let roster = roster();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let stats = simulate_champion_stats(&roster, "GOLD", "ALL", &mut rng);
            for stat in &stats {
                assert!(stat.win_rate >= 35.0 && stat.win_rate <= 65.0);
            }
        }
    }

    #[test]
    fn test_role_filter_restricts_results() {
        let roster = roster();
        let mut rng = StdRng::seed_from_u64(7);

        let stats = simulate_champion_stats(&roster, "GOLD", "BOTTOM", &mut rng);
        assert!(stats.iter().all(|s| s.primary_role == "BOTTOM"));
        assert!(stats.iter().any(|s| s.name == "Jinx"));
    }

    #[test]
    fn test_sorting_by_name() {
        let roster = roster();
        let mut rng = StdRng::seed_from_u64(7);
        let mut stats = simulate_champion_stats(&roster, "GOLD", "ALL", &mut rng);

        sort_champion_stats(&mut stats, "name");
        let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_sorting_by_win_rate_descending() {
        let roster = roster();
        let mut rng = StdRng::seed_from_u64(11);
        let mut stats = simulate_champion_stats(&roster, "GOLD", "ALL", &mut rng);

        sort_champion_stats(&mut stats, "win_rate");
        for pair in stats.windows(2) {
            assert!(pair[0].win_rate >= pair[1].win_rate);
        }
    }

    #[test]
    fn test_meta_summary_names_top_performers() {
        let roster = roster();
        let mut rng = StdRng::seed_from_u64(13);
        let stats = simulate_champion_stats(&roster, "GOLD", "ALL", &mut rng);

        let summary = meta_summary(&stats);
        assert!(summary.highest_win_rate.champion.is_some());
        assert!(summary.avg_win_rate >= 35.0 && summary.avg_win_rate <= 65.0);
    }

    #[test]
    fn test_empty_stats_summary() {
        let summary = meta_summary(&[]);
        assert_eq!(summary.avg_win_rate, 0.0);
        assert!(summary.highest_win_rate.champion.is_none());
    }
}
