//! Player performance aggregation over a window of recent matches.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{mean, median, round1, round2, Counter};
use crate::models::MatchRecord;

/// Derived metrics for one match, echoed in the detailed view.
#[derive(Debug, Clone, Serialize)]
pub struct MatchPerformance {
    pub match_id: String,
    pub champion: String,
    pub role: String,
    pub kda: f64,
    pub cs_per_min: f64,
    pub damage_per_min: f64,
    pub vision_score: u32,
    pub gold_per_min: f64,
    pub kill_participation: f64,
    pub win: bool,
    pub game_duration: i64,
}

#[derive(Debug, Serialize)]
pub struct OverallPerformance {
    pub win_rate: f64,
    pub avg_kda: f64,
    pub median_kda: f64,
    pub avg_cs_per_min: f64,
    pub avg_damage_per_min: f64,
    pub avg_vision_score: f64,
    pub avg_gold_per_min: f64,
    pub avg_kill_participation: f64,
}

#[derive(Debug, Serialize)]
pub struct ChampionPool {
    pub most_played: Map<String, Value>,
    pub total_unique_champions: usize,
}

#[derive(Debug, Serialize)]
pub struct TrendWindow {
    pub win_rate: f64,
    pub avg_kda: f64,
}

#[derive(Debug, Serialize)]
pub struct PerformanceTrends {
    pub recent_5_games: TrendWindow,
    pub recent_10_games: TrendWindow,
}

#[derive(Debug, Serialize)]
pub struct PerformanceSummary {
    pub matches_analyzed: usize,
    pub overall_performance: OverallPerformance,
    pub champion_stats: ChampionPool,
    pub role_distribution: Map<String, Value>,
    pub performance_trends: PerformanceTrends,
    pub detailed_matches: Vec<MatchPerformance>,
}

/// Reduce the window into a performance summary.
///
/// Matches without the player's participant row are skipped and do not
/// count toward `matches_analyzed`. Returns `None` when nothing usable
/// remains. The input is expected most-recent-first (match id order), which
/// is what the trailing windows slice against.
pub fn aggregate_performance(puuid: &str, matches: &[MatchRecord]) -> Option<PerformanceSummary> {
    let mut rows: Vec<MatchPerformance> = Vec::new();
    let mut champions = Counter::new();
    let mut roles = Counter::new();
    let mut wins = 0u32;

    for record in matches {
        let Some(player) = record.participant(puuid) else {
            continue;
        };

        let duration = record.info.game_duration;
        let per_minute = |value: f64| {
            if duration > 0 {
                value / duration as f64 * 60.0
            } else {
                0.0
            }
        };

        let kda =
            (player.kills + player.assists) as f64 / player.deaths.max(1) as f64;
        let total_cs = (player.total_minions_killed + player.neutral_minions_killed) as f64;
        let team_kills = record.team_kills(player.team_id);
        let kill_participation =
            (player.kills + player.assists) as f64 / team_kills.max(1) as f64 * 100.0;

        champions.add(&player.champion_name);
        let role = if player.team_position.is_empty() {
            "UNKNOWN".to_string()
        } else {
            player.team_position.clone()
        };
        roles.add(&role);
        if player.win {
            wins += 1;
        }

        rows.push(MatchPerformance {
            match_id: record.metadata.match_id.clone(),
            champion: player.champion_name.clone(),
            role,
            kda: round2(kda),
            cs_per_min: round1(per_minute(total_cs)),
            damage_per_min: per_minute(player.total_damage_dealt_to_champions as f64).round(),
            vision_score: player.vision_score,
            gold_per_min: per_minute(player.gold_earned as f64).round(),
            kill_participation: round1(kill_participation),
            win: player.win,
            game_duration: duration,
        });
    }

    if rows.is_empty() {
        return None;
    }

    let total = rows.len();
    let kda_values: Vec<f64> = rows.iter().map(|r| r.kda).collect();
    let cs_values: Vec<f64> = rows.iter().map(|r| r.cs_per_min).collect();
    let damage_values: Vec<f64> = rows.iter().map(|r| r.damage_per_min).collect();
    let vision_values: Vec<f64> = rows.iter().map(|r| r.vision_score as f64).collect();
    let gold_values: Vec<f64> = rows.iter().map(|r| r.gold_per_min).collect();
    let kp_values: Vec<f64> = rows.iter().map(|r| r.kill_participation).collect();

    let overall = OverallPerformance {
        win_rate: round1(wins as f64 / total as f64 * 100.0),
        avg_kda: round2(mean(&kda_values)),
        median_kda: round2(median(&kda_values)),
        avg_cs_per_min: round2(mean(&cs_values)),
        avg_damage_per_min: round2(mean(&damage_values)),
        avg_vision_score: round2(mean(&vision_values)),
        avg_gold_per_min: round2(mean(&gold_values)),
        avg_kill_participation: round2(mean(&kp_values)),
    };

    Some(PerformanceSummary {
        matches_analyzed: total,
        overall_performance: overall,
        champion_stats: ChampionPool {
            most_played: champions.to_map(5),
            total_unique_champions: champions.len(),
        },
        role_distribution: roles.to_map(usize::MAX),
        performance_trends: PerformanceTrends {
            recent_5_games: trend_window(&rows, 5),
            recent_10_games: trend_window(&rows, 10),
        },
        detailed_matches: rows.iter().take(10).cloned().collect(),
    })
}

/// Stats over the most recent `n` rows. The row list is most-recent-first,
/// so the window is its head; fewer than `n` rows means all of them.
fn trend_window(rows: &[MatchPerformance], n: usize) -> TrendWindow {
    let window = &rows[..rows.len().min(n)];
    let wins = window.iter().filter(|r| r.win).count();
    let kda_values: Vec<f64> = window.iter().map(|r| r.kda).collect();

    TrendWindow {
        win_rate: round1(wins as f64 / window.len().max(1) as f64 * 100.0),
        avg_kda: round2(mean(&kda_values)),
    }
}
