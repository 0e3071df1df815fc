//! Match outcome prediction from team compositions.
//!
//! Composite team scores feed a normalized win probability, clamped to
//! [25, 75] with the two sides always summing to exactly 100. A bounded
//! jitter term injects designed non-determinism; it arrives as a closure
//! so tests can pin it to zero and assert the formula exactly.

use serde::Serialize;

use super::tables::{rank_multiplier, synergy_partners};
use super::TagSet;
use crate::analytics::round1;
use crate::models::ChampionData;

pub const PROBABILITY_FLOOR: f64 = 25.0;
pub const PROBABILITY_CEILING: f64 = 75.0;

#[derive(Debug, Clone, Serialize)]
pub struct OutcomeChampion {
    pub name: String,
    pub tags: Vec<String>,
    pub difficulty: f64,
    pub attack: f64,
    pub defense: f64,
    pub magic: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompositionScore {
    pub attack: f64,
    pub defense: f64,
    pub magic: f64,
    pub difficulty: f64,
    pub synergy: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamEvaluation {
    pub champions: Vec<OutcomeChampion>,
    pub composition_score: CompositionScore,
    pub team_tags: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Synergy score: `2 × |unique tags|` for role diversity, plus 3 for every
/// ordered (tag, partner) pair present per the adjacency table.
pub fn synergy_score(tags: &TagSet) -> i32 {
    let mut score = tags.len() as i32 * 2;
    for tag in tags.as_slice() {
        for partner in synergy_partners(tag) {
            if tags.contains(partner) {
                score += 3;
            }
        }
    }
    score
}

/// Evaluate one team's composition for prediction.
pub fn evaluate_team(champions: &[&ChampionData]) -> TeamEvaluation {
    let tags = TagSet::from_champions(champions);
    let count = champions.len().max(1) as f64;
    let avg = |f: fn(&ChampionData) -> f64| {
        round1(champions.iter().map(|c| f(c)).sum::<f64>() / count)
    };

    let members: Vec<OutcomeChampion> = champions
        .iter()
        .map(|champ| OutcomeChampion {
            name: champ.name.clone(),
            tags: champ.tags.clone(),
            difficulty: champ.info.difficulty,
            attack: champ.info.attack,
            defense: champ.info.defense,
            magic: champ.info.magic,
        })
        .collect();

    let mut evaluation = TeamEvaluation {
        champions: members,
        composition_score: CompositionScore {
            attack: avg(|c| c.info.attack),
            defense: avg(|c| c.info.defense),
            magic: avg(|c| c.info.magic),
            difficulty: avg(|c| c.info.difficulty),
            synergy: synergy_score(&tags),
        },
        team_tags: tags.to_vec(),
        strengths: Vec::new(),
        weaknesses: Vec::new(),
    };
    fill_strengths_weaknesses(&mut evaluation);
    evaluation
}

/// The deterministic part of a team's score.
///
/// `2 × avg(attack, defense, magic)` for overall balance, plus the synergy
/// score, plus difficulty weighted by the rank multiplier, plus the ARAM
/// bonus when applicable.
pub fn composite_score(evaluation: &TeamEvaluation, game_mode: &str, average_rank: &str) -> f64 {
    let score = &evaluation.composition_score;
    let balance = (score.attack + score.defense + score.magic) / 3.0;

    let mut total = balance * 2.0;
    total += score.synergy as f64;
    total += score.difficulty * rank_multiplier(average_rank);

    // ARAM favors poke and teamfight champions
    if game_mode == "ARAM" {
        let has = |tag: &str| evaluation.team_tags.iter().any(|t| t == tag);
        if has("Mage") {
            total += 5.0;
        }
        if has("Marksman") {
            total += 3.0;
        }
        if has("Support") {
            total += 4.0;
        }
    }

    total
}

/// Normalize two composite scores into win probabilities.
///
/// Blue is clamped to [25, 75] and red recomputed as its complement, so the
/// pair always sums to exactly 100. A non-positive total falls back to
/// 50/50.
pub fn win_probabilities(blue_score: f64, red_score: f64) -> (f64, f64) {
    let total = blue_score + red_score;
    let blue = if total > 0.0 {
        blue_score / total * 100.0
    } else {
        50.0
    };

    let blue = round1(blue.clamp(PROBABILITY_FLOOR, PROBABILITY_CEILING));
    (blue, round1(100.0 - blue))
}

/// Predict the outcome of blue vs red. `jitter` is drawn once per team.
pub fn predict_outcome(
    blue: &TeamEvaluation,
    red: &TeamEvaluation,
    game_mode: &str,
    average_rank: &str,
    mut jitter: impl FnMut() -> f64,
) -> (f64, f64) {
    let blue_score = composite_score(blue, game_mode, average_rank) + jitter();
    let red_score = composite_score(red, game_mode, average_rank) + jitter();
    win_probabilities(blue_score, red_score)
}

/// Label a team's strengths and weaknesses from fixed thresholds.
fn fill_strengths_weaknesses(evaluation: &mut TeamEvaluation) {
    let score = evaluation.composition_score.clone();
    let strengths = &mut evaluation.strengths;
    let weaknesses = &mut evaluation.weaknesses;

    if score.attack >= 7.0 {
        strengths.push("High damage output".to_string());
    } else if score.attack <= 4.0 {
        weaknesses.push("Low damage potential".to_string());
    }

    if score.defense >= 7.0 {
        strengths.push("Strong frontline".to_string());
    } else if score.defense <= 4.0 {
        weaknesses.push("Fragile team composition".to_string());
    }

    if score.magic >= 7.0 {
        strengths.push("Strong magic damage".to_string());
    } else if score.magic <= 4.0 {
        weaknesses.push("Limited magic damage".to_string());
    }

    if score.synergy >= 15 {
        strengths.push("Excellent team synergy".to_string());
    } else if score.synergy <= 8 {
        weaknesses.push("Poor champion synergy".to_string());
    }
}
