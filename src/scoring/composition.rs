//! Team composition analysis: archetype, strengths, phases, strategy.

use serde::Serialize;

use super::tables::{Archetype, BALANCED_DESCRIPTION, TEAM_ARCHETYPES};
use super::TagSet;
use crate::analytics::round1;
use crate::models::ChampionData;

pub const TEAM_SIZE: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct MemberStats {
    pub attack: f64,
    pub defense: f64,
    pub magic: f64,
    pub difficulty: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamMember {
    pub name: String,
    pub title: String,
    pub tags: Vec<String>,
    pub stats: MemberStats,
    pub primary_role: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamAverages {
    pub attack: f64,
    pub defense: f64,
    pub magic: f64,
    pub difficulty: f64,
}

#[derive(Debug, Serialize)]
pub struct TeamOverview {
    pub champions: Vec<TeamMember>,
    pub archetype: String,
    pub archetype_description: String,
}

#[derive(Debug, Serialize)]
pub struct TeamStats {
    pub averages: TeamAverages,
    pub total_difficulty: f64,
    pub role_diversity: usize,
    pub unique_roles: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PhaseOutlook {
    pub strength: String,
    pub score: i32,
    pub focus: String,
}

#[derive(Debug, Default, Serialize)]
pub struct PhaseAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub early_game: Option<PhaseOutlook>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mid_game: Option<PhaseOutlook>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub late_game: Option<PhaseOutlook>,
}

#[derive(Debug, Serialize)]
pub struct TeamAnalysisSection {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub phase_analysis: PhaseAnalysis,
}

#[derive(Debug, Serialize)]
pub struct MatchupAnalysis {
    pub enemy_roles: Vec<String>,
    pub favorable_matchups: Vec<String>,
    pub difficult_matchups: Vec<String>,
    pub key_considerations: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CompositionReport {
    pub team_composition: TeamOverview,
    pub team_stats: TeamStats,
    pub analysis: TeamAnalysisSection,
    pub strategic_recommendations: Vec<String>,
    pub win_conditions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matchup_analysis: Option<MatchupAnalysis>,
}

/// Score an archetype against the team's tag set: required tags count
/// triple, bonus tags single.
fn archetype_score(archetype: &Archetype, tags: &TagSet) -> i32 {
    let required = archetype
        .required_tags
        .iter()
        .filter(|tag| tags.contains(tag))
        .count() as i32;
    let bonus = archetype
        .bonus_tags
        .iter()
        .filter(|tag| tags.contains(tag))
        .count() as i32;
    required * 3 + bonus
}

/// Pick the archetype with the strictly highest score. Ties keep the
/// earlier table entry; nothing above zero means "Balanced".
pub fn classify_archetype(tags: &TagSet) -> (&'static str, &'static str) {
    let mut best: Option<&Archetype> = None;
    let mut best_score = 0;

    for archetype in TEAM_ARCHETYPES {
        let score = archetype_score(archetype, tags);
        if score > best_score {
            best_score = score;
            best = Some(archetype);
        }
    }

    match best {
        Some(archetype) => (archetype.name, archetype.description),
        None => ("Balanced", BALANCED_DESCRIPTION),
    }
}

/// Per-stat team averages, rounded to one decimal. All downstream
/// threshold checks run on the rounded values.
pub fn team_averages(champions: &[&ChampionData]) -> TeamAverages {
    let count = champions.len().max(1) as f64;
    let sum = |f: fn(&ChampionData) -> f64| {
        round1(champions.iter().map(|c| f(c)).sum::<f64>() / count)
    };

    TeamAverages {
        attack: sum(|c| c.info.attack),
        defense: sum(|c| c.info.defense),
        magic: sum(|c| c.info.magic),
        difficulty: sum(|c| c.info.difficulty),
    }
}

fn phase_outlook(score: i32, strong_focus: &str, weak_focus: &str) -> PhaseOutlook {
    let strength = if score >= 3 {
        "Strong"
    } else if score >= 2 {
        "Moderate"
    } else {
        "Weak"
    };
    PhaseOutlook {
        strength: strength.to_string(),
        score,
        focus: if score >= 3 {
            strong_focus.to_string()
        } else {
            weak_focus.to_string()
        },
    }
}

/// Analyze a validated 5-champion team. Input order does not matter:
/// everything derives from the tag set and stat averages.
pub fn analyze_team(champions: &[&ChampionData], game_phase: &str) -> CompositionReport {
    let tags = TagSet::from_champions(champions);
    let averages = team_averages(champions);
    let role_count = tags.len();

    let members: Vec<TeamMember> = champions
        .iter()
        .map(|champ| TeamMember {
            name: champ.name.clone(),
            title: champ.title.clone(),
            tags: champ.tags.clone(),
            stats: MemberStats {
                attack: champ.info.attack,
                defense: champ.info.defense,
                magic: champ.info.magic,
                difficulty: champ.info.difficulty,
            },
            primary_role: champ.primary_role().to_string(),
        })
        .collect();

    let (archetype, archetype_description) = classify_archetype(&tags);

    let mut strengths: Vec<String> = Vec::new();
    let mut weaknesses: Vec<String> = Vec::new();

    if averages.attack >= 7.0 {
        strengths.push("High physical damage output".to_string());
    } else if averages.attack <= 4.0 {
        weaknesses.push("Low physical damage".to_string());
    }

    if averages.magic >= 7.0 {
        strengths.push("Strong magic damage".to_string());
    } else if averages.magic <= 4.0 {
        weaknesses.push("Limited magic damage".to_string());
    }

    if averages.defense >= 7.0 {
        strengths.push("Tanky frontline".to_string());
    } else if averages.defense <= 4.0 {
        weaknesses.push("Fragile team composition".to_string());
    }

    if role_count >= 4 {
        strengths.push("Diverse team composition".to_string());
    } else if role_count <= 2 {
        weaknesses.push("Limited role diversity".to_string());
    }

    if tags.contains("Tank") && tags.contains("Marksman") {
        strengths.push("Good engage and sustained damage".to_string());
    }
    if tags.contains("Support") {
        strengths.push("Strong utility and vision control".to_string());
    }
    if tags.contains("Assassin") && !tags.contains("Tank") {
        weaknesses.push("Lack of frontline protection".to_string());
    }

    let mut phase_analysis = PhaseAnalysis::default();

    if matches!(game_phase, "early" | "all") {
        let mut score = 0;
        if tags.contains("Assassin") {
            score += 2;
        }
        if tags.contains("Fighter") {
            score += 1;
        }
        if averages.attack >= 6.0 {
            score += 1;
        }
        phase_analysis.early_game = Some(phase_outlook(
            score,
            "Look for early skirmishes and lane dominance",
            "Play safe and scale",
        ));
    }

    if matches!(game_phase, "mid" | "all") {
        let mut score = 0;
        if tags.contains("Mage") {
            score += 2;
        }
        if tags.contains("Tank") {
            score += 1;
        }
        if role_count >= 4 {
            score += 1;
        }
        phase_analysis.mid_game = Some(phase_outlook(
            score,
            "Group for objectives and team fights",
            "Look for picks and avoid team fights",
        ));
    }

    if matches!(game_phase, "late" | "all") {
        let mut score = 0;
        if tags.contains("Marksman") {
            score += 2;
        }
        if tags.contains("Mage") {
            score += 1;
        }
        if averages.magic + averages.attack >= 12.0 {
            score += 1;
        }
        phase_analysis.late_game = Some(phase_outlook(
            score,
            "Focus on team fights and objective control",
            "End game quickly",
        ));
    }

    let mut recommendations = vec![match archetype {
        "Poke" => "Focus on sieging and poking before team fights".to_string(),
        "Engage" => "Look for good engage opportunities".to_string(),
        "Protect" => "Keep your carry safe and let them deal damage".to_string(),
        "Split Push" => "Use split push pressure to create advantages".to_string(),
        "Teamfight" => "Group up and force 5v5 team fights".to_string(),
        "Pick" => "Look for isolated enemies and pick them off".to_string(),
        _ => "Play to your team's strengths and adapt to the game state".to_string(),
    }];

    if weaknesses.iter().any(|w| w == "Fragile team composition") {
        recommendations.push("Focus on positioning and avoid getting caught".to_string());
    }
    if strengths.iter().any(|s| s == "Strong utility and vision control") {
        recommendations.push("Use vision control to set up plays".to_string());
    }

    let win_conditions = vec![
        format!("Leverage {} strategy effectively", archetype.to_lowercase()),
        "Play to your power spikes".to_string(),
        "Minimize weaknesses through positioning and macro play".to_string(),
    ];

    CompositionReport {
        team_composition: TeamOverview {
            champions: members,
            archetype: archetype.to_string(),
            archetype_description: archetype_description.to_string(),
        },
        team_stats: TeamStats {
            total_difficulty: averages.difficulty,
            role_diversity: role_count,
            unique_roles: tags.to_vec(),
            averages,
        },
        analysis: TeamAnalysisSection {
            strengths,
            weaknesses,
            phase_analysis,
        },
        strategic_recommendations: recommendations,
        win_conditions,
        matchup_analysis: None,
    }
}

/// Tag-level matchup notes against an enemy team.
pub fn analyze_matchup(team_tags: &TagSet, enemy_tags: &TagSet) -> MatchupAnalysis {
    let mut favorable = Vec::new();
    let mut difficult = Vec::new();

    if team_tags.contains("Tank") && enemy_tags.contains("Marksman") {
        favorable.push("Your tanks can engage on their carries".to_string());
    }
    if team_tags.contains("Assassin") && enemy_tags.contains("Mage") {
        favorable.push("Your assassins can target their mages".to_string());
    }
    if enemy_tags.contains("Assassin") && !team_tags.contains("Tank") {
        difficult.push("Enemy assassins can target your carries".to_string());
    }

    MatchupAnalysis {
        enemy_roles: enemy_tags.to_vec(),
        favorable_matchups: favorable,
        difficult_matchups: difficult,
        key_considerations: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn champ(name: &str, tags: &[&str], stats: [f64; 4]) -> ChampionData {
        serde_json::from_value(serde_json::json!({
            "id": name,
            "name": name,
            "title": format!("the {}", name),
            "tags": tags,
            "info": {
                "attack": stats[0],
                "defense": stats[1],
                "magic": stats[2],
                "difficulty": stats[3],
            },
        }))
        .unwrap()
    }

    fn diverse_team() -> Vec<ChampionData> {
        vec![
            champ("Malphite", &["Tank", "Fighter"], [5.0, 9.0, 7.0, 2.0]),
            champ("Lux", &["Mage", "Support"], [2.0, 4.0, 9.0, 5.0]),
            champ("Jinx", &["Marksman"], [9.0, 2.0, 4.0, 6.0]),
            champ("Thresh", &["Support", "Fighter"], [5.0, 6.0, 6.0, 7.0]),
            champ("Garen", &["Fighter", "Tank"], [7.0, 7.0, 1.0, 5.0]),
        ]
    }

    #[test]
    fn test_diverse_team_scenario() {
        let team = diverse_team();
        let refs: Vec<&ChampionData> = team.iter().collect();
        let report = analyze_team(&refs, "all");

        assert!(report.team_stats.role_diversity >= 4);
        assert!(report
            .analysis
            .strengths
            .iter()
            .any(|s| s == "Diverse team composition"));
    }

    #[test]
    fn test_classification_is_order_invariant() {
        let team = diverse_team();
        let forward: Vec<&ChampionData> = team.iter().collect();
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = analyze_team(&forward, "all");
        let b = analyze_team(&reversed, "all");

        assert_eq!(a.team_composition.archetype, b.team_composition.archetype);
        assert_eq!(a.team_stats.averages.attack, b.team_stats.averages.attack);
        assert_eq!(a.team_stats.role_diversity, b.team_stats.role_diversity);
    }

    #[test]
    fn test_no_matching_archetype_is_balanced() {
        let empty = TagSet::default();
        let (name, description) = classify_archetype(&empty);

        assert_eq!(name, "Balanced");
        assert_eq!(description, BALANCED_DESCRIPTION);
    }

    #[test]
    fn test_tie_keeps_first_table_entry() {
        // Mage alone scores 3 for Poke; Tank alone scores 3 for Engage.
        // Both present scores them equally, plus Teamfight at 6 wins.
        let mut tags = TagSet::default();
        tags.insert("Mage");
        tags.insert("Tank");
        assert_eq!(classify_archetype(&tags).0, "Teamfight");

        // Mage only: Poke (3) ties nothing; Teamfight gets 3 too but comes
        // later, so Poke holds.
        let mut tags = TagSet::default();
        tags.insert("Mage");
        assert_eq!(classify_archetype(&tags).0, "Poke");
    }

    #[test]
    fn test_fragile_team_gets_positioning_advice() {
        let team = vec![
            champ("Zed", &["Assassin"], [9.0, 2.0, 1.0, 7.0]),
            champ("Talon", &["Assassin"], [9.0, 3.0, 1.0, 7.0]),
            champ("Kha", &["Assassin"], [9.0, 4.0, 1.0, 6.0]),
            champ("Akali", &["Assassin"], [5.0, 3.0, 8.0, 7.0]),
            champ("Rengar", &["Assassin", "Fighter"], [7.0, 4.0, 2.0, 8.0]),
        ];
        let refs: Vec<&ChampionData> = team.iter().collect();
        let report = analyze_team(&refs, "all");

        assert!(report
            .analysis
            .weaknesses
            .iter()
            .any(|w| w == "Fragile team composition"));
        assert!(report
            .analysis
            .weaknesses
            .iter()
            .any(|w| w == "Lack of frontline protection"));
        assert!(report
            .strategic_recommendations
            .iter()
            .any(|r| r == "Focus on positioning and avoid getting caught"));
    }

    #[test]
    fn test_phase_selection() {
        let team = diverse_team();
        let refs: Vec<&ChampionData> = team.iter().collect();

        let early_only = analyze_team(&refs, "early");
        assert!(early_only.analysis.phase_analysis.early_game.is_some());
        assert!(early_only.analysis.phase_analysis.mid_game.is_none());
        assert!(early_only.analysis.phase_analysis.late_game.is_none());

        let all = analyze_team(&refs, "all");
        assert!(all.analysis.phase_analysis.early_game.is_some());
        assert!(all.analysis.phase_analysis.mid_game.is_some());
        assert!(all.analysis.phase_analysis.late_game.is_some());
    }

    #[test]
    fn test_phase_thresholds() {
        // Mage + Tank + 4 distinct roles = mid score 4 -> Strong
        let team = diverse_team();
        let refs: Vec<&ChampionData> = team.iter().collect();
        let report = analyze_team(&refs, "mid");
        let mid = report.analysis.phase_analysis.mid_game.unwrap();

        assert_eq!(mid.score, 4);
        assert_eq!(mid.strength, "Strong");
        assert_eq!(mid.focus, "Group for objectives and team fights");
    }

    #[test]
    fn test_matchup_analysis() {
        let mut ours = TagSet::default();
        ours.insert("Tank");
        ours.insert("Assassin");
        let mut theirs = TagSet::default();
        theirs.insert("Marksman");
        theirs.insert("Mage");

        let matchup = analyze_matchup(&ours, &theirs);
        assert_eq!(matchup.favorable_matchups.len(), 2);
        assert!(matchup.difficult_matchups.is_empty());

        let matchup = analyze_matchup(&theirs, &ours);
        assert!(matchup
            .difficult_matchups
            .iter()
            .any(|d| d == "Enemy assassins can target your carries"));
    }

    #[test]
    fn test_averages_rounding() {
        let team = diverse_team();
        let refs: Vec<&ChampionData> = team.iter().collect();
        let averages = team_averages(&refs);

        // attack: (5+2+9+5+7)/5 = 5.6
        assert_eq!(averages.attack, 5.6);
        // difficulty: (2+5+6+7+5)/5 = 5.0
        assert_eq!(averages.difficulty, 5.0);
    }
}
