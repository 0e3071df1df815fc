//! Match payloads from the regional match-v5 endpoints.

use serde::{Deserialize, Serialize};

/// One upstream match payload. Read-only once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    pub match_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    /// Game length in seconds
    #[serde(default)]
    pub game_duration: i64,
    #[serde(default)]
    pub game_mode: String,
    #[serde(default)]
    pub queue_id: i64,
    #[serde(default)]
    pub participants: Vec<ParticipantStat>,
}

/// Per-player per-match row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantStat {
    #[serde(default)]
    pub puuid: String,
    #[serde(default)]
    pub summoner_name: String,
    #[serde(default)]
    pub champion_name: String,
    #[serde(default)]
    pub team_position: String,
    #[serde(default)]
    pub team_id: i64,
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub total_minions_killed: u32,
    #[serde(default)]
    pub neutral_minions_killed: u32,
    #[serde(default)]
    pub total_damage_dealt_to_champions: u32,
    #[serde(default)]
    pub vision_score: u32,
    #[serde(default)]
    pub gold_earned: u32,
    #[serde(default)]
    pub win: bool,
    #[serde(default)]
    pub summoner1_id: i64,
    #[serde(default)]
    pub summoner2_id: i64,
    #[serde(default)]
    pub perks: Perks,
    #[serde(default)]
    pub item0: i64,
    #[serde(default)]
    pub item1: i64,
    #[serde(default)]
    pub item2: i64,
    #[serde(default)]
    pub item3: i64,
    #[serde(default)]
    pub item4: i64,
    #[serde(default)]
    pub item5: i64,
    #[serde(default)]
    pub item6: i64,
}

impl ParticipantStat {
    /// Item slots in board order. Slot 6 is the trinket.
    pub fn items(&self) -> [i64; 7] {
        [
            self.item0, self.item1, self.item2, self.item3, self.item4, self.item5, self.item6,
        ]
    }
}

/// Rune selections for one participant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Perks {
    #[serde(default)]
    pub styles: Vec<PerkStyle>,
}

/// One rune style (primary or secondary tree) with its selections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerkStyle {
    #[serde(default)]
    pub description: String,
    /// Rune tree id (8000 Precision, 8100 Domination, ...)
    #[serde(default)]
    pub style: i64,
    #[serde(default)]
    pub selections: Vec<PerkSelection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerkSelection {
    pub perk: i64,
}

impl MatchRecord {
    /// Find the participant row for a player, if they were in this match.
    pub fn participant(&self, puuid: &str) -> Option<&ParticipantStat> {
        self.info.participants.iter().find(|p| p.puuid == puuid)
    }

    /// Total kills across all participants sharing `team_id`, the player's
    /// own kills included. Computed as a plain reduction so the result does
    /// not depend on participant iteration order.
    pub fn team_kills(&self, team_id: i64) -> u32 {
        self.info
            .participants
            .iter()
            .filter(|p| p.team_id == team_id)
            .map(|p| p.kills)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(puuid: &str, team_id: i64, kills: u32) -> ParticipantStat {
        ParticipantStat {
            puuid: puuid.to_string(),
            team_id,
            kills,
            ..Default::default()
        }
    }

    fn record(participants: Vec<ParticipantStat>) -> MatchRecord {
        MatchRecord {
            metadata: MatchMetadata {
                match_id: "EUW1_1".to_string(),
            },
            info: MatchInfo {
                game_duration: 1800,
                game_mode: "CLASSIC".to_string(),
                queue_id: 420,
                participants,
            },
        }
    }

    #[test]
    fn test_participant_lookup() {
        let m = record(vec![
            participant("a", 100, 1),
            participant("b", 100, 2),
            participant("c", 200, 3),
        ]);

        assert!(m.participant("b").is_some());
        assert!(m.participant("missing").is_none());
    }

    #[test]
    fn test_team_kills_counts_whole_team() {
        // The player's row comes last in iteration order; teammates seen
        // earlier must still be counted.
        let m = record(vec![
            participant("a", 100, 4),
            participant("b", 100, 2),
            participant("c", 200, 9),
            participant("d", 100, 1),
        ]);

        assert_eq!(m.team_kills(100), 7);
        assert_eq!(m.team_kills(200), 9);
    }

    #[test]
    fn test_participant_deserialization() {
        let json = r#"{
            "puuid": "abc",
            "championName": "Jinx",
            "teamPosition": "BOTTOM",
            "teamId": 100,
            "kills": 7,
            "deaths": 0,
            "assists": 9,
            "totalMinionsKilled": 210,
            "neutralMinionsKilled": 12,
            "totalDamageDealtToChampions": 24000,
            "visionScore": 18,
            "goldEarned": 13500,
            "win": true,
            "summoner1Id": 4,
            "summoner2Id": 7,
            "perks": {"styles": [{"description": "primaryStyle", "style": 8000,
                                  "selections": [{"perk": 8008}]}]}
        }"#;
        let p: ParticipantStat = serde_json::from_str(json).unwrap();

        assert_eq!(p.champion_name, "Jinx");
        assert_eq!(p.deaths, 0);
        assert_eq!(p.perks.styles[0].style, 8000);
        assert_eq!(p.perks.styles[0].selections[0].perk, 8008);
    }
}
