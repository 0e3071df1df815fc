//! Account and summoner payloads.

use serde::{Deserialize, Serialize};

/// Account payload from the account-by-riot-id endpoint.
///
/// The `puuid` is the stable cross-platform player key; everything else
/// downstream is looked up through it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub tag_line: String,
}

/// Summoner payload from the platform-scoped summoner-by-puuid endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    /// Encrypted summoner ID
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub account_id: String,
    pub puuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile_icon_id: i64,
    #[serde(default)]
    pub revision_date: i64,
    #[serde(default)]
    pub summoner_level: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_deserialization() {
        let json = r#"{"puuid":"abc-123","gameName":"Player","tagLine":"EUW"}"#;
        let account: AccountDto = serde_json::from_str(json).unwrap();

        assert_eq!(account.puuid, "abc-123");
        assert_eq!(account.game_name, "Player");
        assert_eq!(account.tag_line, "EUW");
    }

    #[test]
    fn test_summoner_defaults_missing_fields() {
        // Riot has removed `name` from newer summoner payloads
        let json = r#"{"id":"enc-id","puuid":"abc","summonerLevel":412}"#;
        let summoner: SummonerDto = serde_json::from_str(json).unwrap();

        assert_eq!(summoner.id, "enc-id");
        assert_eq!(summoner.name, "");
        assert_eq!(summoner.summoner_level, 412);
    }
}
