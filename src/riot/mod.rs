//! Riot API upstream client.
//!
//! The upstream shards player records by platform (na1, euw1, kr, ...) and
//! groups platforms under regional routing values (americas, europe, asia,
//! sea). Match data is served by the regional hosts, summoner/league/mastery
//! data by the platform hosts.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::models::{AccountDto, LeagueEntryDto, MatchRecord, SummonerDto};

pub mod fetcher;
pub mod regions;
pub mod resolver;

pub use fetcher::fetch_matches;
pub use regions::Region;
pub use resolver::probe_platforms;

const API_HOST: &str = "api.riotgames.com";

/// Errors from the Riot API client and platform resolution.
#[derive(Debug, Error)]
pub enum RiotError {
    #[error("Invalid region '{0}'. Must be one of: americas, europe, asia, sea")]
    InvalidRegion(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: invalid or expired Riot API key")]
    Forbidden,

    #[error("Upstream returned {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Every platform candidate answered "not found".
    #[error("No {resource} found on any platform in {region} region")]
    ExhaustedNotFound { resource: String, region: Region },

    /// At least one platform candidate failed for a reason other than
    /// "not found"; the last such failure is carried.
    #[error("Failed to find {resource} in {region} region. Last error: {source}")]
    Exhausted {
        resource: String,
        region: Region,
        source: Box<RiotError>,
    },
}

/// Client for the Riot REST API, authenticated by a static per-process key.
pub struct RiotClient {
    client: Client,
    api_key: String,
}

impl RiotClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, RiotError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_key })
    }

    /// Issue a GET and decode the JSON body, mapping upstream status codes
    /// onto the error taxonomy. `resource` names what was being fetched for
    /// error messages.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        resource: &str,
    ) -> Result<T, RiotError> {
        let response = self
            .client
            .get(url)
            .header("X-Riot-Token", &self.api_key)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(RiotError::NotFound(resource.to_string())),
            StatusCode::FORBIDDEN => Err(RiotError::Forbidden),
            status => {
                let message = response.text().await.unwrap_or_default();
                Err(RiotError::UpstreamStatus {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    /// Account lookup by Riot ID (gameName + tagLine), on the regional host.
    pub async fn account_by_riot_id(
        &self,
        region: Region,
        game_name: &str,
        tag_line: &str,
    ) -> Result<AccountDto, RiotError> {
        let url = format!(
            "https://{}.{}/riot/account/v1/accounts/by-riot-id/{}/{}",
            region, API_HOST, game_name, tag_line
        );
        self.get_json(&url, &format!("account {}#{}", game_name, tag_line))
            .await
    }

    /// Summoner lookup by PUUID, on one platform host.
    pub async fn summoner_by_puuid(
        &self,
        platform: &str,
        puuid: &str,
    ) -> Result<SummonerDto, RiotError> {
        let url = format!(
            "https://{}.{}/lol/summoner/v4/summoners/by-puuid/{}",
            platform, API_HOST, puuid
        );
        self.get_json(&url, "summoner").await
    }

    /// Recent match ids for a player, most recent first.
    pub async fn match_ids_by_puuid(
        &self,
        region: Region,
        puuid: &str,
        count: u32,
        queue: Option<u32>,
    ) -> Result<Vec<String>, RiotError> {
        let mut url = format!(
            "https://{}.{}/lol/match/v5/matches/by-puuid/{}/ids?start=0&count={}",
            region, API_HOST, puuid, count
        );
        if let Some(queue) = queue {
            url.push_str(&format!("&queue={}", queue));
        }
        self.get_json(&url, "match history").await
    }

    /// Full match payload, decoded into the fields the aggregations need.
    pub async fn match_by_id(
        &self,
        region: Region,
        match_id: &str,
    ) -> Result<MatchRecord, RiotError> {
        let url = format!(
            "https://{}.{}/lol/match/v5/matches/{}",
            region, API_HOST, match_id
        );
        self.get_json(&url, &format!("match {}", match_id)).await
    }

    /// Full match payload as raw JSON, for pass-through endpoints.
    pub async fn match_raw_by_id(
        &self,
        region: Region,
        match_id: &str,
    ) -> Result<Value, RiotError> {
        let url = format!(
            "https://{}.{}/lol/match/v5/matches/{}",
            region, API_HOST, match_id
        );
        self.get_json(&url, &format!("match {}", match_id)).await
    }

    /// Match timeline as raw JSON.
    pub async fn match_timeline_by_id(
        &self,
        region: Region,
        match_id: &str,
    ) -> Result<Value, RiotError> {
        let url = format!(
            "https://{}.{}/lol/match/v5/matches/{}/timeline",
            region, API_HOST, match_id
        );
        self.get_json(&url, &format!("timeline for match {}", match_id))
            .await
    }

    /// Ranked league entries for a summoner, on one platform host.
    pub async fn league_entries_by_summoner(
        &self,
        platform: &str,
        summoner_id: &str,
    ) -> Result<Vec<LeagueEntryDto>, RiotError> {
        let url = format!(
            "https://{}.{}/lol/league/v4/entries/by-summoner/{}",
            platform, API_HOST, summoner_id
        );
        self.get_json(&url, "ranked entries").await
    }

    /// All champion masteries for a summoner.
    pub async fn masteries_by_summoner(
        &self,
        platform: &str,
        summoner_id: &str,
    ) -> Result<Value, RiotError> {
        let url = format!(
            "https://{}.{}/lol/champion-mastery/v4/champion-masteries/by-summoner/{}",
            platform, API_HOST, summoner_id
        );
        self.get_json(&url, "champion masteries").await
    }

    /// Mastery for one champion.
    pub async fn mastery_by_champion(
        &self,
        platform: &str,
        summoner_id: &str,
        champion_id: i64,
    ) -> Result<Value, RiotError> {
        let url = format!(
            "https://{}.{}/lol/champion-mastery/v4/champion-masteries/by-summoner/{}/by-champion/{}",
            platform, API_HOST, summoner_id, champion_id
        );
        self.get_json(&url, "champion mastery").await
    }

    /// Top N champion masteries.
    pub async fn top_masteries(
        &self,
        platform: &str,
        summoner_id: &str,
        count: u32,
    ) -> Result<Value, RiotError> {
        let url = format!(
            "https://{}.{}/lol/champion-mastery/v4/champion-masteries/by-summoner/{}/top?count={}",
            platform, API_HOST, summoner_id, count
        );
        self.get_json(&url, "top champion masteries").await
    }

    /// Total mastery score.
    pub async fn mastery_score(
        &self,
        platform: &str,
        summoner_id: &str,
    ) -> Result<Value, RiotError> {
        let url = format!(
            "https://{}.{}/lol/champion-mastery/v4/scores/by-summoner/{}",
            platform, API_HOST, summoner_id
        );
        self.get_json(&url, "mastery score").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_construction() {
        let client = RiotClient::new("RGAPI-test".to_string(), Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_error_messages_carry_context() {
        let err = RiotError::Exhausted {
            resource: "summoner".to_string(),
            region: Region::Europe,
            source: Box::new(RiotError::UpstreamStatus {
                status: 503,
                message: "maintenance".to_string(),
            }),
        };
        let text = err.to_string();

        assert!(text.contains("summoner"));
        assert!(text.contains("europe"));
        assert!(text.contains("503"));
    }
}
