//! Data Dragon asset catalog accessor.
//!
//! Fetches the versioned champion and item documents fresh per request and
//! resolves name/id lookups against them. The per-champion detail document
//! (abilities, base stats, lore) lives at its own URL and is fetched only
//! when a caller asks for detail.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use crate::config::CatalogConfig;
use crate::models::{ChampionDetail, ChampionRoster, ItemCatalog};

/// Errors from the catalog accessor.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog document malformed: {0}")]
    Malformed(String),
}

/// Client for the Data Dragon static catalog.
pub struct CatalogClient {
    client: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn version(&self) -> &str {
        &self.config.version
    }

    pub fn language(&self) -> &str {
        &self.config.language
    }

    fn champions_url(&self) -> String {
        format!(
            "{}/cdn/{}/data/{}/champion.json",
            self.config.base_url, self.config.version, self.config.language
        )
    }

    fn champion_detail_url(&self, champion_key: &str) -> String {
        format!(
            "{}/cdn/{}/data/{}/champion/{}.json",
            self.config.base_url, self.config.version, self.config.language, champion_key
        )
    }

    fn items_url(&self) -> String {
        format!(
            "{}/cdn/{}/data/{}/item.json",
            self.config.base_url, self.config.version, self.config.language
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        Ok(response.json().await?)
    }

    /// Fetch the full champion roster document.
    pub async fn fetch_champions(&self) -> Result<ChampionRoster, CatalogError> {
        let roster: ChampionRoster = self.get_json(&self.champions_url()).await?;
        if roster.data.is_empty() {
            return Err(CatalogError::Malformed(
                "champion document has no data".to_string(),
            ));
        }
        Ok(roster)
    }

    /// Fetch the per-champion detail document and extract the single entry.
    pub async fn fetch_champion_detail(
        &self,
        champion_key: &str,
    ) -> Result<Option<ChampionDetail>, CatalogError> {
        #[derive(serde::Deserialize)]
        struct DetailDocument {
            #[serde(default)]
            data: std::collections::HashMap<String, ChampionDetail>,
        }

        let url = self.champion_detail_url(champion_key);
        let mut document: DetailDocument = self.get_json(&url).await?;
        Ok(document.data.remove(champion_key))
    }

    /// Fetch the full item document.
    pub async fn fetch_items(&self) -> Result<ItemCatalog, CatalogError> {
        self.get_json(&self.items_url()).await
    }

    /// Fetch the item document for enrichment, degrading to an empty
    /// catalog on failure instead of surfacing an error. Item names then
    /// fall back to placeholders; the request itself keeps working.
    pub async fn fetch_items_or_empty(&self) -> ItemCatalog {
        match self.fetch_items().await {
            Ok(catalog) => catalog,
            Err(err) => {
                warn!("Failed to fetch item catalog: {}", err);
                ItemCatalog::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> CatalogClient {
        CatalogClient::new(CatalogConfig::default()).unwrap()
    }

    #[test]
    fn test_champion_url_carries_version_and_language() {
        let client = test_client();
        let url = client.champions_url();

        assert!(url.starts_with("https://ddragon.leagueoflegends.com/cdn/"));
        assert!(url.contains("/data/en_US/champion.json"));
    }

    #[test]
    fn test_detail_url_uses_catalog_key() {
        let client = test_client();
        let url = client.champion_detail_url("MonkeyKing");

        assert!(url.ends_with("/champion/MonkeyKing.json"));
    }

    #[test]
    fn test_items_url() {
        let client = test_client();
        assert!(client.items_url().ends_with("/item.json"));
    }
}
