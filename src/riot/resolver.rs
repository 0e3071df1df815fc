//! Ordered platform fallback.
//!
//! Player records are sharded by platform but keyed by a cross-platform
//! PUUID, so a lookup must probe each platform in its region until one
//! answers. First success wins; "not found" moves on to the next candidate;
//! any other failure is remembered and only surfaced if every candidate
//! fails.

use std::future::Future;

use tracing::{debug, info, warn};

use super::{Region, RiotClient, RiotError};
use crate::models::SummonerDto;

/// Probe each platform of `region` in its fixed order and return the first
/// success together with the platform it came from.
pub async fn probe_platforms<T, F, Fut>(
    region: Region,
    resource: &str,
    mut probe: F,
) -> Result<(&'static str, T), RiotError>
where
    F: FnMut(&'static str) -> Fut,
    Fut: Future<Output = Result<T, RiotError>>,
{
    let mut last_error: Option<RiotError> = None;

    for &platform in region.platforms() {
        match probe(platform).await {
            Ok(value) => {
                info!("Found {} on platform: {}", resource, platform);
                return Ok((platform, value));
            }
            Err(RiotError::NotFound(_)) => {
                debug!("{} not found on platform {}, trying next", resource, platform);
                continue;
            }
            Err(err) => {
                warn!("Platform {} probe failed: {}", platform, err);
                last_error = Some(err);
                continue;
            }
        }
    }

    match last_error {
        Some(source) => Err(RiotError::Exhausted {
            resource: resource.to_string(),
            region,
            source: Box::new(source),
        }),
        None => Err(RiotError::ExhaustedNotFound {
            resource: resource.to_string(),
            region,
        }),
    }
}

impl RiotClient {
    /// Locate a summoner within a region, probing its platforms in order.
    pub async fn resolve_summoner(
        &self,
        region: Region,
        puuid: &str,
    ) -> Result<(&'static str, SummonerDto), RiotError> {
        probe_platforms(region, "summoner", |platform| {
            self.summoner_by_puuid(platform, puuid)
        })
        .await
    }

    /// Locate a summoner's ranked entries within a region.
    pub async fn resolve_league_entries(
        &self,
        region: Region,
        summoner_id: &str,
    ) -> Result<(&'static str, Vec<crate::models::LeagueEntryDto>), RiotError> {
        probe_platforms(region, "ranked data", |platform| {
            self.league_entries_by_summoner(platform, summoner_id)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn not_found() -> RiotError {
        RiotError::NotFound("summoner".to_string())
    }

    fn unavailable() -> RiotError {
        RiotError::UpstreamStatus {
            status: 503,
            message: "maintenance".to_string(),
        }
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let calls = AtomicUsize::new(0);
        let (platform, value) = probe_platforms(Region::Americas, "summoner", |p| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if p == "na1" {
                    Ok(42)
                } else {
                    Err(not_found())
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(platform, "na1");
        assert_eq!(value, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_probes_in_order_until_hit() {
        // Success can sit behind any number of misses; each position must
        // resolve to exactly that platform with exactly that many probes.
        for (index, &expected) in Region::Sea.platforms().iter().enumerate() {
            let calls = AtomicUsize::new(0);
            let (platform, _) = probe_platforms(Region::Sea, "summoner", |p| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if p == expected {
                        Ok(())
                    } else {
                        Err(not_found())
                    }
                }
            })
            .await
            .unwrap();

            assert_eq!(platform, expected);
            assert_eq!(calls.load(Ordering::SeqCst), index + 1);
        }
    }

    #[tokio::test]
    async fn test_all_not_found_is_resource_not_found() {
        let result: Result<(&'static str, ()), _> =
            probe_platforms(Region::Asia, "summoner", |_| async { Err(not_found()) }).await;

        match result {
            Err(RiotError::ExhaustedNotFound { region, .. }) => {
                assert_eq!(region, Region::Asia);
            }
            other => panic!("expected ExhaustedNotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_recorded_error_surfaces_as_exhausted() {
        // One mid-list candidate fails hard, the rest 404: the hard failure
        // must be carried out of the probe.
        let result: Result<(&'static str, ()), _> =
            probe_platforms(Region::Europe, "ranked data", |p| async move {
                if p == "eun1" {
                    Err(unavailable())
                } else {
                    Err(not_found())
                }
            })
            .await;

        match result {
            Err(RiotError::Exhausted { source, .. }) => {
                assert!(source.to_string().contains("503"));
            }
            other => panic!("expected Exhausted, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_error_then_success_still_succeeds() {
        let (platform, _) = probe_platforms(Region::Europe, "summoner", |p| async move {
            match p {
                "euw1" => Err(unavailable()),
                "eun1" => Ok(()),
                _ => Err(not_found()),
            }
        })
        .await
        .unwrap();

        assert_eq!(platform, "eun1");
    }
}
