//! Batch match fetching with per-item failure isolation.

use futures::{stream, StreamExt};
use tracing::warn;

use super::{Region, RiotClient};
use crate::models::MatchRecord;

/// Fetch a batch of matches, at most `max_concurrent` in flight at once.
///
/// A failed fetch is logged and its id dropped; it neither cancels sibling
/// fetches nor aborts the batch. Results come back in input order (most
/// recent first, matching the id list), which the trailing-window
/// aggregations depend on. An empty input yields an empty output; deciding
/// whether that is an error is the caller's concern.
pub async fn fetch_matches(
    client: &RiotClient,
    region: Region,
    match_ids: &[String],
    max_concurrent: usize,
) -> Vec<MatchRecord> {
    stream::iter(match_ids.iter().cloned())
        .map(|match_id| async move {
            match client.match_by_id(region, &match_id).await {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!("Failed to fetch match {}: {}", match_id, err);
                    None
                }
            }
        })
        .buffered(max_concurrent.max(1))
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_empty_batch_yields_empty_result() {
        let client =
            RiotClient::new("RGAPI-test".to_string(), Duration::from_secs(1)).unwrap();

        let records = fetch_matches(&client, Region::Europe, &[], 4).await;
        assert!(records.is_empty());
    }
}
