//! Regional routing values and their platform candidate sets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::RiotError;

/// A regional routing value.
///
/// Match and account data live on the regional hosts; summoner, league and
/// mastery data live on the platform hosts grouped under each region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Americas,
    Europe,
    Asia,
    Sea,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Americas, Region::Europe, Region::Asia, Region::Sea];

    /// Parse a routing value case-insensitively.
    pub fn parse(value: &str) -> Result<Self, RiotError> {
        match value.to_ascii_lowercase().as_str() {
            "americas" => Ok(Region::Americas),
            "europe" => Ok(Region::Europe),
            "asia" => Ok(Region::Asia),
            "sea" => Ok(Region::Sea),
            _ => Err(RiotError::InvalidRegion(value.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Americas => "americas",
            Region::Europe => "europe",
            Region::Asia => "asia",
            Region::Sea => "sea",
        }
    }

    /// Platform shards under this routing value, in probe order.
    ///
    /// The upstream exposes no reverse index from PUUID to platform, so
    /// resolution walks this list front to back. The order is fixed;
    /// callers rely on it being deterministic.
    pub fn platforms(&self) -> &'static [&'static str] {
        match self {
            Region::Americas => &["na1", "br1", "la1", "la2"],
            Region::Europe => &["euw1", "eun1", "tr1", "ru"],
            Region::Asia => &["kr", "jp1"],
            Region::Sea => &["oc1", "ph2", "sg2", "th2", "vn2"],
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = RiotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::parse(s)
    }
}
