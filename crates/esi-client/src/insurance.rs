//! Ship insurance prices
//!
//! ESI lists insurance levels by name. Names are mapped onto [`CoverageLevel`]
//! while decoding, so an unrecognised level fails the decode with a message
//! naming it rather than being silently dropped.

use crate::error::{EsiError, Result};
use crate::executor::{EsiClient, EsiRequest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Insurance level name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum CoverageLevel {
    /// Basic
    Basic,
    /// Standard
    Standard,
    /// Bronze
    Bronze,
    /// Silver
    Silver,
    /// Gold
    Gold,
    /// Platinum
    Platinum,
}

/// Level name not known to this client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown insurance coverage level: {0:?}")]
pub struct UnknownCoverageLevel(pub String);

impl CoverageLevel {
    /// Every level, cheapest first
    pub const ALL: [CoverageLevel; 6] = [
        CoverageLevel::Basic,
        CoverageLevel::Standard,
        CoverageLevel::Bronze,
        CoverageLevel::Silver,
        CoverageLevel::Gold,
        CoverageLevel::Platinum,
    ];

    /// Name as used by ESI
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Standard => "Standard",
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
        }
    }
}

impl fmt::Display for CoverageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoverageLevel {
    type Err = UnknownCoverageLevel;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| UnknownCoverageLevel(s.to_string()))
    }
}

impl TryFrom<String> for CoverageLevel {
    type Error = UnknownCoverageLevel;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CoverageLevel> for &'static str {
    fn from(level: CoverageLevel) -> Self {
        level.as_str()
    }
}

/// Cost and payout of one insurance level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageTier {
    /// Premium in ISK
    pub cost: f64,
    /// Payout on loss in ISK
    pub payout: f64,
}

/// One insurance level as listed by ESI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsuranceLevel {
    /// Level
    pub name: CoverageLevel,
    /// Premium in ISK
    pub cost: f64,
    /// Payout on loss in ISK
    pub payout: f64,
}

/// Insurance levels offered for one ship type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsurancePrice {
    /// Ship type
    pub type_id: u32,
    /// Offered levels
    #[serde(default)]
    pub levels: Vec<InsuranceLevel>,
}

/// All insurance levels for a ship type, keyed by level
#[derive(Debug, Clone, PartialEq)]
pub struct Coverage {
    /// Ship type
    pub type_id: u32,
    /// Offered tiers
    pub tiers: BTreeMap<CoverageLevel, CoverageTier>,
}

impl Coverage {
    /// Tier for a level, if offered
    pub fn tier(&self, level: CoverageLevel) -> Option<&CoverageTier> {
        self.tiers.get(&level)
    }
}

impl From<InsurancePrice> for Coverage {
    fn from(price: InsurancePrice) -> Self {
        let tiers = price
            .levels
            .into_iter()
            .map(|level| (level.name, CoverageTier { cost: level.cost, payout: level.payout }))
            .collect();

        Self { type_id: price.type_id, tiers }
    }
}

impl EsiClient {
    /// Get insurance prices for every ship type
    pub async fn insurance_prices(&self) -> Result<Vec<InsurancePrice>> {
        self.fetch(EsiRequest::get("/v1/insurance/prices/")).await
    }

    /// Get the insurance coverage for one ship type
    ///
    /// Returns [`EsiError::NotFound`] when ESI lists no insurance for the type.
    pub async fn ship_insurance(&self, ship_type_id: u32) -> Result<Coverage> {
        self.insurance_prices()
            .await?
            .into_iter()
            .find(|price| price.type_id == ship_type_id)
            .map(Coverage::from)
            .ok_or_else(|| EsiError::NotFound(format!("insurance for ship type {}", ship_type_id)))
    }
}
