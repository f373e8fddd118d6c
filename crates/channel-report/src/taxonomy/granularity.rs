//! Grouping axes for report rows.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChannelError, Result};

use super::order::{Category, Ranked};
use super::property::{EntityAttribute, Property, TimeMetric};

catalog! {
    /// Time-based grouping, finest first.
    TimeGranularity => TimeGranularity, "time granularity" {
        Hourly = "hourly",
        Daily = "daily",
    }
}

catalog! {
    /// Entity-based grouping, finest first.
    EntityGranularity => EntityGranularity, "entity granularity" {
        Asset = "asset",
        Ad = "ad",
        Adgroup = "adgroup",
        Campaign = "campaign",
        Account = "account",
    }
}

impl TimeGranularity {
    /// Strictly coarser time granularities, finest first.
    pub fn ancestors(self) -> &'static [TimeGranularity] {
        &Self::ALL[self as usize + 1..]
    }
}

impl EntityGranularity {
    /// Strictly coarser entity granularities, finest first.
    pub fn ancestors(self) -> &'static [EntityGranularity] {
        &Self::ALL[self as usize + 1..]
    }
}

/// A grouping axis of either kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Granularity {
    Time(TimeGranularity),
    Entity(EntityGranularity),
}

impl Granularity {
    /// Every granularity: time catalog, then entity catalog.
    pub const ALL: [Granularity; 7] = [
        Granularity::Time(TimeGranularity::Hourly),
        Granularity::Time(TimeGranularity::Daily),
        Granularity::Entity(EntityGranularity::Asset),
        Granularity::Entity(EntityGranularity::Ad),
        Granularity::Entity(EntityGranularity::Adgroup),
        Granularity::Entity(EntityGranularity::Campaign),
        Granularity::Entity(EntityGranularity::Account),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Time(g) => g.as_str(),
            Granularity::Entity(g) => g.as_str(),
        }
    }

    pub fn is_time(self) -> bool {
        matches!(self, Granularity::Time(_))
    }

    /// The property whose value identifies a row at this granularity.
    pub fn identifier_property(self) -> Property {
        match self {
            Granularity::Time(_) => Property::Time(TimeMetric::Time),
            Granularity::Entity(_) => Property::Attribute(EntityAttribute::Id),
        }
    }

    /// Strictly coarser granularities of the same kind, finest first.
    pub fn ancestors(self) -> Vec<Granularity> {
        match self {
            Granularity::Time(g) => g.ancestors().iter().copied().map(Granularity::Time).collect(),
            Granularity::Entity(g) => g
                .ancestors()
                .iter()
                .copied()
                .map(Granularity::Entity)
                .collect(),
        }
    }
}

impl Ranked for Granularity {
    fn category(self) -> Category {
        match self {
            Granularity::Time(g) => g.category(),
            Granularity::Entity(g) => g.category(),
        }
    }

    fn index(self) -> usize {
        match self {
            Granularity::Time(g) => g.index(),
            Granularity::Entity(g) => g.index(),
        }
    }

    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl PartialOrd for Granularity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(*other).ok()
    }
}

impl From<TimeGranularity> for Granularity {
    fn from(g: TimeGranularity) -> Self {
        Granularity::Time(g)
    }
}

impl From<EntityGranularity> for Granularity {
    fn from(g: EntityGranularity) -> Self {
        Granularity::Entity(g)
    }
}

impl FromStr for Granularity {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| ChannelError::UnknownName {
                kind: "granularity",
                name: s.to_string(),
            })
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
