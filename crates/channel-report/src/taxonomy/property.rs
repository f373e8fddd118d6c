//! Measured and descriptive dimensions reported at a granularity.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChannelError, Result};

use super::order::{Category, Ranked};

catalog! {
    /// Properties reported at a time granularity.
    TimeMetric => TimeMetric, "time metric" {
        Time = "time",
    }
}

catalog! {
    /// Descriptive properties of an entity.
    EntityAttribute => EntityAttribute, "entity attribute" {
        Id = "id",
        Name = "name",
        Type = "type",
        Status = "status",
        DailyBudget = "daily_budget",
        GoalType = "goal_type",
        Goal = "goal",
        BidType = "bid_type",
        Bid = "bid",
        Currency = "currency",
        Timezone = "timezone",
    }
}

catalog! {
    /// Measured properties of an entity.
    EntityMetric => EntityMetric, "entity metric" {
        Spend = "spend",
        Clicks = "clicks",
        Impressions = "impressions",
        Conversions = "conversions",
    }
}

/// Property categories, used to restrict schema lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCategory {
    TimeMetric,
    EntityAttribute,
    EntityMetric,
}

impl PropertyCategory {
    pub const ALL: [PropertyCategory; 3] = [
        PropertyCategory::TimeMetric,
        PropertyCategory::EntityAttribute,
        PropertyCategory::EntityMetric,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PropertyCategory::TimeMetric => "time_metric",
            PropertyCategory::EntityAttribute => "entity_attribute",
            PropertyCategory::EntityMetric => "entity_metric",
        }
    }
}

impl FromStr for PropertyCategory {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ChannelError::UnknownName {
                kind: "property category",
                name: s.to_string(),
            })
    }
}

/// A property of any category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Property {
    Time(TimeMetric),
    Attribute(EntityAttribute),
    Metric(EntityMetric),
}

impl Property {
    /// Every property in catalog order.
    pub fn all() -> impl Iterator<Item = Property> {
        TimeMetric::ALL
            .iter()
            .copied()
            .map(Property::Time)
            .chain(EntityAttribute::ALL.iter().copied().map(Property::Attribute))
            .chain(EntityMetric::ALL.iter().copied().map(Property::Metric))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Property::Time(p) => p.as_str(),
            Property::Attribute(p) => p.as_str(),
            Property::Metric(p) => p.as_str(),
        }
    }

    pub fn property_category(self) -> PropertyCategory {
        match self {
            Property::Time(_) => PropertyCategory::TimeMetric,
            Property::Attribute(_) => PropertyCategory::EntityAttribute,
            Property::Metric(_) => PropertyCategory::EntityMetric,
        }
    }
}

impl Ranked for Property {
    fn category(self) -> Category {
        match self {
            Property::Time(p) => p.category(),
            Property::Attribute(p) => p.category(),
            Property::Metric(p) => p.category(),
        }
    }

    fn index(self) -> usize {
        match self {
            Property::Time(p) => p.index(),
            Property::Attribute(p) => p.index(),
            Property::Metric(p) => p.index(),
        }
    }

    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl PartialOrd for Property {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(*other).ok()
    }
}

impl FromStr for Property {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ChannelError::UnknownName {
                kind: "property",
                name: s.to_string(),
            })
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
