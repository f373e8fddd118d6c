//! Canonical columns: one (granularity, property) pair each.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ChannelError, Result};

use super::granularity::{EntityGranularity, Granularity, TimeGranularity};
use super::order::Ranked;
use super::property::{EntityAttribute, EntityMetric, Property, TimeMetric};

/// Every canonical column, in taxonomy order.
static CATALOG: Lazy<Vec<Column>> = Lazy::new(|| {
    let time = TimeGranularity::ALL.iter().flat_map(|&g| {
        TimeMetric::ALL.iter().map(move |&p| Column::Time(g, p))
    });
    let entity = EntityGranularity::ALL.iter().flat_map(|&g| {
        EntityAttribute::ALL
            .iter()
            .map(move |&p| Column::Attribute(g, p))
            .chain(EntityMetric::ALL.iter().map(move |&p| Column::Metric(g, p)))
    });
    time.chain(entity).collect()
});

/// A canonical column, tagged by the category of its property.
///
/// Time granularities only carry time metrics and entity granularities only
/// carry entity attributes and metrics, so the pairing is encoded in the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Time(TimeGranularity, TimeMetric),
    Attribute(EntityGranularity, EntityAttribute),
    Metric(EntityGranularity, EntityMetric),
}

impl Column {
    /// Every column of the taxonomy in taxonomy order.
    pub fn all() -> &'static [Column] {
        &CATALOG
    }

    /// Pair a granularity with a property, if the taxonomy allows it.
    pub fn new(granularity: Granularity, property: Property) -> Option<Column> {
        match (granularity, property) {
            (Granularity::Time(g), Property::Time(p)) => Some(Column::Time(g, p)),
            (Granularity::Entity(g), Property::Attribute(p)) => Some(Column::Attribute(g, p)),
            (Granularity::Entity(g), Property::Metric(p)) => Some(Column::Metric(g, p)),
            _ => None,
        }
    }

    /// Identifying column of a granularity (`<granularity>.time` or `<granularity>.id`).
    pub fn identifier(granularity: Granularity) -> Column {
        match granularity {
            Granularity::Time(g) => Column::Time(g, TimeMetric::Time),
            Granularity::Entity(g) => Column::Attribute(g, EntityAttribute::Id),
        }
    }

    pub fn granularity(self) -> Granularity {
        match self {
            Column::Time(g, _) => Granularity::Time(g),
            Column::Attribute(g, _) | Column::Metric(g, _) => Granularity::Entity(g),
        }
    }

    pub fn property(self) -> Property {
        match self {
            Column::Time(_, p) => Property::Time(p),
            Column::Attribute(_, p) => Property::Attribute(p),
            Column::Metric(_, p) => Property::Metric(p),
        }
    }

    /// Dotted canonical name, e.g. `campaign.spend`.
    pub fn name(self) -> String {
        format!("{}.{}", self.granularity(), self.property())
    }

    /// Compare by granularity, then by property.
    pub fn try_cmp(self, other: Column) -> Result<Ordering> {
        match self.granularity().try_cmp(other.granularity())? {
            Ordering::Equal => self.property().try_cmp(other.property()),
            ordering => Ok(ordering),
        }
    }
}

impl PartialOrd for Column {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(*other).ok()
    }
}

impl FromStr for Column {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self> {
        let unknown = || ChannelError::UnknownName {
            kind: "column",
            name: s.to_string(),
        };
        let (granularity, property) = s.split_once('.').ok_or_else(unknown)?;
        let granularity: Granularity = granularity.parse()?;
        let property: Property = property.parse()?;
        Column::new(granularity, property).ok_or_else(unknown)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.granularity(), self.property())
    }
}

impl Serialize for Column {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

impl<'de> Deserialize<'de> for Column {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
