//! Per-channel translation of canonical names into native column names.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::input::Value;
use crate::taxonomy::{
    Column, EntityAttribute, EntityGranularity, EntityMetric, Granularity, Property,
    TimeGranularity, TimeMetric,
};

/// How a channel names the canonical taxonomy.
///
/// Each category has its own translation function. Returning `None` means the
/// channel does not offer that entry. The defaults use the canonical name.
pub trait ChannelVocabulary {
    fn time_granularity(&self, granularity: TimeGranularity) -> Option<String> {
        Some(granularity.as_str().to_string())
    }

    fn entity_granularity(&self, granularity: EntityGranularity) -> Option<String> {
        Some(granularity.as_str().to_string())
    }

    fn time_metric(&self, metric: TimeMetric, _granularity: TimeGranularity) -> Option<String> {
        Some(metric.as_str().to_string())
    }

    fn entity_attribute(
        &self,
        attribute: EntityAttribute,
        _granularity: EntityGranularity,
    ) -> Option<String> {
        Some(attribute.as_str().to_string())
    }

    fn entity_metric(&self, metric: EntityMetric, _granularity: EntityGranularity) -> Option<String> {
        Some(metric.as_str().to_string())
    }

    /// Native name of a granularity (a report level, in most channel APIs).
    fn native_granularity(&self, granularity: Granularity) -> Option<String> {
        match granularity {
            Granularity::Time(g) => self.time_granularity(g),
            Granularity::Entity(g) => self.entity_granularity(g),
        }
    }

    /// Native column name for a canonical column.
    fn native_column(&self, column: Column) -> Option<String> {
        match column {
            Column::Time(g, p) => self.time_metric(p, g),
            Column::Attribute(g, p) => self.entity_attribute(p, g),
            Column::Metric(g, p) => self.entity_metric(p, g),
        }
    }

    /// Convert native values copied into a canonical column.
    fn convert_column(&self, _column: Column, values: &[Value]) -> Vec<Value> {
        values.to_vec()
    }
}

/// A channel whose native names are the canonical names.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalVocabulary;

impl ChannelVocabulary for CanonicalVocabulary {}

/// What a [`MappedVocabulary`] answers for entries it has no mapping for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeFallback {
    /// Use the canonical name.
    #[default]
    Canonical,
    /// The channel does not offer it.
    Unsupported,
}

/// A unit normalization applied while copying values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueTransform {
    Identity,
    /// Multiply numeric values, e.g. `0.000001` for micro-currency amounts.
    Scale { factor: f64 },
    /// Render every value as text.
    Text,
}

impl ValueTransform {
    pub fn apply(&self, value: &Value) -> Value {
        match self {
            ValueTransform::Identity => value.clone(),
            ValueTransform::Scale { factor } => match value.as_f64() {
                Some(x) => Value::Float(x * factor),
                None => value.clone(),
            },
            ValueTransform::Text => {
                if value.is_empty() {
                    Value::Null
                } else {
                    Value::Text(value.to_string())
                }
            }
        }
    }
}

/// A vocabulary driven by explicit lookup tables.
///
/// Lookup precedence for columns: exact column entry, then bare property
/// entry, then the fallback. A `None` entry marks the column unsupported.
#[derive(Debug, Clone, Default)]
pub struct MappedVocabulary {
    fallback: NativeFallback,
    granularities: IndexMap<Granularity, Option<String>>,
    columns: IndexMap<Column, Option<String>>,
    properties: IndexMap<Property, Option<String>>,
    transforms: IndexMap<Column, ValueTransform>,
}

impl MappedVocabulary {
    pub fn new(fallback: NativeFallback) -> Self {
        Self {
            fallback,
            ..Default::default()
        }
    }

    pub fn with_granularity(mut self, granularity: Granularity, native: Option<&str>) -> Self {
        self.granularities
            .insert(granularity, native.map(str::to_string));
        self
    }

    pub fn with_column(mut self, column: Column, native: Option<&str>) -> Self {
        self.columns.insert(column, native.map(str::to_string));
        self
    }

    pub fn with_property(mut self, property: Property, native: Option<&str>) -> Self {
        self.properties.insert(property, native.map(str::to_string));
        self
    }

    pub fn with_transform(mut self, column: Column, transform: ValueTransform) -> Self {
        self.transforms.insert(column, transform);
        self
    }

    fn fallback_name(&self, canonical: &str) -> Option<String> {
        match self.fallback {
            NativeFallback::Canonical => Some(canonical.to_string()),
            NativeFallback::Unsupported => None,
        }
    }

    fn lookup_column(&self, column: Column) -> Option<String> {
        if let Some(native) = self.columns.get(&column) {
            return native.clone();
        }
        let property = column.property();
        if let Some(native) = self.properties.get(&property) {
            return native.clone();
        }
        self.fallback_name(property.as_str())
    }

    fn lookup_granularity(&self, granularity: Granularity) -> Option<String> {
        match self.granularities.get(&granularity) {
            Some(native) => native.clone(),
            None => self.fallback_name(granularity.as_str()),
        }
    }
}

impl ChannelVocabulary for MappedVocabulary {
    fn time_granularity(&self, granularity: TimeGranularity) -> Option<String> {
        self.lookup_granularity(Granularity::Time(granularity))
    }

    fn entity_granularity(&self, granularity: EntityGranularity) -> Option<String> {
        self.lookup_granularity(Granularity::Entity(granularity))
    }

    fn time_metric(&self, metric: TimeMetric, granularity: TimeGranularity) -> Option<String> {
        self.lookup_column(Column::Time(granularity, metric))
    }

    fn entity_attribute(
        &self,
        attribute: EntityAttribute,
        granularity: EntityGranularity,
    ) -> Option<String> {
        self.lookup_column(Column::Attribute(granularity, attribute))
    }

    fn entity_metric(&self, metric: EntityMetric, granularity: EntityGranularity) -> Option<String> {
        self.lookup_column(Column::Metric(granularity, metric))
    }

    fn convert_column(&self, column: Column, values: &[Value]) -> Vec<Value> {
        match self.transforms.get(&column) {
            Some(transform) => values.iter().map(|v| transform.apply(v)).collect(),
            None => values.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_vocabulary_uses_property_names() {
        let vocabulary = CanonicalVocabulary;
        let column = Column::Metric(EntityGranularity::Campaign, EntityMetric::Spend);
        assert_eq!(vocabulary.native_column(column).as_deref(), Some("spend"));
        assert_eq!(
            vocabulary
                .native_granularity(Granularity::Time(TimeGranularity::Daily))
                .as_deref(),
            Some("daily")
        );
    }

    #[test]
    fn test_mapped_vocabulary_precedence() {
        let campaign_spend = Column::Metric(EntityGranularity::Campaign, EntityMetric::Spend);
        let ad_spend = Column::Metric(EntityGranularity::Ad, EntityMetric::Spend);
        let ad_clicks = Column::Metric(EntityGranularity::Ad, EntityMetric::Clicks);
        let vocabulary = MappedVocabulary::new(NativeFallback::Unsupported)
            .with_property(Property::Metric(EntityMetric::Spend), Some("cost"))
            .with_column(campaign_spend, Some("campaign_cost"));

        assert_eq!(vocabulary.native_column(campaign_spend).as_deref(), Some("campaign_cost"));
        assert_eq!(vocabulary.native_column(ad_spend).as_deref(), Some("cost"));
        assert_eq!(vocabulary.native_column(ad_clicks), None);
    }

    #[test]
    fn test_explicit_none_marks_unsupported() {
        let column = Column::Attribute(EntityGranularity::Asset, EntityAttribute::Bid);
        let vocabulary = MappedVocabulary::new(NativeFallback::Canonical).with_column(column, None);
        assert_eq!(vocabulary.native_column(column), None);
    }

    #[test]
    fn test_scale_transform() {
        let column = Column::Metric(EntityGranularity::Ad, EntityMetric::Spend);
        let vocabulary = MappedVocabulary::default()
            .with_transform(column, ValueTransform::Scale { factor: 0.5 });
        let values = vocabulary.convert_column(column, &[Value::Int(5), Value::Null]);
        assert_eq!(values[0], Value::Float(2.5));
        assert!(values[1].is_empty());
    }
}
