//! Canonical-to-native schema maps.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::taxonomy::{Column, Granularity, PropertyCategory};

use super::vocabulary::ChannelVocabulary;

/// Every canonical column with the channel's candidate native name, if any.
#[derive(Debug, Clone, Serialize)]
pub struct FullSchema {
    entries: IndexMap<Column, Option<String>>,
}

impl FullSchema {
    /// Ask the vocabulary for every column of the taxonomy.
    pub fn build<V: ChannelVocabulary + ?Sized>(vocabulary: &V) -> Self {
        let entries = Column::all()
            .iter()
            .map(|&column| (column, vocabulary.native_column(column)))
            .collect();
        Self { entries }
    }

    /// Candidate native name; `None` when the channel does not offer it.
    pub fn get(&self, column: Column) -> Option<&str> {
        self.entries.get(&column).and_then(|n| n.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Column, Option<&str>)> {
        self.entries.iter().map(|(&c, n)| (c, n.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Restrict to offered columns that the channel instance declares.
    ///
    /// A column is declared when the available set contains its native name,
    /// its dotted canonical name, or its bare property name.
    pub fn filter(
        &self,
        available: &IndexSet<String>,
        granularities: Option<&[Granularity]>,
        categories: Option<&[PropertyCategory]>,
    ) -> SchemaMap {
        let entries = self
            .entries
            .iter()
            .filter(|(column, _)| {
                granularities.is_none_or(|gs| gs.contains(&column.granularity()))
                    && categories.is_none_or(|cs| cs.contains(&column.property().property_category()))
            })
            .filter_map(|(&column, native)| {
                let native = native.as_ref()?;
                let declared = available.contains(native)
                    || available.contains(&column.name())
                    || available.contains(column.property().as_str());
                declared.then(|| (column, native.clone()))
            })
            .collect();
        SchemaMap { entries }
    }
}

/// Offered and declared columns with their native names, in taxonomy order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaMap {
    entries: IndexMap<Column, String>,
}

impl SchemaMap {
    pub fn get(&self, column: Column) -> Option<&str> {
        self.entries.get(&column).map(|n| n.as_str())
    }

    pub fn contains(&self, column: Column) -> bool {
        self.entries.contains_key(&column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Column, &str)> {
        self.entries.iter().map(|(&c, n)| (c, n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical columns in order.
    pub fn columns(&self) -> Vec<Column> {
        self.entries.keys().copied().collect()
    }

    /// Native names in order. Channels may map several columns to one name.
    pub fn native_columns(&self) -> Vec<&str> {
        self.entries.values().map(|n| n.as_str()).collect()
    }

    /// Distinct granularities present, in order.
    pub fn granularities(&self) -> Vec<Granularity> {
        self.entries
            .keys()
            .map(|c| c.granularity())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{MappedVocabulary, NativeFallback};
    use crate::taxonomy::{EntityGranularity, EntityMetric, TimeGranularity, TimeMetric};

    fn available(names: &[&str]) -> IndexSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn vocabulary() -> MappedVocabulary {
        MappedVocabulary::new(NativeFallback::Unsupported)
            .with_column(Column::Time(TimeGranularity::Daily, TimeMetric::Time), Some("date"))
            .with_column(Column::Metric(EntityGranularity::Campaign, EntityMetric::Spend), Some("cost"))
            .with_column(Column::Metric(EntityGranularity::Campaign, EntityMetric::Clicks), Some("clicks"))
    }

    #[test]
    fn test_full_schema_covers_taxonomy() {
        let full = FullSchema::build(&vocabulary());
        assert_eq!(full.len(), Column::all().len());
        assert_eq!(
            full.get(Column::Metric(EntityGranularity::Campaign, EntityMetric::Spend)),
            Some("cost")
        );
        assert_eq!(full.get(Column::Metric(EntityGranularity::Ad, EntityMetric::Spend)), None);
    }

    #[test]
    fn test_filter_by_available_columns() {
        let full = FullSchema::build(&vocabulary());
        let map = full.filter(&available(&["date", "cost"]), None, None);
        assert_eq!(map.native_columns(), ["date", "cost"]);
    }

    #[test]
    fn test_filter_accepts_canonical_names() {
        let full = FullSchema::build(&vocabulary());
        let map = full.filter(&available(&["campaign.clicks"]), None, None);
        assert_eq!(
            map.columns(),
            [Column::Metric(EntityGranularity::Campaign, EntityMetric::Clicks)]
        );
    }

    #[test]
    fn test_filter_by_granularity_and_category() {
        let full = FullSchema::build(&vocabulary());
        let all = available(&["date", "cost", "clicks"]);
        let campaign = [Granularity::Entity(EntityGranularity::Campaign)];
        let map = full.filter(&all, Some(&campaign), None);
        assert_eq!(map.native_columns(), ["cost", "clicks"]);

        let map = full.filter(&all, None, Some(&[PropertyCategory::TimeMetric]));
        assert_eq!(map.native_columns(), ["date"]);
        assert_eq!(map.granularities(), [Granularity::Time(TimeGranularity::Daily)]);
    }
}
