//! Channel reporter: one configured channel instance and its public API.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::input::ReportTable;
use crate::schema::{ChannelVocabulary, FullSchema, SchemaMap};
use crate::taxonomy::{
    EntityGranularity, Granularity, PropertyCategory, TimeGranularity,
};

/// Report options recognized by every channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Time granularity requested for the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_granularity: Option<TimeGranularity>,
}

impl ReportOptions {
    pub const TIME_GRANULARITY: &'static str = "time_granularity";

    pub fn with_time_granularity(mut self, granularity: TimeGranularity) -> Self {
        self.time_granularity = Some(granularity);
        self
    }

    /// Look an option up by key.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        match key {
            Self::TIME_GRANULARITY => self
                .time_granularity
                .map(|g| serde_json::Value::String(g.as_str().to_string())),
            _ => None,
        }
    }
}

/// A channel reporter instance.
///
/// Configuration (vocabulary, available columns, filters, options) is fixed
/// once built and the full schema map is computed up front, so every
/// operation takes `&self` and independent reports can be translated in
/// parallel.
///
/// # Example
///
/// ```
/// use channel_report::{ChannelReporter, ReportTable, Value};
/// use channel_report::schema::{MappedVocabulary, NativeFallback};
/// use channel_report::taxonomy::{Column, EntityGranularity, EntityMetric, Granularity};
///
/// let vocabulary = MappedVocabulary::new(NativeFallback::Unsupported)
///     .with_column(Column::Metric(EntityGranularity::Campaign, EntityMetric::Spend), Some("cost"));
/// let reporter = ChannelReporter::new(vocabulary, ["cost"]);
///
/// let source = ReportTable::from_columns([("cost", vec![Value::Int(10), Value::Int(20)])]).unwrap();
/// let report = reporter.translate(&source, &[Granularity::Entity(EntityGranularity::Campaign)]).unwrap();
/// assert_eq!(report.column("campaign.spend").unwrap(), [Value::Int(10), Value::Int(20)]);
/// ```
#[derive(Debug, Clone)]
pub struct ChannelReporter<V> {
    vocabulary: V,
    available: IndexSet<String>,
    filters: IndexMap<String, serde_json::Value>,
    options: ReportOptions,
    full_schema: FullSchema,
}

impl<V: ChannelVocabulary> ChannelReporter<V> {
    /// Create a reporter for a vocabulary and the native columns it declares.
    pub fn new<I, S>(vocabulary: V, available_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let full_schema = FullSchema::build(&vocabulary);
        let available: IndexSet<String> = available_columns.into_iter().map(Into::into).collect();
        debug!(available = available.len(), "built full schema map");
        Self {
            vocabulary,
            available,
            filters: IndexMap::new(),
            options: ReportOptions::default(),
            full_schema,
        }
    }

    /// Attach channel-defined filters.
    pub fn with_filters(mut self, filters: IndexMap<String, serde_json::Value>) -> Self {
        self.filters = filters;
        self
    }

    /// Attach report options.
    pub fn with_options(mut self, options: ReportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn vocabulary(&self) -> &V {
        &self.vocabulary
    }

    pub fn available_columns(&self) -> &IndexSet<String> {
        &self.available
    }

    pub fn filters(&self) -> &IndexMap<String, serde_json::Value> {
        &self.filters
    }

    /// Look a channel filter up by key.
    pub fn filter_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.filters.get(key)
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Every canonical column with this channel's candidate native name.
    pub fn full_schema(&self) -> &FullSchema {
        &self.full_schema
    }

    /// Offered and declared columns, optionally restricted.
    pub fn filtered_map(
        &self,
        granularities: Option<&[Granularity]>,
        categories: Option<&[PropertyCategory]>,
    ) -> SchemaMap {
        self.full_schema
            .filter(&self.available, granularities, categories)
    }

    /// Native names of the filtered map, in taxonomy order.
    pub fn list_columns(
        &self,
        granularity: Option<Granularity>,
        category: Option<PropertyCategory>,
    ) -> Vec<String> {
        let granularities = granularity.map(|g| [g]);
        let categories = category.map(|c| [c]);
        self.filtered_map(
            granularities.as_ref().map(|g| g.as_slice()),
            categories.as_ref().map(|c| c.as_slice()),
        )
        .native_columns()
        .into_iter()
        .map(str::to_string)
        .collect()
    }

    pub fn time_metric_columns(&self, granularity: TimeGranularity) -> Vec<String> {
        self.list_columns(
            Some(Granularity::Time(granularity)),
            Some(PropertyCategory::TimeMetric),
        )
    }

    pub fn entity_metric_columns(&self, granularity: EntityGranularity) -> Vec<String> {
        self.list_columns(
            Some(Granularity::Entity(granularity)),
            Some(PropertyCategory::EntityMetric),
        )
    }

    pub fn entity_attribute_columns(&self, granularity: EntityGranularity) -> Vec<String> {
        self.list_columns(
            Some(Granularity::Entity(granularity)),
            Some(PropertyCategory::EntityAttribute),
        )
    }

    /// Entity granularities present in the filtered map, finest first.
    pub fn filtered_entity_granularities(&self) -> Vec<EntityGranularity> {
        self.filtered_map(None, None)
            .granularities()
            .into_iter()
            .filter_map(|g| match g {
                Granularity::Entity(e) => Some(e),
                Granularity::Time(_) => None,
            })
            .collect()
    }

    /// The requested time granularity (daily unless set) followed by every
    /// entity granularity the channel offers.
    pub fn default_granularities(&self) -> Vec<Granularity> {
        let time = self.options.time_granularity.unwrap_or(TimeGranularity::Daily);
        std::iter::once(Granularity::Time(time))
            .chain(
                self.filtered_entity_granularities()
                    .into_iter()
                    .map(Granularity::Entity),
            )
            .collect()
    }

    /// Native granularity names the channel offers.
    pub fn native_levels(&self) -> IndexMap<Granularity, String> {
        Granularity::ALL
            .iter()
            .filter_map(|&g| self.vocabulary.native_granularity(g).map(|n| (g, n)))
            .collect()
    }

    /// Translate, backfill ancestors and finalize in one call.
    pub fn normalize(&self, source: &ReportTable, granularities: &[Granularity]) -> Result<ReportTable> {
        let mut report = self.translate(source, granularities)?;
        self.fill_ancestor_identifiers(source, &mut report, granularities)?;
        self.finalize(&report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CanonicalVocabulary, MappedVocabulary, NativeFallback};
    use crate::taxonomy::{Column, EntityAttribute, EntityMetric, TimeMetric};

    fn reporter() -> ChannelReporter<MappedVocabulary> {
        let vocabulary = MappedVocabulary::new(NativeFallback::Unsupported)
            .with_granularity(Granularity::Entity(EntityGranularity::Adgroup), Some("ad_set"))
            .with_column(Column::Time(TimeGranularity::Daily, TimeMetric::Time), Some("date_start"))
            .with_column(Column::Attribute(EntityGranularity::Campaign, EntityAttribute::Id), Some("campaign_id"))
            .with_column(Column::Attribute(EntityGranularity::Adgroup, EntityAttribute::Id), Some("adset_id"))
            .with_column(Column::Metric(EntityGranularity::Adgroup, EntityMetric::Spend), Some("spend"))
            .with_column(Column::Metric(EntityGranularity::Adgroup, EntityMetric::Clicks), Some("clicks"));
        ChannelReporter::new(
            vocabulary,
            ["date_start", "campaign_id", "adset_id", "spend", "clicks"],
        )
    }

    #[test]
    fn test_list_columns() {
        let reporter = reporter();
        assert_eq!(
            reporter.list_columns(None, None),
            ["date_start", "adset_id", "spend", "clicks", "campaign_id"]
        );
        assert_eq!(
            reporter.entity_metric_columns(EntityGranularity::Adgroup),
            ["spend", "clicks"]
        );
        assert_eq!(
            reporter.entity_attribute_columns(EntityGranularity::Adgroup),
            ["adset_id"]
        );
        assert_eq!(reporter.time_metric_columns(TimeGranularity::Daily), ["date_start"]);
        assert!(reporter.time_metric_columns(TimeGranularity::Hourly).is_empty());
    }

    #[test]
    fn test_filtered_entity_granularities() {
        assert_eq!(
            reporter().filtered_entity_granularities(),
            [EntityGranularity::Adgroup, EntityGranularity::Campaign]
        );
    }

    #[test]
    fn test_default_granularities_follow_options() {
        let reporter = reporter()
            .with_options(ReportOptions::default().with_time_granularity(TimeGranularity::Hourly));
        assert_eq!(
            reporter.default_granularities(),
            [
                Granularity::Time(TimeGranularity::Hourly),
                Granularity::Entity(EntityGranularity::Adgroup),
                Granularity::Entity(EntityGranularity::Campaign),
            ]
        );
        assert_eq!(
            reporter.options().get(ReportOptions::TIME_GRANULARITY),
            Some(serde_json::json!("hourly"))
        );
    }

    #[test]
    fn test_filters_are_opaque() {
        let mut filters = IndexMap::new();
        filters.insert("account_id".to_string(), serde_json::json!("act_1"));
        let reporter = reporter().with_filters(filters);
        assert_eq!(reporter.filter_value("account_id"), Some(&serde_json::json!("act_1")));
        assert_eq!(reporter.filter_value("missing"), None);
    }

    #[test]
    fn test_native_levels() {
        let reporter = ChannelReporter::new(CanonicalVocabulary, Vec::<String>::new());
        assert_eq!(reporter.native_levels().len(), Granularity::ALL.len());

        let levels = self::reporter().native_levels();
        assert_eq!(levels.get(&Granularity::Entity(EntityGranularity::Adgroup)).map(|s| s.as_str()), Some("ad_set"));
        assert!(levels.get(&Granularity::Entity(EntityGranularity::Ad)).is_none());
    }
}
