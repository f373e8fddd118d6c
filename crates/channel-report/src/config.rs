//! Channel configuration files.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChannelError, Result};
use crate::reporter::{ChannelReporter, ReportOptions};
use crate::schema::{MappedVocabulary, NativeFallback, ValueTransform};
use crate::taxonomy::{Column, Granularity, Property};

/// Configuration of one channel reporter instance.
///
/// ```json
/// {
///   "channel": "search_ads",
///   "fallback": "unsupported",
///   "columns": { "daily.time": "date", "campaign.spend": "cost_micros" },
///   "properties": { "clicks": "clicks" },
///   "transforms": { "campaign.spend": { "kind": "scale", "factor": 0.000001 } },
///   "available_columns": ["date", "cost_micros", "clicks"],
///   "options": { "time_granularity": "daily" }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Channel name, for logs and output.
    #[serde(default)]
    pub channel: String,

    /// Answer for entries without an explicit mapping.
    #[serde(default)]
    pub fallback: NativeFallback,

    /// Granularity name to native level name (null = unsupported).
    #[serde(default)]
    pub granularities: IndexMap<String, Option<String>>,

    /// Dotted canonical column to native column (null = unsupported).
    #[serde(default)]
    pub columns: IndexMap<String, Option<String>>,

    /// Bare property to native column at every granularity.
    #[serde(default)]
    pub properties: IndexMap<String, Option<String>>,

    /// Dotted canonical column to value transform.
    #[serde(default)]
    pub transforms: IndexMap<String, ValueTransform>,

    /// Native columns the channel instance declares.
    #[serde(default)]
    pub available_columns: Vec<String>,

    /// Channel-defined filters, passed through untouched.
    #[serde(default)]
    pub filters: IndexMap<String, serde_json::Value>,

    #[serde(default)]
    pub options: ReportOptions,
}

impl ChannelConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ChannelError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: ChannelConfig = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            ChannelError::Config(format!("Failed to parse '{}': {}", path.display(), e))
        })?;
        Ok(config)
    }

    /// Read a configuration from an already resolved JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Build the lookup tables, rejecting names outside the taxonomy.
    pub fn vocabulary(&self) -> Result<MappedVocabulary> {
        let mut vocabulary = MappedVocabulary::new(self.fallback);
        for (name, native) in &self.granularities {
            let granularity: Granularity = name.parse().map_err(config_error)?;
            vocabulary = vocabulary.with_granularity(granularity, native.as_deref());
        }
        for (name, native) in &self.properties {
            let property: Property = name.parse().map_err(config_error)?;
            vocabulary = vocabulary.with_property(property, native.as_deref());
        }
        for (name, native) in &self.columns {
            let column: Column = name.parse().map_err(config_error)?;
            vocabulary = vocabulary.with_column(column, native.as_deref());
        }
        for (name, transform) in &self.transforms {
            let column: Column = name.parse().map_err(config_error)?;
            vocabulary = vocabulary.with_transform(column, *transform);
        }
        Ok(vocabulary)
    }

    /// Build a reporter. `fallback_columns` are declared when the
    /// configuration lists no available columns of its own.
    pub fn reporter<I, S>(&self, fallback_columns: I) -> Result<ChannelReporter<MappedVocabulary>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let vocabulary = self.vocabulary()?;
        let reporter = if self.available_columns.is_empty() {
            ChannelReporter::new(vocabulary, fallback_columns)
        } else {
            ChannelReporter::new(vocabulary, self.available_columns.iter().cloned())
        };
        Ok(reporter
            .with_filters(self.filters.clone())
            .with_options(self.options.clone()))
    }
}

fn config_error(e: ChannelError) -> ChannelError {
    ChannelError::Config(e.to_string())
}
