//! channel-report: normalize advertising-channel reports into one canonical schema.
//!
//! Each channel (search, social, display...) exports reports with its own
//! column names and its own idea of levels such as "ad set" or "line item".
//! This crate maps those reports onto a fixed taxonomy of granularities and
//! properties, so reports from different channels line up column for column.
//!
//! # Pipeline
//!
//! - **Translate**: copy native columns into `<granularity>.<property>` columns
//! - **Backfill**: fill ancestor identifiers (campaign id on ad rows, day on hourly rows)
//! - **Finalize**: order columns, prune empty data, sort rows deterministically
//!
//! # Example
//!
//! ```
//! use channel_report::{ChannelConfig, SourceReader};
//!
//! let config = ChannelConfig::from_value(serde_json::json!({
//!     "fallback": "unsupported",
//!     "columns": { "daily.time": "day", "campaign.id": "campaign_id", "campaign.spend": "cost" }
//! })).unwrap();
//!
//! let csv = "day,campaign_id,cost\n2024-03-02,c1,20\n2024-03-01,c1,10\n";
//! let source = SourceReader::new().read_str(csv).unwrap();
//! let reporter = config.reporter(source.column_names()).unwrap();
//!
//! let report = reporter.normalize(&source, &reporter.default_granularities()).unwrap();
//! assert_eq!(report.column_names().collect::<Vec<_>>(), ["campaign.spend", "campaign.id", "daily.time"]);
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod input;
pub mod parse;
pub mod resource;
pub mod schema;
pub mod taxonomy;
pub mod transform;

mod reporter;

pub use config::ChannelConfig;
pub use error::{ChannelError, Result};
pub use input::{ReportTable, SourceMetadata, SourceReader, Value};
pub use reporter::{ChannelReporter, ReportOptions};
pub use resource::{ResourceLocator, ResourceResolver};
