//! Source report reading, cell values and report tables.

mod parser;
mod source;
mod value;

pub use parser::{SourceConfig, SourceReader};
pub use source::{ReportTable, SourceMetadata};
pub use value::{Value, parse_timestamp};
