//! Identifier-string parsers.
//!
//! Channels often pack several fields into one native identifier, such as a
//! campaign name like `brand_us_search_2024`. A [`FieldParser`] splits such a
//! string into labelled fields. Parsers are built from a serde-tagged
//! [`ParserConfig`]:
//!
//! ```
//! use channel_report::parse::{FieldParser, ParserConfig};
//!
//! let config: ParserConfig = serde_json::from_value(serde_json::json!({
//!     "kind": "sequence",
//!     "delimiter": "_",
//!     "targets": [{ "index": 0, "label": "brand" }, { "index": -1, "label": "year" }]
//! })).unwrap();
//! let parser = config.build().unwrap();
//!
//! let fields = parser.parse("acme_us_search_2024");
//! assert_eq!(fields["brand"], "acme");
//! assert_eq!(fields["year"], "2024");
//! ```

mod pattern;
mod sequence;
mod switch;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use pattern::{RegexParser, RegexTarget};
pub use sequence::{SequenceParser, SequenceTarget};
pub use switch::SwitchParser;

/// Parsed fields, in target order.
pub type Fields = IndexMap<String, String>;

/// Splits an identifier string into labelled fields.
pub trait FieldParser: Send + Sync {
    /// Labels this parser can emit.
    fn labels(&self) -> Vec<String>;

    /// Parse `input`. Fields that cannot be extracted are left out.
    fn parse(&self, input: &str) -> Fields;
}

/// Serializable parser description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParserConfig {
    Sequence {
        delimiter: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        targets: Option<Vec<SequenceTarget>>,
    },
    Regex {
        #[serde(default)]
        targets: Vec<RegexTarget>,
    },
    Switch {
        /// Parser whose output names the case to run.
        selector: Box<ParserConfig>,
        /// Field of the selector output holding the case name.
        field: String,
        cases: IndexMap<String, ParserConfig>,
    },
}

impl ParserConfig {
    /// Build the parser, compiling any patterns.
    pub fn build(&self) -> Result<Box<dyn FieldParser>> {
        let parser: Box<dyn FieldParser> = match self {
            ParserConfig::Sequence { delimiter, targets } => {
                Box::new(SequenceParser::new(delimiter.clone(), targets.clone()))
            }
            ParserConfig::Regex { targets } => Box::new(RegexParser::new(targets.clone())?),
            ParserConfig::Switch {
                selector,
                field,
                cases,
            } => {
                let mut built = IndexMap::with_capacity(cases.len());
                for (name, case) in cases {
                    built.insert(name.clone(), case.build()?);
                }
                Box::new(SwitchParser::new(selector.build()?, field.clone(), built))
            }
        };
        Ok(parser)
    }
}
