use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use super::{FieldParser, Fields};

/// Pick a parser per input from a selector's output.
///
/// The selector runs first; its `field` names the case parser that then
/// parses the same input. Inputs naming no known case parse to nothing.
pub struct SwitchParser {
    selector: Box<dyn FieldParser>,
    field: String,
    cases: IndexMap<String, Box<dyn FieldParser>>,
}

impl SwitchParser {
    pub fn new(
        selector: Box<dyn FieldParser>,
        field: impl Into<String>,
        cases: IndexMap<String, Box<dyn FieldParser>>,
    ) -> Self {
        Self {
            selector,
            field: field.into(),
            cases,
        }
    }
}

impl FieldParser for SwitchParser {
    /// Every label any case can emit.
    fn labels(&self) -> Vec<String> {
        self.cases
            .values()
            .flat_map(|p| p.labels())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    fn parse(&self, input: &str) -> Fields {
        let selected = self.selector.parse(input);
        let Some(case) = selected.get(&self.field) else {
            return Fields::new();
        };
        match self.cases.get(case) {
            Some(parser) => parser.parse(input),
            None => {
                debug!(case = %case, "no parser for identifier case");
                Fields::new()
            }
        }
    }
}
