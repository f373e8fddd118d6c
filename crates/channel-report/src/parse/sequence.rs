use serde::{Deserialize, Serialize};

use super::{FieldParser, Fields};

/// One component picked out of a delimited identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceTarget {
    /// Component index; negative values count from the end.
    #[serde(default)]
    pub index: Option<i64>,
    /// Output label, defaults to the index text.
    #[serde(default)]
    pub label: Option<String>,
}

impl SequenceTarget {
    pub fn new(index: i64, label: Option<&str>) -> Self {
        Self {
            index: Some(index),
            label: label.map(str::to_string),
        }
    }

    fn label(&self) -> Option<String> {
        self.label
            .clone()
            .or_else(|| self.index.map(|i| i.to_string()))
    }
}

/// Split on a delimiter and pick components by position.
///
/// Without targets every component is emitted, labelled by its index.
#[derive(Debug, Clone)]
pub struct SequenceParser {
    delimiter: String,
    targets: Option<Vec<SequenceTarget>>,
}

impl SequenceParser {
    pub fn new(delimiter: impl Into<String>, targets: Option<Vec<SequenceTarget>>) -> Self {
        Self {
            delimiter: delimiter.into(),
            targets,
        }
    }
}

impl FieldParser for SequenceParser {
    fn labels(&self) -> Vec<String> {
        self.targets
            .iter()
            .flatten()
            .filter_map(SequenceTarget::label)
            .collect()
    }

    fn parse(&self, input: &str) -> Fields {
        let components: Vec<&str> = input.split(self.delimiter.as_str()).collect();
        let Some(targets) = &self.targets else {
            return components
                .iter()
                .enumerate()
                .map(|(i, c)| (i.to_string(), c.to_string()))
                .collect();
        };

        let count = components.len() as i64;
        let mut fields = Fields::new();
        for target in targets {
            let Some(index) = target.index else { continue };
            if index >= count || index < -count {
                continue;
            }
            let position = if index < 0 { count + index } else { index };
            if let Some(label) = target.label() {
                fields.insert(label, components[position as usize].to_string());
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_targets_emits_every_component() {
        let parser = SequenceParser::new("-", None);
        let fields = parser.parse("a-b-c");
        assert_eq!(
            fields.into_iter().collect::<Vec<_>>(),
            [
                ("0".to_string(), "a".to_string()),
                ("1".to_string(), "b".to_string()),
                ("2".to_string(), "c".to_string()),
            ]
        );
        assert!(parser.labels().is_empty());
    }

    #[test]
    fn test_negative_and_out_of_range_indices() {
        let parser = SequenceParser::new(
            "_",
            Some(vec![
                SequenceTarget::new(-1, Some("last")),
                SequenceTarget::new(-4, Some("too_far_back")),
                SequenceTarget::new(3, Some("too_far")),
                SequenceTarget::new(1, None),
            ]),
        );
        let fields = parser.parse("x_y_z");
        assert_eq!(fields.get("last").map(String::as_str), Some("z"));
        assert_eq!(fields.get("1").map(String::as_str), Some("y"));
        assert_eq!(fields.len(), 2);
        assert_eq!(parser.labels(), ["last", "too_far_back", "too_far", "1"]);
    }

    #[test]
    fn test_target_without_index_is_skipped() {
        let parser = SequenceParser::new(
            "_",
            Some(vec![SequenceTarget {
                index: None,
                label: Some("ignored".to_string()),
            }]),
        );
        assert!(parser.parse("a_b").is_empty());
    }
}
