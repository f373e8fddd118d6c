use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{FieldParser, Fields};
use crate::error::Result;

/// One regex extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexTarget {
    /// Pattern searched anywhere in the input. Targets without one are skipped.
    #[serde(default)]
    pub pattern: Option<String>,
    /// Template expanded from the captures (`$1`, `${name}`); the whole
    /// match is used when absent.
    #[serde(default)]
    pub replacement: Option<String>,
    /// Output label, defaults to the target's position.
    #[serde(default)]
    pub label: Option<String>,
}

impl RegexTarget {
    pub fn new(pattern: &str, replacement: Option<&str>, label: Option<&str>) -> Self {
        Self {
            pattern: Some(pattern.to_string()),
            replacement: replacement.map(str::to_string),
            label: label.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledTarget {
    regex: Option<Regex>,
    replacement: Option<String>,
    label: String,
}

/// Extract fields with regular expressions.
#[derive(Debug, Clone)]
pub struct RegexParser {
    targets: Vec<CompiledTarget>,
}

impl RegexParser {
    pub fn new(targets: Vec<RegexTarget>) -> Result<Self> {
        let targets = targets
            .into_iter()
            .enumerate()
            .map(|(i, t)| -> Result<CompiledTarget> {
                Ok(CompiledTarget {
                    regex: t.pattern.as_deref().map(Regex::new).transpose()?,
                    replacement: t.replacement,
                    label: t.label.unwrap_or_else(|| i.to_string()),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { targets })
    }
}

impl FieldParser for RegexParser {
    fn labels(&self) -> Vec<String> {
        self.targets.iter().map(|t| t.label.clone()).collect()
    }

    fn parse(&self, input: &str) -> Fields {
        let mut fields = Fields::new();
        for target in &self.targets {
            let Some(regex) = &target.regex else { continue };
            let Some(captures) = regex.captures(input) else {
                continue;
            };
            let value = match &target.replacement {
                Some(template) => {
                    let mut expanded = String::new();
                    captures.expand(template, &mut expanded);
                    expanded
                }
                None => captures[0].to_string(),
            };
            fields.insert(target.label.clone(), value);
        }
        fields
    }
}
