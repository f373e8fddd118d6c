//! Channel entities and the hooks that push them to channel APIs.
//!
//! An entity is a JSON mapping keyed by [`EntityKey`] names. An
//! [`EntityTranslator`] turns its canonical properties into the channel's
//! native structure and an [`EntityCommitter`] sends the result, reporting
//! what happened as a [`Commitment`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::Result;

/// Well-known keys of an entity mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKey {
    Channel,
    Id,
    Granularity,
    ParentIds,
    State,
    Update,
}

impl EntityKey {
    pub const ALL: [EntityKey; 6] = [
        EntityKey::Channel,
        EntityKey::Id,
        EntityKey::Granularity,
        EntityKey::ParentIds,
        EntityKey::State,
        EntityKey::Update,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKey::Channel => "channel",
            EntityKey::Id => "id",
            EntityKey::Granularity => "granularity",
            EntityKey::ParentIds => "parent_ids",
            EntityKey::State => "state",
            EntityKey::Update => "update",
        }
    }
}

/// Keys of a commitment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitmentKey {
    ApiUrl,
    ApiRequest,
    ApiResponse,
    DryRun,
}

impl CommitmentKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitmentKey::ApiUrl => "api_url",
            CommitmentKey::ApiRequest => "api_request",
            CommitmentKey::ApiResponse => "api_response",
            CommitmentKey::DryRun => "dry_run",
        }
    }
}

/// Record of one commit. Serializes with [`CommitmentKey`] names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_request: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_response: Option<JsonValue>,
    #[serde(default)]
    pub dry_run: bool,
}

/// Translate canonical entity structures into a channel's native form.
pub trait EntityTranslator {
    /// Native name of a property; `None` drops it.
    fn property_to_native(&self, property: &str, _context: Option<&str>) -> Option<String> {
        Some(property.to_string())
    }

    fn value_to_native(
        &self,
        _property: &str,
        value: &JsonValue,
        _native_property: &str,
        _context: Option<&str>,
    ) -> JsonValue {
        value.clone()
    }

    /// Translate every entry of `structure`, then [`prune`] the result.
    fn to_native(&self, structure: &Map<String, JsonValue>, context: Option<&str>) -> JsonValue {
        let native: Map<String, JsonValue> = structure
            .iter()
            .filter_map(|(property, value)| {
                let name = self.property_to_native(property, context)?;
                let value = self.value_to_native(property, value, &name, context);
                Some((name, value))
            })
            .collect();
        prune(JsonValue::Object(native))
    }
}

/// Persistence sink for translated entities.
pub trait EntityCommitter {
    fn commit(&self, entity: &Map<String, JsonValue>, dry_run: bool) -> Result<Commitment>;
}

/// Drop nulls, then mappings and lists left empty, bottom-up.
///
/// ```
/// use channel_report::entity::prune;
/// use serde_json::json;
///
/// let pruned = prune(json!({ "a": null, "b": { "c": [null, {}] }, "d": 0 }));
/// assert_eq!(pruned, json!({ "d": 0 }));
/// ```
pub fn prune(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => JsonValue::Object(
            map.into_iter()
                .map(|(k, v)| (k, prune(v)))
                .filter(|(_, v)| !is_vacant(v))
                .collect(),
        ),
        JsonValue::Array(items) => JsonValue::Array(
            items
                .into_iter()
                .map(prune)
                .filter(|v| !is_vacant(v))
                .collect(),
        ),
        other => other,
    }
}

fn is_vacant(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Object(map) => map.is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        _ => false,
    }
}
