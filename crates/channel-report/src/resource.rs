//! Shared configuration resources.
//!
//! A configuration value may be a stub pointing at a shared resource:
//!
//! ```json
//! { "url": "s3://configs/search.json?encrypt=team", "encrypt": "s3://keys/team.pem?password=...",
//!   "override": { "channel": "search_eu" } }
//! ```
//!
//! [`ResourceResolver`] validates the stub and loads the shared resource
//! through a caller-supplied [`ResourceLocator`]. The library itself never
//! performs I/O.

use serde_json::Value as JsonValue;
use tracing::debug;
use url::Url;

use crate::error::{ChannelError, Result};

/// Payload returned by a locator.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Bytes(Vec<u8>),
    Json(JsonValue),
}

impl Resource {
    /// Interpret the payload as JSON. Byte payloads are parsed.
    pub fn into_json(self) -> Result<JsonValue> {
        match self {
            Resource::Json(value) => Ok(value),
            Resource::Bytes(bytes) => Ok(serde_json::from_slice(&bytes)?),
        }
    }
}

/// Key material for an encrypted shared resource.
#[derive(Clone, PartialEq, Eq)]
pub struct DecryptionKey {
    /// Name carried by the resource URL's `encrypt` parameter.
    pub name: String,
    pub private_key: Vec<u8>,
    pub password: String,
}

impl std::fmt::Debug for DecryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecryptionKey")
            .field("name", &self.name)
            .field("private_key", &format_args!("<{} bytes>", self.private_key.len()))
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Retrieves resources by URL.
pub trait ResourceLocator {
    fn fetch(&self, url: &Url) -> Result<Resource>;

    /// Fetch and decrypt. Locators without decryption support fail.
    fn fetch_decrypted(&self, url: &Url, _key: &DecryptionKey) -> Result<Resource> {
        Err(ChannelError::Fetch {
            url: url.to_string(),
            message: "decryption is not supported by this locator".to_string(),
        })
    }
}

/// Resolves resource stubs into the shared resources they point at.
#[derive(Debug, Clone)]
pub struct ResourceResolver {
    pub url_key: String,
    pub override_key: String,
    pub encrypt_key: String,
    pub password_parameter: String,
    pub schemes: Vec<String>,
}

impl Default for ResourceResolver {
    fn default() -> Self {
        Self {
            url_key: "url".to_string(),
            override_key: "override".to_string(),
            encrypt_key: "encrypt".to_string(),
            password_parameter: "password".to_string(),
            schemes: vec!["s3".to_string(), "constant".to_string()],
        }
    }
}

impl ResourceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the allowed URL schemes.
    pub fn with_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schemes = schemes.into_iter().map(Into::into).collect();
        self
    }

    /// Resolve `resource`.
    ///
    /// Values without a URL entry are returned unchanged. Otherwise the shared
    /// resource is fetched (decrypted when its URL carries an `encrypt`
    /// parameter) and the stub's override entries are shallow-merged over it.
    pub fn resolve(&self, resource: &JsonValue, locator: &dyn ResourceLocator) -> Result<JsonValue> {
        let Some(raw_url) = resource.get(&self.url_key) else {
            return Ok(resource.clone());
        };
        let url = self.parse_url(raw_url, &self.url_key)?;

        let shared = match query_parameter(&url, "encrypt") {
            Some(name) => {
                let key = self.decryption_key(resource, name, locator)?;
                debug!(url = %url, key = %key.name, "fetching encrypted shared resource");
                locator.fetch_decrypted(&url, &key)?
            }
            None => {
                debug!(url = %url, "fetching shared resource");
                locator.fetch(&url)?
            }
        };
        let mut shared = shared.into_json()?;

        if let Some(overrides) = resource.get(&self.override_key) {
            let JsonValue::Object(overrides) = overrides else {
                return Err(ChannelError::OverrideNotMapping(self.override_key.clone()));
            };
            let JsonValue::Object(target) = &mut shared else {
                return Err(ChannelError::ResourceNotMapping(self.override_key.clone()));
            };
            for (key, value) in overrides {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(shared)
    }

    fn parse_url(&self, raw: &JsonValue, key: &str) -> Result<Url> {
        let raw = raw.as_str().ok_or_else(|| {
            ChannelError::Config(format!("Shared resource property '{}' must be a URL string", key))
        })?;
        let url = Url::parse(raw)?;
        if !self.schemes.iter().any(|s| s == url.scheme()) {
            return Err(ChannelError::UnsupportedScheme(url.scheme().to_string()));
        }
        Ok(url)
    }

    fn decryption_key(
        &self,
        resource: &JsonValue,
        name: String,
        locator: &dyn ResourceLocator,
    ) -> Result<DecryptionKey> {
        let raw_key_url = resource.get(&self.encrypt_key).ok_or_else(|| {
            ChannelError::MissingKeyMaterial(format!(
                "property '{}' is required for encrypted URLs",
                self.encrypt_key
            ))
        })?;
        let key_url = self.parse_url(raw_key_url, &self.encrypt_key)?;

        let Resource::Bytes(private_key) = locator.fetch(&key_url)? else {
            return Err(ChannelError::NonBinaryKey(self.encrypt_key.clone()));
        };
        let password = query_parameter(&key_url, &self.password_parameter).ok_or_else(|| {
            ChannelError::MissingKeyMaterial(format!(
                "key URL has no '{}' parameter",
                self.password_parameter
            ))
        })?;

        Ok(DecryptionKey {
            name,
            private_key,
            password,
        })
    }
}

fn query_parameter(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, v)| k == name && !v.is_empty())
        .map(|(_, v)| v.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockLocator {
        resources: HashMap<String, Resource>,
        keys_seen: RefCell<Vec<DecryptionKey>>,
    }

    impl MockLocator {
        fn with(mut self, url: &str, resource: Resource) -> Self {
            self.resources.insert(url.to_string(), resource);
            self
        }
    }

    impl ResourceLocator for MockLocator {
        fn fetch(&self, url: &Url) -> Result<Resource> {
            self.resources
                .get(url.as_str())
                .cloned()
                .ok_or_else(|| ChannelError::Fetch {
                    url: url.to_string(),
                    message: "not found".to_string(),
                })
        }

        fn fetch_decrypted(&self, url: &Url, key: &DecryptionKey) -> Result<Resource> {
            self.keys_seen.borrow_mut().push(key.clone());
            self.fetch(url)
        }
    }

    #[test]
    fn test_value_without_url_is_unchanged() {
        let resource = json!({ "channel": "search" });
        let resolved = ResourceResolver::new()
            .resolve(&resource, &MockLocator::default())
            .unwrap();
        assert_eq!(resolved, resource);
    }

    #[test]
    fn test_override_is_shallow_merged() {
        let locator = MockLocator::default().with(
            "s3://configs/search.json",
            Resource::Json(json!({ "channel": "search", "options": { "time_granularity": "daily" } })),
        );
        let resource = json!({
            "url": "s3://configs/search.json",
            "override": { "options": { "extra": true } }
        });
        let resolved = ResourceResolver::new().resolve(&resource, &locator).unwrap();
        assert_eq!(
            resolved,
            json!({ "channel": "search", "options": { "extra": true } })
        );
    }

    #[test]
    fn test_unsupported_scheme() {
        let err = ResourceResolver::new()
            .resolve(&json!({ "url": "ftp://host/x.json" }), &MockLocator::default())
            .unwrap_err();
        assert!(matches!(err, ChannelError::UnsupportedScheme(s) if s == "ftp"));
    }

    #[test]
    fn test_encrypted_resource_requires_key_property() {
        let err = ResourceResolver::new()
            .resolve(&json!({ "url": "s3://configs/a.json?encrypt=team" }), &MockLocator::default())
            .unwrap_err();
        assert!(matches!(err, ChannelError::MissingKeyMaterial(_)));
    }

    #[test]
    fn test_encrypted_resource_requires_binary_key() {
        let locator = MockLocator::default().with("s3://keys/team?password=pw", Resource::Json(json!("text")));
        let resource = json!({
            "url": "s3://configs/a.json?encrypt=team",
            "encrypt": "s3://keys/team?password=pw"
        });
        let err = ResourceResolver::new().resolve(&resource, &locator).unwrap_err();
        assert!(matches!(err, ChannelError::NonBinaryKey(_)));
    }

    #[test]
    fn test_encrypted_resource_requires_password() {
        let locator = MockLocator::default().with("s3://keys/team", Resource::Bytes(vec![1, 2, 3]));
        let resource = json!({
            "url": "s3://configs/a.json?encrypt=team",
            "encrypt": "s3://keys/team"
        });
        let err = ResourceResolver::new().resolve(&resource, &locator).unwrap_err();
        assert!(matches!(err, ChannelError::MissingKeyMaterial(_)));
    }

    #[test]
    fn test_encrypted_resource_is_fetched_with_key() {
        let locator = MockLocator::default()
            .with("s3://keys/team?password=pw", Resource::Bytes(vec![7; 4]))
            .with(
                "s3://configs/a.json?encrypt=team",
                Resource::Bytes(br#"{"channel":"social"}"#.to_vec()),
            );
        let resource = json!({
            "url": "s3://configs/a.json?encrypt=team",
            "encrypt": "s3://keys/team?password=pw"
        });
        let resolved = ResourceResolver::new().resolve(&resource, &locator).unwrap();

        assert_eq!(resolved, json!({ "channel": "social" }));
        let keys = locator.keys_seen.borrow();
        assert_eq!(keys[0].name, "team");
        assert_eq!(keys[0].password, "pw");
        assert_eq!(keys[0].private_key, vec![7; 4]);
    }

    #[test]
    fn test_override_requires_mappings() {
        let locator = MockLocator::default().with("constant://list", Resource::Json(json!([1, 2])));
        let resolver = ResourceResolver::new();

        let err = resolver
            .resolve(&json!({ "url": "constant://list", "override": [1] }), &locator)
            .unwrap_err();
        assert!(matches!(err, ChannelError::OverrideNotMapping(_)));

        let err = resolver
            .resolve(&json!({ "url": "constant://list", "override": { "a": 1 } }), &locator)
            .unwrap_err();
        assert!(matches!(err, ChannelError::ResourceNotMapping(_)));
    }
}
