//! Local configuration loading, following `file://` resource stubs.

use std::fs;
use std::path::Path;

use channel_report::resource::Resource;
use channel_report::{ChannelConfig, ChannelError, ResourceLocator, ResourceResolver};
use tracing::debug;
use url::Url;

/// Serves `file://` URLs from the local filesystem.
pub struct FileLocator;

impl ResourceLocator for FileLocator {
    fn fetch(&self, url: &Url) -> channel_report::Result<Resource> {
        let path = url.to_file_path().map_err(|_| ChannelError::Fetch {
            url: url.to_string(),
            message: "URL does not name a local file".to_string(),
        })?;
        let bytes = fs::read(&path).map_err(|e| ChannelError::Io { path, source: e })?;
        Ok(Resource::Bytes(bytes))
    }
}

/// Read a JSON document, resolving it if it is a resource stub.
pub fn load_json(path: &Path) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| format!("Invalid JSON in {}: {}", path.display(), e))?;
    let resolved = ResourceResolver::new()
        .with_schemes(["file"])
        .resolve(&value, &FileLocator)?;
    if resolved != value {
        debug!(path = %path.display(), "resolved resource stub");
    }
    Ok(resolved)
}

pub fn load_config(path: &Path) -> Result<ChannelConfig, Box<dyn std::error::Error>> {
    Ok(ChannelConfig::from_value(load_json(path)?)?)
}
