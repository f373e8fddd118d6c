//! Error types for the channel-report library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for channel report operations.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Malformed resource URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Empty file or no data to read.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A granularity, property or column name outside the taxonomy.
    #[error("Unknown {kind} '{name}'")]
    UnknownName { kind: &'static str, name: String },

    /// Column length does not match the table's row count.
    #[error("Column '{column}' has {found} values, expected {expected}")]
    ShapeMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Two taxonomy entries from categories with no precedence rule were compared.
    #[error("No ordering is defined between '{left}' and '{right}'")]
    UndefinedOrdering { left: String, right: String },

    /// Resource URL scheme is not in the resolver's allow-list.
    #[error("Unsupported shared resource scheme '{0}'")]
    UnsupportedScheme(String),

    /// Encrypted resource without the key material needed to open it.
    #[error("Shared resource missing key material: {0}")]
    MissingKeyMaterial(String),

    /// Key URL returned something other than raw bytes.
    #[error("Shared resource property '{0}' must be a URL retrieving binary private key bytes")]
    NonBinaryKey(String),

    /// Override target is not a mapping.
    #[error("Shared resource override property '{0}' must be a mapping")]
    OverrideNotMapping(String),

    /// Fetched resource is not a mapping but an override was requested.
    #[error("Shared resource must be a mapping to support overrides in property '{0}'")]
    ResourceNotMapping(String),

    /// Resource locator failed to fetch.
    #[error("Failed to fetch '{url}': {message}")]
    Fetch { url: String, message: String },
}

/// Result type alias for channel report operations.
pub type Result<T> = std::result::Result<T, ChannelError>;
