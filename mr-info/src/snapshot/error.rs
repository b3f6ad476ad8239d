//! Snapshot error types.

use thiserror::Error;

/// Errors reading or writing a snapshot file.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Failed to read or write the file.
    #[error("Failed to access snapshot '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize or parse YAML.
    #[error("Invalid snapshot '{path}': {source}")]
    YamlError {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// An entry is filed under a different issue than it references.
    #[error("Snapshot entry for {url} is filed under {key} but references {issue}")]
    InconsistentEntry {
        key: String,
        issue: String,
        url: String,
    },
}
