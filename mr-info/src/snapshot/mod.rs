//! Snapshot persisted between `fetch` and `push`.
//!
//! The snapshot is a YAML mapping from Jira issue key to the list of merge
//! requests referencing it:
//!
//! ```yaml
//! ABC-123:
//!   - project: ABC
//!     issue: ABC-123
//!     title: "fix(ABC-123): correct typo"
//!     state: merged
//!     tada_version: 1.2.3
//!     version_url: https://gitlab.example.com/group/repo/-/releases/v1.2.3
//!     merge_request_update_at: 2024-03-01T10:15:30Z
//!     note_update_at: 2024-03-01T10:20:00Z
//!     url: https://gitlab.example.com/group/repo/-/merge_requests/7
//! ```

mod correlation_map;
mod error;
mod merge_request_info;

pub use correlation_map::CorrelationMap;
pub use error::SnapshotError;
pub use merge_request_info::MergeRequestInfo;

use std::path::Path;
use tracing::info;

/// Writes `map` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`SnapshotError`] if serialization or the write fails.
pub fn write(path: &Path, map: &CorrelationMap) -> Result<(), SnapshotError> {
    let yaml = serde_yaml::to_string(map).map_err(|source| SnapshotError::YamlError {
        path: path.display().to_string(),
        source,
    })?;
    std::fs::write(path, yaml).map_err(|source| SnapshotError::IoError {
        path: path.display().to_string(),
        source,
    })?;

    info!(
        path = %path.display(),
        issues = map.len(),
        merge_requests = map.merge_request_count(),
        "Wrote snapshot"
    );
    Ok(())
}

/// Reads a snapshot written by [`write`].
///
/// # Errors
///
/// Returns [`SnapshotError`] if the file cannot be read or parsed, or if an
/// entry is filed under a different issue than it references.
pub fn read(path: &Path) -> Result<CorrelationMap, SnapshotError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SnapshotError::IoError {
        path: path.display().to_string(),
        source,
    })?;
    let mut map: CorrelationMap =
        serde_yaml::from_str(&contents).map_err(|source| SnapshotError::YamlError {
            path: path.display().to_string(),
            source,
        })?;
    map.reconcile()?;

    info!(
        path = %path.display(),
        issues = map.len(),
        merge_requests = map.merge_request_count(),
        "Read snapshot"
    );
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn omits_absent_fields() {
        let mut map = CorrelationMap::new();
        map.push(MergeRequestInfo {
            project: "ABC".to_string(),
            issue: "ABC-1".to_string(),
            url: "https://g/1".to_string(),
            ..Default::default()
        });

        let yaml = serde_yaml::to_string(&map).unwrap();
        assert!(yaml.contains("project: ABC"));
        assert!(!yaml.contains("tada_version"));
        assert!(!yaml.contains("note_update_at"));
        assert!(!yaml.contains("title"));
    }

    #[test]
    fn empty_document_is_an_empty_map() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("snapshot.yaml");
        write(&path, &CorrelationMap::new()).unwrap();

        assert!(read(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = read(&temp.path().join("missing.yaml"));
        assert!(matches!(result, Err(SnapshotError::IoError { .. })));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("snapshot.yaml");
        std::fs::write(&path, "ABC-1: [not, a, record]").unwrap();

        assert!(matches!(read(&path), Err(SnapshotError::YamlError { .. })));
    }
}
