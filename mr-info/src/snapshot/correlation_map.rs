//! Issue key to merge request mapping.

use super::{MergeRequestInfo, SnapshotError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Merge requests grouped by the Jira issue they reference.
///
/// Within an issue, entries keep discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationMap {
    issues: BTreeMap<String, Vec<MergeRequestInfo>>,
}

impl CorrelationMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `info` under its own issue key.
    pub fn push(&mut self, info: MergeRequestInfo) {
        self.issues.entry(info.issue.clone()).or_default().push(info);
    }

    /// Merge requests recorded for `issue`.
    #[must_use]
    pub fn get(&self, issue: &str) -> Option<&[MergeRequestInfo]> {
        self.issues.get(issue).map(Vec::as_slice)
    }

    /// Iterates issues in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MergeRequestInfo])> {
        self.issues
            .iter()
            .map(|(key, infos)| (key.as_str(), infos.as_slice()))
    }

    /// Number of issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether no issue has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Total number of merge request entries across all issues.
    #[must_use]
    pub fn merge_request_count(&self) -> usize {
        self.issues.values().map(Vec::len).sum()
    }

    /// Re-derives missing issue keys from the map key and rejects entries
    /// filed under a different issue.
    pub(crate) fn reconcile(&mut self) -> Result<(), SnapshotError> {
        for (key, infos) in &mut self.issues {
            for info in infos {
                if info.issue.is_empty() {
                    info.issue.clone_from(key);
                } else if info.issue != *key {
                    return Err(SnapshotError::InconsistentEntry {
                        key: key.clone(),
                        issue: info.issue.clone(),
                        url: info.url.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
