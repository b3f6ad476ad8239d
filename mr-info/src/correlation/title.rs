//! Merge request title correlation.

use super::{compile_pattern, CorrelationError};
use regex::Regex;
use std::collections::HashSet;

/// Issue referenced by a merge request title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReference {
    /// Full issue key, e.g. `ABC-123`.
    pub issue: String,
    /// Jira project key, e.g. `ABC`.
    pub project: String,
}

/// Extracts issue references from titles using a pattern with `Issue` and
/// `Project` groups.
#[derive(Debug, Clone)]
pub struct TitleCorrelator {
    pattern: Regex,
}

impl TitleCorrelator {
    /// Compiles the title pattern.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationError`] if the pattern does not compile or lacks
    /// the `Issue` or `Project` group.
    pub fn new(pattern: &str) -> Result<Self, CorrelationError> {
        Ok(Self {
            pattern: compile_pattern("title", pattern, &["Issue", "Project"])?,
        })
    }

    /// Returns the referenced issue, or `None` if the title does not match.
    #[must_use]
    pub fn correlate(&self, title: &str) -> Option<IssueReference> {
        let captures = self.pattern.captures(title)?;
        Some(IssueReference {
            issue: captures.name("Issue").map_or("", |m| m.as_str()).to_string(),
            project: captures.name("Project").map_or("", |m| m.as_str()).to_string(),
        })
    }
}

/// Jira projects that merge requests may be correlated with.
#[derive(Debug, Clone, Default)]
pub struct TargetProjects {
    keys: HashSet<String>,
}

impl TargetProjects {
    /// Builds the allow-list from project keys.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `project` is targeted. Matching is exact and case-sensitive.
    #[must_use]
    pub fn contains(&self, project: &str) -> bool {
        self.keys.contains(project)
    }
}
