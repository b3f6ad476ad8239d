//! Release information announced by bots in merge request notes.

use super::{compile_pattern, CorrelationError};
use crate::gitlab::Note;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Release details found in a merge request's notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseInfo {
    /// Announced version, e.g. `1.2.3`.
    pub version: Option<String>,
    /// Link to the release, if the announcement contained one.
    pub url: Option<String>,
    /// Update timestamp of the announcing note.
    pub noted_at: Option<DateTime<Utc>>,
}

impl ReleaseInfo {
    /// Whether a version was found without an accompanying link.
    #[must_use]
    pub fn missing_url(&self) -> bool {
        self.version.is_some() && self.url.is_none()
    }
}

/// Extracts release versions and links from notes written by release bots.
#[derive(Debug, Clone)]
pub struct ReleaseNoteExtractor {
    bots: HashSet<String>,
    version: Regex,
    version_url: Regex,
}

impl ReleaseNoteExtractor {
    /// Compiles the version and link patterns.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationError`] if a pattern does not compile or lacks its
    /// `Version` / `VersionUrl` group.
    pub fn new(
        bot_usernames: &[String],
        version_pattern: &str,
        version_url_pattern: &str,
    ) -> Result<Self, CorrelationError> {
        Ok(Self {
            bots: bot_usernames.iter().cloned().collect(),
            version: compile_pattern("version", version_pattern, &["Version"])?,
            version_url: compile_pattern("version url", version_url_pattern, &["VersionUrl"])?,
        })
    }

    /// Scans `notes` in order; the last bot note announcing a version wins.
    #[must_use]
    pub fn extract(&self, notes: &[Note]) -> ReleaseInfo {
        let mut release = ReleaseInfo::default();

        for note in notes.iter().filter(|n| self.bots.contains(&n.author.username)) {
            let Some(captures) = self.version.captures(&note.body) else {
                continue;
            };
            let Some(version) = captures
                .name("Version")
                .map(|m| m.as_str())
                .filter(|v| !v.is_empty())
            else {
                debug!(note_id = note.id, "Release note matched with an empty version");
                continue;
            };

            let url = self
                .version_url
                .captures(&note.body)
                .and_then(|c| c.name("VersionUrl"))
                .map(|m| m.as_str())
                .filter(|u| !u.is_empty())
                .map(str::to_string);
            if url.is_none() {
                warn!(note_id = note.id, version, "No release URL found in release note");
            }
            debug!(note_id = note.id, version, "Found release note");

            release = ReleaseInfo {
                version: Some(version.to_string()),
                url,
                noted_at: note.updated_at,
            };
        }

        release
    }
}
