//! Run modes.

use std::fmt;

/// What a run does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Correlate merge requests and write the snapshot.
    Fetch,
    /// Read the snapshot and upsert Jira comments.
    Push,
    /// Correlate and upsert in one pass, without a snapshot.
    Connected,
}

impl Mode {
    /// Whether this mode reads from GitLab.
    #[must_use]
    pub fn fetches(self) -> bool {
        matches!(self, Self::Fetch | Self::Connected)
    }

    /// Whether this mode writes to Jira.
    #[must_use]
    pub fn pushes(self) -> bool {
        matches!(self, Self::Push | Self::Connected)
    }

    /// Whether this mode writes the snapshot file.
    #[must_use]
    pub fn writes_snapshot(self) -> bool {
        self == Self::Fetch
    }

    /// Whether this mode reads the snapshot file.
    #[must_use]
    pub fn reads_snapshot(self) -> bool {
        self == Self::Push
    }

    /// Command-line spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Push => "push",
            Self::Connected => "connected",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_command_line_spelling() {
        assert_eq!(Mode::Fetch.to_string(), "fetch");
        assert_eq!(Mode::Push.to_string(), "push");
        assert_eq!(Mode::Connected.to_string(), "connected");
    }

    #[test]
    fn connected_skips_snapshot() {
        assert!(Mode::Connected.fetches() && Mode::Connected.pushes());
        assert!(!Mode::Connected.writes_snapshot() && !Mode::Connected.reads_snapshot());
        assert!(Mode::Fetch.writes_snapshot() && !Mode::Fetch.pushes());
        assert!(Mode::Push.reads_snapshot() && !Mode::Push.fetches());
    }
}
