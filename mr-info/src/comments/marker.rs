//! Identification of comments previously written for a merge request.
//!
//! Each comment ends with an invisible Jira anchor, `{anchor:mr-info-<token>}`,
//! where the token is derived from the merge request URL. Comments written
//! before anchors existed are recognized by containing both `(<url>)` and the
//! fixed trailer.

use crate::jira::Comment;
use crate::templates::COMMENT_TRAILER;
use sha2::{Digest, Sha256};

const ANCHOR_OPEN: &str = "{anchor:mr-info-";

/// Number of hex digits in a marker token.
const TOKEN_LEN: usize = 16;

/// Machine-readable tag tying a comment to a merge request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommentMarker {
    token: String,
}

impl CommentMarker {
    /// Derives the marker for a merge request URL.
    #[must_use]
    pub fn for_merge_request(url: &str) -> Self {
        let digest = Sha256::digest(url.as_bytes());
        Self {
            token: hex::encode(&digest[..TOKEN_LEN / 2]),
        }
    }

    /// Jira markup embedding the marker.
    #[must_use]
    pub fn render(&self) -> String {
        format!("{ANCHOR_OPEN}{}}}", self.token)
    }

    /// Parses every well-formed marker in `body`.
    pub fn parse_all(body: &str) -> impl Iterator<Item = CommentMarker> + '_ {
        body.match_indices(ANCHOR_OPEN).filter_map(|(start, _)| {
            let rest = &body[start + ANCHOR_OPEN.len()..];
            let (token, _) = rest.split_once('}')?;
            let well_formed = token.len() == TOKEN_LEN
                && token
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
            well_formed.then(|| CommentMarker {
                token: token.to_string(),
            })
        })
    }

    /// Whether `body` carries this marker.
    #[must_use]
    pub fn is_in(&self, body: &str) -> bool {
        Self::parse_all(body).any(|marker| marker == *self)
    }
}

/// Finds the comment previously written for the merge request at `url`.
///
/// Marked comments take precedence over legacy ones.
#[must_use]
pub fn find_existing<'a>(comments: &'a [Comment], url: &str) -> Option<&'a Comment> {
    let marker = CommentMarker::for_merge_request(url);
    comments
        .iter()
        .find(|comment| marker.is_in(&comment.body))
        .or_else(|| comments.iter().find(|c| is_legacy_comment(&c.body, url)))
}

fn is_legacy_comment(body: &str, url: &str) -> bool {
    body.contains(&format!("({url})")) && body.contains(COMMENT_TRAILER)
}
