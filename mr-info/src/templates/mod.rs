//! Jira comment body rendering using Handlebars.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, CommentRenderer};

/// Fixed trailer identifying comments written by this tool.
pub const COMMENT_TRAILER: &str = "Your [mr-info bot](https://github.com/gitu/mr-info) <3";

/// Built-in comment body.
///
/// Variables: `title`, `url`, `state`, `version`, `version_url`, `trailer`.
/// `version` and `version_url` are empty strings when no release is known.
pub const DEFAULT_COMMENT_TEMPLATE: &str = "Gitlab Merge Request: [{{title}}]({{url}}) - {{state}}\n\n{{#if version}}Released in Version: [{{version}}]({{version_url}}){{/if}}\n\n{{trailer}}";
