//! Comment renderer.

use super::{TemplateError, COMMENT_TRAILER, DEFAULT_COMMENT_TEMPLATE};
use crate::snapshot::MergeRequestInfo;
use handlebars::{no_escape, Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde_json::json;

const COMMENT_TEMPLATE_NAME: &str = "comment";

/// Creates a configured Handlebars registry with custom helpers.
///
/// The registry is configured with:
/// - No HTML escaping (Jira markup is plain text)
/// - Strict mode (catches misspelled variables in custom templates)
/// - `eq` helper for equality comparisons
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs.register_helper("eq", Box::new(eq_helper));
    hbs
}

/// Usage: `{{#if (eq state "merged")}}...{{/if}}`
fn eq_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param1 = h.param(0).and_then(|v| v.value().as_str());
    let param2 = h.param(1).and_then(|v| v.value().as_str());

    let result = match (param1, param2) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };

    out.write(if result { "true" } else { "" })?;
    Ok(())
}

/// Renders Jira comment bodies for correlated merge requests.
pub struct CommentRenderer {
    handlebars: Handlebars<'static>,
}

impl CommentRenderer {
    /// Creates a renderer for the built-in template.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in template; the signature matches
    /// [`CommentRenderer::with_template`].
    pub fn new() -> Result<Self, TemplateError> {
        Self::with_template(DEFAULT_COMMENT_TEMPLATE)
    }

    /// Creates a renderer for a custom template, compiling it up front.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::RegistrationError`] if the template does not parse.
    pub fn with_template(template: &str) -> Result<Self, TemplateError> {
        let mut handlebars = create_handlebars_registry();
        handlebars
            .register_template_string(COMMENT_TEMPLATE_NAME, template)
            .map_err(Box::new)?;
        Ok(Self { handlebars })
    }

    /// Renders the comment body for one merge request.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::RenderError`] if a custom template references an
    /// unknown variable.
    pub fn render(&self, info: &MergeRequestInfo) -> Result<String, TemplateError> {
        let data = json!({
            "title": info.title,
            "url": info.url,
            "state": info.state.map_or("", |s| s.as_str()),
            "version": info.tada_version.as_deref().unwrap_or(""),
            "version_url": info.version_url.as_deref().unwrap_or(""),
            "project": info.project,
            "issue": info.issue,
            "trailer": COMMENT_TRAILER,
        });
        Ok(self.handlebars.render(COMMENT_TEMPLATE_NAME, &data)?)
    }
}
