//! Condition templating.
//!
//! Required subscriptions are declared once, independent of the deployment,
//! with placeholders such as `{{channel_user_id}}` standing in for values that
//! are only known at runtime. [`ConditionParams::format`] substitutes those
//! values into every field of a templated [`Condition`].
//!
//! Rendering uses Handlebars in strict mode with escaping disabled, so a
//! placeholder naming an unknown parameter is an error and substituted values
//! are copied verbatim.

use handlebars::{Handlebars, RenderErrorReason};
use once_cell::sync::Lazy;
use serde::Serialize;

use super::condition::Condition;
use super::errors::TemplateError;

static REGISTRY: Lazy<Handlebars<'static>> = Lazy::new(|| {
    let mut h = Handlebars::new();
    h.set_strict_mode(true);
    h.register_escape_fn(handlebars::no_escape);
    h
});

/// Per-deployment values substituted into condition templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionParams {
    /// Twitch user ID of the monitored channel.
    pub channel_user_id: String,
}

impl ConditionParams {
    pub fn new(channel_user_id: impl Into<String>) -> Self {
        Self {
            channel_user_id: channel_user_id.into(),
        }
    }

    /// Resolves a templated condition into a concrete one.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if a field references an unknown parameter or
    /// is not a well-formed template.
    pub fn format(&self, template: &Condition) -> Result<Condition, TemplateError> {
        template.try_map(|field, value| self.render(field, value))
    }

    fn render(&self, field: &str, template: &str) -> Result<String, TemplateError> {
        REGISTRY
            .render_template(template, self)
            .map_err(|err| match err.reason() {
                RenderErrorReason::MissingVariable(_) => {
                    TemplateError::unknown_field(field, template)
                }
                _ => TemplateError::malformed(field, err.to_string()),
            })
    }
}
