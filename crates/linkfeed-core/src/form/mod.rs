//! The upload form: two link fields, a bot selection and a submit action.
//!
//! [`LinkForm`] owns the form state and drives a [`FormView`] that it is
//! constructed with. Input events normalize and re-validate a field; submit
//! runs the gate in [`submit`](LinkForm::submit) and performs one upload.

mod error;
mod submit;
mod view;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::links::{normalize, validate, Category, ValidationError};

pub use error::FormError;
pub use view::{FormView, MessageKind};

/// One of the two link fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Pdf,
    Blog,
}

impl FieldKind {
    pub const ALL: [FieldKind; 2] = [FieldKind::Pdf, FieldKind::Blog];

    pub fn category(self) -> Category {
        match self {
            FieldKind::Pdf => Category::Pdf,
            FieldKind::Blog => Category::Blog,
        }
    }

    pub fn other(self) -> FieldKind {
        match self {
            FieldKind::Pdf => FieldKind::Blog,
            FieldKind::Blog => FieldKind::Pdf,
        }
    }

    /// Multipart field name.
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Pdf => "pdf_links",
            FieldKind::Blog => "blog_links",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether an accepted upload empties the link fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClearPolicy {
    /// Clear after every accepted upload.
    #[default]
    Always,
    /// Clear only if the server stored at least one new link; otherwise keep
    /// the text so the user can see what was skipped.
    WhenNew,
}

pub struct LinkForm<V: FormView> {
    view: V,
    bot_name: String,
    pdf_links: String,
    blog_links: String,
    pdf_error: Option<ValidationError>,
    blog_error: Option<ValidationError>,
    extra_fields: Vec<(String, String)>,
    clear_policy: ClearPolicy,
}

impl<V: FormView> LinkForm<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            bot_name: String::new(),
            pdf_links: String::new(),
            blog_links: String::new(),
            pdf_error: None,
            blog_error: None,
            extra_fields: Vec::new(),
            clear_policy: ClearPolicy::default(),
        }
    }

    pub fn with_clear_policy(mut self, policy: ClearPolicy) -> Self {
        self.clear_policy = policy;
        self
    }

    /// Additional fields sent with every upload.
    pub fn with_extra_fields(mut self, fields: Vec<(String, String)>) -> Self {
        self.extra_fields = fields;
        self
    }

    pub fn select_bot(&mut self, name: impl Into<String>) {
        self.bot_name = name.into();
    }

    pub fn text(&self, field: FieldKind) -> &str {
        match field {
            FieldKind::Pdf => &self.pdf_links,
            FieldKind::Blog => &self.blog_links,
        }
    }

    /// The error currently shown on `field`, if any.
    pub fn error(&self, field: FieldKind) -> Option<&ValidationError> {
        match field {
            FieldKind::Pdf => self.pdf_error.as_ref(),
            FieldKind::Blog => self.blog_error.as_ref(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Handles an input event: stores `text` normalized, re-validates the
    /// field and updates the submit control. Returns the field's validity.
    pub fn input(&mut self, field: FieldKind, text: &str) -> bool {
        let normalized = normalize(text);
        if normalized != text {
            self.view.set_field_value(field, &normalized);
        }
        *self.text_mut(field) = normalized;

        let valid = self.check(field).is_ok();

        // The edit may have resolved a clash reported on the other field.
        if matches!(
            self.error(field.other()),
            Some(ValidationError::InOtherField { .. })
        ) {
            let _ = self.check(field.other());
        }

        let enabled = self.pdf_error.is_none() && self.blog_error.is_none();
        self.view.set_submit_enabled(enabled);
        valid
    }

    /// Validates `field` against the other field and shows the result.
    pub fn check(&mut self, field: FieldKind) -> Result<(), ValidationError> {
        let result = validate(
            self.text(field),
            self.text(field.other()),
            field.category(),
        );
        let error = result.as_ref().err().cloned();
        if let Some(e) = &error {
            tracing::debug!(field = field.name(), url = e.url(), "field rejected: {}", e);
        }
        self.view.mark_field(field, error.as_ref());
        *self.error_slot(field) = error;
        result
    }

    fn text_mut(&mut self, field: FieldKind) -> &mut String {
        match field {
            FieldKind::Pdf => &mut self.pdf_links,
            FieldKind::Blog => &mut self.blog_links,
        }
    }

    fn error_slot(&mut self, field: FieldKind) -> &mut Option<ValidationError> {
        match field {
            FieldKind::Pdf => &mut self.pdf_error,
            FieldKind::Blog => &mut self.blog_error,
        }
    }
}

#[cfg(test)]
mod tests;
