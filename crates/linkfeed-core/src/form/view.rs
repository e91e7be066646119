//! Display surface driven by [`LinkForm`](super::LinkForm).

use crate::links::ValidationError;

use super::FieldKind;

/// Tone of a banner message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Everything the form shows to the user. The form is the only writer.
pub trait FormView {
    /// The form rewrote a field's text (normalization or clearing).
    fn set_field_value(&mut self, field: FieldKind, value: &str);
    /// Sets or clears a field's error marker and error text.
    fn mark_field(&mut self, field: FieldKind, error: Option<&ValidationError>);
    /// Shows the banner. `details` lists extra lines such as skipped URLs.
    fn show_message(&mut self, kind: MessageKind, text: &str, details: &[String]);
    fn hide_message(&mut self);
    fn set_submit_enabled(&mut self, enabled: bool);
    fn set_loading(&mut self, loading: bool);
}

impl<V: FormView + ?Sized> FormView for &mut V {
    fn set_field_value(&mut self, field: FieldKind, value: &str) {
        (**self).set_field_value(field, value)
    }

    fn mark_field(&mut self, field: FieldKind, error: Option<&ValidationError>) {
        (**self).mark_field(field, error)
    }

    fn show_message(&mut self, kind: MessageKind, text: &str, details: &[String]) {
        (**self).show_message(kind, text, details)
    }

    fn hide_message(&mut self) {
        (**self).hide_message()
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        (**self).set_submit_enabled(enabled)
    }

    fn set_loading(&mut self, loading: bool) {
        (**self).set_loading(loading)
    }
}
