//! Terminal rendering of the upload form.

use std::io::{self, Stderr, Stdout, Write};

use linkfeed_core::form::{FieldKind, FormView, MessageKind};
use linkfeed_core::links::ValidationError;

/// Prints banners as they happen and keeps the latest error per field so a
/// command can report them once at the end.
pub struct TerminalView<O: Write, E: Write> {
    out: O,
    err: E,
    field_errors: [Option<(String, String)>; 2],
}

impl TerminalView<Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

fn slot(field: FieldKind) -> usize {
    match field {
        FieldKind::Pdf => 0,
        FieldKind::Blog => 1,
    }
}

impl<O: Write, E: Write> TerminalView<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self {
            out,
            err,
            field_errors: [None, None],
        }
    }

    /// Writes `<field>: <message> (<url>)` for every field with an error.
    pub fn print_field_errors(&mut self) {
        for field in FieldKind::ALL {
            if let Some((message, url)) = &self.field_errors[slot(field)] {
                let _ = writeln!(self.err, "{}: {} ({})", field, message, url);
            }
        }
    }

    #[cfg(test)]
    fn into_writers(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> FormView for TerminalView<O, E> {
    fn set_field_value(&mut self, field: FieldKind, value: &str) {
        tracing::trace!(field = field.name(), value, "field rewritten");
    }

    fn mark_field(&mut self, field: FieldKind, error: Option<&ValidationError>) {
        self.field_errors[slot(field)] = error.map(|e| (e.to_string(), e.url().to_string()));
    }

    fn show_message(&mut self, kind: MessageKind, text: &str, details: &[String]) {
        match kind {
            MessageKind::Success => {
                let _ = writeln!(self.out, "ok: {}", text);
                for line in details {
                    let _ = writeln!(self.out, "  skipped: {}", line);
                }
            }
            MessageKind::Error => {
                let _ = writeln!(self.err, "error: {}", text);
                for line in details {
                    let _ = writeln!(self.err, "  {}", line);
                }
            }
        }
    }

    fn hide_message(&mut self) {}

    fn set_submit_enabled(&mut self, _enabled: bool) {}

    fn set_loading(&mut self, loading: bool) {
        if loading {
            let _ = writeln!(self.err, "uploading...");
        }
    }
}
