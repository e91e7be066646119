//! Submission gate: checks, one upload, feedback, cleanup.

use std::ops::{Deref, DerefMut};

use crate::links::UrlSet;
use crate::upload::{SubmissionOutcome, UploadRequest, Uploader};

use super::view::{FormView, MessageKind};
use super::{ClearPolicy, FieldKind, FormError, LinkForm};

/// Shown when the server accepts the links without a message of its own.
const ACCEPTED_FALLBACK_MESSAGE: &str = "Links submitted.";

/// Disables submit and shows the loading indicator while alive.
/// Dropping it undoes both, on every exit path including unwinding.
struct BusyGuard<'a, V: FormView> {
    view: &'a mut V,
}

impl<'a, V: FormView> BusyGuard<'a, V> {
    fn engage(view: &'a mut V) -> Self {
        view.set_submit_enabled(false);
        view.set_loading(true);
        Self { view }
    }
}

impl<V: FormView> Deref for BusyGuard<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        self.view
    }
}

impl<V: FormView> DerefMut for BusyGuard<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        self.view
    }
}

impl<V: FormView> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_loading(false);
        self.view.set_submit_enabled(true);
    }
}

impl<V: FormView> LinkForm<V> {
    /// Runs the submission gate and, if every check passes, exactly one
    /// upload through `uploader`.
    ///
    /// Returns `Err` when the attempt stopped before the network call (no
    /// bot, invalid fields, nothing to send). Server rejections and
    /// transport failures are `Ok` outcomes; they were shown to the user
    /// and the form stays editable.
    pub fn submit(&mut self, uploader: &dyn Uploader) -> Result<SubmissionOutcome, FormError> {
        self.clear_feedback();

        if self.bot_name.trim().is_empty() {
            let err = FormError::MissingBot;
            self.view
                .show_message(MessageKind::Error, &err.to_string(), &[]);
            return Err(err);
        }

        let pdf = self.check(FieldKind::Pdf).err();
        let blog = self.check(FieldKind::Blog).err();
        if pdf.is_some() || blog.is_some() {
            self.view.set_submit_enabled(false);
            return Err(FormError::InvalidFields { pdf, blog });
        }

        if self.pdf_links.trim().is_empty() && self.blog_links.trim().is_empty() {
            let err = FormError::NoLinks;
            self.view
                .show_message(MessageKind::Error, &err.to_string(), &[]);
            return Err(err);
        }

        let request = self.request();
        tracing::info!(
            bot = %request.bot_name,
            pdf = UrlSet::from_text(&self.pdf_links).len(),
            blog = UrlSet::from_text(&self.blog_links).len(),
            "submitting links"
        );

        let mut busy = BusyGuard::engage(&mut self.view);
        let outcome = match uploader.upload(&request) {
            Ok(reply) => SubmissionOutcome::from_reply(&reply),
            Err(e) => SubmissionOutcome::from_error(&e),
        };

        match &outcome {
            SubmissionOutcome::Accepted {
                message,
                skipped_urls,
                new_count,
            } => {
                tracing::info!(
                    new = new_count.unwrap_or(0),
                    skipped = skipped_urls.len(),
                    "upload accepted"
                );
                let text = if message.trim().is_empty() {
                    ACCEPTED_FALLBACK_MESSAGE
                } else {
                    message.as_str()
                };
                busy.show_message(MessageKind::Success, text, skipped_urls);
                if self.clear_policy.clears_after(*new_count) {
                    self.pdf_links.clear();
                    self.blog_links.clear();
                    busy.set_field_value(FieldKind::Pdf, "");
                    busy.set_field_value(FieldKind::Blog, "");
                }
            }
            SubmissionOutcome::Rejected {
                http_status,
                message,
            } => {
                tracing::warn!(status = http_status, %message, "upload rejected");
                busy.show_message(MessageKind::Error, message, &[]);
            }
            SubmissionOutcome::Failed { reason } => {
                tracing::error!(%reason, "upload failed");
                busy.show_message(MessageKind::Error, outcome.user_message(), &[]);
            }
        }

        drop(busy);
        Ok(outcome)
    }

    /// The multipart fields for the current form state.
    pub fn request(&self) -> UploadRequest {
        UploadRequest {
            bot_name: self.bot_name.trim().to_string(),
            pdf_links: self.pdf_links.clone(),
            blog_links: self.blog_links.clone(),
            extra_fields: self.extra_fields.clone(),
        }
    }

    fn clear_feedback(&mut self) {
        for field in FieldKind::ALL {
            self.view.mark_field(field, None);
            *self.error_slot(field) = None;
        }
        self.view.hide_message();
    }
}

impl ClearPolicy {
    fn clears_after(self, new_count: Option<u64>) -> bool {
        match self {
            ClearPolicy::Always => true,
            ClearPolicy::WhenNew => new_count.unwrap_or(0) > 0,
        }
    }
}
