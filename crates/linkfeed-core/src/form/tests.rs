use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};

use super::*;
use crate::upload::{
    SubmissionOutcome, UploadError, UploadReply, UploadRequest, Uploader, GENERIC_FAILURE_MESSAGE,
};

#[derive(Debug, Default)]
struct RecordingView {
    values: Vec<(FieldKind, String)>,
    marks: Vec<(FieldKind, Option<String>)>,
    message: Option<(MessageKind, String, Vec<String>)>,
    submit_enabled: Option<bool>,
    loading: bool,
    loading_seen: bool,
}

impl RecordingView {
    fn last_mark(&self, field: FieldKind) -> Option<&Option<String>> {
        self.marks.iter().rev().find(|(f, _)| *f == field).map(|(_, m)| m)
    }
}

impl FormView for RecordingView {
    fn set_field_value(&mut self, field: FieldKind, value: &str) {
        self.values.push((field, value.to_string()));
    }

    fn mark_field(&mut self, field: FieldKind, error: Option<&ValidationError>) {
        self.marks.push((field, error.map(|e| e.to_string())));
    }

    fn show_message(&mut self, kind: MessageKind, text: &str, details: &[String]) {
        self.message = Some((kind, text.to_string(), details.to_vec()));
    }

    fn hide_message(&mut self) {
        self.message = None;
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = Some(enabled);
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.loading_seen |= loading;
    }
}

/// Returns a canned reply (or a connection failure) and records every request.
struct FakeUploader {
    reply: Option<UploadReply>,
    calls: Cell<usize>,
    last: RefCell<Option<UploadRequest>>,
}

impl FakeUploader {
    fn replying(status: u32, body: &str) -> Self {
        Self {
            reply: Some(UploadReply {
                status,
                body: body.as_bytes().to_vec(),
            }),
            calls: Cell::new(0),
            last: RefCell::new(None),
        }
    }

    fn unreachable_host() -> Self {
        Self {
            reply: None,
            calls: Cell::new(0),
            last: RefCell::new(None),
        }
    }
}

impl Uploader for FakeUploader {
    fn upload(&self, request: &UploadRequest) -> Result<UploadReply, UploadError> {
        self.calls.set(self.calls.get() + 1);
        *self.last.borrow_mut() = Some(request.clone());
        // CURLE_COULDNT_CONNECT
        self.reply
            .clone()
            .ok_or_else(|| UploadError::Curl(curl::Error::new(7)))
    }
}

struct PanickingUploader;

impl Uploader for PanickingUploader {
    fn upload(&self, _request: &UploadRequest) -> Result<UploadReply, UploadError> {
        panic!("uploader blew up");
    }
}

const SUCCESS: &str = r#"{"status":"success","message":"Successfully added 2 new links for bot docs!","new_count":2,"skipped_urls":[]}"#;

fn filled_form() -> LinkForm<RecordingView> {
    let mut form = LinkForm::new(RecordingView::default());
    form.select_bot("docs");
    form.input(FieldKind::Pdf, "https://a.com/guide.pdf");
    form.input(FieldKind::Blog, "https://b.com/posts/intro");
    form
}

#[test]
fn input_normalizes_newlines_and_writes_back() {
    let mut form = LinkForm::new(RecordingView::default());
    assert!(form.input(FieldKind::Pdf, "https://a.com/1.pdf\nhttps://a.com/2.pdf"));
    assert_eq!(form.text(FieldKind::Pdf), "https://a.com/1.pdf,https://a.com/2.pdf");
    assert_eq!(
        form.view().values,
        vec![(
            FieldKind::Pdf,
            "https://a.com/1.pdf,https://a.com/2.pdf".to_string()
        )]
    );
    assert_eq!(form.view().submit_enabled, Some(true));
}

#[test]
fn invalid_input_marks_field_and_disables_submit() {
    let mut form = LinkForm::new(RecordingView::default());
    assert!(!form.input(FieldKind::Blog, "https://a.com/file.pdf"));
    assert_eq!(
        form.view().last_mark(FieldKind::Blog),
        Some(&Some("PDF links not allowed here".to_string()))
    );
    assert_eq!(form.view().submit_enabled, Some(false));

    assert!(form.input(FieldKind::Blog, "https://a.com/post"));
    assert_eq!(form.view().last_mark(FieldKind::Blog), Some(&None));
    assert_eq!(form.view().submit_enabled, Some(true));
}

#[test]
fn fixing_one_field_clears_the_cross_field_error_on_the_other() {
    let mut form = LinkForm::new(RecordingView::default());
    form.input(FieldKind::Blog, "https://a.com/x.pdf");
    assert!(!form.input(FieldKind::Pdf, "https://a.com/x.pdf"));
    assert!(matches!(
        form.error(FieldKind::Pdf),
        Some(ValidationError::InOtherField { .. })
    ));

    form.input(FieldKind::Blog, "https://a.com/post");
    assert!(form.error(FieldKind::Pdf).is_none());
    assert!(form.error(FieldKind::Blog).is_none());
    assert_eq!(form.view().submit_enabled, Some(true));
}

#[test]
fn submit_without_bot_is_blocked() {
    let mut form = filled_form();
    form.select_bot("  ");
    let uploader = FakeUploader::replying(200, SUCCESS);

    assert_eq!(form.submit(&uploader), Err(FormError::MissingBot));
    assert_eq!(uploader.calls.get(), 0);
    let (kind, text, _) = form.view().message.clone().unwrap();
    assert_eq!(kind, MessageKind::Error);
    assert_eq!(text, "Please select a bot");
}

#[test]
fn submit_with_both_fields_empty_is_blocked() {
    let mut form = LinkForm::new(RecordingView::default());
    form.select_bot("docs");
    form.input(FieldKind::Pdf, "");
    form.input(FieldKind::Blog, "  ");
    let uploader = FakeUploader::replying(200, SUCCESS);

    assert_eq!(form.submit(&uploader), Err(FormError::NoLinks));
    assert_eq!(uploader.calls.get(), 0);
    assert_eq!(
        form.view().message.as_ref().map(|m| m.1.as_str()),
        Some("Please provide at least one URL")
    );
    assert!(!form.view().loading_seen);
}

#[test]
fn separator_only_field_still_counts_as_filled() {
    let mut form = LinkForm::new(RecordingView::default());
    form.select_bot("docs");
    assert!(form.input(FieldKind::Pdf, ", ,"));
    let uploader = FakeUploader::replying(200, SUCCESS);

    assert!(form.submit(&uploader).unwrap().is_accepted());
    assert_eq!(uploader.calls.get(), 1);
    let sent = uploader.last.borrow().clone().unwrap();
    assert_eq!(sent.pdf_links, ", ,");
    assert_eq!(sent.blog_links, "");
}

#[test]
fn submit_with_invalid_field_stops_silently() {
    let mut form = filled_form();
    form.input(FieldKind::Pdf, "https://a.com/doc");
    let uploader = FakeUploader::replying(200, SUCCESS);

    match form.submit(&uploader) {
        Err(FormError::InvalidFields { pdf, blog }) => {
            assert_eq!(pdf.unwrap().to_string(), "URLs must contain .pdf");
            assert!(blog.is_none());
        }
        other => panic!("expected InvalidFields, got {other:?}"),
    }
    assert_eq!(uploader.calls.get(), 0);
    assert!(form.view().message.is_none());
    assert_eq!(form.view().submit_enabled, Some(false));
}

#[test]
fn accepted_upload_clears_fields_and_shows_success() {
    let mut form = filled_form();
    let uploader = FakeUploader::replying(200, SUCCESS);

    let outcome = form.submit(&uploader).unwrap();
    assert!(outcome.is_accepted());
    assert_eq!(uploader.calls.get(), 1);

    let sent = uploader.last.borrow().clone().unwrap();
    assert_eq!(sent.bot_name, "docs");
    assert_eq!(sent.pdf_links, "https://a.com/guide.pdf");
    assert_eq!(sent.blog_links, "https://b.com/posts/intro");

    assert_eq!(form.text(FieldKind::Pdf), "");
    assert_eq!(form.text(FieldKind::Blog), "");
    let view = form.view();
    assert_eq!(
        view.message,
        Some((
            MessageKind::Success,
            "Successfully added 2 new links for bot docs!".to_string(),
            Vec::new()
        ))
    );
    assert!(view.loading_seen);
    assert!(!view.loading);
    assert_eq!(view.submit_enabled, Some(true));
}

#[test]
fn rejected_upload_keeps_fields_and_shows_server_message() {
    let mut form = filled_form();
    let uploader = FakeUploader::replying(
        200,
        r#"{"status":"error","message":"An error occurred while processing your request."}"#,
    );

    let outcome = form.submit(&uploader).unwrap();
    assert!(matches!(outcome, SubmissionOutcome::Rejected { .. }));
    assert_eq!(uploader.calls.get(), 1);
    assert_eq!(form.text(FieldKind::Pdf), "https://a.com/guide.pdf");
    assert_eq!(form.text(FieldKind::Blog), "https://b.com/posts/intro");
    let (kind, text, _) = form.view().message.clone().unwrap();
    assert_eq!(kind, MessageKind::Error);
    assert_eq!(text, "An error occurred while processing your request.");
    assert_eq!(form.view().submit_enabled, Some(true));
    assert!(!form.view().loading);
}

#[test]
fn transport_failure_shows_generic_message_and_recovers() {
    let mut form = filled_form();
    let uploader = FakeUploader::unreachable_host();

    let outcome = form.submit(&uploader).unwrap();
    assert!(matches!(outcome, SubmissionOutcome::Failed { .. }));
    assert_eq!(
        form.view().message.as_ref().map(|m| m.1.as_str()),
        Some(GENERIC_FAILURE_MESSAGE)
    );
    assert_eq!(form.text(FieldKind::Pdf), "https://a.com/guide.pdf");
    assert_eq!(form.view().submit_enabled, Some(true));
    assert!(!form.view().loading);
}

#[test]
fn busy_state_is_released_when_the_uploader_panics() {
    let mut form = filled_form();
    let result = panic::catch_unwind(AssertUnwindSafe(|| form.submit(&PanickingUploader)));
    assert!(result.is_err());
    assert!(form.view().loading_seen);
    assert!(!form.view().loading);
    assert_eq!(form.view().submit_enabled, Some(true));
}

#[test]
fn when_new_policy_keeps_fields_if_nothing_was_stored() {
    let mut form = filled_form().with_clear_policy(ClearPolicy::WhenNew);
    let uploader = FakeUploader::replying(
        200,
        r#"{"status":"success","message":"Successfully added 0 new links for bot docs!","new_count":0,"skipped_urls":["https://a.com/guide.pdf","https://b.com/posts/intro"]}"#,
    );

    form.submit(&uploader).unwrap();
    assert_eq!(form.text(FieldKind::Pdf), "https://a.com/guide.pdf");
    let (_, _, details) = form.view().message.clone().unwrap();
    assert_eq!(
        details,
        vec![
            "https://a.com/guide.pdf".to_string(),
            "https://b.com/posts/intro".to_string()
        ]
    );
}

#[test]
fn extra_fields_are_sent_after_form_fields() {
    let mut form = filled_form().with_extra_fields(vec![("source".into(), "cli".into())]);
    let uploader = FakeUploader::replying(200, SUCCESS);
    form.submit(&uploader).unwrap();
    let sent = uploader.last.borrow().clone().unwrap();
    assert_eq!(sent.extra_fields, vec![("source".to_string(), "cli".to_string())]);
}

#[test]
fn resubmitting_clears_previous_feedback() {
    let mut form = filled_form();
    let failing = FakeUploader::replying(200, r#"{"status":"error","message":"nope"}"#);
    form.submit(&failing).unwrap();
    assert!(form.view().message.is_some());

    form.select_bot("");
    assert_eq!(form.submit(&failing), Err(FormError::MissingBot));
    assert_eq!(failing.calls.get(), 1);
    assert_eq!(
        form.view().message.as_ref().map(|m| m.1.as_str()),
        Some("Please select a bot")
    );
}
