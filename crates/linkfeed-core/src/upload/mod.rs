//! Delivery of a validated form to the ingestion service.
//!
//! The form only depends on the [`Uploader`] trait; [`CurlUploader`] is the
//! libcurl implementation that posts multipart form data to `/upload`.

mod error;
mod multipart;
mod response;

pub use error::UploadError;
pub use multipart::CurlUploader;
pub use response::{
    SubmissionOutcome, UploadResponse, GENERIC_FAILURE_MESSAGE, UPLOAD_FAILED_MESSAGE,
};

/// Multipart fields of one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadRequest {
    pub bot_name: String,
    /// Normalized (comma-separated) PDF field text.
    pub pdf_links: String,
    /// Normalized (comma-separated) blog field text.
    pub blog_links: String,
    /// Any other fields the surrounding form defines.
    pub extra_fields: Vec<(String, String)>,
}

impl UploadRequest {
    /// All fields as `(name, value)` pairs in submission order.
    pub fn fields(&self) -> Vec<(&str, &str)> {
        let mut fields = vec![
            ("bot_name", self.bot_name.as_str()),
            ("pdf_links", self.pdf_links.as_str()),
            ("blog_links", self.blog_links.as_str()),
        ];
        fields.extend(
            self.extra_fields
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
        fields
    }
}

/// Raw HTTP result of an upload: status code and body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReply {
    pub status: u32,
    pub body: Vec<u8>,
}

impl UploadReply {
    pub fn is_http_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a form submission and returns the raw reply.
///
/// Implementations block until the call settles.
pub trait Uploader {
    fn upload(&self, request: &UploadRequest) -> Result<UploadReply, UploadError>;
}
