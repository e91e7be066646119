//! libcurl multipart POST.

use std::time::Duration;

use super::{UploadError, UploadReply, UploadRequest, Uploader};

/// Posts the form as `multipart/form-data` to a fixed endpoint.
///
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
#[derive(Debug, Clone)]
pub struct CurlUploader {
    endpoint: String,
    connect_timeout: Option<Duration>,
    timeout: Option<Duration>,
}

impl CurlUploader {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            connect_timeout: None,
            timeout: None,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Total transfer limit. `None` waits until the server answers.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Uploader for CurlUploader {
    fn upload(&self, request: &UploadRequest) -> Result<UploadReply, UploadError> {
        let mut form = curl::easy::Form::new();
        // libcurl treats zero-length contents as a C string, so empty fields
        // are left out; the endpoint defaults missing link fields to "".
        for (name, value) in request.fields().into_iter().filter(|(_, v)| !v.is_empty()) {
            form.part(name).contents(value.as_bytes()).add()?;
        }

        let mut easy = curl::easy::Easy::new();
        easy.url(&self.endpoint)?;
        easy.httppost(form)?;
        if let Some(t) = self.connect_timeout {
            easy.connect_timeout(t)?;
        }
        if let Some(t) = self.timeout {
            easy.timeout(t)?;
        }

        let mut headers = curl::easy::List::new();
        headers.append("Accept: application/json")?;
        // No 100-continue round trip.
        headers.append("Expect:")?;
        easy.http_headers(headers)?;

        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        tracing::debug!(endpoint = %self.endpoint, status, bytes = body.len(), "upload reply");
        Ok(UploadReply { status, body })
    }
}
