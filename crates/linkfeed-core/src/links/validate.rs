//! Per-field validation rules.

use thiserror::Error;

use super::normalize::UrlSet;
use super::pattern::is_valid_url;

/// Which kind of link a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Every URL must point at a PDF (`.pdf` anywhere, case-insensitive).
    Pdf,
    /// No URL may mention `.pdf`.
    Blog,
}

impl Category {
    fn admits(self, url: &str) -> bool {
        let mentions_pdf = url.to_ascii_lowercase().contains(".pdf");
        match self {
            Category::Pdf => mentions_pdf,
            Category::Blog => !mentions_pdf,
        }
    }
}

/// Why a field's link list was rejected. The display text is what the user
/// sees next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("URL already exists in other input field")]
    InOtherField { url: String },
    #[error("Invalid URL format")]
    InvalidFormat { url: String },
    #[error("URLs must contain .pdf")]
    NotPdf { url: String },
    #[error("PDF links not allowed here")]
    PdfNotAllowed { url: String },
    #[error("Duplicate URLs not allowed")]
    Duplicate { url: String },
}

impl ValidationError {
    /// The token that tripped the check.
    pub fn url(&self) -> &str {
        match self {
            ValidationError::InOtherField { url }
            | ValidationError::InvalidFormat { url }
            | ValidationError::NotPdf { url }
            | ValidationError::PdfNotAllowed { url }
            | ValidationError::Duplicate { url } => url,
        }
    }
}

/// Validates one field's text against its category and the other field.
///
/// Checks run in order and stop at the first failure: cross-field
/// duplicates, URL format, category, then repeats within the field. An
/// empty field is valid.
pub fn validate(text: &str, other_text: &str, category: Category) -> Result<(), ValidationError> {
    let urls = UrlSet::from_text(text);
    if urls.is_empty() {
        return Ok(());
    }

    let other = UrlSet::from_text(other_text);
    if let Some(url) = urls.iter().find(|u| other.contains(u)) {
        return Err(ValidationError::InOtherField { url: url.to_string() });
    }

    if let Some(url) = urls.iter().find(|u| !is_valid_url(u)) {
        return Err(ValidationError::InvalidFormat { url: url.to_string() });
    }

    if let Some(url) = urls.iter().find(|u| !category.admits(u)) {
        let url = url.to_string();
        return Err(match category {
            Category::Pdf => ValidationError::NotPdf { url },
            Category::Blog => ValidationError::PdfNotAllowed { url },
        });
    }

    if urls.had_duplicates() {
        let url = urls.first_duplicate().unwrap_or_default().to_string();
        return Err(ValidationError::Duplicate { url });
    }

    Ok(())
}
