//! Reasons a submit attempt stops before the network call.

use thiserror::Error;

use crate::links::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please select a bot")]
    MissingBot,
    /// Field errors are already shown next to each field.
    #[error("link fields contain errors")]
    InvalidFields {
        pdf: Option<ValidationError>,
        blog: Option<ValidationError>,
    },
    #[error("Please provide at least one URL")]
    NoLinks,
}
