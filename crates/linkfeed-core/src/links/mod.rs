//! Link list parsing and validation.
//!
//! A field holds comma/newline-separated URLs. This module normalizes the
//! separators, splits the text into a deduplicated [`UrlSet`], and checks a
//! field against the rules for its [`Category`] (PDF links or blog links).

mod normalize;
mod pattern;
mod validate;

pub use normalize::{normalize, tokenize, UrlSet};
pub use pattern::is_valid_url;
pub use validate::{validate, Category, ValidationError};
