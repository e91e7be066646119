//! Separator normalization and tokenization of link fields.

use std::collections::HashSet;

/// Replaces line breaks with commas so a field always reads as one
/// comma-separated list. `\r\n` counts as a single break.
///
/// Idempotent: normalized text contains no line breaks to replace.
pub fn normalize(text: &str) -> String {
    text.replace("\r\n", ",").replace('\n', ",")
}

/// Splits field text on commas and newlines, trimming each piece and
/// dropping empty ones. Duplicates are kept.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split([',', '\n'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Unique URL tokens of one field, in first-occurrence order.
///
/// Membership is exact string equality; no scheme, host or trailing-slash
/// normalization happens here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSet {
    urls: Vec<String>,
    /// Non-empty tokens seen before deduplication.
    token_count: usize,
    first_duplicate: Option<String>,
}

impl UrlSet {
    pub fn from_text(text: &str) -> Self {
        let tokens = tokenize(text);
        let token_count = tokens.len();
        let mut seen = HashSet::with_capacity(token_count);
        let mut urls = Vec::with_capacity(token_count);
        let mut first_duplicate = None;
        for token in tokens {
            if seen.insert(token) {
                urls.push(token.to_string());
            } else if first_duplicate.is_none() {
                first_duplicate = Some(token.to_string());
            }
        }
        Self {
            urls,
            token_count,
            first_duplicate,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.iter().any(|u| u == url)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    /// True if the field repeated at least one URL.
    pub fn had_duplicates(&self) -> bool {
        self.token_count != self.urls.len()
    }

    /// First URL that appeared more than once in the source text.
    pub fn first_duplicate(&self) -> Option<&str> {
        self.first_duplicate.as_deref()
    }
}
