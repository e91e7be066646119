//! URL shape check used by field validation.

use regex::Regex;
use std::sync::OnceLock;

/// `http(s)://`, a host with at least one dot and a 1-6 character final
/// label, then an optional path/query. Only the start is anchored.
/// The word boundary is ASCII-only: a non-ASCII letter ends the label.
const URL_PATTERN: &str =
    r"^https?://[-a-zA-Z0-9@:%._\+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}(?-u:\b)([-a-zA-Z0-9()@:%_\+.~#?&/=]*)";

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(URL_PATTERN).expect("URL pattern is valid"))
}

/// Returns true if `token` looks like an http/https URL.
pub fn is_valid_url(token: &str) -> bool {
    url_regex().is_match(token)
}
