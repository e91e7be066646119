//! Gathers field text from inline arguments and files.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::cli::LinkArgs;

impl LinkArgs {
    /// Returns the raw PDF and blog field text. Inline values and file
    /// contents are joined with newlines; the form normalizes them.
    pub fn read(&self) -> Result<(String, String)> {
        let pdf = field_text(&self.pdf, self.pdf_file.as_deref())?;
        let blog = field_text(&self.blog, self.blog_file.as_deref())?;
        Ok((pdf, blog))
    }
}

fn field_text(inline: &[String], file: Option<&Path>) -> Result<String> {
    let mut parts: Vec<String> = inline.to_vec();
    if let Some(path) = file {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading links from {}", path.display()))?;
        parts.push(contents);
    }
    Ok(parts.join("\n"))
}
