//! File-name stems for exported artifacts.
//!
//! Display names go through the `slug` crate: lower-cased, runs of whitespace
//! or punctuation collapsed to one hyphen, non-ASCII letters transliterated.

use slug::slugify;
use thiserror::Error;

/// Stem used when the molecule has no display name or it slugs to nothing.
pub const FALLBACK_FILE_STEM: &str = "molecule";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug source text is empty")]
    EmptyInput,
    #[error("failed to derive slug from `{input}`")]
    Unrepresentable { input: String },
}

/// Derive a slug from a human-readable display name.
pub fn derive_slug(input: &str) -> Result<String, SlugError> {
    if input.trim().is_empty() {
        return Err(SlugError::EmptyInput);
    }

    let candidate = slugify(input);
    if candidate.is_empty() {
        return Err(SlugError::Unrepresentable {
            input: input.to_string(),
        });
    }

    Ok(candidate)
}

/// File name for an export: `<slug(display_name) | molecule>.<extension>`.
pub fn export_file_name(display_name: Option<&str>, extension: &str) -> String {
    let stem = display_name
        .and_then(|name| derive_slug(name).ok())
        .unwrap_or_else(|| FALLBACK_FILE_STEM.to_string());
    format!("{stem}.{extension}")
}
