//! 表单输入验证
//!
//! Validators for the three fields of a submission: the long URL, the
//! optional custom shortcode and the validity in minutes. Failures are
//! returned as values so each can be rendered next to its field.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{Result, SnaplinkError};

/// Validity applied when the field is left empty.
pub const DEFAULT_VALIDITY_MINUTES: u32 = 30;
/// 30 days.
pub const MAX_VALIDITY_MINUTES: u32 = 43_200;
/// Length of generated shortcodes.
pub const SHORTCODE_LENGTH: usize = 8;

const SHORTCODE_MIN_LEN: usize = 3;
const SHORTCODE_MAX_LEN: usize = 20;

// host + optional path, TLD label of 2-6 characters
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?([0-9a-z.-]+)\.([a-z.]{2,6})([/A-Za-z0-9_ .-]*)*/?$")
        .expect("URL pattern must compile")
});

static SHORTCODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("shortcode pattern must compile"));

/// Validate a long URL and normalize it.
///
/// A missing `http://` / `https://` scheme is replaced by `https://`.
pub fn validate_url(input: &str) -> Result<String> {
    let url = input.trim();

    if url.is_empty() {
        return Err(SnaplinkError::invalid_url("URL is required"));
    }

    if !URL_PATTERN.is_match(url) {
        return Err(SnaplinkError::invalid_url("Please enter a valid URL"));
    }

    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.to_string())
    } else {
        Ok(format!("https://{}", url))
    }
}

/// Validate an optional custom shortcode.
///
/// Empty or all-whitespace input means "no custom code". Anything else is
/// checked exactly as given, surrounding whitespace included.
pub fn validate_shortcode(code: &str) -> Result<()> {
    if code.trim().is_empty() {
        return Ok(());
    }

    let len = code.chars().count();
    if !(SHORTCODE_MIN_LEN..=SHORTCODE_MAX_LEN).contains(&len) {
        return Err(SnaplinkError::invalid_shortcode(
            "Shortcode must be 3-20 characters",
        ));
    }

    if !SHORTCODE_PATTERN.is_match(code) {
        return Err(SnaplinkError::invalid_shortcode(
            "Shortcode can only contain letters, numbers, hyphens, and underscores",
        ));
    }

    Ok(())
}

/// Validate the validity field, returning minutes.
pub fn validate_validity(input: &str) -> Result<u32> {
    let raw = input.trim();

    if raw.is_empty() {
        return Ok(DEFAULT_VALIDITY_MINUTES);
    }

    let minutes = match raw.parse::<i64>() {
        Ok(n) if n > 0 => n,
        _ => {
            return Err(SnaplinkError::invalid_validity(
                "Validity must be a positive number",
            ));
        }
    };

    if minutes > MAX_VALIDITY_MINUTES as i64 {
        return Err(SnaplinkError::invalid_validity(
            "Validity cannot exceed 30 days (43200 minutes)",
        ));
    }

    Ok(minutes as u32)
}
