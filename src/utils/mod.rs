pub mod time_format;
pub mod validation;

pub use time_format::format_remaining;
pub use validation::{
    DEFAULT_VALIDITY_MINUTES, MAX_VALIDITY_MINUTES, SHORTCODE_LENGTH, validate_shortcode,
    validate_url, validate_validity,
};

use tracing::debug;

/// Alphabet used for generated codes (62 symbols).
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    // 随机选择字母和数字
    iter::repeat_with(|| CODE_ALPHABET[rand::random_range(0..CODE_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// Generate a fresh 8-character shortcode.
///
/// No collision check happens here; callers that persist the code are
/// responsible for uniqueness.
pub fn generate_shortcode() -> String {
    let code = generate_random_code(SHORTCODE_LENGTH);
    debug!(shortcode = %code, "Generated shortcode");
    code
}
