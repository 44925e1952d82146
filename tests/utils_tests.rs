//! Validation and shortcode generation tests

use snaplink::errors::SnaplinkError;
use snaplink::utils::{
    CODE_ALPHABET, DEFAULT_VALIDITY_MINUTES, MAX_VALIDITY_MINUTES, generate_random_code,
    generate_shortcode, validate_shortcode, validate_url, validate_validity,
};

// =============================================================================
// validate_url
// =============================================================================

#[cfg(test)]
mod url_tests {
    use super::*;

    #[test]
    fn test_hosts_with_short_tlds_are_accepted() {
        let hosts = [
            "example.com",
            "a.io",
            "sub.domain.co.uk",
            "my-site.travel",
            "x1.museum",
            "docs.example.org/guide/intro",
            "example.com/path with space",
            "example.com/",
        ];
        for host in hosts {
            let url = validate_url(host).unwrap_or_else(|e| panic!("{}: {}", host, e));
            assert!(url.starts_with("http"), "{} -> {}", host, url);
        }
    }

    #[test]
    fn test_scheme_is_kept_or_defaulted() {
        assert_eq!(validate_url("example.com").unwrap(), "https://example.com");
        assert_eq!(validate_url("http://example.com").unwrap(), "http://example.com");
        assert_eq!(
            validate_url("https://example.com/a/b").unwrap(),
            "https://example.com/a/b"
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(validate_url("  example.com  ").unwrap(), "https://example.com");
    }

    #[test]
    fn test_invalid_urls() {
        for input in ["", "not a url", "localhost", "example", "javascript:alert(1)", "a.b"] {
            assert!(
                matches!(validate_url(input), Err(SnaplinkError::InvalidUrl(_))),
                "{:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_empty_url_message() {
        let err = validate_url("").unwrap_err();
        assert_eq!(err.message(), "URL is required");
    }
}

// =============================================================================
// validate_shortcode
// =============================================================================

#[cfg(test)]
mod shortcode_tests {
    use super::*;

    #[test]
    fn test_empty_is_allowed() {
        assert!(validate_shortcode("").is_ok());
    }

    #[test]
    fn test_length_bounds() {
        for len in 1..3 {
            let code = "a".repeat(len);
            assert!(matches!(
                validate_shortcode(&code),
                Err(SnaplinkError::InvalidShortcode(_))
            ));
        }
        for len in 3..=20 {
            assert!(validate_shortcode(&"a".repeat(len)).is_ok(), "len {}", len);
        }
        for len in [21, 30, 100] {
            assert!(matches!(
                validate_shortcode(&"a".repeat(len)),
                Err(SnaplinkError::InvalidShortcode(_))
            ));
        }
    }

    #[test]
    fn test_whitespace_is_not_trimmed() {
        assert!(validate_shortcode("   ").is_ok());
        // 20 letters plus a trailing space is 21 characters
        let padded = format!("{} ", "a".repeat(20));
        assert!(matches!(
            validate_shortcode(&padded),
            Err(SnaplinkError::InvalidShortcode(_))
        ));
        assert!(matches!(
            validate_shortcode(" abc"),
            Err(SnaplinkError::InvalidShortcode(_))
        ));
        assert!(matches!(
            validate_shortcode("abc\t"),
            Err(SnaplinkError::InvalidShortcode(_))
        ));
    }

    #[test]
    fn test_allowed_characters() {
        assert!(validate_shortcode("my-link_01").is_ok());
        assert!(validate_shortcode("ABC_def-123").is_ok());
        assert!(validate_shortcode("---").is_ok());
    }

    #[test]
    fn test_forbidden_characters() {
        for code in ["has space", "slash/code", "dot.code", "emoji😀", "semi;colon"] {
            let err = validate_shortcode(code).unwrap_err();
            assert!(matches!(err, SnaplinkError::InvalidShortcode(_)), "{}", code);
        }
    }

    #[test]
    fn test_length_checked_before_characters() {
        let err = validate_shortcode("a/").unwrap_err();
        assert_eq!(err.message(), "Shortcode must be 3-20 characters");
    }
}

// =============================================================================
// validate_validity
// =============================================================================

#[cfg(test)]
mod validity_tests {
    use super::*;

    #[test]
    fn test_empty_defaults_to_thirty() {
        assert_eq!(validate_validity("").unwrap(), DEFAULT_VALIDITY_MINUTES);
        assert_eq!(validate_validity("  ").unwrap(), 30);
    }

    #[test]
    fn test_range() {
        assert_eq!(validate_validity("1").unwrap(), 1);
        assert_eq!(validate_validity("10").unwrap(), 10);
        assert_eq!(
            validate_validity(&MAX_VALIDITY_MINUTES.to_string()).unwrap(),
            MAX_VALIDITY_MINUTES
        );
    }

    #[test]
    fn test_rejections() {
        let too_big = validate_validity("43201").unwrap_err();
        assert_eq!(
            too_big.message(),
            "Validity cannot exceed 30 days (43200 minutes)"
        );

        for input in ["0", "-1", "abc", "1.5", "99999999999999999999"] {
            assert!(
                matches!(validate_validity(input), Err(SnaplinkError::InvalidValidity(_))),
                "{:?} should be rejected",
                input
            );
        }
    }
}

// =============================================================================
// generation
// =============================================================================

#[cfg(test)]
mod generation_tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_shortcode_shape() {
        for _ in 0..500 {
            let code = generate_shortcode();
            assert_eq!(code.len(), 8);
            assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
            assert!(validate_shortcode(&code).is_ok());
        }
    }

    #[test]
    fn test_alphabet_has_62_symbols() {
        let unique: HashSet<u8> = CODE_ALPHABET.iter().copied().collect();
        assert_eq!(unique.len(), 62);
        assert!(unique.iter().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_random_code_length() {
        assert_eq!(generate_random_code(0), "");
        assert_eq!(generate_random_code(12).len(), 12);
    }

    #[test]
    fn test_codes_vary() {
        let codes: HashSet<String> = (0..100).map(|_| generate_shortcode()).collect();
        assert!(codes.len() > 95);
    }
}
