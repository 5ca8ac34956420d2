//! Short code generation and validation utilities.
//!
//! Codes are drawn from the 62-symbol alphanumeric alphabet. Random codes are
//! always [`GENERATED_CODE_LENGTH`] characters; custom codes may be anywhere
//! between [`MIN_CODE_LENGTH`] and [`MAX_CODE_LENGTH`].

use rand::Rng;

/// Alphabet used for generated codes.
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of randomly generated codes.
pub const GENERATED_CODE_LENGTH: usize = 6;

pub const MIN_CODE_LENGTH: usize = 6;
pub const MAX_CODE_LENGTH: usize = 8;

/// Generates a random candidate code.
///
/// Uses the thread-local `rand` generator and picks every character
/// uniformly from [`CHARSET`]. Uniqueness is not checked here; the store
/// rejects duplicates on insert.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(is_valid_code(&code));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..GENERATED_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Checks a code against the format policy.
///
/// # Rules
///
/// - Length: 6-8 characters
/// - Allowed characters: ASCII letters (either case) and digits
///
/// Matching is case-sensitive and nothing else is tolerated: no whitespace,
/// no hyphens, no non-ASCII letters.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_code("abc123"));
/// assert!(is_valid_code("AbCd1234"));
///
/// assert!(!is_valid_code("abc12"));      // Too short
/// assert!(!is_valid_code("my-code"));    // Hyphen
/// assert!(!is_valid_code("abc123 "));    // Whitespace
/// ```
pub fn is_valid_code(code: &str) -> bool {
    (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&code.len())
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code();
        assert_eq!(code.len(), GENERATED_CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_alphanumeric_characters() {
        for _ in 0..200 {
            let code = generate_code();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generated_codes_pass_validation() {
        for _ in 0..200 {
            assert!(is_valid_code(&generate_code()));
        }
    }

    #[test]
    fn test_generate_code_produces_distinct_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code()).collect();

        // 62^6 possibilities; a handful of collisions in 1000 draws would be suspicious.
        assert!(codes.len() >= 995);
    }

    #[test]
    fn test_generate_code_uses_whole_alphabet() {
        let mut seen = HashSet::new();
        for _ in 0..2000 {
            seen.extend(generate_code().chars());
        }

        assert_eq!(seen.len(), CHARSET.len());
    }

    #[test]
    fn test_validate_minimum_length() {
        assert!(is_valid_code("abc123"));
    }

    #[test]
    fn test_validate_maximum_length() {
        assert!(is_valid_code("abcd1234"));
    }

    #[test]
    fn test_validate_mixed_case() {
        assert!(is_valid_code("AbCdEf12"));
    }

    #[test]
    fn test_validate_only_digits() {
        assert!(is_valid_code("123456"));
    }

    #[test]
    fn test_validate_too_short() {
        assert!(!is_valid_code("abc12"));
    }

    #[test]
    fn test_validate_too_long() {
        assert!(!is_valid_code("abcd12345"));
    }

    #[test]
    fn test_validate_hyphen_and_underscore() {
        assert!(!is_valid_code("abc-123"));
        assert!(!is_valid_code("abc_123"));
    }

    #[test]
    fn test_validate_whitespace() {
        assert!(!is_valid_code("abc 123"));
        assert!(!is_valid_code(" abc123"));
        assert!(!is_valid_code("abc123\n"));
    }

    #[test]
    fn test_validate_non_ascii_letters() {
        // Six characters, but 'é' is not in the alphabet.
        assert!(!is_valid_code("abcdé1"));
    }

    #[test]
    fn test_validate_empty_string() {
        assert!(!is_valid_code(""));
    }
}
