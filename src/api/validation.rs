/// Field length caps for the hardened forms, counted in characters.
pub const USERNAME_MAX_CHARS: usize = 80;
pub const PASSWORD_MAX_CHARS: usize = 120;
pub const SEARCH_MAX_CHARS: usize = 80;

/// A submitted field passes when it is non-blank (whitespace-only counts as
/// blank) and within its length cap.
#[must_use]
pub fn field_is_valid(value: &str, max_chars: usize) -> bool {
    !value.trim().is_empty() && value.chars().count() <= max_chars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_and_blank() {
        assert!(!field_is_valid("", USERNAME_MAX_CHARS));
        assert!(!field_is_valid("   ", USERNAME_MAX_CHARS));
    }

    #[test]
    fn test_accepts_values_up_to_the_cap() {
        assert!(field_is_valid("admin", USERNAME_MAX_CHARS));
        assert!(field_is_valid(&"a".repeat(80), USERNAME_MAX_CHARS));
        assert!(field_is_valid(&"a".repeat(120), PASSWORD_MAX_CHARS));
    }

    #[test]
    fn test_rejects_values_over_the_cap() {
        assert!(!field_is_valid(&"a".repeat(81), USERNAME_MAX_CHARS));
        assert!(!field_is_valid(&"a".repeat(121), PASSWORD_MAX_CHARS));
        assert!(!field_is_valid(&"a".repeat(81), SEARCH_MAX_CHARS));
    }

    #[test]
    fn test_cap_counts_characters_not_bytes() {
        let eighty_multibyte = "é".repeat(80);
        assert!(eighty_multibyte.len() > 80);
        assert!(field_is_valid(&eighty_multibyte, USERNAME_MAX_CHARS));
    }
}
