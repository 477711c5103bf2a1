// src/domain/slug.rs
//! Slug syntax shared by categories, articles and the URL resolver.

/// Maximum stored slug length.
pub const SLUG_MAX_LENGTH: usize = 50;

/// True when `value` is one or more of `[-a-zA-Z0-9_]`.
pub fn is_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Shorten a generated slug to [`SLUG_MAX_LENGTH`] without leaving a dangling separator.
pub fn truncate_slug(value: &str) -> String {
    let truncated: String = value.chars().take(SLUG_MAX_LENGTH).collect();
    truncated.trim_end_matches(['-', '_']).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_slug_alphabet() {
        assert!(is_slug("test-article"));
        assert!(is_slug("Post_2024"));
        assert!(is_slug("x"));
    }

    #[test]
    fn rejects_empty_and_foreign_characters() {
        assert!(!is_slug(""));
        assert!(!is_slug("with space"));
        assert!(!is_slug("слово"));
        assert!(!is_slug("a/b"));
        assert!(!is_slug("a.b"));
    }

    #[test]
    fn truncate_drops_trailing_separator() {
        let long = format!("{}-tail", "a".repeat(49));
        assert_eq!(truncate_slug(&long), "a".repeat(49));
        assert_eq!(truncate_slug("short-one"), "short-one");
    }
}
