use std::borrow::Cow;

/// Truncate a string to max_len chars, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> Cow<'_, str> {
    if s.chars().count() <= max_len {
        Cow::Borrowed(s)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        Cow::Owned(format!("{}...", truncated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short() {
        let result = truncate("hello", 10);
        assert_eq!(result, "hello");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_truncate_exact_length() {
        let result = truncate("1234567890", 10);
        assert_eq!(result, "1234567890");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_truncate_too_long() {
        let long = "a".repeat(100);
        let result = truncate(&long, 20);
        // 17 chars + "..." = exactly 20
        assert_eq!(result.chars().count(), 20);
        assert!(result.ends_with("..."));
        assert!(matches!(result, Cow::Owned(_)));
    }

    #[test]
    fn test_truncate_unicode() {
        // Chars, not bytes
        let unicode = "日本語テストです長い文字列";
        let result = truncate(unicode, 8);
        assert!(result.chars().count() <= 8);
        assert!(result.ends_with("..."));
    }
}
