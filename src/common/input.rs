/// Longest message body the composer accepts, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Turns raw composer text into a sendable message body.
///
/// The store never sees empty or untrimmed content: callers run input through
/// here and drop it on `None`.
pub fn prepare_message(raw: &str) -> Option<String> {
    if raw.chars().count() > MAX_MESSAGE_LENGTH {
        return None;
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

/// True once the draft passes 80% of the limit, when the composer starts
/// warning.
pub fn is_near_limit(raw: &str) -> bool {
    raw.chars().count() * 10 > MAX_MESSAGE_LENGTH * 8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(prepare_message("  hello \n"), Some("hello".to_string()));
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(prepare_message(""), None);
        assert_eq!(prepare_message("   \t\n"), None);
    }

    #[test]
    fn rejects_over_limit_input() {
        let long = "a".repeat(MAX_MESSAGE_LENGTH + 1);
        assert_eq!(prepare_message(&long), None);
        let exact = "a".repeat(MAX_MESSAGE_LENGTH);
        assert!(prepare_message(&exact).is_some());
    }

    #[test]
    fn near_limit_threshold() {
        assert!(!is_near_limit(&"a".repeat(1600)));
        assert!(is_near_limit(&"a".repeat(1601)));
    }
}
