//! Shared output formatting helpers for table displays.

/// Print a separator line of the given width.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Truncate a string to `max_len`, appending an ellipsis when shortened.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_string("short", 10), "short");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate_string("a_very_long_tool_name", 10), "a_very_...");
        assert_eq!(truncate_string("a_very_long_tool_name", 10).chars().count(), 10);
    }
}
