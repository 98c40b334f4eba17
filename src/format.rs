//! Output formatting utilities

/// Format a byte count in human-readable form
pub fn format_size(bytes: u64) -> String {
    human_bytes::human_bytes(bytes as f64)
}

/// Format a count with a unit
pub fn format_count(count: u64, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "block", "blocks"), "1 block");
        assert_eq!(format_count(3, "block", "blocks"), "3 blocks");
    }

    #[test]
    fn test_format_size() {
        assert!(format_size(0).ends_with('B'));
        assert!(format_size(2048).starts_with('2'));
    }
}
