//! Reusable line-level widgets: the dashboard header and status banners.

pub mod banner;
pub mod header;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shorten `text` to at most `max_width` terminal columns, keeping its tail
/// and marking the cut with a leading `…`.
///
/// File paths are the main customer: the file name at the end is the part
/// worth keeping.
pub fn truncate_start(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut tail: Vec<char> = Vec::new();
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        tail.push(c);
    }
    tail.reverse();

    let mut out = String::with_capacity(tail.len() + 3);
    out.push('…');
    out.extend(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_start_short_text_unchanged() {
        assert_eq!(truncate_start("data.csv", 20), "data.csv");
    }

    #[test]
    fn test_truncate_start_keeps_tail() {
        let out = truncate_start("/very/long/path/to/long_data_.csv", 16);
        assert_eq!(out.width(), 16);
        assert!(out.starts_with('…'));
        assert!(out.ends_with("long_data_.csv"));
    }

    #[test]
    fn test_truncate_start_wide_chars() {
        // Each CJK character is two columns wide.
        let out = truncate_start("電力使用量.csv", 7);
        assert!(out.width() <= 7, "got {out:?}");
        assert!(out.ends_with(".csv"));
    }

    #[test]
    fn test_truncate_start_zero_width() {
        assert_eq!(truncate_start("abc", 0), "");
    }
}
