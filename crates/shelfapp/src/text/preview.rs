//! # Preview Text
//!
//! Cards show a short preview taken from a frontmatter field (a description, a summary).
//! Those fields are free-form: they may hold HTML fragments, blank lines, or whole
//! paragraphs. [`truncate_to_lines`] squeezes them into a fixed number of visual lines.
//!
//! Rules:
//! 1. Angle-bracket tags are removed (`<b>x</b>` → `x`).
//! 2. Blank lines are ignored, remaining lines are trimmed.
//! 3. The first `max_lines` lines are joined with a single space.
//! 4. The result is capped at `max_lines * 80` characters; longer text is cut and gets `...`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Character budget per preview line.
pub const CHARS_PER_LINE: usize = 80;

/// Appended when a preview is cut.
pub const ELLIPSIS: &str = "...";

static MARKUP_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("markup tag pattern is valid"));

/// Formats free-form text into a preview of at most `max_lines` lines.
///
/// Callers only ask for a preview when `max_lines > 0`.
pub fn truncate_to_lines(text: &str, max_lines: usize) -> String {
    let without_tags = MARKUP_TAG.replace_all(text, "");

    let joined = without_tags
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(max_lines)
        .collect::<Vec<_>>()
        .join(" ");

    let limit = max_lines * CHARS_PER_LINE;
    if joined.chars().count() <= limit {
        return joined;
    }

    let mut cut: String = joined.chars().take(limit).collect();
    cut.push_str(ELLIPSIS);
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_empty() {
        assert_eq!(truncate_to_lines("", 2), "");
    }

    #[test]
    fn test_preview_strips_blank_lines() {
        assert_eq!(truncate_to_lines("One\n\n   \nTwo", 2), "One Two");
    }

    #[test]
    fn test_preview_keeps_first_lines_only() {
        assert_eq!(truncate_to_lines("One\nTwo\nThree\nFour", 2), "One Two");
    }

    #[test]
    fn test_preview_strips_markup() {
        assert_eq!(
            truncate_to_lines("<p>Hello <b>world</b></p>\n<br/>\nBye", 3),
            "Hello world Bye"
        );
    }

    #[test]
    fn test_preview_handles_crlf() {
        assert_eq!(truncate_to_lines("One\r\nTwo\r\n", 2), "One Two");
    }

    #[test]
    fn test_preview_cuts_long_text() {
        let long = "x".repeat(200);
        let res = truncate_to_lines(&long, 1);
        assert_eq!(res.len(), CHARS_PER_LINE + ELLIPSIS.len());
        assert!(res.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_preview_exact_limit_is_not_cut() {
        let exact = "y".repeat(160);
        assert_eq!(truncate_to_lines(&exact, 2), exact);
    }

    #[test]
    fn test_preview_cuts_on_char_boundaries() {
        let long = "é".repeat(100);
        let res = truncate_to_lines(&long, 1);
        assert_eq!(res.chars().count(), CHARS_PER_LINE + ELLIPSIS.len());
    }

    #[test]
    fn test_preview_respects_line_and_char_budget() {
        let content = (1..=10)
            .map(|i| format!("line {i} {}", "w".repeat(30)))
            .collect::<Vec<_>>()
            .join("\n");
        for n in 1..=4 {
            let res = truncate_to_lines(&content, n);
            let body = res.strip_suffix(ELLIPSIS).unwrap_or(&res);
            assert!(body.chars().count() <= n * CHARS_PER_LINE);
            assert!(body.matches("line ").count() <= n);
        }
    }
}
