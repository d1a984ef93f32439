use std::sync::LazyLock;

use regex::Regex;

static HORIZONTAL_WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]{2,}").unwrap());
static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Collapse scraped text into canonical form: LF line endings, single spaces,
/// at most one blank line between paragraphs, no surrounding whitespace.
/// Idempotent; empty input yields an empty string.
pub fn normalize(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    let text = HORIZONTAL_WS_RE.replace_all(&text, " ");
    let text = BLANK_RUN_RE.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Collapse all whitespace runs (including newlines) to single spaces.
pub fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-insensitive whole-word containment (best-effort; a needle that fails
/// to compile simply does not match).
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let pattern = format!(r"(?i)\b{}\b", regex::escape(needle));
    Regex::new(&pattern)
        .ok()
        .map(|re| re.is_match(haystack))
        .unwrap_or(false)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\n  "), "");
    }

    #[test]
    fn crlf_folded() {
        assert_eq!(normalize("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn horizontal_runs_collapsed() {
        assert_eq!(normalize("a  \t  b"), "a b");
    }

    #[test]
    fn blank_runs_squeezed() {
        assert_eq!(normalize("a\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "",
            "Senior Engineer\r\n\r\n\r\nApply  now",
            "  spaced\t\tout   text\n\n\n\nwith  runs  ",
        ];
        for raw in inputs {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", raw);
        }
    }

    #[test]
    fn collapse() {
        assert_eq!(collapse_ws(" a \n b\t c "), "a b c");
    }

    #[test]
    fn word_containment() {
        assert!(contains_word("knows Python and SQL", "python"));
        assert!(!contains_word("javascript", "java"));
        assert!(!contains_word("anything", ""));
    }
}
