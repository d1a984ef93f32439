use std::sync::LazyLock;

use regex::Regex;

use crate::vocab::Vocabulary;

static PAGINATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bpage\s+\d+").unwrap());
static DIGIT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{2,}").unwrap());

const MIN_WORDS: usize = 4;
const DENSE_NUMERIC_LEN: usize = 200;
const DENSE_NUMERIC_RUNS: usize = 6;

/// Is this block navigation/filter chrome rather than job content?
///
/// Applied twice: when segmentation produces candidate blocks, and again as a
/// final guard before a block becomes a record.
pub fn is_noise(block: &str, vocab: &Vocabulary) -> bool {
    if block.split_whitespace().count() < MIN_WORDS {
        return true;
    }

    let lower = block.to_lowercase();
    if vocab
        .tables()
        .noise_phrases
        .iter()
        .any(|p| lower.contains(p.as_str()))
    {
        return true;
    }

    if PAGINATION_RE.is_match(block) {
        return true;
    }

    // Dense numeric filter widgets: long blocks stuffed with counters.
    block.len() > DENSE_NUMERIC_LEN
        && DIGIT_RUN_RE.find_iter(block).count() > DENSE_NUMERIC_RUNS
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::default()
    }

    #[test]
    fn short_fragment() {
        assert!(is_noise("Apply now", &vocab()));
        assert!(is_noise("", &vocab()));
    }

    #[test]
    fn chrome_phrases() {
        assert!(is_noise("Skip to main content and continue below", &vocab()));
        assert!(is_noise(
            "Filter Results Page 2 of 10 Select a language",
            &vocab()
        ));
    }

    #[test]
    fn pagination() {
        assert!(is_noise("Go directly to results on Page 12 of listings", &vocab()));
    }

    #[test]
    fn dense_numeric_widget() {
        let widget = (0..12)
            .map(|i| format!("Engineering ({}) Sales ({})", 10 + i, 20 + i))
            .collect::<Vec<_>>()
            .join(" ");
        assert!(widget.len() > 200);
        assert!(is_noise(&widget, &vocab()));
    }

    #[test]
    fn real_posting_passes() {
        let block = "Senior Backend Engineer\nWe are hiring a backend engineer \
                     to build our payments platform. Requirements: Python, AWS.";
        assert!(!is_noise(block, &vocab()));
    }
}
