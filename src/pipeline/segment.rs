use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::noise;
use crate::vocab::Vocabulary;

static PARAGRAPH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());
static CONTAINER_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article, li, div, section").unwrap());
static HEADING_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4").unwrap());

/// Fragments shorter than this are never job postings.
const MIN_BLOCK_LEN: usize = 30;
/// Containers with less text than this are skipped during structural scan.
const MIN_CONTAINER_LEN: usize = 20;

/// Candidate job blocks from normalized text.
///
/// Strategies in order, first non-empty result wins: structural markup scan
/// (only with the markup capability), marker split, paragraph split when the
/// markers produce fewer than two fragments. Survivors have passed the noise
/// gate; an empty return means the caller's fallback record fires.
pub fn segment(text: &str, markup: bool, vocab: &Vocabulary) -> Vec<String> {
    let mut blocks = if markup {
        structural_blocks(text, vocab)
    } else {
        Vec::new()
    };
    if blocks.is_empty() {
        blocks = split_blocks(text, vocab);
    }
    blocks.retain(|b| !noise::is_noise(b, vocab));
    blocks
}

/// Scan container-like elements for job-indicator text; fall back to the
/// enclosing container of each heading.
fn structural_blocks(html: &str, vocab: &Vocabulary) -> Vec<String> {
    let doc = Html::parse_document(html);

    let mut candidates = Vec::new();
    for el in doc.select(&CONTAINER_SEL) {
        let txt = element_text(&el);
        if txt.len() < MIN_CONTAINER_LEN {
            continue;
        }
        if vocab.has_job_indicator(&txt.to_lowercase()) {
            candidates.push(txt);
        }
    }

    if candidates.is_empty() {
        for heading in doc.select(&HEADING_SEL) {
            let Some(parent) = heading.parent().and_then(ElementRef::wrap) else {
                continue;
            };
            let txt = element_text(&parent);
            if txt.len() > MIN_BLOCK_LEN {
                candidates.push(txt);
            }
        }
    }

    candidates
}

fn element_text(el: &ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split on job-boundary markers; if that yields fewer than two fragments,
/// split on blank-line runs instead.
fn split_blocks(text: &str, vocab: &Vocabulary) -> Vec<String> {
    let parts: Vec<&str> = vocab.marker_split_re().split(text).collect();
    let parts: Vec<&str> = if parts.len() < 2 {
        PARAGRAPH_RE.split(text).collect()
    } else {
        parts
    };

    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| p.len() >= MIN_BLOCK_LEN)
        .map(String::from)
        .collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::default()
    }

    #[test]
    fn marker_split_two_blocks() {
        let text = "Senior Engineer building distributed systems in Rust Apply \
                    Data Analyst working with dashboards and SQL reporting";
        let blocks = segment(text, false, &vocab());
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("Senior Engineer"));
        assert!(blocks[1].contains("Data Analyst"));
    }

    #[test]
    fn paragraph_split_without_markers() {
        let text = "First opening needs someone great with numbers and people\n\n\
                    Second opening needs someone great with words and pictures";
        let blocks = segment(text, false, &vocab());
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn short_fragments_dropped() {
        let text = "tiny Apply also tiny Apply A longer fragment describing a real \
                    engineering opening in detail";
        let blocks = segment(text, false, &vocab());
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn noise_blocks_dropped() {
        let text = "Filter results and select a language to continue browsing Apply \
                    Backend Engineer building payment infrastructure with Python";
        let blocks = segment(text, false, &vocab());
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("Backend Engineer"));
    }

    #[test]
    fn structural_containers_win() {
        let html = "<html><body>\
            <li>Senior Engineer - distributed systems team. View Job</li>\
            <li>Data Analyst - reporting and dashboards. View Job</li>\
            </body></html>";
        let blocks = segment(html, true, &vocab());
        assert!(blocks.iter().any(|b| b.contains("Senior Engineer")));
        assert!(blocks.iter().any(|b| b.contains("Data Analyst")));
    }

    #[test]
    fn heading_fallback() {
        let html = "<html><body><div>\
            <h2>Platform Engineer</h2>\
            <p>Own our Kubernetes clusters and keep the platform healthy.</p>\
            </div></body></html>";
        let blocks = structural_blocks(html, &vocab());
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("Platform Engineer"));
        assert!(blocks[0].contains("Kubernetes"));
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(segment("", false, &vocab()).is_empty());
        assert!(segment("", true, &vocab()).is_empty());
    }
}
