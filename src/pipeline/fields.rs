use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

use crate::job::{JobRecord, EXPERIENCE_UNSPECIFIED, MAX_DESCRIPTION_CHARS, MAX_SKILLS};
use crate::text;
use crate::vocab::Vocabulary;

static EXPERIENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+\+?\s+years|\d+\s+years|mid[\- ]level|senior|junior|entry|intern)")
        .unwrap()
});
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*[-•*]\s*(.+)$").unwrap());
static INLINE_SKILLS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:skills|requirements)\s*:\s*([^\n]+)").unwrap());
static PHRASE_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[;,/]| and | or ").unwrap());
static TRAILING_SEP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-—|·]+\s*$").unwrap());
static TRAILING_PAREN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\([^)]*\)\s*$").unwrap());
// Anything a skill token may not contain (word chars, +, #, ., - survive).
static SKILL_STRIP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w+#.\- ]+").unwrap());

const TITLE_SCAN_LINES: usize = 6;
const MAX_TITLE_LEN: usize = 120;
const HEADER_TAIL_LINES: usize = 3;

/// Derive role, experience, skills, and description from one candidate block.
/// Never fails; every missing field degrades to its sentinel or empty value.
pub fn extract_fields(block: &str, vocab: &Vocabulary) -> JobRecord {
    let lines: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let (raw_title, title_idx) = pick_title(&lines, vocab);
    let role = clean_role(raw_title, vocab);

    let experience = EXPERIENCE_RE
        .find(block)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| EXPERIENCE_UNSPECIFIED.to_string());

    let skills = extract_skills(block, &role, vocab);

    // Title line drops out of the description only when it led the block.
    let desc_lines = if title_idx == Some(0) { &lines[1..] } else { &lines[..] };
    let description = truncate_description(&desc_lines.join(" "));

    JobRecord {
        role,
        experience,
        skills,
        description,
    }
}

/// First of the leading lines that looks like a role title; else the first
/// non-empty line.
fn pick_title<'a>(lines: &[&'a str], vocab: &Vocabulary) -> (&'a str, Option<usize>) {
    for (i, line) in lines.iter().take(TITLE_SCAN_LINES).enumerate() {
        if vocab.role_line_re().is_match(line) && line.len() > 3 && line.len() < MAX_TITLE_LEN {
            return (line, Some(i));
        }
    }
    match lines.first() {
        Some(first) => (first, Some(0)),
        None => ("", None),
    }
}

fn clean_role(raw: &str, vocab: &Vocabulary) -> String {
    let s = text::collapse_ws(raw);
    let s = vocab.cta_cut_re().replace(&s, "");
    let s = TRAILING_SEP_RE.replace(s.trim(), "");
    let s = TRAILING_PAREN_RE.replace(s.trim(), "");
    s.trim().to_string()
}

/// Layered skill extraction; the first layer that yields candidates wins.
fn extract_skills(block: &str, title: &str, vocab: &Vocabulary) -> Vec<String> {
    let mut candidates = header_skills(block, vocab);
    if candidates.is_empty() {
        candidates = inline_skills(block);
    }
    if candidates.is_empty() {
        candidates = title_skills(title, vocab);
    }
    if candidates.is_empty() {
        candidates = keyword_scan(block, vocab);
    }
    clean_skills(candidates, vocab)
}

/// Bullets (or leading comma-separated phrases) following a
/// requirements/qualifications/skills-type header.
fn header_skills(block: &str, vocab: &Vocabulary) -> Vec<String> {
    let Some(m) = vocab.skill_header_re().find(block) else {
        return Vec::new();
    };
    let tail = &block[m.end()..];

    let bullets: Vec<String> = BULLET_RE
        .captures_iter(tail)
        .map(|c| c[1].trim().to_string())
        .filter(|b| b.len() > 1)
        .collect();
    if !bullets.is_empty() {
        return bullets;
    }

    let candidate = tail
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(HEADER_TAIL_LINES)
        .join(" ");
    PHRASE_SPLIT_RE
        .split(&candidate)
        .map(str::trim)
        .filter(|p| p.len() > 1)
        .map(String::from)
        .collect()
}

/// Inline "skills: a, b, c" label anywhere in the block.
fn inline_skills(block: &str) -> Vec<String> {
    let Some(caps) = INLINE_SKILLS_RE.captures(block) else {
        return Vec::new();
    };
    caps[1]
        .split(|c| c == ',' || c == '/')
        .map(str::trim)
        .filter(|p| p.len() > 1)
        .map(String::from)
        .collect()
}

/// Title tokens that appear in the curated skill vocabulary.
fn title_skills(title: &str, vocab: &Vocabulary) -> Vec<String> {
    title
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|t| vocab.tables().skill_keywords.iter().any(|k| k == t))
        .collect()
}

/// Whole-block scan for known skill terms, in vocabulary order.
fn keyword_scan(block: &str, vocab: &Vocabulary) -> Vec<String> {
    vocab
        .tables()
        .skill_keywords
        .iter()
        .filter(|kw| text::contains_word(block, kw))
        .cloned()
        .collect()
}

/// Lower-case, strip punctuation outside `{+ # . -}`, drop short tokens and
/// stopwords, dedup preserving first-seen order, cap at [`MAX_SKILLS`].
pub(crate) fn clean_skills(candidates: Vec<String>, vocab: &Vocabulary) -> Vec<String> {
    candidates
        .iter()
        .map(|raw| {
            let lowered = raw.to_lowercase();
            let stripped = SKILL_STRIP_RE.replace_all(&lowered, " ");
            text::collapse_ws(&stripped)
        })
        .filter(|s| s.len() >= 2 && !vocab.is_stopword(s))
        .unique()
        .take(MAX_SKILLS)
        .collect()
}

/// Whitespace-collapsed description, truncated with an ellipsis marker.
pub(crate) fn truncate_description(raw: &str) -> String {
    let desc = text::collapse_ws(raw);
    if desc.chars().count() <= MAX_DESCRIPTION_CHARS {
        desc
    } else {
        let truncated: String = desc.chars().take(MAX_DESCRIPTION_CHARS).collect();
        format!("{}...", truncated)
    }
}

// ── Tests ──
