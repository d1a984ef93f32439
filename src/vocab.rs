use std::collections::HashSet;

use regex::Regex;

const ROLE_KEYWORDS: &[&str] = &[
    "engineer",
    "developer",
    "manager",
    "analyst",
    "designer",
    "intern",
    "scientist",
    "specialist",
    "consultant",
    "associate",
    "partner",
    "sales",
    "support",
    "marketing",
    "product",
];

// Order matters: longer markers first so "View Job" is not split as "Job".
const SPLIT_MARKERS: &[&str] = &[
    "View Job", "Openings", "Careers", "Position", "Apply", "Role", "Job",
];

const JOB_INDICATORS: &[&str] = &[
    "view job", "apply", "position", "role", "careers", "openings",
];

// Matched against lowercased block text.
const NOISE_PHRASES: &[&str] = &[
    "skip to main content",
    "filter results",
    "select a language",
    "clear filter",
    "go to first page",
    "go to next page",
    "go to previous page",
    "go to last page",
    "cookie settings",
    "accept all cookies",
    "open main menu",
];

const SKILL_HEADERS: &[&str] = &[
    "requirements",
    "qualifications",
    "skills",
    "you should have",
    "what we're looking for",
    "what you'll need",
    "who you are",
];

const SKILL_KEYWORDS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "rust",
    "react",
    "node",
    "aws",
    "gcp",
    "azure",
    "sql",
    "docker",
    "kubernetes",
    "terraform",
    "excel",
    "machine learning",
    "nlp",
    "data",
    "cloud",
    "sales",
    "communication",
    "leadership",
    "design",
];

const STOPWORDS: &[&str] = &[
    "apply", "job", "jobs", "menu", "role", "team", "work", "the", "and", "with",
    "for", "you", "your", "our", "a", "an", "of", "to", "in", "or", "at", "on",
];

// Longer phrases first; the cut regex prefers earlier alternatives.
const CTA_PHRASES: &[&str] = &[
    "view job", "apply now", "apply", "learn more", "see details", "read more",
];

/// Plain-data pattern tables driving segmentation and field extraction.
/// Callers can swap any table without touching control flow.
#[derive(Debug, Clone)]
pub struct VocabularyTables {
    /// Words that mark a line as a plausible role title.
    pub role_keywords: Vec<String>,
    /// Job-boundary markers used to split running text into blocks.
    pub split_markers: Vec<String>,
    /// Substrings (lowercase) that qualify an HTML container as job content.
    pub job_indicators: Vec<String>,
    /// Navigation/filter chrome phrases (lowercase).
    pub noise_phrases: Vec<String>,
    /// Headers that introduce a requirements/skills section.
    pub skill_headers: Vec<String>,
    /// Curated skill terms for title-token and whole-block scans.
    pub skill_keywords: Vec<String>,
    /// Generic words never kept as skills.
    pub stopwords: HashSet<String>,
    /// Call-to-action phrases stripped from the end of titles.
    pub cta_phrases: Vec<String>,
}

impl Default for VocabularyTables {
    fn default() -> Self {
        Self {
            role_keywords: to_vec(ROLE_KEYWORDS),
            split_markers: to_vec(SPLIT_MARKERS),
            job_indicators: to_vec(JOB_INDICATORS),
            noise_phrases: to_vec(NOISE_PHRASES),
            skill_headers: to_vec(SKILL_HEADERS),
            skill_keywords: to_vec(SKILL_KEYWORDS),
            stopwords: STOPWORDS.iter().map(|s| s.to_string()).collect(),
            cta_phrases: to_vec(CTA_PHRASES),
        }
    }
}

fn to_vec(words: &[&str]) -> Vec<String> {
    words.iter().map(|s| s.to_string()).collect()
}

/// Tables plus the regexes compiled from them. Build via [`Vocabulary::new`]
/// so patterns stay in sync with the tables.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    tables: VocabularyTables,
    role_re: Regex,
    marker_re: Regex,
    header_re: Regex,
    cta_re: Regex,
}

impl Vocabulary {
    pub fn new(tables: VocabularyTables) -> Self {
        let role_re = word_bounded(&tables.role_keywords);
        let marker_re = compile(&format!(r"(?i)(?:{})", alternation(&tables.split_markers)));
        let header_re = word_bounded(&tables.skill_headers);
        let cta_re = compile(&format!(
            r"(?i)\b(?:{})\b.*",
            alternation(&tables.cta_phrases)
        ));
        Self {
            tables,
            role_re,
            marker_re,
            header_re,
            cta_re,
        }
    }

    pub fn tables(&self) -> &VocabularyTables {
        &self.tables
    }

    /// Does this line contain a role keyword?
    pub fn role_line_re(&self) -> &Regex {
        &self.role_re
    }

    /// Splits running text at job-boundary markers.
    pub fn marker_split_re(&self) -> &Regex {
        &self.marker_re
    }

    /// Locates a requirements/qualifications/skills-type header.
    pub fn skill_header_re(&self) -> &Regex {
        &self.header_re
    }

    /// Matches a trailing call-to-action phrase and everything after it.
    pub fn cta_cut_re(&self) -> &Regex {
        &self.cta_re
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.tables.stopwords.contains(word)
    }

    pub fn has_job_indicator(&self, lower_text: &str) -> bool {
        self.tables
            .job_indicators
            .iter()
            .any(|m| lower_text.contains(m.as_str()))
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(VocabularyTables::default())
    }
}

fn word_bounded(words: &[String]) -> Regex {
    compile(&format!(r"(?i)\b(?:{})\b", alternation(words)))
}

fn alternation(words: &[String]) -> String {
    if words.is_empty() {
        // Never matches; keeps an emptied table from matching everything.
        return r"[^\s\S]".to_string();
    }
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

fn compile(pattern: &str) -> Regex {
    // Alternations are built from escaped literals, so this cannot fail.
    Regex::new(pattern).unwrap()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_line() {
        let v = Vocabulary::default();
        assert!(v.role_line_re().is_match("Senior Software Engineer"));
        assert!(v.role_line_re().is_match("PRODUCT designer"));
        assert!(!v.role_line_re().is_match("About our company"));
    }

    #[test]
    fn marker_split_prefers_long_markers() {
        let v = Vocabulary::default();
        let parts: Vec<&str> = v.marker_split_re().split("alpha View Job beta").collect();
        assert_eq!(parts, vec!["alpha ", " beta"]);
    }

    #[test]
    fn cta_cut() {
        let v = Vocabulary::default();
        let cut = v.cta_cut_re().replace("Backend Engineer Apply now today", "");
        assert_eq!(cut.trim(), "Backend Engineer");
    }

    #[test]
    fn empty_table_matches_nothing() {
        let mut tables = VocabularyTables::default();
        tables.role_keywords.clear();
        let v = Vocabulary::new(tables);
        assert!(!v.role_line_re().is_match("Senior Software Engineer"));
    }

    #[test]
    fn custom_table() {
        let mut tables = VocabularyTables::default();
        tables.role_keywords.push("wrangler".to_string());
        let v = Vocabulary::new(tables);
        assert!(v.role_line_re().is_match("Data Wrangler"));
    }
}
