use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static NON_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").unwrap());

/// Sentinel for postings that state no experience level.
pub const EXPERIENCE_UNSPECIFIED: &str = "Not specified";
/// Role used for the guaranteed fallback record.
pub const UNKNOWN_ROLE: &str = "Unknown role";

pub const MAX_SKILLS: usize = 30;
pub const MAX_DESCRIPTION_CHARS: usize = 2000;
/// Description cap for the fallback record (whole normalized input).
pub const MAX_FALLBACK_CHARS: usize = 1500;

/// One extracted job posting. `role` is never empty; `skills` are lower-cased,
/// deduplicated in discovery order, and capped at [`MAX_SKILLS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub role: String,
    pub experience: String,
    pub skills: Vec<String>,
    pub description: String,
}

impl JobRecord {
    /// Dedup key for a role title: non-word runs collapsed to single spaces,
    /// lower-cased.
    pub fn title_key(role: &str) -> String {
        NON_WORD_RE.replace_all(role, " ").trim().to_lowercase()
    }
}

// ── Tests ──
