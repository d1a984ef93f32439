pub mod fields;
pub mod noise;
pub mod segment;

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::job::{
    JobRecord, EXPERIENCE_UNSPECIFIED, MAX_FALLBACK_CHARS, UNKNOWN_ROLE,
};
use crate::llm::TextCompleter;
use crate::text;
use crate::vocab::Vocabulary;

const EXTRACT_INSTRUCTION: &str = "\
Extract job postings from the text below as a JSON array of objects with keys: \
role, experience, skills (list of strings) and description. Only output JSON.";

/// Cascading extraction pipeline.
///
/// Capabilities are explicit and injected at construction: an optional
/// generative completer tried before everything else, and a markup flag that
/// enables structure-aware segmentation. No ambient state; every call is
/// independent and reentrant.
pub struct Extractor {
    vocab: Vocabulary,
    completer: Option<Box<dyn TextCompleter>>,
    markup: bool,
}

impl Extractor {
    pub fn new(vocab: Vocabulary) -> Self {
        Self {
            vocab,
            completer: None,
            markup: false,
        }
    }

    pub fn with_completer(mut self, completer: Box<dyn TextCompleter>) -> Self {
        self.completer = Some(completer);
        self
    }

    /// Enable the structural segmentation strategy for markup-looking input.
    pub fn with_markup(mut self, markup: bool) -> Self {
        self.markup = markup;
        self
    }

    /// Extract job records from raw career-page text.
    ///
    /// Total: any input, including empty, yields at least one record, and no
    /// two records share a normalized title key.
    pub fn extract_jobs(&self, raw: &str) -> Vec<JobRecord> {
        let cleaned = text::normalize(raw);

        if let Some(completer) = &self.completer {
            match self.delegated_jobs(completer.as_ref(), &cleaned) {
                Ok(jobs) if !jobs.is_empty() => return jobs,
                Ok(_) => debug!("delegated extraction returned no usable records"),
                Err(reason) => debug!(%reason, "delegated extraction failed"),
            }
        }

        let blocks = segment::segment(&cleaned, self.markup, &self.vocab);
        let mut jobs = Vec::new();
        let mut seen = HashSet::new();
        for block in &blocks {
            // Final noise gate before a block becomes a record.
            if noise::is_noise(block, &self.vocab) {
                continue;
            }
            let record = fields::extract_fields(block, &self.vocab);
            if record.role.is_empty() {
                continue;
            }
            if !seen.insert(JobRecord::title_key(&record.role)) {
                continue;
            }
            jobs.push(record);
        }

        if jobs.is_empty() {
            debug!("no blocks survived, emitting fallback record");
            jobs.push(fallback_record(&cleaned));
        }
        jobs
    }

    /// One attempt at generative extraction: ask for a JSON array, slice the
    /// outermost `[...]` span, and normalize each object through the same
    /// cleaning rules as the heuristic path.
    fn delegated_jobs(
        &self,
        completer: &dyn TextCompleter,
        cleaned: &str,
    ) -> Result<Vec<JobRecord>, String> {
        let instruction = format!("{}\n\n{}", EXTRACT_INSTRUCTION, cleaned);
        let response = completer.complete(&instruction).map_err(|e| e.to_string())?;

        let start = response.find('[').ok_or("no JSON array in response")?;
        let end = response.rfind(']').ok_or("no closing bracket in response")?;
        if end < start {
            return Err("mismatched JSON brackets in response".to_string());
        }
        let parsed: Vec<Value> =
            serde_json::from_str(&response[start..=end]).map_err(|e| e.to_string())?;

        let mut jobs = Vec::new();
        let mut seen = HashSet::new();
        for obj in &parsed {
            let role = obj
                .get("role")
                .and_then(Value::as_str)
                .ok_or("record missing role")?;
            let role = text::collapse_ws(role);
            if role.is_empty() || !seen.insert(JobRecord::title_key(&role)) {
                continue;
            }

            let experience = obj
                .get("experience")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(EXPERIENCE_UNSPECIFIED)
                .to_string();
            let skills = fields::clean_skills(coerce_skills(obj.get("skills")), &self.vocab);
            let description = obj
                .get("description")
                .and_then(Value::as_str)
                .map(fields::truncate_description)
                .unwrap_or_default();

            jobs.push(JobRecord {
                role,
                experience,
                skills,
                description,
            });
        }
        Ok(jobs)
    }
}

/// Accept either a JSON list of strings or one comma-separated string.
fn coerce_skills(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(|s| s.trim().to_string())
            .collect(),
        Some(Value::String(joined)) => joined
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn fallback_record(cleaned: &str) -> JobRecord {
    JobRecord {
        role: UNKNOWN_ROLE.to_string(),
        experience: EXPERIENCE_UNSPECIFIED.to_string(),
        skills: Vec::new(),
        description: cleaned.chars().take(MAX_FALLBACK_CHARS).collect(),
    }
}

// ── Tests ──
