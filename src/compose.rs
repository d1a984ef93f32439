use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::job::JobRecord;
use crate::llm::TextCompleter;
use crate::text;

const MAX_MAIL_SKILLS: usize = 3;
const MAX_MAIL_LINKS: usize = 5;

const SUBJECT_TEMPLATES: &[&str] = &[
    "Regarding the {role} opening",
    "Application: {role}",
    "Interest in your {role} role",
];

const OPENING_TEMPLATES: &[&str] = &[
    "I came across the {role} opening on your careers page and wanted to introduce myself.",
    "I noticed you are hiring for a {role} and wanted to reach out directly.",
    "Your {role} posting caught my eye while reading your careers page.",
];

// Fallback topics matched against the description when a job has no skills.
const TOPIC_KEYWORDS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "react",
    "aws",
    "cloud",
    "data",
    "machine learning",
    "sales",
    "marketing",
    "design",
    "security",
];

const MAIL_INSTRUCTION: &str = "\
You are {sender}, writing a short cold outreach email for the job posting below.
Return ready-to-send text with a subject line and body, highlighting the 2-3
most relevant skills and naturally referencing the most relevant work samples.

Job posting (JSON):
{job}

Work samples:
{links}";

/// Renders one outreach email per job record.
///
/// Delegates to the generative collaborator when one is configured, otherwise
/// fills a deterministic template. Phrasing variation comes from a seedable
/// RNG so output is reproducible under test.
pub struct Composer {
    sender_name: String,
    completer: Option<Box<dyn TextCompleter>>,
    rng: StdRng,
}

impl Composer {
    pub fn new(sender_name: impl Into<String>) -> Self {
        Self {
            sender_name: sender_name.into(),
            completer: None,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_completer(mut self, completer: Box<dyn TextCompleter>) -> Self {
        self.completer = Some(completer);
        self
    }

    /// Compose a subject + body email for one job. Total: always returns a
    /// well-formed string, regardless of collaborator availability.
    pub fn compose(&mut self, job: &JobRecord, links: &[String]) -> String {
        if let Some(completer) = &self.completer {
            match delegated_mail(completer.as_ref(), &self.sender_name, job, links) {
                Ok(mail) => return mail,
                Err(reason) => debug!(%reason, "delegated composition failed, using template"),
            }
        }
        self.template_mail(job, links)
    }

    /// Deterministic template: greeting referencing the role, a skill
    /// sentence, up to five itemized links, closing signature.
    fn template_mail(&mut self, job: &JobRecord, links: &[String]) -> String {
        let top_skills: Vec<&str> = job
            .skills
            .iter()
            .take(MAX_MAIL_SKILLS)
            .map(String::as_str)
            .collect();
        let skill_str = if top_skills.is_empty() {
            topic_from_description(&job.description)
                .unwrap_or_else(|| "relevant experience".to_string())
        } else {
            top_skills.join(", ")
        };

        let subject = self.pick(SUBJECT_TEMPLATES).replace("{role}", &job.role);
        let opening = self.pick(OPENING_TEMPLATES).replace("{role}", &job.role);

        let mut body = vec![format!(
            "I have {} and experience that aligns with this role.",
            skill_str
        )];
        if !links.is_empty() {
            body.push("Here are a few relevant work samples:".to_string());
            for url in links.iter().take(MAX_MAIL_LINKS) {
                body.push(format!("- {}", url));
            }
        }
        body.push(String::new());
        body.push("Would love to discuss how I can contribute to your team.".to_string());

        let intro = format!("Subject: {}\n\nHi,\n\n{}", subject, opening);
        let closing = format!("Best regards,\n{}", self.sender_name);
        [intro, body.join("\n"), closing].join("\n\n")
    }

    fn pick(&mut self, templates: &[&str]) -> String {
        templates
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default()
            .to_string()
    }
}

fn delegated_mail(
    completer: &dyn TextCompleter,
    sender: &str,
    job: &JobRecord,
    links: &[String],
) -> Result<String, String> {
    let payload = serde_json::to_string_pretty(job).map_err(|e| e.to_string())?;
    let instruction = MAIL_INSTRUCTION
        .replace("{sender}", sender)
        .replace("{job}", &payload)
        .replace("{links}", &links.join("\n"));
    completer.complete(&instruction).map_err(|e| e.to_string())
}

/// Single topical keyword from the description, used when a job carries no
/// extracted skills.
fn topic_from_description(description: &str) -> Option<String> {
    TOPIC_KEYWORDS
        .iter()
        .find(|kw| text::contains_word(description, kw))
        .map(|kw| kw.to_string())
}

// ── Tests ──
