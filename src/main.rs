use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use job_outreach::llm::{ChatClient, DEFAULT_API_BASE, DEFAULT_MODEL};
use job_outreach::{Composer, Extractor, Portfolio, Vocabulary};

#[derive(Parser)]
#[command(name = "job_outreach", about = "Extract job postings and draft outreach emails")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract job records from career-page text
    Extract {
        /// Input file (default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Treat input as HTML and try structural segmentation
        #[arg(long)]
        html: bool,
        /// Print records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Extract jobs and render one outreach email per job
    Compose {
        /// Input file (default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Treat input as HTML and try structural segmentation
        #[arg(long)]
        html: bool,
        /// Name used in the closing signature
        #[arg(short, long, default_value = "Your Name")]
        sender: String,
        /// SQLite portfolio table (title, url, skills)
        #[arg(short, long)]
        portfolio: Option<PathBuf>,
        /// Seed for reproducible phrasing
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Query the portfolio table for links matching skill terms
    Links {
        /// Skill terms (none lists everything)
        skills: Vec<String>,
        #[arg(short, long, default_value = "data/portfolio.sqlite")]
        portfolio: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { input, html, json } => {
            let text = read_input(input.as_deref())?;
            let jobs = build_extractor(html).extract_jobs(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&jobs)?);
            } else {
                print_job_table(&jobs);
            }
            Ok(())
        }
        Commands::Compose {
            input,
            html,
            sender,
            portfolio,
            seed,
        } => {
            let text = read_input(input.as_deref())?;
            let jobs = build_extractor(html).extract_jobs(&text);
            let portfolio = match portfolio {
                Some(path) => Portfolio::open(&path),
                None => Portfolio::default(),
            };

            let mut composer = Composer::new(sender);
            if let Some(seed) = seed {
                composer = composer.with_seed(seed);
            }
            if let Some(client) = completer_from_env() {
                composer = composer.with_completer(Box::new(client));
            }

            for (i, job) in jobs.iter().enumerate() {
                let links = portfolio.query_links(&job.skills);
                if i > 0 {
                    println!("\n{}\n", "=".repeat(72));
                }
                println!("[{}] {}\n", i + 1, job.role);
                println!("{}", composer.compose(job, &links));
            }
            Ok(())
        }
        Commands::Links { skills, portfolio } => {
            let table = Portfolio::open(&portfolio);
            let links = table.query_links(&skills);
            if links.is_empty() {
                println!("No matching links ({} rows loaded).", table.len());
                return Ok(());
            }
            for url in links {
                println!("{}", url);
            }
            Ok(())
        }
    }
}

fn read_input(path: Option<&std::path::Path>) -> anyhow::Result<String> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read stdin")?;
            buf
        }
    };
    if text.trim().is_empty() {
        bail!("no input text: pass --input <file> or pipe text on stdin");
    }
    Ok(text)
}

fn build_extractor(html: bool) -> Extractor {
    let mut extractor = Extractor::new(Vocabulary::default()).with_markup(html);
    if let Some(client) = completer_from_env() {
        extractor = extractor.with_completer(Box::new(client));
    }
    extractor
}

/// Optional generative collaborator, selected by OUTREACH_API_KEY (plus
/// OUTREACH_API_BASE / OUTREACH_MODEL overrides). Absence means the heuristic
/// pipeline runs alone.
fn completer_from_env() -> Option<ChatClient> {
    let settings = config::Config::builder()
        .add_source(config::Environment::with_prefix("OUTREACH"))
        .build()
        .ok()?;
    let api_key = settings.get_string("api_key").ok()?;
    let base = settings
        .get_string("api_base")
        .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
    let model = settings
        .get_string("model")
        .unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    ChatClient::new(api_key, model, base).ok()
}

fn print_job_table(jobs: &[job_outreach::JobRecord]) {
    println!(
        "{:>3} | {:<36} | {:<14} | {:<40}",
        "#", "Role", "Experience", "Skills"
    );
    println!("{}", "-".repeat(102));
    for (i, job) in jobs.iter().enumerate() {
        println!(
            "{:>3} | {:<36} | {:<14} | {:<40}",
            i + 1,
            truncate(&job.role, 36),
            truncate(&job.experience, 14),
            truncate(&job.skills.join(", "), 40),
        );
    }
    println!("\n{} job(s) extracted", jobs.len());
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
