use std::collections::HashSet;

use job_outreach::job::{EXPERIENCE_UNSPECIFIED, UNKNOWN_ROLE};
use job_outreach::portfolio::PortfolioRow;
use job_outreach::text::normalize;
use job_outreach::{Composer, Extractor, JobRecord, Portfolio, Vocabulary};

fn extractor() -> Extractor {
    Extractor::new(Vocabulary::default())
}

const CAREERS_PAGE: &str = "\
Skip to main content

Open roles

Senior Backend Engineer - Payments
We need 5+ years building distributed systems.
Requirements:
- Python
- AWS
- Docker
View Job

Data Analyst
Junior analysts welcome. Skills: SQL, Excel
View Job

Filter Results Page 2 of 10 Select a language
";

#[test]
fn extraction_is_total_and_roles_nonempty() {
    let inputs = [
        "",
        "   \n\n  ",
        "no structure at all",
        CAREERS_PAGE,
        "<div><h1>Hi</h1></div>",
        "1234 5678 9012",
    ];
    for input in inputs {
        let jobs = extractor().extract_jobs(input);
        assert!(!jobs.is_empty(), "empty result for {:?}", input);
        assert!(
            jobs.iter().all(|j| !j.role.is_empty()),
            "empty role for {:?}",
            input
        );
    }
}

#[test]
fn empty_input_exact_fallback() {
    let jobs = extractor().extract_jobs("");
    assert_eq!(
        jobs,
        vec![JobRecord {
            role: UNKNOWN_ROLE.to_string(),
            experience: EXPERIENCE_UNSPECIFIED.to_string(),
            skills: Vec::new(),
            description: String::new(),
        }]
    );
}

#[test]
fn marker_split_captures_both_roles() {
    let input = "Senior Engineer with a passion for distributed systems Apply \
                 Data Analyst with a passion for dashboards and reporting";
    let jobs = extractor().extract_jobs(input);
    assert_eq!(jobs.len(), 2);
    assert!(jobs[0].role.contains("Senior Engineer"));
    assert!(jobs[1].role.contains("Data Analyst"));
}

#[test]
fn noise_block_never_promoted() {
    let input = "Filter Results Page 2 of 10 Select a language";
    let jobs = extractor().extract_jobs(input);
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].role, UNKNOWN_ROLE);
}

#[test]
fn titles_deduplicated_within_a_pass() {
    let jobs = extractor().extract_jobs(CAREERS_PAGE);
    let keys: Vec<String> = jobs.iter().map(|j| JobRecord::title_key(&j.role)).collect();
    let unique: HashSet<&String> = keys.iter().collect();
    assert_eq!(keys.len(), unique.len());
}

#[test]
fn career_page_extraction() {
    let jobs = extractor().extract_jobs(CAREERS_PAGE);
    let roles: Vec<&str> = jobs.iter().map(|j| j.role.as_str()).collect();
    assert!(roles.iter().any(|r| r.contains("Senior Backend Engineer")));
    assert!(roles.iter().any(|r| r.contains("Data Analyst")));
    assert!(roles.iter().all(|r| !r.to_lowercase().contains("filter results")));

    let engineer = jobs
        .iter()
        .find(|j| j.role.contains("Senior Backend Engineer"))
        .unwrap();
    // First match in the raw block wins, and the title's "Senior" precedes
    // the "5+ years" phrase.
    assert_eq!(engineer.experience, "Senior");
    assert!(engineer.skills.contains(&"python".to_string()));
}

#[test]
fn skills_and_description_bounds_hold() {
    let noisy: String = (0..200)
        .map(|i| format!("Engineer opening number {} needs skill-{} badly.\n", i, i))
        .collect();
    let inputs = [CAREERS_PAGE.to_string(), noisy];
    for input in &inputs {
        for job in extractor().extract_jobs(input) {
            assert!(job.skills.len() <= 30);
            for skill in &job.skills {
                assert_eq!(skill, &skill.to_lowercase());
                assert!(
                    skill
                        .chars()
                        .all(|c| c.is_alphanumeric() || " +#.-_".contains(c)),
                    "stray punctuation in {:?}",
                    skill
                );
            }
            assert!(job.description.chars().count() <= 2003);
        }
    }
}

#[test]
fn structural_html_extraction() {
    let html = "<html><body><ul>\
        <li><h3>Senior Rust Engineer</h3><p>Own our ingestion services. 4+ years required. View Job</p></li>\
        <li><h3>Product Designer</h3><p>Shape the design system end to end. View Job</p></li>\
        </ul></body></html>";
    let jobs = Extractor::new(Vocabulary::default())
        .with_markup(true)
        .extract_jobs(html);
    let roles: Vec<&str> = jobs.iter().map(|j| j.role.as_str()).collect();
    assert!(roles.iter().any(|r| r.contains("Senior Rust Engineer")));
    assert!(roles.iter().any(|r| r.contains("Product Designer")));
}

#[test]
fn normalize_idempotent_on_page_input() {
    let once = normalize(CAREERS_PAGE);
    assert_eq!(normalize(&once), once);
}

#[test]
fn composer_orders_role_skills_links() {
    let job = JobRecord {
        role: "Backend Engineer".to_string(),
        experience: "3 years".to_string(),
        skills: vec!["python".to_string(), "aws".to_string()],
        description: "Build APIs all day".to_string(),
    };
    let links = vec!["https://a".to_string(), "https://b".to_string()];
    let mail = Composer::new("Jane Doe").with_seed(11).compose(&job, &links);

    let role = mail.find("Backend Engineer").unwrap();
    let skill = mail.find("python").unwrap();
    let a = mail.find("https://a").unwrap();
    let b = mail.find("https://b").unwrap();
    assert!(role < skill && skill < a && a < b);
}

#[test]
fn portfolio_query_scenarios() {
    let p = Portfolio::from_rows(vec![PortfolioRow {
        title: "demo".to_string(),
        url: "https://x".to_string(),
        skills: "python,aws".to_string(),
    }]);
    assert_eq!(p.query_links(&["aws"]), vec!["https://x"]);
    assert!(p.query_links(&["cobol"]).is_empty());
}

#[test]
fn extracted_skills_drive_link_lookup() {
    let p = Portfolio::from_rows(vec![
        PortfolioRow {
            title: "py".to_string(),
            url: "https://py".to_string(),
            skills: "python".to_string(),
        },
        PortfolioRow {
            title: "golang".to_string(),
            url: "https://go".to_string(),
            skills: "go".to_string(),
        },
    ]);
    let jobs = extractor().extract_jobs(CAREERS_PAGE);
    let engineer = jobs
        .iter()
        .find(|j| j.role.contains("Senior Backend Engineer"))
        .unwrap();
    let links = p.query_links(&engineer.skills);
    assert_eq!(links, vec!["https://py"]);
}
