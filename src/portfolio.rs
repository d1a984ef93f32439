use std::path::Path;

use anyhow::Result;
use rusqlite::{Connection, OpenFlags};
use tracing::warn;

const MAX_LINKS: usize = 10;

/// One row of the reference-link table.
#[derive(Debug, Clone)]
pub struct PortfolioRow {
    pub title: String,
    pub url: String,
    /// Comma-separated skill tags.
    pub skills: String,
}

/// Read-only reference-link table, loaded once at construction.
///
/// Backing store is a SQLite table `portfolio(title, url, skills)`. A missing
/// or corrupt store degrades to an empty table; there is no write path.
#[derive(Debug, Default)]
pub struct Portfolio {
    rows: Vec<PortfolioRow>,
}

impl Portfolio {
    pub fn open(path: &Path) -> Self {
        match load_rows(path) {
            Ok(rows) => Self { rows },
            Err(err) => {
                warn!(%err, path = %path.display(), "portfolio unavailable, using empty table");
                Self::default()
            }
        }
    }

    pub fn from_rows(rows: Vec<PortfolioRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// URLs whose skill tags overlap the query, case-insensitive substring in
    /// either direction. An empty query returns everything. Deduplicated,
    /// table order preserved, capped at 10.
    pub fn query_links<S: AsRef<str>>(&self, skills: &[S]) -> Vec<String> {
        let query: Vec<String> = skills
            .iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let mut links: Vec<String> = Vec::new();
        for row in &self.rows {
            if row.url.is_empty() {
                continue;
            }
            let row_skills: Vec<String> = row
                .skills
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
            let matched = query.is_empty()
                || query.iter().any(|q| {
                    row_skills
                        .iter()
                        .any(|r| r.contains(q.as_str()) || q.contains(r.as_str()))
                });
            if matched && !links.contains(&row.url) {
                links.push(row.url.clone());
            }
        }

        links.truncate(MAX_LINKS);
        links
    }
}

fn load_rows(path: &Path) -> Result<Vec<PortfolioRow>> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let mut stmt = conn.prepare("SELECT title, url, skills FROM portfolio")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(PortfolioRow {
                title: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                url: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                skills: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ── Tests ──
