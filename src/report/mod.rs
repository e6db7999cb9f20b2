use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use crate::ArticleRecord;

mod table;
pub use table::render_table;

pub const NO_RESULTS: &str = "No results found with non-academic authors.";

pub const HEADERS: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// One output row; author and affiliation lists are joined with `", "`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "PubmedID")]
    pub pmid: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Publication Date")]
    pub publication_date: String,
    #[serde(rename = "Non-academic Author(s)")]
    pub authors: String,
    #[serde(rename = "Company Affiliation(s)")]
    pub affiliations: String,
    #[serde(rename = "Corresponding Author Email")]
    pub email: String,
}

impl From<&ArticleRecord> for ReportRow {
    fn from(record: &ArticleRecord) -> Self {
        Self {
            pmid: record.pmid.clone(),
            title: record.title.clone(),
            publication_date: record.publication_date.clone(),
            authors: record.author_names(),
            affiliations: record.affiliations(),
            email: record.corresponding_email.clone(),
        }
    }
}

impl ReportRow {
    pub fn cells(&self) -> [&str; 6] {
        [
            self.pmid.as_str(),
            self.title.as_str(),
            self.publication_date.as_str(),
            self.authors.as_str(),
            self.affiliations.as_str(),
            self.email.as_str(),
        ]
    }
}

pub fn write_csv<W: Write>(records: &[ArticleRecord], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for record in records {
        wtr.serialize(ReportRow::from(record))
            .with_context(|| format!("Failed to write row for PMID {}", record.pmid))?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn save_csv<P: AsRef<Path>>(records: &[ArticleRecord], path: P) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())
        .with_context(|| format!("Failed to create {}", path.as_ref().display()))?;
    write_csv(records, std::io::BufWriter::new(file))
}
