use serde::{Deserialize, Serialize};

pub mod classify;
pub mod error;
pub mod extract;
pub mod query;
pub mod report;

pub use classify::{is_non_academic, AffiliationClassifier};
pub use error::PapersError;
pub use extract::{ArticleExtractor, Extraction};

/// One author whose affiliation classified as non-academic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonAcademicAuthor {
    pub name: String,
    pub affiliation: String,
}

/// Normalized metadata for an article with at least one non-academic author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub pmid: String,
    pub title: String,
    /// `YYYY[-MM[-DD]]`, the raw MedlineDate text, or `Unknown`
    pub publication_date: String,
    /// Document order, duplicates kept
    pub authors: Vec<NonAcademicAuthor>,
    pub corresponding_email: String,
}

impl ArticleRecord {
    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn affiliations(&self) -> String {
        self.authors
            .iter()
            .map(|a| a.affiliation.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
