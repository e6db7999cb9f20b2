use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::classify::AffiliationClassifier;
use crate::error::Result;
use crate::{ArticleRecord, NonAcademicAuthor};

mod parser;
pub use parser::{parse_article, AuthorEntry, ParsedArticle, PubDate};

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"[\w.-]+@[\w.-]+").unwrap();
}

/// Outcome of extracting one well-formed article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Match(ArticleRecord),
    /// No author carried a non-academic affiliation
    NoMatch { pmid: String },
}

impl Extraction {
    pub fn into_record(self) -> Option<ArticleRecord> {
        match self {
            Extraction::Match(record) => Some(record),
            Extraction::NoMatch { .. } => None,
        }
    }
}

/// First email-looking substring, without trailing sentence punctuation.
pub fn find_email(text: &str) -> Option<String> {
    EMAIL
        .find(text)
        .map(|m| m.as_str().trim_end_matches('.').to_string())
}

#[derive(Debug, Clone, Default)]
pub struct ArticleExtractor {
    classifier: AffiliationClassifier,
}

impl ArticleExtractor {
    pub fn new(classifier: AffiliationClassifier) -> Self {
        Self { classifier }
    }

    /// Parses one article document and keeps it only if some author is
    /// non-academic. Syntax errors surface as `MalformedInput`; missing
    /// sub-structure just yields fewer authors.
    pub fn extract(&self, xml: &str) -> Result<Extraction> {
        let article = parse_article(xml)?;
        let pmid = article.pmid.unwrap_or_default();

        let mut authors = Vec::new();
        let mut email: Option<String> = None;

        for author in &article.authors {
            let Some(affiliation) = author.affiliation_text() else {
                continue;
            };

            if self.classifier.is_non_academic(affiliation) {
                authors.push(NonAcademicAuthor {
                    name: author.display_name(),
                    affiliation: affiliation.to_string(),
                });
            }

            if email.is_none() {
                email = find_email(affiliation);
            }
        }

        trace!(
            pmid = %pmid,
            authors = article.authors.len(),
            non_academic = authors.len(),
            "Extracted article"
        );

        if authors.is_empty() {
            return Ok(Extraction::NoMatch { pmid });
        }

        Ok(Extraction::Match(ArticleRecord {
            pmid,
            title: article.title.unwrap_or_default(),
            publication_date: article.pub_date.normalized(),
            authors,
            corresponding_email: email.unwrap_or_default(),
        }))
    }
}
