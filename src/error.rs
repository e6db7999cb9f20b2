use thiserror::Error;

pub type Result<T> = std::result::Result<T, PapersError>;

#[derive(Error, Debug)]
pub enum PapersError {
    /// The article XML could not be parsed, or carried no `PubmedArticle`.
    /// Recoverable: the caller skips that article.
    #[error("malformed article XML: {0}")]
    MalformedInput(String),

    /// The detail fetch for one PMID failed. Recoverable like `MalformedInput`.
    #[error("PMID {pmid} unavailable: {reason}")]
    UpstreamUnavailable { pmid: String, reason: String },

    /// The initial ID search failed. Fatal to the run.
    #[error("search for '{query}' failed: {source}")]
    QueryFailure {
        query: String,
        #[source]
        source: reqwest::Error,
    },
}

impl PapersError {
    /// Whether the batch may continue past this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, PapersError::QueryFailure { .. })
    }
}
