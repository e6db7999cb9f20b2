use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use urlencoding::encode;

use crate::error::{PapersError, Result};

pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

#[derive(Debug, Deserialize)]
struct ESearchResponse {
    esearchresult: ESearchResult,
}

#[derive(Debug, Deserialize)]
struct ESearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

/// Client for the E-utilities search and fetch endpoints.
pub struct PubMedClient {
    client: Client,
    base_url: String,
}

impl PubMedClient {
    pub fn new(base_url: String, timeout_secs: u64) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns up to `max_results` PMIDs in relevance order.
    pub async fn search_ids(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        let url = format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmode=json&retmax={}",
            self.base_url,
            encode(query),
            max_results
        );
        debug!("Searching: {}", url);

        let failure = |source| PapersError::QueryFailure {
            query: query.to_string(),
            source,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(failure)?;
        let body: ESearchResponse = response.json().await.map_err(failure)?;

        Ok(body.esearchresult.idlist)
    }

    /// Returns the raw article XML for one PMID.
    pub async fn fetch_article(&self, pmid: &str) -> Result<String> {
        let url = format!(
            "{}/efetch.fcgi?db=pubmed&id={}&retmode=xml",
            self.base_url,
            encode(pmid)
        );

        let unavailable = |reason: String| PapersError::UpstreamUnavailable {
            pmid: pmid.to_string(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("HTTP {}", status)));
        }

        response.text().await.map_err(|e| unavailable(e.to_string()))
    }
}
