use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::classify::{AffiliationClassifier, DEFAULT_ACADEMIC_KEYWORDS};
use crate::error::PapersError;
use crate::extract::{ArticleExtractor, Extraction};
use crate::{report, ArticleRecord};

mod client;
pub use client::{PubMedClient, DEFAULT_BASE_URL};

#[derive(Args)]
pub struct QueryArgs {
    /// PubMed search query
    pub query: String,

    /// Write results to this CSV file instead of printing a table
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Narrate per-article progress
    #[arg(short, long)]
    pub debug: bool,

    /// Maximum number of PMIDs to retrieve
    #[arg(short, long, default_value = "15")]
    pub max_results: usize,

    /// E-utilities base URL
    #[arg(short = 'u', long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(short, long, default_value = "30")]
    pub timeout: u64,

    /// Academic keyword (repeatable); replaces the built-in list
    #[arg(short = 'k', long = "academic-keyword")]
    pub academic_keywords: Vec<String>,
}

impl QueryArgs {
    pub fn classifier(&self) -> AffiliationClassifier {
        if self.academic_keywords.is_empty() {
            AffiliationClassifier::new(DEFAULT_ACADEMIC_KEYWORDS)
        } else {
            AffiliationClassifier::new(&self.academic_keywords)
        }
    }
}

fn progress_bar(len: usize, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Searches, then fetches and extracts each PMID in search order. Only a
/// failed search aborts; per-article failures are logged and skipped.
pub async fn collect_records(
    client: &PubMedClient,
    extractor: &ArticleExtractor,
    query: &str,
    max_results: usize,
    show_progress: bool,
) -> Result<Vec<ArticleRecord>, PapersError> {
    let pmids = client.search_ids(query, max_results).await?;
    info!("Found {} PMIDs for query '{}'", pmids.len(), query);

    let pb = progress_bar(pmids.len(), !show_progress);
    let mut records = Vec::new();

    for (i, pmid) in pmids.iter().enumerate() {
        let position = i + 1;
        let outcome = match client.fetch_article(pmid).await {
            Ok(xml) => extractor.extract(&xml),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(Extraction::Match(record)) => {
                debug!("{}. accepted {}: {}", position, pmid, record.title);
                records.push(record);
            }
            Ok(Extraction::NoMatch { .. }) => {
                debug!("{}. rejected {}: academic authors only", position, pmid);
            }
            Err(e) if e.is_recoverable() => {
                warn!("Skipping PMID {}: {}", pmid, e);
            }
            Err(e) => return Err(e),
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(records)
}

pub fn run(args: QueryArgs) -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("get_papers=info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(args))
}

pub async fn run_async(args: QueryArgs) -> Result<()> {
    let client = PubMedClient::new(args.base_url.clone(), args.timeout)
        .context("Failed to build HTTP client")?;
    let extractor = ArticleExtractor::new(args.classifier());

    let records = collect_records(
        &client,
        &extractor,
        &args.query,
        args.max_results,
        !args.debug,
    )
    .await
    .with_context(|| format!("Error fetching PMIDs for query '{}'", args.query))?;

    if records.is_empty() {
        println!("{}", report::NO_RESULTS);
        return Ok(());
    }

    match &args.file {
        Some(path) => {
            report::save_csv(&records, path)
                .with_context(|| format!("Failed to save to file '{}'", path.display()))?;
            info!("Saved {} records to {}", records.len(), path.display());
        }
        None => print!("{}", report::render_table(&records)),
    }

    Ok(())
}
