//! One-shot scrape pipeline: fetch, extract, persist.

use anyhow::Result;
use chrono::Local;
use scraper::Html;
use tracing::info;

use crate::infrastructure::application_repository::{
    PersistOutcome, PlanningApplicationRepository,
};
use crate::infrastructure::http_client::PageFetcher;
use crate::infrastructure::listing_parser::ListingExtractor;

/// Counts for one completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub extracted: usize,
    pub inserted: usize,
    pub skipped: usize,
}

/// Wires the fetcher, extractor and repository into the sequential batch
/// pipeline. Fetch failure is the only fatal path; per-item extraction
/// always degrades to sentinels instead of erroring.
pub struct ScrapeRun {
    fetcher: PageFetcher,
    extractor: ListingExtractor,
    repository: PlanningApplicationRepository,
}

impl ScrapeRun {
    pub fn new(
        fetcher: PageFetcher,
        extractor: ListingExtractor,
        repository: PlanningApplicationRepository,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            repository,
        }
    }

    /// Fetches the listing page and runs the extraction and persistence
    /// passes over it.
    pub async fn execute(&self, url: &str) -> Result<ScrapeSummary> {
        let page = self.fetcher.fetch_page(url).await?;
        self.process_page(&page).await
    }

    /// Extraction and persistence for an already fetched page body.
    pub async fn process_page(&self, page: &str) -> Result<ScrapeSummary> {
        // Every record in the run carries the same scrape date.
        let date_scraped = Local::now().date_naive().format("%Y-%m-%d").to_string();

        info!("Start extraction of data");
        let records = {
            // Html is not Send; keep it off the await points below.
            let html = Html::parse_document(page);
            self.extractor.extract_records(&html, &date_scraped)
        };

        let mut summary = ScrapeSummary {
            extracted: records.len(),
            ..ScrapeSummary::default()
        };

        for record in &records {
            match self.repository.insert_if_absent(record).await? {
                PersistOutcome::Inserted => {
                    summary.inserted += 1;
                    info!("Data for {} saved to database", record.council_reference);
                }
                PersistOutcome::Skipped => {
                    summary.skipped += 1;
                    info!(
                        "Duplicate entry for {} found, skipping insertion",
                        record.council_reference
                    );
                }
            }
        }

        info!(
            "Run complete: {} extracted, {} inserted, {} skipped",
            summary.extracted, summary.inserted, summary.skipped
        );
        Ok(summary)
    }
}
