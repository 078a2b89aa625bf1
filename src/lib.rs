//! West Tamar planning application scraper.
//!
//! One-shot batch job: fetches the council's currently advertised planning
//! applications listing page, extracts one record per listing item and
//! persists new records into a local SQLite table, skipping references that
//! are already stored.

pub mod application;
pub mod domain;
pub mod infrastructure;

use anyhow::Result;

use application::{ScrapeRun, ScrapeSummary};
use domain::constants::site;
use infrastructure::application_repository::PlanningApplicationRepository;
use infrastructure::database_connection::DatabaseConnection;
use infrastructure::http_client::PageFetcher;
use infrastructure::listing_parser::ListingExtractor;

/// Runs the full pipeline against the live listing page and the default
/// database. This is everything the binary does.
pub async fn run() -> Result<ScrapeSummary> {
    let connection = DatabaseConnection::open_default().await?;
    let repository = PlanningApplicationRepository::new(connection.pool().clone());
    repository.ensure_schema().await?;

    let fetcher = PageFetcher::new()?;
    let extractor = ListingExtractor::new()?;

    ScrapeRun::new(fetcher, extractor, repository)
        .execute(site::LISTING_URL)
        .await
}
