//! Application layer - the one-shot scrape pipeline.

pub mod scrape_run;

pub use scrape_run::{ScrapeRun, ScrapeSummary};
