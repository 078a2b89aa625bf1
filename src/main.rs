use tracing::error;

use westtamar_scraper::infrastructure::logging;

#[tokio::main]
async fn main() {
    if let Err(e) = logging::init_logging() {
        eprintln!("Failed to initialize logging: {e}");
    }

    // The only fatal path is the initial fetch (or a store failure); per-item
    // extraction problems degrade to sentinel fields instead.
    if let Err(e) = westtamar_scraper::run().await {
        error!("Scrape run failed: {e:#}");
        std::process::exit(1);
    }
}
