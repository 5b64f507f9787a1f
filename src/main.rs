//! # eBooxly Digest
//!
//! Builds the eBooxly landing page: the newest catalog books mixed with
//! Arabic cultural news, rendered as one static right-to-left HTML page.
//!
//! ## Usage
//!
//! ```sh
//! ebooxly_digest                       # writes public/index.html
//! ebooxly_digest --merge-policy sandwich --catalog pages
//! ebooxly_digest --deploy              # then runs `firebase deploy --only hosting`
//! ```
//!
//! ## Pipeline
//!
//! Strictly sequential, one attempt per request:
//! 1. **Fetch & extract**: catalog books (JSON listing or HTML pages) and news entries
//! 2. **Merge**: combine both lists with the selected [`merge::MergePolicy`]
//! 3. **Render**: fill the askama page template
//! 4. **Write**: save the page, optionally deploy
//!
//! A source that fails contributes nothing; the page is still rendered.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod deploy;
mod fetcher;
mod images;
mod merge;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use config::{CATALOG_LIMIT, CatalogStrategy, MY_API_URL, MY_SITE_URL, NEWS_LIMIT, RunConfig};
use fetcher::{Fetch, FetchError, HttpFetcher};
use images::{PickImage, RandomImage};
use models::{ContentItem, PageMeta};
use outputs::html;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("ebooxly_digest starting up");

    let args = Cli::parse();
    let config = RunConfig::from(&args);
    debug!(?config, "Resolved run configuration");

    let mut picker = RandomImage;
    let items = gather_items(HttpFetcher::new(), &config, &mut picker).await;
    if items.is_empty() {
        warn!("No items collected from any source; rendering an empty page");
    }

    let page = html::render_page(&items, &PageMeta::now(), &mut picker)?;
    if let Err(e) = html::write_page(&page, &config.output_file).await {
        error!(path = %config.output_file.display(), error = %e, "Failed to write page");
        return Err(e);
    }

    if let Some(command) = &config.deploy_command {
        deploy::run(command).await?;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        cards = items.len(),
        path = %config.output_file.display(),
        "Execution complete"
    );
    Ok(())
}

/// Collect items when a client could be built, otherwise an empty list.
async fn gather_items<F: Fetch, P: PickImage>(
    fetcher: Result<F, FetchError>,
    config: &RunConfig,
    picker: &mut P,
) -> Vec<ContentItem> {
    match fetcher {
        Ok(fetcher) => collect_items(&fetcher, config, picker).await,
        Err(e) => {
            error!(error = %e, "Could not build HTTP client; no source will be read");
            Vec::new()
        }
    }
}

/// Fetch both sources and merge them into page order.
#[instrument(level = "info", skip_all, fields(catalog = ?config.catalog, policy = ?config.merge_policy))]
async fn collect_items<F: Fetch, P: PickImage>(
    fetcher: &F,
    config: &RunConfig,
    picker: &mut P,
) -> Vec<ContentItem> {
    let books = match config.catalog {
        CatalogStrategy::Api => {
            scrapers::catalog::fetch_catalog(fetcher, MY_SITE_URL, MY_API_URL, CATALOG_LIMIT).await
        }
        CatalogStrategy::Pages => scrapers::pages::fetch_pages(fetcher, &config::owned_pages()).await,
    };

    let news = match scrapers::news::search_url() {
        Ok(url) => scrapers::news::fetch_news(fetcher, url.as_str(), NEWS_LIMIT, picker).await,
        Err(e) => {
            warn!(error = %e, "Could not build news feed URL");
            Vec::new()
        }
    };

    let (book_count, news_count) = (books.len(), news.len());
    let merged = merge::merge(config.merge_policy, books, news);
    info!(
        books = book_count,
        news = news_count,
        total = merged.len(),
        "Merged page items"
    );
    merged
}
