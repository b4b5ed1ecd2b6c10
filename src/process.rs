// src/process.rs
// =============================================================================
// One complete run of the program:
//
// 1. Build the HTTP client from the config
// 2. Download the sitemap (fatal if that fails or if it is empty)
// 3. Check every page through the worker pipeline, ticking the progress bar
// 4. Write a report of the pages that did not answer 200
//
// Returns Ok(true) when every page answered 200.
//
// The caller owns the progress bar; on an early error it is cleared when the
// caller drops it.
// =============================================================================

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::checker::{self, Fetch, HttpClient};
use crate::config::Config;
use crate::error::Error;
use crate::pipeline::{self, Page};
use crate::progress::Progress;
use crate::report;
use crate::source;

pub async fn run<W: Write>(config: &Config, progress: &Progress, out: &mut W) -> Result<bool> {
    config.validate()?;

    let client = HttpClient::new(config).context("Failed to create the HTTP client")?;

    let mut pages = source::load_sitemap(&client, &config.sitemap_url)
        .await
        .context("Failed to download the sitemap")?;

    // Only the first `limit` entries get checked
    pages.truncate(config.limit);
    if pages.is_empty() {
        return Err(Error::EmptySitemap.into());
    }

    progress.start_pages(pages.len());

    let fetcher: Arc<dyn Fetch> = Arc::new(client);
    let process = move |page: Page| {
        let fetcher = Arc::clone(&fetcher);
        async move { checker::check_page(fetcher.as_ref(), page).await }
    };

    let results = pipeline::run(pages, &config.pipeline(), process, || progress.inc()).await?;
    progress.finish();

    let checked = results.len();
    let failed: Vec<Page> = results.into_iter().filter(|page| !page.is_ok()).collect();
    info!(checked, failed = failed.len(), "all pages checked");

    let rendered = report::render(config.format, &failed)?;
    out.write_all(rendered.as_bytes())?;
    out.flush()?;

    Ok(failed.is_empty())
}
