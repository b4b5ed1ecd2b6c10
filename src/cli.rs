// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things), then turn the parsed
// arguments into a Config for the rest of the program.
// =============================================================================

use std::time::Duration;

use clap::Parser;

use crate::config::{
    parse_basic_auth, parse_header, parse_query_pair, BasicAuth, Config, DEFAULT_CONCURRENCY,
    DEFAULT_LIMIT, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TIMEOUT_MS,
};
use crate::report::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "sitemap-checker",
    version,
    about = "Requests every page listed in a sitemap and reports the ones that fail",
    long_about = "sitemap-checker downloads a sitemap, requests each page it lists with a pool of \
                  concurrent workers, and prints every page that did not answer 200. \
                  The exit code is 0 when all pages are fine, 1 when some failed and 2 on errors, \
                  which makes it easy to use in CI pipelines."
)]
pub struct Cli {
    /// URL of the sitemap.xml to check
    pub sitemap_url: String,

    /// Number of pages requested at the same time
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Maximum number of sitemap entries to check
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Worker timeout in milliseconds: idle heartbeat interval and pause
    /// between requests
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout: u64,

    /// Pause between requests of one worker in milliseconds
    /// (defaults to --timeout)
    #[arg(long)]
    pub throttle: Option<u64>,

    /// Timeout of a single HTTP request in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout: u64,

    /// Extra header sent with every request, e.g. -H "Accept: text/html"
    ///
    /// Can be given several times
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Extra query parameter appended to every URL, e.g. -q preview=true
    ///
    /// Can be given several times
    #[arg(short, long = "query", value_parser = parse_query_pair)]
    pub query: Vec<(String, String)>,

    /// Basic auth credentials as user:password
    #[arg(long, value_parser = parse_basic_auth)]
    pub basic_auth: Option<BasicAuth>,

    /// How the report is printed
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Don't show the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Log debug output (worker heartbeats and stats) to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn into_config(self) -> Config {
        let throttle = self.throttle.unwrap_or(self.timeout);

        Config {
            sitemap_url: self.sitemap_url,
            concurrency: self.concurrency,
            limit: self.limit,
            idle_timeout: Duration::from_millis(self.timeout),
            throttle: Duration::from_millis(throttle),
            request_timeout: Duration::from_secs(self.request_timeout),
            headers: self.headers,
            query: self.query,
            basic_auth: self.basic_auth,
            format: self.format,
            progress: !self.no_progress,
        }
    }
}
