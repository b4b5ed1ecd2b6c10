// src/error.rs
// =============================================================================
// Error types shared by the library-style modules (pipeline, checker, source,
// report).
//
// main.rs and process.rs use anyhow on top of this, so these variants end up
// wrapped with extra context before they are printed.
//
// Rust concepts:
// - thiserror: derive Display/Error for an enum instead of writing them by hand
// - #[from]: lets the ? operator convert foreign errors into ours
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP client failed (building it, or a request to the sitemap)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The sitemap URL answered with something other than 2xx
    #[error("sitemap request returned HTTP {0}")]
    SitemapStatus(u16),

    /// The sitemap had no usable <loc> entries (or the limit cut them all)
    #[error("the sitemap is empty")]
    EmptySitemap,

    /// A header given on the command line could not be used
    #[error("invalid header '{0}'")]
    InvalidHeader(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Every worker dropped its results sender before the consumer got
    /// all the results it was told to wait for
    #[error("results channel closed after {received} of {expected} results")]
    ResultsClosed { expected: usize, received: usize },

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
