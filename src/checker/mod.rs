// src/checker/mod.rs
// =============================================================================
// This module contains everything that talks HTTP for a single page.
//
// Submodules:
// - client: the configured reqwest client (headers, query, basic auth)
// - http:   the Fetch trait and check_page, used by the workers
//
// Rust concepts:
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

mod client;
mod http;

// Re-export public items from submodules
// This lets users write `checker::check_page()` instead of
// `checker::http::check_page()`
pub use client::HttpClient;
pub use http::{check_page, Fetch};
