// src/source/mod.rs
// =============================================================================
// Where the list of pages comes from.
//
// Currently implements:
// - Downloading and parsing a sitemap.xml
// =============================================================================

mod fetch;

pub use fetch::load_sitemap;
