// src/logging.rs
// =============================================================================
// Sets up `tracing` so log events end up on stderr.
//
// stdout is reserved for the report (it may be JSON piped into another tool).
//
// Levels used across the program:
// - info:  sitemap loaded, pipeline started / finished
// - warn:  a page request failed at the transport level
// - debug: worker heartbeats ("waiting...") and per-worker stats
//
// When RUST_LOG is set it decides everything. Otherwise we log warnings from
// dependencies and info (or debug with --verbose) from this crate.
// =============================================================================

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::progress::ProgressWriter;

pub fn init_logging(verbose: bool, writer: ProgressWriter) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(rust_log.as_deref(), verbose))
        .with_writer(writer)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to set up logging: {}", e))?;

    Ok(())
}

// The filter for a given RUST_LOG value (None when unset)
fn build_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { "info" };
    let defaults = || EnvFilter::new(format!("warn,sitemap_checker={}", level));

    match rust_log {
        Some(directives) if !directives.trim().is_empty() => {
            EnvFilter::try_new(directives).unwrap_or_else(|_| {
                eprintln!("Warning: ignoring invalid RUST_LOG '{}'", directives);
                defaults()
            })
        }
        _ => defaults(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_rust_log() {
        let filter = build_filter(None, false).to_string();
        assert!(filter.contains("sitemap_checker=info"));
        assert!(filter.contains("warn"));
    }

    #[test]
    fn test_verbose_defaults() {
        let filter = build_filter(None, true).to_string();
        assert!(filter.contains("sitemap_checker=debug"));
    }

    #[test]
    fn test_rust_log_is_used_as_is() {
        let filter = build_filter(Some("debug"), false).to_string();
        assert_eq!(filter, "debug");

        let filter = build_filter(Some("sitemap_checker=trace"), true).to_string();
        assert_eq!(filter, "sitemap_checker=trace");
    }

    #[test]
    fn test_empty_or_invalid_rust_log_falls_back() {
        let filter = build_filter(Some(""), false).to_string();
        assert!(filter.contains("sitemap_checker=info"));

        let filter = build_filter(Some("sitemap_checker=notalevel"), false).to_string();
        assert!(filter.contains("sitemap_checker=info"));
    }
}
