// src/report/ci.rs
// =============================================================================
// CI-style output: one line per failed page, red cross and status first.
//
//   ✗ [500] https://example.com/broken
//
// console only emits color codes when the output supports them, so the same
// text reads fine in a plain log file.
// =============================================================================

use std::fmt::Write;

use console::style;

use super::{status_label, NO_PROBLEMS};
use crate::pipeline::Page;

pub fn render(pages: &[Page]) -> String {
    if pages.is_empty() {
        return format!("{} {}\n", style("✓").green(), style(NO_PROBLEMS).green());
    }

    let mut out = String::new();
    for page in pages {
        // Writing to a String can't fail
        let _ = writeln!(
            out,
            "{} [{}] {}",
            style("✗").red().bold(),
            style(status_label(page)).red(),
            page.location
        );
    }
    out
}
