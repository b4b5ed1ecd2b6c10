// src/report/mod.rs
// =============================================================================
// Turns the list of failed pages into text.
//
// Formats:
// - table: a plain ASCII table for humans
// - ci:    one colored line per page, easy to read in CI logs
// - json:  for other tools
//
// Rendering is pure: it builds a String and has no side effects, so the same
// report always renders the same way.
// =============================================================================

mod ci;
mod table;

use clap::ValueEnum;

use crate::error::Result;
use crate::pipeline::{Page, TRANSPORT_ERROR};

/// Printed instead of a report when every page answered 200
pub const NO_PROBLEMS: &str = "No problems found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Ci,
    Json,
}

pub fn render(format: OutputFormat, pages: &[Page]) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table::render(pages)),
        OutputFormat::Ci => Ok(ci::render(pages)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(pages)?;
            json.push('\n');
            Ok(json)
        }
    }
}

// What to show in the status column
fn status_label(page: &Page) -> String {
    if page.status_code == TRANSPORT_ERROR {
        "no response".to_string()
    } else {
        page.status_code.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed() -> Vec<Page> {
        vec![
            Page {
                location: "http://example.com/2".to_string(),
                status_code: 500,
            },
            Page {
                location: "http://example.com/3".to_string(),
                status_code: TRANSPORT_ERROR,
            },
        ]
    }

    #[test]
    fn test_rendering_is_idempotent() {
        for format in [OutputFormat::Table, OutputFormat::Ci, OutputFormat::Json] {
            let first = render(format, &failed()).unwrap();
            let second = render(format, &failed()).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_json_round_trips() {
        let json = render(OutputFormat::Json, &failed()).unwrap();
        let parsed: Vec<Page> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, failed());
    }

    #[test]
    fn test_json_empty_report() {
        let json = render(OutputFormat::Json, &[]).unwrap();
        assert_eq!(json.trim(), "[]");
    }

    #[test]
    fn test_status_label() {
        let pages = failed();
        assert_eq!(status_label(&pages[0]), "500");
        assert_eq!(status_label(&pages[1]), "no response");
    }
}
