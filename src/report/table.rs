// src/report/table.rs

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{status_label, NO_PROBLEMS};
use crate::pipeline::Page;

#[derive(Tabled)]
struct Row<'a> {
    #[tabled(rename = "No")]
    number: usize,
    #[tabled(rename = "URL")]
    url: &'a str,
    #[tabled(rename = "Status")]
    status: String,
}

pub fn render(pages: &[Page]) -> String {
    if pages.is_empty() {
        return format!("{}\n", NO_PROBLEMS);
    }

    let rows = pages.iter().enumerate().map(|(i, page)| Row {
        number: i + 1,
        url: &page.location,
        status: status_label(page),
    });

    let mut table = Table::new(rows);
    table.with(Style::ascii());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_banner() {
        assert_eq!(render(&[]), "No problems found\n");
    }

    #[test]
    fn test_rows_are_numbered_in_report_order() {
        let pages = vec![
            Page {
                location: "http://127.0.0.1:8080/?page=2".to_string(),
                status_code: 500,
            },
            Page {
                location: "http://127.0.0.1:8080/?page=1".to_string(),
                status_code: 404,
            },
        ];

        let output = render(&pages);
        let rows: Vec<&str> = output.lines().filter(|l| l.starts_with('|')).collect();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains("No") && rows[0].contains("URL") && rows[0].contains("Status"));
        assert!(rows[1].contains("| 1 ") && rows[1].contains("page=2") && rows[1].contains("500"));
        assert!(rows[2].contains("| 2 ") && rows[2].contains("page=1") && rows[2].contains("404"));
    }
}
