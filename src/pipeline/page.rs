// src/pipeline/page.rs
// =============================================================================
// The one record that flows through the whole pipeline.
//
// A Page starts life as a task (status_code = 0), gets moved into a worker,
// and comes back out as a result with the observed status code filled in.
// Because it is moved through the channels (never shared), only one part of
// the program owns a given Page at any moment.
// =============================================================================

use serde::{Deserialize, Serialize};

/// Status code recorded when the request never produced an HTTP response
pub const TRANSPORT_ERROR: u16 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// The URL taken from the sitemap's <loc> element
    pub location: String,
    /// 0 until a worker has checked the page
    pub status_code: u16,
}

impl Page {
    /// Creates an unchecked page
    pub fn new(location: impl Into<String>) -> Self {
        Page {
            location: location.into(),
            status_code: TRANSPORT_ERROR,
        }
    }

    /// A page only counts as fine when it answered exactly 200
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_page_is_unchecked() {
        let page = Page::new("https://example.com/");
        assert_eq!(page.status_code, TRANSPORT_ERROR);
        assert!(!page.is_ok());
    }

    #[test]
    fn test_only_200_is_ok() {
        let mut page = Page::new("https://example.com/");
        page.status_code = 200;
        assert!(page.is_ok());

        page.status_code = 204;
        assert!(!page.is_ok());

        page.status_code = 301;
        assert!(!page.is_ok());
    }

    #[test]
    fn test_serializes_as_json_object() {
        let page = Page {
            location: "https://example.com/a".to_string(),
            status_code: 404,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["location"], "https://example.com/a");
        assert_eq!(json["status_code"], 404);
    }
}
