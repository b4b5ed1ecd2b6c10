// src/checker/http.rs
// =============================================================================
// This module checks a single page by making an HTTP request.
//
// Key functionality:
// - The Fetch trait: "give me the status code for this URL"
// - HttpClient implements it with a real GET request
// - check_page folds the outcome into a Page, so a failed request still
//   produces a result (status 0) instead of an error
//
// The worker pool never sees reqwest. It only gets a closure that calls
// check_page, which makes it easy to swap in a fake fetcher for tests.
//
// Rust concepts:
// - Trait objects (dyn Fetch): call a method without knowing the concrete type
// - BoxFuture: an async fn in a trait, written out by hand
// =============================================================================

use futures::future::{BoxFuture, FutureExt};
use tracing::warn;

use super::client::HttpClient;
use crate::error::{Error, Result};
use crate::pipeline::{Page, TRANSPORT_ERROR};

/// Anything that can tell us the HTTP status code of a URL
pub trait Fetch: Send + Sync {
    fn fetch<'a>(&'a self, location: &'a str) -> BoxFuture<'a, Result<u16>>;
}

impl Fetch for HttpClient {
    fn fetch<'a>(&'a self, location: &'a str) -> BoxFuture<'a, Result<u16>> {
        async move {
            // We only care about the status, the body is dropped unread
            let response = self.get(location).send().await?;
            Ok(response.status().as_u16())
        }
        .boxed()
    }
}

// Checks one page and returns it with the status code filled in.
//
// Never fails: transport errors are logged and recorded as status 0, so the
// page simply shows up as failed in the report.
pub async fn check_page(fetcher: &dyn Fetch, mut page: Page) -> Page {
    match fetcher.fetch(&page.location).await {
        Ok(status_code) => {
            page.status_code = status_code;
        }
        Err(e) => {
            warn!(
                url = %page.location,
                reason = categorize_error(&e),
                "request failed: {}",
                e
            );
            page.status_code = TRANSPORT_ERROR;
        }
    }
    page
}

// Gives a short, human-readable reason for a failed request
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - SSL certificate issues
// - Too many redirects
fn categorize_error(error: &Error) -> &'static str {
    let Error::Http(error) = error else {
        return "error";
    };

    // Convert error to string once, some causes only show up in the message
    let error_string = error.to_string().to_lowercase();

    if error.is_timeout() {
        "timeout"
    } else if error.is_redirect() {
        "too many redirects"
    } else if error.is_connect() {
        if error_string.contains("dns") {
            "dns error"
        } else {
            "connection failed"
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        "ssl error"
    } else {
        "error"
    }
}
