// src/checker/client.rs
// =============================================================================
// The pre-configured HTTP client used for the sitemap and for every page.
//
// On top of a plain reqwest::Client it adds what the user asked for on the
// command line:
// - extra headers (sent with every request)
// - extra query parameters (appended to every URL)
// - HTTP basic auth
//
// Rust concepts:
// - Builder pattern: Client::builder()...build()
// - map_err: turning one error type into another
// =============================================================================

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder};

use crate::config::{BasicAuth, Config};
use crate::error::{Error, Result};

// How many redirects we follow before giving up on a page
const MAX_REDIRECTS: usize = 5;

#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    query: Vec<(String, String)>,
    basic_auth: Option<BasicAuth>,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<Self> {
        let headers = build_headers(&config.headers)?;

        // We'll reuse this client for every request (connection pooling)
        let inner = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(config.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(HttpClient {
            inner,
            query: config.query.clone(),
            basic_auth: config.basic_auth.clone(),
        })
    }

    // Starts a GET request with the configured query parameters and auth
    pub fn get(&self, url: &str) -> RequestBuilder {
        let mut request = self.inner.get(url);

        if !self.query.is_empty() {
            request = request.query(&self.query);
        }

        if let Some(auth) = &self.basic_auth {
            request = request.basic_auth(&auth.username, auth.password.as_ref());
        }

        request
    }
}

fn build_headers(pairs: &[(String, String)]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    for (name, value) in pairs {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| Error::InvalidHeader(name.clone()))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| Error::InvalidHeader(format!("{}: {}", name, value)))?;

        // append (not insert) so the same header can be given twice
        headers.append(header_name, header_value);
    }

    Ok(headers)
}
