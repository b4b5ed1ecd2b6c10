// src/source/fetch.rs
// =============================================================================
// Downloads a sitemap and turns its <url><loc> entries into pages to check.
//
// Strategy:
// - GET the sitemap with the same client used for pages (so headers, query
//   parameters and basic auth apply to it too)
// - Anything but a 2xx answer is fatal: without the list there is nothing
//   to check
// - Walk the XML events and keep the text of every <urlset><url><loc>,
//   exactly as written, in document order
//
// Every <url> entry becomes a page, even when its <loc> is not a usable URL.
// Such a page fails when it is requested and shows up in the report, instead
// of silently disappearing from the run.
//
// Not supported: sitemap index files (<sitemapindex>). Their entries are
// logged and skipped.
// =============================================================================

use tracing::{debug, info, warn};
use url::Url;
use xml::reader::{EventReader, XmlEvent};

use crate::checker::HttpClient;
use crate::error::{Error, Result};
use crate::pipeline::Page;

const URL_ENTRY: &[&str] = &["urlset", "url"];
const URL_LOC: &[&str] = &["urlset", "url", "loc"];
const NESTED_SITEMAP: &[&str] = &["sitemapindex", "sitemap"];

// Downloads and parses the sitemap at `url`
//
// Returns every page in document order. The list can be empty, it is up to
// the caller to decide what that means.
pub async fn load_sitemap(client: &HttpClient, url: &str) -> Result<Vec<Page>> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::SitemapStatus(status.as_u16()));
    }

    let body = response.bytes().await?;
    let pages = parse_sitemap(&body);

    info!(url, pages = pages.len(), "sitemap loaded");
    Ok(pages)
}

// Extracts the <loc> of every <url> entry
pub fn parse_sitemap(content: &[u8]) -> Vec<Page> {
    let mut pages = Vec::new();

    // Element names from the root down to where the reader currently is
    let mut path: Vec<String> = Vec::new();
    // Some while we are inside a <url> entry
    let mut loc: Option<String> = None;

    for event in EventReader::new(content) {
        match event {
            Ok(XmlEvent::StartElement { name, .. }) => {
                path.push(name.local_name.to_lowercase());

                if at(&path, URL_ENTRY) {
                    loc = Some(String::new());
                } else if at(&path, NESTED_SITEMAP) {
                    debug!("skipping nested sitemap");
                }
            }
            Ok(XmlEvent::Characters(text)) | Ok(XmlEvent::CData(text)) => {
                if at(&path, URL_LOC) {
                    if let Some(loc) = loc.as_mut() {
                        loc.push_str(&text);
                    }
                }
            }
            Ok(XmlEvent::EndElement { .. }) => {
                if at(&path, URL_ENTRY) {
                    if let Some(loc) = loc.take() {
                        pages.push(entry_page(&loc));
                    }
                }
                path.pop();
            }
            Ok(_) => {}
            Err(e) => {
                // The XML reader does not recover from errors, so stop here
                // and keep what we have
                warn!("sitemap parse error: {}", e);
                break;
            }
        }
    }

    pages
}

fn at(path: &[String], expected: &[&str]) -> bool {
    path.iter().map(String::as_str).eq(expected.iter().copied())
}

fn entry_page(loc: &str) -> Page {
    let location = loc.trim();

    if Url::parse(location).is_err() {
        warn!(loc = location, "<loc> is not an absolute URL, the page will be reported as failed");
    }

    Page::new(location)
}
