// src/config.rs
// =============================================================================
// All the settings of one run, with their defaults.
//
// cli.rs fills this in from the command line; tests build it directly with
// Config::new() and tweak the fields they care about.
//
// The small parse_* functions at the bottom are used by clap to validate
// "Name: value", "key=value" and "user:password" arguments.
// =============================================================================

use std::time::Duration;

use crate::error::{Error, Result};
use crate::pipeline::PipelineConfig;
use crate::report::OutputFormat;

/// Number of workers checking pages at the same time
pub const DEFAULT_CONCURRENCY: usize = 5;
/// Maximum number of sitemap entries to check
pub const DEFAULT_LIMIT: usize = 1000;
/// Worker heartbeat interval and pause between requests, in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 300;
/// How long a single HTTP request may take, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub sitemap_url: String,
    pub concurrency: usize,
    pub limit: usize,
    /// How long an idle worker waits before it logs a heartbeat
    pub idle_timeout: Duration,
    /// Pause a worker takes after each page
    pub throttle: Duration,
    pub request_timeout: Duration,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub basic_auth: Option<BasicAuth>,
    pub format: OutputFormat,
    /// Show a progress bar on stderr
    pub progress: bool,
}

impl Config {
    // Config with every setting at its default
    pub fn new(sitemap_url: impl Into<String>) -> Self {
        Config {
            sitemap_url: sitemap_url.into(),
            concurrency: DEFAULT_CONCURRENCY,
            limit: DEFAULT_LIMIT,
            idle_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            throttle: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            headers: Vec::new(),
            query: Vec::new(),
            basic_auth: None,
            format: OutputFormat::Table,
            progress: true,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(Error::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            concurrency: self.concurrency,
            idle_timeout: self.idle_timeout,
            throttle: self.throttle,
        }
    }
}

// "Accept: text/html" -> ("Accept", "text/html")
pub fn parse_header(s: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected 'Name: value', got '{}'", s))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name is empty in '{}'", s));
    }

    Ok((name.to_string(), value.trim().to_string()))
}

// "key=value" -> ("key", "value"), the value may be empty
pub fn parse_query_pair(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected 'key=value', got '{}'", s))?;

    if key.is_empty() {
        return Err(format!("query parameter name is empty in '{}'", s));
    }

    Ok((key.to_string(), value.to_string()))
}

// "user:password" or just "user"
pub fn parse_basic_auth(s: &str) -> std::result::Result<BasicAuth, String> {
    let (username, password) = match s.split_once(':') {
        Some((user, pass)) => (user, Some(pass.to_string())),
        None => (s, None),
    };

    if username.is_empty() {
        return Err("basic auth username is empty".to_string());
    }

    Ok(BasicAuth {
        username: username.to_string(),
        password,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("https://example.com/sitemap.xml");
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.limit, 1000);
        assert_eq!(config.idle_timeout, Duration::from_millis(300));
        assert_eq!(config.throttle, config.idle_timeout);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_is_invalid() {
        let mut config = Config::new("https://example.com/sitemap.xml");
        config.concurrency = 0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_pipeline_settings() {
        let mut config = Config::new("https://example.com/sitemap.xml");
        config.concurrency = 8;
        config.throttle = Duration::ZERO;

        let pipeline = config.pipeline();
        assert_eq!(pipeline.concurrency, 8);
        assert_eq!(pipeline.idle_timeout, Duration::from_millis(300));
        assert_eq!(pipeline.throttle, Duration::ZERO);
    }

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("Accept: text/html").unwrap(),
            ("Accept".to_string(), "text/html".to_string())
        );
        // Only the first colon splits
        assert_eq!(
            parse_header("X-Url:http://a").unwrap(),
            ("X-Url".to_string(), "http://a".to_string())
        );
        assert!(parse_header("no colon").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn test_parse_query_pair() {
        assert_eq!(
            parse_query_pair("preview=true").unwrap(),
            ("preview".to_string(), "true".to_string())
        );
        assert_eq!(
            parse_query_pair("flag=").unwrap(),
            ("flag".to_string(), String::new())
        );
        assert!(parse_query_pair("novalue").is_err());
        assert!(parse_query_pair("=x").is_err());
    }

    #[test]
    fn test_parse_basic_auth() {
        assert_eq!(
            parse_basic_auth("user:pa:ss").unwrap(),
            BasicAuth {
                username: "user".to_string(),
                password: Some("pa:ss".to_string()),
            }
        );
        assert_eq!(parse_basic_auth("user").unwrap().password, None);
        assert!(parse_basic_auth(":secret").is_err());
    }
}
