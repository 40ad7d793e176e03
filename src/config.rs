use clap::Parser;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name} '{value}': {source}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        source: url::ParseError,
    },
    #[error("{name} must use http or https, got '{scheme}'")]
    UnsupportedScheme { name: &'static str, scheme: String },
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Upload a batch of files and fetch the processed result")]
pub struct Cli {
    /// Endpoint that hands out pre-signed upload URLs for a batch
    #[arg(long, env = "BATCH_UPLOADER_ALLOCATION_URL")]
    pub allocation_url: String,

    /// Endpoint that processes an uploaded folder and returns a download link
    #[arg(long, env = "BATCH_UPLOADER_PROCESSING_URL")]
    pub processing_url: String,

    /// Seconds to wait when connecting to any endpoint
    #[arg(long, env = "BATCH_UPLOADER_CONNECT_TIMEOUT_SECS", default_value_t = 30)]
    pub connect_timeout_secs: u64,

    /// Log filter, e.g. `info` or `batch_uploader=debug`
    #[arg(long, env = "BATCH_UPLOADER_LOG", default_value = "info")]
    pub log_level: String,
}

/// Where the two remote services live.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub allocation_url: Url,
    pub processing_url: Url,
    pub connect_timeout: Duration,
}

impl EndpointConfig {
    pub fn new(allocation_url: Url, processing_url: Url) -> Self {
        Self {
            allocation_url,
            processing_url,
            connect_timeout: Duration::from_secs(30),
        }
    }
}

impl Cli {
    pub fn endpoints(&self) -> Result<EndpointConfig, ConfigError> {
        Ok(EndpointConfig {
            allocation_url: parse_endpoint("allocation URL", &self.allocation_url)?,
            processing_url: parse_endpoint("processing URL", &self.processing_url)?,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        })
    }
}

fn parse_endpoint(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::UnsupportedScheme {
            name,
            scheme: scheme.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_endpoints_from_arguments() {
        let cli = Cli::try_parse_from([
            "batch-uploader",
            "--allocation-url",
            "https://alloc.example.com/",
            "--processing-url",
            "https://process.example.com/",
            "--connect-timeout-secs",
            "5",
        ])
        .unwrap();

        let endpoints = cli.endpoints().unwrap();
        assert_eq!(endpoints.allocation_url.as_str(), "https://alloc.example.com/");
        assert_eq!(endpoints.processing_url.as_str(), "https://process.example.com/");
        assert_eq!(endpoints.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_malformed_urls() {
        let err = parse_endpoint("allocation URL", "not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { name: "allocation URL", .. }));
    }

    #[test]
    fn rejects_non_http_schemes() {
        let err = parse_endpoint("processing URL", "ftp://files.example.com").unwrap_err();
        assert_eq!(
            err.to_string(),
            "processing URL must use http or https, got 'ftp'"
        );
    }
}
