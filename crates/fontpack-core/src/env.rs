use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use url::Url;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment-driven configuration for the remote manifest source.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub location: SourceLocation,
    pub request_timeout: Duration,
}

impl SourceConfig {
    /// Build from a locator string such as `https://updates.example.org/fonts`
    /// or a local directory path.
    pub fn from_value(value: &str) -> Result<Self> {
        let location = SourceLocation::from_value(value)?;
        let kind = match &location {
            SourceLocation::Remote(_) => SourceKind::Http,
            SourceLocation::Dir(_) => SourceKind::Fs,
        };
        Ok(Self {
            kind,
            location,
            request_timeout: request_timeout_from_env(),
        })
    }

    /// Read `FONTPACK_SOURCE` from the environment, if set.
    pub fn from_env() -> Result<Option<Self>> {
        match std::env::var("FONTPACK_SOURCE") {
            Ok(value) if !value.trim().is_empty() => Self::from_value(value.trim()).map(Some),
            _ => Ok(None),
        }
    }
}

fn request_timeout_from_env() -> Duration {
    std::env::var("FONTPACK_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
}

/// Location manifests are fetched from (supports directories and HTTP/S URLs).
#[derive(Debug, Clone)]
pub enum SourceLocation {
    Dir(PathBuf),
    Remote(Url),
}

impl SourceLocation {
    pub fn from_value(value: &str) -> Result<Self> {
        if value.starts_with("http://") || value.starts_with("https://") {
            let url = Url::parse(value).context("FONTPACK_SOURCE is not a valid URL")?;
            return Ok(Self::Remote(url));
        }
        if value.starts_with("file://") {
            let url = Url::parse(value).context("FONTPACK_SOURCE is not a valid file:// URL")?;
            let path = url
                .to_file_path()
                .map_err(|_| anyhow!("FONTPACK_SOURCE points to an invalid file URI"))?;
            return Ok(Self::Dir(path));
        }
        Ok(Self::Dir(PathBuf::from(value)))
    }

    pub fn display(&self) -> String {
        match self {
            Self::Dir(path) => path.display().to_string(),
            Self::Remote(url) => url.to_string(),
        }
    }
}

/// Supported manifest source schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Fs,
    Http,
}

impl SourceKind {
    pub fn scheme(self) -> &'static str {
        match self {
            Self::Fs => "fs",
            Self::Http => "http",
        }
    }
}

impl FromStr for SourceKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "fs" => Ok(Self::Fs),
            "http" | "https" => Ok(Self::Http),
            other => bail!("unsupported FONTPACK_SOURCE kind `{other}`"),
        }
    }
}
