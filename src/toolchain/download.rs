//! Release artifact downloads.
//!
//! [`Downloader`] is the HTTP seam of the toolchain installers.
//! [`HttpDownloader`] talks to the network, [`DryRunDownloader`] only reports,
//! and [`RecordingDownloader`] serves canned bodies in tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};
use reqwest::blocking::Client;
use sha2::{Digest, Sha256};

use crate::error::{DotstrapError, Result};

/// Fetches release artifacts over HTTP(S).
pub trait Downloader {
    /// Write the body at `url` to `dest`, replacing any existing file.
    fn download(&self, url: &str, dest: &Path) -> Result<()>;

    /// Fetch a small text resource, such as a published checksum.
    fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Downloads with a blocking reqwest client.
pub struct HttpDownloader {
    client: Client,
    timeout: Duration,
}

impl HttpDownloader {
    /// Create a downloader with a 5-minute timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(300))
    }

    /// Create a downloader with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("dotstrap/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, timeout })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn get(&self, url: &str) -> anyhow::Result<reqwest::blocking::Response> {
        let response = self.client.get(url).send()?;
        if !response.status().is_success() {
            bail!("HTTP {}", response.status());
        }
        Ok(response)
    }

    fn download_inner(&self, url: &str, dest: &Path) -> anyhow::Result<()> {
        let mut response = self.get(url)?;
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = BufWriter::new(
            File::create(dest).with_context(|| format!("creating {}", dest.display()))?,
        );
        response.copy_to(&mut file)?;
        file.flush()?;
        Ok(())
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<()> {
        tracing::debug!("Downloading {} to {}", url, dest.display());
        self.download_inner(url, dest)
            .map_err(|e| DotstrapError::Download {
                url: url.to_string(),
                message: format!("{:#}", e),
            })
    }

    fn fetch_text(&self, url: &str) -> Result<String> {
        tracing::debug!("Fetching {}", url);
        self.get(url)
            .and_then(|r| Ok(r.text()?))
            .map_err(|e| DotstrapError::Download {
                url: url.to_string(),
                message: format!("{:#}", e),
            })
    }
}

/// Reports downloads without performing them.
#[derive(Debug, Default)]
pub struct DryRunDownloader;

impl Downloader for DryRunDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<()> {
        println!("  [dry-run] download {} -> {}", url, dest.display());
        Ok(())
    }

    fn fetch_text(&self, url: &str) -> Result<String> {
        println!("  [dry-run] fetch {}", url);
        Ok(String::new())
    }
}

/// Serves registered bodies and records every request.
///
/// Unregistered URLs fail like an HTTP 404.
#[derive(Debug, Default)]
pub struct RecordingDownloader {
    bodies: RefCell<HashMap<String, Vec<u8>>>,
    requests: RefCell<Vec<String>>,
}

impl RecordingDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the body returned for `url`.
    pub fn serve(&self, url: &str, body: impl Into<Vec<u8>>) {
        self.bodies.borrow_mut().insert(url.to_string(), body.into());
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    fn body(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.borrow_mut().push(url.to_string());
        self.bodies
            .borrow()
            .get(url)
            .cloned()
            .ok_or_else(|| DotstrapError::Download {
                url: url.to_string(),
                message: "HTTP 404 Not Found".to_string(),
            })
    }
}

impl Downloader for RecordingDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<()> {
        let body = self.body(url)?;
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(dest, body)?;
        Ok(())
    }

    fn fetch_text(&self, url: &str) -> Result<String> {
        let body = self.body(url)?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Hex-encoded SHA-256 of a file.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 64 * 1024];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// The digest in a published checksum file (`<hex>` or `<hex>  <filename>`).
pub fn parse_checksum(published: &str) -> Option<String> {
    published
        .split_whitespace()
        .next()
        .filter(|digest| digest.len() == 64 && digest.chars().all(|c| c.is_ascii_hexdigit()))
        .map(|digest| digest.to_ascii_lowercase())
}

/// Compare a downloaded file with the checksum published at `<url>.sha256`.
///
/// On mismatch the file is removed.
pub fn verify_download(downloader: &dyn Downloader, url: &str, file: &Path) -> Result<()> {
    let checksum_url = format!("{}.sha256", url);
    let published = downloader.fetch_text(&checksum_url)?;
    let expected = parse_checksum(&published).ok_or_else(|| DotstrapError::Download {
        url: checksum_url.clone(),
        message: "no SHA-256 digest in response".to_string(),
    })?;

    let actual = sha256_file(file)?;
    if actual != expected {
        let _ = fs::remove_file(file);
        return Err(DotstrapError::ChecksumMismatch {
            url: url.to_string(),
            expected,
            actual,
        });
    }

    tracing::debug!("Checksum verified for {}", url);
    Ok(())
}
