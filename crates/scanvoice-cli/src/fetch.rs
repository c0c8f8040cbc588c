//! Remote PDF retrieval.
//!
//! Invoices frequently arrive as Google Drive share links; those are
//! rewritten to the direct-download endpoint before fetching. Any other
//! http(s) URL is downloaded as-is.

use std::io::Write;

use anyhow::Context;
use futures_util::StreamExt;
use lazy_static::lazy_static;
use regex::Regex;
use tempfile::NamedTempFile;
use tracing::{debug, info};

lazy_static! {
    static ref DRIVE_PATH_ID: Regex = Regex::new(r"/d/([a-zA-Z0-9_-]+)").unwrap();
    static ref DRIVE_QUERY_ID: Regex = Regex::new(r"id=([a-zA-Z0-9_-]+)").unwrap();
}

/// True when the input names a remote document rather than a local path.
pub fn is_remote(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Rewrite a Google Drive share link to its direct-download form. Other
/// URLs pass through unchanged.
pub fn resolve_url(url: &str) -> anyhow::Result<String> {
    if !url.contains("drive.google.com") {
        return Ok(url.to_string());
    }

    let file_id = DRIVE_PATH_ID
        .captures(url)
        .or_else(|| DRIVE_QUERY_ID.captures(url))
        .map(|caps| caps[1].to_string())
        .context("invalid Drive link: no file id found")?;

    Ok(format!(
        "https://drive.google.com/uc?export=download&id={}",
        file_id
    ))
}

/// Stream a PDF to a temporary file. The file is removed when the
/// returned handle drops, so the caller keeps it alive for the duration
/// of the run.
pub async fn download_pdf(url: &str) -> anyhow::Result<NamedTempFile> {
    let download_url = resolve_url(url)?;
    debug!("Downloading {}", download_url);

    let response = reqwest::get(&download_url).await?;
    if !response.status().is_success() {
        anyhow::bail!("download failed: HTTP {}", response.status());
    }

    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile()?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)?;
        downloaded += chunk.len() as u64;
    }
    file.flush()?;

    info!("Downloaded {} bytes to {}", downloaded, file.path().display());
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_drive_path_link() {
        let url = "https://drive.google.com/file/d/1AbC_d-9xYz/view?usp=sharing";
        assert_eq!(
            resolve_url(url).unwrap(),
            "https://drive.google.com/uc?export=download&id=1AbC_d-9xYz"
        );
    }

    #[test]
    fn test_resolve_drive_query_link() {
        let url = "https://drive.google.com/open?id=1AbC_d-9xYz";
        assert_eq!(
            resolve_url(url).unwrap(),
            "https://drive.google.com/uc?export=download&id=1AbC_d-9xYz"
        );
    }

    #[test]
    fn test_non_drive_url_passes_through() {
        let url = "https://example.com/invoice.pdf";
        assert_eq!(resolve_url(url).unwrap(), url);
    }

    #[test]
    fn test_malformed_drive_link_errors() {
        assert!(resolve_url("https://drive.google.com/nothing-here").is_err());
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com/a.pdf"));
        assert!(is_remote("http://example.com/a.pdf"));
        assert!(!is_remote("./invoices/a.pdf"));
    }
}
