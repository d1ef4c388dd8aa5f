//! Streaming HTTP downloads to disk.

use std::{fs::File, io::Write, path::Path};

use anyhow::{anyhow, Result};
use futures::StreamExt;

/// Downloads the resource at `url` and writes it to `file_path` in chunks.
/// Returns the number of bytes written.
pub async fn download_file(url: &str, file_path: &Path) -> Result<u64> {
    let response = reqwest::get(url).await?;

    if !response.status().is_success() {
        return Err(anyhow!("failed to download {}: HTTP {}", url, response.status()));
    }

    let mut file = File::create(file_path)?;
    let mut written = 0u64;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)?;
        written += chunk.len() as u64;
    }

    Ok(written)
}
