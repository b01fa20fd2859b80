use std::path::Path;

use futures::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{Result, ScrapeError};

/// Stream a GET response to `dest`, creating or overwriting the file.
///
/// Success is HTTP 200 exactly; a non-200 status fails before anything is
/// written. A transport fault mid-stream removes the partial file so a failed
/// record leaves no artifact.
pub async fn fetch(client: &reqwest::Client, url: &str, dest: &Path) -> Result<()> {
    let response = client.get(url).send().await.map_err(|e| ScrapeError::Download {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(ScrapeError::Download {
            url: url.to_string(),
            reason: format!("status code {status}"),
        });
    }

    let mut file = fs::File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut written = 0usize;
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(bytes) => {
                file.write_all(&bytes).await?;
                written += bytes.len();
            }
            Err(e) => {
                drop(file);
                let _ = fs::remove_file(dest).await;
                return Err(ScrapeError::Download {
                    url: url.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }
    file.flush().await?;

    debug!("Fetched {written} bytes from {url}");
    Ok(())
}
