use std::path::Path;

use tracing::{debug, info};

use crate::calendar::EventRecord;
use crate::convert::{self, LinkKind};
use crate::download;
use crate::error::Result;
use crate::resolve;

/// Fetch one meeting document and land it at its resolved HTML path.
///
/// PDF links go through an intermediate `.pdf` next to the destination, which
/// is removed whether or not conversion succeeds. HTML links are stored as-is.
/// Anything else is downloaded and then converted in place, which handles
/// servers that serve PDFs without a `.pdf` suffix; the same attempt is made
/// on any other non-HTML document.
pub async fn process_event(
    client: &reqwest::Client,
    output_dir: &Path,
    event: &EventRecord,
    doc_kind: &str,
) -> Result<()> {
    let resolved = resolve::resolve(output_dir, &event.date_time, &event.event, doc_kind)?;
    tokio::fs::create_dir_all(&resolved.dir).await?;

    match convert::classify_link(&event.link) {
        LinkKind::Pdf => {
            let pdf_path = resolved.path.with_extension("pdf");
            download::fetch(client, &event.link, &pdf_path).await?;
            let converted = convert::pdf_to_html(&pdf_path, &resolved.path);
            let _ = tokio::fs::remove_file(&pdf_path).await;
            converted?;
        }
        LinkKind::Html => {
            download::fetch(client, &event.link, &resolved.path).await?;
            debug!("Stored HTML document from {}", event.link);
        }
        LinkKind::Other => {
            download::fetch(client, &event.link, &resolved.path).await?;
            convert::pdf_to_html(&resolved.path, &resolved.path)?;
        }
    }

    info!("Saved {}", resolved.path.display());
    Ok(())
}
