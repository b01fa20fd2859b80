use std::path::Path;

use url::Url;

use crate::error::{Result, ScrapeError};

/// What the document link's path extension says the target is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Pdf,
    Html,
    Other,
}

/// Classify by the URL path's extension, ignoring query strings. Unparseable
/// links fall back to inspecting the raw string.
pub fn classify_link(link: &str) -> LinkKind {
    let path = Url::parse(link)
        .map(|u| u.path().to_ascii_lowercase())
        .unwrap_or_else(|_| link.to_ascii_lowercase());

    if path.ends_with(".pdf") {
        LinkKind::Pdf
    } else if path.ends_with(".html") || path.ends_with(".htm") {
        LinkKind::Html
    } else {
        LinkKind::Other
    }
}

/// Extract the text layer of a PDF on disk and write it to `dest` as one
/// minimal HTML document, one block per source page in source order.
///
/// Extraction runs before anything is written, so a malformed source leaves
/// no output file. `src == dest` converts in place.
pub fn pdf_to_html(src: &Path, dest: &Path) -> Result<()> {
    let data = std::fs::read(src)?;
    let text = pdf_extract::extract_text_from_mem(&data)
        .map_err(|e| ScrapeError::Conversion(e.to_string()))?;
    std::fs::write(dest, render_html(&text))?;
    Ok(())
}

/// Page breaks arrive as form feeds in the extracted text.
fn render_html(text: &str) -> String {
    let mut html = String::from("<html><body>");
    for page in text.split('\x0c') {
        if page.is_empty() {
            continue;
        }
        html.push_str("<div class=\"page\"><pre>");
        html.push_str(&escape(page));
        html.push_str("</pre></div>");
    }
    html.push_str("</body></html>");
    html
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ── Tests ──
