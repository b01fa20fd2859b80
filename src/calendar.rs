use chromiumoxide::{Element, Page};
use tracing::{info, warn};
use url::Url;

use crate::browser::{Pager, Session};
use crate::error::{Result, ScrapeError};

/// Titles containing this substring are in-scope meetings.
pub const IN_SCOPE_MARKER: &str = "Board of Supervisors";

const ROW_SELECTOR: &str = "table.views-table tbody tr";
const DATE_CELL: &str = "td.views-field-field-event-date";
const TITLE_CELL: &str = "td.views-field-title a";
const LOCATION_CELL: &str = "td.views-field-field-event-location-premise";

/// One row of scraped calendar data.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub date_time: String,
    pub event: String,
    pub location: String,
    pub link: String,
}

/// Walk every results page and return the accumulated records.
///
/// The first page must already be loaded. Pagination exhaustion (no control,
/// disabled control, or a wait timeout) ends the loop normally.
pub async fn collect_events(session: &Session) -> Vec<EventRecord> {
    let mut events = extract_current_page(session).await;
    let mut pages = 1usize;
    while session.next_page().await == Pager::Advanced {
        pages += 1;
        events.extend(extract_current_page(session).await);
    }
    info!("Collected {} events across {} pages", events.len(), pages);
    events
}

async fn extract_current_page(session: &Session) -> Vec<EventRecord> {
    let base = session
        .current_url()
        .await
        .and_then(|u| Url::parse(&u).ok());
    extract_page(session.page(), base.as_ref()).await
}

/// Read all data rows on the loaded page. A malformed row is logged and
/// skipped; it never aborts the page.
pub async fn extract_page(page: &Page, base: Option<&Url>) -> Vec<EventRecord> {
    let rows = match page.find_elements(ROW_SELECTOR).await {
        Ok(rows) => rows,
        Err(e) => {
            warn!("No data rows found on page: {e}");
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for row in rows {
        match extract_row(&row, base).await {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping row: {e}"),
        }
    }
    records
}

async fn extract_row(row: &Element, base: Option<&Url>) -> Result<EventRecord> {
    let date_time = cell_text(row, DATE_CELL).await;
    let (event, link) = match row.find_element(TITLE_CELL).await {
        Ok(anchor) => {
            let text = anchor.inner_text().await.ok().flatten();
            let href = anchor.attribute("href").await.ok().flatten();
            (text, href.map(|h| absolutize(base, &h)))
        }
        Err(_) => (None, None),
    };
    let location = cell_text(row, LOCATION_CELL).await;
    build_record(date_time, event, location, link)
}

async fn cell_text(row: &Element, selector: &str) -> Option<String> {
    row.find_element(selector).await.ok()?.inner_text().await.ok().flatten()
}

/// Assemble a record from raw cell values. Date, title and link are required;
/// a missing location keeps the record with an empty field.
pub fn build_record(
    date_time: Option<String>,
    event: Option<String>,
    location: Option<String>,
    link: Option<String>,
) -> Result<EventRecord> {
    let date_time = date_time.ok_or(ScrapeError::RowExtraction("event date"))?;
    let event = event.ok_or(ScrapeError::RowExtraction("title"))?;
    let link = link.ok_or(ScrapeError::RowExtraction("link"))?;
    Ok(EventRecord {
        date_time,
        event,
        location: location.unwrap_or_default(),
        link,
    })
}

/// Anchor hrefs come back verbatim; resolve relative ones against the page URL.
pub fn absolutize(base: Option<&Url>, href: &str) -> String {
    match base {
        Some(base) => base
            .join(href)
            .map(Into::into)
            .unwrap_or_else(|_| href.to_string()),
        None => href.to_string(),
    }
}

/// Retain only in-scope meetings, preserving order.
pub fn filter_in_scope(events: Vec<EventRecord>) -> Vec<EventRecord> {
    events
        .into_iter()
        .filter(|e| e.event.contains(IN_SCOPE_MARKER))
        .collect()
}

// ── Tests ──
