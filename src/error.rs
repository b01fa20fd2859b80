use std::time::Duration;

use thiserror::Error;

/// Everything that can go wrong while scraping the calendar.
///
/// Only `NavigationTimeout` on the initial page load aborts the run; every
/// other variant is logged at the record (or row) that raised it and the run
/// moves on.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("page failed to become ready within {0:?}")]
    NavigationTimeout(Duration),

    #[error("row missing required cell: {0}")]
    RowExtraction(&'static str),

    #[error("download failed for {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("PDF conversion failed: {0}")]
    Conversion(String),

    #[error("unrecognized date format: {0:?}")]
    DateParse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Browser(#[from] chromiumoxide::error::CdpError),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
