pub mod browser;
pub mod calendar;
pub mod convert;
pub mod download;
pub mod error;
pub mod pipeline;
pub mod resolve;
