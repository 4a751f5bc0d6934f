//! Core library for tourcache.
//!
//! Fetches the published tour sheet (CSV over HTTP), parses it into
//! loosely-typed tour records, and serves them from a short-lived in-memory
//! cache that falls back to the last good snapshot when the sheet is
//! unreachable.
//!
//! Front ends construct a single [`TourService`] at startup and share it.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod service;
pub mod utils;

pub use api::{FetchError, SheetClient, SheetSource};
pub use cache::{CachedData, TourCache};
pub use config::Config;
pub use error::TourError;
pub use models::{CacheStatus, TourRecord, TourStats};
pub use parser::{CsvParser, ParseError, ParsedSheet, ParserOptions, RowDiagnostic};
pub use service::TourService;
