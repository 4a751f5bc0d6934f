//! In-memory caching for the tour sheet.
//!
//! `TourCache` holds at most one `CachedData` snapshot of parsed tours.
//! A snapshot is fresh for the configured expiry (5 minutes by default);
//! expired snapshots are kept so they can be served when a refresh fails.

pub mod manager;

pub use manager::{CachedData, TourCache};
