//! HTTP access to the published tour sheet.
//!
//! `SheetSource` is the seam the service fetches through; `SheetClient` is
//! the reqwest-backed implementation used outside of tests.

pub mod client;
pub mod error;

pub use client::{SheetClient, SheetSource};
pub use error::FetchError;
