//! Data models for tour sheet entities.
//!
//! - `TourRecord`: one sheet row as an ordered column -> value mapping
//! - `TourStats`, `CacheStatus`: cache reporting

pub mod record;
pub mod stats;

pub use record::{TourRecord, ID_FIELD, WHATSAPP_LINK_FIELD};
pub use stats::{CacheStatus, TourStats};
