use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Active,
    Empty,
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheStatus::Active => write!(f, "active"),
            CacheStatus::Empty => write!(f, "empty"),
        }
    }
}

/// Snapshot of the tour cache
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
pub struct TourStats {
    #[serde(rename = "totalRecords")]
    pub total_records: usize,
    #[serde(rename = "cacheStatus")]
    pub cache_status: CacheStatus,
    #[serde(rename = "cacheAgeMillis")]
    pub cache_age_millis: i64,
    /// When the cached snapshot was fetched
    #[serde(rename = "lastUpdated")]
    #[cfg_attr(feature = "ts", ts(type = "string | null"))]
    pub last_updated: Option<DateTime<Utc>>,
}

impl TourStats {
    pub fn empty() -> Self {
        Self {
            total_records: 0,
            cache_status: CacheStatus::Empty,
            cache_age_millis: 0,
            last_updated: None,
        }
    }
}
