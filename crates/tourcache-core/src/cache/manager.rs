use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{CacheStatus, TourRecord, TourStats};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    /// Age in milliseconds, clamped at zero for clock skew
    pub fn age_millis(&self) -> i64 {
        (Utc::now() - self.cached_at).num_milliseconds().max(0)
    }

    pub fn age_display(&self) -> String {
        let seconds = self.age_millis() / 1000;
        if seconds < 60 {
            "just now".to_string()
        } else if seconds < 3600 {
            format!("{}m ago", seconds / 60)
        } else if seconds < 86_400 {
            format!("{}h ago", seconds / 3600)
        } else {
            format!("{}d ago", seconds / 86_400)
        }
    }

    /// Fresh while strictly younger than `expiry`
    pub fn is_fresh(&self, expiry: Duration) -> bool {
        let expiry_millis = i64::try_from(expiry.as_millis()).unwrap_or(i64::MAX);
        self.age_millis() < expiry_millis
    }
}

/// Holder for the single tracked tour snapshot.
///
/// Locks are only held for clone/replace, never across an await point.
#[derive(Debug, Default)]
pub struct TourCache {
    entry: RwLock<Option<CachedData<Vec<TourRecord>>>>,
}

impl TourCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot regardless of age
    pub fn load(&self) -> Option<CachedData<Vec<TourRecord>>> {
        self.entry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Records of the current snapshot, only if still fresh
    pub fn load_fresh(&self, expiry: Duration) -> Option<Vec<TourRecord>> {
        let guard = self.entry.read().unwrap_or_else(PoisonError::into_inner);
        guard
            .as_ref()
            .filter(|cached| cached.is_fresh(expiry))
            .map(|cached| cached.data.clone())
    }

    /// Replace the snapshot wholesale
    pub fn save(&self, records: Vec<TourRecord>) {
        let mut guard = self.entry.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(CachedData::new(records));
    }

    pub fn clear(&self) {
        let mut guard = self.entry.write().unwrap_or_else(PoisonError::into_inner);
        if guard.take().is_some() {
            debug!("Tour cache cleared");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    pub fn stats(&self) -> TourStats {
        let guard = self.entry.read().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(cached) => TourStats {
                total_records: cached.data.len(),
                cache_status: CacheStatus::Active,
                cache_age_millis: cached.age_millis(),
                last_updated: Some(cached.cached_at),
            },
            None => TourStats::empty(),
        }
    }

    /// Shift the snapshot's timestamp into the past
    #[cfg(test)]
    pub(crate) fn backdate(&self, by: chrono::Duration) {
        let mut guard = self.entry.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = guard.as_mut() {
            cached.cached_at = cached.cached_at - by;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIVE_MINUTES: Duration = Duration::from_secs(300);

    fn records(n: usize) -> Vec<TourRecord> {
        (1..=n)
            .map(|i| {
                let mut record = TourRecord::new(i, Utc::now());
                record.set("Name", format!("Tour {}", i));
                record
            })
            .collect()
    }

    #[test]
    fn test_cached_data_age_display_just_now() {
        let cached = CachedData::new(vec![1, 2, 3]);
        assert_eq!(cached.age_display(), "just now");
    }

    #[test]
    fn test_cached_data_age_display_units() {
        let mut cached = CachedData::new(());
        cached.cached_at = Utc::now() - chrono::Duration::minutes(7);
        assert_eq!(cached.age_display(), "7m ago");
        cached.cached_at = Utc::now() - chrono::Duration::hours(3);
        assert_eq!(cached.age_display(), "3h ago");
        cached.cached_at = Utc::now() - chrono::Duration::days(2);
        assert_eq!(cached.age_display(), "2d ago");
    }

    #[test]
    fn test_cached_data_freshness_boundary() {
        let fresh = CachedData::new(vec![1]);
        assert!(fresh.is_fresh(FIVE_MINUTES));

        let mut old = CachedData::new(vec![1]);
        old.cached_at = Utc::now() - chrono::Duration::minutes(5);
        assert!(!old.is_fresh(FIVE_MINUTES));
    }

    #[test]
    fn test_cached_data_future_timestamp_is_fresh() {
        let mut skewed = CachedData::new(vec![1]);
        skewed.cached_at = Utc::now() + chrono::Duration::minutes(1);
        assert_eq!(skewed.age_millis(), 0);
        assert!(skewed.is_fresh(FIVE_MINUTES));
    }

    #[test]
    fn test_tour_cache_lifecycle() {
        let cache = TourCache::new();
        assert!(cache.is_empty());
        assert!(cache.load().is_none());
        assert!(cache.load_fresh(FIVE_MINUTES).is_none());

        cache.save(records(2));
        assert_eq!(cache.load_fresh(FIVE_MINUTES).map(|r| r.len()), Some(2));

        cache.save(records(3));
        assert_eq!(cache.load().map(|c| c.data.len()), Some(3));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expired_snapshot_still_loadable() {
        let cache = TourCache::new();
        cache.save(records(1));
        cache.backdate(chrono::Duration::minutes(10));

        assert!(cache.load_fresh(FIVE_MINUTES).is_none());
        assert_eq!(cache.load().map(|c| c.data.len()), Some(1));
    }

    #[test]
    fn test_stats() {
        let cache = TourCache::new();
        let stats = cache.stats();
        assert_eq!(stats.cache_status, CacheStatus::Empty);
        assert_eq!(stats.total_records, 0);
        assert_eq!(stats.cache_age_millis, 0);

        cache.save(records(4));
        cache.backdate(chrono::Duration::seconds(30));
        let stats = cache.stats();
        assert_eq!(stats.cache_status, CacheStatus::Active);
        assert_eq!(stats.total_records, 4);
        assert!(stats.cache_age_millis >= 30_000);
        assert!(stats.last_updated.is_some());
    }
}
