//! Tour cache service.
//!
//! `TourService` is built once at startup and shared by every caller. It
//! serves tours from the in-memory snapshot while that is fresh, refreshes
//! from the sheet when it is not, and falls back to the last snapshot
//! (however old) when a refresh fails.

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::api::{FetchError, SheetClient, SheetSource};
use crate::cache::TourCache;
use crate::config::Config;
use crate::error::TourError;
use crate::models::{TourRecord, TourStats};
use crate::parser::{CsvParser, RowDiagnostic};
use crate::utils::contains_ignore_case;

pub struct TourService<S = SheetClient> {
    config: Config,
    parser: CsvParser,
    source: S,
    cache: TourCache,
    diagnostics: RwLock<Vec<RowDiagnostic>>,
    /// Held for the duration of a remote fetch so only one is in flight
    fetch_lock: Mutex<()>,
}

impl TourService<SheetClient> {
    /// Create a service that fetches over HTTP
    pub fn new(config: Config) -> Result<Self, TourError> {
        let source = SheetClient::new(&config)?;
        Ok(Self::with_source(config, source))
    }
}

impl<S: SheetSource> TourService<S> {
    pub fn with_source(config: Config, source: S) -> Self {
        Self {
            parser: CsvParser::new(config.parser_options()),
            config,
            source,
            cache: TourCache::new(),
            diagnostics: RwLock::new(Vec::new()),
            fetch_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// All tours, from cache while fresh, otherwise from the sheet.
    ///
    /// When the sheet cannot be fetched or parsed, the previous snapshot is
    /// returned if there is one; the error only reaches the caller on a cold
    /// cache.
    pub async fn fetch_tours(&self) -> Result<Vec<TourRecord>, TourError> {
        let expiry = self.config.cache_expiry();
        if let Some(records) = self.cache.load_fresh(expiry) {
            debug!(tours = records.len(), "Using cached tour data");
            return Ok(records);
        }

        let _guard = self.fetch_lock.lock().await;

        // Another caller may have refreshed while we waited
        if let Some(records) = self.cache.load_fresh(expiry) {
            debug!(tours = records.len(), "Using tour data fetched while waiting");
            return Ok(records);
        }

        match self.refresh().await {
            Ok(records) => Ok(records),
            Err(e) => {
                error!(error = %e, "Failed to fetch tour data");
                match self.cache.load() {
                    Some(stale) => {
                        warn!(
                            age = %stale.age_display(),
                            tours = stale.data.len(),
                            "Using expired cache due to fetch error"
                        );
                        Ok(stale.data)
                    }
                    None => Err(e),
                }
            }
        }
    }

    /// Tours with any value containing `query`, ignoring case.
    /// A blank query returns everything.
    pub async fn search_tours(&self, query: &str) -> Result<Vec<TourRecord>, TourError> {
        let tours = self.fetch_tours().await?;

        if query.trim().is_empty() {
            return Ok(tours);
        }

        let needle = query.to_lowercase();
        Ok(tours
            .into_iter()
            .filter(|tour| tour.values().any(|value| contains_ignore_case(value, &needle)))
            .collect())
    }

    /// Look up a tour by row id or by its `ID` column
    pub async fn get_tour_by_id(&self, id: &str) -> Result<Option<TourRecord>, TourError> {
        let tours = self.fetch_tours().await?;
        Ok(tours.into_iter().find(|tour| tour.matches_id(id)))
    }

    /// Snapshot of the cache; never triggers a fetch
    pub fn stats(&self) -> TourStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
        self.diagnostics
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        info!("Tour cache cleared");
    }

    /// Rows skipped by the most recent successful parse
    pub fn last_diagnostics(&self) -> Vec<RowDiagnostic> {
        self.diagnostics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn refresh(&self) -> Result<Vec<TourRecord>, TourError> {
        let url = self
            .config
            .sheet_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| TourError::Configuration("SHEET_URL is not configured".to_string()))?;

        info!(url = url, "Fetching fresh tour data");

        let timeout = Duration::from_secs(self.config.fetch_timeout_secs);
        let body = tokio::time::timeout(timeout, self.source.fetch_text(url))
            .await
            .map_err(|_| FetchError::Timeout)??;

        let min = self.config.min_body_bytes;
        if body.trim().is_empty() || body.len() < min {
            return Err(FetchError::BodyTooShort { len: body.len(), min }.into());
        }
        debug!(bytes = body.len(), "Fetched CSV data");

        let sheet = self.parser.parse(&body)?;
        info!(
            tours = sheet.records.len(),
            skipped = sheet.diagnostics.len(),
            "Processed tour sheet"
        );

        self.cache.save(sheet.records.clone());
        *self
            .diagnostics
            .write()
            .unwrap_or_else(PoisonError::into_inner) = sheet.diagnostics;

        Ok(sheet.records)
    }
}
