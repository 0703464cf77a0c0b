use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;

use crate::error::HolidayError;
use crate::model::{normalize_year, HolidayMap};
use crate::repository::transport::HolidayTransport;

/// Cooperative cancellation flag for an in-flight holiday fetch.
///
/// The caller holds the token and cancels it when it loses interest (e.g.
/// the focus year changed). The fetch side checks it before any state
/// mutation; a cancelled fetch is a silent no-op, never an error surfaced
/// to the user.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Fetch and normalize one year of holiday data, bypassing any cache.
///
/// Pure with respect to repository state, so it can run on a worker thread
/// while cache mutation stays on the owning thread.
pub fn fetch_year<T: HolidayTransport>(transport: &T, year: i32) -> Result<HolidayMap, HolidayError> {
    let response = transport.fetch_raw(year)?;
    if response.code != 0 {
        return Err(HolidayError::Upstream {
            code: response.code,
        });
    }
    Ok(normalize_year(response.holiday))
}

/// Per-year holiday store with a process-lifetime cache.
///
/// Entries are populated lazily on first request and never evicted. The
/// cache is only written on a fully successful, non-cancelled fetch, so
/// any failure leaves the year open for a retry.
pub struct HolidayRepository<T> {
    transport: T,
    cache: HashMap<i32, Arc<HolidayMap>>,
}

impl<T: HolidayTransport> HolidayRepository<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            cache: HashMap::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Cache lookup without network access.
    pub fn cached(&self, year: i32) -> Option<Arc<HolidayMap>> {
        self.cache.get(&year).cloned()
    }

    /// Store a completed fetch result. Last write wins for duplicate
    /// concurrent fetches of the same year; both normalized the same
    /// remote data, so the overwrite is idempotent.
    pub fn store(&mut self, year: i32, map: HolidayMap) -> Arc<HolidayMap> {
        let map = Arc::new(map);
        self.cache.insert(year, Arc::clone(&map));
        map
    }

    /// Resolve a year's holiday map: cache hit, or one outbound fetch.
    ///
    /// A token cancelled before completion suppresses the cache write and
    /// reports [`HolidayError::Cancelled`], which callers drop silently.
    pub fn fetch_holidays(
        &mut self,
        year: i32,
        token: &CancelToken,
    ) -> Result<Arc<HolidayMap>, HolidayError> {
        if let Some(hit) = self.cached(year) {
            debug!("holiday cache hit for {year}");
            return Ok(hit);
        }

        debug!("holiday cache miss for {year}, fetching");
        let map = fetch_year(&self.transport, year)?;

        if token.is_cancelled() {
            debug!("holiday fetch for {year} cancelled, dropping result");
            return Err(HolidayError::Cancelled);
        }

        Ok(self.store(year, map))
    }
}
