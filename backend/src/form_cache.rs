// Time-boxed payment form snapshot, so input survives a locale switch

use chrono::Duration;

use crate::clock::{Clock, SystemClock};
use crate::models::{CachedForm, FormFields};
use crate::storage::KeyValueStore;

pub const FORM_CACHE_KEY: &str = "ezyba_form_data";

pub fn default_ttl() -> Duration {
    Duration::minutes(10)
}

/// Form snapshot cache over a persistent store.
///
/// Nothing here returns an error: a store that cannot be read or written
/// behaves as if no snapshot existed.
pub struct FormCache<S, C = SystemClock> {
    store: S,
    clock: C,
    ttl: Duration,
}

impl<S: KeyValueStore> FormCache<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock, default_ttl())
    }
}

impl<S: KeyValueStore, C: Clock> FormCache<S, C> {
    pub fn with_clock(store: S, clock: C, ttl: Duration) -> Self {
        Self { store, clock, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn save(&self, fields: &FormFields) {
        let now = self.clock.now();
        let Some(expires) = now.checked_add_signed(self.ttl) else {
            log::warn!("Form cache TTL {} is out of range; not saving", self.ttl);
            return;
        };
        let snapshot = CachedForm {
            fields: fields.clone(),
            created_at: now.timestamp_millis(),
            expires_at: expires.timestamp_millis(),
        };

        let raw = match serde_json::to_string(&snapshot) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Failed to encode form data: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(FORM_CACHE_KEY, &raw) {
            log::warn!("Failed to save form data: {}", e);
        }
    }

    pub fn load(&self) -> Option<FormFields> {
        self.read_fresh().map(|snapshot| snapshot.fields)
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove(FORM_CACHE_KEY) {
            log::warn!("Failed to clear form data: {}", e);
        }
    }

    /// Evicts a stale or unreadable snapshot; returns whether one was removed.
    pub fn purge_if_expired(&self) -> bool {
        let raw = match self.store.get(FORM_CACHE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                log::warn!("Failed to read form data: {}", e);
                return false;
            }
        };

        let stale = match serde_json::from_str::<CachedForm>(&raw) {
            Ok(snapshot) => self.is_expired(&snapshot),
            Err(_) => true,
        };
        if stale {
            self.clear();
        }
        stale
    }

    fn read_fresh(&self) -> Option<CachedForm> {
        let raw = match self.store.get(FORM_CACHE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("Failed to load form data: {}", e);
                return None;
            }
        };

        let snapshot: CachedForm = match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("Discarding unreadable form data: {}", e);
                self.clear();
                return None;
            }
        };

        if self.is_expired(&snapshot) {
            self.clear();
            return None;
        }
        Some(snapshot)
    }

    fn is_expired(&self, snapshot: &CachedForm) -> bool {
        self.clock.now().timestamp_millis() > snapshot.expires_at
    }
}
