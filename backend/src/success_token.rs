// Success page gate: a short-lived, single-use record in session storage
//
// Not a credential. Any same-origin script can write this record; it only
// keeps bookmarks and history entries from reopening the confirmation page.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Duration;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::models::{PaymentInfo, SuccessRecord};
use crate::storage::KeyValueStore;

pub fn default_ttl() -> Duration {
    Duration::seconds(60)
}

/// Storage key derived from the hostname.
///
/// Only the first four base64 characters are kept, which encode the first
/// three bytes of the host: `evertramos.com` and `evertramos.com.br` share a key.
pub fn storage_key(hostname: &str) -> String {
    let hash: String = STANDARD.encode(hostname).chars().take(4).collect();
    format!("ezb_{hash}_scs")
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Validation {
    pub valid: bool,
    pub payment_info: Option<PaymentInfo>,
}

impl Validation {
    fn invalid() -> Self {
        Self::default()
    }
}

pub struct SuccessGate<S, C = SystemClock> {
    store: S,
    clock: C,
    key: String,
    ttl: Duration,
}

impl<S: KeyValueStore> SuccessGate<S> {
    pub fn new(store: S, hostname: &str) -> Self {
        Self::with_clock(store, hostname, SystemClock, default_ttl())
    }
}

impl<S: KeyValueStore, C: Clock> SuccessGate<S, C> {
    pub fn with_clock(store: S, hostname: &str, clock: C, ttl: Duration) -> Self {
        Self {
            store,
            clock,
            key: storage_key(hostname),
            ttl,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Records a completed payment and returns the generated token.
    ///
    /// A failed write is logged; the success page will then report invalid.
    pub fn issue(&self, payment_id: Option<&str>, amount: Option<f64>, currency: Option<&str>) -> String {
        let now = self.clock.now().timestamp_millis();
        let token = generate_token(now);
        let record = SuccessRecord {
            token: token.clone(),
            timestamp: now,
            payment_id: payment_id.map(str::to_string),
            amount,
            currency: currency.map(str::to_string),
        };

        match serde_json::to_string(&record) {
            Ok(raw) => {
                if let Err(e) = self.store.set(&self.key, &raw) {
                    log::warn!("Failed to store success token: {}", e);
                }
            }
            Err(e) => log::warn!("Failed to encode success token: {}", e),
        }
        token
    }

    pub fn validate(&self) -> Validation {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Validation::invalid(),
            Err(e) => {
                log::warn!("Failed to read success token: {}", e);
                return Validation::invalid();
            }
        };

        let record: SuccessRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Discarding unreadable success token: {}", e);
                self.consume();
                return Validation::invalid();
            }
        };

        let Some(age) = self.clock.now().timestamp_millis().checked_sub(record.timestamp) else {
            log::warn!("Discarding success token with out-of-range timestamp");
            self.consume();
            return Validation::invalid();
        };
        if age > self.ttl.num_milliseconds() {
            self.consume();
            return Validation::invalid();
        }

        Validation {
            valid: true,
            payment_info: Some(PaymentInfo {
                payment_id: record.payment_id,
                amount: record.amount,
                currency: record.currency,
                timestamp: record.timestamp,
            }),
        }
    }

    pub fn consume(&self) {
        if let Err(e) = self.store.remove(&self.key) {
            log::warn!("Failed to remove success token: {}", e);
        }
    }

    pub fn should_block_direct_access(&self) -> bool {
        !self.validate().valid
    }
}

// random uuid + base36 time + base36 extra random
fn generate_token(now_millis: i64) -> String {
    let random = Uuid::new_v4();
    let extra = Uuid::new_v4().as_u128() % 1_000_000_000;
    format!(
        "{}{}{}",
        random.simple(),
        to_base36(now_millis.unsigned_abs() as u128),
        to_base36(extra)
    )
}

fn to_base36(mut n: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::MemoryStore;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    type Gate = SuccessGate<Arc<MemoryStore>, Arc<ManualClock>>;

    fn gate(host: &str) -> (Gate, Arc<MemoryStore>, Arc<ManualClock>) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()));
        let gate = SuccessGate::with_clock(store.clone(), host, clock.clone(), default_ttl());
        (gate, store, clock)
    }

    #[test]
    fn storage_key_is_derived_from_hostname() {
        // base64("evertramos.com") = "ZXZlcnRyYW1vcy5jb20="
        assert_eq!(storage_key("evertramos.com"), "ezb_ZXZl_scs");
        assert_eq!(storage_key("localhost"), "ezb_bG9j_scs");
    }

    #[test]
    fn issue_then_validate_returns_metadata() {
        let (gate, _, clock) = gate("evertramos.com");
        let token = gate.issue(Some("pi_123"), Some(49.9), Some("usd"));
        assert!(token.len() > 32);

        clock.advance(Duration::seconds(30));
        let result = gate.validate();
        assert!(result.valid);
        let info = result.payment_info.unwrap();
        assert_eq!(info.payment_id.as_deref(), Some("pi_123"));
        assert_eq!(info.amount, Some(49.9));
        assert_eq!(info.currency.as_deref(), Some("usd"));
        assert!(!gate.should_block_direct_access());
    }

    #[test]
    fn consume_makes_token_single_use() {
        let (gate, store, _) = gate("evertramos.com");
        gate.issue(None, None, None);
        assert!(gate.validate().valid);
        gate.consume();
        assert!(!gate.validate().valid);
        assert!(gate.should_block_direct_access());
        assert!(store.is_empty());
    }

    #[test]
    fn expired_token_is_invalid_and_removed() {
        let (gate, store, clock) = gate("evertramos.com");
        gate.issue(Some("pi_1"), None, None);
        clock.advance(Duration::seconds(61));
        assert_eq!(gate.validate(), Validation::invalid());
        assert_eq!(store.get(gate.key()).unwrap(), None);
    }

    #[test]
    fn token_at_exact_ttl_is_still_valid() {
        let (gate, _, clock) = gate("evertramos.com");
        gate.issue(None, None, None);
        clock.advance(Duration::seconds(60));
        assert!(gate.validate().valid);
    }

    #[test]
    fn missing_token_blocks_access() {
        let (gate, _, _) = gate("evertramos.com");
        assert!(gate.should_block_direct_access());
    }

    #[test]
    fn malformed_record_is_removed() {
        let (gate, store, _) = gate("evertramos.com");
        store.set(gate.key(), "[1,2,3]").unwrap();
        assert!(!gate.validate().valid);
        assert!(store.is_empty());
    }

    #[test]
    fn out_of_range_timestamp_is_removed() {
        let (gate, store, _) = gate("evertramos.com");
        let raw = format!("{{\"token\":\"x\",\"timestamp\":{}}}", i64::MIN);
        store.set(gate.key(), &raw).unwrap();
        assert_eq!(gate.validate(), Validation::invalid());
        assert!(store.is_empty());
    }

    #[test]
    fn key_only_covers_the_first_three_bytes_of_the_host() {
        // sessionStorage is per origin already; the key only separates
        // environments served from the same origin
        assert_eq!(storage_key("evertramos.com"), storage_key("evertramos.com.br"));
        assert_eq!(storage_key("eve-staging.example.org"), storage_key("evertramos.com"));
    }

    #[test]
    fn hosts_do_not_share_tokens() {
        let store = Arc::new(MemoryStore::new());
        let prod = SuccessGate::new(store.clone(), "evertramos.com");
        let staging = SuccessGate::new(store.clone(), "staging.example.org");
        prod.issue(None, None, None);
        assert!(prod.validate().valid);
        assert!(!staging.validate().valid);
    }

    #[test]
    fn tokens_are_distinct() {
        let (gate, _, _) = gate("evertramos.com");
        let a = gate.issue(None, None, None);
        let b = gate.issue(None, None, None);
        assert_ne!(a, b);
    }

    #[test]
    fn unavailable_storage_reports_invalid() {
        let gate = SuccessGate::new(MemoryStore::disabled(), "evertramos.com");
        let token = gate.issue(Some("pi_1"), Some(10.0), Some("brl"));
        assert!(!token.is_empty());
        assert!(gate.should_block_direct_access());
        gate.consume();
    }

    #[test]
    fn base36_encoding() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
