pub mod clock;
pub mod config;
pub mod contact;
pub mod form_cache;
pub mod handlers;
pub mod i18n;
pub mod middleware;
pub mod models;
pub mod routing;
pub mod storage;
pub mod success_token;
pub mod validation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::SiteConfig;
pub use form_cache::FormCache;
pub use i18n::{I18n, Locale, RoutingMode};
pub use routing::{LocaleRouter, Page, RedirectDecision};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
pub use success_token::{SuccessGate, Validation};
