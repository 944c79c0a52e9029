use std::env;
use std::path::PathBuf;

use chrono::Duration;
use thiserror::Error;

use crate::i18n::{DomainTable, Locale, RoutingMode};
use crate::routing::LocaleRouter;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has unsupported value {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Build/deploy settings, read once from the environment.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub host: String,
    pub port: u16,
    pub dist_dir: PathBuf,
    pub routing_mode: RoutingMode,
    pub default_locale: Locale,
    pub domain_br: String,
    pub domain_en: String,
    pub form_cache_ttl: Duration,
    pub success_token_ttl: Duration,
    pub payment_api_url: Option<String>,
    pub customer_portal_url: Option<String>,
    pub financial_email: String,
    pub legal_email: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            dist_dir: PathBuf::from("dist"),
            routing_mode: RoutingMode::Path,
            default_locale: Locale::Br,
            domain_br: "evertramos.com.br".to_string(),
            domain_en: "evertramos.com".to_string(),
            form_cache_ttl: crate::form_cache::default_ttl(),
            success_token_ttl: crate::success_token::default_ttl(),
            payment_api_url: None,
            customer_portal_url: None,
            financial_email: "finance@ezyba.com".to_string(),
            legal_email: "legal@ezyba.com".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`SiteConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = port.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: port,
            })?;
        }
        if let Some(dir) = get("SITE_DIST_DIR") {
            config.dist_dir = PathBuf::from(dir);
        }
        if let Some(mode) = get("SITE_I18N_MODE") {
            config.routing_mode = RoutingMode::parse(&mode).ok_or(ConfigError::Invalid {
                key: "SITE_I18N_MODE",
                value: mode,
            })?;
        }
        if let Some(locale) = get("SITE_DEFAULT_LOCALE") {
            config.default_locale = Locale::parse(&locale).ok_or(ConfigError::Invalid {
                key: "SITE_DEFAULT_LOCALE",
                value: locale,
            })?;
        }
        if let Some(domain) = get("SITE_DOMAIN_BR") {
            config.domain_br = domain;
        }
        if let Some(domain) = get("SITE_DOMAIN_EN") {
            config.domain_en = domain;
        }
        if let Some(ttl) = get("FORM_CACHE_TTL_SECS") {
            config.form_cache_ttl = parse_ttl("FORM_CACHE_TTL_SECS", ttl)?;
        }
        if let Some(ttl) = get("SUCCESS_TOKEN_TTL_SECS") {
            config.success_token_ttl = parse_ttl("SUCCESS_TOKEN_TTL_SECS", ttl)?;
        }
        config.payment_api_url = get("PUBLIC_API_URL").map(|u| u.trim_end_matches('/').to_string());
        config.customer_portal_url = get("PUBLIC_STRIPE_CUSTOMER_PORTAL_URL");
        if let Some(email) = get("PUBLIC_FINANCIAL_EMAIL") {
            config.financial_email = email;
        }
        if let Some(email) = get("PUBLIC_LEGAL_EMAIL") {
            config.legal_email = email;
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn domains(&self) -> DomainTable {
        DomainTable::new([
            (Locale::Br, self.domain_br.clone()),
            (Locale::En, self.domain_en.clone()),
        ])
    }

    pub fn router(&self) -> LocaleRouter {
        LocaleRouter::new(self.routing_mode, self.default_locale, self.domains())
    }
}

/// Upper bound for both cache lifetimes.
pub const MAX_TTL_SECS: i64 = 24 * 60 * 60;

fn parse_ttl(key: &'static str, raw: String) -> Result<Duration, ConfigError> {
    match raw.parse::<i64>() {
        Ok(secs) if (1..=MAX_TTL_SECS).contains(&secs) => Ok(Duration::seconds(secs)),
        _ => Err(ConfigError::Invalid { key, value: raw }),
    }
}
