// Localized page paths and the language-switcher / canonical-URL rules built on them

use std::collections::HashMap;

use serde::Serialize;
use url::Url;

use crate::i18n::{self, DomainTable, Locale, RoutingMode, LOCALE_QUERY_PARAM};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Home,
    Payment,
    Privacy,
    Terms,
    Manage,
    Success,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::Payment,
        Page::Privacy,
        Page::Terms,
        Page::Manage,
        Page::Success,
    ];

    pub fn slug(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Page::Home, _) => "",
            (Page::Payment, Locale::Br) => "pagamento",
            (Page::Payment, Locale::En) => "payment",
            (Page::Privacy, Locale::Br) => "privacidade",
            (Page::Privacy, Locale::En) => "privacy",
            (Page::Terms, Locale::Br) => "termos",
            (Page::Terms, Locale::En) => "terms",
            (Page::Manage, Locale::Br) => "gerenciar",
            (Page::Manage, Locale::En) => "manage",
            (Page::Success, Locale::Br) => "sucesso",
            (Page::Success, Locale::En) => "success",
        }
    }
}

/// Strips a trailing slash except on the root; a bare locale prefix keeps its slash.
pub fn normalize_path(path: &str) -> String {
    let mut path = if path.is_empty() { "/".to_string() } else { path.to_string() };
    while path.len() > 1 && path.ends_with('/') {
        path.pop();
    }
    let bare_prefix = path
        .strip_prefix('/')
        .is_some_and(|rest| Locale::ALL.iter().any(|l| rest == l.code()));
    if bare_prefix {
        path.push('/');
    }
    path
}

/// Bidirectional page table, built once at startup.
///
/// `prefixed` holds `/br/pagamento`-style paths, `bare` holds the unprefixed
/// vocabulary used on per-locale domains.
#[derive(Debug, Clone)]
pub struct PathMap {
    prefixed: HashMap<String, (Locale, Page)>,
    bare: HashMap<(Locale, String), Page>,
}

impl PathMap {
    pub fn new() -> Self {
        let mut prefixed = HashMap::new();
        let mut bare = HashMap::new();
        for page in Page::ALL {
            for locale in Locale::ALL {
                prefixed.insert(Self::prefixed_path(page, locale), (locale, page));
                bare.insert((locale, Self::bare_path(page, locale)), page);
            }
        }
        Self { prefixed, bare }
    }

    pub fn prefixed_path(page: Page, locale: Locale) -> String {
        match page.slug(locale) {
            "" => format!("/{}/", locale.code()),
            slug => format!("/{}/{}", locale.code(), slug),
        }
    }

    pub fn bare_path(page: Page, locale: Locale) -> String {
        format!("/{}", page.slug(locale))
    }

    /// Which page a normalized `/xx/...` path is, and in which locale.
    pub fn lookup_prefixed(&self, path: &str) -> Option<(Locale, Page)> {
        self.prefixed.get(path).copied()
    }

    pub fn lookup_bare(&self, locale: Locale, path: &str) -> Option<Page> {
        self.bare.get(&(locale, path.to_string())).copied()
    }

    /// A path written in `locale`'s vocabulary that a `host_locale` domain must not serve.
    pub fn foreign_page(&self, host_locale: Locale, path: &str) -> Option<Page> {
        let foreign = host_locale.other();
        self.lookup_bare(foreign, path)
            .filter(|page| page.slug(foreign) != page.slug(host_locale))
    }
}

impl Default for PathMap {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectDecision {
    PassThrough,
    Permanent(String),
}

/// Everything needed to pick a locale from a URL and to link across locales.
#[derive(Debug, Clone)]
pub struct LocaleRouter {
    mode: RoutingMode,
    default_locale: Locale,
    domains: DomainTable,
    pages: PathMap,
}

impl LocaleRouter {
    pub fn new(mode: RoutingMode, default_locale: Locale, domains: DomainTable) -> Self {
        Self {
            mode,
            default_locale,
            domains,
            pages: PathMap::new(),
        }
    }

    pub fn mode(&self) -> RoutingMode {
        self.mode
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    pub fn resolve_locale(&self, url: &Url) -> Locale {
        i18n::resolve_locale(url, self.mode, &self.domains, self.default_locale)
    }

    /// Link target for the language switcher on `current_path`.
    pub fn alternate_path(&self, current_path: &str, current_locale: Locale) -> String {
        self.alternate_link(current_path, current_locale).1
    }

    /// Like [`LocaleRouter::alternate_path`], also returning the locale the link leads to.
    ///
    /// In path mode a known `/xx/...` path decides the source locale itself,
    /// so the target can differ from `current_locale.other()`.
    pub fn alternate_link(&self, current_path: &str, current_locale: Locale) -> (Locale, String) {
        let path = normalize_path(current_path);
        match self.mode {
            RoutingMode::Path => match self.pages.lookup_prefixed(&path) {
                Some((locale, page)) => (locale.other(), PathMap::prefixed_path(page, locale.other())),
                None => {
                    let target = current_locale.other();
                    (target, PathMap::prefixed_path(Page::Home, target))
                }
            },
            RoutingMode::Domain => {
                let target = current_locale.other();
                let page = self.pages.lookup_bare(current_locale, &path).unwrap_or(Page::Home);
                let path = PathMap::bare_path(page, target);
                let href = match self.domains.domain_for(target) {
                    Some(host) => format!("https://{host}{path}"),
                    None => path,
                };
                (target, href)
            }
            RoutingMode::Query => {
                let target = current_locale.other();
                let page = self.pages.lookup_bare(current_locale, &path).unwrap_or(Page::Home);
                let href = format!(
                    "{}?{}={}",
                    PathMap::bare_path(page, target),
                    LOCALE_QUERY_PARAM,
                    urlencoding::encode(target.code())
                );
                (target, href)
            }
        }
    }

    /// Whether a request must be sent to its canonical path on this host.
    pub fn canonical_redirect(&self, host: &str, path: &str, query: &str) -> RedirectDecision {
        if is_static_asset(path) || is_dev_host(host) {
            return RedirectDecision::PassThrough;
        }
        let Some(host_locale) = self.domains.locale_for_host(host) else {
            return RedirectDecision::PassThrough;
        };

        match self.pages.foreign_page(host_locale, &normalize_path(path)) {
            Some(page) => {
                let mut target = PathMap::bare_path(page, host_locale);
                if !query.is_empty() {
                    target.push('?');
                    target.push_str(query);
                }
                RedirectDecision::Permanent(target)
            }
            None => RedirectDecision::PassThrough,
        }
    }
}

pub fn is_static_asset(path: &str) -> bool {
    path.starts_with("/_astro/") || path.starts_with("/images/") || path.contains('.')
}

pub fn is_dev_host(host: &str) -> bool {
    host.contains("localhost") || host.contains("127.0.0.1")
}
