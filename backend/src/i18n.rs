// Internationalization: supported locales, translation tables and locale resolution

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Br,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Br, Locale::En];

    pub fn code(self) -> &'static str {
        match self {
            Locale::Br => "br",
            Locale::En => "en",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Locale::Br => "Português",
            Locale::En => "English",
        }
    }

    /// The locale a language switcher points to.
    pub fn other(self) -> Locale {
        match self {
            Locale::Br => Locale::En,
            Locale::En => Locale::Br,
        }
    }

    /// Accepts site codes plus the common `pt`/`pt-BR`/`en-US` spellings.
    pub fn parse(raw: &str) -> Option<Locale> {
        let raw = raw.trim().to_ascii_lowercase();
        let primary = raw.split(['-', '_']).next().unwrap_or_default();
        match primary {
            "br" | "pt" => Some(Locale::Br),
            "en" => Some(Locale::En),
            _ => None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

const BR_MESSAGES: &[(&str, &str)] = &[
    // Navigation
    ("nav.home", "Início"),
    ("nav.contact", "Contato"),
    ("nav.payment", "Pagamento"),
    ("nav.manage", "Gerenciar"),
    ("nav.privacy", "Privacidade"),
    ("nav.terms", "Termos"),
    // Home page
    ("home.title", "Desenvolvedor Full Stack"),
    ("home.subtitle", "Especialista em Docker, DevSecOps e Desenvolvimento Web"),
    ("home.cta", "Contratar Serviços"),
    ("home.manage", "Ver Projetos"),
    // Payment form
    ("payment.title", "Realizar Pagamento"),
    ("payment.name", "Nome Completo"),
    ("payment.email", "Email"),
    ("payment.phone", "Telefone (opcional)"),
    ("payment.amount", "Valor"),
    ("payment.currency", "Moeda"),
    ("payment.type", "Tipo de Pagamento"),
    ("payment.type.one_time", "Pagamento Único"),
    ("payment.type.monthly", "Mensal"),
    ("payment.type.yearly", "Anual"),
    ("payment.card_info", "Informações do Cartão"),
    ("payment.security_check", "Verificação de Segurança"),
    ("payment.terms_accept", "Eu aceito os"),
    ("payment.terms_link", "termos de uso"),
    ("payment.privacy_link", "política de privacidade"),
    ("payment.submit", "Processar Pagamento"),
    ("payment.processing", "Processando..."),
    ("payment.processing_title", "Processando Pagamento"),
    ("payment.processing_message", "Seu pagamento está sendo processado com segurança."),
    ("payment.processing_wait", "Por favor, não feche esta janela."),
    ("payment.stripe_error", "Erro ao carregar sistema de pagamento"),
    ("payment.security_error", "Erro na verificação de segurança"),
    // Validation
    ("validation.name_required", "Nome deve ter pelo menos 2 caracteres"),
    ("validation.email_invalid", "Email inválido"),
    ("validation.amount_minimum", "Valor mínimo é $1.00 ou R$1.00"),
    ("validation.security_required", "Verificação de segurança obrigatória"),
    ("validation.terms_required", "Você deve aceitar os termos de uso"),
    // Errors
    ("error.payment_system_not_loaded", "Sistema de pagamento não carregado. Recarregue a página."),
    ("error.payment_processing", "Erro ao processar pagamento"),
    ("error.payment_failed", "Erro ao processar pagamento. Tente novamente."),
    ("error.payment", "Erro ao processar pagamento. Tente novamente."),
    ("error.required", "Este campo é obrigatório"),
    ("error.email", "Email inválido"),
    ("error.amount", "Valor deve ser maior que zero"),
    // Success
    ("success.payment", "Pagamento processado com sucesso!"),
    // Footer
    ("footer.privacy", "Política de Privacidade"),
    ("footer.terms", "Termos de Uso"),
    ("footer.secure", "Pagamentos seguros processados pela Stripe"),
];

const EN_MESSAGES: &[(&str, &str)] = &[
    ("nav.home", "Home"),
    ("nav.contact", "Contact"),
    ("nav.payment", "Payment"),
    ("nav.manage", "Manage"),
    ("nav.privacy", "Privacy"),
    ("nav.terms", "Terms"),
    ("home.title", "Full Stack Developer"),
    ("home.subtitle", "Docker, DevSecOps and Web Development Specialist"),
    ("home.cta", "Hire Services"),
    ("home.manage", "View Projects"),
    ("payment.title", "Make Payment"),
    ("payment.name", "Full Name"),
    ("payment.email", "Email"),
    ("payment.phone", "Phone (optional)"),
    ("payment.amount", "Amount"),
    ("payment.currency", "Currency"),
    ("payment.type", "Payment Type"),
    ("payment.type.one_time", "One-time Payment"),
    ("payment.type.monthly", "Monthly"),
    ("payment.type.yearly", "Yearly"),
    ("payment.card_info", "Card Information"),
    ("payment.security_check", "Security Verification"),
    ("payment.terms_accept", "I accept the"),
    ("payment.terms_link", "terms of use"),
    ("payment.privacy_link", "privacy policy"),
    ("payment.submit", "Process Payment"),
    ("payment.processing", "Processing..."),
    ("payment.processing_title", "Processing Payment"),
    ("payment.processing_message", "Your payment is being processed securely."),
    ("payment.processing_wait", "Please do not close this window."),
    ("payment.stripe_error", "Error loading payment system"),
    ("payment.security_error", "Security verification error"),
    ("validation.name_required", "Name must be at least 2 characters"),
    ("validation.email_invalid", "Invalid email"),
    ("validation.amount_minimum", "Minimum amount is $1.00 or R$1.00"),
    ("validation.security_required", "Security verification required"),
    ("validation.terms_required", "You must accept the terms of use"),
    ("error.payment_system_not_loaded", "Payment system not loaded. Please reload the page."),
    ("error.payment_processing", "Error processing payment"),
    ("error.payment_failed", "Error processing payment. Please try again."),
    ("error.payment", "Error processing payment. Please try again."),
    ("error.required", "This field is required"),
    ("error.email", "Invalid email"),
    ("error.amount", "Amount must be greater than zero"),
    ("success.payment", "Payment processed successfully!"),
    ("footer.privacy", "Privacy Policy"),
    ("footer.terms", "Terms of Use"),
    ("footer.secure", "Secure payments processed by Stripe"),
];

/// Translation tables for every supported locale.
///
/// Lookups fall back to the default locale, then to the key itself, so a
/// missing translation never renders as an empty string.
pub struct I18n {
    default_locale: Locale,
    messages: HashMap<Locale, HashMap<&'static str, &'static str>>,
}

impl I18n {
    pub fn new(default_locale: Locale) -> Self {
        let mut messages = HashMap::new();
        messages.insert(Locale::Br, BR_MESSAGES.iter().copied().collect());
        messages.insert(Locale::En, EN_MESSAGES.iter().copied().collect());

        Self {
            default_locale,
            messages,
        }
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    pub fn translate(&self, locale: Locale, key: &str) -> String {
        self.lookup(locale, key)
            .or_else(|| self.lookup(self.default_locale, key))
            .map(str::to_string)
            .unwrap_or_else(|| {
                log::debug!("missing translation for key {key:?}");
                key.to_string()
            })
    }

    /// Full table for a locale with default-locale values filled in.
    pub fn table(&self, locale: Locale) -> BTreeMap<String, String> {
        let mut table: BTreeMap<String, String> = self
            .messages
            .get(&self.default_locale)
            .into_iter()
            .flatten()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        if let Some(own) = self.messages.get(&locale) {
            for (k, v) in own {
                table.insert(k.to_string(), v.to_string());
            }
        }
        table
    }

    fn lookup(&self, locale: Locale, key: &str) -> Option<&'static str> {
        self.messages
            .get(&locale)
            .and_then(|msgs| msgs.get(key))
            .copied()
            .filter(|v| !v.is_empty())
    }
}

/// How the active locale is carried in a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoutingMode {
    /// `/br/...` and `/en/...`
    Path,
    /// One hostname per locale, unprefixed paths.
    Domain,
    /// `?lang=en`, local development only.
    Query,
}

impl RoutingMode {
    pub fn parse(raw: &str) -> Option<RoutingMode> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "path" => Some(RoutingMode::Path),
            "domain" => Some(RoutingMode::Domain),
            "query" => Some(RoutingMode::Query),
            _ => None,
        }
    }
}

pub const LOCALE_QUERY_PARAM: &str = "lang";

/// Locale to production hostname binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainTable {
    domains: Vec<(Locale, String)>,
}

impl DomainTable {
    pub fn new(domains: impl IntoIterator<Item = (Locale, String)>) -> Self {
        Self {
            domains: domains
                .into_iter()
                .map(|(locale, host)| (locale, host.trim().to_ascii_lowercase()))
                .collect(),
        }
    }

    pub fn domain_for(&self, locale: Locale) -> Option<&str> {
        self.domains
            .iter()
            .find(|(l, _)| *l == locale)
            .map(|(_, host)| host.as_str())
    }

    /// Exact hostname match; a `:port` suffix is ignored.
    pub fn locale_for_host(&self, host: &str) -> Option<Locale> {
        let host = strip_port(host).to_ascii_lowercase();
        self.domains
            .iter()
            .find(|(_, h)| *h == host)
            .map(|(locale, _)| *locale)
    }
}

pub(crate) fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // IPv6 literal
        return host.find(']').map_or(host, |i| &host[..=i]);
    }
    host.split(':').next().unwrap_or(host)
}

pub fn resolve_locale(url: &Url, mode: RoutingMode, domains: &DomainTable, default: Locale) -> Locale {
    let resolved = match mode {
        RoutingMode::Path => url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .filter(|segment| !segment.is_empty())
            .and_then(locale_from_code),
        RoutingMode::Domain => url.host_str().and_then(|host| domains.locale_for_host(host)),
        RoutingMode::Query => url
            .query_pairs()
            .find(|(k, _)| k.as_ref() == LOCALE_QUERY_PARAM)
            .and_then(|(_, v)| locale_from_code(&v)),
    };
    resolved.unwrap_or(default)
}

// Path segments and query overrides only accept the exact site codes.
fn locale_from_code(code: &str) -> Option<Locale> {
    Locale::ALL.into_iter().find(|l| l.code() == code)
}
