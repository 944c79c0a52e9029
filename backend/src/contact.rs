// Contact addresses rendered without a literal mailto: so scrapers miss them

use serde::Deserialize;
use utoipa::ToSchema;

use crate::config::SiteConfig;
use crate::models::ContactLink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    /// Payments, refunds, billing.
    Financial,
    /// Privacy, terms, compliance.
    Legal,
}

impl ContactKind {
    pub fn address(self, config: &SiteConfig) -> &str {
        match self {
            ContactKind::Financial => &config.financial_email,
            ContactKind::Legal => &config.legal_email,
        }
    }
}

impl ContactLink {
    pub fn protected(email: &str, display: Option<&str>) -> Self {
        let (local, domain) = email.split_once('@').unwrap_or((email, ""));
        Self {
            onclick: format!(
                "location.href='mailto:'+['{}','{}'].join('@')",
                escape_js(local),
                escape_js(domain)
            ),
            display: display.unwrap_or(email).to_string(),
            email: email.to_string(),
        }
    }

    pub fn for_kind(kind: ContactKind, config: &SiteConfig) -> Self {
        Self::protected(kind.address(config), None)
    }
}

// Safe inside a single-quoted JS string that sits in a double-quoted HTML attribute.
fn escape_js(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\x22"),
            '<' => out.push_str("\\x3c"),
            '>' => out.push_str("\\x3e"),
            '&' => out.push_str("\\x26"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_split_mailto_handler() {
        let link = ContactLink::protected("finance@ezyba.com", None);
        assert_eq!(
            link.onclick,
            "location.href='mailto:'+['finance','ezyba.com'].join('@')"
        );
        assert_eq!(link.display, "finance@ezyba.com");
    }

    #[test]
    fn custom_display_and_quote_escaping() {
        let link = ContactLink::protected("o'neil@ezyba.com", Some("Legal team"));
        assert!(link.onclick.contains("['o\\'neil','ezyba.com']"));
        assert_eq!(link.display, "Legal team");
    }

    #[test]
    fn html_sensitive_characters_are_escaped() {
        let link = ContactLink::protected("a\"<b>&c@ezyba.com", None);
        assert_eq!(
            link.onclick,
            "location.href='mailto:'+['a\\x22\\x3cb\\x3e\\x26c','ezyba.com'].join('@')"
        );
        assert!(!link.onclick.contains('"'));
        assert!(!link.onclick.contains('<'));
    }

    #[test]
    fn kind_selects_configured_address() {
        let config = SiteConfig {
            legal_email: "law@example.com".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(ContactLink::for_kind(ContactKind::Legal, &config).email, "law@example.com");
        assert_eq!(
            ContactLink::for_kind(ContactKind::Financial, &config).email,
            "finance@ezyba.com"
        );
    }
}
