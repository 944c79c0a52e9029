use crate::models::FormFields;

pub const MIN_AMOUNT: f64 = 1.0;
const CURRENCIES: [&str; 2] = ["usd", "brl"];

impl FormFields {
    /// Translation keys of every failed rule, in form order. Empty means valid.
    pub fn validate(&self) -> Vec<&'static str> {
        let mut errors = Vec::new();

        if self.name.trim().chars().count() < 2 {
            errors.push("validation.name_required");
        }
        if !is_valid_email(self.email.trim()) {
            errors.push("validation.email_invalid");
        }
        match parse_amount(&self.amount) {
            Some(amount) if amount >= MIN_AMOUNT => {}
            _ => errors.push("validation.amount_minimum"),
        }
        if !CURRENCIES.contains(&self.currency.trim().to_ascii_lowercase().as_str()) {
            errors.push("error.required");
        }

        errors
    }
}

/// Accepts `1234.5`, `1234,50` and `R$ 10`; rejects anything not finite.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("R$")
        .trim_start_matches('$')
        .trim()
        .replace(',', ".");
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}
