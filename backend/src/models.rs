use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::i18n::{Locale, RoutingMode};

/// In-progress payment form input, kept as raw strings exactly as typed.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormFields {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub amount: String,
    pub currency: String,
    pub payment_type: String,
}

/// Persisted form snapshot. Times are epoch milliseconds.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CachedForm {
    pub fields: FormFields,
    pub created_at: i64,
    pub expires_at: i64,
}

/// Session record written after a confirmed payment.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuccessRecord {
    pub token: String,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub payment_id: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub timestamp: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn error(code: &str, message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.clone()),
            error: Some(ApiError {
                code: code.to_string(),
                message,
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LocaleTable {
    pub locale: Locale,
    pub name: String,
    pub messages: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LocaleTableApiResponse {
    pub success: bool,
    pub data: Option<LocaleTable>,
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AlternateQuery {
    /// Current page path, e.g. `/br/pagamento`.
    pub path: String,
    /// Current locale code; the default locale when omitted or unknown.
    pub locale: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AlternateLink {
    pub locale: Locale,
    pub name: String,
    pub href: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AlternateLinkApiResponse {
    pub success: bool,
    pub data: Option<AlternateLink>,
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LocaleSummary {
    pub code: Locale,
    pub name: String,
}

/// Values baked into the static build.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfig {
    pub locales: Vec<LocaleSummary>,
    pub default_locale: Locale,
    pub routing_mode: RoutingMode,
    pub form_cache_ttl_secs: i64,
    pub success_token_ttl_secs: i64,
    pub payment_api_url: Option<String>,
    pub customer_portal_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PublicConfigApiResponse {
    pub success: bool,
    pub data: Option<PublicConfig>,
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct ContactLink {
    pub onclick: String,
    pub display: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactLinkApiResponse {
    pub success: bool,
    pub data: Option<ContactLink>,
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}
