use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::SiteConfig;
use crate::contact::ContactKind;
use crate::i18n::{I18n, Locale};
use crate::models::{
    AlternateLink, AlternateLinkApiResponse, AlternateQuery, ApiResponse, ContactLink,
    ContactLinkApiResponse, LocaleSummary, LocaleTable, LocaleTableApiResponse, PublicConfig,
    PublicConfigApiResponse,
};
use crate::routing::LocaleRouter;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthCheckResponse {
    pub status: String,
    pub timestamp: String,
}

/**
 * locale_or_default
 * Unknown or missing locale codes fall back to the default locale.
 */
fn locale_or_default(raw: Option<&str>, router: &LocaleRouter) -> Locale {
    raw.and_then(Locale::parse)
        .unwrap_or_else(|| router.default_locale())
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, body = HealthCheckResponse))
)]
#[get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthCheckResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[utoipa::path(
    get,
    path = "/api/i18n/{locale}",
    params(("locale" = String, Path, description = "Locale code; unknown codes use the default locale")),
    responses((status = 200, body = LocaleTableApiResponse))
)]
#[get("/i18n/{locale}")]
pub async fn get_translations(
    path: web::Path<String>,
    i18n: web::Data<I18n>,
    router: web::Data<LocaleRouter>,
) -> impl Responder {
    let locale = locale_or_default(Some(path.as_str()), &router);

    HttpResponse::Ok().json(ApiResponse::success(LocaleTable {
        locale,
        name: locale.display_name().to_string(),
        messages: i18n.table(locale),
    }))
}

#[utoipa::path(
    get,
    path = "/api/alternate",
    params(AlternateQuery),
    responses(
        (status = 200, body = AlternateLinkApiResponse),
        (status = 400, body = AlternateLinkApiResponse)
    )
)]
#[get("/alternate")]
pub async fn get_alternate(
    query: web::Query<AlternateQuery>,
    router: web::Data<LocaleRouter>,
) -> impl Responder {
    if !query.path.starts_with('/') {
        return HttpResponse::BadRequest().json(ApiResponse::<()>::error(
            "invalid_path",
            "path must start with '/'".to_string(),
        ));
    }

    let current = locale_or_default(query.locale.as_deref(), &router);
    let (target, href) = router.alternate_link(&query.path, current);

    HttpResponse::Ok().json(ApiResponse::success(AlternateLink {
        locale: target,
        name: target.display_name().to_string(),
        href,
    }))
}

#[utoipa::path(
    get,
    path = "/api/config",
    responses((status = 200, body = PublicConfigApiResponse))
)]
#[get("/config")]
pub async fn get_public_config(config: web::Data<SiteConfig>) -> impl Responder {
    let locales = Locale::ALL
        .into_iter()
        .map(|code| LocaleSummary {
            code,
            name: code.display_name().to_string(),
        })
        .collect();

    HttpResponse::Ok().json(ApiResponse::success(PublicConfig {
        locales,
        default_locale: config.default_locale,
        routing_mode: config.routing_mode,
        form_cache_ttl_secs: config.form_cache_ttl.num_seconds(),
        success_token_ttl_secs: config.success_token_ttl.num_seconds(),
        payment_api_url: config.payment_api_url.clone(),
        customer_portal_url: config.customer_portal_url.clone(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/contact/{kind}",
    params(("kind" = ContactKind, Path, description = "financial or legal")),
    responses((status = 200, body = ContactLinkApiResponse))
)]
#[get("/contact/{kind}")]
pub async fn get_contact(
    path: web::Path<ContactKind>,
    config: web::Data<SiteConfig>,
) -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success(ContactLink::for_kind(
        path.into_inner(),
        &config,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::Value;

    macro_rules! app {
        ($config:expr) => {{
            let config: SiteConfig = $config;
            test::init_service(
                App::new()
                    .app_data(web::Data::new(I18n::new(config.default_locale)))
                    .app_data(web::Data::new(config.router()))
                    .app_data(web::Data::new(config))
                    .service(
                        web::scope("/api")
                            .service(health_check)
                            .service(get_translations)
                            .service(get_alternate)
                            .service(get_public_config)
                            .service(get_contact),
                    ),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn health_reports_ok() {
        let app = app!(SiteConfig::default());
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
    }

    #[actix_web::test]
    async fn translations_for_known_and_unknown_locale() {
        let app = app!(SiteConfig::default());

        let req = test::TestRequest::get().uri("/api/i18n/en").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["locale"], "en");
        assert_eq!(body["data"]["messages"]["nav.home"], "Home");

        let req = test::TestRequest::get().uri("/api/i18n/fr").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["locale"], "br");
        assert_eq!(body["data"]["name"], "Português");
    }

    #[actix_web::test]
    async fn alternate_link_in_path_mode() {
        let app = app!(SiteConfig::default());
        let req = test::TestRequest::get()
            .uri("/api/alternate?path=%2Fbr%2Fpagamento%2F&locale=br")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["href"], "/en/payment");
        assert_eq!(body["data"]["locale"], "en");
        assert_eq!(body["data"]["name"], "English");
    }

    #[actix_web::test]
    async fn alternate_label_follows_path_prefix() {
        let app = app!(SiteConfig::default());
        let req = test::TestRequest::get()
            .uri("/api/alternate?path=%2Fbr%2Fpagamento&locale=en")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["href"], "/en/payment");
        assert_eq!(body["data"]["locale"], "en");
        assert_eq!(body["data"]["name"], "English");
    }

    #[actix_web::test]
    async fn alternate_rejects_relative_path() {
        let app = app!(SiteConfig::default());
        let req = test::TestRequest::get()
            .uri("/api/alternate?path=pagamento")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn public_config_exposes_ttls_and_urls() {
        let app = app!(SiteConfig {
            customer_portal_url: Some("https://billing.example.com/portal".to_string()),
            ..SiteConfig::default()
        });
        let req = test::TestRequest::get().uri("/api/config").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["formCacheTtlSecs"], 600);
        assert_eq!(body["data"]["successTokenTtlSecs"], 60);
        assert_eq!(body["data"]["routingMode"], "path");
        assert_eq!(body["data"]["customerPortalUrl"], "https://billing.example.com/portal");
        assert_eq!(body["data"]["locales"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn contact_link_by_kind() {
        let app = app!(SiteConfig::default());
        let req = test::TestRequest::get().uri("/api/contact/legal").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["email"], "legal@ezyba.com");

        let req = test::TestRequest::get().uri("/api/contact/sales").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
