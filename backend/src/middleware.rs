use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Next;
use actix_web::{web, Error, HttpResponse};

use crate::routing::{LocaleRouter, RedirectDecision};

/**
 * redirect_to_canonical
 * On a locale-bound production host, answers foreign-vocabulary paths with a 301
 * to the same page in the host's own vocabulary. Everything else is passed on.
 */
pub async fn redirect_to_canonical<B: MessageBody + 'static>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    let decision = match req.app_data::<web::Data<LocaleRouter>>() {
        Some(router) => {
            let info = req.connection_info().clone();
            router.canonical_redirect(info.host(), req.path(), req.query_string())
        }
        None => {
            log::warn!("LocaleRouter is not registered; canonical redirects are disabled");
            RedirectDecision::PassThrough
        }
    };

    if let RedirectDecision::Permanent(target) = decision {
        log::debug!("301 {} -> {}", req.path(), target);
        let response = HttpResponse::MovedPermanently()
            .insert_header((header::LOCATION, target))
            .finish();
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req)
        .await
        .map(ServiceResponse::map_into_left_body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{DomainTable, Locale, RoutingMode};
    use actix_web::http::StatusCode;
    use actix_web::middleware::from_fn;
    use actix_web::{test, App};

    fn router() -> LocaleRouter {
        LocaleRouter::new(
            RoutingMode::Domain,
            Locale::Br,
            DomainTable::new([
                (Locale::Br, "evertramos.com.br".to_string()),
                (Locale::En, "evertramos.com".to_string()),
            ]),
        )
    }

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().body("page")
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(router()))
                    .wrap(from_fn(redirect_to_canonical))
                    .default_service(web::to(ok)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn foreign_path_gets_permanent_redirect() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/pagamento?plan=monthly")
            .insert_header((header::HOST, "evertramos.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/payment?plan=monthly"
        );
    }

    #[actix_web::test]
    async fn own_path_passes_through() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/pagamento")
            .insert_header((header::HOST, "evertramos.com.br"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn static_assets_always_pass_through() {
        let app = app!();
        for uri in ["/_astro/terms", "/images/sucesso", "/favicon.ico"] {
            let req = test::TestRequest::get()
                .uri(uri)
                .insert_header((header::HOST, "evertramos.com"))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        }
    }

    #[actix_web::test]
    async fn unterminated_ipv6_host_passes_through() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/pagamento")
            .insert_header((header::HOST, "[abc"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn dev_host_passes_through() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/sucesso")
            .insert_header((header::HOST, "localhost:3000"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
