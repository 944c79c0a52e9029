use ezyba_site::contact::ContactKind;
use ezyba_site::{handlers, middleware, models, I18n, Locale, RoutingMode, SiteConfig};

use actix_cors::Cors;
use actix_files::Files;
use actix_web::middleware::{from_fn, Logger};
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health_check,
        handlers::get_translations,
        handlers::get_alternate,
        handlers::get_public_config,
        handlers::get_contact
    ),
    components(schemas(
        models::ApiError,
        models::AlternateLink,
        models::AlternateLinkApiResponse,
        models::ContactLink,
        models::ContactLinkApiResponse,
        models::LocaleSummary,
        models::LocaleTable,
        models::LocaleTableApiResponse,
        models::PublicConfig,
        models::PublicConfigApiResponse,
        models::FormFields,
        handlers::HealthCheckResponse,
        ContactKind,
        Locale,
        RoutingMode
    ))
)]
struct ApiDoc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    dotenv::from_filename(format!("{}/.env.local", manifest_dir)).ok();
    dotenv::from_filename(format!("{}/.env", manifest_dir)).ok();
    dotenv::from_filename(".env.local").ok();
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = SiteConfig::from_env().context("invalid site configuration")?;
    let bind_address = config.bind_address();

    if !config.dist_dir.is_dir() {
        log::warn!(
            "Static site directory {} does not exist; only /api will respond",
            config.dist_dir.display()
        );
    }
    log::info!(
        "Starting ezyba site at http://{} (i18n mode {:?}, default locale {})",
        bind_address,
        config.routing_mode,
        config.default_locale
    );

    let i18n = web::Data::new(I18n::new(config.default_locale));
    let router = web::Data::new(config.router());
    let config = web::Data::new(config);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET"])
            .max_age(3600);

        App::new()
            .app_data(i18n.clone())
            .app_data(router.clone())
            .app_data(config.clone())
            .wrap(from_fn(middleware::redirect_to_canonical))
            .wrap(Logger::default())
            .service(SwaggerUi::new("/api/docs/{_:.*}").url("/api/openapi.json", ApiDoc::openapi()))
            .service(
                web::scope("/api")
                    .wrap(cors)
                    .service(handlers::health_check)
                    .service(handlers::get_translations)
                    .service(handlers::get_alternate)
                    .service(handlers::get_public_config)
                    .service(handlers::get_contact),
            )
            .service(Files::new("/", config.dist_dir.clone()).index_file("index.html"))
    })
    .bind(&bind_address)
    .with_context(|| format!("failed to bind {}", bind_address))?
    .run()
    .await
    .context("server error")
}
