use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use airport_eats::config::Settings;
use airport_eats::core::Resolver;
use airport_eats::routes::{self, nearest::AppState};
use airport_eats::services::{PostgresClient, YelpClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting Airport Eats service...");

    let postgres = PostgresClient::from_settings(
        &settings.database.url,
        settings.database.max_connections,
        settings.database.min_connections,
        settings.database.acquire_timeout_secs,
        settings.database.idle_timeout_secs,
    )
    .await
    .map_err(|e| {
        error!("Failed to connect to PostgreSQL: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!("PostgreSQL client initialized");

    let yelp = YelpClient::new(
        settings.yelp.base_url.clone(),
        settings.yelp.api_key.clone(),
        settings.yelp.search(),
        Duration::from_secs(settings.yelp.timeout_secs),
        settings.cache.capacity,
        Duration::from_secs(settings.cache.ttl_secs),
    )
    .map_err(|e| {
        error!("Failed to create business search client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!(
        "Business search client initialized (cache: {} entries, TTL: {}s)",
        settings.cache.capacity, settings.cache.ttl_secs
    );

    let resolver = Resolver::new(
        Arc::new(postgres),
        Arc::new(yelp),
        settings.search.closeness,
        settings.search.distance_unit(),
    );

    info!(
        "Resolver initialized (closeness: {} degrees, unit: {:?})",
        settings.search.closeness,
        settings.search.distance_unit()
    );

    let app_state = AppState { resolver };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
