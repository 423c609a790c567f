use actix_cors::Cors;
use actix_web::{
    middleware::{Logger, NormalizePath},
    web, App, HttpServer,
};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_service::db::{create_pool, run_migrations};
use blog_service::{routes, security, Config};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");

    tracing::info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Initialize JWT signing keys before any request is served
    security::jwt::initialize_keys(&config.jwt.secret).expect("Failed to initialize JWT keys");
    tracing::info!("JWT keys initialized");

    // Create database connection pool and apply migrations
    let db_pool = create_pool(&config.database.url, config.database.max_connections)
        .await
        .expect("Failed to create database pool");

    run_migrations(&db_pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!(
        "Database pool created with {} max connections",
        config.database.max_connections
    );

    let host = config.app.host.clone();
    let port = config.app.port;

    tracing::info!("Listening on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(NormalizePath::trim())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
