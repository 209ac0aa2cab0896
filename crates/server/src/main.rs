mod config;
mod doc;
mod dtos;
mod error;
mod mailer;
mod report;
mod routes;
mod session;
mod state;
mod utils;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use database::{db, services::lifecycle::RequestService, store::DbStore};
use log::info;
use migration::{Migrator, MigratorTrait};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::time::Duration};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::Config, doc::ApiDoc, mailer::Mailer, state::AppState, utils::shutdown::shutdown_signal,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env().expect("incomplete environment configuration");

    let db = db::connect(&config.database_url)
        .await
        .expect("failed to connect to the database");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");

    let mailer = Mailer::from_config(&config.smtp).expect("invalid SMTP configuration");

    let bind_addr = config.bind_addr.clone();
    let state = AppState {
        requests: RequestService::new(Arc::new(DbStore::new(db))),
        mailer: Arc::new(mailer),
        config: Arc::new(config),
        export_lock: Arc::new(tokio::sync::Mutex::new(())),
    };

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::hours(8)));

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/login", post(routes::auth::login))
        .route("/api/logout", post(routes::auth::logout))
        .route("/api/check-auth", get(routes::auth::check_auth))
        .route(
            "/api/requests",
            post(routes::requests::submit_request).get(routes::requests::list_requests),
        )
        .route("/api/requests/{id}", put(routes::requests::decide_request))
        .route("/api/export", get(routes::export::export_approved))
        .route("/api/export-email", post(routes::export::email_report))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(session_layer)
                .layer(CompressionLayer::new()),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("failed to bind listener");
    info!("Running axum on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}
