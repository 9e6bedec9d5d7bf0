use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Router,
};
use configuration::Settings;
use database::DbRepository;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod service;

pub use error::AppError;
pub use service::DocumentService;

/// Request bodies larger than this are rejected before reaching a handler.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub documents: DocumentService,
}

/// Builds the application router over an already-migrated repository.
pub fn build_router(db_repo: DbRepository) -> Router {
    let app_state = Arc::new(AppState {
        documents: DocumentService::new(db_repo),
    });

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/", get(handlers::root))
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/documents",
            get(handlers::list_documents).post(handlers::create_document),
        )
        .route(
            "/api/documents/",
            get(handlers::list_documents).post(handlers::create_document),
        )
        .route("/api/documents/batch", put(handlers::batch_update_documents))
        .route(
            "/api/documents/:id",
            put(handlers::update_document).delete(handlers::delete_document),
        )
        .with_state(app_state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}

/// The main function to configure and run the web server.
///
/// Tracing must already be initialised by the caller.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let addr = settings.server.socket_addr()?;

    let db_pool = database::connect(&settings.database.url, settings.database.max_connections).await?;
    database::run_migrations(&db_pool).await?;
    let db_repo = DbRepository::new(db_pool);

    if settings.seed.enabled {
        let seeded = database::seed_if_empty(&db_repo).await?;
        tracing::info!(seeded, "Startup seed check complete.");
    }

    let app = build_router(db_repo);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal.");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}
