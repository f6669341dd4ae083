// src/bin/api_server.rs

use finance_tracker::infra::logging;
use finance_tracker::transport;
use finance_tracker::{Config, DatabaseService};
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = Config::from_env()?;
    let bind_addr = config.bind_addr;

    // --- Service Initialization ---
    info!("connecting to database (pool size {})", config.db_max_connections);
    let db_service = DatabaseService::connect(&config).await?;
    if config.admin_password.is_none() {
        info!("ADMIN_PASSWORD not set, admin login is disabled");
    }
    let app_state = transport::http::AppState::new(db_service, config);

    // --- API Server Initialization ---
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(transport::http::cors_layer());

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("API server listening on http://{}", bind_addr);
    info!("Swagger UI available at http://{}/swagger-ui", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => {
                error!("failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                error!("failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
