use anyhow::Context;
use dotenvy::dotenv;
use gatehouse::gatehouse_config::{JwtConfig, ServerConfig};
use gatehouse::logging::init_tracing;
use gatehouse::router::init_router;
use gatehouse::state::init_app_state;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let jwt_config = JwtConfig::from_env();
    jwt_config
        .validate()
        .context("Invalid JWT configuration")?;

    let server_config = ServerConfig::from_env();
    let address = server_config.bind_address();

    let app = init_router(init_app_state(jwt_config));

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!(address = %address, "Server running");
    info!("Swagger UI available at http://{address}/swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
