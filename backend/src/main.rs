//! Backend entry-point: configuration, migrations, and HTTP server wiring.

mod server;

use actix_web::{web, HttpServer};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use ortho_config::OrthoConfig;

use cleit_backend::inbound::http::health::HealthState;
use cleit_backend::outbound::persistence::run_pending_migrations;
use server::{build_app, build_http_state, AppConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("configuration error: {err}")))?;

    if let Some(url) = config.database_url.clone() {
        tokio::task::spawn_blocking(move || run_pending_migrations(&url))
            .await
            .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))?
            .map_err(|err| std::io::Error::other(format!("migrations failed: {err}")))?;
    }

    let http_state = web::Data::new(build_http_state(&config).await?);
    let health_state = web::Data::new(HealthState::new());

    // Clones for the server factory so the probe state stays reachable here.
    let factory_http_state = http_state.clone();
    let factory_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(factory_http_state.clone(), factory_health_state.clone())
    })
    .bind(config.bind_addr())?;

    health_state.mark_ready();
    server.run().await
}
