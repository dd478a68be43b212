//! alx-poll server binary.
//!
//! Startup order: configuration, tracing, database pool, migrations,
//! router, then serve until Ctrl+C or SIGTERM.

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use alx_poll::adapters::auth::JwtSessionValidator;
use alx_poll::adapters::http::{build_router, PollHandlers};
use alx_poll::adapters::postgres::{
    self, PostgresPollReader, PostgresPollRepository, PostgresVoteRepository,
};
use alx_poll::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Configuration
    let config = AppConfig::load()?;
    config.validate()?;

    // 2. Logging
    init_tracing(&config.server.log_level, config.is_production());
    tracing::info!(
        environment = ?config.server.environment,
        "Starting alx-poll"
    );

    // 3. Database
    let pool = match postgres::connect(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        postgres::run_migrations(&pool, Path::new("migrations")).await?;
    }

    // 4. Adapters and workflows
    let handlers = PollHandlers::from_ports(
        Arc::new(PostgresPollRepository::new(pool.clone())),
        Arc::new(PostgresPollReader::new(pool.clone())),
        Arc::new(PostgresVoteRepository::new(pool)),
    );
    let validator = Arc::new(JwtSessionValidator::from_config(&config.auth));

    let app = build_router(handlers, validator, &config.server);

    // 5. Serve
    let addr = config.server.socket_addr()?;
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            return Err(e.into());
        }
    };
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received terminate signal, shutting down"),
    }
}
