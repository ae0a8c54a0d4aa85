use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use fare_server::advisor;
use fare_server::config::ServerConfig;
use fare_server::coordinator::WriteCoordinator;
use fare_server::store::{FareLog, StoreCell};
use fare_server::web::{AppState, create_router};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let stores = StoreCell::new().connect();

    let log = match FareLog::open_or_create(&config.fares_path) {
        Ok(log) => Arc::new(log),
        Err(e) => {
            error!(path = %config.fares_path.display(), error = %e, "could not open fare log");
            return ExitCode::FAILURE;
        }
    };

    let coordinator = match WriteCoordinator::connect(Arc::clone(&stores), log) {
        Ok((coordinator, _report)) => coordinator,
        Err(e) => {
            error!(path = %config.fares_path.display(), error = %e, "could not replay fare log");
            return ExitCode::FAILURE;
        }
    };

    // Blocks on stdin until EOF
    if config.advisor {
        let stores = Arc::clone(&stores);
        let spawned = std::thread::Builder::new()
            .name("advisor".into())
            .spawn(move || {
                if let Err(e) = advisor::run(&stores, io::stdin().lock(), io::stdout()) {
                    warn!(error = %e, "advisor stopped");
                }
            });
        if let Err(e) = spawned {
            warn!(error = %e, "could not start advisor");
        }
    }

    let app = create_router(AppState::new(coordinator));

    let addr = config.addr;
    println!("Fare server listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health                       - Health check");
    println!("  GET  /routes/best?board=XXX&dest=YYY - Cheapest route");
    println!("  POST /routes                       - Add a fare");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    info!("server stopped");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(e) => warn!(error = %e, "could not listen for ctrl-c, shutting down"),
    }
}
