use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use louaj_web::central::CentralClient;
use louaj_web::config::AppConfig;
use louaj_web::session::SessionStore;
use louaj_web::web::{AppState, create_router};

const DEFAULT_LOG_FILTER: &str = "louaj_web=info,tower_http=info";

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    let central = CentralClient::new(config.central.clone())?;
    info!(central = %central.base_url(), "using central server");

    let sessions = SessionStore::new(&config.session);
    let state = AppState::new(central, sessions);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Louaj listening on http://{}", config.bind_addr);
    info!("  GET  /            - Home page");
    info!("  GET  /book        - Booking wizard");
    info!("  GET  /api/stations - Station listing (JSON)");
    info!("  GET  /health      - Health check");

    axum::serve(listener, app).await?;
    Ok(())
}
