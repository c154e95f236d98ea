//! Serve command - runs the API server

use std::net::SocketAddr;

use clap::Args;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::create_router;
use crate::config::AppConfig;
use crate::infrastructure::logging;

#[derive(Args, Default)]
pub struct ServeArgs {
    /// Host to bind to (overrides configuration)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to run the server on (overrides configuration and PORT)
    #[arg(long)]
    pub port: Option<u16>,
}

/// Run the API server until interrupted.
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let state = crate::create_app_state(&config)?;

    if state.api_key.is_some() {
        info!("API key authentication enabled");
    } else {
        warn!("API_KEY not set. API is publicly accessible!");
    }

    let addr = resolve_addr(&config, &args)?;
    let app = create_router(state);

    info!("Claude Gateway listening on http://{}", addr);
    info!("  POST /v1/chat/completions");
    info!("  GET  /v1/models");
    info!("  GET  /health");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Resolve the bind address. Precedence for the port: CLI flag, then the
/// PORT environment variable, then configuration.
fn resolve_addr(config: &AppConfig, args: &ServeArgs) -> anyhow::Result<SocketAddr> {
    let host = args.host.as_deref().unwrap_or(&config.server.host);

    let port = match args.port {
        Some(port) => port,
        None => match std::env::var("PORT") {
            Ok(value) if !value.is_empty() => value.parse()?,
            _ => config.server.port,
        },
    };

    Ok(SocketAddr::new(host.parse()?, port))
}
