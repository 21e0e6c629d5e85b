use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{Json, Router, routing::post};
use clap::Parser;
use tower_http::cors::CorsLayer;

use lifegrid::api::{self, ApiError, SimulateRequest, SimulateResponse};

/// HTTP front end for the Game of Life simulator.
#[derive(Parser)]
#[command(name = "lifegrid-server")]
struct Args {
    /// Listen address.
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,
}

async fn simulate_handler(
    Json(req): Json<SimulateRequest>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let response = tokio::task::spawn_blocking(move || api::simulate(&req)).await??;
    Ok(Json(response))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let app = Router::new()
        .route("/api/simulate", post(simulate_handler))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("Failed to bind {}", args.addr))?;
    log::info!("lifegrid server at http://{}", args.addr);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
