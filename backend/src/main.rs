use dotenvy::dotenv;
use axum::{
    routing::get,
    Router,
};
use anyhow::{bail, Context};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{CorsLayer, Any};
use tower_http::services::ServeDir;
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnResponse};
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod site;
mod handlers {
    pub mod downloads;
    pub mod pages;
}
#[cfg(test)]
mod test_support;

use config::ServerConfig;
use handlers::{downloads, pages};

pub struct AppState {
    root: PathBuf,
}

pub fn app(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/downloads/{*path}", get(downloads::download));

    for &(path, file) in pages::PAGE_ROUTES {
        let state = state.clone();
        router = router.route(path, get(move || pages::serve_html(state, file)));
    }

    router
        .fallback_service(ServeDir::new(&state.root))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(
            CorsLayer::new()
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_origin(Any)
                .allow_headers([axum::http::header::CONTENT_TYPE])
        )
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        return;
    }
    tracing::info!("Server stopped by user");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port_arg = std::env::args().nth(1);
    let config = ServerConfig::from_env(port_arg.as_deref())?;
    tracing::info!("Starting portfolio server on port {}", config.port);

    site::check_downloads(&config.root);

    let listener = match TcpListener::bind(config.bind_addr()).await {
        Ok(listener) => listener,
        Err(e) if e.kind() == ErrorKind::AddrInUse => {
            bail!(
                "Port {} is already in use. Wait for the other process to exit or pass another port, e.g. `portfolio-server 8080`",
                config.port
            );
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to bind {}", config.bind_addr())),
    };

    site::log_banner(&config);

    let state = Arc::new(AppState { root: config.root.clone() });
    axum::serve(listener, app(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;
    Ok(())
}
