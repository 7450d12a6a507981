//! Static file server exposing the series files to viewers.

use crate::Result;
use axum::Router;
use core::net::{Ipv4Addr, SocketAddr};
use ohno::IntoAppError;
use std::path::Path;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

const LOG_TARGET: &str = "    server";

/// Router serving every file under `assets_dir` at the root path
pub fn router(assets_dir: impl AsRef<Path>) -> Router {
    Router::new().fallback_service(ServeDir::new(assets_dir.as_ref()))
}

/// Bind `port` on all interfaces and serve `assets_dir` until the process exits
pub async fn serve(port: u16, assets_dir: impl AsRef<Path>) -> Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let listener = TcpListener::bind(addr)
        .await
        .into_app_err_with(|| format!("unable to listen on port {port}"))?;

    serve_on(listener, assets_dir).await
}

/// Serve `assets_dir` on an already bound listener
pub async fn serve_on(listener: TcpListener, assets_dir: impl AsRef<Path>) -> Result<()> {
    let assets_dir = assets_dir.as_ref();
    let local_addr = listener.local_addr().into_app_err("unable to read listener address")?;
    log::info!(target: LOG_TARGET, "Serving '{}' on {local_addr}", assets_dir.display());

    axum::serve(listener, router(assets_dir))
        .await
        .into_app_err("static file server stopped")
}
