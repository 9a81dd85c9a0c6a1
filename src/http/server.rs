//! HTTP server setup.
//!
//! # Responsibilities
//! - Attach the shared `App` state to the page router
//! - Wire up middleware (request ID, tracing)
//! - Serve with peer addresses available to `IncomingRequest`
//! - Shut down gracefully on Ctrl+C

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::http::HeaderName;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::app::App;
use crate::http::headers::X_REQUEST_ID;
use crate::views::load_client_views;

/// HTTP server for page handlers built on `Responder`.
pub struct HttpServer {
    router: Router,
    app: Arc<App>,
}

impl HttpServer {
    /// Create a server for `routes`, whose handlers take `Arc<App>` state.
    pub fn new(app: Arc<App>, routes: Router<Arc<App>>) -> Self {
        let router = Self::build_router(app.clone(), routes);
        Self { router, app }
    }

    fn build_router(app: Arc<App>, routes: Router<Arc<App>>) -> Router {
        let request_id = HeaderName::from_static(X_REQUEST_ID);
        routes
            .with_state(app)
            .layer(PropagateRequestIdLayer::new(request_id.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
    }

    /// The router with state and middleware applied (useful for in-process tests).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;

        if let Some(dir) = self.app.config().views.client_views_dir.as_deref() {
            if let Err(e) = load_client_views(&self.app, Path::new(dir)).await {
                tracing::warn!(dir = %dir, error = %e, "Failed to load client views");
            }
        }

        tracing::info!(
            address = %addr,
            env = %self.app.config().app.env,
            "HTTP server starting"
        );

        let service = self.router.into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, service)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
