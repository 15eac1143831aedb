//! API server initialization

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{DefaultBodyLimit, Request};
use axum::response::Redirect;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use super::auth::{AuthState, identify_caller};
use super::middleware::{self, AllowedOrigins};
use super::openapi::{openapi_json, swagger_ui_html};
use super::routes::{health, tables};
use crate::core::constants::DEFAULT_BODY_LIMIT;
use crate::core::{AppConfig, ShutdownService};
use crate::domain::QueryService;

pub struct ApiServer {
    config: AppConfig,
    service: QueryService,
    shutdown: ShutdownService,
}

impl ApiServer {
    pub fn new(config: AppConfig, service: QueryService, shutdown: ShutdownService) -> Self {
        Self {
            config,
            service,
            shutdown,
        }
    }

    /// Assemble the full router with middleware
    pub fn router(&self) -> Result<Router> {
        let auth_state = AuthState::from_config(&self.config.auth)?;
        let allowed_origins =
            AllowedOrigins::new(&self.config.server.host, self.config.server.port);

        // Caller identity only matters for table routes
        let table_routes = tables::routes(self.service.clone()).layer(
            axum::middleware::from_fn_with_state(auth_state, identify_caller),
        );

        let debug_mode = self.config.debug;
        let router = Router::new()
            .route("/", get(|| async { Redirect::temporary("/api/docs") }))
            .route("/api/v1/health", get(health::health))
            .route("/api/openapi.json", get(openapi_json))
            .route("/api/docs", get(swagger_ui_html))
            .route("/api/docs/", get(swagger_ui_html))
            .nest("/api/v1/table", table_routes)
            .fallback(move |req: Request| middleware::handle_404(req, debug_mode))
            .layer(CompressionLayer::new())
            .layer(middleware::cors(&allowed_origins))
            .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT));

        Ok(router)
    }

    /// Serve until the shutdown signal fires
    pub async fn start(self) -> Result<()> {
        let host = &self.config.server.host;
        let port = self.config.server.port;
        let addr = SocketAddr::new(
            host.parse()
                .with_context(|| format!("Invalid server host address: {}", host))?,
            port,
        );

        let router = self.router()?;

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::debug!(addr = %addr, "Listening");

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(self.shutdown.wait())
        .await?;

        tracing::debug!("Server stopped");
        Ok(())
    }
}
