//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router: per-role NIC and bond routes, `/status`, 404 fallback
//! - Wire up middleware (tracing, request ID, timeout)
//! - Bind server to listener with peer address info
//! - Stop on Ctrl+C or a programmatic shutdown trigger

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::routing::get;
use axum::{Extension, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::http::routes::{role_pattern, RouteRegistry, RouteTable, BOND_PATH, NIC_PATH, STATUS_PATH};
use crate::ignition::{Role, RoleConfigStore};
use crate::lifecycle::shutdown::shutdown_signal;
use crate::render::{FileEmbedder, TemplateRenderer};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RoleConfigStore>,
    pub renderer: Arc<TemplateRenderer>,
    pub embedder: Arc<FileEmbedder>,
    pub routes: Arc<RouteTable>,
}

/// HTTP server for the config generator.
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    routes: Arc<RouteTable>,
}

impl HttpServer {
    /// Create a new HTTP server over a loaded store and renderer.
    pub fn new(config: ServiceConfig, store: RoleConfigStore, renderer: TemplateRenderer) -> Self {
        let (routes, table) = Self::register_routes().into_parts();
        let table = Arc::new(table);

        let state = AppState {
            store: Arc::new(store),
            renderer: Arc::new(renderer),
            embedder: Arc::new(FileEmbedder::from_config(&config.files)),
            routes: table.clone(),
        };

        let router = Self::build_router(&config, routes, state);
        Self {
            router,
            config,
            routes: table,
        }
    }

    fn register_routes() -> RouteRegistry<AppState> {
        let mut registry = RouteRegistry::new();
        for role in Role::ALL {
            registry = registry
                .route(
                    &format!("/{}{}", role, NIC_PATH),
                    role_pattern(NIC_PATH),
                    get(handlers::nic).layer(Extension(role)),
                )
                .route(
                    &format!("/{}{}", role, BOND_PATH),
                    role_pattern(BOND_PATH),
                    get(handlers::bond).layer(Extension(role)),
                );
        }
        registry.route(STATUS_PATH, STATUS_PATH, get(handlers::status))
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, routes: Router<AppState>, state: AppState) -> Router {
        routes
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener until
    /// Ctrl+C or `shutdown` fires.
    pub async fn run(self, listener: TcpListener, shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );
        for pattern in self.routes.patterns() {
            tracing::info!(route = pattern, "Registered route");
        }

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Route patterns this server answers.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }
}

fn request_span(request: &Request) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}
