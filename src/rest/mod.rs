//! Wizard web server.
//!
//! Serves the login and wizard pages, gates the provisioning endpoints
//! behind a session, and relays platform responses back to the browser.

use std::net::SocketAddr;

use anyhow::Result;
use axum::{
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod session;
pub mod state;

pub use openapi::ApiDoc;
pub use state::{ApiState, ProvisionedResources};

/// Serve the generated OpenAPI document
async fn openapi_spec() -> Response {
    match ApiDoc::json() {
        Ok(spec) => ([(header::CONTENT_TYPE, "application/json")], spec).into_response(),
        Err(e) => error::ApiError::InternalError(e.to_string()).into_response(),
    }
}

/// Build the wizard router with all routes
pub fn build_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Pages and login
        .route("/", get(routes::pages::home))
        .route("/wizard", get(routes::pages::wizard))
        .route("/login", post(routes::pages::login))
        // Session state
        .route(
            "/step",
            get(routes::session::get_step).post(routes::session::set_step),
        )
        // Provisioning
        .route(
            "/create_clusters_and_notebooks",
            post(routes::provision::create_clusters_and_notebooks),
        )
        .route("/clusters", get(routes::provision::clusters))
        // Tables and queries
        .route("/import_tables", post(routes::tables::import_tables))
        .route("/run_query", post(routes::queries::run_query))
        .route("/run_scaling", post(routes::queries::run_scaling))
        // Service endpoints
        .route("/health", get(routes::health::health))
        .route("/api/openapi.json", get(openapi_spec))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the wizard server
pub async fn serve(state: ApiState, port: u16) -> Result<()> {
    let app = build_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!("Wizard listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
