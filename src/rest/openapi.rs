//! OpenAPI specification builder using utoipa.

use utoipa::OpenApi;

use crate::rest::dto::{
    ClustersResponse, CommandResponse, HealthResponse, ImportTablesResponse, LoginForm,
    ProvisionResponse, RunQueryRequest, ScalingResponse, SessionStateResponse, StepRequest,
};
use crate::rest::error::ErrorResponse;

/// OpenAPI documentation for the wizard API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quickstart Wizard API",
        version = "0.3.0",
        description = "Wizard endpoints for provisioning Qubole demo infrastructure.",
        license(name = "MIT")
    ),
    paths(
        crate::rest::routes::health::health,
        crate::rest::routes::session::get_step,
        crate::rest::routes::session::set_step,
        crate::rest::routes::provision::create_clusters_and_notebooks,
        crate::rest::routes::provision::clusters,
        crate::rest::routes::tables::import_tables,
        crate::rest::routes::queries::run_query,
        crate::rest::routes::queries::run_scaling,
    ),
    components(
        schemas(
            // Response types
            HealthResponse,
            SessionStateResponse,
            ProvisionResponse,
            ClustersResponse,
            ImportTablesResponse,
            CommandResponse,
            ScalingResponse,
            ErrorResponse,
            // Request types
            LoginForm,
            StepRequest,
            RunQueryRequest,
        )
    ),
    tags(
        (name = "Health", description = "Health check"),
        (name = "Session", description = "Wizard step tracking"),
        (name = "Provisioning", description = "Cluster and notebook provisioning"),
        (name = "Tables", description = "Demo table imports"),
        (name = "Queries", description = "Asynchronous Hive queries"),
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI specification as a JSON string
    pub fn json() -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::openapi())
    }
}
