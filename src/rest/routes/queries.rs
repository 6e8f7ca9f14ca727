//! Hive query endpoints.

use axum::extract::State;
use axum::Json;
use serde_json::json;
use tracing::info;

use crate::rest::dto::{CommandResponse, RunQueryRequest, ScalingResponse};
use crate::rest::error::ApiError;
use crate::rest::session::CurrentSession;
use crate::rest::state::ApiState;
use crate::workflow::run_hive_query_asynchronous;

/// Number of duplicate submissions the scaling demo fires
const SCALING_RUNS: usize = 10;

const SCALING_QUERY_FILE: &str = "top_10_revenue_generating_products.sql";

/// Map a logical query name to its template file.
fn query_file_for(query_name: &str) -> Option<&'static str> {
    match query_name {
        "web_logs" => Some("create_web_logs_table.sql"),
        "top_categories" => Some("top_10_most_popular_categories.sql"),
        "top_products" => Some("top_10_most_viewed_products.sql"),
        "top_revenue" => Some("top_10_revenue_generating_products.sql"),
        _ => None,
    }
}

/// Submit one of the named demo queries for asynchronous execution.
///
/// Unrecognized names fail before any platform call.
#[utoipa::path(
    post,
    path = "/run_query",
    tag = "Queries",
    request_body = RunQueryRequest,
    responses(
        (status = 200, description = "Query submitted", body = CommandResponse),
        (status = 400, description = "Unknown query name"),
        (status = 401, description = "No live session")
    )
)]
pub async fn run_query(
    CurrentSession(_session): CurrentSession,
    State(state): State<ApiState>,
    Json(request): Json<RunQueryRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let query_filename = query_file_for(&request.query_name).ok_or_else(|| {
        ApiError::BadRequest(format!("unknown query name '{}'", request.query_name))
    })?;

    let warehouse = &state.config.warehouse;
    let submitted = run_hive_query_asynchronous(
        state.platform.as_ref(),
        &state.queries,
        &state.config.clusters.hadoop_cluster_name,
        query_filename,
        &json!({
            "web_logs_s3_dir": warehouse.web_logs_s3_dir,
            "database_name": warehouse.database_name,
        }),
    )
    .await?;

    info!(
        "Submitted query '{}' ({query_filename}) as command {}",
        request.query_name, submitted.id
    );
    Ok(Json(CommandResponse {
        command_id: submitted.id,
    }))
}

/// Submit the revenue query ten times in a row, purely to generate load
/// for the autoscaling demo.
#[utoipa::path(
    post,
    path = "/run_scaling",
    tag = "Queries",
    responses(
        (status = 200, description = "All load queries submitted", body = ScalingResponse),
        (status = 401, description = "No live session")
    )
)]
pub async fn run_scaling(
    CurrentSession(_session): CurrentSession,
    State(state): State<ApiState>,
) -> Result<Json<ScalingResponse>, ApiError> {
    let warehouse = &state.config.warehouse;
    let mut command_ids = Vec::with_capacity(SCALING_RUNS);
    for _ in 0..SCALING_RUNS {
        let submitted = run_hive_query_asynchronous(
            state.platform.as_ref(),
            &state.queries,
            &state.config.clusters.hadoop_cluster_name,
            SCALING_QUERY_FILE,
            &json!({"database_name": warehouse.database_name}),
        )
        .await?;
        command_ids.push(submitted.id);
    }

    info!("Submitted {SCALING_RUNS} scaling queries");
    Ok(Json(ScalingResponse { command_ids }))
}
