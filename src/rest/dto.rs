//! Data Transfer Objects for the wizard endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Login form submitted by the browser
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Body of `POST /step`; `step` is optional so a bare POST just echoes
/// the current state
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StepRequest {
    #[serde(default)]
    pub step: Option<u32>,
}

/// Session state returned by `/step`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionStateResponse {
    pub current_step: u32,
}

/// Body of `POST /run_query`
#[derive(Debug, Deserialize, ToSchema)]
pub struct RunQueryRequest {
    /// One of `web_logs`, `top_categories`, `top_products`, `top_revenue`
    pub query_name: String,
}

/// A submitted asynchronous command
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommandResponse {
    pub command_id: u64,
}

/// The batch of commands submitted by `/run_scaling`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScalingResponse {
    pub command_ids: Vec<u64>,
}

/// Result of a full provisioning run
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProvisionResponse {
    pub hadoop_cluster_id: u64,
    pub spark_cluster_id: u64,
    pub spark_notebook_id: u64,
    pub dashboard_notebook_id: u64,
}

impl From<crate::workflow::ProvisionedIds> for ProvisionResponse {
    fn from(ids: crate::workflow::ProvisionedIds) -> Self {
        Self {
            hadoop_cluster_id: ids.hadoop_cluster_id,
            spark_cluster_id: ids.spark_cluster_id,
            spark_notebook_id: ids.spark_notebook_id,
            dashboard_notebook_id: ids.dashboard_notebook_id,
        }
    }
}

/// Result of `/import_tables`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImportTablesResponse {
    pub data_store_id: u64,
    /// Command ids in table order
    pub command_ids: Vec<u64>,
}

/// Cluster labels known to the platform
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClustersResponse {
    pub clusters: Vec<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
