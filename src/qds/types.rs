//! Request and response shapes for the Qubole REST API.
//!
//! Field names follow the wire format of the v2 cluster API and the v1.2
//! command/notebook/db-tap endpoints.

use serde::{Deserialize, Serialize};

// =============================================================================
// Clusters
// =============================================================================

/// v2 cluster-creation payload: cluster shape, cloud placement, engine.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterCreateRequest {
    pub cluster_info: ClusterInfo,
    pub cloud_config: CloudConfig,
    pub engine_config: EngineConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusterInfo {
    /// Labels for the new cluster; the first is the primary name
    pub label: Vec<String>,
    pub min_nodes: u32,
    pub max_nodes: u32,
    pub master_instance_type: String,
    pub slave_instance_type: String,
    /// `ondemand` or `spot`
    pub slave_request_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CloudConfig {
    pub provider: String,
    pub location: CloudLocation,
    pub network_config: NetworkConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct CloudLocation {
    pub aws_region: String,
    pub aws_availability_zone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkConfig {
    pub vpc_id: String,
    pub subnet_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineConfig {
    /// Engine flavour: `hadoop2` or `spark`
    pub flavour: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spark_version: Option<String>,
}

/// Response to cluster creation
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterCreated {
    pub id: u64,
    #[serde(default)]
    pub label: Vec<String>,
}

/// One entry of the cluster listing; the platform nests the cluster
/// object under a `cluster` key.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterListEntry {
    pub cluster: ClusterLabels,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterLabels {
    #[serde(default)]
    pub label: Vec<String>,
}

// =============================================================================
// Notebooks
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NotebookImportRequest {
    pub name: String,
    pub location: String,
    pub url: String,
    pub note_type: String,
    pub cluster_id: u64,
}

/// The import endpoint reports logical failure in-band: a 200 response
/// with `success: false` and a message.
#[derive(Debug, Clone, Deserialize)]
pub struct NotebookImportResult {
    pub success: bool,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub message: String,
}

// =============================================================================
// Data stores (db taps)
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct DataStore {
    pub id: u64,
    pub name: String,
}

/// Paged db-tap listing; the demo account fits in one page.
#[derive(Debug, Clone, Deserialize)]
pub struct DataStoreList {
    #[serde(default)]
    pub db_taps: Vec<DataStore>,
}

// =============================================================================
// Commands
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HiveCommandRequest {
    pub query: String,
    /// Cluster label the query runs against
    pub label: String,
    pub command_type: String,
}

impl HiveCommandRequest {
    pub fn new(query: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            label: label.into(),
            command_type: "HiveCommand".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DbImportCommandRequest {
    pub command_type: String,
    pub mode: u32,
    pub dbtap_id: u64,
    pub db_table: String,
    pub hive_table: String,
    pub hive_serde: String,
    pub use_customer_cluster: bool,
    pub customer_cluster_label: String,
}

/// Response to command submission; execution continues remotely.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandSubmitted {
    pub id: u64,
    #[serde(default)]
    pub status: String,
}
