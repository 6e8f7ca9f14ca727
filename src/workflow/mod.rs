//! Domain intents over the platform client.
//!
//! Each function translates a wizard-level intent ("create the Hadoop
//! cluster", "import the dashboard notebook") into the request shapes the
//! platform expects, built from configuration. Remote errors are not caught
//! here; they propagate to the caller as [`WorkflowError::Platform`].

use thiserror::Error;

use crate::qds::QdsError;
use crate::queries::QueryError;

pub mod clusters;
pub mod notebooks;
pub mod provision;
pub mod queries;
pub mod stores;

pub use clusters::{create_hadoop_cluster, create_spark_cluster, list_cluster_names};
pub use notebooks::{import_dashboard_notebook, import_spark_notebook};
pub use provision::{ProvisionFailure, ProvisionStep, ProvisionedIds};
pub use queries::run_hive_query_asynchronous;
pub use stores::{find_data_store_id, import_data_table, resolve_data_store};

#[derive(Error, Debug)]
pub enum WorkflowError {
    /// The named data store resolved to zero or more than one entry.
    #[error("data store '{name}' matched {matches} registered stores, expected exactly one")]
    DataStoreNotFound { name: String, matches: usize },

    #[error(transparent)]
    Platform(#[from] QdsError),

    #[error(transparent)]
    Query(#[from] QueryError),
}
