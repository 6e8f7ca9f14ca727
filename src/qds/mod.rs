//! Typed client for the Qubole Data Service REST API.
//!
//! The wizard only ever talks to the platform through the [`DataPlatform`]
//! trait so request handlers and tests can swap the real HTTP client for a
//! scripted fake.

use async_trait::async_trait;

pub mod client;
pub mod error;
pub mod mock;
pub mod types;

pub use client::QdsClient;
pub use error::QdsError;
pub use types::{
    ClusterCreateRequest, ClusterCreated, ClusterListEntry, CommandSubmitted, DataStore,
    DbImportCommandRequest, HiveCommandRequest, NotebookImportRequest, NotebookImportResult,
};

/// Operations the wizard needs from the remote platform.
///
/// One method per endpoint; no retries, no timeouts beyond the transport
/// defaults. Errors carry the platform's own payload where one exists.
#[async_trait]
pub trait DataPlatform: Send + Sync {
    /// Provision a new cluster. The response carries the platform id.
    async fn create_cluster(
        &self,
        request: &ClusterCreateRequest,
    ) -> Result<ClusterCreated, QdsError>;

    /// Delete the cluster configuration with the given label.
    async fn delete_cluster(&self, label: &str) -> Result<(), QdsError>;

    /// Start the cluster with the given label.
    async fn start_cluster(&self, label: &str) -> Result<(), QdsError>;

    /// List all cluster configurations visible to the account.
    async fn list_clusters(&self) -> Result<Vec<ClusterListEntry>, QdsError>;

    /// Import a notebook from a source URL into a cluster context.
    async fn import_notebook(
        &self,
        request: &NotebookImportRequest,
    ) -> Result<NotebookImportResult, QdsError>;

    /// List registered data stores (db taps).
    async fn list_data_stores(&self) -> Result<Vec<DataStore>, QdsError>;

    /// Submit a Hive query for asynchronous execution.
    async fn submit_hive_command(
        &self,
        request: &HiveCommandRequest,
    ) -> Result<CommandSubmitted, QdsError>;

    /// Submit a table import command.
    async fn submit_db_import(
        &self,
        request: &DbImportCommandRequest,
    ) -> Result<CommandSubmitted, QdsError>;
}
