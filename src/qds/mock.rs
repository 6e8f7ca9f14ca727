//! Mock platform implementation for testing.
//!
//! Scripted through its public fields: seed listings, mark a cluster label
//! or notebook name as failing, and inspect the call log afterwards.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use super::error::QdsError;
use super::types::{
    ClusterCreateRequest, ClusterCreated, ClusterLabels, ClusterListEntry, CommandSubmitted,
    DataStore, DbImportCommandRequest, HiveCommandRequest, NotebookImportRequest,
    NotebookImportResult,
};
use super::DataPlatform;

/// Mock implementation for testing
#[derive(Default)]
pub struct MockPlatform {
    /// Record of calls in invocation order, e.g. `create:hadoop2`
    pub call_log: Arc<Mutex<Vec<String>>>,
    /// Data stores returned by `list_data_stores`
    pub data_stores: Arc<Mutex<Vec<DataStore>>>,
    /// Cluster labels returned by `list_clusters`
    pub cluster_labels: Arc<Mutex<Vec<Vec<String>>>>,
    /// Submitted Hive commands (for content assertions)
    pub hive_commands: Arc<Mutex<Vec<HiveCommandRequest>>>,
    /// Submitted table imports
    pub db_imports: Arc<Mutex<Vec<DbImportCommandRequest>>>,
    /// Whether `delete_cluster` reports the cluster as missing
    pub delete_reports_not_found: Arc<Mutex<bool>>,
    /// Cluster label whose creation fails with a platform error payload
    pub fail_create_label: Arc<Mutex<Option<String>>>,
    /// Notebook name whose import reports `success: false`
    pub fail_notebook_name: Arc<Mutex<Option<String>>>,
    next_id: AtomicU64,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(100),
            ..Self::default()
        }
    }

    /// Create a mock whose data-store listing returns the given stores
    pub fn with_data_stores(stores: Vec<DataStore>) -> Self {
        let mock = Self::new();
        *mock.data_stores.lock().unwrap() = stores;
        mock
    }

    /// Create a mock where creating the given cluster label fails
    pub fn failing_create(label: &str) -> Self {
        let mock = Self::new();
        *mock.fail_create_label.lock().unwrap() = Some(label.to_string());
        mock
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.call_log.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.call_log.lock().unwrap().push(call);
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

#[async_trait]
impl DataPlatform for MockPlatform {
    async fn create_cluster(
        &self,
        request: &ClusterCreateRequest,
    ) -> Result<ClusterCreated, QdsError> {
        let label = request.cluster_info.label[0].clone();
        self.record(format!("create:{label}"));
        if self.fail_create_label.lock().unwrap().as_deref() == Some(label.as_str()) {
            return Err(QdsError::Api {
                status: 422,
                payload: json!({"error": {"error_message": "label already taken"}}),
            });
        }
        Ok(ClusterCreated {
            id: self.next_id(),
            label: vec![label],
        })
    }

    async fn delete_cluster(&self, label: &str) -> Result<(), QdsError> {
        self.record(format!("delete:{label}"));
        if *self.delete_reports_not_found.lock().unwrap() {
            return Err(QdsError::NotFound(format!("clusters/{label}")));
        }
        Ok(())
    }

    async fn start_cluster(&self, label: &str) -> Result<(), QdsError> {
        self.record(format!("start:{label}"));
        Ok(())
    }

    async fn list_clusters(&self) -> Result<Vec<ClusterListEntry>, QdsError> {
        self.record("list_clusters".to_string());
        Ok(self
            .cluster_labels
            .lock()
            .unwrap()
            .iter()
            .map(|labels| ClusterListEntry {
                cluster: ClusterLabels {
                    label: labels.clone(),
                },
            })
            .collect())
    }

    async fn import_notebook(
        &self,
        request: &NotebookImportRequest,
    ) -> Result<NotebookImportResult, QdsError> {
        self.record(format!("notebook:{}", request.name));
        if self.fail_notebook_name.lock().unwrap().as_deref() == Some(request.name.as_str()) {
            return Ok(NotebookImportResult {
                success: false,
                id: None,
                message: "already exists".to_string(),
            });
        }
        Ok(NotebookImportResult {
            success: true,
            id: Some(self.next_id()),
            message: String::new(),
        })
    }

    async fn list_data_stores(&self) -> Result<Vec<DataStore>, QdsError> {
        self.record("list_data_stores".to_string());
        Ok(self.data_stores.lock().unwrap().clone())
    }

    async fn submit_hive_command(
        &self,
        request: &HiveCommandRequest,
    ) -> Result<CommandSubmitted, QdsError> {
        self.record(format!("hive_command:{}", request.label));
        self.hive_commands.lock().unwrap().push(request.clone());
        Ok(CommandSubmitted {
            id: self.next_id(),
            status: "waiting".to_string(),
        })
    }

    async fn submit_db_import(
        &self,
        request: &DbImportCommandRequest,
    ) -> Result<CommandSubmitted, QdsError> {
        self.record(format!("db_import:{}", request.db_table));
        self.db_imports.lock().unwrap().push(request.clone());
        Ok(CommandSubmitted {
            id: self.next_id(),
            status: "waiting".to_string(),
        })
    }
}
