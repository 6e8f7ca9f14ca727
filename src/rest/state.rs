//! Shared state for the wizard server.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::qds::DataPlatform;
use crate::queries::QueryLibrary;
use crate::workflow::ProvisionedIds;

use super::session::SessionStore;

/// Platform ids captured by the last successful provisioning run.
///
/// A deliberate, explicit home for state the wizard previously had no
/// place for; in-memory only and lost on restart.
#[derive(Debug, Default, Clone)]
pub struct ProvisionedResources {
    pub hadoop_cluster_id: Option<u64>,
    pub spark_cluster_id: Option<u64>,
    pub spark_notebook_id: Option<u64>,
    pub dashboard_notebook_id: Option<u64>,
}

impl ProvisionedResources {
    pub fn record(&mut self, ids: ProvisionedIds) {
        self.hadoop_cluster_id = Some(ids.hadoop_cluster_id);
        self.spark_cluster_id = Some(ids.spark_cluster_id);
        self.spark_notebook_id = Some(ids.spark_notebook_id);
        self.dashboard_notebook_id = Some(ids.dashboard_notebook_id);
    }
}

/// Shared state for the wizard server
#[derive(Clone)]
pub struct ApiState {
    pub config: Arc<Config>,
    pub platform: Arc<dyn DataPlatform>,
    pub queries: Arc<QueryLibrary>,
    pub sessions: SessionStore,
    pub resources: Arc<RwLock<ProvisionedResources>>,
}

impl ApiState {
    /// Create new state from config and a platform client.
    pub fn new(config: Config, platform: Arc<dyn DataPlatform>) -> Self {
        let queries = Arc::new(QueryLibrary::new(config.queries_path()));
        let sessions = SessionStore::new(config.server.session_ttl_minutes);
        Self {
            config: Arc::new(config),
            platform,
            queries,
            sessions,
            resources: Arc::new(RwLock::new(ProvisionedResources::default())),
        }
    }
}
