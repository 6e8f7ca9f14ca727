//! The fixed provisioning sequence behind the wizard's "create clusters
//! and notebooks" action.
//!
//! Each cluster is deleted (tolerating "not found") and recreated so a
//! stale configuration never blocks the wizard, then started; the two
//! notebooks are imported into the Spark cluster last because they need
//! its id. The first failing step aborts the sequence and carries the
//! platform's error payload out; completed steps are recorded so a retry
//! or resume capability can be layered on later.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::config::Config;
use crate::qds::{DataPlatform, QdsError};

use super::clusters::{create_hadoop_cluster, create_spark_cluster};
use super::notebooks::{import_dashboard_notebook, import_spark_notebook};
use super::WorkflowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionStep {
    DeleteHadoopCluster,
    CreateHadoopCluster,
    StartHadoopCluster,
    DeleteSparkCluster,
    CreateSparkCluster,
    StartSparkCluster,
    ImportSparkNotebook,
    ImportDashboardNotebook,
}

impl ProvisionStep {
    pub fn as_str(self) -> &'static str {
        match self {
            ProvisionStep::DeleteHadoopCluster => "delete_hadoop_cluster",
            ProvisionStep::CreateHadoopCluster => "create_hadoop_cluster",
            ProvisionStep::StartHadoopCluster => "start_hadoop_cluster",
            ProvisionStep::DeleteSparkCluster => "delete_spark_cluster",
            ProvisionStep::CreateSparkCluster => "create_spark_cluster",
            ProvisionStep::StartSparkCluster => "start_spark_cluster",
            ProvisionStep::ImportSparkNotebook => "import_spark_notebook",
            ProvisionStep::ImportDashboardNotebook => "import_dashboard_notebook",
        }
    }
}

/// Platform ids captured by a fully successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProvisionedIds {
    pub hadoop_cluster_id: u64,
    pub spark_cluster_id: u64,
    pub spark_notebook_id: u64,
    pub dashboard_notebook_id: u64,
}

/// A step failed; later steps did not run.
#[derive(Debug)]
pub struct ProvisionFailure {
    pub step: ProvisionStep,
    pub completed: Vec<ProvisionStep>,
    /// Error payload to relay to the client
    pub payload: Value,
}

impl ProvisionFailure {
    fn remote(step: ProvisionStep, completed: &[ProvisionStep], error: &QdsError) -> Self {
        Self {
            step,
            completed: completed.to_vec(),
            payload: error_payload(error),
        }
    }

    fn from_workflow(
        step: ProvisionStep,
        completed: &[ProvisionStep],
        error: &WorkflowError,
    ) -> Self {
        let payload = match error {
            WorkflowError::Platform(qds) => error_payload(qds),
            other => message_payload(&other.to_string()),
        };
        Self {
            step,
            completed: completed.to_vec(),
            payload,
        }
    }

    fn notebook(step: ProvisionStep, completed: &[ProvisionStep], name: &str, message: &str) -> Self {
        Self {
            step,
            completed: completed.to_vec(),
            payload: message_payload(&format!("Notebook {name} {message}")),
        }
    }
}

/// The platform's structured payload when there is one, otherwise the
/// error message in the same `{error: {error_message}}` shape.
fn error_payload(error: &QdsError) -> Value {
    error
        .payload()
        .cloned()
        .unwrap_or_else(|| message_payload(&error.to_string()))
}

fn message_payload(message: &str) -> Value {
    json!({"error": {"error_message": message}})
}

/// Delete a cluster configuration, treating "not found" as benign: the
/// cluster may never have existed or was already removed, and either way
/// it can now be created again.
async fn delete_cluster_tolerating_missing(
    platform: &dyn DataPlatform,
    label: &str,
    step: ProvisionStep,
    completed: &mut Vec<ProvisionStep>,
) -> Result<(), ProvisionFailure> {
    match platform.delete_cluster(label).await {
        Ok(()) => {}
        Err(error) if error.is_not_found() => {
            error!("Error when removing cluster configuration '{label}': {error}");
        }
        Err(error) => {
            error!("Error when removing cluster configuration '{label}': {error}");
            return Err(ProvisionFailure::remote(step, completed, &error));
        }
    }
    completed.push(step);
    Ok(())
}

/// Run the full provisioning sequence.
pub async fn run(
    platform: &dyn DataPlatform,
    config: &Config,
) -> Result<ProvisionedIds, ProvisionFailure> {
    let clusters = &config.clusters;
    let notebooks = &config.notebooks;
    let mut completed: Vec<ProvisionStep> = Vec::new();

    delete_cluster_tolerating_missing(
        platform,
        &clusters.hadoop_cluster_name,
        ProvisionStep::DeleteHadoopCluster,
        &mut completed,
    )
    .await?;

    let hadoop_cluster_id = match create_hadoop_cluster(platform, clusters).await {
        Ok(created) => {
            info!("Created Hadoop cluster {} ({})", created.id, clusters.hadoop_cluster_name);
            completed.push(ProvisionStep::CreateHadoopCluster);
            created.id
        }
        Err(error) => {
            error!("Error when creating Hadoop cluster configuration: {error}");
            return Err(ProvisionFailure::from_workflow(
                ProvisionStep::CreateHadoopCluster,
                &completed,
                &error,
            ));
        }
    };

    if let Err(error) = platform.start_cluster(&clusters.hadoop_cluster_name).await {
        error!("Error when launching Hadoop cluster: {error}");
        return Err(ProvisionFailure::remote(
            ProvisionStep::StartHadoopCluster,
            &completed,
            &error,
        ));
    }
    completed.push(ProvisionStep::StartHadoopCluster);

    delete_cluster_tolerating_missing(
        platform,
        &clusters.spark_cluster_name,
        ProvisionStep::DeleteSparkCluster,
        &mut completed,
    )
    .await?;

    let spark_cluster_id = match create_spark_cluster(platform, clusters).await {
        Ok(created) => {
            info!("Created Spark cluster {} ({})", created.id, clusters.spark_cluster_name);
            completed.push(ProvisionStep::CreateSparkCluster);
            created.id
        }
        Err(error) => {
            error!("Error when creating Spark cluster configuration: {error}");
            return Err(ProvisionFailure::from_workflow(
                ProvisionStep::CreateSparkCluster,
                &completed,
                &error,
            ));
        }
    };

    if let Err(error) = platform.start_cluster(&clusters.spark_cluster_name).await {
        error!("Error when launching Spark cluster: {error}");
        return Err(ProvisionFailure::remote(
            ProvisionStep::StartSparkCluster,
            &completed,
            &error,
        ));
    }
    completed.push(ProvisionStep::StartSparkCluster);

    let spark_notebook = import_spark_notebook(platform, notebooks, spark_cluster_id)
        .await
        .map_err(|error| {
            ProvisionFailure::from_workflow(ProvisionStep::ImportSparkNotebook, &completed, &error)
        })?;
    if !spark_notebook.success {
        error!("Failed to import Spark notebook: {}", spark_notebook.message);
        return Err(ProvisionFailure::notebook(
            ProvisionStep::ImportSparkNotebook,
            &completed,
            &notebooks.spark_notebook_name,
            &spark_notebook.message,
        ));
    }
    completed.push(ProvisionStep::ImportSparkNotebook);

    let dashboard_notebook = import_dashboard_notebook(platform, notebooks, spark_cluster_id)
        .await
        .map_err(|error| {
            ProvisionFailure::from_workflow(
                ProvisionStep::ImportDashboardNotebook,
                &completed,
                &error,
            )
        })?;
    if !dashboard_notebook.success {
        error!(
            "Failed to import dashboard notebook: {}",
            dashboard_notebook.message
        );
        return Err(ProvisionFailure::notebook(
            ProvisionStep::ImportDashboardNotebook,
            &completed,
            &notebooks.dashboard_notebook_name,
            &dashboard_notebook.message,
        ));
    }
    completed.push(ProvisionStep::ImportDashboardNotebook);

    // Notebook imports always report an id on success
    let ids = ProvisionedIds {
        hadoop_cluster_id,
        spark_cluster_id,
        spark_notebook_id: spark_notebook.id.unwrap_or_default(),
        dashboard_notebook_id: dashboard_notebook.id.unwrap_or_default(),
    };
    info!("Provisioning complete: {ids:?}");
    Ok(ids)
}
