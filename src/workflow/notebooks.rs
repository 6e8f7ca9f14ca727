//! Notebook imports into the Spark cluster.

use crate::config::NotebooksConfig;
use crate::qds::{DataPlatform, NotebookImportRequest, NotebookImportResult};

use super::WorkflowError;

async fn import_notebook(
    platform: &dyn DataPlatform,
    name: &str,
    url: &str,
    cluster_id: u64,
) -> Result<NotebookImportResult, WorkflowError> {
    let request = NotebookImportRequest {
        name: name.to_string(),
        location: "Common".to_string(),
        url: url.to_string(),
        note_type: "spark".to_string(),
        cluster_id,
    };
    Ok(platform.import_notebook(&request).await?)
}

/// Import the analysis notebook into the freshly created Spark cluster.
pub async fn import_spark_notebook(
    platform: &dyn DataPlatform,
    notebooks: &NotebooksConfig,
    spark_cluster_id: u64,
) -> Result<NotebookImportResult, WorkflowError> {
    import_notebook(
        platform,
        &notebooks.spark_notebook_name,
        &notebooks.spark_notebook_s3_url,
        spark_cluster_id,
    )
    .await
}

/// Import the dashboard notebook into the freshly created Spark cluster.
pub async fn import_dashboard_notebook(
    platform: &dyn DataPlatform,
    notebooks: &NotebooksConfig,
    spark_cluster_id: u64,
) -> Result<NotebookImportResult, WorkflowError> {
    import_notebook(
        platform,
        &notebooks.dashboard_notebook_name,
        &notebooks.dashboard_notebook_s3_url,
        spark_cluster_id,
    )
    .await
}
