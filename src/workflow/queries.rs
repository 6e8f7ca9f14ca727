//! Asynchronous Hive query submission.

use serde_json::Value;

use crate::qds::{CommandSubmitted, DataPlatform, HiveCommandRequest};
use crate::queries::QueryLibrary;

use super::WorkflowError;

/// Render the named query template and submit it against `cluster_label`.
///
/// Fire-and-forget: the command id is returned but completion is never
/// awaited or reported.
pub async fn run_hive_query_asynchronous(
    platform: &dyn DataPlatform,
    queries: &QueryLibrary,
    cluster_label: &str,
    query_filename: &str,
    params: &Value,
) -> Result<CommandSubmitted, WorkflowError> {
    let query = queries.render(query_filename, params)?;
    let request = HiveCommandRequest::new(query, cluster_label);
    Ok(platform.submit_hive_command(&request).await?)
}
