//! Cluster and notebook provisioning endpoints.

use axum::extract::State;
use axum::Json;
use tracing::{error, info};

use crate::rest::dto::{ClustersResponse, ProvisionResponse};
use crate::rest::error::ApiError;
use crate::rest::session::CurrentSession;
use crate::rest::state::ApiState;
use crate::workflow::{self, provision};

/// Delete-and-recreate both demo clusters, start them, and import the two
/// Spark notebooks. The platform ids from a fully successful run are
/// recorded in the shared resources store.
#[utoipa::path(
    post,
    path = "/create_clusters_and_notebooks",
    tag = "Provisioning",
    responses(
        (status = 200, description = "All clusters and notebooks provisioned", body = ProvisionResponse),
        (status = 401, description = "No live session"),
        (status = 502, description = "The platform rejected a step; its error payload is relayed")
    )
)]
pub async fn create_clusters_and_notebooks(
    CurrentSession(_session): CurrentSession,
    State(state): State<ApiState>,
) -> Result<Json<ProvisionResponse>, ApiError> {
    let ids = provision::run(state.platform.as_ref(), &state.config)
        .await
        .map_err(|failure| {
            error!(
                "Provisioning aborted at step '{}' ({} steps completed)",
                failure.step.as_str(),
                failure.completed.len()
            );
            ApiError::Platform(failure.payload)
        })?;

    state.resources.write().await.record(ids);
    info!("Recorded provisioned resources: {ids:?}");

    Ok(Json(ids.into()))
}

/// Labels of all clusters known to the platform
#[utoipa::path(
    get,
    path = "/clusters",
    tag = "Provisioning",
    responses(
        (status = 200, description = "Cluster labels", body = ClustersResponse),
        (status = 401, description = "No live session")
    )
)]
pub async fn clusters(
    CurrentSession(_session): CurrentSession,
    State(state): State<ApiState>,
) -> Result<Json<ClustersResponse>, ApiError> {
    let names = workflow::list_cluster_names(state.platform.as_ref()).await?;
    Ok(Json(ClustersResponse {
        clusters: names.into_iter().collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::Config;
    use crate::qds::mock::MockPlatform;

    fn make_state(platform: MockPlatform) -> ApiState {
        ApiState::new(Config::default(), Arc::new(platform))
    }

    #[tokio::test]
    async fn test_success_records_resources() {
        let state = make_state(MockPlatform::new());
        let session = state.sessions.create();

        let Json(response) =
            create_clusters_and_notebooks(CurrentSession(session), State(state.clone()))
                .await
                .unwrap();
        assert_eq!(response.hadoop_cluster_id, 100);

        let resources = state.resources.read().await;
        assert_eq!(resources.hadoop_cluster_id, Some(100));
        assert_eq!(resources.spark_cluster_id, Some(101));
    }

    #[tokio::test]
    async fn test_failure_relays_platform_payload_and_records_nothing() {
        let state = make_state(MockPlatform::failing_create("spark"));
        let session = state.sessions.create();

        let result =
            create_clusters_and_notebooks(CurrentSession(session), State(state.clone())).await;
        match result {
            Err(ApiError::Platform(payload)) => {
                assert_eq!(payload["error"]["error_message"], "label already taken");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let resources = state.resources.read().await;
        assert!(resources.hadoop_cluster_id.is_none());
    }

    #[tokio::test]
    async fn test_clusters_flattens_labels() {
        let platform = MockPlatform::new();
        *platform.cluster_labels.lock().unwrap() = vec![
            vec!["hadoop2".to_string(), "etl".to_string()],
            vec!["spark".to_string()],
        ];
        let state = make_state(platform);
        let session = state.sessions.create();

        let Json(response) = clusters(CurrentSession(session), State(state)).await.unwrap();
        assert_eq!(response.clusters, vec!["etl", "hadoop2", "spark"]);
    }
}
