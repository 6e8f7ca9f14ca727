//! Table import endpoint.

use axum::extract::State;
use axum::Json;
use tracing::info;

use crate::rest::dto::ImportTablesResponse;
use crate::rest::error::ApiError;
use crate::rest::session::CurrentSession;
use crate::rest::state::ApiState;
use crate::workflow::{find_data_store_id, import_data_table};

/// Import the configured demo tables from the named data store.
///
/// The data store is resolved once, then the tables are imported in
/// sequence; the first failure aborts with no rollback of earlier imports.
#[utoipa::path(
    post,
    path = "/import_tables",
    tag = "Tables",
    responses(
        (status = 200, description = "All table imports submitted", body = ImportTablesResponse),
        (status = 401, description = "No live session"),
        (status = 500, description = "Data store missing or ambiguous")
    )
)]
pub async fn import_tables(
    CurrentSession(_session): CurrentSession,
    State(state): State<ApiState>,
) -> Result<Json<ImportTablesResponse>, ApiError> {
    let warehouse = &state.config.warehouse;
    let data_store_id =
        find_data_store_id(state.platform.as_ref(), &warehouse.data_store_name).await?;

    let mut command_ids = Vec::with_capacity(warehouse.tables.len());
    for table in &warehouse.tables {
        let submitted = import_data_table(
            state.platform.as_ref(),
            data_store_id,
            table,
            &warehouse.database_name,
        )
        .await?;
        info!("Submitted import of table '{table}' as command {}", submitted.id);
        command_ids.push(submitted.id);
    }

    Ok(Json(ImportTablesResponse {
        data_store_id,
        command_ids,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::Config;
    use crate::qds::mock::MockPlatform;
    use crate::qds::DataStore;

    fn store(id: u64, name: &str) -> DataStore {
        DataStore {
            id,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_imports_all_configured_tables() {
        let mock = Arc::new(MockPlatform::with_data_stores(vec![store(7, "quickstart")]));
        let state = ApiState::new(Config::default(), mock.clone());
        let session = state.sessions.create();

        let Json(response) = import_tables(CurrentSession(session), State(state))
            .await
            .unwrap();
        assert_eq!(response.data_store_id, 7);
        assert_eq!(response.command_ids.len(), 5);

        let imports = mock.db_imports.lock().unwrap();
        assert_eq!(imports.len(), 5);
        assert_eq!(imports[0].db_table, "customers");
        assert_eq!(imports[0].hive_table, "quickstart.customers");
        assert_eq!(imports[4].db_table, "products");
    }

    #[tokio::test]
    async fn test_unknown_data_store_is_internal_error() {
        let mock = Arc::new(MockPlatform::with_data_stores(vec![store(7, "other")]));
        let state = ApiState::new(Config::default(), mock);
        let session = state.sessions.create();

        let result = import_tables(CurrentSession(session), State(state)).await;
        assert!(matches!(result, Err(ApiError::InternalError(_))));
    }
}
