//! Data store resolution and table imports.

use crate::qds::{CommandSubmitted, DataPlatform, DataStore, DbImportCommandRequest};

use super::WorkflowError;

/// Table imports always run in mode 1 on the `hadoop2`-labeled customer
/// cluster and land as ORC.
const IMPORT_MODE: u32 = 1;
const CUSTOMER_CLUSTER_LABEL: &str = "hadoop2";
const HIVE_SERDE: &str = "orc";

/// Resolve a data store name against a listing.
///
/// Exactly one match is required; zero matches and duplicate names both
/// fail, since an ambiguous store cannot be imported from safely.
pub fn resolve_data_store(stores: &[DataStore], name: &str) -> Result<u64, WorkflowError> {
    let matches: Vec<&DataStore> = stores.iter().filter(|store| store.name == name).collect();
    if matches.len() != 1 {
        return Err(WorkflowError::DataStoreNotFound {
            name: name.to_string(),
            matches: matches.len(),
        });
    }
    Ok(matches[0].id)
}

/// List registered data stores and resolve `name` to its platform id.
pub async fn find_data_store_id(
    platform: &dyn DataPlatform,
    name: &str,
) -> Result<u64, WorkflowError> {
    let stores = platform.list_data_stores().await?;
    resolve_data_store(&stores, name)
}

/// Submit an import of `table` from the data store into `database.table`.
pub async fn import_data_table(
    platform: &dyn DataPlatform,
    data_store_id: u64,
    table: &str,
    database: &str,
) -> Result<CommandSubmitted, WorkflowError> {
    let request = DbImportCommandRequest {
        command_type: "DbImportCommand".to_string(),
        mode: IMPORT_MODE,
        dbtap_id: data_store_id,
        db_table: table.to_string(),
        hive_table: format!("{database}.{table}"),
        hive_serde: HIVE_SERDE.to_string(),
        use_customer_cluster: true,
        customer_cluster_label: CUSTOMER_CLUSTER_LABEL.to_string(),
    };
    Ok(platform.submit_db_import(&request).await?)
}
