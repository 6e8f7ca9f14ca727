//! `reqwest`-backed implementation of [`DataPlatform`].
//!
//! Authenticates with the account API token via the `X-AUTH-TOKEN` header.
//! Cluster CRUD goes through v1.2, cluster creation through v2, notebook
//! import through the `latest` agent path, mirroring the platform SDK.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::QuboleConfig;

use super::error::QdsError;
use super::types::{
    ClusterCreateRequest, ClusterCreated, ClusterListEntry, CommandSubmitted, DataStore,
    DataStoreList, DbImportCommandRequest, HiveCommandRequest, NotebookImportRequest,
    NotebookImportResult,
};
use super::DataPlatform;

const V1: &str = "v1.2";
const V2: &str = "v2";
const LATEST: &str = "latest";

/// HTTP client for the Qubole Data Service.
pub struct QdsClient {
    api_url: String,
    api_token: String,
    client: Client,
}

impl QdsClient {
    pub fn new(config: &QuboleConfig) -> Self {
        Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            client: Client::new(),
        }
    }

    fn request(&self, method: Method, version: &str, path: &str) -> RequestBuilder {
        let url = format!("{}/{}/{}", self.api_url, version, path);
        debug!("Qubole {} {}", method, url);
        self.client
            .request(method, url)
            .header("X-AUTH-TOKEN", &self.api_token)
            .header("Accept", "application/json")
    }

    /// Map a response to a typed value or a `QdsError`.
    ///
    /// 404 becomes `NotFound`; other failures carry the platform's JSON
    /// error payload verbatim.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, QdsError> {
        let status = response.status();
        if status.as_u16() == 404 {
            return Err(QdsError::NotFound(response.url().path().to_string()));
        }
        if !status.is_success() {
            let payload = response.json::<Value>().await.unwrap_or(Value::Null);
            return Err(QdsError::Api {
                status: status.as_u16(),
                payload,
            });
        }
        Ok(response.json().await?)
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, QdsError> {
        let response = builder.send().await?;
        Self::decode(response).await
    }

    /// Send a request whose response body the caller does not need.
    async fn send_discarding(builder: RequestBuilder) -> Result<(), QdsError> {
        let response = builder.send().await?;
        Self::decode::<Value>(response).await.map(|_| ())
    }
}

#[async_trait]
impl DataPlatform for QdsClient {
    async fn create_cluster(
        &self,
        request: &ClusterCreateRequest,
    ) -> Result<ClusterCreated, QdsError> {
        Self::send(self.request(Method::POST, V2, "clusters").json(request)).await
    }

    async fn delete_cluster(&self, label: &str) -> Result<(), QdsError> {
        Self::send_discarding(self.request(Method::DELETE, V1, &format!("clusters/{label}"))).await
    }

    async fn start_cluster(&self, label: &str) -> Result<(), QdsError> {
        Self::send_discarding(
            self.request(Method::PUT, V1, &format!("clusters/{label}/state"))
                .json(&json!({"state": "start"})),
        )
        .await
    }

    async fn list_clusters(&self) -> Result<Vec<ClusterListEntry>, QdsError> {
        Self::send(self.request(Method::GET, V1, "clusters")).await
    }

    async fn import_notebook(
        &self,
        request: &NotebookImportRequest,
    ) -> Result<NotebookImportResult, QdsError> {
        Self::send(
            self.request(Method::POST, LATEST, "notebooks/import")
                .json(request),
        )
        .await
    }

    async fn list_data_stores(&self) -> Result<Vec<DataStore>, QdsError> {
        let list: DataStoreList = Self::send(self.request(Method::GET, V1, "db_taps")).await?;
        Ok(list.db_taps)
    }

    async fn submit_hive_command(
        &self,
        request: &HiveCommandRequest,
    ) -> Result<CommandSubmitted, QdsError> {
        Self::send(self.request(Method::POST, V1, "commands").json(request)).await
    }

    async fn submit_db_import(
        &self,
        request: &DbImportCommandRequest,
    ) -> Result<CommandSubmitted, QdsError> {
        Self::send(self.request(Method::POST, V1, "commands").json(request)).await
    }
}
