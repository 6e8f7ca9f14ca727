//! Cluster creation requests and listing.

use std::collections::BTreeSet;

use crate::config::ClustersConfig;
use crate::qds::types::{
    CloudConfig, CloudLocation, ClusterInfo, EngineConfig, NetworkConfig,
};
use crate::qds::{ClusterCreateRequest, ClusterCreated, DataPlatform};

use super::WorkflowError;

/// Shared shape of both demo clusters: one master, spot slaves, placed in
/// the configured VPC/subnet with availability zone left to the platform.
fn base_cluster_request(
    clusters: &ClustersConfig,
    name: &str,
    engine: EngineConfig,
) -> ClusterCreateRequest {
    ClusterCreateRequest {
        cluster_info: ClusterInfo {
            label: vec![name.to_string()],
            min_nodes: 1,
            max_nodes: clusters.max_nodes,
            master_instance_type: clusters.master_instance_type.clone(),
            slave_instance_type: clusters.slave_instance_type.clone(),
            slave_request_type: "spot".to_string(),
        },
        cloud_config: CloudConfig {
            provider: "aws".to_string(),
            location: CloudLocation {
                aws_region: clusters.region.clone(),
                aws_availability_zone: "Any".to_string(),
            },
            network_config: NetworkConfig {
                vpc_id: clusters.vpc_id.clone(),
                subnet_id: clusters.subnet_id.clone(),
            },
        },
        engine_config: engine,
    }
}

pub fn hadoop_cluster_request(clusters: &ClustersConfig) -> ClusterCreateRequest {
    base_cluster_request(
        clusters,
        &clusters.hadoop_cluster_name,
        EngineConfig {
            flavour: "hadoop2".to_string(),
            spark_version: None,
        },
    )
}

pub fn spark_cluster_request(clusters: &ClustersConfig) -> ClusterCreateRequest {
    base_cluster_request(
        clusters,
        &clusters.spark_cluster_name,
        EngineConfig {
            flavour: "spark".to_string(),
            spark_version: Some(clusters.spark_version.clone()),
        },
    )
}

/// Provision the Hadoop cluster. Side effect: real cloud infrastructure.
pub async fn create_hadoop_cluster(
    platform: &dyn DataPlatform,
    clusters: &ClustersConfig,
) -> Result<ClusterCreated, WorkflowError> {
    let request = hadoop_cluster_request(clusters);
    Ok(platform.create_cluster(&request).await?)
}

/// Provision the Spark cluster. Side effect: real cloud infrastructure.
pub async fn create_spark_cluster(
    platform: &dyn DataPlatform,
    clusters: &ClustersConfig,
) -> Result<ClusterCreated, WorkflowError> {
    let request = spark_cluster_request(clusters);
    Ok(platform.create_cluster(&request).await?)
}

/// All labels attached to any cluster in the account, flattened into a set.
pub async fn list_cluster_names(
    platform: &dyn DataPlatform,
) -> Result<BTreeSet<String>, WorkflowError> {
    let entries = platform.list_clusters().await?;
    Ok(entries
        .into_iter()
        .flat_map(|entry| entry.cluster.label)
        .collect())
}
