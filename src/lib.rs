//! Quickstart: guided wizard for provisioning Qubole demo infrastructure.
//!
//! A thin web application over the Qubole Data Service API: it walks a
//! user through creating Hadoop and Spark clusters, importing notebooks,
//! loading demo tables from a registered data store, and firing Hive
//! queries. All real work happens on the remote platform.

pub mod config;
pub mod logging;
pub mod qds;
pub mod queries;
pub mod rest;
pub mod workflow;
