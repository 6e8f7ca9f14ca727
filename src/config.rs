use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub qubole: QuboleConfig,
    pub clusters: ClustersConfig,
    pub notebooks: NotebooksConfig,
    pub warehouse: WarehouseConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Wizard web server settings, including the demo login credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Session lifetime in minutes
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: i64,
}

fn default_port() -> u16 {
    5000
}

fn default_session_ttl() -> i64 {
    480 // 8 hours
}

/// Qubole API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuboleConfig {
    /// Base URL of the Qubole REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    pub api_token: String,
}

fn default_api_url() -> String {
    "https://api.qubole.com/api".to_string()
}

/// Cluster shapes shared by the Hadoop and Spark clusters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClustersConfig {
    pub region: String,
    pub vpc_id: String,
    pub subnet_id: String,
    pub master_instance_type: String,
    pub slave_instance_type: String,
    #[serde(default = "default_max_nodes")]
    pub max_nodes: u32,
    pub hadoop_cluster_name: String,
    pub spark_cluster_name: String,
    #[serde(default = "default_spark_version")]
    pub spark_version: String,
}

fn default_max_nodes() -> u32 {
    3
}

fn default_spark_version() -> String {
    "2.1.0".to_string()
}

/// Notebooks imported into the Spark cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotebooksConfig {
    pub spark_notebook_name: String,
    pub spark_notebook_s3_url: String,
    pub dashboard_notebook_name: String,
    pub dashboard_notebook_s3_url: String,
}

/// Data store, database and demo tables driven by the wizard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseConfig {
    pub data_store_name: String,
    pub database_name: String,
    pub web_logs_s3_dir: String,
    #[serde(default = "default_tables")]
    pub tables: Vec<String>,
}

fn default_tables() -> Vec<String> {
    ["customers", "departments", "order_items", "orders", "products"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the Hive query templates
    #[serde(default = "default_queries_dir")]
    pub queries: String,
    /// Directory for log files
    #[serde(default = "default_logs_dir")]
    pub logs: String,
}

fn default_queries_dir() -> String {
    "queries".to_string()
}

fn default_logs_dir() -> String {
    "logs".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            queries: default_queries_dir(),
            logs: default_logs_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to a file instead of stderr
    #[serde(default)]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: false,
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so the wizard runs with only a token
        // and network ids supplied via environment variables
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        // User config in ~/.config/quickstart/ (optional global overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("quickstart").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with QUICKSTART_ prefix,
        // e.g. QUICKSTART_QUBOLE__API_TOKEN
        builder = builder.add_source(
            config::Environment::with_prefix("QUICKSTART")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Get absolute path to the query templates directory
    pub fn queries_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.queries);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to the logs directory
    pub fn logs_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.logs);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: default_port(),
                username: "admin".to_string(),
                password: "quickstart".to_string(),
                session_ttl_minutes: default_session_ttl(),
            },
            qubole: QuboleConfig {
                api_url: default_api_url(),
                api_token: String::new(), // Must be supplied via file or env
            },
            clusters: ClustersConfig {
                region: "us-east-1".to_string(),
                vpc_id: String::new(),
                subnet_id: String::new(),
                master_instance_type: "m4.xlarge".to_string(),
                slave_instance_type: "m4.xlarge".to_string(),
                max_nodes: default_max_nodes(),
                hadoop_cluster_name: "hadoop2".to_string(),
                spark_cluster_name: "spark".to_string(),
                spark_version: default_spark_version(),
            },
            notebooks: NotebooksConfig {
                spark_notebook_name: "quickstart-analysis".to_string(),
                spark_notebook_s3_url: String::new(),
                dashboard_notebook_name: "quickstart-dashboard".to_string(),
                dashboard_notebook_s3_url: String::new(),
            },
            warehouse: WarehouseConfig {
                data_store_name: "quickstart".to_string(),
                database_name: "quickstart".to_string(),
                web_logs_s3_dir: String::new(),
                tables: default_tables(),
            },
            paths: PathsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
