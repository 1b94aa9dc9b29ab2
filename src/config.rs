// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub warehouse: WarehouseConfig,
    #[serde(default)]
    pub objects: ObjectsConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WarehouseBackend {
    /// SQL REST API over HTTPS
    Rest,
    /// Platform command line client
    Cli,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WarehouseConfig {
    pub backend: WarehouseBackend,
    pub account_url: Option<String>,
    pub token: Option<String>,
    pub token_type: String,
    pub database: Option<String>,
    pub schema: Option<String>,
    pub warehouse: Option<String>,
    pub role: Option<String>,
    pub timeout_secs: u64,
    pub poll_interval_ms: u64,
    pub cli_path: PathBuf,
    pub cli_connection: Option<String>,
}

/// Fully qualified names of the warehouse objects the demo reads and writes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObjectsConfig {
    pub raw_schema: String,
    pub analytics_schema: String,
    pub stage: String,
    pub catalog_table: String,
    pub insights_table: String,
    pub metrics_view: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub output_dir: PathBuf,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub insights_limit: usize,
    pub review_limit: usize,
    pub catalog_limit: usize,
    pub chart_width: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UploadConfig {
    pub max_file_size_mb: u64,
    pub upload_method: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub role: String,
    pub database: String,
    pub warehouse: String,
    pub scripts_location: String,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            backend: WarehouseBackend::Cli,
            account_url: None,
            token: None,
            token_type: "PROGRAMMATIC_ACCESS_TOKEN".to_string(),
            database: Some("SNOWFLAKE_EXAMPLE".to_string()),
            schema: None,
            warehouse: Some("SFE_DOCUMENT_AI_WH".to_string()),
            role: None,
            timeout_secs: 60,
            poll_interval_ms: 500,
            cli_path: PathBuf::from("snow"),
            cli_connection: None,
        }
    }
}

impl Default for ObjectsConfig {
    fn default() -> Self {
        Self {
            raw_schema: "SNOWFLAKE_EXAMPLE.SWIFTCLAW".to_string(),
            analytics_schema: "SNOWFLAKE_EXAMPLE.SFE_ANALYTICS_ENTERTAINMENT".to_string(),
            stage: "DOCUMENT_STAGE".to_string(),
            catalog_table: "RAW_DOCUMENT_CATALOG".to_string(),
            insights_table: "FCT_DOCUMENT_INSIGHTS".to_string(),
            metrics_view: "V_PROCESSING_METRICS".to_string(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("pdfs/generated"),
            seed: None,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            insights_limit: 1000,
            review_limit: 50,
            catalog_limit: 50,
            chart_width: 40,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 200,
            upload_method: "swiftclaw CLI".to_string(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            role: "ACCOUNTADMIN".to_string(),
            database: "SNOWFLAKE_EXAMPLE".to_string(),
            warehouse: "SFE_DOCUMENT_AI_WH".to_string(),
            scripts_location: "@GIT_REPOS.sfe_swiftclaw_repo/branches/main/sql/03_ai_processing"
                .to_string(),
        }
    }
}

impl ObjectsConfig {
    /// `@<raw_schema>.<stage>`
    pub fn stage_ref(&self) -> String {
        format!("@{}.{}", self.raw_schema, self.stage)
    }

    pub fn catalog_ref(&self) -> String {
        format!("{}.{}", self.raw_schema, self.catalog_table)
    }

    pub fn insights_ref(&self) -> String {
        format!("{}.{}", self.analytics_schema, self.insights_table)
    }

    pub fn metrics_ref(&self) -> String {
        format!("{}.{}", self.analytics_schema, self.metrics_view)
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder
                .add_source(config::File::from(Path::new("config/default.toml")).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("SWIFTCLAW")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.warehouse.timeout_secs == 0 {
            return Err(PipelineError::Config(
                "warehouse.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.warehouse.backend == WarehouseBackend::Rest
            && self.warehouse.account_url.as_deref().unwrap_or("").is_empty()
        {
            return Err(PipelineError::Config(
                "warehouse.account_url is required for the rest backend".to_string(),
            ));
        }

        if self.dashboard.insights_limit == 0
            || self.dashboard.review_limit == 0
            || self.dashboard.catalog_limit == 0
        {
            return Err(PipelineError::Config(
                "dashboard limits must be greater than 0".to_string(),
            ));
        }

        if self.upload.max_file_size_mb == 0 {
            return Err(PipelineError::Config(
                "upload.max_file_size_mb must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
