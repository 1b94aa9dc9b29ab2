// file: src/warehouse/mod.rs
// description: warehouse session abstraction and backend selection
// reference: internal module structure

pub mod cli;
pub mod rest;
pub mod row;
pub mod sql;

pub use cli::CliSession;
pub use rest::RestSession;
pub use row::{QueryResult, Row};
pub use sql::SqlBuilder;

use crate::config::{WarehouseBackend, WarehouseConfig};
use crate::error::Result;
use async_trait::async_trait;
use tracing::info;

/// A synchronous-per-statement connection to the data platform.
#[async_trait]
pub trait SqlSession: Send + Sync {
    /// Run a statement and return its result set.
    async fn query(&self, sql: &str) -> Result<QueryResult>;

    /// Run a statement for its side effect; returns the number of result rows.
    async fn execute(&self, sql: &str) -> Result<u64> {
        Ok(self.query(sql).await?.len() as u64)
    }

    async fn ping(&self) -> Result<bool> {
        let result = self.query("SELECT CURRENT_VERSION() AS VERSION").await?;
        Ok(!result.is_empty())
    }

    fn backend_name(&self) -> &'static str;
}

/// True for statements that move files between the client and a stage.
pub fn is_file_transfer(sql: &str) -> bool {
    let head = sql.trim_start().to_ascii_uppercase();
    head.starts_with("PUT ") || head.starts_with("GET ")
}

pub fn connect(config: &WarehouseConfig) -> Result<Box<dyn SqlSession>> {
    let session: Box<dyn SqlSession> = match config.backend {
        WarehouseBackend::Rest => Box::new(RestSession::new(config.clone())?),
        WarehouseBackend::Cli => Box::new(CliSession::new(config.clone())),
    };

    info!("Using {} warehouse backend", session.backend_name());
    Ok(session)
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use crate::error::PipelineError;
    use std::sync::Mutex;

    /// Scripted session: answers by substring match and records every statement.
    #[derive(Default)]
    pub struct RecordingSession {
        responses: Vec<(String, QueryResult)>,
        failures: Vec<String>,
        pub statements: Mutex<Vec<String>>,
    }

    impl RecordingSession {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(mut self, needle: &str, rows: Vec<Row>) -> Self {
            self.responses
                .push((needle.to_string(), QueryResult::new(vec![], rows)));
            self
        }

        pub fn fail_on(mut self, needle: &str) -> Self {
            self.failures.push(needle.to_string());
            self
        }

        pub fn recorded(&self) -> Vec<String> {
            self.statements.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SqlSession for RecordingSession {
        async fn query(&self, sql: &str) -> Result<QueryResult> {
            self.statements.lock().unwrap().push(sql.to_string());

            if let Some(needle) = self.failures.iter().find(|n| sql.contains(n.as_str())) {
                return Err(PipelineError::Warehouse(format!(
                    "scripted failure on {}",
                    needle
                )));
            }

            Ok(self
                .responses
                .iter()
                .find(|(needle, _)| sql.contains(needle.as_str()))
                .map(|(_, result)| result.clone())
                .unwrap_or_default())
        }

        fn backend_name(&self) -> &'static str {
            "recording"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_file_transfer() {
        assert!(is_file_transfer("PUT 'file:///a.pdf' @S/x/"));
        assert!(is_file_transfer("  get @S/x/ file:///tmp"));
        assert!(!is_file_transfer("SELECT 'PUT '"));
    }

    #[test]
    fn test_cli_backend_selected_by_default() {
        let session = connect(&WarehouseConfig::default()).unwrap();
        assert_eq!(session.backend_name(), "cli");
    }

    #[test]
    fn test_default_ping_uses_query() {
        let session = mock::RecordingSession::new()
            .respond("CURRENT_VERSION", vec![Row::new().with("VERSION", "9.1.0")]);
        let alive = tokio_test::block_on(session.ping()).unwrap();
        assert!(alive);
        assert_eq!(session.recorded().len(), 1);
    }
}
