// file: src/warehouse/cli.rs
// description: session backed by the platform command line client (`snow sql`)
// reference: https://docs.snowflake.com/en/developer-guide/snowflake-cli/sql/execute-sql

use crate::config::WarehouseConfig;
use crate::error::{PipelineError, Result};
use crate::warehouse::{QueryResult, Row, SqlSession};
use async_trait::async_trait;
use serde_json::Value;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

pub struct CliSession {
    config: WarehouseConfig,
}

impl CliSession {
    pub fn new(config: WarehouseConfig) -> Self {
        Self { config }
    }

    fn arguments(&self, sql: &str) -> Vec<String> {
        let mut args = vec![
            "sql".to_string(),
            "-q".to_string(),
            sql.to_string(),
            "--format".to_string(),
            "json".to_string(),
        ];

        if let Some(connection) = &self.config.cli_connection {
            args.push("-c".to_string());
            args.push(connection.clone());
        }
        if let Some(database) = &self.config.database {
            args.push("--database".to_string());
            args.push(database.clone());
        }
        if let Some(warehouse) = &self.config.warehouse {
            args.push("--warehouse".to_string());
            args.push(warehouse.clone());
        }
        if let Some(role) = &self.config.role {
            args.push("--role".to_string());
            args.push(role.clone());
        }

        args
    }
}

/// Parse `--format json` output: an array of row objects, or one such
/// array per statement when several statements ran (the last one wins).
pub(crate) fn parse_output(stdout: &str) -> Result<QueryResult> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(QueryResult::default());
    }

    let parsed: Value = serde_json::from_str(trimmed)
        .map_err(|e| PipelineError::Warehouse(format!("Unreadable CLI output: {}", e)))?;

    let records = match parsed {
        Value::Array(items) if items.iter().all(Value::is_array) && !items.is_empty() => {
            match items.into_iter().last() {
                Some(Value::Array(last)) => last,
                _ => Vec::new(),
            }
        }
        Value::Array(items) => items,
        Value::Object(_) => vec![parsed],
        other => {
            return Err(PipelineError::Warehouse(format!(
                "Unexpected CLI output: {}",
                other
            )));
        }
    };

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for record in records {
        let Value::Object(map) = record else {
            return Err(PipelineError::Warehouse(
                "CLI row is not a JSON object".to_string(),
            ));
        };

        let mut row = Row::new();
        for (name, value) in map {
            if !columns.iter().any(|c| c.eq_ignore_ascii_case(&name)) {
                columns.push(name.to_ascii_uppercase());
            }
            row.insert(&name, value);
        }
        rows.push(row);
    }

    Ok(QueryResult::new(columns, rows))
}

#[async_trait]
impl SqlSession for CliSession {
    async fn query(&self, sql: &str) -> Result<QueryResult> {
        debug!(
            "Running {} sql ({} chars)",
            self.config.cli_path.display(),
            sql.len()
        );

        let child = Command::new(&self.config.cli_path)
            .args(self.arguments(sql))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                PipelineError::Warehouse(format!(
                    "Failed to start {}: {}",
                    self.config.cli_path.display(),
                    e
                ))
            })?;

        let output = tokio::time::timeout(
            Duration::from_secs(self.config.timeout_secs),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| {
            PipelineError::Warehouse(format!(
                "Statement did not finish within {}s",
                self.config.timeout_secs
            ))
        })??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() { stdout } else { stderr };
            return Err(PipelineError::Warehouse(format!(
                "CLI exited with {}: {}",
                output.status,
                detail.trim()
            )));
        }

        parse_output(&String::from_utf8_lossy(&output.stdout))
    }

    fn backend_name(&self) -> &'static str {
        "cli"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_row_objects() {
        let out = r#"[{"DOCUMENT_ID": "DOC_1", "TOTAL_AMOUNT": 12.5, "REQUIRES_MANUAL_REVIEW": true}]"#;
        let result = parse_output(out).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.rows[0].float("total_amount"), Some(12.5));
        assert_eq!(result.rows[0].boolean("REQUIRES_MANUAL_REVIEW"), Some(true));
        assert!(result.columns.contains(&"DOCUMENT_ID".to_string()));
    }

    #[test]
    fn test_parse_multi_statement_output_keeps_last() {
        let out = r#"[[{"status": "Statement executed successfully."}], [{"N": 1}, {"N": 2}]]"#;
        let result = parse_output(out).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.rows[1].integer("N"), Some(2));
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_output("  \n").unwrap().is_empty());
        assert!(parse_output("[]").unwrap().is_empty());
        assert!(parse_output("not json").is_err());
    }

    #[test]
    fn test_arguments_include_connection() {
        let config = WarehouseConfig {
            cli_connection: Some("demo".to_string()),
            role: Some("SFE_DEMO_ROLE".to_string()),
            ..WarehouseConfig::default()
        };
        let args = CliSession::new(config).arguments("SELECT 1");
        assert_eq!(&args[..5], &["sql", "-q", "SELECT 1", "--format", "json"]);
        assert!(args.windows(2).any(|w| w == ["-c", "demo"]));
        assert!(args.windows(2).any(|w| w == ["--role", "SFE_DEMO_ROLE"]));
    }

    #[tokio::test]
    async fn test_missing_binary_is_warehouse_error() {
        let config = WarehouseConfig {
            cli_path: PathBuf::from("/nonexistent/snow-cli"),
            ..WarehouseConfig::default()
        };
        let err = CliSession::new(config).query("SELECT 1").await.unwrap_err();
        assert!(matches!(err, PipelineError::Warehouse(_)));
    }
}
