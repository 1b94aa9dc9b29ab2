// file: src/warehouse/rest.rs
// description: SQL REST API session (statements endpoint) with async polling
// reference: https://docs.snowflake.com/en/developer-guide/sql-api/reference

use crate::config::WarehouseConfig;
use crate::error::{PipelineError, Result};
use crate::warehouse::{QueryResult, Row, SqlSession, is_file_transfer};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const STATEMENTS_PATH: &str = "/api/v2/statements";

#[derive(Debug, Serialize)]
struct StatementRequest<'a> {
    statement: &'a str,
    timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schema: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warehouse: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatementResponse {
    result_set_meta_data: Option<ResultSetMetaData>,
    #[serde(default)]
    data: Vec<Vec<Option<String>>>,
    statement_handle: Option<String>,
    message: Option<String>,
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultSetMetaData {
    #[serde(default)]
    row_type: Vec<ColumnType>,
    #[serde(default)]
    partition_info: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct ColumnType {
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

pub struct RestSession {
    client: Client,
    base_url: String,
    config: WarehouseConfig,
}

impl RestSession {
    pub fn new(config: WarehouseConfig) -> Result<Self> {
        let base_url = config
            .account_url
            .clone()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| PipelineError::Config("warehouse.account_url is not set".to_string()))?;

        if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            return Err(PipelineError::Config(format!(
                "Invalid account URL: {}",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs + 10))
            .build()
            .map_err(|e| PipelineError::Warehouse(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            config,
        })
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        let token = self
            .config
            .token
            .as_deref()
            .ok_or_else(|| PipelineError::Config("warehouse.token is not set".to_string()))?;

        Ok(builder
            .header("Authorization", format!("Bearer {}", token))
            .header(
                "X-Snowflake-Authorization-Token-Type",
                self.config.token_type.as_str(),
            )
            .header("Accept", "application/json"))
    }

    async fn submit(&self, sql: &str) -> Result<(StatusCode, StatementResponse)> {
        let request = StatementRequest {
            statement: sql,
            timeout: self.config.timeout_secs,
            database: self.config.database.as_deref(),
            schema: self.config.schema.as_deref(),
            warehouse: self.config.warehouse.as_deref(),
            role: self.config.role.as_deref(),
        };

        let url = format!("{}{}", self.base_url, STATEMENTS_PATH);
        debug!("Submitting statement ({} chars) to {}", sql.len(), url);

        let response = self
            .authorized(self.client.post(&url))?
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::Warehouse(format!("Failed to send statement: {}", e)))?;

        Self::decode(response).await
    }

    async fn fetch(&self, handle: &str, partition: Option<usize>) -> Result<(StatusCode, StatementResponse)> {
        let mut url = format!("{}{}/{}", self.base_url, STATEMENTS_PATH, handle);
        if let Some(partition) = partition {
            url.push_str(&format!("?partition={}", partition));
        }

        let response = self
            .authorized(self.client.get(&url))?
            .send()
            .await
            .map_err(|e| PipelineError::Warehouse(format!("Failed to poll statement: {}", e)))?;

        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> Result<(StatusCode, StatementResponse)> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<StatementResponse>(&error_text)
                .ok()
                .and_then(|r| r.message)
                .unwrap_or(error_text);
            return Err(PipelineError::Warehouse(format!(
                "Statement failed with status {}: {}",
                status, message
            )));
        }

        let body: StatementResponse = response.json().await.map_err(|e| {
            PipelineError::Warehouse(format!("Failed to parse statement response: {}", e))
        })?;

        Ok((status, body))
    }

    /// Poll an accepted statement until it completes or the timeout elapses.
    async fn wait_for(&self, handle: &str) -> Result<StatementResponse> {
        let deadline = Instant::now() + Duration::from_secs(self.config.timeout_secs);
        let interval = Duration::from_millis(self.config.poll_interval_ms.max(50));

        loop {
            if Instant::now() >= deadline {
                return Err(PipelineError::Warehouse(format!(
                    "Statement {} did not finish within {}s",
                    handle, self.config.timeout_secs
                )));
            }

            tokio::time::sleep(interval).await;

            let (status, body) = self.fetch(handle, None).await?;
            if status != StatusCode::ACCEPTED {
                return Ok(body);
            }
            debug!("Statement {} still running", handle);
        }
    }
}

/// Convert one REST result row (all strings) into a typed [`Row`].
fn convert_row(columns: &[ColumnType], values: Vec<Option<String>>) -> Row {
    let mut row = Row::new();

    for (column, value) in columns.iter().zip(values) {
        let converted = match value {
            None => Value::Null,
            Some(text) => match column.kind.to_ascii_lowercase().as_str() {
                "fixed" | "real" => text
                    .parse::<i64>()
                    .map(Value::from)
                    .or_else(|_| text.parse::<f64>().map(Value::from))
                    .unwrap_or(Value::String(text)),
                "boolean" => match text.to_ascii_lowercase().as_str() {
                    "true" | "1" => Value::Bool(true),
                    "false" | "0" => Value::Bool(false),
                    _ => Value::String(text),
                },
                _ => Value::String(text),
            },
        };
        row.insert(&column.name, converted);
    }

    row
}

#[async_trait]
impl SqlSession for RestSession {
    async fn query(&self, sql: &str) -> Result<QueryResult> {
        if is_file_transfer(sql) {
            return Err(PipelineError::Stage(
                "PUT/GET are not supported over the SQL REST API; use the cli backend".to_string(),
            ));
        }

        let (status, mut body) = self.submit(sql).await?;

        if status == StatusCode::ACCEPTED {
            let handle = body.statement_handle.clone().ok_or_else(|| {
                PipelineError::Warehouse("Accepted statement has no handle".to_string())
            })?;
            info!("Statement {} accepted, waiting for completion", handle);
            body = self.wait_for(&handle).await?;
        }

        let meta = body.result_set_meta_data.ok_or_else(|| {
            PipelineError::Warehouse(format!(
                "Response has no result metadata (code {}: {})",
                body.code.as_deref().unwrap_or("?"),
                body.message.as_deref().unwrap_or("no message")
            ))
        })?;

        let mut data = body.data;

        if meta.partition_info.len() > 1 {
            let handle = body.statement_handle.as_deref().ok_or_else(|| {
                PipelineError::Warehouse("Partitioned result has no handle".to_string())
            })?;

            for partition in 1..meta.partition_info.len() {
                let (_, part) = self.fetch(handle, Some(partition)).await?;
                data.extend(part.data);
            }
        }

        let columns: Vec<String> = meta.row_type.iter().map(|c| c.name.clone()).collect();
        let rows = data
            .into_iter()
            .map(|values| convert_row(&meta.row_type, values))
            .collect::<Vec<_>>();

        if rows.is_empty() {
            warn!("Statement returned no rows");
        }

        Ok(QueryResult::new(columns, rows))
    }

    fn backend_name(&self) -> &'static str {
        "rest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WarehouseBackend;

    fn rest_config() -> WarehouseConfig {
        WarehouseConfig {
            backend: WarehouseBackend::Rest,
            account_url: Some("https://acme.snowflakecomputing.com/".to_string()),
            token: Some("secret".to_string()),
            ..WarehouseConfig::default()
        }
    }

    #[test]
    fn test_new_trims_base_url() {
        let session = RestSession::new(rest_config()).unwrap();
        assert_eq!(session.base_url, "https://acme.snowflakecomputing.com");
    }

    #[test]
    fn test_new_requires_url() {
        let config = WarehouseConfig {
            account_url: None,
            ..rest_config()
        };
        assert!(RestSession::new(config).is_err());
    }

    #[test]
    fn test_convert_row_types() {
        let columns = vec![
            ColumnType { name: "N".into(), kind: "fixed".into() },
            ColumnType { name: "R".into(), kind: "real".into() },
            ColumnType { name: "B".into(), kind: "boolean".into() },
            ColumnType { name: "T".into(), kind: "text".into() },
        ];
        let row = convert_row(
            &columns,
            vec![
                Some("42".into()),
                Some("0.875".into()),
                Some("true".into()),
                None,
            ],
        );

        assert_eq!(row.integer("N"), Some(42));
        assert_eq!(row.float("R"), Some(0.875));
        assert_eq!(row.boolean("B"), Some(true));
        assert_eq!(row.text("T"), None);
    }

    #[test]
    fn test_parse_statement_response() {
        let body = r#"{
            "resultSetMetaData": {
                "numRows": 1,
                "rowType": [{"name": "VERSION", "type": "text"}],
                "partitionInfo": [{"rowCount": 1}]
            },
            "data": [["9.1.0"]],
            "statementHandle": "01b2-abc",
            "code": "090001",
            "message": "Statement executed successfully."
        }"#;
        let parsed: StatementResponse = serde_json::from_str(body).unwrap();
        let meta = parsed.result_set_meta_data.unwrap();
        assert_eq!(meta.row_type[0].name, "VERSION");
        assert_eq!(parsed.data[0][0].as_deref(), Some("9.1.0"));
    }

    #[tokio::test]
    async fn test_put_is_rejected() {
        let session = RestSession::new(rest_config()).unwrap();
        let err = session
            .query("PUT 'file:///tmp/a.pdf' @STAGE/other/")
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Stage(_)));
    }

    /// Serve canned statement responses on a local port; returns the base URL.
    async fn serve(respond: impl Fn(&str) -> (u16, String) + Send + Sync + 'static) -> String {
        use std::sync::Arc;
        use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let respond = Arc::new(respond);

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let respond = Arc::clone(&respond);
                tokio::spawn(async move {
                    let (read, mut write) = stream.into_split();
                    let mut reader = BufReader::new(read);
                    loop {
                        let mut request_line = String::new();
                        if reader.read_line(&mut request_line).await.unwrap_or(0) == 0 {
                            break;
                        }
                        let mut content_length = 0;
                        loop {
                            let mut header = String::new();
                            reader.read_line(&mut header).await.unwrap();
                            let header = header.trim_end();
                            if header.is_empty() {
                                break;
                            }
                            if let Some((name, value)) = header.split_once(':')
                                && name.eq_ignore_ascii_case("content-length")
                            {
                                content_length = value.trim().parse().unwrap();
                            }
                        }
                        let mut body = vec![0u8; content_length];
                        reader.read_exact(&mut body).await.unwrap();

                        let (status, payload) = respond(request_line.trim_end());
                        let reason = if status == 202 { "Accepted" } else { "OK" };
                        let response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
                            status,
                            reason,
                            payload.len(),
                            payload
                        );
                        write.write_all(response.as_bytes()).await.unwrap();
                    }
                });
            }
        });

        url
    }

    fn local_config(url: String, timeout_secs: u64) -> WarehouseConfig {
        WarehouseConfig {
            account_url: Some(url),
            timeout_secs,
            poll_interval_ms: 50,
            ..rest_config()
        }
    }

    const ACCEPTED: &str = r#"{"statementHandle": "h1", "code": "333334", "message": "Asynchronous execution in progress."}"#;

    #[tokio::test]
    async fn test_polls_accepted_statement_and_merges_partitions() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let polls = AtomicUsize::new(0);
        let url = serve(move |request| {
            if request.starts_with("POST /api/v2/statements ") {
                (202, ACCEPTED.to_string())
            } else if request.starts_with("GET /api/v2/statements/h1?partition=1 ") {
                (200, r#"{"data": [["DOC_B", "7"]]}"#.to_string())
            } else if request.starts_with("GET /api/v2/statements/h1 ") {
                if polls.fetch_add(1, Ordering::SeqCst) == 0 {
                    (202, ACCEPTED.to_string())
                } else {
                    (
                        200,
                        r#"{
                            "resultSetMetaData": {
                                "rowType": [
                                    {"name": "DOCUMENT_ID", "type": "text"},
                                    {"name": "PAGES", "type": "fixed"}
                                ],
                                "partitionInfo": [{"rowCount": 1}, {"rowCount": 1}]
                            },
                            "data": [["DOC_A", "3"]],
                            "statementHandle": "h1"
                        }"#
                        .to_string(),
                    )
                }
            } else {
                (404, String::new())
            }
        })
        .await;

        let session = RestSession::new(local_config(url, 10)).unwrap();
        let result = session.query("SELECT document_id, pages FROM t").await.unwrap();

        assert_eq!(result.columns, vec!["DOCUMENT_ID", "PAGES"]);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].text("DOCUMENT_ID").as_deref(), Some("DOC_A"));
        assert_eq!(result.rows[1].text("DOCUMENT_ID").as_deref(), Some("DOC_B"));
        assert_eq!(result.rows[1].integer("PAGES"), Some(7));
    }

    #[tokio::test]
    async fn test_statement_times_out_while_accepted() {
        let url = serve(|_| (202, ACCEPTED.to_string())).await;

        let session = RestSession::new(local_config(url, 1)).unwrap();
        let err = session.query("SELECT 1").await.unwrap_err();

        assert!(matches!(err, PipelineError::Warehouse(_)));
        assert!(err.to_string().contains("did not finish within 1s"));
    }
}
