// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # ClickHouse HTTP transport
//!
//! Each [`Client::execute`] call is one POST to the HTTP interface with the SQL
//! as the body. Results are requested in the `JSON` output format, whose
//! `data` array holds one object per row in column order. The transport is
//! connectionless from the driver's point of view, so no request ordering is
//! imposed and closing a handle only drops it.

use crate::client::{Client, Connector};
use crate::config::HttpClientConfig;
use crate::error::{DriverError, DriverResult};
use async_trait::async_trait;
use serde::Deserialize;
use sqltools_clickhouse_model::{ConnectionCredentials, QueryError, Row};
use std::sync::Arc;
use tracing::debug;

/// Header carrying the exception code of a failed query
const EXCEPTION_CODE_HEADER: &str = "X-ClickHouse-Exception-Code";

/// Body of a `FORMAT JSON` response; only the rows are kept
#[derive(Debug, Deserialize)]
struct JsonResponse {
    #[serde(default)]
    data: Vec<Row>,
}

/// Builds [`HttpClient`]s
#[derive(Debug, Clone, Default)]
pub struct HttpConnector {
    config: HttpClientConfig,
}

impl HttpConnector {
    pub fn new(config: HttpClientConfig) -> Self {
        Self { config }
    }
}

impl Connector for HttpConnector {
    fn connect(&self, credentials: &ConnectionCredentials) -> DriverResult<Arc<dyn Client>> {
        let client = HttpClient::new(credentials.clone(), self.config.clone())?;
        Ok(Arc::new(client))
    }
}

/// Client for the ClickHouse HTTP interface
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    credentials: ConnectionCredentials,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a client; no request is sent until the first query
    pub fn new(credentials: ConnectionCredentials, config: HttpClientConfig) -> DriverResult<Self> {
        Self::with_builder(reqwest::Client::builder(), credentials, config)
    }

    fn with_builder(
        builder: reqwest::ClientBuilder,
        credentials: ConnectionCredentials,
        config: HttpClientConfig,
    ) -> DriverResult<Self> {
        let client = builder
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| DriverError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            credentials,
            config,
        })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[async_trait]
impl Client for HttpClient {
    async fn execute(&self, sql: &str) -> Result<Vec<Row>, QueryError> {
        let creds = &self.credentials;
        debug!(url = %creds.base_url(), database = %creds.database, "POST query");

        let response = self
            .client
            .post(creds.base_url())
            .query(&[
                ("database", creds.database.as_str()),
                ("default_format", "JSON"),
                ("output_format_json_quote_64bit_integers", "0"),
            ])
            .header("X-ClickHouse-User", &creds.user)
            .header("X-ClickHouse-Key", &creds.password)
            .body(sql.to_string())
            .send()
            .await
            .map_err(|e| QueryError::new(e.to_string()))?;

        let status = response.status();
        let header_code = response
            .headers()
            .get(EXCEPTION_CODE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());
        let body = response
            .text()
            .await
            .map_err(|e| QueryError::new(e.to_string()).with_status(status.as_u16()))?;

        if !status.is_success() {
            return Err(server_error(status.as_u16(), header_code, &body));
        }

        parse_rows(&body)
    }
}

/// Decode a successful response body.
///
/// Statements without output (DDL, INSERT) answer with an empty body.
fn parse_rows(body: &str) -> Result<Vec<Row>, QueryError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str::<JsonResponse>(body)
        .map(|response| response.data)
        .map_err(|e| QueryError::new(format!("Failed to decode response: {}", e)))
}

/// Build the error for a non-2xx response
fn server_error(status: u16, header_code: Option<u32>, body: &str) -> QueryError {
    let message = body.trim();
    let mut error = if message.is_empty() {
        QueryError::new(format!("HTTP {}", status))
    } else {
        QueryError::new(message)
    };
    error.status = Some(status);
    error.code = header_code.or_else(|| parse_exception_code(message));
    error
}

/// Extract `N` from a `Code: N. DB::Exception: ...` message
fn parse_exception_code(message: &str) -> Option<u32> {
    let rest = message.strip_prefix("Code: ")?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer one request on a local port with `response`; yields the raw request
    async fn serve_once(response: String) -> (u16, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            while !request_complete(&request) {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
            String::from_utf8(request).unwrap()
        });
        (port, handle)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(head_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = text[..head_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        request.len() >= head_end + 4 + length
    }

    fn http_response(status: &str, headers: &[(&str, &str)], body: &str) -> String {
        let mut response = format!("HTTP/1.1 {}\r\n", status);
        for (name, value) in headers {
            response.push_str(&format!("{}: {}\r\n", name, value));
        }
        response.push_str(&format!(
            "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        ));
        response
    }

    fn local_client(port: u16) -> HttpClient {
        let credentials = ConnectionCredentials::new("127.0.0.1", port)
            .with_database("shop")
            .with_user("reader", "s3cret");
        HttpClient::with_builder(
            reqwest::Client::builder().no_proxy(),
            credentials,
            HttpClientConfig::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_execute_posts_sql_with_settings_and_auth() {
        let body = r#"{"meta":[],"data":[{"id":1,"name":"a"}],"rows":1}"#;
        let (port, server) = serve_once(http_response(
            "200 OK",
            &[("Content-Type", "application/json; charset=UTF-8")],
            body,
        ))
        .await;

        let rows = local_client(port).execute("SELECT id, name FROM t").await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some(&serde_json::json!("a")));

        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("POST /?"), "{}", request_line);
        assert!(request_line.contains("database=shop"));
        assert!(request_line.contains("default_format=JSON"));
        assert!(request_line.contains("output_format_json_quote_64bit_integers=0"));

        let head = request.to_ascii_lowercase();
        assert!(head.contains("x-clickhouse-user: reader\r\n"));
        assert!(head.contains("x-clickhouse-key: s3cret\r\n"));
        assert!(request.ends_with("\r\n\r\nSELECT id, name FROM t"));
    }

    #[tokio::test]
    async fn test_execute_maps_server_error_with_header_code() {
        let (port, server) = serve_once(http_response(
            "404 Not Found",
            &[(EXCEPTION_CODE_HEADER, "60")],
            "DB::Exception: Table shop.missing does not exist. (UNKNOWN_TABLE)",
        ))
        .await;

        let err = local_client(port)
            .execute("SELECT * FROM missing")
            .await
            .unwrap_err();
        server.await.unwrap();

        assert_eq!(err.code, Some(60));
        assert_eq!(err.status, Some(404));
        assert_eq!(
            err.message.as_deref(),
            Some("DB::Exception: Table shop.missing does not exist. (UNKNOWN_TABLE)")
        );
    }

    #[tokio::test]
    async fn test_execute_empty_success_body() {
        let (port, server) = serve_once(http_response("200 OK", &[], "")).await;

        let rows = local_client(port)
            .execute("CREATE TABLE t (x UInt8) ENGINE = Memory")
            .await
            .unwrap();
        server.await.unwrap();

        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_rows_keeps_column_order() {
        let body = r#"{
            "meta": [{"name": "zeta", "type": "UInt8"}, {"name": "alpha", "type": "String"}],
            "data": [{"zeta": 1, "alpha": "a"}, {"zeta": 2, "alpha": "b"}],
            "rows": 2,
            "statistics": {"elapsed": 0.001, "rows_read": 2, "bytes_read": 10}
        }"#;
        let rows = parse_rows(body).unwrap();
        assert_eq!(rows.len(), 2);
        let keys: Vec<&String> = rows[0].keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_parse_rows_empty_body() {
        assert!(parse_rows("").unwrap().is_empty());
        assert!(parse_rows("\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rows_rejects_non_json() {
        let err = parse_rows("1\t2\n").unwrap_err();
        assert!(err.message.unwrap().starts_with("Failed to decode response"));
    }

    #[test]
    fn test_server_error_parses_code_from_body() {
        let err = server_error(
            400,
            None,
            "Code: 62. DB::Exception: Syntax error: failed at position 1 (SELEC). (SYNTAX_ERROR)\n",
        );
        assert_eq!(err.code, Some(62));
        assert_eq!(err.status, Some(400));
        assert!(err.message.unwrap().ends_with("(SYNTAX_ERROR)"));
    }

    #[test]
    fn test_server_error_prefers_header_code() {
        let err = server_error(404, Some(81), "Code: 60. whatever");
        assert_eq!(err.code, Some(81));
    }

    #[test]
    fn test_server_error_empty_body() {
        let err = server_error(502, None, "");
        assert_eq!(err.message.as_deref(), Some("HTTP 502"));
        assert_eq!(err.code, None);
    }

    #[test]
    fn test_connector_builds_client() {
        let config = HttpClientConfig {
            timeout: Duration::from_secs(3),
            user_agent: "test-agent".to_string(),
        };
        let connector = HttpConnector::new(config);
        assert!(connector.connect(&ConnectionCredentials::default()).is_ok());
    }

    #[test]
    fn test_http_client_config() {
        let client =
            HttpClient::new(ConnectionCredentials::default(), HttpClientConfig::default()).unwrap();
        assert_eq!(client.config().timeout, Duration::from_secs(30));
    }
}
