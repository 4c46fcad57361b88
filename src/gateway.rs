//! Function-gateway transport
//!
//! Accepts an API-gateway proxy event and produces a proxy response. The
//! handler is a plain async function over serde types; the process that feeds
//! it events (the `invoke` subcommand, or any other runtime shim) only moves
//! JSON in and out.

use std::collections::HashMap;

use axum::http::Method;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::router::{self, Reply};
use crate::service::GraphService;

/// Subset of the proxy request event that routing needs
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    pub http_method: String,
    pub path: String,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl From<Reply> for GatewayResponse {
    fn from(reply: Reply) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), reply.content_type.to_string());
        GatewayResponse {
            status_code: reply.status.as_u16(),
            headers,
            body: reply.body,
            is_base64_encoded: false,
        }
    }
}

impl GatewayRequest {
    pub fn new(method: &str, path: &str, body: Option<&str>) -> Self {
        Self {
            http_method: method.to_string(),
            path: path.to_string(),
            body: body.map(str::to_string),
            ..Default::default()
        }
    }
}

/// Handle one gateway event
pub async fn handle(service: &GraphService, request: &GatewayRequest) -> GatewayResponse {
    // An unparseable method cannot match a route
    let method = match Method::from_bytes(request.http_method.as_bytes()) {
        Ok(method) => method,
        Err(_) => return Reply::error(&GraphError::NotFound).into(),
    };
    let body = request.body.as_deref().unwrap_or_default();

    router::dispatch(service, &method, &request.path, body.as_bytes())
        .await
        .into()
}

/// Parse a raw event, handle it and encode the response
pub async fn handle_json(service: &GraphService, event: &[u8]) -> Result<String> {
    let request: GatewayRequest = serde_json::from_slice(event)?;
    let response = handle(service, &request).await;
    serde_json::to_string(&response).map_err(|e| GraphError::Serialization(e.to_string()))
}

#[cfg(test)]
mod gateway_tests {
    use super::*;

    #[test]
    fn test_request_uses_proxy_field_names() {
        let raw = r#"{
            "httpMethod": "POST",
            "path": "/nodes",
            "headers": {"Content-Type": "application/json"},
            "queryStringParameters": null,
            "body": "{\"title\":\"A\",\"content\":\"hello\"}",
            "isBase64Encoded": false,
            "requestContext": {"stage": "prod"}
        }"#;

        let request: GatewayRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.http_method, "POST");
        assert_eq!(request.path, "/nodes");
        assert_eq!(request.body.as_deref(), Some(r#"{"title":"A","content":"hello"}"#));
        assert!(request.query_string_parameters.is_none());
    }

    #[test]
    fn test_null_members_are_accepted() {
        let raw = r#"{
            "httpMethod": "GET",
            "path": "/health",
            "headers": null,
            "queryStringParameters": null,
            "body": null,
            "isBase64Encoded": false
        }"#;

        let request: GatewayRequest = serde_json::from_str(raw).unwrap();
        assert!(request.headers.is_none());
        assert!(request.body.is_none());
    }

    #[test]
    fn test_response_uses_proxy_field_names() {
        let response = GatewayResponse {
            status_code: 404,
            headers: HashMap::new(),
            body: "Not found".to_string(),
            is_base64_encoded: false,
        };
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["statusCode"], 404);
        assert_eq!(value["body"], "Not found");
        assert_eq!(value["isBase64Encoded"], false);
    }
}
