//! Stateless MCP over HTTP: one JSON-RPC message per `POST /mcp`.
//!
//! No sessions and no SSE. Each request is answered in its own response
//! body, which is all a single read-only tool needs. This is also the only
//! transport that can see the caller's `userinfo` header.

use anyhow::Context;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use rmcp::{ServerHandler, schemars};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::{
    identity::USERINFO_HEADER,
    model::LookupRequest,
    server::{TOOL_DESCRIPTION, TOOL_NAME, WeatherServer},
};

const JSONRPC_VERSION: &str = "2.0";

const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

pub fn router(server: WeatherServer) -> Router {
    Router::new()
        .route("/mcp", post(handle_post))
        .with_state(server)
}

pub async fn serve(server: WeatherServer, bind_addr: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {bind_addr}"))?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, router(server))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received");
        })
        .await
        .context("HTTP server error")
}

fn rpc_error(code: i32, message: impl Into<String>) -> Value {
    json!({ "code": code, "message": message.into() })
}

fn reply(id: Value, outcome: Result<Value, Value>) -> Response {
    let body = match outcome {
        Ok(result) => json!({ "jsonrpc": JSONRPC_VERSION, "id": id, "result": result }),
        Err(error) => json!({ "jsonrpc": JSONRPC_VERSION, "id": id, "error": error }),
    };
    Json(body).into_response()
}

fn tool_definition() -> Value {
    json!({
        "name": TOOL_NAME,
        "description": TOOL_DESCRIPTION,
        "inputSchema": schemars::schema_for!(LookupRequest),
    })
}

async fn handle_post(
    State(server): State<WeatherServer>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let message: Value = match serde_json::from_slice(&body) {
        Ok(message) => message,
        Err(e) => return reply(Value::Null, Err(rpc_error(PARSE_ERROR, format!("Parse error: {e}")))),
    };

    let id = message.get("id").cloned();
    let Some(method) = message.get("method").and_then(Value::as_str) else {
        return reply(
            id.unwrap_or(Value::Null),
            Err(rpc_error(INVALID_REQUEST, "Invalid request")),
        );
    };

    let Some(id) = id else {
        debug!(method, "Notification received");
        return StatusCode::ACCEPTED.into_response();
    };

    debug!(method, %id, "Request received");
    let params = message.get("params").cloned().unwrap_or(Value::Null);
    let userinfo = headers
        .get(USERINFO_HEADER)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

    reply(id, dispatch(&server, method, params, userinfo.as_deref()).await)
}

async fn dispatch(
    server: &WeatherServer,
    method: &str,
    params: Value,
    userinfo: Option<&str>,
) -> Result<Value, Value> {
    match method {
        "initialize" => serde_json::to_value(server.get_info())
            .map_err(|e| rpc_error(INTERNAL_ERROR, e.to_string())),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": [tool_definition()] })),
        "tools/call" => {
            let call: CallToolParams = serde_json::from_value(params)
                .map_err(|e| rpc_error(INVALID_PARAMS, format!("Invalid params: {e}")))?;
            if call.name != TOOL_NAME {
                return Err(rpc_error(INVALID_PARAMS, format!("Unknown tool: {}", call.name)));
            }

            let arguments = call.arguments.unwrap_or_else(|| json!({}));
            let request: LookupRequest = serde_json::from_value(arguments)
                .map_err(|e| rpc_error(INVALID_PARAMS, format!("Invalid arguments: {e}")))?;

            let result = server.call_lookup(&request, userinfo).await.map_err(|e| {
                serde_json::to_value(&e)
                    .unwrap_or_else(|_| rpc_error(INTERNAL_ERROR, "Internal error"))
            })?;
            serde_json::to_value(result).map_err(|e| rpc_error(INTERNAL_ERROR, e.to_string()))
        }
        other => Err(rpc_error(METHOD_NOT_FOUND, format!("Method not found: {other}"))),
    }
}
