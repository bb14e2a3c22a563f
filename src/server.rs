use std::sync::Arc;

use rmcp::{
    Error as McpError, ServerHandler,
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool,
};

use crate::{
    lookup::WeatherLookup,
    model::{LookupOutcome, LookupRequest},
};

pub const TOOL_NAME: &str = "get_current_weather";
pub const TOOL_DESCRIPTION: &str = "获取指定城市的当前天气信息";

/// The outcome as tool content: one JSON text block, flagged as an error for `ErrorResult`.
pub fn into_call_result(outcome: &LookupOutcome) -> Result<CallToolResult, McpError> {
    let content = Content::json(outcome)?;
    Ok(if outcome.is_error() {
        CallToolResult::error(vec![content])
    } else {
        CallToolResult::success(vec![content])
    })
}

#[derive(Debug, Clone)]
pub struct WeatherServer {
    lookup: Arc<WeatherLookup>,
}

#[tool(tool_box)]
impl WeatherServer {
    pub fn new(lookup: WeatherLookup) -> Self {
        Self {
            lookup: Arc::new(lookup),
        }
    }

    /// Shared by every transport; `userinfo` is only known to the HTTP one.
    pub async fn call_lookup(
        &self,
        request: &LookupRequest,
        userinfo: Option<&str>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = self.lookup.lookup(request, userinfo).await;
        into_call_result(&outcome)
    }

    #[tool(description = "获取指定城市的当前天气信息")]
    async fn get_current_weather(
        &self,
        #[tool(aggr)] request: LookupRequest,
    ) -> Result<CallToolResult, McpError> {
        self.call_lookup(&request, None).await
    }
}

#[tool(tool_box)]
impl ServerHandler for WeatherServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "天气查询服务。工具 get_current_weather: 查询指定城市的当前天气，\
                 参数 city (城市名称), country (国家代码，可选), units (metric 或 imperial)。"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            ..Default::default()
        }
    }
}
