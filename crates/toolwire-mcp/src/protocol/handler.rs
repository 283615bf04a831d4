//! Main request dispatcher — receives JSON-RPC messages, routes to handlers.

use std::sync::Arc;
use tokio::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use toolwire::{ToolCatalog, ToolError};

use crate::config::{EndpointConfig, UnknownMethodPolicy};
use crate::tools::ToolRegistry;
use crate::types::*;

use super::negotiation::NegotiatedCapabilities;
use super::validator::validate_request;

/// The main protocol handler that dispatches incoming JSON-RPC messages.
pub struct ProtocolHandler {
    catalog: Arc<ToolCatalog>,
    config: EndpointConfig,
    server: InitializeResult,
    capabilities: Mutex<NegotiatedCapabilities>,
}

impl ProtocolHandler {
    pub fn new(catalog: Arc<ToolCatalog>, config: EndpointConfig) -> Self {
        let server = InitializeResult::for_server(&config.server_name, &config.server_version);
        Self {
            catalog,
            config,
            server,
            capabilities: Mutex::new(NegotiatedCapabilities::default()),
        }
    }

    /// Build the catalog named by `config` and wrap it in a handler.
    pub fn from_config(config: EndpointConfig) -> McpResult<Self> {
        let catalog = ToolRegistry::build(&config.tools)?;
        Ok(Self::new(Arc::new(catalog), config))
    }

    pub fn catalog(&self) -> &Arc<ToolCatalog> {
        &self.catalog
    }

    pub fn server_info(&self) -> &InitializeResult {
        &self.server
    }

    /// Handle one message. `None` means nothing is written back.
    pub async fn handle_message(&self, msg: JsonRpcMessage) -> Option<Value> {
        match msg {
            JsonRpcMessage::Request(req) => self.handle_request(req).await,
            JsonRpcMessage::Notification(notif) => {
                self.handle_notification(notif).await;
                None
            }
            _ => {
                tracing::warn!("Received unexpected message type from client");
                None
            }
        }
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> Option<Value> {
        if let Err(e) = validate_request(&request) {
            tracing::warn!("Rejected request {}: {e}", request.id);
            return Some(encode(e.to_json_rpc_error(request.id.clone()), &request.id));
        }

        let id = request.id.clone();
        tracing::debug!("Dispatching {} (id {id})", request.method);

        let result = match self.check_initialized(&request.method).await {
            Ok(()) => self.dispatch_request(&request).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(value) => Some(encode(JsonRpcResponse::new(id.clone(), value), &id)),
            Err(McpError::MethodNotFound(method))
                if self.config.unknown_methods == UnknownMethodPolicy::Ignore =>
            {
                tracing::debug!("Ignoring unknown method {method}");
                None
            }
            Err(e) => {
                tracing::debug!("Request {id} failed: {e}");
                Some(encode(e.to_json_rpc_error(id.clone()), &id))
            }
        }
    }

    async fn dispatch_request(&self, request: &JsonRpcRequest) -> McpResult<Value> {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.params.clone()).await,

            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(request.params.clone()),

            "ping" => Ok(Value::Object(serde_json::Map::new())),

            _ => Err(McpError::MethodNotFound(request.method.clone())),
        }
    }

    async fn check_initialized(&self, method: &str) -> McpResult<()> {
        if !self.config.require_initialize || matches!(method, "initialize" | "ping") {
            return Ok(());
        }

        if self.capabilities.lock().await.initialized {
            Ok(())
        } else {
            Err(McpError::NotInitialized(format!(
                "`{method}` requires a prior initialize"
            )))
        }
    }

    async fn handle_notification(&self, notification: JsonRpcNotification) {
        match notification.method.as_str() {
            "notifications/initialized" | "initialized" => {
                self.capabilities.lock().await.mark_initialized();
            }
            "notifications/cancelled" | "$/cancelRequest" => {
                tracing::info!("Received cancellation notification; requests are not cancellable");
            }
            _ => {
                tracing::debug!("Unknown notification: {}", notification.method);
            }
        }
    }

    async fn handle_initialize(&self, params: Option<Value>) -> McpResult<Value> {
        let init_params: InitializeParams = parse_params(params)?.unwrap_or_default();

        let mut caps = self.capabilities.lock().await;
        let result = caps.negotiate(init_params, &self.server);

        serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
    }

    fn handle_tools_list(&self) -> McpResult<Value> {
        let result = ToolListResult {
            tools: self.catalog.list(),
            next_cursor: None,
        };
        serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
    }

    fn handle_tools_call(&self, params: Option<Value>) -> McpResult<Value> {
        let call_params: ToolCallParams = parse_params(params)?
            .ok_or_else(|| McpError::InvalidParams("Tool call params required".to_string()))?;

        let result = match self
            .catalog
            .call(&call_params.name, call_params.arguments.as_ref())
        {
            Ok(output) => ToolCallResult::from(output),
            Err(ToolError::UnknownTool(name)) => return Err(McpError::ToolNotFound(name)),
            Err(ToolError::InvalidArguments(e)) => {
                return Err(McpError::InvalidParams(e.to_string()))
            }
            Err(ToolError::Failed(message)) => {
                tracing::warn!("Tool {} failed: {message}", call_params.name);
                ToolCallResult::error(message)
            }
        };

        serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
    }
}

/// Deserialize request params. Absent and `null` params both mean "none".
fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> McpResult<Option<T>> {
    match params {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| McpError::InvalidParams(e.to_string())),
    }
}

/// Encode an outgoing message, falling back to a bare internal error so a
/// response line is always well-formed.
fn encode<T: Serialize>(message: T, id: &RequestId) -> Value {
    serde_json::to_value(message).unwrap_or_else(|e| {
        tracing::error!("Failed to encode response for {id}: {e}");
        json!({
            "jsonrpc": JSONRPC_VERSION,
            "id": id,
            "error": {
                "code": error_codes::INTERNAL_ERROR,
                "message": "Internal error"
            }
        })
    })
}
