//! Protocol-level integration tests for toolwire-mcp.
//!
//! Drives the dispatcher with parsed JSON-RPC messages and checks the
//! response envelopes.

use serde_json::{json, Value};

use toolwire::ToolDescriptor;
use toolwire_mcp::config::{EndpointConfig, UnknownMethodPolicy};
use toolwire_mcp::protocol::ProtocolHandler;
use toolwire_mcp::types::*;

// ─────────────────────── helpers ───────────────────────

fn math_handler() -> ProtocolHandler {
    ProtocolHandler::from_config(EndpointConfig::default()).unwrap()
}

fn handler_with(config: EndpointConfig) -> ProtocolHandler {
    ProtocolHandler::from_config(config).unwrap()
}

/// Build a JSON-RPC request.
fn rpc(id: i64, method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params
    })
}

fn call(id: i64, name: &str, arguments: Value) -> Value {
    rpc(id, "tools/call", json!({ "name": name, "arguments": arguments }))
}

/// Send a JSON-RPC message through the handler and return the response.
async fn send(handler: &ProtocolHandler, msg: Value) -> Option<Value> {
    let parsed: JsonRpcMessage = serde_json::from_value(msg).unwrap();
    handler.handle_message(parsed).await
}

/// Send and unwrap the response.
async fn send_unwrap(handler: &ProtocolHandler, msg: Value) -> Value {
    send(handler, msg).await.expect("expected response")
}

fn text_of(resp: &Value) -> &str {
    resp["result"]["content"][0]["text"].as_str().unwrap()
}

// ═══════════════════════════════════════════════════════
// HANDSHAKE
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_initialize_descriptor() {
    let config = EndpointConfig {
        server_name: "math-rs".to_string(),
        server_version: "1.0".to_string(),
        ..EndpointConfig::default()
    };
    let handler = handler_with(config);

    let resp = send_unwrap(
        &handler,
        rpc(
            0,
            "initialize",
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": { "name": "test-client", "version": "1.0" }
            }),
        ),
    )
    .await;

    assert_eq!(
        resp,
        json!({
            "jsonrpc": "2.0",
            "id": 0,
            "result": {
                "protocolVersion": "2024-11-05",
                "capabilities": { "tools": {} },
                "serverInfo": { "name": "math-rs", "version": "1.0" }
            }
        })
    );
}

#[tokio::test]
async fn test_initialize_without_params() {
    let resp = send_unwrap(
        &math_handler(),
        json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize" }),
    )
    .await;
    assert_eq!(resp["result"]["protocolVersion"], MCP_VERSION);
}

#[tokio::test]
async fn test_calls_served_before_initialize() {
    let handler = math_handler();
    let resp = send_unwrap(&handler, call(1, "add", json!({ "a": 1, "b": 1 }))).await;
    assert_eq!(text_of(&resp), "2");
}

#[tokio::test]
async fn test_gated_mode_requires_initialize() {
    let config = EndpointConfig {
        require_initialize: true,
        ..EndpointConfig::default()
    };
    let handler = handler_with(config);

    let resp = send_unwrap(&handler, rpc(1, "tools/list", json!({}))).await;
    assert_eq!(resp["error"]["code"], -32002);
    assert!(resp.get("result").is_none());

    // ping is always allowed
    let resp = send_unwrap(&handler, rpc(2, "ping", json!({}))).await;
    assert_eq!(resp["result"], json!({}));

    send_unwrap(&handler, rpc(3, "initialize", json!({}))).await;
    let resp = send_unwrap(&handler, rpc(4, "tools/list", json!({}))).await;
    assert_eq!(resp["result"]["tools"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_gated_mode_initialized_notification() {
    let config = EndpointConfig {
        require_initialize: true,
        ..EndpointConfig::default()
    };
    let handler = handler_with(config);

    let none = send(
        &handler,
        json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
    )
    .await;
    assert!(none.is_none());

    let resp = send_unwrap(&handler, call(1, "multiply", json!({ "a": 2, "b": 4 }))).await;
    assert_eq!(text_of(&resp), "8");
}

// ═══════════════════════════════════════════════════════
// CATALOG
// ═══════════════════════════════════════════════════════

/// tools/list on the default catalog yields exactly add and multiply.
#[tokio::test]
async fn test_tools_list_default_catalog() {
    let resp = send_unwrap(
        &math_handler(),
        json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list" }),
    )
    .await;

    let tools = resp["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["add", "multiply"]);

    for tool in tools {
        assert_eq!(tool["inputSchema"]["type"], "object");
        assert_eq!(tool["inputSchema"]["required"], json!(["a", "b"]));
        assert_eq!(tool["inputSchema"]["properties"]["a"]["type"], "number");
        assert!(tool["description"].as_str().is_some_and(|d| !d.is_empty()));
    }
}

#[tokio::test]
async fn test_tools_list_is_stable() {
    let handler = math_handler();
    let first = send_unwrap(&handler, rpc(1, "tools/list", json!({}))).await;
    send_unwrap(&handler, call(2, "add", json!({ "a": 1, "b": 2 }))).await;
    let second = send_unwrap(&handler, rpc(3, "tools/list", json!({}))).await;
    assert_eq!(first["result"], second["result"]);
}

/// A consumer parsing tools/list gets back the same descriptors.
#[tokio::test]
async fn test_tools_list_round_trip() {
    let config = EndpointConfig {
        tools: vec!["add", "multiply", "echo", "upper", "time_now", "hash_text", "uuid_v4"]
            .into_iter()
            .map(String::from)
            .collect(),
        ..EndpointConfig::default()
    };
    let handler = handler_with(config);
    let resp = send_unwrap(&handler, rpc(1, "tools/list", json!({}))).await;

    let wire = serde_json::to_string(&resp["result"]).unwrap();
    let parsed: ToolListResult = serde_json::from_str(&wire).unwrap();
    let produced: Vec<ToolDescriptor> = handler.catalog().list();

    assert_eq!(parsed.tools, produced);
}

// ═══════════════════════════════════════════════════════
// INVOCATION
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_add_scenario() {
    let resp = send_unwrap(
        &math_handler(),
        json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tools/call",
            "params": { "name": "add", "arguments": { "a": 2, "b": 3 } }
        }),
    )
    .await;
    assert_eq!(
        resp,
        json!({
            "jsonrpc": "2.0",
            "id": 2,
            "result": { "content": [{ "type": "text", "text": "5" }] }
        })
    );
}

#[tokio::test]
async fn test_arithmetic_values() {
    let handler = math_handler();
    let cases = [
        ("add", json!({ "a": 0.1, "b": 0.2 }), "0.30000000000000004"),
        ("add", json!({ "a": -2, "b": 2 }), "0"),
        ("add", json!({ "a": 1.5, "b": 2.25 }), "3.75"),
        ("multiply", json!({ "a": 6, "b": 7 }), "42"),
        ("multiply", json!({ "a": -0.5, "b": 4 }), "-2"),
        ("multiply", json!({ "a": 0, "b": -3 }), "0"),
    ];

    for (i, (tool, args, expected)) in cases.into_iter().enumerate() {
        let resp = send_unwrap(&handler, call(i as i64, tool, args)).await;
        assert_eq!(text_of(&resp), expected, "{tool} case {i}");
    }
}

#[tokio::test]
async fn test_unknown_tool_scenario() {
    let resp = send_unwrap(
        &math_handler(),
        json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": { "name": "divide", "arguments": {} }
        }),
    )
    .await;
    assert_eq!(
        resp,
        json!({
            "jsonrpc": "2.0",
            "id": 3,
            "error": { "code": -32601, "message": "Method not found" }
        })
    );
}

#[tokio::test]
async fn test_missing_argument_is_invalid_params() {
    let resp = send_unwrap(&math_handler(), call(5, "add", json!({ "a": 2 }))).await;
    assert_eq!(resp["error"]["code"], -32602);
    assert_eq!(resp["error"]["message"], "Invalid params");
    assert!(resp["error"]["data"].as_str().unwrap().contains('b'));
    assert!(resp.get("result").is_none());
}

#[tokio::test]
async fn test_missing_arguments_object() {
    let resp = send_unwrap(
        &math_handler(),
        rpc(6, "tools/call", json!({ "name": "multiply" })),
    )
    .await;
    assert_eq!(resp["error"]["code"], -32602);
}

#[tokio::test]
async fn test_non_numeric_argument() {
    let handler = math_handler();
    for bad in [json!("2"), json!(true), json!([2]), json!({ "n": 2 })] {
        let resp = send_unwrap(&handler, call(7, "add", json!({ "a": bad.clone(), "b": 1 }))).await;
        assert_eq!(resp["error"]["code"], -32602, "argument {bad}");
    }
}

#[tokio::test]
async fn test_arguments_must_be_object() {
    let resp = send_unwrap(&math_handler(), call(8, "add", json!([1, 2]))).await;
    assert_eq!(resp["error"]["code"], -32602);
}

#[tokio::test]
async fn test_overflow_is_tool_error() {
    let resp = send_unwrap(
        &math_handler(),
        call(9, "multiply", json!({ "a": 1e308, "b": 10 })),
    )
    .await;
    assert_eq!(resp["result"]["isError"], true);
    assert!(resp.get("error").is_none());
}

#[tokio::test]
async fn test_disabled_tool_is_not_found() {
    let resp = send_unwrap(&math_handler(), call(10, "echo", json!({ "text": "hi" }))).await;
    assert_eq!(resp["error"]["code"], -32601);
}

#[tokio::test]
async fn test_hash_text_with_all_tools() {
    let config = EndpointConfig {
        tools: toolwire_mcp::ToolRegistry::group_names("all"),
        ..EndpointConfig::default()
    };
    let handler = handler_with(config);

    let resp = send_unwrap(&handler, call(1, "hash_text", json!({ "text": "abc" }))).await;
    assert_eq!(
        text_of(&resp),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );

    let resp = send_unwrap(
        &handler,
        call(2, "hash_text", json!({ "text": "abc", "alg": "sha1" })),
    )
    .await;
    assert_eq!(resp["error"]["code"], -32602);
}

// ═══════════════════════════════════════════════════════
// ENVELOPE
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_ids_echoed_verbatim() {
    let handler = math_handler();
    for id in [json!("req-1"), json!(42), json!(1.5), Value::Null] {
        let resp = send_unwrap(
            &handler,
            json!({ "jsonrpc": "2.0", "id": id, "method": "ping" }),
        )
        .await;
        assert_eq!(resp["id"], id);
    }
}

#[tokio::test]
async fn test_unknown_method() {
    let resp = send_unwrap(&math_handler(), rpc(11, "prompts/list", json!({}))).await;
    assert_eq!(
        resp["error"],
        json!({ "code": -32601, "message": "Method not found" })
    );
}

#[tokio::test]
async fn test_unknown_method_ignore_policy() {
    let handler = handler_with(EndpointConfig {
        unknown_methods: UnknownMethodPolicy::Ignore,
        ..EndpointConfig::default()
    });
    assert!(send(&handler, rpc(12, "prompts/list", json!({}))).await.is_none());
}

#[tokio::test]
async fn test_wrong_jsonrpc_version() {
    let resp = send_unwrap(
        &math_handler(),
        json!({ "jsonrpc": "1.0", "id": 13, "method": "ping" }),
    )
    .await;
    assert_eq!(resp["error"]["code"], -32600);
    assert_eq!(resp["id"], 13);
}

#[tokio::test]
async fn test_exactly_one_of_result_or_error() {
    let handler = math_handler();
    let requests = [
        rpc(1, "initialize", json!({})),
        rpc(2, "tools/list", json!({})),
        call(3, "add", json!({ "a": 1, "b": 2 })),
        call(4, "add", json!({})),
        call(5, "nope", json!({})),
        rpc(6, "nope", json!({})),
    ];
    for req in requests {
        let resp = send_unwrap(&handler, req).await;
        assert_eq!(resp["jsonrpc"], "2.0");
        assert!(resp.get("result").is_some() != resp.get("error").is_some(), "{resp}");
    }
}
