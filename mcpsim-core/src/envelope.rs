use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

/// Reserved code for lines that cannot be decoded into a request.
pub const PARSE_ERROR: i32 = -32700;
/// Reserved code for decoded requests whose method has no handler.
pub const METHOD_NOT_FOUND: i32 = -32601;
/// Reserved code for handler failures converted into responses.
pub const INTERNAL_ERROR: i32 = -32603;
/// Application-defined codes used by the injected-error path.
pub const SIMULATED_ERROR_CODES: [i32; 4] = [-32000, -32001, -32002, -32003];

const PROTOCOL_VERSION: &str = "2.0";

/// A decoded JSON-RPC request envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    /// Correlation token, echoed back verbatim. Null when the client sent none.
    #[serde(default)]
    pub id: JsonValue,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<JsonValue>,
}

/// A JSON-RPC response envelope carrying either a result or an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Builds a result response for the given correlation token.
    pub fn success(id: JsonValue, result: JsonValue) -> Self {
        Self {
            jsonrpc: PROTOCOL_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Builds an error response for the given correlation token.
    pub fn failure(id: JsonValue, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: PROTOCOL_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// Error descriptor attached to failed responses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl JsonRpcError {
    /// Parse failure for an undecodable input line.
    pub fn parse_error(detail: &str) -> Self {
        Self {
            code: PARSE_ERROR,
            message: "Parse error".to_string(),
            data: Some(JsonValue::String(detail.to_string())),
        }
    }

    /// No handler is registered for the requested method.
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: format!("Method not found in {method}"),
            data: Some(error_data(method, "No handler is registered for this method")),
        }
    }

    /// Handler-level failure converted into a response.
    pub fn internal(method: &str, detail: &str) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: format!("Internal error in {method}"),
            data: Some(error_data(method, detail)),
        }
    }

    /// Fault-injector error tagged with an application-defined code.
    pub fn simulated(code: i32, method: &str) -> Self {
        Self {
            code,
            message: format!("Simulated error in {method}"),
            data: Some(error_data(
                method,
                "This is a simulated error for testing purposes",
            )),
        }
    }
}

fn error_data(method: &str, details: &str) -> JsonValue {
    json!({
        "timestamp": Utc::now().to_rfc3339(),
        "method": method,
        "details": details,
    })
}

/// Decode failure carrying whatever correlation token could be salvaged.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodeError {
    pub message: String,
    /// Salvaged correlation token; null when none could be extracted.
    pub id: JsonValue,
}

impl DecodeError {
    fn new(message: impl Into<String>, id: JsonValue) -> Self {
        Self {
            message: message.into(),
            id,
        }
    }
}

/// Parses one input line into a request envelope.
///
/// A syntactically invalid line fails with a null salvaged id. A valid JSON
/// object missing the protocol tag or the method still fails, but the salvaged
/// id lets the caller correlate the error response.
pub fn decode_request(line: &str) -> Result<JsonRpcRequest, DecodeError> {
    let value: JsonValue = serde_json::from_str(line)
        .map_err(|error| DecodeError::new(format!("invalid JSON: {error}"), JsonValue::Null))?;
    let id = value.get("id").cloned().unwrap_or(JsonValue::Null);
    match value.get("jsonrpc").and_then(JsonValue::as_str) {
        Some(PROTOCOL_VERSION) => {}
        Some(other) => {
            return Err(DecodeError::new(
                format!("unsupported jsonrpc version '{other}'"),
                id,
            ))
        }
        None => return Err(DecodeError::new("missing jsonrpc version tag", id)),
    }
    let method = match value.get("method").and_then(JsonValue::as_str) {
        Some(method) if !method.is_empty() => method.to_string(),
        Some(_) => return Err(DecodeError::new("empty method name", id)),
        None => return Err(DecodeError::new("missing method name", id)),
    };
    Ok(JsonRpcRequest {
        jsonrpc: PROTOCOL_VERSION.to_string(),
        id,
        method,
        params: value.get("params").cloned(),
    })
}

/// Serializes a response envelope to a single line (without the newline).
pub fn encode_response(response: &JsonRpcResponse) -> Result<String, serde_json::Error> {
    serde_json::to_string(response)
}
