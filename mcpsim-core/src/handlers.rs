use chrono::Utc;
use rand::Rng;
use serde_json::{json, Value as JsonValue};

use crate::catalog::{prompt_catalog, resource_catalog, tool_catalog};

/// The fixed method surface the simulator answers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Method {
    Initialize,
    ToolsList,
    ToolsCall,
    ResourcesList,
    ResourcesRead,
    PromptsList,
    PromptsGet,
}

impl Method {
    /// Exact-match routing; no prefix or partial matching.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "initialize" => Some(Self::Initialize),
            "tools/list" => Some(Self::ToolsList),
            "tools/call" => Some(Self::ToolsCall),
            "resources/list" => Some(Self::ResourcesList),
            "resources/read" => Some(Self::ResourcesRead),
            "prompts/list" => Some(Self::PromptsList),
            "prompts/get" => Some(Self::PromptsGet),
            _ => None,
        }
    }
}

/// Synthesizes the result payload for a routed method.
///
/// Result shapes are deterministic; content and sizes draw from the supplied
/// randomness source so a downstream monitor sees variable payloads.
pub fn dispatch<R: Rng>(method: Method, params: &JsonValue, rng: &mut R) -> JsonValue {
    match method {
        Method::Initialize => initialize_result(),
        Method::ToolsList => tools_list_result(),
        Method::ToolsCall => tools_call_result(params, rng),
        Method::ResourcesList => resources_list_result(),
        Method::ResourcesRead => resources_read_result(params, rng),
        Method::PromptsList => prompts_list_result(),
        Method::PromptsGet => prompts_get_result(params),
    }
}

fn initialize_result() -> JsonValue {
    json!({
        "protocolVersion": "2024-11-05",
        "capabilities": {
            "tools": { "listChanged": true },
            "resources": { "subscribe": true, "listChanged": true },
            "prompts": { "listChanged": true }
        },
        "serverInfo": {
            "name": "mcpsim",
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

fn tools_list_result() -> JsonValue {
    json!({ "tools": tool_catalog() })
}

fn tools_call_result<R: Rng>(params: &JsonValue, rng: &mut R) -> JsonValue {
    let name = params.get("name").and_then(JsonValue::as_str).unwrap_or("unknown");
    let input = params
        .get("arguments")
        .and_then(|arguments| arguments.get("input"))
        .and_then(JsonValue::as_str);
    let text = match name {
        "calculator" => format!("Calculated result: {}", rng.gen_range(1..=1000)),
        "web_search" => format!(
            "Found {} search results for: {}",
            rng.gen_range(5..=50),
            input.unwrap_or("query")
        ),
        "file_reader" => {
            let padding = "x".repeat(rng.gen_range(100..=2000));
            format!(
                "File content: Lorem ipsum dolor sit amet, consectetur adipiscing elit...{padding}"
            )
        }
        _ => format!(
            "Tool {name} executed successfully with input: {}",
            input.unwrap_or("N/A")
        ),
    };
    json!({ "content": [{ "type": "text", "text": text }] })
}

fn resources_list_result() -> JsonValue {
    json!({ "resources": resource_catalog() })
}

fn resources_read_result<R: Rng>(params: &JsonValue, rng: &mut R) -> JsonValue {
    let uri = params
        .get("uri")
        .and_then(JsonValue::as_str)
        .unwrap_or("unknown://resource");
    // Three content shapes, chosen uniformly: JSON blob, short text, long text.
    let text = match rng.gen_range(0..3) {
        0 => {
            let items: Vec<String> = (0..rng.gen_range(3..=10))
                .map(|index| format!("item_{index}"))
                .collect();
            let blob = json!({
                "message": "This is a JSON resource",
                "timestamp": Utc::now().to_rfc3339(),
                "data": {
                    "items": items,
                    "metadata": { "version": "1.0", "type": "test" }
                }
            });
            serde_json::to_string_pretty(&blob)
                .unwrap_or("<failed to serialize resource>".to_string())
        }
        1 => format!(
            "This is a very long text resource. {}",
            "Lorem ipsum dolor sit amet, consectetur adipiscing elit. "
                .repeat(rng.gen_range(20..=100))
        ),
        _ => format!("Simple text content for resource: {uri}"),
    };
    json!({
        "contents": [{ "uri": uri, "mimeType": "text/plain", "text": text }]
    })
}

fn prompts_list_result() -> JsonValue {
    json!({ "prompts": prompt_catalog() })
}

fn prompts_get_result(params: &JsonValue) -> JsonValue {
    let name = params.get("name").and_then(JsonValue::as_str).unwrap_or("unknown");
    let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));
    let text = match name {
        "summarize" => {
            let text = arguments
                .get("text")
                .and_then(JsonValue::as_str)
                .unwrap_or("No text provided");
            format!(
                "Summary: This text contains {} words and discusses various topics.",
                text.split_whitespace().count()
            )
        }
        "translate" => {
            let target = arguments
                .get("target_language")
                .and_then(JsonValue::as_str)
                .unwrap_or("Spanish");
            format!("Translated to {target}: \u{a1}Hola! (simulated translation)")
        }
        _ => format!("Executed prompt '{name}' with arguments: {arguments}"),
    };
    json!({
        "description": format!("Result from {name} prompt"),
        "messages": [{
            "role": "assistant",
            "content": { "type": "text", "text": text }
        }]
    })
}
