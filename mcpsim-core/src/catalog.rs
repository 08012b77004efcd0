use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

/// Fixed set of tool names the simulator advertises.
pub const TOOL_NAMES: [&str; 5] = [
    "calculator",
    "file_reader",
    "web_search",
    "database_query",
    "email_sender",
];

/// Fixed set of resource URIs the simulator advertises.
pub const RESOURCE_URIS: [&str; 4] = [
    "config://settings.json",
    "file://documents/readme.md",
    "url://api.example.com/data",
    "database://users/table",
];

/// A tool catalog entry as carried in `tools/list` results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: JsonValue,
}

/// A resource catalog entry as carried in `resources/list` results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
}

/// A prompt catalog entry as carried in `prompts/list` results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PromptDescriptor {
    pub name: String,
    pub description: String,
    pub arguments: Vec<PromptArgument>,
}

/// A declared prompt argument.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PromptArgument {
    pub name: String,
    pub description: String,
    pub required: bool,
}

pub fn tool_catalog() -> Vec<ToolDescriptor> {
    TOOL_NAMES
        .iter()
        .map(|name| ToolDescriptor {
            name: (*name).to_string(),
            description: format!("A test {} tool", name.replace('_', " ")),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "input": { "type": "string", "description": "Input for the tool" }
                },
                "required": ["input"]
            }),
        })
        .collect()
}

pub fn resource_catalog() -> Vec<ResourceDescriptor> {
    RESOURCE_URIS
        .iter()
        .map(|uri| ResourceDescriptor {
            uri: (*uri).to_string(),
            name: display_name(uri).to_string(),
            description: format!("Test resource: {uri}"),
            mime_type: "text/plain".to_string(),
        })
        .collect()
}

pub fn prompt_catalog() -> Vec<PromptDescriptor> {
    vec![
        PromptDescriptor {
            name: "summarize".to_string(),
            description: "Summarize the given text".to_string(),
            arguments: vec![PromptArgument {
                name: "text".to_string(),
                description: "Text to summarize".to_string(),
                required: true,
            }],
        },
        PromptDescriptor {
            name: "translate".to_string(),
            description: "Translate text between languages".to_string(),
            arguments: vec![
                PromptArgument {
                    name: "text".to_string(),
                    description: "Text to translate".to_string(),
                    required: true,
                },
                PromptArgument {
                    name: "target_language".to_string(),
                    description: "Target language".to_string(),
                    required: true,
                },
            ],
        },
    ]
}

/// Derives the display name from everything after the URI scheme.
fn display_name(uri: &str) -> &str {
    uri.split_once("://").map_or(uri, |(_, rest)| rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_catalog_covers_every_fixed_tool() {
        let tools = tool_catalog();
        assert_eq!(tools.len(), TOOL_NAMES.len());
        let calculator = &tools[0];
        assert_eq!(calculator.name, "calculator");
        assert_eq!(calculator.description, "A test calculator tool");
        assert_eq!(calculator.input_schema["required"][0], "input");

        let reader = tools
            .iter()
            .find(|tool| tool.name == "file_reader")
            .expect("file_reader tool");
        assert_eq!(reader.description, "A test file reader tool");
    }

    #[test]
    fn resource_catalog_derives_display_names() {
        let resources = resource_catalog();
        assert_eq!(resources.len(), RESOURCE_URIS.len());
        assert_eq!(resources[0].uri, "config://settings.json");
        assert_eq!(resources[0].name, "settings.json");
        assert_eq!(resources[3].name, "users/table");
        assert!(resources
            .iter()
            .all(|resource| resource.mime_type == "text/plain"));
    }

    #[test]
    fn prompt_catalog_declares_required_arguments() {
        let prompts = prompt_catalog();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0].name, "summarize");
        assert_eq!(prompts[1].name, "translate");
        assert_eq!(prompts[1].arguments.len(), 2);
        assert!(prompts[1].arguments.iter().all(|argument| argument.required));
    }

    #[test]
    fn tool_descriptor_serializes_schema_in_camel_case() {
        let tools = tool_catalog();
        let value = serde_json::to_value(&tools[0]).expect("serialize tool");
        assert!(value.get("inputSchema").is_some());
        assert!(value.get("input_schema").is_none());
    }

    #[test]
    fn display_name_keeps_uris_without_scheme() {
        assert_eq!(display_name("plain-name"), "plain-name");
        assert_eq!(display_name("file://documents/readme.md"), "documents/readme.md");
    }
}
