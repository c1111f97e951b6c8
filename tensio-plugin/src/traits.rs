//! Tool traits

use crate::ToolContext;
use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use tensio_core::TensioError;

/// Metadata about a tool argument
#[derive(Debug, Clone, Serialize)]
pub struct ArgMeta {
    pub name: &'static str,
    /// JSON schema type: "number", "integer", "string", "object", "array"
    pub typ: &'static str,
    /// Item type for arrays ("number" or a record name such as "BpReading")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<&'static str>,
    pub description: &'static str,
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

impl ArgMeta {
    pub const fn required(name: &'static str, typ: &'static str, description: &'static str) -> Self {
        Self { name, typ, items: None, description, optional: false, default: None }
    }

    pub const fn optional(name: &'static str, typ: &'static str, description: &'static str, default: &'static str) -> Self {
        Self { name, typ, items: None, description, optional: true, default: Some(default) }
    }

    pub const fn list(name: &'static str, items: &'static str, description: &'static str) -> Self {
        Self { name, typ: "array", items: Some(items), description, optional: false, default: None }
    }

    pub const fn optional_list(name: &'static str, items: &'static str, description: &'static str) -> Self {
        Self { name, typ: "array", items: Some(items), description, optional: true, default: Some("[]") }
    }

    /// JSON schema fragment for this argument
    pub fn schema(&self) -> JsonValue {
        let mut schema = json!({
            "type": self.typ,
            "description": self.description,
        });
        if let Some(items) = self.items {
            schema["items"] = match items {
                "number" | "integer" | "string" => json!({ "type": items }),
                record => json!({ "type": "object", "description": record }),
            };
        }
        schema
    }
}

/// Metadata for a tool
#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub args: &'static [ArgMeta],
    pub returns: &'static str,
    pub examples: &'static [&'static str],
    pub category: &'static str,
    pub related: &'static [&'static str],
}

impl ToolMeta {
    /// MCP `inputSchema` built from the argument list
    pub fn input_schema(&self) -> JsonValue {
        let properties: serde_json::Map<String, JsonValue> = self
            .args
            .iter()
            .map(|a| (a.name.to_string(), a.schema()))
            .collect();
        let required: Vec<&str> = self.args.iter().filter(|a| !a.optional).map(|a| a.name).collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Pure analytics tool
pub trait ToolPlugin: Send + Sync {
    fn meta(&self) -> ToolMeta;
    fn call(&self, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, TensioError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    static ARGS: [ArgMeta; 2] = [
        ArgMeta::list("values", "number", "Sample"),
        ArgMeta::optional("level", "number", "Confidence level", "0.95"),
    ];

    #[test]
    fn test_input_schema() {
        let meta = ToolMeta {
            name: "ci",
            description: "Confidence interval",
            usage: "ci(values, level?)",
            args: &ARGS,
            returns: "ConfidenceInterval",
            examples: &[],
            category: "stats/inferential",
            related: &[],
        };
        let schema = meta.input_schema();
        assert_eq!(schema["properties"]["values"]["type"], "array");
        assert_eq!(schema["properties"]["values"]["items"]["type"], "number");
        assert_eq!(schema["required"], json!(["values"]));
    }
}
