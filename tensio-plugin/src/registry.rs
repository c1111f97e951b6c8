//! Tool Registry

use crate::{ToolContext, ToolMeta, ToolPlugin};
use serde_json::{json, Value as JsonValue};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tensio_core::TensioError;
use tracing::debug;

/// Central tool registry
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ToolPlugin>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: HashMap::new() }
    }

    pub fn with_tool<T: ToolPlugin + 'static>(mut self, tool: T) -> Self {
        let name = tool.meta().name.to_lowercase();
        self.tools.insert(name, Arc::new(tool));
        self
    }

    pub fn get_tool(&self, name: &str) -> Option<&dyn ToolPlugin> {
        self.tools.get(&name.to_lowercase()).map(|t| t.as_ref())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn call_tool(&self, name: &str, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, TensioError> {
        match self.get_tool(name) {
            Some(tool) => {
                debug!(tool = name, "calling tool");
                tool.call(args, ctx).map_err(|e| {
                    let tagged = e.context.as_ref().map_or(false, |c| c.tool.is_some());
                    if tagged {
                        e
                    } else {
                        e.in_tool(name)
                    }
                })
            }
            None => {
                let similar = self.find_similar_tools(name);
                let mut err = TensioError::unknown_tool(name);
                if !similar.is_empty() {
                    let suggestions: Vec<&str> = similar.iter().take(5).map(|s| s.as_str()).collect();
                    err = err.with_suggestion(format!(
                        "Similar: {}. Use list_tools for the full list.",
                        suggestions.join(", ")
                    ));
                }
                Err(err)
            }
        }
    }

    /// Tool names similar to `name`, best first
    fn find_similar_tools(&self, name: &str) -> Vec<String> {
        let name_lower = name.to_lowercase();
        let mut matches: Vec<(String, usize)> = self
            .tools
            .keys()
            .filter_map(|tool_name| {
                let score = Self::similarity_score(&name_lower, tool_name);
                (score > 0).then(|| (tool_name.clone(), score))
            })
            .collect();

        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        matches.into_iter().map(|(name, _)| name).collect()
    }

    fn similarity_score(query: &str, candidate: &str) -> usize {
        let mut score = 0;

        if candidate.starts_with(query) {
            score += 100;
        } else if candidate.contains(query) {
            score += 50;
        } else if query.contains(candidate) {
            score += 30;
        }

        let query_chars: HashSet<char> = query.chars().collect();
        let candidate_chars: HashSet<char> = candidate.chars().collect();
        let common = query_chars.intersection(&candidate_chars).count();
        score += common * 2;

        let len_diff = query.len().abs_diff(candidate.len());
        if len_diff < 5 && score > 0 {
            score += 5 - len_diff;
        }

        score
    }

    /// MCP `tools/list` entries, sorted by name
    pub fn tool_schemas(&self) -> Vec<JsonValue> {
        let mut metas: Vec<ToolMeta> = self.tools.values().map(|t| t.meta()).collect();
        metas.sort_by_key(|m| m.name);
        metas
            .iter()
            .map(|m| {
                json!({
                    "name": m.name,
                    "description": m.description,
                    "inputSchema": m.input_schema(),
                })
            })
            .collect()
    }

    pub fn help(&self, name: Option<&str>) -> Result<JsonValue, TensioError> {
        match name {
            Some(n) => self.help_for(n),
            None => Ok(self.general_help()),
        }
    }

    fn help_for(&self, name: &str) -> Result<JsonValue, TensioError> {
        match self.get_tool(name) {
            Some(tool) => {
                let meta = tool.meta();
                Ok(json!({
                    "name": meta.name,
                    "description": meta.description,
                    "usage": meta.usage,
                    "returns": meta.returns,
                    "category": meta.category,
                    "args": meta.args,
                    "examples": meta.examples,
                    "related": meta.related,
                }))
            }
            None => Err(TensioError::new("NOT_FOUND", format!("No tool named '{}'", name))),
        }
    }

    fn general_help(&self) -> JsonValue {
        let mut by_category: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
        for tool in self.tools.values() {
            let meta = tool.meta();
            by_category.entry(meta.category).or_default().push(meta.name);
        }
        for names in by_category.values_mut() {
            names.sort_unstable();
        }
        json!({
            "tools": by_category,
            "usage": "Call help with a tool name for detailed help.",
        })
    }

    pub fn list_tools(&self, category: Option<&str>) -> JsonValue {
        let mut metas: Vec<ToolMeta> = self
            .tools
            .values()
            .map(|t| t.meta())
            .filter(|m| category.map_or(true, |c| m.category == c || m.category.starts_with(&format!("{}/", c))))
            .collect();
        metas.sort_by_key(|m| m.name);
        JsonValue::Array(
            metas
                .iter()
                .map(|m| {
                    json!({
                        "name": m.name,
                        "description": m.description,
                        "usage": m.usage,
                        "category": m.category,
                    })
                })
                .collect(),
        )
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArgMeta;
    use chrono::Utc;
    use tensio_core::codes;

    struct Echo;

    static ECHO_ARGS: [ArgMeta; 1] = [ArgMeta::required("value", "number", "Value to echo")];

    impl ToolPlugin for Echo {
        fn meta(&self) -> ToolMeta {
            ToolMeta {
                name: "echo",
                description: "Echo a number",
                usage: "echo(value)",
                args: &ECHO_ARGS,
                returns: "number",
                examples: &[],
                category: "test/util",
                related: &[],
            }
        }

        fn call(&self, args: &JsonValue, _ctx: &ToolContext) -> Result<JsonValue, TensioError> {
            let v = crate::args::number_or(args, "echo", "value", 0.0)?;
            Ok(json!(v))
        }
    }

    fn ctx() -> ToolContext {
        ToolContext::new(Utc::now())
    }

    #[test]
    fn test_call_registered_tool() {
        let registry = ToolRegistry::new().with_tool(Echo);
        let out = registry.call_tool("ECHO", &json!({ "value": 4 }), &ctx()).unwrap();
        assert_eq!(out, json!(4.0));
    }

    #[test]
    fn test_unknown_tool_suggests() {
        let registry = ToolRegistry::new().with_tool(Echo);
        let err = registry.call_tool("ech", &json!({}), &ctx()).unwrap_err();
        assert_eq!(err.code, codes::UNKNOWN_TOOL);
        assert!(err.suggestion.unwrap().contains("echo"));
    }

    #[test]
    fn test_errors_are_tagged_with_tool() {
        let registry = ToolRegistry::new().with_tool(Echo);
        let err = registry.call_tool("echo", &json!({ "value": "x" }), &ctx()).unwrap_err();
        assert_eq!(err.context.and_then(|c| c.tool).as_deref(), Some("echo"));
    }

    #[test]
    fn test_list_and_help() {
        let registry = ToolRegistry::new().with_tool(Echo);
        assert_eq!(registry.list_tools(Some("test")).as_array().unwrap().len(), 1);
        assert_eq!(registry.list_tools(Some("stats")).as_array().unwrap().len(), 0);
        assert_eq!(registry.help(Some("echo")).unwrap()["usage"], "echo(value)");
        assert!(registry.help(Some("nope")).is_err());
        assert_eq!(registry.tool_schemas().len(), 1);
    }
}
