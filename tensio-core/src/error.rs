//! Structured errors for tool callers
//!
//! The analytics functions themselves never fail: insufficient data yields
//! neutral values. Errors only exist at the boundary where untyped input
//! (JSON arguments, config files) is decoded into records.

use crate::RecordError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const UNKNOWN_TOOL: &str = "UNKNOWN_TOOL";
    pub const MISSING_ARG: &str = "MISSING_ARG";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const INVALID_RECORD: &str = "INVALID_RECORD";
    pub const INVALID_TIMESTAMP: &str = "INVALID_TIMESTAMP";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Call completed with a degraded result
    Warning,
    /// Call failed
    Error,
    /// Server cannot continue
    Fatal,
}

/// Context about where an error occurred
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Tool that was being called
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,

    /// Argument or record field at fault
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Position of the offending record in its collection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
}

/// Structured error returned across the tool boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TensioError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,

    pub severity: Severity,
}

impl TensioError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            context: None,
            severity: Severity::Error,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn in_tool(mut self, tool: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.tool = Some(tool.into());
        self
    }

    pub fn at_field(mut self, field: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.field = Some(field.into());
        self
    }

    pub fn at_index(mut self, index: usize) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.index = Some(index);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.notes.push(note.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    // ========== Common Error Constructors ==========

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
            .with_suggestion("Send a JSON object matching the tool's input schema")
    }

    pub fn unknown_tool(name: &str) -> Self {
        Self::new(codes::UNKNOWN_TOOL, format!("Unknown tool: {}", name))
            .with_suggestion("Use list_tools to see available tools")
    }

    pub fn missing_arg(tool: &str, arg: &str) -> Self {
        Self::new(codes::MISSING_ARG, format!("{}() missing required argument '{}'", tool, arg))
            .with_suggestion(format!("Use help('{}') for usage", tool))
            .in_tool(tool)
            .at_field(arg)
    }

    pub fn arg_type(tool: &str, arg: &str, expected: &str) -> Self {
        Self::new(codes::ARG_TYPE, format!("{}() argument '{}': expected {}", tool, arg, expected))
            .in_tool(tool)
            .at_field(arg)
    }

    pub fn domain_error(details: impl Into<String>) -> Self {
        Self::new(codes::DOMAIN_ERROR, format!("Domain error: {}", details.into()))
    }

    pub fn invalid_record(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_RECORD, format!("Invalid record: {}", details.into()))
            .with_suggestion("Filter non-finite values and negative durations before calling")
    }

    pub fn invalid_timestamp(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_TIMESTAMP, format!("Invalid timestamp: {}", details.into()))
            .with_suggestion("Use RFC 3339 (e.g. 2025-03-01T08:30:00Z)")
    }

    pub fn config_error(details: impl Into<String>) -> Self {
        Self::new(codes::CONFIG_ERROR, format!("Config error: {}", details.into()))
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for TensioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for TensioError {}

impl From<RecordError> for TensioError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::InvalidTimestamp(s) => Self::invalid_timestamp(s),
            RecordError::NonFinite { field, .. } => {
                Self::invalid_record(err.to_string()).at_field(field)
            }
            RecordError::NegativeDuration(_) => {
                Self::invalid_record(err.to_string()).at_field("duration_minutes")
            }
        }
    }
}

impl From<serde_json::Error> for TensioError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse_error(err.to_string())
    }
}
