use std::fmt;

use thiserror::Error;

/// Provider operations that can fail; used as the message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderOperation {
    ListEvents,
    CreateEvent,
}

impl fmt::Display for ProviderOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderOperation::ListEvents => f.write_str("list events"),
            ProviderOperation::CreateEvent => f.write_str("create event"),
        }
    }
}

/// Gateway-wide error model for uniform HTTP/JSON mapping.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: &'static str, message: String },

    #[error("Failed to {operation}: {message}")]
    Provider {
        operation: ProviderOperation,
        message: String,
    },
}

impl GatewayError {
    pub fn provider(operation: ProviderOperation, message: impl Into<String>) -> Self {
        GatewayError::Provider {
            operation,
            message: message.into(),
        }
    }

    pub fn invalid_args(tool: &'static str, message: impl fmt::Display) -> Self {
        GatewayError::InvalidArguments {
            tool,
            message: message.to_string(),
        }
    }

    /// Short, stable label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Configuration(_) => "configuration",
            GatewayError::UnknownTool(_) => "unknown_tool",
            GatewayError::InvalidArguments { .. } => "invalid_arguments",
            GatewayError::Provider { .. } => "provider",
        }
    }
}
