//! Unified error types for o3de-setup.

use std::path::PathBuf;
use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Required tools are missing")]
    PrerequisitesMissing,

    #[error("Refusing to delete {0}")]
    UnsafeDelete(PathBuf),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Errors from invoking git, cmake or the engine script
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{0} not found on PATH")]
    NotFound(String),

    #[error("Failed to start {program}: {message}")]
    Spawn { program: String, message: String },

    #[error("`{command}` exited with {}", exit_label(.code))]
    ExitStatus { command: String, code: Option<i32> },

    #[error("Unrecognised version output: {0}")]
    VersionParse(String),

    #[error("{tool} {found} is older than the required {required}")]
    VersionTooOld {
        tool: String,
        found: String,
        required: String,
    },

    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    #[error("Remote URL mismatch: expected {expected}, found {found}")]
    RemoteMismatch { expected: String, found: String },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Console prompt errors
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Failed to read answer: {0}")]
    Read(std::io::Error),

    #[error("Failed to write prompt: {0}")]
    Write(std::io::Error),
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for external tool operations
pub type ToolResult<T> = std::result::Result<T, ToolError>;

/// Result type alias for prompt operations
pub type PromptResult<T> = std::result::Result<T, PromptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status_message() {
        let err = ToolError::ExitStatus {
            command: "cmake --build out".to_string(),
            code: Some(2),
        };
        assert_eq!(err.to_string(), "`cmake --build out` exited with exit code 2");

        let err = ToolError::ExitStatus {
            command: "git clone".to_string(),
            code: None,
        };
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn test_tool_error_converts_to_app_error() {
        let err: AppError = ToolError::NotFound("git".to_string()).into();
        assert_eq!(err.to_string(), "Tool error: git not found on PATH");
    }
}
