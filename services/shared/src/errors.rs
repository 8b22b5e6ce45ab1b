/// Shared error types for the coffee tin simulator
///
/// Design Philosophy:
/// - Standardized error codes so the engine and the driver report failures the same way
/// - Categorized by error domain (Validation, Precondition, Configuration, Internal)
/// - Includes context fields for debugging (error_code, message, context)
///
/// Usage:
/// - The simulator wraps its engine errors in ServiceError when reporting a run
/// - Error codes follow pattern: <CATEGORY>_<SPECIFIC>_<DETAIL>
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::BeanColor;

/// Error categories that map to logging severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// Validation errors
    /// Caller provided an invalid tin, symbol or setting
    Validation,

    /// Precondition violations
    /// An operation was invoked on a container that cannot satisfy it
    Precondition,

    /// Configuration errors
    /// Environment settings could not be parsed
    Configuration,

    /// Internal errors
    /// Run report could not be serialized
    Internal,
}

impl ErrorCategory {
    /// Map error category to log level
    pub fn log_level(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "warn",
            ErrorCategory::Precondition => "error",
            ErrorCategory::Configuration => "error",
            ErrorCategory::Internal => "error",
        }
    }
}

/// Standard error codes used across the workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCode(pub &'static str);

impl ErrorCode {
    // Validation errors
    pub const VALIDATION_INVALID_BEAN: ErrorCode = ErrorCode("VALIDATION_INVALID_BEAN");
    pub const VALIDATION_INVALID_TIN: ErrorCode = ErrorCode("VALIDATION_INVALID_TIN");

    // Precondition errors
    pub const PRECONDITION_SUPPLY_EXHAUSTED: ErrorCode =
        ErrorCode("PRECONDITION_SUPPLY_EXHAUSTED");
    pub const PRECONDITION_CONTAINER_EMPTY: ErrorCode = ErrorCode("PRECONDITION_CONTAINER_EMPTY");
    pub const PRECONDITION_CONTAINER_FULL: ErrorCode = ErrorCode("PRECONDITION_CONTAINER_FULL");

    // Configuration errors
    pub const CONFIGURATION_INVALID_VALUE: ErrorCode = ErrorCode("CONFIGURATION_INVALID_VALUE");

    // Internal errors
    pub const INTERNAL_SERIALIZATION: ErrorCode = ErrorCode("INTERNAL_SERIALIZATION");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Standardized error structure used across the workspace
///
/// This provides consistent error reporting with:
/// - Structured error codes for programmatic handling
/// - Human-readable messages
/// - Optional context for debugging
/// - Category-based classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceError {
    /// Error category (determines log level)
    pub category: ErrorCategory,

    /// Structured error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context (e.g., container names, colors, counts)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl ServiceError {
    /// Create a new ServiceError
    pub fn new(category: ErrorCategory, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            category,
            code: code.as_str().to_string(),
            message: message.into(),
            context: None,
        }
    }

    /// Add context to an error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    // Validation error constructors
    pub fn invalid_bean(symbol: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Validation,
            ErrorCode::VALIDATION_INVALID_BEAN,
            format!("Invalid bean: {}", symbol),
        )
    }

    pub fn invalid_tin(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCategory::Validation,
            ErrorCode::VALIDATION_INVALID_TIN,
            "Invalid tin",
        )
        .with_context(reason)
    }

    // Precondition error constructors
    pub fn supply_exhausted(color: BeanColor) -> Self {
        Self::new(
            ErrorCategory::Precondition,
            ErrorCode::PRECONDITION_SUPPLY_EXHAUSTED,
            format!("Bean supply holds no {:?} beans", color),
        )
    }

    pub fn container_empty(container: impl Into<String>) -> Self {
        Self::new(
            ErrorCategory::Precondition,
            ErrorCode::PRECONDITION_CONTAINER_EMPTY,
            "No bean left to take",
        )
        .with_context(container)
    }

    pub fn container_full(container: impl Into<String>) -> Self {
        Self::new(
            ErrorCategory::Precondition,
            ErrorCode::PRECONDITION_CONTAINER_FULL,
            "No empty slot to put a bean in",
        )
        .with_context(container)
    }

    // Configuration error constructors
    pub fn configuration(key: impl fmt::Display, error: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Configuration,
            ErrorCode::CONFIGURATION_INVALID_VALUE,
            format!("Invalid value for {}", key),
        )
        .with_context(error.to_string())
    }

    // Internal error constructors
    pub fn serialization_error(error: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Internal,
            ErrorCode::INTERNAL_SERIALIZATION,
            "Serialization error",
        )
        .with_context(error.to_string())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "[{}] {}: {}", self.code, self.message, context)
        } else {
            write!(f, "[{}] {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ServiceError {}

// Convenience type alias
pub type Result<T> = std::result::Result<T, ServiceError>;
