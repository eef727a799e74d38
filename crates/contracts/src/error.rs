//! Layered error definitions
//!
//! Categorized by source: config / origin / transport / storage

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum BlacklistError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Origin Errors =====
    /// Location cannot be classified as a URL or a file path
    #[error("invalid origin: '{location}'")]
    InvalidOrigin { location: String },

    /// Location parsed as a URL but with a scheme other than http/https
    #[error("invalid URL scheme '{scheme}' in '{location}'")]
    InvalidScheme { scheme: String, location: String },

    // ===== Transport Errors =====
    /// Fetch/open failure while refreshing a source
    #[error("fetch error for source '{source_name}': {message}")]
    Fetch {
        source_name: String,
        message: String,
    },

    // ===== Storage Errors =====
    /// Host store failure
    #[error("store error: {message}")]
    Store { message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BlacklistError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create invalid origin error
    pub fn invalid_origin(location: impl Into<String>) -> Self {
        Self::InvalidOrigin {
            location: location.into(),
        }
    }

    /// Create fetch error
    pub fn fetch(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}

/// Per-line parse rejection.
///
/// Classified and counted per run, never fatal to a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Line contained nothing
    #[error("empty line")]
    EmptyLine,

    /// Line is a comment in the source's grammar
    #[error("comment line")]
    CommentLine,

    /// Line has fewer fields than the grammar requires
    #[error("missing field")]
    MissingField,
}
