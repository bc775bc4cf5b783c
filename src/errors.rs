//! Boundary errors.
//!
//! Malformed *content* never produces an error: the normalizer and layout
//! engine degrade instead. These types cover the cases where the host hands
//! us something that is not a document at all.

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// Document Errors
// ============================================================================

/// Errors raised when parsing host-supplied JSON text
#[derive(Error, Diagnostic, Debug)]
pub enum DesignError {
    #[error("invalid JSON: {source}")]
    #[diagnostic(code(remote_labels::design::invalid_json))]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a JSON object, found {found}")]
    #[diagnostic(
        code(remote_labels::design::not_an_object),
        help("remote catalogs and examples must be JSON objects or arrays of objects")
    )]
    NotAnObject { found: &'static str },
}

impl From<serde_json::Error> for DesignError {
    fn from(source: serde_json::Error) -> Self {
        DesignError::InvalidJson { source }
    }
}

/// Short name of a JSON value's type, for error messages
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

// ============================================================================
// Catalog Errors
// ============================================================================

/// Errors from loading a glyph catalog
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("glyph catalog failed to load: {message}")]
    #[diagnostic(code(remote_labels::icons::load_failed))]
    LoadFailed { message: String },
}
