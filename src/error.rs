use thiserror::Error;

/// Errors that can occur while loading a graph snapshot.
#[derive(Error, Debug, Clone)]
pub enum GraphError {
    #[error("Failed to parse graph JSON: {0}")]
    JsonParseError(String),

    #[error("Could not read graph file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Graph conversion failed: {0}")]
    Conversion(#[from] GraphConversionError),
}

/// Errors that can occur when converting a custom editor format into a typeflow `Graph`.
#[derive(Error, Debug, Clone)]
pub enum GraphConversionError {
    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}

/// Errors produced while lexing or parsing an operation's type-expression text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeExprError {
    #[error("Invalid character at byte {position} in type expression '{source_text}'")]
    InvalidCharacter { source_text: String, position: usize },

    #[error("Unexpected {found} at byte {position} {context}")]
    UnexpectedToken {
        found: String,
        position: usize,
        context: String,
    },

    #[error("Unexpected end of type expression {context}")]
    UnexpectedEof { context: String },

    #[error("Unexpected trailing input at byte {position}")]
    TrailingInput { position: usize },

    #[error("Type expression nests deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// Errors that can occur while loading compiler configuration or registry files.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Could not read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse '{path}': {message}")]
    Parse { path: String, message: String },
}
