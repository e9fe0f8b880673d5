//! Error types for access control datasets

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AclError {
    #[error("Invalid control modes for {dialect}: {reason}")]
    InvalidControlModes { dialect: String, reason: String },

    #[error("Invalid access rule: {0}")]
    InvalidRule(String),

    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    #[error("Parse error: {message}\n{content}")]
    Parse { message: String, content: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Error response={status} trying to apply ACL to {uri}")]
    Apply { status: u16, uri: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for AclError {
    fn from(err: reqwest::Error) -> Self {
        AclError::Http(err.to_string())
    }
}

impl From<oxigraph::model::IriParseError> for AclError {
    fn from(err: oxigraph::model::IriParseError) -> Self {
        AclError::InvalidIri(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AclError>;
