//! Widget error types

use std::io;
use std::path::PathBuf;

use nodeboard_layout::TemplateError;
use thiserror::Error;

/// Errors raised while building a blackboard panel
#[derive(Error, Debug)]
pub enum BlackboardError {
    /// The template or stylesheet collaborator failed
    #[error("Failed to load panel template: {0}")]
    Template(#[from] TemplateError),

    /// The template has no element with a required name
    #[error("Panel template has no element named '{0}'")]
    MissingElement(&'static str),

    /// Failed to read a configuration file
    #[error("Failed to read {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to parse a configuration document
    #[error("Failed to parse panel configuration {origin}: {source}")]
    ConfigParse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Result type for widget construction
pub type Result<T> = std::result::Result<T, BlackboardError>;
