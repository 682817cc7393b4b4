/// Error types for OOXML writing operations.
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML operations.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// XML encoding error (invalid character, formatter failure)
    #[error("XML error: {0}")]
    Xml(String),

    /// Invalid part name
    #[error("Invalid part name: {0}")]
    InvalidPartName(String),

    /// Invalid format or argument
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A header/footer slot is already bound and the policy forbids replacing it
    #[error("{role} slot '{kind}' is already occupied")]
    SlotOccupied {
        role: &'static str,
        kind: &'static str,
    },

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::fmt::Error> for OoxmlError {
    fn from(err: std::fmt::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}
