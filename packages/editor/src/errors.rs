//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Invalid variable token `{0}`: must start with `${{` and end with `}}`")]
    InvalidTokenFormat(String),

    #[error("Invalid variable name `{0}`")]
    InvalidVariableName(String),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),
}
