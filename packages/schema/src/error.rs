use thiserror::Error;

use crate::FieldType;

pub type SchemaResult<T> = Result<T, SchemaError>;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Schema is not an object schema (type is {0})")]
    NotAnObject(FieldType),

    #[error("Object schema has no properties")]
    MissingProperties,

    #[error("Array schema has no items")]
    MissingItems,

    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    #[error("Field already exists: {0}")]
    DuplicateField(String),

    #[error("Field name cannot be empty")]
    EmptyFieldName,

    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),

    #[error("Unknown sample language: {0}")]
    UnknownLanguage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
