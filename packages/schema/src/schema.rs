//! # JSON Schema Subset
//!
//! The slice of JSON Schema used to describe task inputs and outputs:
//! primitive types, objects with ordered properties, arrays, plus the
//! `description`, `examples` and `pattern` keywords.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{InternalFieldType, SchemaError, SchemaResult};

/// JSON Schema `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Object => "object",
            FieldType::Array => "array",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A schema node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSchema {
    #[serde(rename = "type")]
    pub kind: FieldType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Object properties, in declaration order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, JsonSchema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,

    /// Array item schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<JsonSchema>>,
}

impl JsonSchema {
    /// A bare schema of the given type.
    pub fn of(kind: FieldType) -> Self {
        Self {
            kind,
            description: None,
            examples: Vec::new(),
            pattern: None,
            properties: None,
            required: None,
            additional_properties: None,
            items: None,
        }
    }

    pub fn string() -> Self {
        Self::of(FieldType::String)
    }

    /// An empty object schema with no required fields.
    pub fn object() -> Self {
        Self {
            properties: Some(IndexMap::new()),
            required: Some(Vec::new()),
            ..Self::of(FieldType::Object)
        }
    }

    pub fn array(items: JsonSchema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(FieldType::Array)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_examples(mut self, examples: Vec<Value>) -> Self {
        self.examples = examples;
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, schema: JsonSchema) -> Self {
        self.properties
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), schema);
        self
    }

    pub fn is_object(&self) -> bool {
        self.kind == FieldType::Object
    }

    pub fn is_array(&self) -> bool {
        self.kind == FieldType::Array
    }

    /// Ordered properties of an object schema.
    pub fn object_properties(&self) -> SchemaResult<Vec<(&str, &JsonSchema)>> {
        if !self.is_object() {
            return Err(SchemaError::NotAnObject(self.kind));
        }
        Ok(self
            .properties
            .iter()
            .flatten()
            .map(|(name, schema)| (name.as_str(), schema))
            .collect())
    }

    /// The user-facing field type this schema represents.
    pub fn field_type(&self) -> InternalFieldType {
        InternalFieldType::of(self)
    }
}

/// Build an example value that satisfies `schema`.
pub fn make_example(schema: &JsonSchema) -> SchemaResult<Value> {
    match schema.kind {
        FieldType::Object => {
            let properties = schema
                .properties
                .as_ref()
                .ok_or(SchemaError::MissingProperties)?;
            let mut object = serde_json::Map::with_capacity(properties.len());
            for (name, property) in properties {
                object.insert(name.clone(), make_example(property)?);
            }
            Ok(Value::Object(object))
        }
        FieldType::Array => {
            let items = schema.items.as_deref().ok_or(SchemaError::MissingItems)?;
            Ok(Value::Array(vec![make_example(items)?]))
        }
        _ => {
            if let Some(example) = schema.examples.first() {
                return Ok(example.clone());
            }
            Ok(match InternalFieldType::of(schema) {
                InternalFieldType::Image => json!("data:image/png;base64,<data>"),
                InternalFieldType::Audio => json!("data:audio/mpeg;base64,<data>"),
                InternalFieldType::Number | InternalFieldType::Integer => json!(123),
                InternalFieldType::Boolean => json!(true),
                _ => json!("text"),
            })
        }
    }
}
