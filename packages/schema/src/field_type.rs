//! # Field Types
//!
//! The types a user picks for a task input or output. Image and audio are
//! not JSON types of their own: they are strings carrying base64 data URLs,
//! recognized by their `pattern`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{FieldType, JsonSchema, SchemaError};

/// Pattern constraining image data URLs.
pub const IMAGE_PATTERN: &str = "^data:image/([^;]+);base64,[A-Za-z0-9+/=]+$";

/// Pattern constraining audio data URLs.
pub const AUDIO_PATTERN: &str = "^data:audio/([^;]+);base64,[A-Za-z0-9+/=]+$";

/// User-facing field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InternalFieldType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Image,
    Audio,
}

impl InternalFieldType {
    /// Types offered when typing a prompt variable.
    pub const VARIABLE_TYPES: [InternalFieldType; 5] = [
        InternalFieldType::String,
        InternalFieldType::Number,
        InternalFieldType::Boolean,
        InternalFieldType::Image,
        InternalFieldType::Audio,
    ];

    /// Classify a schema.
    pub fn of(schema: &JsonSchema) -> Self {
        if schema.kind == FieldType::String {
            match schema.pattern.as_deref() {
                Some(IMAGE_PATTERN) => return InternalFieldType::Image,
                Some(AUDIO_PATTERN) => return InternalFieldType::Audio,
                _ => {}
            }
        }

        match schema.kind {
            FieldType::String => InternalFieldType::String,
            FieldType::Number => InternalFieldType::Number,
            FieldType::Integer => InternalFieldType::Integer,
            FieldType::Boolean => InternalFieldType::Boolean,
            FieldType::Object => InternalFieldType::Object,
            FieldType::Array => InternalFieldType::Array,
        }
    }

    /// The schema stored for a field of this type.
    pub fn to_schema(self) -> JsonSchema {
        match self {
            InternalFieldType::Image => JsonSchema::string()
                .with_description(
                    "Base64 encoded image string - e.g. `data:image/png;base64,<data>`",
                )
                .with_pattern(IMAGE_PATTERN),
            InternalFieldType::Audio => JsonSchema::string()
                .with_description(
                    "Base64 encoded audio string - e.g. `data:audio/mpeg;base64,<data>`",
                )
                .with_pattern(AUDIO_PATTERN),
            InternalFieldType::String => JsonSchema::string(),
            InternalFieldType::Number => JsonSchema::of(FieldType::Number),
            InternalFieldType::Integer => JsonSchema::of(FieldType::Integer),
            InternalFieldType::Boolean => JsonSchema::of(FieldType::Boolean),
            InternalFieldType::Object => JsonSchema::object(),
            InternalFieldType::Array => JsonSchema::array(JsonSchema::string()),
        }
    }

    /// Label shown in type pickers.
    pub fn friendly_name(&self) -> &'static str {
        match self {
            InternalFieldType::String => "Text",
            InternalFieldType::Number => "Number",
            InternalFieldType::Boolean => "True/False",
            InternalFieldType::Image => "Image",
            InternalFieldType::Audio => "Audio",
            InternalFieldType::Integer => "integer",
            InternalFieldType::Object => "object",
            InternalFieldType::Array => "array",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InternalFieldType::String => "string",
            InternalFieldType::Number => "number",
            InternalFieldType::Integer => "integer",
            InternalFieldType::Boolean => "boolean",
            InternalFieldType::Object => "object",
            InternalFieldType::Array => "array",
            InternalFieldType::Image => "image",
            InternalFieldType::Audio => "audio",
        }
    }
}

impl fmt::Display for InternalFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InternalFieldType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" | "text" => Ok(InternalFieldType::String),
            "number" => Ok(InternalFieldType::Number),
            "integer" => Ok(InternalFieldType::Integer),
            "boolean" | "bool" => Ok(InternalFieldType::Boolean),
            "object" => Ok(InternalFieldType::Object),
            "array" => Ok(InternalFieldType::Array),
            "image" => Ok(InternalFieldType::Image),
            "audio" => Ok(InternalFieldType::Audio),
            other => Err(SchemaError::UnknownFieldType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_pattern() {
        assert_eq!(
            InternalFieldType::of(&InternalFieldType::Image.to_schema()),
            InternalFieldType::Image
        );
        assert_eq!(
            InternalFieldType::of(&InternalFieldType::Audio.to_schema()),
            InternalFieldType::Audio
        );
        let other_pattern = JsonSchema::string().with_pattern("^[a-z]+$");
        assert_eq!(InternalFieldType::of(&other_pattern), InternalFieldType::String);
    }

    #[test]
    fn test_every_variable_type_survives_schema_conversion() {
        for field_type in InternalFieldType::VARIABLE_TYPES {
            assert_eq!(InternalFieldType::of(&field_type.to_schema()), field_type);
        }
    }

    #[test]
    fn test_friendly_names() {
        let names: Vec<_> = InternalFieldType::VARIABLE_TYPES
            .iter()
            .map(InternalFieldType::friendly_name)
            .collect();
        assert_eq!(names, vec!["Text", "Number", "True/False", "Image", "Audio"]);
        assert_eq!(InternalFieldType::Integer.friendly_name(), "integer");
    }

    #[test]
    fn test_parse_field_type() {
        assert_eq!("image".parse::<InternalFieldType>().unwrap(), InternalFieldType::Image);
        assert_eq!("bool".parse::<InternalFieldType>().unwrap(), InternalFieldType::Boolean);
        assert!(matches!(
            "date".parse::<InternalFieldType>(),
            Err(SchemaError::UnknownFieldType(name)) if name == "date"
        ));
    }
}
