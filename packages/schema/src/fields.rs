//! # Field Editing
//!
//! Operations behind the task editor's input and output panels.
//!
//! Inputs are never added by hand: they follow the variables of the prompt.
//! Outputs are added and removed explicitly.

use indexmap::IndexMap;

use crate::{InternalFieldType, JsonSchema, SchemaError, SchemaResult};

/// Rebuild an input object schema so its properties match `variables`.
///
/// Properties follow the variable order. A variable that already had a
/// schema keeps it; new variables default to text. Other keywords of the
/// object schema are preserved.
pub fn sync_input_schema(schema: &JsonSchema, variables: &[String]) -> SchemaResult<JsonSchema> {
    if !schema.is_object() {
        return Err(SchemaError::NotAnObject(schema.kind));
    }

    let existing = schema.properties.as_ref();
    let properties: IndexMap<String, JsonSchema> = variables
        .iter()
        .map(|name| {
            let property = existing
                .and_then(|properties| properties.get(name))
                .cloned()
                .unwrap_or_else(JsonSchema::string);
            (name.clone(), property)
        })
        .collect();

    tracing::debug!(
        variables = variables.len(),
        kept = existing.map_or(0, |p| p.keys().filter(|k| variables.contains(k)).count()),
        "Synced input schema"
    );

    Ok(JsonSchema {
        properties: Some(properties),
        ..schema.clone()
    })
}

impl JsonSchema {
    /// Replace the schema of property `name` with the one for `field_type`.
    pub fn set_property_type(
        &mut self,
        name: &str,
        field_type: InternalFieldType,
    ) -> SchemaResult<()> {
        let property = self.property_mut(name)?;
        *property = field_type.to_schema();
        Ok(())
    }

    /// Add a text field named `name` (trimmed) and mark it required.
    pub fn add_field(&mut self, name: &str) -> SchemaResult<String> {
        if !self.is_object() {
            return Err(SchemaError::NotAnObject(self.kind));
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(SchemaError::EmptyFieldName);
        }

        let properties = self.properties.get_or_insert_with(IndexMap::new);
        if properties.contains_key(name) {
            return Err(SchemaError::DuplicateField(name.to_string()));
        }
        properties.insert(name.to_string(), JsonSchema::string());
        self.required
            .get_or_insert_with(Vec::new)
            .push(name.to_string());

        Ok(name.to_string())
    }

    /// Remove field `name` and its `required` entry.
    pub fn remove_field(&mut self, name: &str) -> SchemaResult<JsonSchema> {
        let removed = self
            .properties
            .as_mut()
            .and_then(|properties| properties.shift_remove(name))
            .ok_or_else(|| SchemaError::UnknownProperty(name.to_string()))?;

        if let Some(required) = &mut self.required {
            required.retain(|field| field != name);
        }

        Ok(removed)
    }

    fn property_mut(&mut self, name: &str) -> SchemaResult<&mut JsonSchema> {
        if !self.is_object() {
            return Err(SchemaError::NotAnObject(self.kind));
        }
        self.properties
            .as_mut()
            .and_then(|properties| properties.get_mut(name))
            .ok_or_else(|| SchemaError::UnknownProperty(name.to_string()))
    }
}
