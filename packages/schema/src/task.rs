//! # Tasks
//!
//! A task is a named prompt template with input and output schemas and the
//! tools it may call. `TaskDraft` is the editable form state behind it; it
//! follows prompt edits through `PromptContent` notifications and produces
//! the `TaskDefinition` payload sent to the backend.

use std::collections::BTreeSet;

use prompt_editor::{Document, PromptContent};
use serde::{Deserialize, Serialize};

use crate::{sync_input_schema, InternalFieldType, JsonSchema, SchemaResult};

/// Task payload as stored and sent over the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    pub name: String,

    /// Prompt text with `${variable}` tokens
    pub template: String,

    pub input_schema: JsonSchema,

    /// `None` when the task answers in free text
    #[serde(default)]
    pub output_schema: Option<JsonSchema>,

    #[serde(default)]
    pub available_tool_ids: Vec<String>,
}

impl TaskDefinition {
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> SchemaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Output schema used when a task has none yet.
pub fn default_output_schema() -> JsonSchema {
    JsonSchema {
        additional_properties: Some(false),
        ..JsonSchema::object()
    }
}

/// Editable task state.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub name: String,
    template: String,
    variables: Vec<String>,
    input_schema: JsonSchema,
    output_schema: JsonSchema,
    structured_output: bool,
    tool_ids: BTreeSet<String>,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            template: String::new(),
            variables: Vec::new(),
            input_schema: JsonSchema::object(),
            output_schema: default_output_schema(),
            structured_output: false,
            tool_ids: BTreeSet::new(),
        }
    }
}

impl TaskDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Load a stored task for editing.
    ///
    /// Structured output starts enabled when the task has an output schema.
    pub fn from_definition(definition: &TaskDefinition) -> Self {
        let variables = Document::parse(&definition.template).variables();
        Self {
            name: definition.name.clone(),
            template: definition.template.clone(),
            variables,
            input_schema: definition.input_schema.clone(),
            structured_output: definition.output_schema.is_some(),
            output_schema: definition
                .output_schema
                .clone()
                .unwrap_or_else(default_output_schema),
            tool_ids: definition.available_tool_ids.iter().cloned().collect(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn input_schema(&self) -> &JsonSchema {
        &self.input_schema
    }

    pub fn output_schema(&self) -> &JsonSchema {
        &self.output_schema
    }

    pub fn structured_output(&self) -> bool {
        self.structured_output
    }

    pub fn set_structured_output(&mut self, enabled: bool) {
        self.structured_output = enabled;
    }

    /// Take in a prompt change and resync the input schema.
    pub fn apply_prompt(&mut self, content: &PromptContent) -> SchemaResult<()> {
        self.input_schema = sync_input_schema(&self.input_schema, &content.variables)?;
        self.template = content.text.clone();
        self.variables = content.variables.clone();
        Ok(())
    }

    pub fn set_input_type(
        &mut self,
        name: &str,
        field_type: InternalFieldType,
    ) -> SchemaResult<()> {
        self.input_schema.set_property_type(name, field_type)
    }

    pub fn add_output(&mut self, name: &str) -> SchemaResult<String> {
        self.output_schema.add_field(name)
    }

    pub fn remove_output(&mut self, name: &str) -> SchemaResult<()> {
        self.output_schema.remove_field(name).map(|_| ())
    }

    pub fn set_output_type(
        &mut self,
        name: &str,
        field_type: InternalFieldType,
    ) -> SchemaResult<()> {
        self.output_schema.set_property_type(name, field_type)
    }

    /// Select or deselect a tool. Returns whether it is now selected.
    pub fn toggle_tool(&mut self, tool_id: &str) -> bool {
        if self.tool_ids.remove(tool_id) {
            false
        } else {
            self.tool_ids.insert(tool_id.to_string());
            true
        }
    }

    pub fn tool_ids(&self) -> impl Iterator<Item = &str> {
        self.tool_ids.iter().map(String::as_str)
    }

    pub fn to_definition(&self) -> TaskDefinition {
        let has_outputs = self
            .output_schema
            .properties
            .as_ref()
            .is_some_and(|properties| !properties.is_empty());

        TaskDefinition {
            name: self.name.clone(),
            template: self.template.clone(),
            input_schema: self.input_schema.clone(),
            output_schema: (self.structured_output && has_outputs)
                .then(|| self.output_schema.clone()),
            available_tool_ids: self.tool_ids.iter().cloned().collect(),
        }
    }
}
