//! # Code Samples
//!
//! Snippets showing how to call a task's run endpoint from a few languages.
//! Each one posts an example input built from the input schema and shows an
//! example output as trailing line comments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::{
    default_output_schema, make_example, FieldType, JsonSchema, SchemaError, SchemaResult,
    TaskDefinition,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleLanguage {
    Curl,
    Python,
    Pydantic,
    #[serde(rename = "typescript")]
    TypeScript,
    Rust,
}

impl SampleLanguage {
    pub const ALL: [SampleLanguage; 5] = [
        SampleLanguage::Curl,
        SampleLanguage::Python,
        SampleLanguage::Pydantic,
        SampleLanguage::TypeScript,
        SampleLanguage::Rust,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SampleLanguage::Curl => "curl",
            SampleLanguage::Python => "python",
            SampleLanguage::Pydantic => "pydantic",
            SampleLanguage::TypeScript => "typescript",
            SampleLanguage::Rust => "rust",
        }
    }
}

impl fmt::Display for SampleLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SampleLanguage {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "curl" => Ok(SampleLanguage::Curl),
            "python" | "py" => Ok(SampleLanguage::Python),
            "pydantic" => Ok(SampleLanguage::Pydantic),
            "typescript" | "ts" => Ok(SampleLanguage::TypeScript),
            "rust" | "rs" => Ok(SampleLanguage::Rust),
            _ => Err(SchemaError::UnknownLanguage(s.to_string())),
        }
    }
}

/// URL that runs task `task_id` on the server at `origin`.
pub fn run_url(origin: &str, task_id: &str) -> String {
    format!("{}/api/task/{}/run", origin.trim_end_matches('/'), task_id)
}

/// Render a sample for `task` against `endpoint`.
///
/// A task without an output schema is shown with an empty output object.
pub fn render_sample(
    language: SampleLanguage,
    endpoint: &str,
    task: &TaskDefinition,
) -> SchemaResult<String> {
    let output_schema = task
        .output_schema
        .clone()
        .unwrap_or_else(default_output_schema);
    let input = make_example(&task.input_schema)?;
    let output = make_example(&output_schema)?;

    tracing::debug!(%language, endpoint, task = %task.name, "Rendering code sample");

    match language {
        SampleLanguage::Curl => curl_sample(endpoint, &input, &output),
        SampleLanguage::Python => python_sample(endpoint, &input, &output),
        SampleLanguage::Pydantic => {
            pydantic_sample(endpoint, &task.input_schema, &output_schema, &input, &output)
        }
        SampleLanguage::TypeScript => {
            typescript_sample(endpoint, &task.input_schema, &output_schema, &input, &output)
        }
        SampleLanguage::Rust => rust_sample(endpoint, &input, &output),
    }
}

pub fn curl_sample(endpoint: &str, input: &Value, output: &Value) -> SchemaResult<String> {
    let body = serde_json::to_string(input)?.replace('\'', "\\'");
    Ok(format!(
        r#"curl -X POST \
  "{endpoint}" \
  -H "Content-Type: application/json" \
  -d '{body}'
# Example output:
{}"#,
        comment_block("#", output)?
    ))
}

pub fn python_sample(endpoint: &str, input: &Value, output: &Value) -> SchemaResult<String> {
    let json = prefix_lines("    ", &to_json_indented(input, b"    ")?);
    Ok(format!(
        r#"import json

import requests

result = requests.post(
    "{endpoint}",
    json={},
)
print(json.dumps(result.json(), indent=2))
# Example output:
{}"#,
        json.trim(),
        comment_block("#", output)?
    ))
}

pub fn pydantic_sample(
    endpoint: &str,
    input_schema: &JsonSchema,
    output_schema: &JsonSchema,
    input: &Value,
    output: &Value,
) -> SchemaResult<String> {
    Ok(format!(
        r#"import pydantic
import requests

class Input(pydantic.BaseModel):
  """Input to the API."""
{}

class Output(pydantic.BaseModel):
  """Output of the API."""
{}

result = requests.post(
  "{endpoint}",
  json=Input({}
  ).model_dump(),
)
output = Output.model_validate(result.json())
print(output)
# Example output:{}"#,
        pydantic_fields(input_schema)?,
        pydantic_fields(output_schema)?,
        pydantic_arguments(input, "  ")?,
        pydantic_arguments(output, "# ")?
    ))
}

pub fn typescript_sample(
    endpoint: &str,
    input_schema: &JsonSchema,
    output_schema: &JsonSchema,
    input: &Value,
    output: &Value,
) -> SchemaResult<String> {
    Ok(format!(
        r#"/** Input to the API. */
interface Input {{
{}
}}

/** Output of the API. */
interface Output {{
{}
}}

const input: Input = {};
const response = await fetch(
  "{endpoint}",
  {{
    method: "POST",
    headers: {{
      "Content-Type": "application/json",
    }},
    body: JSON.stringify(input)
  }},
);

const data = await response.json() as Output;
console.log(JSON.stringify(data, null, 2));
// Example output:
{}"#,
        typescript_fields(input_schema)?,
        typescript_fields(output_schema)?,
        to_json_indented(input, b"  ")?,
        comment_block("//", output)?
    ))
}

pub fn rust_sample(endpoint: &str, input: &Value, output: &Value) -> SchemaResult<String> {
    Ok(format!(
        r#"let body = serde_json::json!({});

let client = reqwest::Client::new();
let response = client
    .post("{endpoint}")
    .json(&body)
    .send()
    .await?;

let data: Value = response.json().await?;
println!("{{}}", serde_json::to_string_pretty(&data)?);
// Example output:
{}"#,
        to_json_indented(input, b"    ")?,
        comment_block("//", output)?
    ))
}

fn to_json_indented(value: &Value, indent: &[u8]) -> SchemaResult<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn prefix_lines(prefix: &str, text: &str) -> String {
    text.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Two-space JSON with every line commented out.
fn comment_block(comment: &str, value: &Value) -> SchemaResult<String> {
    Ok(prefix_lines(&format!("{comment} "), &to_json_indented(value, b"  ")?))
}

fn pydantic_type(schema: &JsonSchema) -> &'static str {
    match schema.kind {
        FieldType::String => "str",
        FieldType::Integer => "int",
        FieldType::Number => "float",
        FieldType::Boolean => "bool",
        FieldType::Array => "list",
        FieldType::Object => "dict",
    }
}

fn pydantic_fields(schema: &JsonSchema) -> SchemaResult<String> {
    let properties = schema.object_properties()?;
    if properties.is_empty() {
        return Ok("  pass".to_string());
    }

    let fields: Vec<String> = properties
        .into_iter()
        .map(|(name, property)| {
            let field = format!("  {name}: {}", pydantic_type(property));
            match &property.description {
                Some(description) => format!("  #: {description}\n{field}"),
                None => field,
            }
        })
        .collect();
    Ok(fields.join("\n"))
}

fn pydantic_arguments(example: &Value, prefix: &str) -> SchemaResult<String> {
    let mut out = String::new();
    if let Value::Object(fields) = example {
        for (name, value) in fields {
            out.push_str(&format!(
                "\n{prefix}  {name}={},",
                to_json_indented(value, b"    ")?
            ));
        }
    }
    Ok(out)
}

fn typescript_type(schema: &JsonSchema) -> &'static str {
    match schema.kind {
        FieldType::String => "string",
        FieldType::Number | FieldType::Integer => "number",
        FieldType::Boolean => "boolean",
        FieldType::Array => "unknown[]",
        FieldType::Object => "Record<string, unknown>",
    }
}

fn typescript_fields(schema: &JsonSchema) -> SchemaResult<String> {
    let fields: Vec<String> = schema
        .object_properties()?
        .into_iter()
        .map(|(name, property)| {
            let field = format!("  {name}: {};", typescript_type(property));
            match &property.description {
                Some(description) => format!("  /** {description} */\n{field}"),
                None => field,
            }
        })
        .collect();
    Ok(fields.join("\n"))
}
