//! # Prompt Schema
//!
//! Task schemas for the prompt editor: the JSON Schema subset used for task
//! inputs and outputs, example payloads, the task draft that keeps its input
//! schema in step with the prompt's variables, and client code samples.
//!
//! ```
//! use prompt_editor::EditSession;
//! use prompt_schema::{make_example, TaskDraft};
//!
//! let session = EditSession::new("task", "Translate ${text} to ${language}");
//! let mut draft = TaskDraft::new("translate");
//! draft.apply_prompt(&session.content()).unwrap();
//!
//! let example = make_example(draft.input_schema()).unwrap();
//! assert_eq!(example.to_string(), r#"{"text":"text","language":"text"}"#);
//! ```

mod error;
mod field_type;
mod fields;
mod samples;
mod schema;
mod task;

pub use error::{SchemaError, SchemaResult};
pub use field_type::{InternalFieldType, AUDIO_PATTERN, IMAGE_PATTERN};
pub use fields::sync_input_schema;
pub use samples::{
    curl_sample, pydantic_sample, python_sample, render_sample, run_url, rust_sample,
    typescript_sample, SampleLanguage,
};
pub use schema::{make_example, FieldType, JsonSchema};
pub use task::{default_output_schema, TaskDefinition, TaskDraft};
