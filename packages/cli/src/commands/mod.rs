pub mod example;
pub mod init;
pub mod sample;
pub mod schema;
pub mod variables;

pub use example::{example, ExampleArgs};
pub use init::{init, InitArgs};
pub use sample::{sample, SampleArgs};
pub use schema::{schema, SchemaArgs};
pub use variables::{variables, VariablesArgs};

use anyhow::{Context, Result};
use prompt_schema::TaskDefinition;
use std::path::Path;

/// Read a task definition file.
pub fn read_task(path: &Path) -> Result<TaskDefinition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read task file {}", path.display()))?;
    TaskDefinition::from_json(&content)
        .with_context(|| format!("Invalid task file {}", path.display()))
}
