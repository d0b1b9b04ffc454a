use super::variables::read_prompt;
use super::read_task;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use prompt_editor::{Document, PromptContent};
use prompt_schema::{InternalFieldType, TaskDefinition, TaskDraft};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Prompt file
    pub file: PathBuf,

    /// Existing task whose input types are kept
    #[arg(short, long)]
    pub task: Option<PathBuf>,

    /// Set a variable's type, e.g. `--type photo=image`
    #[arg(long = "type", value_name = "NAME=TYPE", value_parser = parse_type_override)]
    pub types: Vec<(String, InternalFieldType)>,

    /// Task name (defaults to the existing task's name or the file stem)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Write the full task definition to this file instead of printing the schema
    #[arg(short, long)]
    pub write: Option<PathBuf>,
}

pub fn schema(args: SchemaArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let doc = read_prompt(&cwd.join(&args.file))?;
    let task = args
        .task
        .as_ref()
        .map(|path| read_task(&cwd.join(path)))
        .transpose()?;

    let mut draft = build_draft(&doc, task.as_ref(), &args.types, config.default_field_type)?;
    if let Some(name) = args.name {
        draft.name = name;
    } else if draft.name.is_empty() {
        draft.name = args
            .file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
    }

    match args.write {
        Some(path) => {
            let json = draft.to_definition().to_json_pretty()?;
            fs::write(cwd.join(&path), json)
                .with_context(|| format!("Cannot write task file {}", path.display()))?;
            println!(
                "  {} Wrote {} ({} inputs)",
                "✓".green(),
                path.display(),
                draft.variables().len()
            );
        }
        None => println!("{}", serde_json::to_string_pretty(draft.input_schema())?),
    }

    Ok(())
}

/// Sync a task draft with `doc`.
///
/// Variables new to the task get `default_type`; explicit overrides win.
pub fn build_draft(
    doc: &Document,
    task: Option<&TaskDefinition>,
    overrides: &[(String, InternalFieldType)],
    default_type: InternalFieldType,
) -> Result<TaskDraft> {
    let mut draft = task.map(TaskDraft::from_definition).unwrap_or_default();
    let known: HashSet<String> = draft
        .input_schema()
        .properties
        .iter()
        .flatten()
        .map(|(name, _)| name.clone())
        .collect();

    let content = PromptContent::from(doc);
    draft.apply_prompt(&content)?;

    if default_type != InternalFieldType::String {
        for name in content.variables.iter().filter(|name| !known.contains(*name)) {
            draft.set_input_type(name, default_type)?;
        }
    }

    for (name, field_type) in overrides {
        draft
            .set_input_type(name, *field_type)
            .with_context(|| format!("Cannot set type of `{name}`: not a prompt variable"))?;
    }

    Ok(draft)
}

fn parse_type_override(raw: &str) -> Result<(String, InternalFieldType), String> {
    let (name, field_type) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=TYPE, got `{raw}`"))?;
    let field_type = field_type.trim().parse().map_err(|err| format!("{err}"))?;
    Ok((name.trim().to_string(), field_type))
}
