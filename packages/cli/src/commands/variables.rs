use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use prompt_editor::{Document, PromptContent};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Debug)]
pub struct VariablesArgs {
    /// Prompt file to scan
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn variables(args: VariablesArgs, cwd: &Path) -> Result<()> {
    let doc = read_prompt(&cwd.join(&args.file))?;
    print!("{}", render_variables(&doc, args.format)?);
    Ok(())
}

/// Read and parse a prompt file.
pub fn read_prompt(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read prompt file {}", path.display()))?;
    Ok(Document::parse(&text))
}

fn render_variables(doc: &Document, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(doc
            .variables()
            .into_iter()
            .map(|name| format!("{name}\n"))
            .collect()),
        OutputFormat::Json => {
            let content = PromptContent::from(doc);
            Ok(format!("{}\n", serde_json::to_string_pretty(&content)?))
        }
    }
}
