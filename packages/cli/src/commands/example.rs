use anyhow::{Context, Result};
use clap::Args;
use prompt_schema::{make_example, JsonSchema};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ExampleArgs {
    /// JSON schema file
    pub file: PathBuf,

    /// Print on one line
    #[arg(short, long)]
    pub compact: bool,
}

pub fn example(args: ExampleArgs, cwd: &Path) -> Result<()> {
    let path = cwd.join(&args.file);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Cannot read schema file {}", path.display()))?;
    println!("{}", render_example(&content, args.compact)?);
    Ok(())
}

fn render_example(schema_json: &str, compact: bool) -> Result<String> {
    let schema: JsonSchema = serde_json::from_str(schema_json).context("Invalid JSON schema")?;
    let example = make_example(&schema)?;
    Ok(if compact {
        serde_json::to_string(&example)?
    } else {
        serde_json::to_string_pretty(&example)?
    })
}
