use super::read_task;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use prompt_schema::{render_sample, run_url, SampleLanguage};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Task definition file
    pub task: PathBuf,

    /// Sample language (curl, python, pydantic, typescript, rust)
    #[arg(short, long)]
    pub lang: Option<SampleLanguage>,

    /// Task id used in the run URL
    #[arg(long, default_value = "TASK_ID")]
    pub task_id: String,

    /// Server origin (overrides config)
    #[arg(short, long)]
    pub endpoint: Option<String>,
}

pub fn sample(args: SampleArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    println!("{}", render_task_sample(&args, &config, cwd)?);
    Ok(())
}

/// Flags win over config for language and origin.
fn render_task_sample(args: &SampleArgs, config: &Config, cwd: &Path) -> Result<String> {
    let task = read_task(&cwd.join(&args.task))?;

    let language = args.lang.unwrap_or(config.default_language);
    let origin = args.endpoint.as_deref().unwrap_or(&config.endpoint);
    let endpoint = run_url(origin, &args.task_id);

    Ok(render_sample(language, &endpoint, &task)?)
}
