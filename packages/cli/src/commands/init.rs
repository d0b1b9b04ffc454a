use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use prompt_schema::SampleLanguage;
use std::fs;
use std::path::Path;

pub const EXAMPLE_PROMPT_NAME: &str = "example.prompt";

const EXAMPLE_PROMPT: &str = "Summarize the following ${document} for ${audience}.\n\
Answer in ${language}.\n";

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Origin of the task server
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Default code sample language
    #[arg(short, long)]
    pub lang: Option<SampleLanguage>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = Config::path(cwd);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing prompt project...".bright_blue().bold());

    let example_file = cwd.join(EXAMPLE_PROMPT_NAME);
    if !example_file.exists() {
        fs::write(&example_file, EXAMPLE_PROMPT)?;
        println!("  {} Created {}", "✓".green(), EXAMPLE_PROMPT_NAME);
    }

    let defaults = Config::default();
    let config = Config {
        endpoint: args.endpoint.unwrap_or(defaults.endpoint),
        default_language: args.lang.unwrap_or(defaults.default_language),
        ..defaults
    };

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}", EXAMPLE_PROMPT_NAME);
    println!("  2. Run: prompt schema {} --write task.json", EXAMPLE_PROMPT_NAME);
    println!("  3. Run: prompt sample task.json");

    Ok(())
}
