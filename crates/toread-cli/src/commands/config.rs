//! Configuration file commands

use crate::app::{ConfigAction, ConfigArgs, OutputFormat};
use anyhow::{bail, Result};
use std::path::Path;
use toread_core::{Config, ContentKind};

const MASKED: &str = "********";

pub fn run(args: ConfigArgs, config: &Config, path: &Path, format: OutputFormat) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let shown = masked(config);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&shown)?),
                OutputFormat::Cli => print!("{}", shown.to_yaml()?),
            }
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "Config file already exists at {} (use --force to overwrite)",
                    path.display()
                );
            }
            Config::default().save_to(path)?;
            println!("Wrote default config to {}", path.display());
        }
        ConfigAction::Path => println!("{}", path.display()),
    }
    Ok(())
}

fn masked(config: &Config) -> Config {
    let mut shown = config.clone();
    for kind in ContentKind::ALL {
        let processor = shown.llm.processor_mut(kind);
        if !processor.api_key.is_empty() {
            processor.api_key = MASKED.to_string();
        }
    }
    shown
}
