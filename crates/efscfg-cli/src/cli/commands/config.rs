//! `efscfg config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;

pub fn execute(_ctx: &Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(),
        ConfigCommands::Set { key, value } => set_config(&key, &value),
        ConfigCommands::Path => show_path(),
    }
}

fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Current Configuration:".bold());
    println!();
    println!(
        "  {} {}",
        "template:".bold(),
        config
            .template
            .unwrap_or_else(|| "(not set)".dimmed().to_string())
    );
    println!(
        "  {} {}",
        "store_dir:".bold(),
        config
            .store_dir
            .map_or_else(|| "(not set)".dimmed().to_string(), |d| d.display().to_string())
    );

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        "template" => {
            config.template = Some(value.to_string());
            println!("{} template set to {}.", "Success:".green().bold(), value.cyan());
        }
        "store_dir" => {
            config.store_dir = Some(PathBuf::from(value));
            println!("{} store_dir set to {}.", "Success:".green().bold(), value.cyan());
        }
        _ => {
            anyhow::bail!(
                "Unknown config key: {}\n\n\
                 Available keys:\n  \
                 template  - Default certificate template name\n  \
                 store_dir - Certificate store directory",
                key
            );
        }
    }

    config.save()?;

    Ok(())
}

fn show_path() -> Result<()> {
    let path = Config::path()?;
    println!("{}", path.display());
    Ok(())
}
