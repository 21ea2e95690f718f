use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use notepress_core::config::CONFIG_TEMPLATE;
use notepress_core::Config;
use std::path::PathBuf;

use crate::commands::GlobalArgs;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a commented config template
    Init(InitArgs),
    /// Show config file path
    Path,
    /// Print the effective config as TOML (secrets masked)
    Show,
    /// Validate vault paths and the API key
    Validate,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs, globals: &GlobalArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init(init) => run_init(init, globals),
        ConfigCommands::Path => run_path(globals),
        ConfigCommands::Show => run_show(globals),
        ConfigCommands::Validate => run_validate(globals),
    }
}

fn config_path(globals: &GlobalArgs) -> PathBuf {
    globals.config.clone().unwrap_or_else(Config::config_path)
}

fn run_init(args: InitArgs, globals: &GlobalArgs) -> Result<()> {
    let config_path = config_path(globals);

    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create {:?}", parent))?;
    }

    std::fs::write(&config_path, CONFIG_TEMPLATE)
        .context(format!("Failed to write config file: {:?}", config_path))?;

    println!("✅ Created config at: {:?}", config_path);
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {:?}", config_path);
    println!("  2. Point paths.vault at your vault");
    println!("  3. Run: notepress config validate");

    Ok(())
}

fn run_path(globals: &GlobalArgs) -> Result<()> {
    println!("{}", config_path(globals).display());
    Ok(())
}

fn run_show(globals: &GlobalArgs) -> Result<()> {
    let mut config = globals.load_config()?;
    if config.remote.api_key.as_deref().is_some_and(|key| !key.is_empty()) {
        config.remote.api_key = Some("********".to_string());
    }

    let toml_str = toml::to_string_pretty(&config).context("Failed to serialize config to TOML")?;
    println!("{}", toml_str);

    Ok(())
}

fn run_validate(globals: &GlobalArgs) -> Result<()> {
    println!("🔍 Validating configuration...");

    let config = globals.load_config()?;
    println!("   ✓ Config loaded");
    println!("   Vault: {}", config.paths.vault.display());

    config.validate_paths()?;
    println!("   ✓ Vault, notes and assets directories exist");

    match config.api_key() {
        Ok(_) => println!("   ✓ remote.api_key is set"),
        Err(_) => println!("   ⚠  remote.api_key not set (only needed for `push`)"),
    }

    println!("\n✅ Configuration valid!");

    Ok(())
}
