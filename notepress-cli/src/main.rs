//! notepress CLI - publish knowledge-base notes to a static blog
//!
//! Subcommands:
//! - `convert` / `sync`: write notes into the blog's content directory
//! - `push`: create an article on the publishing API
//! - `pages` / `related`: page contexts computed from published posts
//! - `migrate-images`: rename legacy assets containing spaces

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config;
mod tracing_setup;
mod ui;

use commands::GlobalArgs;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "notepress",
    author,
    version,
    about = "Publish knowledge-base notes to a static blog and a publishing API",
    long_about = "Convert vault notes with [[links]] and ![[embeds]] into blog posts, copy \
                  their assets, and optionally push them to a publishing API."
)]
struct Cli {
    /// Config file (default: ~/.notepress/config.toml)
    #[arg(long, global = true, env = "NOTEPRESS_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Vault directory (overrides paths.vault)
    #[arg(long, global = true, env = "NOTEPRESS_VAULT", value_name = "DIR")]
    vault: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Suppress progress output
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert one note into a post directory
    Convert(commands::convert::ConvertArgs),
    /// Convert every note in the vault's notes directory
    Sync(commands::sync::SyncArgs),
    /// Publish one note to the remote publishing API
    Push(commands::push::PushArgs),
    /// Print page contexts (previous/next/related) as JSON
    Pages(commands::pages::PagesArgs),
    /// List posts related to a note by shared tags
    Related(commands::pages::RelatedArgs),
    /// Rename post assets containing spaces and fix their references
    MigrateImages(commands::migrate::MigrateImagesArgs),
    /// Manage notepress configuration (init, path, show, validate)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing, so NOTEPRESS_* in .env feed clap's env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        quiet: cli.quiet,
    })
    .ok();
    ui::init_quiet_mode(cli.quiet);

    let globals = GlobalArgs {
        config: cli.config,
        vault: cli.vault,
    };

    match cli.command {
        Commands::Convert(args) => commands::run_convert(args, &globals)?,
        Commands::Sync(args) => commands::run_sync(args, &globals)?,
        Commands::Push(args) => commands::run_push(args, &globals).await?,
        Commands::Pages(args) => commands::run_pages(args, &globals)?,
        Commands::Related(args) => commands::run_related(args, &globals)?,
        Commands::MigrateImages(args) => commands::run_migrate_images(args, &globals)?,
        Commands::Config(args) => config::run_config(args, &globals)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
