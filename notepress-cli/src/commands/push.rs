//! Publish a note to the remote publishing API

use anyhow::{Context, Result};
use clap::Parser;
use notepress_core::{Article, RemoteClient};
use tracing::info;

use super::{load_note, GlobalArgs};
use crate::ui;

#[derive(Parser, Debug)]
pub struct PushArgs {
    /// Note path, or note title inside the notes directory
    #[arg(value_name = "NOTE")]
    note: String,

    /// Print the request payload instead of sending it
    #[arg(long)]
    dry_run: bool,
}

pub async fn run_push(args: PushArgs, globals: &GlobalArgs) -> Result<()> {
    let config = globals.load_config()?;
    let note = load_note(&args.note, &config)?;
    let article = Article::from_note(&note, &config);

    if args.dry_run {
        println!("{}", article.to_request_json()?);
        return Ok(());
    }

    let client = RemoteClient::from_config(&config)?;
    info!("pushing '{}' to {}", article.title, config.remote.endpoint);

    let pb = ui::spinner(format!("Publishing '{}'", article.title));
    let published = match client.create_article(&article).await {
        Ok(published) => published,
        Err(err) => {
            ui::finish_clear(pb);
            return Err(err).context("failed to publish article");
        }
    };
    ui::finish_success(pb, "Published");

    match published.url {
        Some(url) => println!("✓ '{}' published at {}", article.title, url),
        None => println!("✓ '{}' published", article.title),
    }

    Ok(())
}
