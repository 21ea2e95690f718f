//! Page contexts and related posts from the content directory

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use notepress_core::{PostIndex, PostSummary};
use std::path::PathBuf;

use super::{load_note, print_json, GlobalArgs};

#[derive(Parser, Debug)]
pub struct PagesArgs {
    /// Content directory (default: paths.content)
    #[arg(long, value_name = "DIR")]
    content: Option<PathBuf>,

    /// Only print the page with this slug (e.g. /blog/my-post/)
    #[arg(long)]
    slug: Option<String>,
}

#[derive(Parser, Debug)]
pub struct RelatedArgs {
    /// Note path, or note title inside the notes directory
    #[arg(value_name = "NOTE")]
    note: String,

    /// Content directory (default: paths.content)
    #[arg(long, value_name = "DIR")]
    content: Option<PathBuf>,

    /// Output JSON instead of human-readable format
    #[arg(long)]
    json: bool,
}

pub fn run_pages(args: PagesArgs, globals: &GlobalArgs) -> Result<()> {
    let config = globals.load_config()?;
    let content_dir = args
        .content
        .unwrap_or_else(|| config.content_dir().to_path_buf());

    let index = PostIndex::load(&content_dir)
        .with_context(|| format!("failed to index {}", content_dir.display()))?;
    let pages = index.page_contexts();

    match args.slug {
        Some(slug) => {
            let page = pages
                .iter()
                .find(|page| page.slug == slug)
                .ok_or_else(|| anyhow!("No published post with slug {}", slug))?;
            print_json(page)
        }
        None => print_json(&pages),
    }
}

pub fn run_related(args: RelatedArgs, globals: &GlobalArgs) -> Result<()> {
    let config = globals.load_config()?;
    let content_dir = args
        .content
        .unwrap_or_else(|| config.content_dir().to_path_buf());

    let note = load_note(&args.note, &config)?;
    let index = PostIndex::load(&content_dir)
        .with_context(|| format!("failed to index {}", content_dir.display()))?;

    let related: Vec<PostSummary> = index
        .related_to(&note.to_post())
        .into_iter()
        .map(PostSummary::from)
        .collect();

    if args.json {
        return print_json(&related);
    }

    if related.is_empty() {
        println!("No related posts for '{}'", note.title());
        return Ok(());
    }

    println!("Related to '{}':", note.title());
    for post in &related {
        println!("  {} ({}) [{}]", post.title, post.slug, post.tags.join(", "));
    }

    Ok(())
}
