//! Page contexts for the static site
//!
//! Reads the published posts back from the content directory and computes,
//! for each page, the neighbouring posts by date and up to
//! [`RELATED_POSTS_LIMIT`] related posts.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::{NoteError, Result};
use crate::frontmatter::parse_frontmatter;
use crate::note::{post_slug, Post};
use crate::publish::INDEX_FILE;
use crate::related::{related_posts, RELATED_POSTS_LIMIT};

/// Short description of a neighbouring or related post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub tags: Vec<String>,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.frontmatter.title.clone(),
            tags: post.frontmatter.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageContext {
    pub slug: String,
    pub title: String,
    /// Next older post
    pub previous: Option<PostSummary>,
    /// Next newer post
    pub next: Option<PostSummary>,
    pub related: Vec<PostSummary>,
}

/// Published posts, newest first
#[derive(Debug, Clone, Default)]
pub struct PostIndex {
    posts: Vec<Post>,
}

impl PostIndex {
    /// Keep published posts and sort them by date, newest first.
    ///
    /// Undated or unparseable dates sort last; ties keep input order.
    pub fn from_posts(posts: Vec<Post>) -> Self {
        let mut posts: Vec<Post> = posts
            .into_iter()
            .filter(|post| post.frontmatter.published)
            .collect();
        posts.sort_by(|a, b| post_date(b).cmp(&post_date(a)));
        Self { posts }
    }

    /// Read `<content_dir>/*/index.md`, in directory-name order
    pub fn load(content_dir: &Path) -> Result<Self> {
        let mut dirs: Vec<_> = fs::read_dir(content_dir)
            .map_err(|e| NoteError::io(content_dir, e))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();

        let mut posts = Vec::new();
        for dir in dirs {
            let index = dir.join(INDEX_FILE);
            if !index.is_file() {
                debug!("skipping {} (no {})", dir.display(), INDEX_FILE);
                continue;
            }

            let content = fs::read_to_string(&index).map_err(|e| NoteError::io(&index, e))?;
            let (frontmatter, _) = parse_frontmatter(&content, &index.display().to_string())?;
            let dir_name = dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            posts.push(Post::new(post_slug(&dir_name), frontmatter));
        }

        Ok(Self::from_posts(posts))
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn find(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.slug == slug)
    }

    /// Related posts for `post`, capped for page display
    pub fn related_to(&self, post: &Post) -> Vec<&Post> {
        let mut related = related_posts(&self.posts, post);
        related.truncate(RELATED_POSTS_LIMIT);
        related
    }

    pub fn page_contexts(&self) -> Vec<PageContext> {
        self.posts
            .iter()
            .enumerate()
            .map(|(index, post)| PageContext {
                slug: post.slug.clone(),
                title: post.frontmatter.title.clone(),
                previous: self.posts.get(index + 1).map(PostSummary::from),
                next: index
                    .checked_sub(1)
                    .and_then(|newer| self.posts.get(newer))
                    .map(PostSummary::from),
                related: self
                    .related_to(post)
                    .into_iter()
                    .map(PostSummary::from)
                    .collect(),
            })
            .collect()
    }
}

fn post_date(post: &Post) -> Option<NaiveDate> {
    let date = post.frontmatter.date.trim();
    date.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::Frontmatter;

    fn post(slug: &str, date: &str, published: bool, tags: &[&str]) -> Post {
        Post::new(
            slug,
            Frontmatter {
                title: slug.trim_matches('/').to_string(),
                date: date.to_string(),
                published,
                tags: tags.iter().map(|t| t.to_string()).collect(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_filters_unpublished_and_sorts_newest_first() {
        let index = PostIndex::from_posts(vec![
            post("/blog/old/", "2021-01-01", true, &[]),
            post("/blog/draft/", "2023-01-01", false, &[]),
            post("/blog/undated/", "", true, &[]),
            post("/blog/new/", "2022-02-15T10:00:00Z", true, &[]),
        ]);

        let slugs: Vec<&str> = index.posts().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["/blog/new/", "/blog/old/", "/blog/undated/"]);
        assert!(index.find("/blog/draft/").is_none());
    }

    #[test]
    fn test_previous_and_next() {
        let index = PostIndex::from_posts(vec![
            post("/blog/a/", "2022-03-01", true, &[]),
            post("/blog/b/", "2022-02-01", true, &[]),
            post("/blog/c/", "2022-01-01", true, &[]),
        ]);
        let pages = index.page_contexts();

        assert!(pages[0].next.is_none());
        assert_eq!(pages[0].previous.as_ref().unwrap().slug, "/blog/b/");
        assert_eq!(pages[1].next.as_ref().unwrap().slug, "/blog/a/");
        assert_eq!(pages[1].previous.as_ref().unwrap().slug, "/blog/c/");
        assert!(pages[2].previous.is_none());
    }

    #[test]
    fn test_related_capped_at_three() {
        let index = PostIndex::from_posts(vec![
            post("/blog/a/", "2022-06-01", true, &["ruby"]),
            post("/blog/b/", "2022-05-01", true, &["ruby"]),
            post("/blog/c/", "2022-04-01", true, &["ruby"]),
            post("/blog/d/", "2022-03-01", true, &["ruby"]),
            post("/blog/e/", "2022-02-01", true, &["ruby"]),
        ]);
        let pages = index.page_contexts();

        let related: Vec<&str> = pages[0].related.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(related, vec!["/blog/b/", "/blog/c/", "/blog/d/"]);
    }
}
