use std::collections::HashSet;

use crate::note::Post;

/// Cap applied by page contexts; [`related_posts`] itself is uncapped.
pub const RELATED_POSTS_LIMIT: usize = 3;

/// Posts sharing at least one tag with `current`, excluding `current`.
///
/// Input order is preserved. A post without tags has no related posts.
pub fn related_posts<'a>(all: &'a [Post], current: &Post) -> Vec<&'a Post> {
    let current_tags: HashSet<&str> = current.tags().iter().map(String::as_str).collect();
    if current_tags.is_empty() {
        return Vec::new();
    }

    all.iter()
        .filter(|post| post.slug != current.slug)
        .filter(|post| post.tags().iter().any(|tag| current_tags.contains(tag.as_str())))
        .collect()
}
