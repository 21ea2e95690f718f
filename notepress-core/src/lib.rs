pub mod assets;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod migrate;
pub mod note;
pub mod pages;
pub mod publish;
pub mod related;
pub mod rewrite;
pub mod slug;
pub mod sync;

pub use assets::{embedded_filenames, resolve_assets, Asset, AssetMap};
pub use config::Config;
pub use error::{NoteError, Result};
pub use frontmatter::{parse_frontmatter, Frontmatter};
pub use migrate::{migrate_images, MigrationReport};
pub use note::{Note, Post};
pub use pages::{PageContext, PostIndex, PostSummary};
pub use publish::{publish_local, Article, PublishReport, RemoteClient};
pub use related::{related_posts, RELATED_POSTS_LIMIT};
pub use rewrite::{rewrite, strip_scratchpad, to_local_markdown, to_remote_markdown, Dialect};
pub use slug::slugify;
pub use sync::{sync_directory, SyncOptions, SyncReport};
