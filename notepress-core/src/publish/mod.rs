//! Publisher adapters: local static-site directory and remote publishing API

pub mod local;
pub mod remote;

pub use local::{publish_local, render_index, CopiedAsset, PublishReport, INDEX_FILE};
pub use remote::{Article, PublishedArticle, RemoteClient};
