//! Publishing API client (dev.to `POST /api/articles`)
//!
//! Sends the note with embeds rewritten to absolute asset URLs. Failures are
//! surfaced as-is; nothing is retried.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{NoteError, Result};
use crate::note::Note;
use crate::rewrite::to_remote_markdown;
use crate::slug::slugify;

const API_KEY_HEADER: &str = "api-key";

/// Article payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub title: String,
    pub body_markdown: String,
    pub tags: Vec<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
}

/// Request body wrapper expected by the API
#[derive(Debug, Serialize)]
struct ArticleRequest<'a> {
    article: &'a Article,
}

/// Fields we read back from a created article
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublishedArticle {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Article {
    /// Build the payload for `note`; the frontmatter block is not sent
    pub fn from_note(note: &Note, config: &Config) -> Self {
        let title = note.title().to_string();
        let body_markdown = to_remote_markdown(
            note.body(),
            &config.convert.scratchpad_marker,
            &config.remote.asset_base_url,
            &title,
        );

        let canonical_url = config
            .remote
            .canonical_base_url
            .as_deref()
            .map(|base| format!("{}/{}/", base.trim_end_matches('/'), slugify(&title)));

        Self {
            title,
            body_markdown,
            tags: note.frontmatter.tags.clone(),
            description: note.frontmatter.description.clone(),
            canonical_url,
        }
    }

    /// JSON body exactly as it is sent
    pub fn to_request_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&ArticleRequest { article: self })
            .map_err(|e| NoteError::json("article request", e))
    }
}

/// Authenticated client for the publishing API
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl RemoteClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("notepress/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key()
            .map_err(|e| NoteError::config(e.to_string()))?;
        Self::new(config.remote.endpoint.clone(), api_key)
    }

    fn articles_url(&self) -> String {
        format!("{}/api/articles", self.endpoint.trim_end_matches('/'))
    }

    /// POST the article. Non-2xx responses become [`NoteError::Api`].
    pub async fn create_article(&self, article: &Article) -> Result<PublishedArticle> {
        let url = self.articles_url();
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&ArticleRequest { article })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(NoteError::api(status.as_u16(), body));
        }

        let published: PublishedArticle = if body.trim().is_empty() {
            PublishedArticle::default()
        } else {
            serde_json::from_str(&body).map_err(|e| NoteError::json("article response", e))?
        };

        info!(
            "published '{}' (id: {:?}, url: {:?})",
            article.title, published.id, published.url
        );
        Ok(published)
    }
}
