//! Backend-agnostic contract for article persistence.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::model::{
    Article, ArticlePatch, ArticleSummary, NewArticle, PublishOutcome, SiteConfigPatch,
    ThemeColors,
};

/// Operations a backend offers beyond article CRUD.
///
/// The tool catalog only advertises operations the active backend supports,
/// so the dispatcher can rely on every advertised name having an
/// implementation behind it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCapabilities {
    /// Read and patch the site configuration document.
    pub site_config: bool,
    /// Patch the theme custom properties in the stylesheet.
    pub theme: bool,
    /// Stage, commit, and push the site working tree.
    pub publish: bool,
}

/// Uniform interface over article persistence.
///
/// Adapters hold no article state between calls; every method re-reads what
/// it needs and performs a single request–response operation against the
/// backing store.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Short backend label (e.g. "file", "table").
    fn name(&self) -> &str;

    /// Which optional operations this backend supports.
    fn capabilities(&self) -> StoreCapabilities {
        StoreCapabilities::default()
    }

    /// All article summaries ordered by date descending.
    ///
    /// An empty store yields an empty list, never an error; ties on `date`
    /// have no guaranteed order.
    async fn list(&self) -> Result<Vec<ArticleSummary>>;

    /// The full record for `slug`, or [`StoreError::NotFound`].
    async fn get(&self, slug: &str) -> Result<Article>;

    /// Assigns the slug and publication date, persists the record, and
    /// returns it as stored.
    async fn create(&self, draft: NewArticle) -> Result<Article>;

    /// Overwrites only the supplied fields; `date` is never touched.
    /// Fails with [`StoreError::NotFound`] for an unknown slug.
    async fn update(&self, slug: &str, patch: ArticlePatch) -> Result<Article>;

    /// Removes the record; the slug ceases to resolve.
    async fn delete(&self, slug: &str) -> Result<()>;

    /// The site configuration document.
    async fn site_config(&self) -> Result<Value> {
        Err(StoreError::Unsupported("get_site_config"))
    }

    /// Merges the supplied fields into the site configuration document and
    /// returns the result.
    async fn update_site_config(&self, _patch: SiteConfigPatch) -> Result<Value> {
        Err(StoreError::Unsupported("update_site_config"))
    }

    /// Patches the theme custom properties in the stylesheet.
    async fn update_theme(&self, _colors: ThemeColors) -> Result<ThemeColors> {
        Err(StoreError::Unsupported("update_theme"))
    }

    /// Stages all working-tree changes, commits with `message`, and pushes
    /// to the configured remote.
    ///
    /// This is an unsandboxed process invocation and a deliberate trust
    /// boundary: only expose it on operator-controlled transports.
    async fn publish(&self, _message: &str) -> Result<PublishOutcome> {
        Err(StoreError::Unsupported("publish_changes"))
    }
}
