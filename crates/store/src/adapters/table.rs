//! Hosted-table adapter speaking a PostgREST-style REST dialect over HTTPS.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::adapters::traits::ArticleStore;
use crate::error::{Result, StoreError};
use crate::model::{today, Article, ArticlePatch, ArticleSummary, NewArticle};
use crate::slug::slugify;

const DEFAULT_TABLE: &str = "articles";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const SUMMARY_COLUMNS: &str = "slug,title,excerpt,category,date";
const ALL_COLUMNS: &str = "slug,title,excerpt,content,category,date";

/// Connection settings for the hosted table backend.
///
/// The table carries its own server-managed columns (`id`, `created_at`,
/// `updated_at`); the adapter selects only the article columns so both
/// backends expose the identical record shape.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub base_url: Url,
    pub service_key: String,
    pub table: String,
    pub timeout: Duration,
}

impl TableConfig {
    /// Settings for the project root `base_url` (the REST path is appended
    /// by the adapter) and its service key.
    pub fn new(base_url: &str, service_key: impl Into<String>) -> Result<Self> {
        let mut normalized = base_url.trim_end_matches('/').to_string();
        normalized.push('/');
        let base_url = Url::parse(&normalized)
            .map_err(|e| StoreError::Storage(format!("invalid table url '{base_url}': {e}")))?;
        Ok(Self {
            base_url,
            service_key: service_key.into(),
            table: DEFAULT_TABLE.into(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        })
    }

    /// Reads `BOARDPRESS_TABLE_URL`, `BOARDPRESS_TABLE_KEY`, and optionally
    /// `BOARDPRESS_TABLE_NAME` from the environment.
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("BOARDPRESS_TABLE_URL")
            .map_err(|_| StoreError::Storage("BOARDPRESS_TABLE_URL is not set".into()))?;
        let key = std::env::var("BOARDPRESS_TABLE_KEY")
            .map_err(|_| StoreError::Storage("BOARDPRESS_TABLE_KEY is not set".into()))?;
        let mut config = Self::new(&url, key)?;
        if let Ok(table) = std::env::var("BOARDPRESS_TABLE_NAME") {
            config.table = table;
        }
        Ok(config)
    }
}

/// Article store backed by a hosted relational table.
///
/// Concurrency control is deferred entirely to the store's own transaction
/// semantics; the adapter performs no compare-and-swap.
pub struct TableStore {
    config: TableConfig,
    client: Client,
}

impl TableStore {
    pub fn new(config: TableConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn rows_url(&self) -> Result<Url> {
        self.config
            .base_url
            .join(&format!("rest/v1/{}", self.config.table))
            .map_err(|e| StoreError::Storage(format!("invalid table path: {e}")))
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
    }

    /// Sends the request and deserializes the row set, mapping a 409 to
    /// [`StoreError::Conflict`] and any other non-success status to
    /// [`StoreError::Storage`] with the body passed through verbatim.
    async fn fetch_rows<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<Vec<T>> {
        let response = self.authed(builder).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(if status == StatusCode::CONFLICT {
                StoreError::Conflict(body)
            } else {
                StoreError::Storage(format!("table store returned {status}: {body}"))
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ArticleStore for TableStore {
    fn name(&self) -> &str {
        "table"
    }

    async fn list(&self) -> Result<Vec<ArticleSummary>> {
        let request = self
            .client
            .get(self.rows_url()?)
            .query(&[("select", SUMMARY_COLUMNS), ("order", "date.desc")]);
        self.fetch_rows(request).await
    }

    async fn get(&self, slug: &str) -> Result<Article> {
        let filter = format!("eq.{slug}");
        let request = self
            .client
            .get(self.rows_url()?)
            .query(&[("select", ALL_COLUMNS), ("slug", filter.as_str())]);
        self.fetch_rows::<Article>(request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(slug.to_string()))
    }

    async fn create(&self, draft: NewArticle) -> Result<Article> {
        let slug = slugify(&draft.title);
        if slug.is_empty() {
            return Err(StoreError::InvalidFormat(format!(
                "title '{}' contains no alphanumeric characters",
                draft.title
            )));
        }
        let article = Article {
            slug,
            title: draft.title,
            excerpt: draft.excerpt,
            content: draft.content,
            category: draft.category,
            date: today(),
        };
        let request = self
            .client
            .post(self.rows_url()?)
            .query(&[("select", ALL_COLUMNS)])
            .header("Prefer", "return=representation")
            .json(&article);
        self.fetch_rows::<Article>(request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Storage("insert returned no representation".into()))
    }

    async fn update(&self, slug: &str, patch: ArticlePatch) -> Result<Article> {
        if patch.is_empty() {
            return self.get(slug).await;
        }
        let filter = format!("eq.{slug}");
        let request = self
            .client
            .patch(self.rows_url()?)
            .query(&[("select", ALL_COLUMNS), ("slug", filter.as_str())])
            .header("Prefer", "return=representation")
            .json(&patch);
        self.fetch_rows::<Article>(request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(slug.to_string()))
    }

    async fn delete(&self, slug: &str) -> Result<()> {
        let filter = format!("eq.{slug}");
        let request = self
            .client
            .delete(self.rows_url()?)
            .query(&[("slug", filter.as_str())])
            .header("Prefer", "return=representation");
        let deleted: Vec<serde_json::Value> = self.fetch_rows(request).await?;
        if deleted.is_empty() {
            return Err(StoreError::NotFound(slug.to_string()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for TableStore {
    // service_key is redacted to keep credentials out of logs
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableStore")
            .field("base_url", &self.config.base_url.as_str())
            .field("table", &self.config.table)
            .field("service_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn store_for(server: &MockServer) -> TableStore {
        TableStore::new(TableConfig::new(&server.uri(), "test-key").unwrap()).unwrap()
    }

    fn row(slug: &str, date: &str) -> serde_json::Value {
        json!({
            "slug": slug,
            "title": slug.to_uppercase(),
            "excerpt": "e",
            "content": "body",
            "category": "General",
            "date": date,
        })
    }

    #[tokio::test]
    async fn list_maps_rows_and_sends_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/articles"))
            .and(query_param("order", "date.desc"))
            .and(header("apikey", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"slug": "b", "title": "B", "excerpt": "e", "category": "c", "date": "2025-12-15"},
                {"slug": "a", "title": "A", "excerpt": "e", "category": "c", "date": "2025-11-20"},
            ])))
            .mount(&server)
            .await;

        let store = store_for(&server).await;
        let summaries = store.list().await.unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].slug, "b");
    }

    #[tokio::test]
    async fn get_maps_empty_result_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/articles"))
            .and(query_param("slug", "eq.ghost"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let store = store_for(&server).await;
        let err = store.get("ghost").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn get_returns_first_row() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/articles"))
            .and(query_param("slug", "eq.hello"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([row("hello", "2025-12-15")])))
            .mount(&server)
            .await;

        let store = store_for(&server).await;
        let article = store.get("hello").await.unwrap();
        assert_eq!(article.slug, "hello");
        assert_eq!(article.content, "body");
    }

    #[tokio::test]
    async fn create_maps_duplicate_key_to_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/articles"))
            .respond_with(
                ResponseTemplate::new(409).set_body_string("duplicate key value"),
            )
            .mount(&server)
            .await;

        let store = store_for(&server).await;
        let err = store
            .create(NewArticle {
                title: "Hello".into(),
                content: "body".into(),
                category: "General".into(),
                excerpt: "e".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_maps_empty_representation_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/articles"))
            .and(query_param("slug", "eq.ghost"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let store = store_for(&server).await;
        let err = store.delete("ghost").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_patches_only_supplied_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/articles"))
            .and(query_param("slug", "eq.hello"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([row("hello", "2025-12-15")])))
            .mount(&server)
            .await;

        let store = store_for(&server).await;
        let article = store
            .update(
                "hello",
                ArticlePatch {
                    category: Some("Updates".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(article.slug, "hello");
    }

    #[test]
    fn config_normalizes_trailing_slash() {
        let config = TableConfig::new("https://example.test", "k").unwrap();
        assert_eq!(config.base_url.as_str(), "https://example.test/");
        let config = TableConfig::new("https://example.test/", "k").unwrap();
        assert_eq!(config.base_url.as_str(), "https://example.test/");
    }

    #[test]
    fn debug_redacts_service_key() {
        let store =
            TableStore::new(TableConfig::new("https://example.test", "secret").unwrap()).unwrap();
        let rendered = format!("{store:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
