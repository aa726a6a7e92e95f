//! Single dispatcher shared by the stdio and HTTP transports.
//!
//! Receives one operation name plus a loosely-typed argument bag, performs
//! exactly one store call, and folds every failure into the uniform error
//! envelope. The dispatcher holds no state between calls.

use boardpress_store::{
    ArticlePatch, ArticleStore, NewArticle, SiteConfigPatch, StoreCapabilities, StoreError,
    ThemeColors,
};
use rmcp::model::{CallToolResult, Content};
use serde_json::{json, Map as JsonMap, Value};
use thiserror::Error;

use crate::catalog;

/// Errors raised by the dispatcher before or during a store call.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The name is not in the capability-scoped catalog.
    #[error("unknown tool: {0}")]
    UnknownOperation(String),

    /// A schema-required argument is absent from the bag.
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<serde_json::Error> for DispatchError {
    fn from(err: serde_json::Error) -> Self {
        DispatchError::Store(StoreError::from(err))
    }
}

fn require_str<'a>(
    args: Option<&'a JsonMap<String, Value>>,
    key: &'static str,
) -> Result<&'a str, DispatchError> {
    args.and_then(|bag| bag.get(key))
        .and_then(Value::as_str)
        .ok_or(DispatchError::MissingArgument(key))
}

fn optional_string(args: Option<&JsonMap<String, Value>>, key: &str) -> Option<String> {
    args.and_then(|bag| bag.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn success(payload: Value) -> CallToolResult {
    let text = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());
    CallToolResult {
        content: vec![Content::text(text)],
        is_error: Some(false),
        structured_content: Some(payload),
        meta: None,
    }
}

/// Executes one named operation against the store.
///
/// Failures never escape: any error is converted into the
/// `{content, isError: true}` envelope so both transports report tool-level
/// problems on the same channel as results.
pub async fn dispatch(
    store: &dyn ArticleStore,
    caps: StoreCapabilities,
    name: &str,
    args: Option<&JsonMap<String, Value>>,
) -> CallToolResult {
    match invoke(store, caps, name, args).await {
        Ok(result) => result,
        Err(err) => CallToolResult {
            content: vec![Content::text(format!("Error: {err}"))],
            is_error: Some(true),
            structured_content: None,
            meta: None,
        },
    }
}

async fn invoke(
    store: &dyn ArticleStore,
    caps: StoreCapabilities,
    name: &str,
    args: Option<&JsonMap<String, Value>>,
) -> Result<CallToolResult, DispatchError> {
    // Names outside the capability-scoped catalog are rejected before any
    // store access.
    if !catalog::tool_names(caps).iter().any(|known| *known == name) {
        return Err(DispatchError::UnknownOperation(name.to_string()));
    }

    match name {
        "list_articles" => {
            let articles = store.list().await?;
            Ok(success(serde_json::to_value(articles)?))
        }
        "get_article" => {
            let slug = require_str(args, "slug")?;
            let article = store.get(slug).await?;
            Ok(success(serde_json::to_value(article)?))
        }
        "create_article" => {
            let draft = NewArticle {
                title: require_str(args, "title")?.to_string(),
                content: require_str(args, "content")?.to_string(),
                category: require_str(args, "category")?.to_string(),
                excerpt: require_str(args, "excerpt")?.to_string(),
            };
            let article = store.create(draft).await?;
            Ok(success(serde_json::to_value(article)?))
        }
        "edit_article" => {
            let slug = require_str(args, "slug")?;
            let patch = ArticlePatch {
                title: optional_string(args, "title"),
                content: optional_string(args, "content"),
                category: optional_string(args, "category"),
                excerpt: optional_string(args, "excerpt"),
            };
            let article = store.update(slug, patch).await?;
            Ok(success(serde_json::to_value(article)?))
        }
        "delete_article" => {
            let slug = require_str(args, "slug")?;
            store.delete(slug).await?;
            Ok(success(json!({ "deleted": slug })))
        }
        "update_theme" => {
            let colors = ThemeColors {
                primary: optional_string(args, "primary"),
                accent: optional_string(args, "accent"),
            };
            let colors = store.update_theme(colors).await?;
            Ok(success(json!({
                "updated": true,
                "colors": serde_json::to_value(colors)?
            })))
        }
        "get_site_config" => {
            let config = store.site_config().await?;
            Ok(success(config))
        }
        "update_site_config" => {
            let patch = SiteConfigPatch {
                site_name: optional_string(args, "siteName"),
                site_description: optional_string(args, "siteDescription"),
                hero_title: optional_string(args, "heroTitle"),
                hero_description: optional_string(args, "heroDescription"),
            };
            let config = store.update_site_config(patch).await?;
            Ok(success(config))
        }
        "publish_changes" => {
            let message = require_str(args, "message")?;
            let outcome = store.publish(message).await?;
            Ok(success(serde_json::to_value(outcome)?))
        }
        other => Err(DispatchError::UnknownOperation(other.to_string())),
    }
}
