//! Declarative tool catalog for the article gateway.
//!
//! The catalog is advertised verbatim to clients and must stay consistent
//! with the dispatcher: every name here has a matching arm in
//! [`crate::dispatch`], and vice versa. The consistency tests in
//! `tests/catalog.rs` and `tests/dispatch.rs` keep the two in step.

use std::sync::Arc;

use boardpress_store::StoreCapabilities;
use rmcp::model::{Tool, ToolAnnotations};
use serde_json::{json, Map as JsonMap, Value};

/// Helper to create an Arc-wrapped JSON-Schema object shape.
fn schema(props: Value, required: &[&str]) -> Arc<JsonMap<String, Value>> {
    let mut map = JsonMap::new();
    map.insert("type".into(), json!("object"));
    map.insert("properties".into(), props);
    if !required.is_empty() {
        map.insert("required".into(), json!(required));
    }
    map.insert("additionalProperties".into(), json!(false));
    Arc::new(map)
}

fn tool(
    name: &'static str,
    title: &'static str,
    description: &'static str,
    input_schema: Arc<JsonMap<String, Value>>,
) -> Tool {
    Tool {
        name: name.into(),
        title: Some(title.into()),
        description: Some(description.into()),
        input_schema,
        output_schema: None,
        annotations: Some(ToolAnnotations::default()),
        icons: None,
        meta: None,
    }
}

/// Names advertised for the given capabilities, in catalog order.
pub fn tool_names(caps: StoreCapabilities) -> Vec<&'static str> {
    let mut names = vec![
        "list_articles",
        "get_article",
        "create_article",
        "edit_article",
        "delete_article",
    ];
    if caps.theme {
        names.push("update_theme");
    }
    if caps.site_config {
        names.push("get_site_config");
        names.push("update_site_config");
    }
    if caps.publish {
        names.push("publish_changes");
    }
    names
}

/// Tool definitions advertised for the given backend capabilities.
pub fn tools(caps: StoreCapabilities) -> Vec<Tool> {
    let mut tools = vec![
        tool(
            "list_articles",
            "List articles",
            "List all articles on the website",
            schema(json!({}), &[]),
        ),
        tool(
            "get_article",
            "Get an article",
            "Get the full content of a specific article",
            schema(
                json!({
                    "slug": {
                        "type": "string",
                        "description": "The article slug (filename without .md)"
                    }
                }),
                &["slug"],
            ),
        ),
        tool(
            "create_article",
            "Create an article",
            "Create a new article on the website",
            schema(
                json!({
                    "title": { "type": "string", "description": "The article title" },
                    "content": { "type": "string", "description": "The article content in markdown" },
                    "category": { "type": "string", "description": "The article category" },
                    "excerpt": { "type": "string", "description": "A short excerpt/summary of the article" }
                }),
                &["title", "content", "category", "excerpt"],
            ),
        ),
        tool(
            "edit_article",
            "Edit an article",
            "Edit an existing article; omitted fields are preserved",
            schema(
                json!({
                    "slug": { "type": "string", "description": "The article slug to edit" },
                    "title": { "type": "string", "description": "New title (optional)" },
                    "content": { "type": "string", "description": "New content (optional)" },
                    "category": { "type": "string", "description": "New category (optional)" },
                    "excerpt": { "type": "string", "description": "New excerpt (optional)" }
                }),
                &["slug"],
            ),
        ),
        tool(
            "delete_article",
            "Delete an article",
            "Delete an article from the website",
            schema(
                json!({
                    "slug": { "type": "string", "description": "The article slug to delete" }
                }),
                &["slug"],
            ),
        ),
    ];

    if caps.theme {
        tools.push(tool(
            "update_theme",
            "Update theme colors",
            "Update the website theme colors",
            schema(
                json!({
                    "primary": { "type": "string", "description": "Primary color hex code (e.g., #1e40af)" },
                    "accent": { "type": "string", "description": "Accent color hex code (e.g., #0891b2)" }
                }),
                &[],
            ),
        ));
    }
    if caps.site_config {
        tools.push(tool(
            "get_site_config",
            "Get site configuration",
            "Get the current site configuration",
            schema(json!({}), &[]),
        ));
        tools.push(tool(
            "update_site_config",
            "Update site configuration",
            "Update site configuration (name, description, homepage hero)",
            schema(
                json!({
                    "siteName": { "type": "string", "description": "The site name" },
                    "siteDescription": { "type": "string", "description": "The site description" },
                    "heroTitle": { "type": "string", "description": "Homepage hero title" },
                    "heroDescription": { "type": "string", "description": "Homepage hero description" }
                }),
                &[],
            ),
        ));
    }
    if caps.publish {
        tools.push(tool(
            "publish_changes",
            "Publish changes",
            "Commit and push all changes to deploy the website",
            schema(
                json!({
                    "message": { "type": "string", "description": "Commit message describing the changes" }
                }),
                &["message"],
            ),
        ));
    }

    tools
}
