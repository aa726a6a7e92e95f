//! Record types shared by the store adapters and the gateway.

use serde::{Deserialize, Serialize};

/// A full article record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// URL-safe identifier, unique and immutable after creation.
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    /// Free-form markdown body.
    pub content: String,
    pub category: String,
    /// ISO calendar date (`YYYY-MM-DD`), set once at creation and never
    /// changed by edits.
    pub date: String,
}

/// The projection returned by `list`: everything except the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub date: String,
}

impl From<Article> for ArticleSummary {
    fn from(article: Article) -> Self {
        Self {
            slug: article.slug,
            title: article.title,
            excerpt: article.excerpt,
            category: article.category,
            date: article.date,
        }
    }
}

/// Caller-supplied fields for a new article; the store assigns the slug and
/// publication date.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub category: String,
    pub excerpt: String,
}

/// Partial update for an existing article. `None` fields keep their stored
/// value; serialization skips them so the table backend patches only what
/// was supplied.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArticlePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

impl ArticlePatch {
    /// True when no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.category.is_none()
            && self.excerpt.is_none()
    }

    /// Overlay the supplied fields onto an existing record. The slug and
    /// date are untouched.
    pub fn apply_to(&self, article: &mut Article) {
        if let Some(title) = &self.title {
            article.title = title.clone();
        }
        if let Some(content) = &self.content {
            article.content = content.clone();
        }
        if let Some(category) = &self.category {
            article.category = category.clone();
        }
        if let Some(excerpt) = &self.excerpt {
            article.excerpt = excerpt.clone();
        }
    }
}

/// Theme custom-property values to patch into the stylesheet.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ThemeColors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

/// Partial update for the site configuration document. Only the supplied
/// fields are merged; everything else in the document is preserved.
#[derive(Debug, Clone, Default)]
pub struct SiteConfigPatch {
    pub site_name: Option<String>,
    pub site_description: Option<String>,
    pub hero_title: Option<String>,
    pub hero_description: Option<String>,
}

/// Outcome of the publish operation. A git step that exits non-zero is
/// reported here rather than as an error.
#[derive(Debug, Clone, Serialize)]
pub struct PublishOutcome {
    pub success: bool,
    pub message: String,
}

/// Today's UTC date in the `YYYY-MM-DD` form stored in [`Article::date`].
pub fn today() -> String {
    let date = time::OffsetDateTime::now_utc().date();
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_overlays_only_supplied_fields() {
        let mut article = Article {
            slug: "my-first-post".into(),
            title: "My First Post".into(),
            excerpt: "intro".into(),
            content: "Hello".into(),
            category: "General".into(),
            date: "2025-12-15".into(),
        };

        let patch = ArticlePatch {
            category: Some("Updates".into()),
            ..Default::default()
        };
        patch.apply_to(&mut article);

        assert_eq!(article.category, "Updates");
        assert_eq!(article.title, "My First Post");
        assert_eq!(article.content, "Hello");
        assert_eq!(article.excerpt, "intro");
        assert_eq!(article.date, "2025-12-15");
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(ArticlePatch::default().is_empty());
        assert!(!ArticlePatch {
            title: Some("New".into()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn patch_serialization_skips_absent_fields() {
        let patch = ArticlePatch {
            title: Some("New".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"title": "New"}));
    }

    #[test]
    fn today_is_iso_calendar_date() {
        let date = today();
        assert_eq!(date.len(), 10);
        assert_eq!(&date[4..5], "-");
        assert_eq!(&date[7..8], "-");
    }
}
