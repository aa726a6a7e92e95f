//! Markdown-directory adapter for a site checkout on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Value};
use tokio::process::Command;

use crate::adapters::traits::{ArticleStore, StoreCapabilities};
use crate::error::{Result, StoreError};
use crate::frontmatter::{self, FrontMatter};
use crate::model::{
    today, Article, ArticlePatch, ArticleSummary, NewArticle, PublishOutcome, SiteConfigPatch,
    ThemeColors,
};
use crate::slug::slugify;

const ARTICLES_DIR: &str = "content/articles";
const CONFIG_FILE: &str = "content/site-config.json";
const THEME_FILE: &str = "src/app/globals.css";

static PRIMARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(--primary:\s*)#[0-9a-fA-F]{6}").expect("valid regex"));
static ACCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(--accent:\s*)#[0-9a-fA-F]{6}").expect("valid regex"));
static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid regex"));

/// Article store backed by front-matter markdown files under a site
/// checkout.
///
/// Layout relative to the site root: `content/articles/<slug>.md` per
/// article, `content/site-config.json` for the configuration document, and
/// `src/app/globals.css` for the theme custom properties. There is no
/// locking discipline; concurrent external modification is last-write-wins.
pub struct FileStore {
    site_root: PathBuf,
    articles_dir: PathBuf,
    config_file: PathBuf,
    theme_file: PathBuf,
}

impl FileStore {
    /// Adapter rooted at `site_root` with the standard site layout.
    pub fn new(site_root: impl Into<PathBuf>) -> Self {
        let site_root = site_root.into();
        Self {
            articles_dir: site_root.join(ARTICLES_DIR),
            config_file: site_root.join(CONFIG_FILE),
            theme_file: site_root.join(THEME_FILE),
            site_root,
        }
    }

    fn article_path(&self, slug: &str) -> PathBuf {
        self.articles_dir.join(format!("{slug}.md"))
    }

    fn read_article(&self, slug: &str) -> Result<Article> {
        let path = self.article_path(slug);
        if !path.exists() {
            return Err(StoreError::NotFound(slug.to_string()));
        }
        let text = fs::read_to_string(&path)?;
        let (header, body) = frontmatter::decode(&text).map_err(|err| match err {
            StoreError::InvalidFormat(msg) => StoreError::InvalidFormat(format!("{slug}: {msg}")),
            other => other,
        })?;
        Ok(Article {
            slug: slug.to_string(),
            title: header.title,
            excerpt: header.excerpt,
            content: body,
            category: header.category,
            date: header.date,
        })
    }

    fn write_article(&self, article: &Article) -> Result<()> {
        fs::create_dir_all(&self.articles_dir)?;
        let header = FrontMatter {
            title: article.title.clone(),
            excerpt: article.excerpt.clone(),
            date: article.date.clone(),
            category: article.category.clone(),
        };
        fs::write(
            self.article_path(&article.slug),
            frontmatter::encode(&header, &article.content),
        )?;
        Ok(())
    }

    fn read_config(&self) -> Result<Value> {
        if !self.config_file.exists() {
            return Ok(json!({}));
        }
        let text = fs::read_to_string(&self.config_file)?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn git(&self, args: &[&str]) -> Result<std::process::Output> {
        Ok(Command::new("git")
            .args(args)
            .current_dir(&self.site_root)
            .output()
            .await?)
    }
}

/// Merges the supplied fields into the configuration document, creating the
/// nested `homepage` object when needed. Unknown keys are preserved.
fn apply_site_patch(config: &mut Value, patch: &SiteConfigPatch) {
    if !config.is_object() {
        *config = json!({});
    }
    let Some(doc) = config.as_object_mut() else {
        return;
    };
    if let Some(name) = &patch.site_name {
        doc.insert("siteName".into(), json!(name));
    }
    if let Some(description) = &patch.site_description {
        doc.insert("siteDescription".into(), json!(description));
    }
    if patch.hero_title.is_some() || patch.hero_description.is_some() {
        let homepage = doc.entry("homepage").or_insert_with(|| json!({}));
        if !homepage.is_object() {
            *homepage = json!({});
        }
        let Some(homepage) = homepage.as_object_mut() else {
            return;
        };
        if let Some(title) = &patch.hero_title {
            homepage.insert("heroTitle".into(), json!(title));
        }
        if let Some(description) = &patch.hero_description {
            homepage.insert("heroDescription".into(), json!(description));
        }
    }
}

fn validate_color(value: &Option<String>, key: &str) -> Result<()> {
    match value {
        Some(color) if !HEX_COLOR_RE.is_match(color) => Err(StoreError::InvalidFormat(format!(
            "{key} must be a #RRGGBB hex color, got '{color}'"
        ))),
        _ => Ok(()),
    }
}

#[async_trait]
impl ArticleStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    fn capabilities(&self) -> StoreCapabilities {
        StoreCapabilities {
            site_config: true,
            theme: true,
            publish: true,
        }
    }

    async fn list(&self) -> Result<Vec<ArticleSummary>> {
        fs::create_dir_all(&self.articles_dir)?;
        let mut summaries = Vec::new();
        for entry in fs::read_dir(&self.articles_dir)? {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "md") {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            summaries.push(ArticleSummary::from(self.read_article(slug)?));
        }
        // ISO dates sort lexicographically; ties keep directory order, which
        // is platform dependent.
        summaries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(summaries)
    }

    async fn get(&self, slug: &str) -> Result<Article> {
        self.read_article(slug)
    }

    /// A title that normalizes to an existing slug silently overwrites the
    /// stored file (last write wins).
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
        self.write_article(&article)?;
        tracing::debug!(target: "boardpress::store", slug = %article.slug, "article created");
        Ok(article)
    }

    async fn update(&self, slug: &str, patch: ArticlePatch) -> Result<Article> {
        let mut article = self.read_article(slug)?;
        patch.apply_to(&mut article);
        self.write_article(&article)?;
        Ok(article)
    }

    async fn delete(&self, slug: &str) -> Result<()> {
        let path = self.article_path(slug);
        if !path.exists() {
            return Err(StoreError::NotFound(slug.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    async fn site_config(&self) -> Result<Value> {
        self.read_config()
    }

    async fn update_site_config(&self, patch: SiteConfigPatch) -> Result<Value> {
        let mut config = self.read_config()?;
        apply_site_patch(&mut config, &patch);
        if let Some(parent) = self.config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.config_file, serde_json::to_string_pretty(&config)?)?;
        Ok(config)
    }

    async fn update_theme(&self, colors: ThemeColors) -> Result<ThemeColors> {
        validate_color(&colors.primary, "primary")?;
        validate_color(&colors.accent, "accent")?;
        if !self.theme_file.exists() {
            return Err(StoreError::Storage(format!(
                "theme stylesheet not found: {}",
                self.theme_file.display()
            )));
        }
        let mut css = fs::read_to_string(&self.theme_file)?;
        if let Some(primary) = &colors.primary {
            css = PRIMARY_RE
                .replace_all(&css, format!("${{1}}{primary}"))
                .into_owned();
        }
        if let Some(accent) = &colors.accent {
            css = ACCENT_RE
                .replace_all(&css, format!("${{1}}{accent}"))
                .into_owned();
        }
        fs::write(&self.theme_file, css)?;
        Ok(colors)
    }

    async fn publish(&self, message: &str) -> Result<PublishOutcome> {
        for args in [
            vec!["add", "-A"],
            vec!["commit", "-m", message],
            vec!["push"],
        ] {
            let output = self.git(&args).await?;
            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Ok(PublishOutcome {
                    success: false,
                    message: format!("git {} failed: {}", args[0], stderr.trim()),
                });
            }
        }
        Ok(PublishOutcome {
            success: true,
            message: "changes published".into(),
        })
    }
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore")
            .field("site_root", &self.site_root)
            .finish()
    }
}
