//! Storage backends for the boardpress content gateway.
//!
//! Articles live either as front-matter markdown files inside a site
//! checkout ([`FileStore`]) or as rows in a hosted table reached over HTTPS
//! ([`TableStore`]). Both sit behind the [`ArticleStore`] trait so the
//! gateway dispatcher never knows which one it is talking to.
//!
//! # Examples
//!
//! ```
//! use boardpress_store::frontmatter::{decode, encode, FrontMatter};
//! use boardpress_store::slugify;
//!
//! let header = FrontMatter {
//!     title: "Understanding the Board Chair Role".into(),
//!     excerpt: "What the chair actually does".into(),
//!     date: "2025-12-15".into(),
//!     category: "Leadership".into(),
//! };
//! let text = encode(&header, "The chair presides over the board.");
//! let (decoded, body) = decode(&text).unwrap();
//! assert_eq!(decoded, header);
//! assert_eq!(body, "The chair presides over the board.");
//!
//! assert_eq!(
//!     slugify("Understanding the Board Chair Role"),
//!     "understanding-the-board-chair-role"
//! );
//! ```

#![deny(unsafe_code)]

pub mod adapters;
pub mod error;
pub mod frontmatter;
pub mod model;
pub mod slug;

pub use adapters::{ArticleStore, FileStore, StoreCapabilities, TableConfig, TableStore};
pub use error::{Result, StoreError};
pub use model::{
    today, Article, ArticlePatch, ArticleSummary, NewArticle, PublishOutcome, SiteConfigPatch,
    ThemeColors,
};
pub use slug::slugify;
