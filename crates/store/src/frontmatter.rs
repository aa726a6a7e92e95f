//! Delimited `key: value` header codec for article markdown files.
//!
//! An article file looks like:
//!
//! ```text
//! ---
//! title: Understanding the Board Chair Role
//! excerpt: What the chair actually does
//! date: 2025-12-15
//! category: Leadership
//! ---
//!
//! The chair presides over the board.
//! ```
//!
//! The header grammar is plain `key: value` lines, not YAML. Values are
//! single-line; embedded newlines are unsupported.

use crate::error::{Result, StoreError};

/// Header fields carried by every article file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: String,
    pub excerpt: String,
    pub date: String,
    pub category: String,
}

/// Renders a header block followed by the body text.
pub fn encode(header: &FrontMatter, body: &str) -> String {
    format!(
        "---\ntitle: {}\nexcerpt: {}\ndate: {}\ncategory: {}\n---\n\n{}\n",
        header.title,
        header.excerpt,
        header.date,
        header.category,
        body.trim()
    )
}

/// Splits a stored article into its header fields and body.
///
/// A file lacking the leading header block, or one whose block never
/// closes, is rejected with [`StoreError::InvalidFormat`] — the same policy
/// on every read path. A missing individual key decodes as an empty value.
/// Each header line splits on the first `": "`; unrecognized keys are
/// ignored. The body is the remainder after the closing delimiter, trimmed
/// of surrounding whitespace.
pub fn decode(text: &str) -> Result<(FrontMatter, String)> {
    let rest = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
        .ok_or_else(|| StoreError::InvalidFormat("missing front matter header".into()))?;
    let end = rest
        .find("\n---")
        .ok_or_else(|| StoreError::InvalidFormat("unterminated front matter header".into()))?;

    let mut header = FrontMatter::default();
    for line in rest[..end].lines() {
        let Some((key, value)) = line.split_once(": ") else {
            continue;
        };
        let value = value.trim().to_string();
        match key.trim() {
            "title" => header.title = value,
            "excerpt" => header.excerpt = value,
            "date" => header.date = value,
            "category" => header.category = value,
            _ => {}
        }
    }

    let body = rest[end + 4..].trim().to_string();
    Ok((header, body))
}
