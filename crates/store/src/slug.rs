//! Title-to-identifier transform.

/// Derives the URL-safe identifier for a title.
///
/// Lower-cases the title, collapses every maximal run of characters outside
/// `[a-z0-9]` to a single hyphen, and strips leading/trailing hyphens. This
/// is the primary key of the file backend, so the transform must stay
/// deterministic and idempotent.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}
