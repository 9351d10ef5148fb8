//! Article slug generation.

use std::sync::LazyLock;

use regex::Regex;

static NON_SLUG_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Derive a URL slug from an article title.
///
/// Lowercases the title, replaces every run of characters outside `[a-z0-9]`
/// with a single `-`, and strips one leading and one trailing `-`.
///
/// # Examples
///
/// ```
/// use helpdeck_document::slugify;
///
/// assert_eq!(slugify("Quick Start Guide"), "quick-start-guide");
/// assert_eq!(slugify("  What's new in v2.0?  "), "what-s-new-in-v2-0");
/// ```
#[must_use]
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let dashed = NON_SLUG_RUN.replace_all(&lowered, "-");
    let trimmed = dashed.strip_prefix('-').unwrap_or(&dashed);
    trimmed.strip_suffix('-').unwrap_or(trimmed).to_owned()
}
