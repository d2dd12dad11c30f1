//! Page metadata extraction
//!
//! Pulls the `<title>`, meta description, and Open Graph fields out of raw
//! HTML with case-insensitive pattern matching. Attribute order inside a
//! `<meta>` tag varies in the wild (`name` before `content` and the
//! reverse), so every field is matched with both orders. First occurrence
//! wins; there is no check that a match sits inside `<head>`.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::text::TextNormalizer;

/// Metadata derived once from a fetched page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// `<title>` text, trimmed and entity-decoded. Empty when absent.
    pub title: String,
    /// `<meta name="description">` content. Empty when absent.
    pub description: String,
    /// `og:title`, when present.
    pub og_title: Option<String>,
    /// `og:description`, when present.
    pub og_description: Option<String>,
    /// `og:site_name`, when present.
    pub og_site_name: Option<String>,
}

impl PageMetadata {
    /// Title for the assembled document: the `<title>` element when
    /// non-empty, otherwise `og:title`.
    pub fn best_title(&self) -> &str {
        if !self.title.is_empty() {
            &self.title
        } else {
            self.og_title.as_deref().unwrap_or("")
        }
    }

    /// Description for the assembled document: the meta description when
    /// non-empty, otherwise `og:description`.
    pub fn best_description(&self) -> &str {
        if !self.description.is_empty() {
            &self.description
        } else {
            self.og_description.as_deref().unwrap_or("")
        }
    }
}

/// A `<meta>` matcher tolerating both attribute orders.
struct MetaPattern {
    key_first: Regex,
    content_first: Regex,
}

impl MetaPattern {
    /// Build a matcher for `<meta {attr}="{value}" content="...">`.
    fn new(attr: &str, value: &str) -> Self {
        let key_first = Regex::new(&format!(
            r#"(?is)<meta\b[^>]*{attr}\s*=\s*["']{value}["'][^>]*content\s*=\s*["']([^"']*)["'][^>]*>"#
        ))
        .unwrap();
        let content_first = Regex::new(&format!(
            r#"(?is)<meta\b[^>]*content\s*=\s*["']([^"']*)["'][^>]*{attr}\s*=\s*["']{value}["'][^>]*>"#
        ))
        .unwrap();
        Self {
            key_first,
            content_first,
        }
    }

    /// First match in either attribute order, raw (not yet decoded).
    fn find(&self, html: &str) -> Option<String> {
        self.key_first
            .captures(html)
            .or_else(|| self.content_first.captures(html))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }
}

/// Metadata extractor with pre-compiled patterns.
pub struct MetadataExtractor {
    title_re: Regex,
    description: MetaPattern,
    og_title: MetaPattern,
    og_description: MetaPattern,
    og_site_name: MetaPattern,
}

impl MetadataExtractor {
    /// Create an extractor with all patterns compiled.
    pub fn new() -> Self {
        Self {
            title_re: Regex::new(r"(?is)<title[^>]*>([\s\S]*?)</title>").unwrap(),
            description: MetaPattern::new("name", "description"),
            og_title: MetaPattern::new("property", "og:title"),
            og_description: MetaPattern::new("property", "og:description"),
            og_site_name: MetaPattern::new("property", "og:site_name"),
        }
    }

    /// Extract metadata from raw HTML. Absent fields come back empty or
    /// `None`; extraction itself never fails.
    pub fn extract(&self, html: &str, normalizer: &TextNormalizer) -> PageMetadata {
        let decode = |s: String| normalizer.decode_entities(&s);

        let title = self
            .title_re
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| normalizer.decode_entities(m.as_str().trim()))
            .unwrap_or_default();

        PageMetadata {
            title,
            description: self.description.find(html).map(decode).unwrap_or_default(),
            og_title: self.og_title.find(html).map(decode),
            og_description: self.og_description.find(html).map(decode),
            og_site_name: self.og_site_name.find(html).map(decode),
        }
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new()
    }
}
