//! Main-content location
//!
//! Finds the most likely "body" region of a page, as opposed to
//! navigation, ads, and footers. Four pattern classes are tried in priority
//! order: `<main>` elements, `<article>` elements, then `<div>`s whose
//! `class` or `id` carries a content-ish keyword. Within each class the
//! single largest match wins, which favors whole containers over nested
//! fragments the non-greedy regexes also produce. A candidate is only
//! usable once its normalized text clears a minimum length, filtering out
//! keyword-matched navigation and ad blocks.

use regex::Regex;
use tracing::debug;

use super::text::{LinkStyle, TextNormalizer};

/// Substrings of `class`/`id` values that mark a content container.
const CONTENT_KEYWORDS: &str = "content|article|post|entry|story|main";

/// Heuristic locator for the main content region.
pub struct MainContentLocator {
    patterns: Vec<Regex>,
}

impl MainContentLocator {
    /// Compile the pattern classes, highest priority first.
    pub fn new() -> Self {
        let div_attr = |attr: &str| {
            format!(
                r#"(?is)<div\b[^>]*{attr}\s*=\s*["'][^"']*(?:{CONTENT_KEYWORDS})[^"']*["'][^>]*>([\s\S]*?)</div>"#
            )
        };
        let patterns = vec![
            Regex::new(r"(?is)<main\b[^>]*>([\s\S]*?)</main>").unwrap(),
            Regex::new(r"(?is)<article\b[^>]*>([\s\S]*?)</article>").unwrap(),
            Regex::new(&div_attr("class")).unwrap(),
            Regex::new(&div_attr("id")).unwrap(),
        ];
        Self { patterns }
    }

    /// Locate and normalize the main content of a page.
    ///
    /// Returns `None` when no pattern class yields a candidate whose
    /// normalized text exceeds `min_len` chars; the caller then falls back
    /// to whole-page extraction.
    pub fn locate(
        &self,
        html: &str,
        normalizer: &TextNormalizer,
        min_len: usize,
    ) -> Option<String> {
        for (class_idx, re) in self.patterns.iter().enumerate() {
            let largest = re
                .captures_iter(html)
                .filter_map(|caps| caps.get(1))
                .max_by_key(|m| m.as_str().len());

            let Some(fragment) = largest else { continue };

            let text = normalizer.normalize(fragment.as_str(), LinkStyle::Drop);
            if text.chars().count() > min_len {
                debug!(
                    pattern_class = class_idx,
                    text_len = text.len(),
                    "main content candidate accepted"
                );
                return Some(text);
            }
            debug!(
                pattern_class = class_idx,
                text_len = text.len(),
                "candidate below minimum length, trying next class"
            );
        }
        None
    }
}

impl Default for MainContentLocator {
    fn default() -> Self {
        Self::new()
    }
}
