//! Sub-article segmentation
//!
//! Scans `<section>` and `<div>` blocks for those carrying an `<h1>`–`<h3>`
//! heading and extracts each as a titled block. The regex crate has no
//! backreferences, so sections and divs are scanned separately and merged
//! by byte offset to preserve document order. Blocks with an empty
//! normalized title or too little content are discarded, and the result is
//! capped at the first qualifying blocks in encounter order.

use regex::Regex;
use tracing::debug;

use super::text::{LinkStyle, TextNormalizer};
use super::ContentBlock;

/// Segments a page into titled sub-articles.
pub struct ArticleSegmenter {
    section_re: Regex,
    div_re: Regex,
    heading_re: Regex,
}

impl ArticleSegmenter {
    /// Create a segmenter with compiled patterns.
    pub fn new() -> Self {
        Self {
            section_re: Regex::new(r"(?is)<section\b[^>]*>([\s\S]*?)</section>").unwrap(),
            div_re: Regex::new(r"(?is)<div\b[^>]*>([\s\S]*?)</div>").unwrap(),
            heading_re: Regex::new(r"(?is)<h[1-3][^>]*>([\s\S]*?)</h[1-3]>").unwrap(),
        }
    }

    /// Extract up to `max_count` sub-articles whose normalized content is
    /// longer than `min_len` chars, in document order.
    pub fn segment(
        &self,
        html: &str,
        normalizer: &TextNormalizer,
        min_len: usize,
        max_count: usize,
    ) -> Vec<ContentBlock> {
        // Merge both scans by match offset so encounter order is preserved.
        let mut blocks: Vec<(usize, &str)> = self
            .section_re
            .captures_iter(html)
            .chain(self.div_re.captures_iter(html))
            .filter_map(|caps| caps.get(1))
            .map(|m| (m.start(), m.as_str()))
            .collect();
        blocks.sort_by_key(|(start, _)| *start);

        let mut articles = Vec::new();
        for (_, fragment) in blocks {
            if articles.len() >= max_count {
                break;
            }

            let Some(heading) = self
                .heading_re
                .captures(fragment)
                .and_then(|caps| caps.get(1))
            else {
                continue;
            };

            let title = normalizer.normalize(heading.as_str(), LinkStyle::Drop);
            if title.is_empty() {
                continue;
            }

            let text = normalizer.normalize(fragment, LinkStyle::Drop);
            if text.chars().count() <= min_len {
                continue;
            }

            articles.push(ContentBlock {
                title: Some(title),
                text,
            });
        }

        debug!(count = articles.len(), "segmented sub-articles");
        articles
    }
}

impl Default for ArticleSegmenter {
    fn default() -> Self {
        Self::new()
    }
}
