//! HTML extraction pipeline components
//!
//! Pure, regex-driven functions of the HTML string they receive: metadata
//! extraction, main-content location, sub-article segmentation, and
//! HTML-to-text normalization. None of them touch external state, so a
//! single set of compiled extractors can serve concurrent requests.

pub mod articles;
pub mod content;
pub mod metadata;
pub mod text;

use serde::{Deserialize, Serialize};

pub use articles::ArticleSegmenter;
pub use content::MainContentLocator;
pub use metadata::{MetadataExtractor, PageMetadata};
pub use text::{LinkStyle, TextNormalizer};

/// A normalized, human-readable fragment of a page.
///
/// The main-content result carries no title; segmented sub-articles do.
/// Admitted blocks always have non-empty `text`; extractors discard
/// anything below their minimum length first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Heading text, present for sub-articles.
    pub title: Option<String>,
    /// Normalized Markdown-flavored text.
    pub text: String,
}
