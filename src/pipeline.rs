//! Extraction pipeline orchestration and document assembly
//!
//! Ties the fetcher and the extraction components into the single
//! `extract(url)` operation: fetch, derive metadata, locate main content,
//! segment sub-articles, assemble one capped document. Every derived value
//! is request-scoped; concurrent extractions share only the compiled
//! regexes and the HTTP connection pool.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use url::Url;

use crate::error::Result;
use crate::extraction::{
    ArticleSegmenter, ContentBlock, LinkStyle, MainContentLocator, MetadataExtractor,
    PageMetadata, TextNormalizer,
};
use crate::fetcher::PageFetcher;

/// Default fetch timeout in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

/// Default minimum normalized length for a main-content candidate.
pub const DEFAULT_MIN_MAIN_CONTENT_LEN: usize = 200;

/// Default minimum normalized length for a sub-article.
pub const DEFAULT_MIN_ARTICLE_LEN: usize = 100;

/// Default cap on segmented sub-articles.
pub const DEFAULT_MAX_ARTICLES: usize = 10;

/// Default cap on the assembled document, in chars.
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 80_000;

/// Default browser-identifying User-Agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; SourceFetch/1.0)";

/// Marker appended when the assembled document hits the length cap.
pub const TRUNCATION_MARKER: &str = "\n\n[Content truncated...]";

/// Configuration for the extraction pipeline.
///
/// The thresholds are empirically tuned rather than derived from a
/// requirement, so all of them are fields instead of hard-coded values.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Hard timeout for the outbound fetch.
    pub fetch_timeout: Duration,
    /// User-Agent sent with the fetch.
    pub user_agent: String,
    /// Normalized main-content candidates at or below this length are
    /// rejected as boilerplate.
    pub min_main_content_len: usize,
    /// Sub-articles at or below this normalized length are discarded.
    pub min_article_len: usize,
    /// At most this many sub-articles, in document order.
    pub max_articles: usize,
    /// Maximum assembled document length in chars before truncation.
    pub max_content_length: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            min_main_content_len: DEFAULT_MIN_MAIN_CONTENT_LEN,
            min_article_len: DEFAULT_MIN_ARTICLE_LEN,
            max_articles: DEFAULT_MAX_ARTICLES,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
        }
    }
}

/// Final output of an extraction call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// The assembled, size-capped document.
    pub content: String,
    /// The validated URL the content came from.
    pub url: String,
    /// Page title (empty when the page has none).
    pub title: String,
    /// Page description (empty when the page has none).
    pub description: String,
}

/// The extraction pipeline.
///
/// Build one at startup and share it; all components are pure functions of
/// their input plus this immutable configuration.
pub struct Extractor {
    config: ExtractorConfig,
    fetcher: PageFetcher,
    normalizer: TextNormalizer,
    metadata: MetadataExtractor,
    locator: MainContentLocator,
    segmenter: ArticleSegmenter,
}

impl Extractor {
    /// Create an extractor from configuration.
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        let fetcher = PageFetcher::new(&config.user_agent, config.fetch_timeout)?;
        Ok(Self {
            config,
            fetcher,
            normalizer: TextNormalizer::new(),
            metadata: MetadataExtractor::new(),
            locator: MainContentLocator::new(),
            segmenter: ArticleSegmenter::new(),
        })
    }

    /// Create an extractor with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ExtractorConfig::default())
    }

    /// The configuration this extractor runs with.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Fetch a URL and run the full pipeline over the response body.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn extract(&self, url: &str) -> Result<ExtractionResult> {
        let url = PageFetcher::validate_url(url)?;
        let doc = self.fetcher.fetch(&url).await?;
        let result = self.extract_from_html(&doc.url, &doc.html);
        info!(
            url = %result.url,
            content_len = result.content.len(),
            "extraction complete"
        );
        Ok(result)
    }

    /// Run the pipeline over already-fetched HTML.
    ///
    /// Pure with respect to external state; this is the seam the tests use.
    pub fn extract_from_html(&self, url: &Url, html: &str) -> ExtractionResult {
        let meta = self.metadata.extract(html, &self.normalizer);
        let main_content =
            self.locator
                .locate(html, &self.normalizer, self.config.min_main_content_len);
        let articles = self.segmenter.segment(
            html,
            &self.normalizer,
            self.config.min_article_len,
            self.config.max_articles,
        );

        debug!(
            has_main = main_content.is_some(),
            articles = articles.len(),
            "assembling document"
        );

        let content = self.assemble(html, &meta, main_content.as_deref(), &articles);

        ExtractionResult {
            content,
            url: url.to_string(),
            title: meta.best_title().to_string(),
            description: meta.best_description().to_string(),
        }
    }

    /// Build the final document: metadata header, horizontal rule, main
    /// content, sub-articles; whole-page fallback when the structured paths
    /// found nothing. The result is capped with a truncation marker.
    fn assemble(
        &self,
        html: &str,
        meta: &PageMetadata,
        main_content: Option<&str>,
        articles: &[ContentBlock],
    ) -> String {
        let mut doc = String::new();

        let title = meta.best_title();
        if !title.is_empty() {
            doc.push_str("# ");
            doc.push_str(title);
            doc.push_str("\n\n");
        }
        let description = meta.best_description();
        if !description.is_empty() {
            doc.push_str("**Summary:** ");
            doc.push_str(description);
            doc.push_str("\n\n");
        }
        if let Some(site) = meta.og_site_name.as_deref().filter(|s| !s.is_empty()) {
            doc.push_str("**Source:** ");
            doc.push_str(site);
            doc.push_str("\n\n");
        }
        doc.push_str("---\n\n");

        if main_content.is_none() && articles.is_empty() {
            // Fallback keeps link targets so the document stays traceable.
            doc.push_str(&self.normalizer.normalize(html, LinkStyle::Preserve));
        } else {
            if let Some(main) = main_content {
                doc.push_str("## Main Content\n\n");
                doc.push_str(main);
                doc.push_str("\n\n");
            }
            if !articles.is_empty() {
                doc.push_str("## Articles & Sections\n\n");
                for article in articles {
                    if let Some(title) = &article.title {
                        doc.push_str("### ");
                        doc.push_str(title);
                        doc.push_str("\n\n");
                    }
                    doc.push_str(&article.text);
                    doc.push_str("\n\n");
                }
            }
        }

        self.truncate_to_cap(doc.trim_end().to_string())
    }

    /// Cap the document at `max_content_length` chars, cutting on a char
    /// boundary and appending the truncation marker.
    fn truncate_to_cap(&self, content: String) -> String {
        let cap = self.config.max_content_length;
        if content.chars().count() <= cap {
            return content;
        }
        let mut truncated: String = content.chars().take(cap).collect();
        truncated.push_str(TRUNCATION_MARKER);
        debug!(cap, truncated_len = truncated.len(), "document truncated");
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> Extractor {
        Extractor::with_defaults().expect("default extractor")
    }

    fn extract(html: &str) -> ExtractionResult {
        extractor().extract_from_html(&Url::parse("https://example.com/page").unwrap(), html)
    }

    #[test]
    fn header_fields_appear_in_order() {
        let html = r#"
            <html><head>
                <title>The Title</title>
                <meta name="description" content="The description">
                <meta property="og:site_name" content="Example Site">
            </head><body><p>Body text</p></body></html>
        "#;
        let result = extract(html);
        let title_at = result.content.find("# The Title").unwrap();
        let summary_at = result.content.find("**Summary:** The description").unwrap();
        let source_at = result.content.find("**Source:** Example Site").unwrap();
        let rule_at = result.content.find("---").unwrap();
        assert!(title_at < summary_at && summary_at < source_at && source_at < rule_at);
    }

    #[test]
    fn absent_metadata_lines_are_omitted() {
        let result = extract("<html><body><p>Just body</p></body></html>");
        assert!(!result.content.contains("# \n"));
        assert!(!result.content.contains("**Summary:**"));
        assert!(!result.content.contains("**Source:**"));
        assert!(result.content.contains("Just body"));
    }

    #[test]
    fn structured_page_gets_main_content_section() {
        let body = "word ".repeat(60);
        let html = format!("<main><p>{body}</p></main>");
        let result = extract(&html);
        assert!(result.content.contains("## Main Content"));
    }

    #[test]
    fn unstructured_page_falls_back_to_whole_page() {
        let html = r#"<html><body><p>Plain text with a
            <a href="https://example.com/x">link</a></p></body></html>"#;
        let result = extract(html);
        assert!(!result.content.contains("## Main Content"));
        assert!(result.content.contains("Plain text"));
        // Fallback preserves link targets.
        assert!(result.content.contains("link (https://example.com/x)"));
    }

    #[test]
    fn structured_extraction_drops_link_targets() {
        let body = "word ".repeat(60);
        let html = format!(
            r#"<main><p>{body} <a href="https://example.com/x">a link</a></p></main>"#
        );
        let result = extract(&html);
        assert!(result.content.contains("a link"));
        assert!(!result.content.contains("(https://example.com/x)"));
    }

    #[test]
    fn truncation_invariant_holds() {
        let config = ExtractorConfig {
            max_content_length: 500,
            ..Default::default()
        };
        let extractor = Extractor::new(config).unwrap();
        let body = "word ".repeat(500);
        let html = format!("<main><p>{body}</p></main>");
        let result = extractor
            .extract_from_html(&Url::parse("https://example.com").unwrap(), &html);

        assert!(result.content.ends_with(TRUNCATION_MARKER));
        assert_eq!(
            result.content.chars().count(),
            500 + TRUNCATION_MARKER.chars().count()
        );
    }

    #[test]
    fn short_documents_are_not_truncated() {
        let result = extract("<p>short</p>");
        assert!(!result.content.contains("[Content truncated...]"));
    }

    #[test]
    fn articles_render_with_their_titles() {
        let body = "word ".repeat(40);
        let html = format!(
            "<section><h2>Alpha</h2><p>{body}</p></section>\
             <section><h2>Beta</h2><p>{body}</p></section>"
        );
        let result = extract(&html);
        assert!(result.content.contains("## Articles & Sections"));
        let alpha = result.content.find("### Alpha").unwrap();
        let beta = result.content.find("### Beta").unwrap();
        assert!(alpha < beta);
    }

    #[test]
    fn result_carries_url_and_metadata() {
        let html = r#"<head><title>T</title><meta name="description" content="D"></head>"#;
        let result = extract(html);
        assert_eq!(result.url, "https://example.com/page");
        assert_eq!(result.title, "T");
        assert_eq!(result.description, "D");
    }
}
