//! SourceFetch - URL Fetching & Structured Text Extraction
//!
//! This crate fetches arbitrary web pages and turns them into a bounded,
//! Markdown-flavored text document plus structured metadata (title,
//! description, Open Graph fields), for injection into downstream prompts.
//!
//! # Features
//!
//! - **Fetcher**: one outbound GET with browser-like headers and a hard
//!   timeout; no retries
//! - **Metadata Extraction**: `<title>`, meta description, and `og:*`
//!   fields, tolerant of attribute order
//! - **Main-Content Location**: size-ranked heuristics over `<main>`,
//!   `<article>`, and content-keyword `<div>`s
//! - **Article Segmentation**: titled `<section>`/`<div>` blocks, bounded
//!   count
//! - **Normalization**: regex-driven HTML-to-text with Markdown markers,
//!   entity decoding, whitespace discipline
//! - **Assembly**: one capped document with a truncation marker
//! - **HTTP Surface**: a single `POST /fetch-url` JSON endpoint plus a
//!   health check
//!
//! The extraction is deliberately regex/heuristic based: non-recursive,
//! best-effort, with no claim to spec-compliant HTML parsing.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sourcefetch::pipeline::Extractor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = Extractor::with_defaults()?;
//!     let result = extractor.extract("https://example.com").await?;
//!
//!     println!("{}", result.content);
//!     Ok(())
//! }
//! ```
//!
//! # Pure Pipeline Example
//!
//! The pipeline over already-fetched HTML is a pure function, which is the
//! seam tests use:
//!
//! ```rust
//! use sourcefetch::pipeline::Extractor;
//! use url::Url;
//!
//! let extractor = Extractor::with_defaults().unwrap();
//! let url = Url::parse("https://example.com").unwrap();
//! let html = "<html><head><title>Hi</title></head><body><p>Hello &amp; welcome!</p></body></html>";
//!
//! let result = extractor.extract_from_html(&url, html);
//! assert!(result.content.starts_with("# Hi"));
//! assert!(result.content.contains("Hello & welcome!"));
//! ```
//!
//! # Error Handling
//!
//! Errors carry their HTTP mapping: bad URLs, upstream failures, and
//! timeouts are 400-class; everything unexpected is 500-class.
//!
//! ```rust
//! use sourcefetch::error::ExtractError;
//! use sourcefetch::fetcher::PageFetcher;
//!
//! let err = PageFetcher::validate_url("not a url").unwrap_err();
//! assert!(matches!(err, ExtractError::InvalidUrl(_)));
//! assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod extraction;
pub mod fetcher;
pub mod handlers;
pub mod pipeline;

// Re-exports for convenience
pub use error::{ExtractError, Result};
pub use extraction::{
    ArticleSegmenter, ContentBlock, LinkStyle, MainContentLocator, MetadataExtractor,
    PageMetadata, TextNormalizer,
};
pub use fetcher::{PageFetcher, RawDocument};
pub use handlers::{extract_router, AppState, FetchUrlRequest};
pub use pipeline::{ExtractionResult, Extractor, ExtractorConfig, TRUNCATION_MARKER};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
