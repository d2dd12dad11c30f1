//! HTML-to-text normalization
//!
//! Converts an HTML fragment into clean, Markdown-flavored plain text using
//! a fixed sequence of regex transformations: strip non-content containers,
//! convert structural tags to Markdown markers, convert inline emphasis and
//! links, strip the rest, decode entities, collapse whitespace.
//!
//! The matching is deliberately non-recursive; nested tags of the same type
//! are not handled correctly. That is the contract of this layer, not a bug.

use regex::Regex;
use tracing::trace;

/// How `<a>` elements are rendered in normalized output.
///
/// Structured extraction (main content, sub-articles) keeps only the anchor
/// text for readability; the whole-page fallback keeps `text (URL)` so links
/// stay traceable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    /// Replace the anchor with its text, dropping the target.
    Drop,
    /// Replace the anchor with `text (URL)`.
    Preserve,
}

/// Tags removed entirely, contents included.
const STRIP_TAGS: [&str; 8] = [
    "script", "style", "noscript", "nav", "footer", "header", "aside", "form",
];

/// HTML fragment normalizer with pre-compiled regexes.
///
/// Construction compiles every pattern once; a single instance is intended
/// to be built at startup and shared across requests.
#[derive(Debug)]
pub struct TextNormalizer {
    comment_re: Regex,
    strip_res: Vec<Regex>,
    h1_re: Regex,
    h2_re: Regex,
    h3_re: Regex,
    h46_re: Regex,
    p_re: Regex,
    br_re: Regex,
    li_re: Regex,
    blockquote_re: Regex,
    strong_re: Regex,
    em_re: Regex,
    link_re: Regex,
    tag_re: Regex,
    decimal_entity_re: Regex,
    hex_entity_re: Regex,
    horizontal_ws_re: Regex,
    newline_re: Regex,
}

impl TextNormalizer {
    /// Create a normalizer with all patterns compiled.
    pub fn new() -> Self {
        let strip_res = STRIP_TAGS
            .iter()
            .map(|tag| {
                Regex::new(&format!(r"(?is)<{tag}\b[^>]*>[\s\S]*?</{tag}>")).unwrap()
            })
            .collect();

        Self {
            comment_re: Regex::new(r"<!--[\s\S]*?-->").unwrap(),
            strip_res,
            h1_re: Regex::new(r"(?is)<h1[^>]*>([\s\S]*?)</h1>").unwrap(),
            h2_re: Regex::new(r"(?is)<h2[^>]*>([\s\S]*?)</h2>").unwrap(),
            h3_re: Regex::new(r"(?is)<h3[^>]*>([\s\S]*?)</h3>").unwrap(),
            h46_re: Regex::new(r"(?is)<h[4-6][^>]*>([\s\S]*?)</h[4-6]>").unwrap(),
            p_re: Regex::new(r"(?is)<p\b[^>]*>([\s\S]*?)</p>").unwrap(),
            br_re: Regex::new(r"(?i)<br\s*/?>").unwrap(),
            li_re: Regex::new(r"(?is)<li\b[^>]*>([\s\S]*?)</li>").unwrap(),
            blockquote_re: Regex::new(r"(?is)<blockquote\b[^>]*>([\s\S]*?)</blockquote>").unwrap(),
            strong_re: Regex::new(r"(?is)<(?:strong|b)\b[^>]*>([\s\S]*?)</(?:strong|b)>").unwrap(),
            em_re: Regex::new(r"(?is)<(?:em|i)\b[^>]*>([\s\S]*?)</(?:em|i)>").unwrap(),
            link_re: Regex::new(r#"(?is)<a\b[^>]*href\s*=\s*["']([^"']*)["'][^>]*>([\s\S]*?)</a>"#)
                .unwrap(),
            tag_re: Regex::new(r"<[^>]+>").unwrap(),
            decimal_entity_re: Regex::new(r"&#(\d+);").unwrap(),
            hex_entity_re: Regex::new(r"(?i)&#x([0-9a-f]+);").unwrap(),
            horizontal_ws_re: Regex::new(r"[^\S\n]+").unwrap(),
            newline_re: Regex::new(r"\n{3,}").unwrap(),
        }
    }

    /// Normalize an HTML fragment into Markdown-flavored plain text.
    ///
    /// Transformation order matters and is fixed: later rules must not be
    /// undone by earlier ones.
    pub fn normalize(&self, html: &str, links: LinkStyle) -> String {
        // 1. Remove non-content containers and comments.
        let mut text = self.comment_re.replace_all(html, "").to_string();
        for re in &self.strip_res {
            text = re.replace_all(&text, "").to_string();
        }

        // 2. Structural tags to Markdown markers.
        text = self.h1_re.replace_all(&text, "\n\n# ${1}\n\n").to_string();
        text = self.h2_re.replace_all(&text, "\n\n## ${1}\n\n").to_string();
        text = self.h3_re.replace_all(&text, "\n\n### ${1}\n\n").to_string();
        text = self.h46_re.replace_all(&text, "\n\n#### ${1}\n\n").to_string();
        text = self.p_re.replace_all(&text, "\n${1}\n").to_string();
        text = self.br_re.replace_all(&text, "\n").to_string();
        text = self.li_re.replace_all(&text, "\n• ${1}").to_string();
        text = self
            .blockquote_re
            .replace_all(&text, "\n> ${1}\n")
            .to_string();

        // 3. Inline emphasis.
        text = self.strong_re.replace_all(&text, "**${1}**").to_string();
        text = self.em_re.replace_all(&text, "*${1}*").to_string();

        // 4. Links.
        text = match links {
            LinkStyle::Drop => self.link_re.replace_all(&text, "${2}").to_string(),
            LinkStyle::Preserve => self.link_re.replace_all(&text, "${2} (${1})").to_string(),
        };

        // 5. Everything else becomes a single space.
        text = self.tag_re.replace_all(&text, " ").to_string();

        // 6. Entities.
        text = self.decode_entities(&text);

        // 7. Whitespace discipline.
        text = self.collapse_whitespace(&text);

        trace!(input_len = html.len(), output_len = text.len(), "normalized fragment");
        text
    }

    /// Decode HTML entities: a fixed named set plus decimal and hexadecimal
    /// numeric character references.
    pub fn decode_entities(&self, text: &str) -> String {
        let mut result = text
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&apos;", "'")
            .replace("&#x27;", "'")
            .replace("&#x2F;", "/")
            .replace("&mdash;", "\u{2014}")
            .replace("&ndash;", "\u{2013}")
            .replace("&hellip;", "\u{2026}")
            .replace("&copy;", "\u{00A9}")
            .replace("&reg;", "\u{00AE}")
            .replace("&trade;", "\u{2122}");

        if result.contains("&#") {
            result = self
                .decimal_entity_re
                .replace_all(&result, |caps: &regex::Captures| {
                    caps.get(1)
                        .and_then(|m| m.as_str().parse::<u32>().ok())
                        .and_then(char::from_u32)
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| caps[0].to_string())
                })
                .to_string();

            result = self
                .hex_entity_re
                .replace_all(&result, |caps: &regex::Captures| {
                    caps.get(1)
                        .and_then(|m| u32::from_str_radix(m.as_str(), 16).ok())
                        .and_then(char::from_u32)
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| caps[0].to_string())
                })
                .to_string();
        }

        result
    }

    /// Collapse horizontal whitespace runs to one space, trim every line,
    /// bound newline runs to two, and trim the whole string.
    fn collapse_whitespace(&self, text: &str) -> String {
        let collapsed = self.horizontal_ws_re.replace_all(text, " ");
        let trimmed = collapsed
            .lines()
            .map(str::trim)
            .collect::<Vec<_>>()
            .join("\n");
        self.newline_re
            .replace_all(&trimmed, "\n\n")
            .trim()
            .to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
