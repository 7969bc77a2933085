//! Markdown converter for `DocC` render JSON documents.
//!
//! Turns a [`Document`] (a page as a tree of typed content blocks plus a
//! reference table) into a single Markdown string.
//!
//! # Example
//!
//! ```
//! use docc_converters_markdown::{Options, Processor};
//! use docc_model::Document;
//!
//! let doc: Document = r#"{
//!     "metadata": {"title": "Buttons"},
//!     "abstract": [{"type": "text", "text": "A button initiates an action."}]
//! }"#
//! .parse()?;
//!
//! let processor = Processor::new(Options::default());
//! let markdown = processor.render(&doc, "https://developer.apple.com/design/buttons");
//! assert!(markdown.starts_with("# Buttons\n"));
//! assert!(markdown.ends_with("A button initiates an action.\n"));
//! # Ok::<(), docc_model::Error>(())
//! ```
//!
//! # Rendering pipeline
//!
//! - [`RenderContext`] resolves link, media and alt-text lookups against the
//!   document's references
//! - inline content renders to Markdown fragments (`**strong**`, `*emphasis*`,
//!   `` `code` ``, `[title](url)`)
//! - blocks render to whole lines; nested content in one-line slots (list
//!   items, table cells, row columns) is flattened to plain text
//! - the page is assembled and passed through [`normalize_markdown`]
//!
//! # Limitations
//!
//! Some `DocC` content has no faithful Markdown equivalent:
//! - **Rows** (multi-column layouts) become a quoted list of columns
//! - **Asides** become block quotes labelled `NOTE` or `TIP`
//! - **Videos** become links to the preferred rendition
//! - **Nested tables** collapse to a `[table]` placeholder
//! - **Inline images** are dropped; only image-only paragraphs render as images
//!
//! Unknown block and inline kinds never fail the render; their nested inline or
//! block content is rendered instead.

use std::io::Write;

use docc_model::Document;

mod block;
mod context;
mod error;
mod flatten;
mod inline;
mod page;

pub use context::{MAX_DEPTH, RenderContext, is_absolute};
pub use error::Error;
pub use flatten::{TABLE_PLACEHOLDER, collapse_whitespace};
pub use page::{UNTITLED, normalize_markdown};

/// Origin that site-relative reference URLs are resolved against by default.
pub const DEFAULT_BASE_URL: &str = "https://developer.apple.com";

/// Converter options.
///
/// Use [`Options::builder()`] to construct an instance.
///
/// # Example
///
/// ```
/// use docc_converters_markdown::Options;
///
/// let options = Options::builder().base_url("https://docs.example.com").build();
/// assert_eq!(options.base_url(), "https://docs.example.com");
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Options {
    base_url: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Options {
    /// Create a new builder with default values.
    #[must_use]
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Get the origin used to make site-relative URLs absolute.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Builder for [`Options`].
#[derive(Debug, Clone, Default)]
pub struct OptionsBuilder {
    base_url: Option<String>,
}

impl OptionsBuilder {
    /// Set the origin used to make site-relative URLs absolute.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Build the [`Options`].
    #[must_use]
    pub fn build(self) -> Options {
        let defaults = Options::default();
        Options {
            base_url: self.base_url.unwrap_or(defaults.base_url),
        }
    }
}

/// Markdown converter processor.
#[derive(Clone, Debug, Default)]
pub struct Processor {
    options: Options,
}

impl Processor {
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Render a document to normalized Markdown. Never fails.
    #[tracing::instrument(skip(self, document), fields(title = ?document.title()))]
    #[must_use]
    pub fn render(&self, document: &Document, canonical_url: &str) -> String {
        let ctx = RenderContext::for_document(document, &self.options);
        let lines = ctx.render_page_lines(document, canonical_url);
        normalize_markdown(&lines.join("\n"))
    }

    /// Parse `DocC` JSON and render it.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid JSON.
    pub fn render_str(&self, json: &str, canonical_url: &str) -> Result<String, Error> {
        let document: Document = json.parse()?;
        Ok(self.render(&document, canonical_url))
    }

    /// Render a document and write it to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(
        &self,
        document: &Document,
        canonical_url: &str,
        mut writer: W,
    ) -> Result<(), Error> {
        writer.write_all(self.render(document, canonical_url).as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

/// Render a document to Markdown with default [`Options`].
#[must_use]
pub fn render_document(document: &Document, canonical_url: &str) -> String {
    Processor::default().render(document, canonical_url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_options_builder() {
        assert_eq!(Options::default().base_url(), DEFAULT_BASE_URL);
        let options = Options::builder().base_url("https://example.org").build();
        assert_eq!(options.base_url(), "https://example.org");
        assert_eq!(Options::builder().build().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_applies_to_links() {
        let json = r#"{
            "metadata": {"title": "T"},
            "primaryContentSections": [{"kind": "content", "content": [
                {"type": "paragraph", "inlineContent": [{"type": "reference", "identifier": "doc://a"}]}
            ]}],
            "references": {"doc://a": {"url": "/a", "title": "A"}}
        }"#;
        let processor = Processor::new(Options::builder().base_url("https://docs.example/").build());
        let markdown = processor.render_str(json, "https://docs.example/t").unwrap();
        assert!(markdown.contains("[A](https://docs.example/a)"));
    }

    #[test]
    fn test_render_deserialized_document() {
        let doc: Document = serde_json::from_str(
            r#"{"metadata": {"title": "Menus"}, "sections": [{"content": [
                {"type": "orderedList", "items": [
                    {"content": [{"type": "paragraph", "inlineContent": []}]},
                    {"content": [{"type": "paragraph", "inlineContent": [{"type": "text", "text": "Tap"}]}]}
                ]}
            ]}]}"#,
        )
        .unwrap();
        assert_eq!(
            render_document(&doc, "https://developer.apple.com/design/menus"),
            "# Menus\n\n- Canonical URL: https://developer.apple.com/design/menus\n\n1. Tap\n"
        );
    }

    #[test]
    fn test_render_str_rejects_invalid_json() {
        let result = Processor::default().render_str("not json", "u");
        assert!(matches!(result, Err(Error::Model(docc_model::Error::Json(_)))));
    }

    #[test]
    fn test_write_to() {
        let doc = Document::default();
        let mut output = Vec::new();
        Processor::default().write_to(&doc, "u", &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "# (Untitled)\n\n- Canonical URL: u\n"
        );
    }
}
