//! Page assembly and final whitespace normalization.

use docc_model::Document;

use crate::context::RenderContext;

/// Title used when the document metadata has none.
pub const UNTITLED: &str = "(Untitled)";

/// Longest run of consecutive blank lines kept in the output.
const MAX_BLANK_RUN: usize = 2;

impl RenderContext<'_> {
    /// Render a whole page into un-normalized output lines.
    ///
    /// Emits the title, the canonical URL line and the abstract, then every
    /// block of the primary `content` sections followed by every block of the
    /// secondary sections, in document order.
    #[must_use]
    pub fn render_page_lines(&self, document: &Document, canonical_url: &str) -> Vec<String> {
        let title = document.title().unwrap_or(UNTITLED);
        let mut lines = vec![
            format!("# {title}"),
            String::new(),
            format!("- Canonical URL: {canonical_url}"),
            String::new(),
        ];

        let summary = document.abstract_text();
        let summary = summary.trim();
        if !summary.is_empty() {
            lines.push(summary.to_string());
            lines.push(String::new());
        }

        let primary = document
            .primary_content_sections
            .iter()
            .filter(|section| section.is_content());
        for section in primary.chain(&document.sections) {
            for block in &section.content {
                lines.extend(self.render_block(block));
            }
        }
        lines
    }
}

/// Normalize rendered Markdown.
///
/// Whitespace-only lines become empty, runs of more than two blank lines are
/// collapsed to two, non-blank lines lose trailing whitespace, the whole text is
/// trimmed and exactly one trailing newline is appended. Applying it twice is
/// the same as applying it once.
///
/// Fenced code is not exempt: blank runs and trailing spaces inside code
/// listings are normalized like any other text.
#[must_use]
pub fn normalize_markdown(text: &str) -> String {
    let mut cleaned: Vec<&str> = Vec::new();
    let mut blank_run = 0;
    for line in text.split('\n') {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run <= MAX_BLANK_RUN {
                cleaned.push("");
            }
        } else {
            blank_run = 0;
            cleaned.push(line.trim_end());
        }
    }

    let mut output = cleaned.join("\n").trim().to_string();
    output.push('\n');
    output
}
