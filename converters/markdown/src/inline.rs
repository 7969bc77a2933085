//! Inline content to Markdown fragments.

use docc_model::{CrossReference, InlineNode};

use crate::context::{MAX_DEPTH, RenderContext};

/// Title used for a cross-reference when nothing better is known.
const FALLBACK_REFERENCE_TITLE: &str = "reference";

impl RenderContext<'_> {
    /// Render a sequence of inline nodes, concatenated without separators.
    #[must_use]
    pub fn render_inlines(&self, nodes: &[InlineNode]) -> String {
        self.inlines_at(nodes, 0)
    }

    /// Render one inline node.
    #[must_use]
    pub fn render_inline(&self, node: &InlineNode) -> String {
        self.inline_at(node, 0)
    }

    pub(crate) fn inlines_at(&self, nodes: &[InlineNode], depth: usize) -> String {
        nodes
            .iter()
            .map(|node| self.inline_at(node, depth))
            .collect()
    }

    fn inline_at(&self, node: &InlineNode, depth: usize) -> String {
        if depth > MAX_DEPTH {
            tracing::warn!(depth, "inline content nested too deeply, truncating");
            return String::new();
        }
        match node {
            InlineNode::Text(text) | InlineNode::Scalar(text) => text.clone(),
            InlineNode::CodeVoice(code) => {
                if code.is_empty() {
                    String::new()
                } else {
                    format!("`{code}`")
                }
            }
            InlineNode::Strong(inner) => format!("**{}**", self.inlines_at(inner, depth + 1)),
            InlineNode::Emphasis(inner) => format!("*{}*", self.inlines_at(inner, depth + 1)),
            InlineNode::Reference(xref) => self.cross_reference(xref, depth),
            InlineNode::Image(image) => {
                // Images only render at paragraph level
                tracing::trace!(identifier = ?image.identifier, "skipping inline image");
                String::new()
            }
            InlineNode::Unknown(unknown) => unknown
                .inline_content
                .as_deref()
                .map(|inner| self.inlines_at(inner, depth + 1))
                .unwrap_or_default(),
        }
    }

    fn cross_reference(&self, xref: &CrossReference, depth: usize) -> String {
        let identifier = xref.identifier.as_deref();

        let title = xref
            .overriding_title
            .clone()
            .or_else(|| {
                xref.overriding_title_inline_content
                    .as_deref()
                    .map(|inner| self.inlines_at(inner, depth + 1).trim().to_string())
                    .filter(|title| !title.is_empty())
            })
            .or_else(|| {
                identifier
                    .and_then(|id| self.reference(id))
                    .and_then(|reference| reference.title.clone())
            })
            .or_else(|| identifier.map(ToOwned::to_owned))
            .unwrap_or_else(|| FALLBACK_REFERENCE_TITLE.to_string());

        let url = identifier
            .and_then(|id| self.resolve_link(id))
            .or_else(|| identifier.map(ToOwned::to_owned))
            .unwrap_or_default();

        format!("[{title}]({url})")
    }
}
