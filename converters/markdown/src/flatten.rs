//! Collapse nested block content into a single line of text.
//!
//! Used wherever a block has to fit a one-line slot: list items, table cells
//! and row columns.

use docc_model::{Block, List};

use crate::context::{MAX_DEPTH, RenderContext};

/// Placeholder emitted for tables nested inside a one-line slot.
pub const TABLE_PLACEHOLDER: &str = "[table]";

impl RenderContext<'_> {
    /// Flatten one block to plain text.
    #[must_use]
    pub fn flatten_to_text(&self, block: &Block) -> String {
        self.flatten_at(block, 0)
    }

    /// Flatten a sequence of blocks, joining the non-empty results with a space.
    #[must_use]
    pub fn flatten_blocks(&self, blocks: &[Block]) -> String {
        self.flatten_blocks_at(blocks, 0)
    }

    pub(crate) fn flatten_blocks_at(&self, blocks: &[Block], depth: usize) -> String {
        blocks
            .iter()
            .map(|block| self.flatten_at(block, depth))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn flatten_at(&self, block: &Block, depth: usize) -> String {
        if depth > MAX_DEPTH {
            tracing::warn!(depth, "block content nested too deeply, truncating");
            return String::new();
        }
        let next = depth + 1;
        match block {
            Block::Paragraph(paragraph) => self
                .inlines_at(&paragraph.inline_content, next)
                .trim()
                .to_string(),
            Block::Heading(heading) => heading.text.trim().to_string(),
            Block::UnorderedList(list) | Block::OrderedList(list) => self.flatten_list(list, next),
            Block::Aside(aside) => self.flatten_blocks_at(&aside.content, next),
            Block::Row(row) => row
                .columns
                .iter()
                .map(|column| self.flatten_blocks_at(&column.content, next))
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join(" | "),
            Block::Table(_) => TABLE_PLACEHOLDER.to_string(),
            Block::Image(media) | Block::Video(media) => media
                .identifier
                .as_deref()
                .or_else(|| block.kind_name())
                .unwrap_or_default()
                .to_string(),
            Block::CodeListing(_) => String::new(),
            Block::Unknown(unknown) => {
                if let Some(content) = &unknown.content {
                    self.flatten_blocks_at(content, next)
                } else if let Some(inline) = &unknown.inline_content {
                    self.inlines_at(inline, next).trim().to_string()
                } else {
                    String::new()
                }
            }
            Block::Scalar(text) => text.trim().to_string(),
        }
    }

    fn flatten_list(&self, list: &List, depth: usize) -> String {
        list.items
            .iter()
            .map(|item| self.flatten_blocks_at(&item.content, depth))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Collapse every whitespace run to one space and trim the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
