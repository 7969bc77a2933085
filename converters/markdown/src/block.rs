//! Block dispatch: one content block to zero or more Markdown lines.
//!
//! Every renderer returns whole lines, usually ending with an empty line so
//! consecutive blocks stay separated. Container blocks collapse their children
//! through the text flattener; unknown kinds fall back to their nested inline or
//! block content.

use docc_model::{
    Aside, Block, CodeListing, Heading, InlineNode, List, Media, Paragraph, Row, Table,
    UnknownBlock,
};

use crate::{
    context::{MAX_DEPTH, RenderContext},
    flatten::collapse_whitespace,
};

const DEFAULT_ASIDE_NAME: &str = "Note";
const DEFAULT_ASIDE_STYLE: &str = "note";
const ROW_HEADER: &str = "> **Layout (columns)**";

/// Markdown supports six heading levels.
const MAX_HEADING_LEVEL: i64 = 6;

impl RenderContext<'_> {
    /// Render one content block into output lines.
    #[must_use]
    pub fn render_block(&self, block: &Block) -> Vec<String> {
        self.block_at(block, 0)
    }

    fn block_at(&self, block: &Block, depth: usize) -> Vec<String> {
        if depth > MAX_DEPTH {
            tracing::warn!(depth, "block content nested too deeply, truncating");
            return Vec::new();
        }
        match block {
            Block::Heading(heading) => render_heading(heading),
            Block::Paragraph(paragraph) => self.render_paragraph(paragraph, depth),
            Block::UnorderedList(list) => self.render_list(list, false, depth),
            Block::OrderedList(list) => self.render_list(list, true, depth),
            Block::Aside(aside) => self.render_aside(aside, depth),
            Block::CodeListing(listing) => render_code_listing(listing),
            Block::Video(media) => self.render_video(media),
            Block::Row(row) => self.render_row(row, depth),
            Block::Table(table) => self.render_table(table, depth),
            Block::Unknown(unknown) => self.render_unknown(unknown, depth),
            // Block-level images carry no renderable fields of their own
            Block::Image(_) | Block::Scalar(_) => Vec::new(),
        }
    }

    fn render_paragraph(&self, paragraph: &Paragraph, depth: usize) -> Vec<String> {
        if let [InlineNode::Image(image)] = paragraph.inline_content.as_slice() {
            let identifier = image.identifier.as_deref().unwrap_or_default();
            if let Some(url) = self.resolve_media(identifier) {
                let alt = self.media_alt(identifier);
                return vec![format!("![{alt}]({url})"), String::new()];
            }
            tracing::debug!(identifier, "image paragraph without a resolvable variant");
        }

        let text = self.inlines_at(&paragraph.inline_content, depth + 1);
        let text = text.trim();
        if text.is_empty() {
            vec![String::new()]
        } else {
            vec![text.to_string(), String::new()]
        }
    }

    /// Items that flatten to nothing are dropped; ordered numbering counts only
    /// the emitted items.
    fn render_list(&self, list: &List, ordered: bool, depth: usize) -> Vec<String> {
        let mut lines: Vec<String> = list
            .items
            .iter()
            .map(|item| self.flatten_blocks_at(&item.content, depth + 1))
            .filter(|text| !text.is_empty())
            .enumerate()
            .map(|(idx, text)| {
                if ordered {
                    format!("{}. {text}", idx + 1)
                } else {
                    format!("- {text}")
                }
            })
            .collect();
        lines.push(String::new());
        lines
    }

    fn render_aside(&self, aside: &Aside, depth: usize) -> Vec<String> {
        let name = aside.name.as_deref().unwrap_or(DEFAULT_ASIDE_NAME);
        let style = aside
            .style
            .as_deref()
            .unwrap_or(DEFAULT_ASIDE_STYLE)
            .to_lowercase();
        let prefix = if style == "tip" { "TIP" } else { "NOTE" };

        let mut lines = vec![format!("> **{prefix}: {name}**")];
        lines.extend(
            aside
                .content
                .iter()
                .map(|child| match child {
                    Block::Paragraph(paragraph) => self
                        .inlines_at(&paragraph.inline_content, depth + 1)
                        .trim()
                        .to_string(),
                    Block::Heading(_)
                    | Block::UnorderedList(_)
                    | Block::OrderedList(_)
                    | Block::Aside(_)
                    | Block::CodeListing(_)
                    | Block::Image(_)
                    | Block::Video(_)
                    | Block::Row(_)
                    | Block::Table(_)
                    | Block::Unknown(_)
                    | Block::Scalar(_) => self.flatten_at(child, depth + 1),
                })
                .filter(|part| !part.is_empty())
                .map(|part| format!("> {part}")),
        );
        lines.push(String::new());
        lines
    }

    fn render_video(&self, media: &Media) -> Vec<String> {
        let Some(identifier) = media.identifier.as_deref() else {
            return vec!["[video]".to_string(), String::new()];
        };
        let line = match self.resolve_media(identifier) {
            Some(url) => {
                let alt = self.media_alt(identifier);
                let label = if alt.is_empty() { identifier } else { &alt };
                format!("[{label}]({url})")
            }
            None => format!("[{identifier}]"),
        };
        vec![line, String::new()]
    }

    /// Multi-column layouts are simplified to a quoted list of columns.
    fn render_row(&self, row: &Row, depth: usize) -> Vec<String> {
        let mut lines = vec![ROW_HEADER.to_string()];
        for (idx, column) in row.columns.iter().enumerate() {
            let text = collapse_whitespace(&self.flatten_blocks_at(&column.content, depth + 1));
            if !text.is_empty() {
                lines.push(format!("> - Col {}: {text}", idx + 1));
            }
        }
        lines.push(String::new());
        lines
    }

    fn render_table(&self, table: &Table, depth: usize) -> Vec<String> {
        let rows: Vec<Vec<String>> = table
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| collapse_whitespace(&self.flatten_blocks_at(cell, depth + 1)))
                    .collect()
            })
            .collect();

        let Some((first, rest)) = rows.split_first() else {
            return Vec::new();
        };
        let (header, body) = if table.has_header_row() {
            (first.clone(), rest)
        } else {
            let synthesized: Vec<String> =
                (1..=first.len()).map(|n| format!("Column {n}")).collect();
            (synthesized, rows.as_slice())
        };
        if header.is_empty() {
            tracing::debug!("table without columns, skipping");
            return Vec::new();
        }

        let mut lines = Vec::with_capacity(body.len() + 3);
        lines.push(table_row(&header));
        lines.push(table_row(&vec!["---".to_string(); header.len()]));
        lines.extend(body.iter().map(|row| table_row(row)));
        lines.push(String::new());
        lines
    }

    fn render_unknown(&self, unknown: &UnknownBlock, depth: usize) -> Vec<String> {
        tracing::trace!(kind = ?unknown.kind, "rendering unrecognized block through fallback");
        if let Some(inline) = &unknown.inline_content {
            let text = self.inlines_at(inline, depth + 1);
            let text = text.trim();
            if text.is_empty() {
                Vec::new()
            } else {
                vec![text.to_string(), String::new()]
            }
        } else if let Some(content) = &unknown.content {
            content
                .iter()
                .flat_map(|child| self.block_at(child, depth + 1))
                .collect()
        } else {
            Vec::new()
        }
    }
}

fn render_heading(heading: &Heading) -> Vec<String> {
    let level = heading.level.clamp(1, MAX_HEADING_LEVEL);
    let hashes = "#".repeat(usize::try_from(level).unwrap_or(1));
    vec![format!("{hashes} {}", heading.text), String::new()]
}

/// Code is passed through verbatim; the fence keeps it out of Markdown parsing.
fn render_code_listing(listing: &CodeListing) -> Vec<String> {
    let syntax = listing.syntax.as_deref().unwrap_or_default().trim();
    vec![
        format!("```{syntax}"),
        listing.code.trim_end().to_string(),
        "```".to_string(),
        String::new(),
    ]
}

fn table_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

#[cfg(test)]
mod tests {
    use docc_model::{Column, InlineImage, ListItem, Reference, References, Variant};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::DEFAULT_BASE_URL;

    fn text(s: &str) -> InlineNode {
        InlineNode::Text(s.to_string())
    }

    fn para(s: &str) -> Block {
        Block::Paragraph(Paragraph {
            inline_content: vec![text(s)],
        })
    }

    fn items(texts: &[&str]) -> List {
        List {
            items: texts
                .iter()
                .map(|t| ListItem {
                    content: vec![para(t)],
                })
                .collect(),
        }
    }

    fn media_refs() -> References {
        [
            (
                "hero".to_string(),
                Reference {
                    alt: Some("Buttons in a toolbar".to_string()),
                    variants: vec![
                        Variant {
                            traits: vec!["1x".to_string(), "light".to_string()],
                            url: Some("https://cdn.example/hero.png".to_string()),
                        },
                        Variant {
                            traits: vec!["2x".to_string(), "light".to_string()],
                            url: Some("https://cdn.example/hero@2x.png".to_string()),
                        },
                    ],
                    ..Reference::default()
                },
            ),
            (
                "clip".to_string(),
                Reference {
                    variants: vec![Variant {
                        traits: vec![],
                        url: Some("https://cdn.example/clip.mp4".to_string()),
                    }],
                    ..Reference::default()
                },
            ),
        ]
        .into_iter()
        .collect()
    }

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_heading_levels_are_clamped() {
        let refs = References::default();
        let ctx = RenderContext::new(&refs, DEFAULT_BASE_URL);
        let heading = |level| {
            Block::Heading(Heading {
                level,
                text: "Title".to_string(),
            })
        };
        assert_eq!(ctx.render_block(&heading(0)), lines(&["# Title", ""]));
        assert_eq!(ctx.render_block(&heading(3)), lines(&["### Title", ""]));
        assert_eq!(ctx.render_block(&heading(9)), lines(&["###### Title", ""]));
    }

    #[test]
    fn test_paragraph() {
        let refs = References::default();
        let ctx = RenderContext::new(&refs, DEFAULT_BASE_URL);
        assert_eq!(ctx.render_block(&para("  Hello  ")), lines(&["Hello", ""]));
        assert_eq!(ctx.render_block(&para("   ")), lines(&[""]));
    }

    #[test]
    fn test_image_paragraph() {
        let refs = media_refs();
        let ctx = RenderContext::new(&refs, DEFAULT_BASE_URL);
        let image = |id: &str| {
            Block::Paragraph(Paragraph {
                inline_content: vec![InlineNode::Image(InlineImage {
                    identifier: Some(id.to_string()),
                })],
            })
        };
        assert_eq!(
            ctx.render_block(&image("hero")),
            lines(&["![Buttons in a toolbar](https://cdn.example/hero@2x.png)", ""])
        );
        // Unresolvable images fall back to (empty) prose
        assert_eq!(ctx.render_block(&image("missing")), lines(&[""]));
    }

    #[test]
    fn test_unordered_list_drops_empty_items() {
        let refs = References::default();
        let ctx = RenderContext::new(&refs, DEFAULT_BASE_URL);
        let list = Block::UnorderedList(items(&["Tap", "", "Swipe"]));
        assert_eq!(ctx.render_block(&list), lines(&["- Tap", "- Swipe", ""]));
    }

    #[test]
    fn test_ordered_list_renumbers_emitted_items() {
        let refs = References::default();
        let ctx = RenderContext::new(&refs, DEFAULT_BASE_URL);
        let list = Block::OrderedList(items(&["", "Tap", ""]));
        assert_eq!(ctx.render_block(&list), lines(&["1. Tap", ""]));

        let list = Block::OrderedList(items(&["One", "", "Two"]));
        assert_eq!(ctx.render_block(&list), lines(&["1. One", "2. Two", ""]));
    }

    #[test]
    fn test_aside() {
        let refs = References::default();
        let ctx = RenderContext::new(&refs, DEFAULT_BASE_URL);
        let tip = Block::Aside(Aside {
            name: Some("Tip".to_string()),
            style: Some("TIP".to_string()),
            content: vec![
                para(" Prefer short labels. "),
                para(""),
                Block::UnorderedList(items(&["One", "Two"])),
            ],
        });
        assert_eq!(
            ctx.render_block(&tip),
            lines(&["> **TIP: Tip**", "> Prefer short labels.", "> One; Two", ""])
        );

        let important = Block::Aside(Aside {
            name: Some("Important".to_string()),
            style: Some("important".to_string()),
            content: vec![para("Read this.")],
        });
        assert_eq!(
            ctx.render_block(&important),
            lines(&["> **NOTE: Important**", "> Read this.", ""])
        );

        let bare = Block::Aside(Aside::default());
        assert_eq!(ctx.render_block(&bare), lines(&["> **NOTE: Note**", ""]));
    }

    #[test]
    fn test_code_listing() {
        let refs = References::default();
        let ctx = RenderContext::new(&refs, DEFAULT_BASE_URL);
        let listing = Block::CodeListing(CodeListing {
            syntax: Some(" swift ".to_string()),
            code: "let a = [1, 2]\n*not emphasis*\n\n".to_string(),
        });
        assert_eq!(
            ctx.render_block(&listing),
            lines(&["```swift", "let a = [1, 2]\n*not emphasis*", "```", ""])
        );
        let untagged = Block::CodeListing(CodeListing::default());
        assert_eq!(ctx.render_block(&untagged), lines(&["```", "", "```", ""]));
    }

    #[test]
    fn test_video() {
        let refs = media_refs();
        let ctx = RenderContext::new(&refs, DEFAULT_BASE_URL);
        let video = |id: Option<&str>| {
            Block::Video(Media {
                identifier: id.map(ToString::to_string),
            })
        };
        assert_eq!(
            ctx.render_block(&video(Some("clip"))),
            lines(&["[clip](https://cdn.example/clip.mp4)", ""])
        );
        assert_eq!(
            ctx.render_block(&video(Some("hero"))),
            lines(&["[Buttons in a toolbar](https://cdn.example/hero@2x.png)", ""])
        );
        assert_eq!(ctx.render_block(&video(Some("gone"))), lines(&["[gone]", ""]));
        assert_eq!(ctx.render_block(&video(None)), lines(&["[video]", ""]));
    }

    #[test]
    fn test_row_keeps_column_positions() {
        let refs = References::default();
        let ctx = RenderContext::new(&refs, DEFAULT_BASE_URL);
        let row = Block::Row(Row {
            columns: vec![
                Column {
                    content: vec![para("Left\n  side")],
                },
                Column { content: vec![] },
                Column {
                    content: vec![para("Right")],
                },
            ],
        });
        assert_eq!(
            ctx.render_block(&row),
            lines(&[
                "> **Layout (columns)**",
                "> - Col 1: Left side",
                "> - Col 3: Right",
                "",
            ])
        );
    }

    #[test]
    fn test_table_without_header_row() {
        let refs = References::default();
        let ctx = RenderContext::new(&refs, DEFAULT_BASE_URL);
        let table = Block::Table(Table {
            header: None,
            rows: vec![vec![vec![para("A")], vec![para("B")]]],
        });
        assert_eq!(
            ctx.render_block(&table),
            lines(&["| Column 1 | Column 2 |", "| --- | --- |", "| A | B |", ""])
        );
    }

    #[test]
    fn test_table_with_header_row() {
        let refs = References::default();
        let ctx = RenderContext::new(&refs, DEFAULT_BASE_URL);
        let table = Block::Table(Table {
            header: Some("row".to_string()),
            rows: vec![
                vec![vec![para("Name")], vec![para("Use")]],
                vec![
                    vec![para("Filled")],
                    vec![para("Primary\n action"), para("only")],
                ],
                vec![vec![Block::Table(Table::default())], vec![]],
            ],
        });
        assert_eq!(
            ctx.render_block(&table),
            lines(&[
                "| Name | Use |",
                "| --- | --- |",
                "| Filled | Primary action only |",
                "| [table] |  |",
                "",
            ])
        );
    }

    #[test]
    fn test_empty_tables_render_nothing() {
        let refs = References::default();
        let ctx = RenderContext::new(&refs, DEFAULT_BASE_URL);
        assert!(ctx.render_block(&Block::Table(Table::default())).is_empty());
        let no_columns = Block::Table(Table {
            header: None,
            rows: vec![vec![]],
        });
        assert!(ctx.render_block(&no_columns).is_empty());
    }

    #[test]
    fn test_unknown_block_with_inline_matches_paragraph() {
        let refs = References::default();
        let ctx = RenderContext::new(&refs, DEFAULT_BASE_URL);
        let inline = vec![text("Some "), InlineNode::Strong(vec![text("text")])];
        let unknown = Block::Unknown(UnknownBlock {
            kind: Some("callout".to_string()),
            inline_content: Some(inline.clone()),
            content: None,
        });
        let paragraph = Block::Paragraph(Paragraph {
            inline_content: inline,
        });
        assert_eq!(ctx.render_block(&unknown), ctx.render_block(&paragraph));
    }

    #[test]
    fn test_unknown_block_recurses_into_content() {
        let refs = References::default();
        let ctx = RenderContext::new(&refs, DEFAULT_BASE_URL);
        let unknown = Block::Unknown(UnknownBlock {
            kind: Some("tabNavigator".to_string()),
            inline_content: None,
            content: Some(vec![
                para("First"),
                Block::Scalar("ignored".to_string()),
                Block::Heading(Heading {
                    level: 2,
                    text: "Second".to_string(),
                }),
            ]),
        });
        assert_eq!(
            ctx.render_block(&unknown),
            lines(&["First", "", "## Second", ""])
        );
    }

    #[test]
    fn test_unknown_block_without_content() {
        let refs = References::default();
        let ctx = RenderContext::new(&refs, DEFAULT_BASE_URL);
        let empty_inline = Block::Unknown(UnknownBlock {
            kind: Some("x".to_string()),
            inline_content: Some(vec![text("  ")]),
            content: None,
        });
        assert!(ctx.render_block(&empty_inline).is_empty());
        assert!(ctx.render_block(&Block::Unknown(UnknownBlock::default())).is_empty());
        assert!(ctx.render_block(&Block::Image(Media::default())).is_empty());
    }
}
