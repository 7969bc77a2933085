use serde_json::Value;

use super::{
    inlines::{InlineNode, inline_content, inlines_from_value},
    value::{self, Object},
};

/// Heading level used when a heading does not declare one.
pub const DEFAULT_HEADING_LEVEL: i64 = 2;

/// A `Block` is one node of a page's body content tree.
///
/// Container kinds (lists, asides, rows, tables) hold further blocks. Kinds the
/// model does not recognize decode to [`Block::Unknown`], which keeps whatever
/// nested `inlineContent` and `content` the node carried.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
    UnorderedList(List),
    OrderedList(List),
    /// A callout such as a note or tip (`"type": "aside"`).
    Aside(Aside),
    CodeListing(CodeListing),
    Image(Media),
    Video(Media),
    /// A multi-column layout (`"type": "row"`).
    Row(Row),
    Table(Table),
    Unknown(UnknownBlock),
    /// A bare JSON scalar found where a block was expected.
    Scalar(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Heading {
    /// The declared level, unclamped.
    pub level: i64,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Paragraph {
    pub inline_content: Vec<InlineNode>,
}

/// An ordered or unordered list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct List {
    pub items: Vec<ListItem>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListItem {
    pub content: Vec<Block>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Aside {
    /// Display name, e.g. `"Important"`.
    pub name: Option<String>,
    /// Style tag, e.g. `"note"` or `"tip"`, as written in the source.
    pub style: Option<String>,
    pub content: Vec<Block>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CodeListing {
    pub syntax: Option<String>,
    /// The listing text. Sources that send `code` as an array of lines are
    /// joined with `\n`.
    pub code: String,
}

/// A block-level image or video pointing at a media reference.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Media {
    pub identifier: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    pub columns: Vec<Column>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Column {
    pub content: Vec<Block>,
}

/// One table cell: the blocks it contains.
pub type TableCell = Vec<Block>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    /// Header mode. `Some("row")` marks the first row as the header row.
    pub header: Option<String>,
    pub rows: Vec<Vec<TableCell>>,
}

impl Table {
    /// Whether the first row is declared as the header row.
    #[must_use]
    pub fn has_header_row(&self) -> bool {
        self.header.as_deref() == Some("row")
    }
}

/// A block of a kind this model does not know about.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnknownBlock {
    /// The raw `type` tag, if any.
    pub kind: Option<String>,
    /// Nested `inlineContent`, when the node carries the field.
    pub inline_content: Option<Vec<InlineNode>>,
    /// Nested `content`, when the node carries the field.
    pub content: Option<Vec<Block>>,
}

impl Block {
    /// Decode a block from a JSON value. Never fails.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return match value {
                Value::Array(_) => Block::Unknown(UnknownBlock {
                    kind: None,
                    inline_content: None,
                    content: Some(blocks_from_value(value)),
                }),
                Value::Null
                | Value::Bool(_)
                | Value::Number(_)
                | Value::String(_)
                | Value::Object(_) => {
                    Block::Scalar(value::scalar_to_string(value).unwrap_or_default())
                }
            };
        };

        match value::kind(obj) {
            Some("heading") => Block::Heading(Heading {
                level: value::integer(obj, "level").unwrap_or(DEFAULT_HEADING_LEVEL),
                text: value::string(obj, "text").unwrap_or_default(),
            }),
            Some("paragraph") => Block::Paragraph(Paragraph {
                inline_content: inline_content(obj),
            }),
            Some("unorderedList") => Block::UnorderedList(List::from_object(obj)),
            Some("orderedList") => Block::OrderedList(List::from_object(obj)),
            Some("aside") => Block::Aside(Aside {
                name: value::non_empty(obj, "name"),
                style: value::non_empty(obj, "style"),
                content: content(obj),
            }),
            Some("codeListing") => Block::CodeListing(CodeListing {
                syntax: value::string(obj, "syntax"),
                code: code_text(obj.get("code")),
            }),
            Some("image") => Block::Image(Media::from_object(obj)),
            Some("video") => Block::Video(Media::from_object(obj)),
            Some("row") => Block::Row(Row {
                columns: value::array(obj, "columns")
                    .iter()
                    .map(|column| Column {
                        content: column.as_object().map(content).unwrap_or_default(),
                    })
                    .collect(),
            }),
            Some("table") => Block::Table(Table {
                header: value::string(obj, "header"),
                rows: value::array(obj, "rows")
                    .iter()
                    .map(|row| {
                        row.as_array()
                            .map(|cells| cells.iter().map(blocks_from_value).collect())
                            .unwrap_or_default()
                    })
                    .collect(),
            }),
            kind => {
                tracing::trace!(?kind, "unrecognized block kind");
                Block::Unknown(UnknownBlock {
                    kind: kind.map(ToOwned::to_owned),
                    inline_content: obj.get("inlineContent").map(inlines_from_value),
                    content: obj.get("content").map(blocks_from_value),
                })
            }
        }
    }

    /// The wire name of this block's kind, if it has one.
    #[must_use]
    pub fn kind_name(&self) -> Option<&str> {
        match self {
            Block::Heading(_) => Some("heading"),
            Block::Paragraph(_) => Some("paragraph"),
            Block::UnorderedList(_) => Some("unorderedList"),
            Block::OrderedList(_) => Some("orderedList"),
            Block::Aside(_) => Some("aside"),
            Block::CodeListing(_) => Some("codeListing"),
            Block::Image(_) => Some("image"),
            Block::Video(_) => Some("video"),
            Block::Row(_) => Some("row"),
            Block::Table(_) => Some("table"),
            Block::Unknown(unknown) => unknown.kind.as_deref(),
            Block::Scalar(_) => None,
        }
    }
}

impl List {
    fn from_object(obj: &Object) -> Self {
        List {
            items: value::array(obj, "items")
                .iter()
                .map(|item| ListItem {
                    content: item.as_object().map(content).unwrap_or_default(),
                })
                .collect(),
        }
    }
}

impl Media {
    fn from_object(obj: &Object) -> Self {
        Media {
            identifier: value::non_empty(obj, "identifier"),
        }
    }
}

/// Decode a sequence of blocks.
///
/// Arrays decode element-wise, a lone object decodes as a one-element sequence,
/// and `null` decodes as empty.
#[must_use]
pub fn blocks_from_value(value: &Value) -> Vec<Block> {
    match value {
        Value::Array(items) => items.iter().map(Block::from_value).collect(),
        Value::Null => Vec::new(),
        Value::Object(_) | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            vec![Block::from_value(value)]
        }
    }
}

pub(crate) fn content(obj: &Object) -> Vec<Block> {
    obj.get("content").map(blocks_from_value).unwrap_or_default()
}

fn code_text(code: Option<&Value>) -> String {
    match code {
        Some(Value::Array(lines)) => lines
            .iter()
            .map(|line| value::scalar_to_string(line).unwrap_or_default())
            .collect::<Vec<_>>()
            .join("\n"),
        Some(other) => value::scalar_to_string(other).unwrap_or_default(),
        None => String::new(),
    }
}
