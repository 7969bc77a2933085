use serde_json::Value;

use super::value::{self, Object};

/// An `InlineNode` is one run of formatted text inside a paragraph, heading or
/// other inline container.
///
/// The set of kinds is closed. Anything the model does not recognize is kept as
/// [`InlineNode::Unknown`] so that its nested content is still reachable.
#[derive(Clone, Debug, PartialEq)]
pub enum InlineNode {
    /// Plain text (`"type": "text"`).
    Text(String),
    /// Inline code (`"type": "codeVoice"`).
    CodeVoice(String),
    Strong(Vec<InlineNode>),
    Emphasis(Vec<InlineNode>),
    /// A cross-reference to a topic or external URL (`"type": "reference"`).
    Reference(CrossReference),
    /// An inline image (`"type": "image"`).
    Image(InlineImage),
    Unknown(UnknownInline),
    /// A bare JSON scalar found where an inline node was expected.
    Scalar(String),
}

/// A link to another entity, resolved through the document references.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CrossReference {
    pub identifier: Option<String>,
    pub overriding_title: Option<String>,
    pub overriding_title_inline_content: Option<Vec<InlineNode>>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InlineImage {
    pub identifier: Option<String>,
}

/// An inline node of a kind this model does not know about.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnknownInline {
    /// The raw `type` tag, if any.
    pub kind: Option<String>,
    /// Nested `inlineContent`, when the node carries the field.
    pub inline_content: Option<Vec<InlineNode>>,
}

impl InlineNode {
    /// Decode a single inline node from a JSON value. Never fails.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return match value {
                Value::Array(_) => InlineNode::Unknown(UnknownInline {
                    kind: None,
                    inline_content: Some(inlines_from_value(value)),
                }),
                Value::Null
                | Value::Bool(_)
                | Value::Number(_)
                | Value::String(_)
                | Value::Object(_) => {
                    InlineNode::Scalar(value::scalar_to_string(value).unwrap_or_default())
                }
            };
        };

        match value::kind(obj) {
            Some("text") => InlineNode::Text(value::string(obj, "text").unwrap_or_default()),
            Some("codeVoice") => {
                InlineNode::CodeVoice(value::string(obj, "code").unwrap_or_default())
            }
            Some("strong") => InlineNode::Strong(inline_content(obj)),
            Some("emphasis") => InlineNode::Emphasis(inline_content(obj)),
            Some("reference") => InlineNode::Reference(CrossReference {
                identifier: value::non_empty(obj, "identifier"),
                overriding_title: value::non_empty(obj, "overridingTitle"),
                overriding_title_inline_content: obj
                    .get("overridingTitleInlineContent")
                    .map(inlines_from_value)
                    .filter(|nodes| !nodes.is_empty()),
            }),
            Some("image") => InlineNode::Image(InlineImage {
                identifier: value::non_empty(obj, "identifier"),
            }),
            kind => {
                tracing::trace!(?kind, "unrecognized inline node kind");
                InlineNode::Unknown(UnknownInline {
                    kind: kind.map(ToOwned::to_owned),
                    inline_content: obj.get("inlineContent").map(inlines_from_value),
                })
            }
        }
    }

    /// Literal text of the node when it is a plain text run.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let InlineNode::Text(text) = self {
            Some(text)
        } else {
            None
        }
    }
}

/// Decode a sequence of inline nodes.
///
/// Arrays decode element-wise, a lone object decodes as a one-element sequence,
/// and `null` decodes as empty.
#[must_use]
pub fn inlines_from_value(value: &Value) -> Vec<InlineNode> {
    match value {
        Value::Array(items) => items.iter().map(InlineNode::from_value).collect(),
        Value::Null => Vec::new(),
        Value::Object(_) | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            vec![InlineNode::from_value(value)]
        }
    }
}

pub(crate) fn inline_content(obj: &Object) -> Vec<InlineNode> {
    obj.get("inlineContent")
        .map(inlines_from_value)
        .unwrap_or_default()
}
