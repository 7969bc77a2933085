//! The data model for `DocC` render JSON documents.
//!
//! Every type here is decoded leniently from a [`serde_json::Value`]: missing
//! or wrongly-typed fields fall back to defaults and unknown node kinds land in
//! explicit fallback variants. Decoding a value never fails.

use std::{io::Read, str::FromStr};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::Error;

mod blocks;
mod inlines;
mod references;
mod value;

pub use blocks::*;
pub use inlines::*;
pub use references::{Reference, References, Variant};

/// Section kind marking primary content that should be rendered.
pub const CONTENT_SECTION_KIND: &str = "content";

/// A `Document` is one documentation page: page metadata, a reference table,
/// an abstract and the ordered content sections.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub metadata: Metadata,
    pub references: References,
    /// The page summary, as inline text runs.
    pub r#abstract: Vec<InlineNode>,
    pub primary_content_sections: Vec<Section>,
    pub sections: Vec<Section>,
}

/// Page-level facts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metadata {
    pub title: Option<String>,
}

/// A `Section` groups a run of content blocks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Section {
    pub kind: Option<String>,
    pub content: Vec<Block>,
}

impl Section {
    /// Whether this is a primary section holding renderable body content.
    #[must_use]
    pub fn is_content(&self) -> bool {
        self.kind.as_deref() == Some(CONTENT_SECTION_KIND)
    }
}

impl Document {
    /// Decode a document from an already-parsed JSON value.
    ///
    /// Any value decodes; a non-object yields an empty document.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            tracing::warn!("document root is not a JSON object, rendering an empty page");
            return Document::default();
        };

        let metadata = obj
            .get("metadata")
            .and_then(Value::as_object)
            .map(|md| Metadata {
                title: value::non_empty(md, "title"),
            })
            .unwrap_or_default();

        Document {
            metadata,
            references: references::references_from_value(obj.get("references")),
            r#abstract: obj
                .get("abstract")
                .map(inlines_from_value)
                .unwrap_or_default(),
            primary_content_sections: sections(obj, "primaryContentSections"),
            sections: sections(obj, "sections"),
        }
    }

    /// Parse and decode a document from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the input is not valid JSON.
    #[tracing::instrument(skip(reader))]
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let value: Value = serde_json::from_reader(reader)?;
        Ok(Self::from_value(&value))
    }

    /// The page title, if the metadata declares a non-empty one.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.metadata.title.as_deref()
    }

    /// The abstract's plain text runs, concatenated.
    ///
    /// Only `text` runs contribute; formatted or linked runs are skipped.
    #[must_use]
    pub fn abstract_text(&self) -> String {
        self.r#abstract
            .iter()
            .filter_map(InlineNode::as_text)
            .collect()
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(input)?;
        Ok(Self::from_value(&value))
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(|value| Document::from_value(&value))
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(|value| Block::from_value(&value))
    }
}

impl<'de> Deserialize<'de> for InlineNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(|value| InlineNode::from_value(&value))
    }
}

/// Sections that are not objects are skipped.
fn sections(obj: &value::Object, key: &str) -> Vec<Section> {
    value::array(obj, key)
        .iter()
        .filter_map(Value::as_object)
        .map(|section| Section {
            kind: value::non_empty(section, "kind"),
            content: blocks::content(section),
        })
        .collect()
}
