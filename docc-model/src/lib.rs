//! Typed, lenient model of `DocC` render JSON.
//!
//! `DocC` render JSON describes a documentation page as a tree of typed content
//! blocks plus a table of resolvable references (topics, links, images and
//! videos). This crate turns that JSON into closed Rust enums with explicit
//! fallback arms, so that consumers get exhaustive matching over the known
//! kinds while unknown kinds and malformed fields never fail decoding.
//!
//! # Example
//!
//! ```
//! use docc_model::{Block, Document};
//!
//! let doc: Document = r#"{
//!     "metadata": {"title": "Buttons"},
//!     "primaryContentSections": [
//!         {"kind": "content", "content": [{"type": "heading", "level": 2, "text": "Overview"}]}
//!     ]
//! }"#
//! .parse()?;
//!
//! assert_eq!(doc.title(), Some("Buttons"));
//! let first = doc.primary_content_sections.first().and_then(|s| s.content.first());
//! assert!(matches!(first, Some(Block::Heading(_))));
//! # Ok::<(), docc_model::Error>(())
//! ```

mod error;
mod model;

pub use error::Error;
pub use model::*;
