//! Read-only lookup context shared by every rendering call.
//!
//! A [`RenderContext`] wraps a document's reference table and the site origin.
//! It resolves topic identifiers to absolute URLs, picks one rendition among a
//! media reference's variants, and exposes media alt text. All lookups are pure.

use std::cmp::Reverse;

use docc_model::{Document, Reference, References, Variant};

use crate::Options;

/// Maximum nesting depth the renderers descend into. Deeper content is dropped.
pub const MAX_DEPTH: usize = 64;

/// Shared, immutable state for one render pass.
#[derive(Clone, Copy, Debug)]
pub struct RenderContext<'a> {
    references: &'a References,
    base_url: &'a str,
}

impl<'a> RenderContext<'a> {
    /// Create a context over a reference table, resolving site-relative paths
    /// against `base_url`.
    #[must_use]
    pub fn new(references: &'a References, base_url: &'a str) -> Self {
        Self {
            references,
            base_url: base_url.trim_end_matches('/'),
        }
    }

    /// Create a context for a document using the converter options.
    #[must_use]
    pub fn for_document(document: &'a Document, options: &'a Options) -> Self {
        Self::new(&document.references, options.base_url())
    }

    /// Look up a reference by identifier.
    #[must_use]
    pub fn reference(&self, identifier: &str) -> Option<&'a Reference> {
        self.references.get(identifier)
    }

    /// Resolve a link target to an absolute URL.
    ///
    /// Absolute `http(s)` identifiers pass through unchanged. Anything else is
    /// looked up in the reference table and the reference's `url` is made
    /// absolute. Returns `None` when there is nothing to link to.
    #[must_use]
    pub fn resolve_link(&self, identifier: &str) -> Option<String> {
        if identifier.is_empty() {
            return None;
        }
        if is_absolute(identifier) {
            return Some(identifier.to_string());
        }
        let resolved = self
            .reference(identifier)
            .and_then(|reference| reference.url.as_deref())
            .map(|url| self.absolute_url(url));
        if resolved.is_none() {
            tracing::debug!(identifier, "unresolved link reference");
        }
        resolved
    }

    /// Resolve a media identifier to the URL of its preferred variant.
    ///
    /// Variants tagged `2x` outrank the rest, then variants tagged `light`.
    /// Among equally ranked variants the first declared wins.
    #[must_use]
    pub fn resolve_media(&self, identifier: &str) -> Option<String> {
        let variant = self
            .reference(identifier)?
            .variants
            .iter()
            .min_by_key(|variant| Reverse(variant_score(variant)))?;
        variant.url.clone()
    }

    /// The media reference's alt text, or an empty string.
    #[must_use]
    pub fn media_alt(&self, identifier: &str) -> String {
        self.reference(identifier)
            .and_then(|reference| reference.alt.clone())
            .unwrap_or_default()
    }

    /// Make a site-relative path absolute against the base origin.
    ///
    /// Absolute URLs and values that are neither absolute nor rooted are
    /// returned unchanged.
    #[must_use]
    pub fn absolute_url(&self, path: &str) -> String {
        if is_absolute(path) {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            path.to_string()
        }
    }
}

/// Whether `target` is an absolute `http` or `https` URL.
#[must_use]
pub fn is_absolute(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

fn variant_score(variant: &Variant) -> u8 {
    let mut score = 0;
    if variant.has_trait("2x") {
        score += 2;
    }
    if variant.has_trait("light") {
        score += 1;
    }
    score
}
