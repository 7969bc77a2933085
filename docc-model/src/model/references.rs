use rustc_hash::FxHashMap;
use serde_json::Value;

use super::value::{self, Object};

/// Lookup table from opaque identifier to [`Reference`].
pub type References = FxHashMap<String, Reference>;

/// One resolvable entity: a topic, an external link, or a media asset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reference {
    /// Absolute URL or site-relative path.
    pub url: Option<String>,
    pub title: Option<String>,
    /// Media description.
    pub alt: Option<String>,
    /// Candidate renditions, in declaration order. Media only.
    pub variants: Vec<Variant>,
}

/// One rendition of a media asset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Variant {
    /// Descriptive tags such as `"2x"`, `"light"` or `"dark"`.
    pub traits: Vec<String>,
    pub url: Option<String>,
}

impl Variant {
    #[must_use]
    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.iter().any(|t| t == name)
    }

    fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Variant::default();
        };
        Variant {
            traits: value::array(obj, "traits")
                .iter()
                .filter_map(value::scalar_to_string)
                .collect(),
            url: value::non_empty(obj, "url"),
        }
    }
}

impl Reference {
    pub(crate) fn from_object(obj: &Object) -> Self {
        Reference {
            url: value::non_empty(obj, "url"),
            title: value::non_empty(obj, "title"),
            alt: value::non_empty(obj, "alt"),
            variants: value::array(obj, "variants")
                .iter()
                .map(Variant::from_value)
                .collect(),
        }
    }
}

/// Decode the `references` table. Entries whose value is not an object are
/// skipped, so lookups for them fall back like any other missing reference.
pub(crate) fn references_from_value(value: Option<&Value>) -> References {
    let Some(entries) = value.and_then(Value::as_object) else {
        return References::default();
    };
    entries
        .iter()
        .filter_map(|(identifier, entry)| {
            let reference = Reference::from_object(entry.as_object()?);
            Some((identifier.clone(), reference))
        })
        .collect()
}
