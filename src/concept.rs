//! Thesaurus concept structures.
//!
//! This module provides the core vocabulary types:
//! - [`Concept`] — one thesaurus entry with labels, types, and relations
//! - [`ConceptType`] — the closed set of semantic types driving MARC field selection
//!
//! Concepts deserialize directly from the JSON collection format:
//!
//! ```ignore
//! let concept: Concept = serde_json::from_str(r#"{
//!     "id": "REAL002121",
//!     "type": ["Topic"],
//!     "prefLabel": {"nb": "Optimering", "en": "Optimization"},
//!     "broader": ["REAL000023"]
//! }"#)?;
//! ```

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Semantic type of a concept.
///
/// The type determines which MARC21 heading and tracing tags a concept maps
/// to. `CompoundHeading` marks a heading assembled from component concepts;
/// `VirtualCompoundHeading` marks a compound used only for internal grouping,
/// which never becomes an authority record of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConceptType {
    /// Topical term (150).
    Topic,
    /// Chronological term (148).
    Temporal,
    /// Geographic name (151).
    Geographic,
    /// Genre/form term (155).
    GenreForm,
    /// Heading built from multiple component concepts.
    CompoundHeading,
    /// Compound used only as an internal grouping node.
    VirtualCompoundHeading,
}

impl ConceptType {
    /// Whether this type marks a compound heading (real or virtual).
    #[must_use]
    pub fn is_compound(self) -> bool {
        matches!(
            self,
            ConceptType::CompoundHeading | ConceptType::VirtualCompoundHeading
        )
    }
}

/// A single thesaurus concept.
///
/// Concepts are immutable inputs for the duration of a transcoding pass.
/// Label maps preserve insertion order so that saved collections round-trip
/// byte-for-byte.
///
/// The `narrower` relation is deliberately absent: it is derived from
/// `broader` by the transcoder, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    /// Stable identifier, unique within a collection.
    pub id: String,

    /// Declared semantic types, in priority order. Never empty in valid data.
    #[serde(rename = "type")]
    pub types: Vec<ConceptType>,

    /// Preferred label per language code.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub pref_label: IndexMap<String, String>,

    /// Alternate labels per language code.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub alt_label: IndexMap<String, Vec<String>>,

    /// Acronyms for the preferred label.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acronym: Vec<String>,

    /// Component concept ids, present only on compound headings. The first
    /// component's own type determines the heading tag.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub component: Vec<String>,

    /// Ids of broader concepts (directed hierarchical edges).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub broader: Vec<String>,

    /// Ids of associatively related concepts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<String>,

    /// Dewey Decimal Classification codes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ddc: Vec<String>,

    /// Free-text notes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<String>,

    /// Creation timestamp. Absent concepts are stamped with the current time
    /// at transcoding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl Concept {
    /// Create a concept with the given id and types and no other data.
    #[must_use]
    pub fn new(id: impl Into<String>, types: Vec<ConceptType>) -> Self {
        Concept {
            id: id.into(),
            types,
            pref_label: IndexMap::new(),
            alt_label: IndexMap::new(),
            acronym: Vec::new(),
            component: Vec::new(),
            broader: Vec::new(),
            related: Vec::new(),
            ddc: Vec::new(),
            note: Vec::new(),
            created: None,
        }
    }

    /// The first declared type, which drives tag selection for relation
    /// targets and heading components.
    #[must_use]
    pub fn primary_type(&self) -> Option<ConceptType> {
        self.types.first().copied()
    }

    /// Preferred label in the given language, if any.
    #[must_use]
    pub fn pref_label(&self, language: &str) -> Option<&str> {
        self.pref_label.get(language).map(String::as_str)
    }

    /// Alternate labels in the given language. Empty when none exist.
    #[must_use]
    pub fn alt_labels(&self, language: &str) -> &[String] {
        self.alt_label.get(language).map_or(&[], Vec::as_slice)
    }

    /// Whether any declared type is a compound heading (real or virtual).
    #[must_use]
    pub fn is_compound(&self) -> bool {
        self.types.iter().any(|t| t.is_compound())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_concept() {
        let concept: Concept = serde_json::from_str(
            r#"{"id": "REAL000001", "type": ["Topic"], "prefLabel": {"nb": "Algebra"}}"#,
        )
        .unwrap();

        assert_eq!(concept.id, "REAL000001");
        assert_eq!(concept.types, vec![ConceptType::Topic]);
        assert_eq!(concept.pref_label("nb"), Some("Algebra"));
        assert_eq!(concept.pref_label("en"), None);
        assert!(concept.broader.is_empty());
        assert!(concept.created.is_none());
    }

    #[test]
    fn test_deserialize_full_concept() {
        let concept: Concept = serde_json::from_str(
            r#"{
                "id": "REAL000300",
                "type": ["GenreForm", "Topic"],
                "prefLabel": {"nb": "Atlas", "en": "Atlases"},
                "altLabel": {"nb": ["Kartbok"]},
                "acronym": ["ATL"],
                "broader": ["REAL000200"],
                "related": ["REAL000400"],
                "ddc": ["912"],
                "note": ["Brukes for kartsamlinger."],
                "created": "2014-10-27T09:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(
            concept.types,
            vec![ConceptType::GenreForm, ConceptType::Topic]
        );
        assert_eq!(concept.alt_labels("nb"), ["Kartbok"]);
        assert_eq!(concept.alt_labels("en"), Vec::<String>::new().as_slice());
        assert_eq!(concept.acronym, ["ATL"]);
        assert_eq!(concept.primary_type(), Some(ConceptType::GenreForm));
        assert!(concept.created.is_some());
    }

    #[test]
    fn test_compound_detection() {
        let compound: Concept = serde_json::from_str(
            r#"{
                "id": "REAL030000",
                "type": ["VirtualCompoundHeading"],
                "component": ["REAL000001", "REAL000002"]
            }"#,
        )
        .unwrap();

        assert!(compound.is_compound());
        assert_eq!(compound.component.len(), 2);

        let plain = Concept::new("REAL000001", vec![ConceptType::Topic]);
        assert!(!plain.is_compound());
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let concept = Concept::new("REAL000001", vec![ConceptType::Topic]);
        let json = serde_json::to_string(&concept).unwrap();

        assert!(json.contains("\"id\""));
        assert!(!json.contains("altLabel"));
        assert!(!json.contains("broader"));
        assert!(!json.contains("created"));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result: std::result::Result<Concept, _> =
            serde_json::from_str(r#"{"id": "X", "type": ["Chronological"]}"#);
        assert!(result.is_err());
    }
}
