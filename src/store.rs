//! In-memory concept collection.
//!
//! [`ConceptStore`] holds all concepts of a vocabulary keyed by their stable
//! identifier, preserving insertion order. It provides the lookups the
//! transcoder depends on (by id, by term, iteration, URI generation) and thin
//! JSON load/save of the collection document format:
//!
//! ```json
//! {
//!   "concepts": {
//!     "REAL000001": {"id": "REAL000001", "type": ["Topic"], ...},
//!     ...
//!   }
//! }
//! ```

use std::io::{Read, Write};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::concept::Concept;
use crate::error::{Result, VocabError};

/// Default URI namespace prefixed to concept ids for the 024 field.
pub const DEFAULT_URI_PREFIX: &str = "http://data.ub.uio.no/realfagstermer/";

/// Separator between component labels in a compound term string.
const TERM_SEPARATOR: &str = " : ";

/// On-disk collection document wrapper.
#[derive(Debug, Serialize, Deserialize)]
struct CollectionDocument {
    concepts: IndexMap<String, Concept>,
}

/// In-memory store of all concepts in a vocabulary.
///
/// Concepts are kept in insertion order. Lookups by id are O(1); term
/// resolution scans the collection.
///
/// # Example
///
/// ```ignore
/// use marcvoc::ConceptStore;
///
/// let store = ConceptStore::from_json_str(&std::fs::read_to_string("realfagstermer.json")?)?;
/// let concept = store.by_id("REAL002121")?;
/// println!("{}", store.uri(&concept.id));
/// ```
#[derive(Debug, Clone)]
pub struct ConceptStore {
    concepts: IndexMap<String, Concept>,
    uri_prefix: String,
}

impl Default for ConceptStore {
    fn default() -> Self {
        ConceptStore {
            concepts: IndexMap::new(),
            uri_prefix: DEFAULT_URI_PREFIX.to_string(),
        }
    }
}

impl ConceptStore {
    /// Create an empty store with the default URI prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with a custom URI prefix for [`uri`](Self::uri).
    #[must_use]
    pub fn with_uri_prefix(uri_prefix: impl Into<String>) -> Self {
        ConceptStore {
            concepts: IndexMap::new(),
            uri_prefix: uri_prefix.into(),
        }
    }

    /// Build a store from already-parsed concepts, keyed by their ids.
    #[must_use]
    pub fn from_concepts(concepts: impl IntoIterator<Item = Concept>) -> Self {
        let mut store = Self::new();
        for concept in concepts {
            store.insert(concept);
        }
        store
    }

    /// Build a store from a JSON mapping of id → concept.
    ///
    /// This is the boundary constructor for untyped input: anything that is
    /// not a JSON object is rejected up front.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::InvalidInput`] if `value` is not an object, or a
    /// [`VocabError::JsonError`] if an entry does not describe a concept.
    pub fn from_mapping(value: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(entries) = value else {
            return Err(VocabError::InvalidInput(
                "expected a JSON object mapping concept ids to concepts".to_string(),
            ));
        };

        let mut store = Self::new();
        for (_, entry) in entries {
            let concept: Concept = serde_json::from_value(entry)?;
            store.insert(concept);
        }
        tracing::debug!(concepts = store.len(), "loaded concept mapping");
        Ok(store)
    }

    /// Load a collection document (`{"concepts": {...}}`) from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::JsonError`] on malformed input.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: CollectionDocument = serde_json::from_str(json)?;
        let mut store = Self::new();
        store.concepts = document.concepts;
        tracing::debug!(concepts = store.len(), "loaded concept collection");
        Ok(store)
    }

    /// Load a collection document from a reader.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::JsonError`] on malformed input or
    /// [`VocabError::IoError`] on read failure.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let document: CollectionDocument = serde_json::from_reader(reader)?;
        let mut store = Self::new();
        store.concepts = document.concepts;
        tracing::debug!(concepts = store.len(), "loaded concept collection");
        Ok(store)
    }

    /// Serialize the collection document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::JsonError`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String> {
        let document = CollectionDocument {
            concepts: self.concepts.clone(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Write the collection document to a writer as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::JsonError`] or [`VocabError::IoError`] on failure.
    pub fn to_json_writer<W: Write>(&self, writer: W) -> Result<()> {
        let document = CollectionDocument {
            concepts: self.concepts.clone(),
        };
        serde_json::to_writer_pretty(writer, &document)?;
        Ok(())
    }

    /// Insert a concept, replacing any previous concept with the same id.
    pub fn insert(&mut self, concept: Concept) {
        self.concepts.insert(concept.id.clone(), concept);
    }

    /// Get a concept by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Concept> {
        self.concepts.get(id)
    }

    /// Get a concept by id, failing if it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::ConceptNotFound`] for unknown ids.
    pub fn by_id(&self, id: &str) -> Result<&Concept> {
        self.concepts
            .get(id)
            .ok_or_else(|| VocabError::ConceptNotFound(id.to_string()))
    }

    /// Resolve a term to the single concept it names.
    ///
    /// A plain term matches a concept's preferred label in any language. A
    /// compound term of the form `"Label1 : Label2 : …"` matches a compound
    /// heading concept whose components carry exactly those labels, in order,
    /// in a single language.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::TermNotFound`] when nothing matches and
    /// [`VocabError::AmbiguousTerm`] when more than one concept matches.
    pub fn by_term(&self, term: &str) -> Result<&Concept> {
        let matches: Vec<&Concept> = if term.contains(TERM_SEPARATOR) {
            let parts: Vec<&str> = term.split(TERM_SEPARATOR).collect();
            self.concepts
                .values()
                .filter(|c| c.is_compound() && self.components_match(c, &parts))
                .collect()
        } else {
            self.concepts
                .values()
                .filter(|c| c.pref_label.values().any(|label| label == term))
                .collect()
        };

        match matches.as_slice() {
            [concept] => Ok(concept),
            [] => Err(VocabError::TermNotFound(term.to_string())),
            _ => Err(VocabError::AmbiguousTerm(term.to_string())),
        }
    }

    /// Whether the compound concept's components carry exactly `parts` as
    /// preferred labels, in order, in at least one shared language.
    fn components_match(&self, compound: &Concept, parts: &[&str]) -> bool {
        if compound.component.len() != parts.len() {
            return false;
        }
        let components: Option<Vec<&Concept>> = compound
            .component
            .iter()
            .map(|id| self.concepts.get(id))
            .collect();
        let Some(components) = components else {
            return false;
        };
        let Some(first) = components.first() else {
            return false;
        };
        first.pref_label.keys().any(|lang| {
            components
                .iter()
                .zip(parts)
                .all(|(component, part)| component.pref_label(lang) == Some(*part))
        })
    }

    /// Iterate over all concepts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.values()
    }

    /// Number of concepts in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Whether a concept with the given id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.concepts.contains_key(id)
    }

    /// The URI identifying a concept, used for the 024 field.
    #[must_use]
    pub fn uri(&self, id: &str) -> String {
        format!("{}{}", self.uri_prefix, id)
    }
}

impl<'a> IntoIterator for &'a ConceptStore {
    type Item = &'a Concept;
    type IntoIter = indexmap::map::Values<'a, String, Concept>;

    fn into_iter(self) -> Self::IntoIter {
        self.concepts.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concept::ConceptType;
    use serde_json::json;

    fn labeled(id: &str, concept_type: ConceptType, nb: &str) -> Concept {
        let mut concept = Concept::new(id, vec![concept_type]);
        concept.pref_label.insert("nb".to_string(), nb.to_string());
        concept
    }

    #[test]
    fn test_by_id() {
        let store = ConceptStore::from_concepts([labeled("REAL001", ConceptType::Topic, "Alger")]);

        assert_eq!(store.by_id("REAL001").unwrap().id, "REAL001");
        assert!(matches!(
            store.by_id("REAL999"),
            Err(VocabError::ConceptNotFound(_))
        ));
    }

    #[test]
    fn test_by_term_plain() {
        let store = ConceptStore::from_concepts([
            labeled("REAL001", ConceptType::Topic, "Alger"),
            labeled("REAL002", ConceptType::Topic, "Sopp"),
        ]);

        assert_eq!(store.by_term("Sopp").unwrap().id, "REAL002");
        assert!(matches!(
            store.by_term("Mose"),
            Err(VocabError::TermNotFound(_))
        ));
    }

    #[test]
    fn test_by_term_matches_any_language() {
        let mut concept = labeled("REAL001", ConceptType::Topic, "Optimering");
        concept
            .pref_label
            .insert("en".to_string(), "Optimization".to_string());
        let store = ConceptStore::from_concepts([concept]);

        assert_eq!(store.by_term("Optimization").unwrap().id, "REAL001");
    }

    #[test]
    fn test_by_term_ambiguous() {
        let store = ConceptStore::from_concepts([
            labeled("REAL001", ConceptType::Topic, "Mars"),
            labeled("REAL002", ConceptType::Geographic, "Mars"),
        ]);

        assert!(matches!(
            store.by_term("Mars"),
            Err(VocabError::AmbiguousTerm(_))
        ));
    }

    #[test]
    fn test_by_term_compound() {
        let mut compound = Concept::new("REAL030001", vec![ConceptType::CompoundHeading]);
        compound.component = vec!["REAL010001".to_string(), "REAL010002".to_string()];

        let store = ConceptStore::from_concepts([
            labeled("REAL010001", ConceptType::Topic, "Fornybar energi"),
            labeled("REAL010002", ConceptType::Topic, "Livssyklusanalyse"),
            compound,
        ]);

        let resolved = store
            .by_term("Fornybar energi : Livssyklusanalyse")
            .unwrap();
        assert_eq!(resolved.id, "REAL030001");

        // Reversed component order names nothing.
        assert!(store
            .by_term("Livssyklusanalyse : Fornybar energi")
            .is_err());
    }

    #[test]
    fn test_from_mapping_rejects_non_object() {
        let result = ConceptStore::from_mapping(json!("just a string"));
        assert!(matches!(result, Err(VocabError::InvalidInput(_))));

        let result = ConceptStore::from_mapping(json!([1, 2, 3]));
        assert!(matches!(result, Err(VocabError::InvalidInput(_))));
    }

    #[test]
    fn test_from_mapping() {
        let store = ConceptStore::from_mapping(json!({
            "REAL001": {"id": "REAL001", "type": ["Topic"], "prefLabel": {"nb": "Alger"}}
        }))
        .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.by_id("REAL001").unwrap().pref_label("nb"), Some("Alger"));
    }

    #[test]
    fn test_json_roundtrip() {
        let store = ConceptStore::from_concepts([
            labeled("REAL001", ConceptType::Topic, "Alger"),
            labeled("REAL002", ConceptType::Geographic, "Oslo"),
        ]);

        let json = store.to_json_string().unwrap();
        let restored = ConceptStore::from_json_str(&json).unwrap();

        assert_eq!(restored.len(), 2);
        // Insertion order survives the round trip.
        let ids: Vec<&str> = restored.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["REAL001", "REAL002"]);
    }

    #[test]
    fn test_uri() {
        let store = ConceptStore::new();
        assert_eq!(
            store.uri("REAL002121"),
            "http://data.ub.uio.no/realfagstermer/REAL002121"
        );

        let store = ConceptStore::with_uri_prefix("https://example.org/vocab/");
        assert_eq!(store.uri("X1"), "https://example.org/vocab/X1");
    }
}
