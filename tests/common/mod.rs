//! Shared fixtures for integration tests.

use marcvoc::ConceptStore;
use serde_json::json;

/// A small realistic vocabulary: plain topics with hierarchy and associative
/// links, a geographic name, a multi-typed genre/form term, a chronological
/// term, one compound heading, and one virtual compound grouping node.
pub fn sample_mapping() -> serde_json::Value {
    json!({
        "REAL000001": {
            "id": "REAL000001",
            "type": ["Topic"],
            "prefLabel": {"nb": "Energi", "en": "Energy"},
            "ddc": ["333.79"],
            "note": ["Former for energi og energiomdannelse."],
            "created": "2014-01-15T10:30:00Z"
        },
        "REAL000002": {
            "id": "REAL000002",
            "type": ["Topic"],
            "prefLabel": {"nb": "Fornybar energi"},
            "altLabel": {"nb": ["Grønn energi"]},
            "broader": ["REAL000001"],
            "created": "2014-03-02T08:00:00Z"
        },
        "REAL000003": {
            "id": "REAL000003",
            "type": ["Topic"],
            "prefLabel": {"nb": "Livssyklusanalyse"},
            "acronym": ["LCA"],
            "related": ["REAL000002"],
            "created": "2015-06-11T12:45:00Z"
        },
        "REAL000004": {
            "id": "REAL000004",
            "type": ["Geographic"],
            "prefLabel": {"nb": "Oslo"}
        },
        "REAL000005": {
            "id": "REAL000005",
            "type": ["GenreForm", "Topic"],
            "prefLabel": {"nb": "Atlas"}
        },
        "REAL000006": {
            "id": "REAL000006",
            "type": ["Temporal"],
            "prefLabel": {"nb": "Vikingtiden"}
        },
        "REAL030001": {
            "id": "REAL030001",
            "type": ["CompoundHeading"],
            "prefLabel": {"nb": "Fornybar energi : Livssyklusanalyse"},
            "component": ["REAL000002", "REAL000003"]
        },
        "REAL030002": {
            "id": "REAL030002",
            "type": ["VirtualCompoundHeading"],
            "component": ["REAL000004", "REAL000006"]
        }
    })
}

pub fn sample_store() -> ConceptStore {
    ConceptStore::from_mapping(sample_mapping()).expect("sample mapping is valid")
}
