//! # marcvoc
//!
//! A Rust library for converting controlled-vocabulary thesauri into MARC21
//! Authority records serialized as MARCXML.
//!
//! The input is a concept graph: terms with multilingual labels, one or more
//! semantic types, hierarchical (`broader`) and associative (`related`)
//! relations, and optional classification codes, acronyms, and notes. The
//! output is one marcxchange `<collection>` document containing one authority
//! record per concept and declared type.
//!
//! ## Quick Start
//!
//! ```ignore
//! use marcvoc::{ConceptStore, Marc21, Marc21Options};
//!
//! # fn main() -> marcvoc::Result<()> {
//! let json = std::fs::read_to_string("realfagstermer.json")?;
//! let store = ConceptStore::from_json_str(&json)?;
//!
//! let options = Marc21Options::default()
//!     .agency("NoOU")
//!     .vocabulary("noubomn");
//!
//! let xml = Marc21::from_store(store, options).serialize()?;
//! std::fs::write("realfagstermer.marc21.xml", xml)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Resolving terms
//!
//! The store resolves plain labels and compound terms of the form
//! `"Label1 : Label2"`:
//!
//! ```ignore
//! let concept = store.by_term("Fornybar energi : Livssyklusanalyse")?;
//! ```
//!
//! ## Modules
//!
//! - [`concept`] — Concept data model ([`Concept`], [`ConceptType`])
//! - [`store`] — In-memory concept collection with id/term lookup and JSON I/O
//! - [`record`] — Authority record structures ([`AuthorityRecord`], [`Field`], [`Subfield`])
//! - [`marc21`] — The concept-to-MARC21 transcoder
//! - [`marcxml`] — MARCXML/marcxchange serialization
//! - [`error`] — Error types and result type
//!
//! ## Field mapping
//!
//! | Concept data | MARC21 |
//! |---|---|
//! | id | 001 (and $0 of 5XX tracings, agency-qualified) |
//! | created | 005, 008 |
//! | URI | 024 $a |
//! | ddc | 083 $a |
//! | prefLabel | 148/150/151/155 $a by type |
//! | component | heading subdivisions $x/$y/$z/$v by component type |
//! | altLabel | 448/450/451/455 $a |
//! | acronym | 448/450/451/455 $a + $g "d" |
//! | broader | 548/550/551/555 $a $w "g" $0 |
//! | narrower (derived) | 548/550/551/555 $a $w "h" $0 |
//! | related | 548/550/551/555 $a $0 |
//! | note | 680 $i |

#![warn(missing_docs)]

pub mod concept;
pub mod error;
pub mod marc21;
pub mod marcxml;
pub mod record;
pub mod store;

pub use concept::{Concept, ConceptType};
pub use error::{Result, VocabError};
pub use marc21::{Marc21, Marc21Options};
pub use record::{AuthorityRecord, Field, FieldBuilder, Subfield, AUTHORITY_LEADER};
pub use store::ConceptStore;
