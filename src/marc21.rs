//! Concept-graph to MARC21 Authority transcoding.
//!
//! [`Marc21`] walks a [`ConceptStore`] and emits one authority record per
//! (concept, declared type) pair, skipping the synthetic
//! `VirtualCompoundHeading` type. Field and subfield placement follows the
//! concept's type, the direction of its relations, and the configured output
//! language:
//!
//! ```ignore
//! use marcvoc::{ConceptStore, Marc21, Marc21Options};
//!
//! let store = ConceptStore::from_json_str(&json)?;
//! let options = Marc21Options::default()
//!     .agency("NoOU")
//!     .vocabulary("noubomn");
//! let xml = Marc21::from_store(store, options).serialize()?;
//! ```
//!
//! The hierarchical "narrower" relation is never stored on concepts; it is
//! derived here by inverting every `broader` edge once per pass.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::concept::{Concept, ConceptType};
use crate::error::{Result, VocabError};
use crate::marcxml;
use crate::record::{AuthorityRecord, Field};
use crate::store::ConceptStore;

/// Authority 008 content after the 6-digit creation date.
const FIELD_008_FLAGS: &str = "|||a|z||||||          || a||     d";

/// Configuration for MARC21 export.
///
/// All cataloging-source settings are optional and default to unset; an unset
/// value never emits its control field or 040 subfield. `output_language`
/// selects which entry of the label maps is emitted and defaults to `nb`.
#[derive(Debug, Clone)]
pub struct Marc21Options {
    /// Cataloging agency: 003, 040 $a, and the control-number qualifier.
    pub agency: Option<String>,
    /// Transcribing agency, 040 $c.
    pub transcribing_agency: Option<String>,
    /// Modifying agency, 040 $d.
    pub modifying_agency: Option<String>,
    /// Subject heading/thesaurus conventions code, 040 $f.
    pub vocabulary: Option<String>,
    /// Language of cataloging, 040 $b.
    pub default_language: Option<String>,
    /// Language code selecting which labels are emitted.
    pub output_language: String,
}

impl Default for Marc21Options {
    fn default() -> Self {
        Marc21Options {
            agency: None,
            transcribing_agency: None,
            modifying_agency: None,
            vocabulary: None,
            default_language: None,
            output_language: "nb".to_string(),
        }
    }
}

impl Marc21Options {
    /// Set the cataloging agency (003, 040 $a, control-number qualifier).
    #[must_use]
    pub fn agency(mut self, agency: impl Into<String>) -> Self {
        self.agency = Some(agency.into());
        self
    }

    /// Set the transcribing agency (040 $c).
    #[must_use]
    pub fn transcribing_agency(mut self, agency: impl Into<String>) -> Self {
        self.transcribing_agency = Some(agency.into());
        self
    }

    /// Set the modifying agency (040 $d).
    #[must_use]
    pub fn modifying_agency(mut self, agency: impl Into<String>) -> Self {
        self.modifying_agency = Some(agency.into());
        self
    }

    /// Set the thesaurus conventions code (040 $f).
    #[must_use]
    pub fn vocabulary(mut self, vocabulary: impl Into<String>) -> Self {
        self.vocabulary = Some(vocabulary.into());
        self
    }

    /// Set the language of cataloging (040 $b).
    #[must_use]
    pub fn default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = Some(language.into());
        self
    }

    /// Set the label emission language.
    #[must_use]
    pub fn output_language(mut self, language: impl Into<String>) -> Self {
        self.output_language = language.into();
        self
    }
}

/// Heading tag (1XX) for a concept type.
fn heading_tag(concept_type: ConceptType) -> Result<&'static str> {
    match concept_type {
        ConceptType::Temporal => Ok("148"),
        ConceptType::Topic => Ok("150"),
        ConceptType::Geographic => Ok("151"),
        ConceptType::GenreForm => Ok("155"),
        other => Err(VocabError::NoHeadingTag(other)),
    }
}

/// Subfield code for a non-initial compound heading component.
fn subdivision_code(concept_type: ConceptType) -> Result<char> {
    match concept_type {
        ConceptType::Topic => Ok('x'),
        ConceptType::Temporal => Ok('y'),
        ConceptType::Geographic => Ok('z'),
        ConceptType::GenreForm => Ok('v'),
        other => Err(VocabError::NoHeadingTag(other)),
    }
}

/// See From Tracing tag (4XX) for a concept type.
fn see_from_tag(concept_type: ConceptType) -> Result<&'static str> {
    match concept_type {
        ConceptType::Temporal => Ok("448"),
        ConceptType::Topic => Ok("450"),
        ConceptType::Geographic => Ok("451"),
        ConceptType::GenreForm => Ok("455"),
        other => Err(VocabError::NoHeadingTag(other)),
    }
}

/// See Also From Tracing tag (5XX) for a concept type.
fn see_also_tag(concept_type: ConceptType) -> Result<&'static str> {
    match concept_type {
        ConceptType::Temporal => Ok("548"),
        ConceptType::Topic => Ok("550"),
        ConceptType::Geographic => Ok("551"),
        ConceptType::GenreForm => Ok("555"),
        other => Err(VocabError::NoHeadingTag(other)),
    }
}

/// Transcoder from a concept collection to MARC21 authority records.
///
/// A transcoder borrows nothing from its caller: it owns the store and its
/// options, and every [`serialize`](Self::serialize) call is an independent
/// pass with its own derived narrower index. Independent transcoders may run
/// concurrently.
#[derive(Debug)]
pub struct Marc21 {
    store: ConceptStore,
    options: Marc21Options,
}

impl Marc21 {
    /// Create a transcoder over an existing store.
    #[must_use]
    pub fn from_store(store: ConceptStore, options: Marc21Options) -> Self {
        Marc21 { store, options }
    }

    /// Create a transcoder from a JSON mapping of id → concept.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::InvalidInput`] if `value` is not a JSON object.
    pub fn from_mapping(value: serde_json::Value, options: Marc21Options) -> Result<Self> {
        Ok(Marc21 {
            store: ConceptStore::from_mapping(value)?,
            options,
        })
    }

    /// The store this transcoder reads from.
    #[must_use]
    pub fn store(&self) -> &ConceptStore {
        &self.store
    }

    /// Transcode the whole collection into one MARCXML collection document.
    ///
    /// # Errors
    ///
    /// Fails on the first dangling reference, dispatch failure, or missing
    /// component label; no partial document is produced.
    pub fn serialize(&self) -> Result<String> {
        marcxml::records_to_marcxml(&self.records()?)
    }

    /// Transcode the whole collection into in-memory authority records.
    ///
    /// One record is produced per concept and declared type, except
    /// `VirtualCompoundHeading`, which marks grouping nodes that never become
    /// records of their own.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`serialize`](Self::serialize).
    pub fn records(&self) -> Result<Vec<AuthorityRecord>> {
        let narrower = self.narrower_index();

        let mut records = Vec::new();
        for concept in self.store.iter() {
            self.convert_concept(concept, &narrower, &mut records)?;
        }

        tracing::debug!(
            concepts = self.store.len(),
            records = records.len(),
            "transcoded concept collection"
        );
        Ok(records)
    }

    /// Invert every `broader` edge into a pass-scoped narrower index.
    ///
    /// Targets are appended in encounter order. Duplicate `broader` entries
    /// would yield duplicate narrower links; source data keeps them distinct.
    fn narrower_index(&self) -> HashMap<&str, Vec<&str>> {
        let mut index: HashMap<&str, Vec<&str>> = HashMap::new();
        for concept in self.store.iter() {
            for broader_id in &concept.broader {
                index
                    .entry(broader_id.as_str())
                    .or_default()
                    .push(concept.id.as_str());
            }
        }
        index
    }

    fn convert_concept(
        &self,
        concept: &Concept,
        narrower: &HashMap<&str, Vec<&str>>,
        records: &mut Vec<AuthorityRecord>,
    ) -> Result<()> {
        let created = concept.created.unwrap_or_else(Utc::now);
        // The source data carries no separate modification time, so 005
        // always mirrors the creation timestamp in 008.
        let modified = created;

        for &concept_type in &concept.types {
            if concept_type == ConceptType::VirtualCompoundHeading {
                continue;
            }
            records.push(self.build_record(concept, concept_type, created, modified, narrower)?);
        }
        Ok(())
    }

    fn build_record(
        &self,
        concept: &Concept,
        concept_type: ConceptType,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
        narrower: &HashMap<&str, Vec<&str>>,
    ) -> Result<AuthorityRecord> {
        let language = self.options.output_language.as_str();
        let mut record = AuthorityRecord::new();

        // 001 Control number
        record.add_control_field("001", concept.id.clone());

        // 003 Agency whose control number is in 001
        if let Some(agency) = &self.options.agency {
            record.add_control_field("003", agency.clone());
        }

        // 005 Date and time of latest transaction
        record.add_control_field("005", modified.format("%Y%m%d%H%M%S.0").to_string());

        // 008 Fixed-length data elements
        record.add_control_field(
            "008",
            format!("{}{}", created.format("%y%m%d"), FIELD_008_FLAGS),
        );

        // 024 Other standard identifier: the concept URI
        record.add_field(
            Field::builder("024", '7', ' ')
                .subfield('a', self.store.uri(&concept.id))
                .subfield('2', "uri")
                .build(),
        );

        // 040 Cataloging source, configured subfields only
        let mut field_040 = Field::new("040", ' ', ' ');
        if let Some(agency) = &self.options.agency {
            field_040.add_subfield('a', agency.clone());
        }
        if let Some(lang) = &self.options.default_language {
            field_040.add_subfield('b', lang.clone());
        }
        if let Some(agency) = &self.options.transcribing_agency {
            field_040.add_subfield('c', agency.clone());
        }
        if let Some(agency) = &self.options.modifying_agency {
            field_040.add_subfield('d', agency.clone());
        }
        if let Some(vocabulary) = &self.options.vocabulary {
            field_040.add_subfield('f', vocabulary.clone());
        }
        record.add_field(field_040);

        // 083 DDC number
        for code in &concept.ddc {
            record.add_field(Field::builder("083", '0', '4').subfield('a', code.clone()).build());
        }

        // 148/150/151/155 Authorized heading
        if concept_type == ConceptType::CompoundHeading {
            record.add_field(self.compound_heading_field(concept, language)?);
        } else {
            if let Some(label) = concept.pref_label(language) {
                let tag = heading_tag(concept_type)?;
                record.add_field(Field::builder(tag, ' ', ' ').subfield('a', label).build());
            }

            // 448/450/451/455 See From Tracings
            for label in concept.alt_labels(language) {
                let tag = see_from_tag(concept_type)?;
                record.add_field(Field::builder(tag, ' ', ' ').subfield('a', label.clone()).build());
            }
            for acronym in &concept.acronym {
                let tag = see_from_tag(concept_type)?;
                // $g 'd': the tracing heading is an acronym for the 1XX heading.
                // Ref: http://www.loc.gov/marc/authority/adtracing.html
                record.add_field(
                    Field::builder(tag, ' ', ' ')
                        .subfield('a', acronym.clone())
                        .subfield('g', "d")
                        .build(),
                );
            }
        }

        // 548/550/551/555 See Also From Tracings
        for target_id in &concept.broader {
            record.add_field(self.relation_field(target_id, language, Some('g'))?);
        }
        if let Some(narrower_ids) = narrower.get(concept.id.as_str()) {
            for &target_id in narrower_ids {
                record.add_field(self.relation_field(target_id, language, Some('h'))?);
            }
        }
        for target_id in &concept.related {
            record.add_field(self.relation_field(target_id, language, None)?);
        }

        // 680 Notes
        for note in &concept.note {
            record.add_field(Field::builder("680", ' ', ' ').subfield('i', note.clone()).build());
        }

        Ok(record)
    }

    /// Build the 1XX field for a compound heading.
    ///
    /// The tag comes from the first component's own type; every further
    /// component contributes one subdivision subfield.
    fn compound_heading_field(&self, concept: &Concept, language: &str) -> Result<Field> {
        let mut component_ids = concept.component.iter();
        let first_id = component_ids
            .next()
            .ok_or_else(|| VocabError::EmptyCompound(concept.id.clone()))?;

        let first = self.store.by_id(first_id)?;
        let tag = heading_tag(self.primary_type(first)?)?;

        let mut field = Field::new(tag, ' ', ' ');
        field.add_subfield('a', self.required_label(first, language)?);

        for component_id in component_ids {
            let component = self.store.by_id(component_id)?;
            let code = subdivision_code(self.primary_type(component)?)?;
            field.add_subfield(code, self.required_label(component, language)?);
        }
        Ok(field)
    }

    /// Build one 5XX field pointing at a relation target.
    ///
    /// The tag is computed from the target's own first type. `control` is the
    /// $w relationship code: `g` for broader, `h` for narrower, none for
    /// associative relations.
    fn relation_field(&self, target_id: &str, language: &str, control: Option<char>) -> Result<Field> {
        let target = self.store.by_id(target_id)?;
        let tag = see_also_tag(self.primary_type(target)?)?;

        let mut field = Field::new(tag, ' ', ' ');
        field.add_subfield('a', self.required_label(target, language)?);
        if let Some(code) = control {
            field.add_subfield('w', code.to_string());
        }
        field.add_subfield('0', self.global_control_number(target_id));
        Ok(field)
    }

    fn primary_type(&self, concept: &Concept) -> Result<ConceptType> {
        concept
            .primary_type()
            .ok_or_else(|| VocabError::MissingType(concept.id.clone()))
    }

    fn required_label<'a>(&self, concept: &'a Concept, language: &str) -> Result<&'a str> {
        concept
            .pref_label(language)
            .ok_or_else(|| VocabError::MissingLabel {
                id: concept.id.clone(),
                language: language.to_string(),
            })
    }

    /// Qualify a control number with the cataloging agency: `(agency)id`.
    fn global_control_number(&self, id: &str) -> String {
        match &self.options.agency {
            Some(agency) => format!("({agency}){id}"),
            None => id.to_string(),
        }
    }
}
