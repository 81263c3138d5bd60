//! MARC21 authority record structures.
//!
//! This module provides the in-memory model the transcoder emits into:
//! - [`AuthorityRecord`] — one authority record per (concept, type) pair
//! - [`Field`] — variable data fields (010+)
//! - [`Subfield`] — coded data elements within fields
//!
//! Data fields are stored in emission order: the order fields are added is
//! the order they appear in the serialized record, across different tags.
//! Control fields are keyed by tag (each occurs at most once) and likewise
//! preserve insertion order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Fixed leader for all authority records produced by this crate.
///
/// Ref: <https://www.loc.gov/marc/authority/adleader.html>
pub const AUTHORITY_LEADER: &str = "00000nz  a2200000n  4500";

/// A MARC21 authority record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorityRecord {
    /// Record leader (24 characters).
    pub leader: String,
    /// Control fields (001-009), tag → value, preserves insertion order.
    pub control_fields: IndexMap<String, String>,
    /// Data fields (010+) in emission order.
    pub fields: Vec<Field>,
}

/// A data field in a MARC record (fields 010 and higher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field tag (3 digits).
    pub tag: String,
    /// First indicator.
    pub indicator1: char,
    /// Second indicator.
    pub indicator2: char,
    /// Subfields (`SmallVec` avoids allocation for typical fields with 4 or fewer).
    pub subfields: SmallVec<[Subfield; 4]>,
}

/// A subfield within a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subfield {
    /// Subfield code (single character).
    pub code: char,
    /// Subfield value.
    pub value: String,
}

impl Default for AuthorityRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthorityRecord {
    /// Create an empty record with the fixed authority leader.
    #[must_use]
    pub fn new() -> Self {
        AuthorityRecord {
            leader: AUTHORITY_LEADER.to_string(),
            control_fields: IndexMap::new(),
            fields: Vec::new(),
        }
    }

    /// Add a control field (001-009).
    pub fn add_control_field(&mut self, tag: impl Into<String>, value: impl Into<String>) {
        self.control_fields.insert(tag.into(), value.into());
    }

    /// Get a control field value.
    #[must_use]
    pub fn get_control_field(&self, tag: &str) -> Option<&str> {
        self.control_fields.get(tag).map(String::as_str)
    }

    /// Append a data field.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Iterate over fields matching a specific tag.
    pub fn fields_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Field> + 'a {
        self.fields.iter().filter(move |f| f.tag == tag)
    }

    /// Get the first field with a given tag.
    #[must_use]
    pub fn get_field(&self, tag: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    /// Get the main heading (1XX field).
    #[must_use]
    pub fn heading(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag.starts_with('1'))
    }

    /// Get all See From Tracing fields (4XX).
    #[must_use]
    pub fn see_from_tracings(&self) -> Vec<&Field> {
        self.fields
            .iter()
            .filter(|f| f.tag.starts_with('4'))
            .collect()
    }

    /// Get all See Also From Tracing fields (5XX).
    #[must_use]
    pub fn see_also_tracings(&self) -> Vec<&Field> {
        self.fields
            .iter()
            .filter(|f| f.tag.starts_with('5'))
            .collect()
    }

    /// Get all note fields (680).
    #[must_use]
    pub fn notes(&self) -> Vec<&Field> {
        self.fields_by_tag("680").collect()
    }
}

impl Field {
    /// Create a new field with the given tag and indicators.
    #[must_use]
    pub fn new(tag: impl Into<String>, indicator1: char, indicator2: char) -> Self {
        Field {
            tag: tag.into(),
            indicator1,
            indicator2,
            subfields: SmallVec::new(),
        }
    }

    /// Create a builder for fluently constructing fields.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let field = Field::builder("150", ' ', ' ')
    ///     .subfield('a', "Optimering")
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder(tag: impl Into<String>, indicator1: char, indicator2: char) -> FieldBuilder {
        FieldBuilder {
            field: Field::new(tag, indicator1, indicator2),
        }
    }

    /// Append a subfield.
    pub fn add_subfield(&mut self, code: char, value: impl Into<String>) {
        self.subfields.push(Subfield {
            code,
            value: value.into(),
        });
    }

    /// Get the first subfield value with a given code.
    #[must_use]
    pub fn get_subfield(&self, code: char) -> Option<&str> {
        self.subfields
            .iter()
            .find(|s| s.code == code)
            .map(|s| s.value.as_str())
    }

    /// Iterate over all subfield values with a given code.
    pub fn subfields_by_code(&self, code: char) -> impl Iterator<Item = &str> {
        self.subfields
            .iter()
            .filter(move |s| s.code == code)
            .map(|s| s.value.as_str())
    }
}

/// Builder for fluently constructing data fields.
#[derive(Debug)]
pub struct FieldBuilder {
    field: Field,
}

impl FieldBuilder {
    /// Append a subfield.
    #[must_use]
    pub fn subfield(mut self, code: char, value: impl Into<String>) -> Self {
        self.field.add_subfield(code, value);
        self
    }

    /// Build the field.
    #[must_use]
    pub fn build(self) -> Field {
        self.field
    }
}
