//! Error types for vocabulary conversion.
//!
//! This module provides the [`VocabError`] type for all conversion operations
//! and the [`Result`] convenience type.

use crate::concept::ConceptType;
use thiserror::Error;

/// Error type for all vocabulary conversion operations.
///
/// Covers loading a concept collection, resolving ids and terms against the
/// store, and emitting MARC21 authority records.
#[derive(Error, Debug)]
pub enum VocabError {
    /// The input handed to a constructor was not a concept mapping.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A referenced concept id does not exist in the store.
    #[error("Concept not found: {0}")]
    ConceptNotFound(String),

    /// A term did not resolve to any concept.
    #[error("Term not found: {0}")]
    TermNotFound(String),

    /// A term resolved to more than one concept.
    #[error("Ambiguous term: {0}")]
    AmbiguousTerm(String),

    /// A concept type has no entry in the heading tag tables.
    ///
    /// Raised when a concept (or a relation target or heading component)
    /// carries a type that cannot head an authority record, such as
    /// `CompoundHeading` appearing as its own first component.
    #[error("No MARC heading tag for concept type {0:?}")]
    NoHeadingTag(ConceptType),

    /// A concept has an empty `type` sequence.
    #[error("Concept {0} has no type")]
    MissingType(String),

    /// A compound heading concept has no components.
    #[error("Compound heading {0} has no components")]
    EmptyCompound(String),

    /// A referenced concept lacks a preferred label in the output language.
    #[error("Concept {id} has no preferred label in language '{language}'")]
    MissingLabel {
        /// Id of the concept missing the label.
        id: String,
        /// Language code the label was requested in.
        language: String,
    },

    /// Error during XML serialization of the output document.
    #[error("XML error: {0}")]
    XmlError(String),

    /// Error reading or writing the JSON collection format.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error from the underlying source/destination.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convenience type alias for [`std::result::Result`] with [`VocabError`].
pub type Result<T> = std::result::Result<T, VocabError>;
