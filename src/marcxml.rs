//! MARCXML serialization of authority records.
//!
//! Records serialize to the MARCXML schema defined by the Library of Congress
//! (<https://www.loc.gov/standards/marcxml/>), wrapped in a marcxchange
//! `<collection>` element (<http://www.loc.gov/standards/iso25577/>):
//!
//! ```xml
//! <collection xmlns="info:lc/xmlns/marcxchange-v1">
//!   <record xmlns="http://www.loc.gov/MARC21/slim" type="Authority">
//!     <leader>00000nz  a2200000n  4500</leader>
//!     <controlfield tag="001">REAL000001</controlfield>
//!     <datafield tag="150" ind1=" " ind2=" ">
//!       <subfield code="a">Algebra</subfield>
//!     </datafield>
//!   </record>
//! </collection>
//! ```
//!
//! `tag`, `ind1`, `ind2`, `code`, and the record `type` are serialized as XML
//! attributes. This module only writes MARCXML; it does not read it back.

use quick_xml::se::to_string as xml_to_string;
use serde::Serialize;

use crate::error::{Result, VocabError};
use crate::record::AuthorityRecord;

/// The marcxchange collection namespace URI.
pub const MARCXCHANGE_NS: &str = "info:lc/xmlns/marcxchange-v1";

/// The MARC21-slim record namespace URI.
pub const MARC21_SLIM_NS: &str = "http://www.loc.gov/MARC21/slim";

/// Serialized collection wrapper.
#[derive(Debug, Serialize)]
#[serde(rename = "collection")]
struct XmlCollection {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "record")]
    records: Vec<XmlRecord>,
}

/// Serialized record representation.
#[derive(Debug, Serialize)]
#[serde(rename = "record")]
struct XmlRecord {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "@type")]
    record_type: &'static str,
    leader: String,
    controlfield: Vec<XmlControlField>,
    datafield: Vec<XmlDataField>,
}

/// Serialized control field representation.
#[derive(Debug, Serialize)]
struct XmlControlField {
    #[serde(rename = "@tag")]
    tag: String,
    #[serde(rename = "$value")]
    value: String,
}

/// Serialized data field representation.
#[derive(Debug, Serialize)]
struct XmlDataField {
    #[serde(rename = "@tag")]
    tag: String,
    #[serde(rename = "@ind1")]
    ind1: String,
    #[serde(rename = "@ind2")]
    ind2: String,
    subfield: Vec<XmlSubfield>,
}

/// Serialized subfield representation.
#[derive(Debug, Serialize)]
struct XmlSubfield {
    #[serde(rename = "@code")]
    code: String,
    #[serde(rename = "$value")]
    value: String,
}

fn to_xml_record(record: &AuthorityRecord) -> XmlRecord {
    let controlfields = record
        .control_fields
        .iter()
        .map(|(tag, value)| XmlControlField {
            tag: tag.clone(),
            value: value.clone(),
        })
        .collect();

    let datafields = record
        .fields
        .iter()
        .map(|field| XmlDataField {
            tag: field.tag.clone(),
            ind1: field.indicator1.to_string(),
            ind2: field.indicator2.to_string(),
            subfield: field
                .subfields
                .iter()
                .map(|subfield| XmlSubfield {
                    code: subfield.code.to_string(),
                    value: subfield.value.clone(),
                })
                .collect(),
        })
        .collect();

    XmlRecord {
        xmlns: MARC21_SLIM_NS,
        record_type: "Authority",
        leader: record.leader.clone(),
        controlfield: controlfields,
        datafield: datafields,
    }
}

/// Serialize records into one marcxchange `<collection>` document.
///
/// The output is a complete UTF-8 XML document with declaration; each record
/// carries the MARC21-slim namespace and `type="Authority"`.
///
/// # Errors
///
/// Returns [`VocabError::XmlError`] if serialization fails.
pub fn records_to_marcxml(records: &[AuthorityRecord]) -> Result<String> {
    let collection = XmlCollection {
        xmlns: MARCXCHANGE_NS,
        records: records.iter().map(to_xml_record).collect(),
    };

    let body = xml_to_string(&collection)
        .map_err(|e| VocabError::XmlError(format!("failed to serialize collection: {e}")))?;

    Ok(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>{body}"))
}

/// Serialize a single record to a standalone MARCXML string.
///
/// # Errors
///
/// Returns [`VocabError::XmlError`] if serialization fails.
pub fn record_to_marcxml(record: &AuthorityRecord) -> Result<String> {
    let body = xml_to_string(&to_xml_record(record))
        .map_err(|e| VocabError::XmlError(format!("failed to serialize record: {e}")))?;

    Ok(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>{body}"))
}
