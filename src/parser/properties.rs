//! Core properties parsing (`docProps/core.xml`).

use super::xml::text;
use crate::error::Result;
use crate::model::Metadata;
use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Part name of the core properties in a WordprocessingML package.
pub const CORE_PROPERTIES_PART: &str = "docProps/core.xml";

#[derive(Debug, Clone, Copy)]
enum Field {
    Title,
    Subject,
    Creator,
    Keywords,
    LastModifiedBy,
    Created,
    Modified,
}

impl Field {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"subject" => Some(Field::Subject),
            b"creator" => Some(Field::Creator),
            b"keywords" => Some(Field::Keywords),
            b"lastModifiedBy" => Some(Field::LastModifiedBy),
            b"created" => Some(Field::Created),
            b"modified" => Some(Field::Modified),
            _ => None,
        }
    }
}

/// Parse the core properties part into document metadata.
pub fn parse_core_properties(xml: &[u8]) -> Result<Metadata> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut metadata = Metadata::default();
    let mut buf = Vec::new();
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => field = Field::from_local_name(e.local_name().as_ref()),
            Event::End(_) => field = None,
            Event::Text(ref e) => {
                if let Some(f) = field {
                    let value = text(e)?;
                    apply(&mut metadata, f, value.trim());
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(metadata)
}

fn apply(metadata: &mut Metadata, field: Field, value: &str) {
    if value.is_empty() {
        return;
    }
    let owned = || Some(value.to_string());
    match field {
        Field::Title => metadata.title = owned(),
        Field::Subject => metadata.subject = owned(),
        Field::Creator => metadata.author = owned(),
        Field::Keywords => metadata.keywords = owned(),
        Field::LastModifiedBy => metadata.last_modified_by = owned(),
        Field::Created => metadata.created = parse_w3c_date(value),
        Field::Modified => metadata.modified = parse_w3c_date(value),
    }
}

/// Parse a W3CDTF timestamp such as `2024-08-20T09:30:00Z`.
fn parse_w3c_date(s: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            log::warn!("Ignoring invalid document date '{}': {}", s, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const CORE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties"
    xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>Radiation &amp; Dose</dc:title>
  <dc:creator>Lab Group</dc:creator>
  <cp:keywords></cp:keywords>
  <cp:lastModifiedBy>Reviewer</cp:lastModifiedBy>
  <dcterms:created xsi:type="dcterms:W3CDTF">2024-08-01T09:00:00Z</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">not a date</dcterms:modified>
</cp:coreProperties>"#;

    #[test]
    fn test_parse_core_properties() {
        let metadata = parse_core_properties(CORE.as_bytes()).unwrap();
        assert_eq!(metadata.title.as_deref(), Some("Radiation & Dose"));
        assert_eq!(metadata.author.as_deref(), Some("Lab Group"));
        assert_eq!(metadata.last_modified_by.as_deref(), Some("Reviewer"));
        assert_eq!(metadata.keywords, None);
        assert_eq!(metadata.subject, None);
        assert_eq!(
            metadata.created,
            Some(Utc.with_ymd_and_hms(2024, 8, 1, 9, 0, 0).unwrap())
        );
        assert_eq!(metadata.modified, None);
    }

    #[test]
    fn test_parse_w3c_date_with_offset() {
        let dt = parse_w3c_date("2024-08-20T11:30:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 8, 20, 9, 30, 0).unwrap());
    }
}
