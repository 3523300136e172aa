//! Relationship table parsing (`*.rels` parts).

use super::xml::attr;
use crate::error::Result;
use crate::model::Relationship;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Parse a relationship part, keeping entries in table order.
pub fn parse_relationships(xml: &[u8]) -> Result<Vec<Relationship>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut relationships = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(ref e) | Event::Start(ref e) if e.local_name().as_ref() == b"Relationship" => {
                match (attr(e, b"Id"), attr(e, b"Target")) {
                    (Some(id), Some(target)) => {
                        let rel_type = attr(e, b"Type").unwrap_or_default();
                        let mut relationship = Relationship::new(id, rel_type, target);
                        if attr(e, b"TargetMode").is_some_and(|m| m.eq_ignore_ascii_case("External")) {
                            relationship = relationship.external();
                        }
                        relationships.push(relationship);
                    }
                    _ => log::debug!("Skipping relationship without Id or Target"),
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(relationships)
}

/// Get the relationship part name for a source part (e.g., "word/document.xml").
pub fn rels_part_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}
