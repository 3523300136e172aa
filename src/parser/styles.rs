//! Style sheet parsing (`word/styles.xml`).
//!
//! Paragraphs reference styles by ID (`Heading1`), while the converter
//! classifies by display name (`Heading 1`). Built-in styles store a
//! lowercase internal name (`heading 1`) that Word shows capitalized; the
//! sheet maps those back to the names users see.

use super::xml::attr;
use crate::error::Result;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;

/// Name used when a paragraph has no style and the sheet declares no default.
pub const DEFAULT_PARAGRAPH_STYLE: &str = "Normal";

/// Paragraph styles of a document, keyed by style ID.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    names: HashMap<String, String>,
    default_paragraph: Option<String>,
}

impl StyleSheet {
    /// Create an empty style sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a style sheet part.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut sheet = StyleSheet::new();
        let mut buf = Vec::new();
        let mut current: Option<PendingStyle> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) | Event::Empty(ref e) => match e.name().as_ref() {
                    b"w:style" => {
                        current = Some(PendingStyle {
                            id: attr(e, b"w:styleId"),
                            is_paragraph: attr(e, b"w:type").map_or(true, |t| t == "paragraph"),
                            is_default: attr(e, b"w:default")
                                .is_some_and(|v| v == "1" || v == "true"),
                            name: None,
                        });
                    }
                    b"w:name" => {
                        if let Some(style) = current.as_mut() {
                            style.name = attr(e, b"w:val");
                        }
                    }
                    _ => {}
                },
                Event::End(ref e) if e.name().as_ref() == b"w:style" => {
                    if let Some(style) = current.take() {
                        sheet.insert(style);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(sheet)
    }

    fn insert(&mut self, style: PendingStyle) {
        if !style.is_paragraph {
            return;
        }
        let Some(id) = style.id else {
            return;
        };
        let name = style
            .name
            .map(|n| ui_name(&n))
            .unwrap_or_else(|| id.clone());
        if style.is_default {
            self.default_paragraph = Some(name.clone());
        }
        self.names.insert(id, name);
    }

    /// Add a paragraph style mapping.
    pub fn add_style(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(id.into(), ui_name(&name.into()));
    }

    /// Get the display name of a style ID.
    pub fn name(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Resolve a paragraph's style reference to a display name.
    ///
    /// Paragraphs without a reference get the default paragraph style;
    /// unknown IDs are returned as-is.
    pub fn resolve(&self, id: Option<&str>) -> String {
        match id {
            Some(id) => self.name(id).map_or_else(|| id.to_string(), str::to_string),
            None => self
                .default_paragraph
                .clone()
                .unwrap_or_else(|| DEFAULT_PARAGRAPH_STYLE.to_string()),
        }
    }

    /// Get the number of known paragraph styles.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the sheet has no paragraph styles.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Debug)]
struct PendingStyle {
    id: Option<String>,
    is_paragraph: bool,
    is_default: bool,
    name: Option<String>,
}

/// Map a built-in style's internal name to the name shown in Word.
pub fn ui_name(internal: &str) -> String {
    let lower = internal.to_ascii_lowercase();
    match lower.as_str() {
        "caption" => "Caption".to_string(),
        "footer" => "Footer".to_string(),
        "header" => "Header".to_string(),
        "title" => "Title".to_string(),
        _ => match lower.strip_prefix("heading ") {
            Some(level) if !level.is_empty() && level.bytes().all(|b| b.is_ascii_digit()) => {
                format!("Heading {}", level)
            }
            _ => internal.to_string(),
        },
    }
}
