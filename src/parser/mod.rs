//! DOCX parsing module.

mod body;
mod docx_parser;
mod options;
mod properties;
mod relationships;
mod styles;
mod xml;

pub use docx_parser::{DocxParser, STYLES_PART};
pub use options::{ErrorMode, ParseOptions};
pub use properties::{parse_core_properties, CORE_PROPERTIES_PART};
pub use relationships::{parse_relationships, rels_part_for};
pub use styles::{ui_name, StyleSheet, DEFAULT_PARAGRAPH_STYLE};
