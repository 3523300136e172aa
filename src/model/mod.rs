//! Document model types for word-processing content.
//!
//! This module defines the intermediate representation (IR) that bridges
//! DOCX parsing and LaTeX emission. Blocks are kept in document order and
//! the relationship table is kept in table order; the converter relies on
//! both orders.

mod block;
mod document;
mod paragraph;
mod resource;
mod table;

pub use block::Block;
pub use document::{Document, Metadata};
pub use paragraph::{Paragraph, TextRun, TextStyle};
pub use resource::{detect_mime_type, Relationship, IMAGE_RELATIONSHIP_SUFFIX};
pub use table::{Table, TableCell, TableRow};
