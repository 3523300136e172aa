//! Body-level blocks.

use super::{Paragraph, Table};
use serde::{Deserialize, Serialize};

/// A top-level element of the document body, in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph (heading, body text or equation)
    Paragraph(Paragraph),

    /// A table
    Table(Table),

    /// An embedded image drawn at this position
    Image {
        /// Relationship ID of the image payload (e.g., "rId7")
        rel_id: String,
        /// Alternative text from the drawing properties
        alt_text: Option<String>,
    },
}

impl Block {
    /// Get the paragraph if this block is one.
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    /// Get the table if this block is one.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Block::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Paragraph(p) => p.plain_text(),
            Block::Table(t) => t.plain_text(),
            Block::Image { alt_text, .. } => alt_text.clone().unwrap_or_default(),
        }
    }
}
