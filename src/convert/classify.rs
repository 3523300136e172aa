//! Paragraph classification by style name.

use crate::model::Paragraph;
use serde::{Deserialize, Serialize};

/// Style-name prefix of built-in heading styles.
pub const HEADING_MARKER: &str = "Heading";

/// How a paragraph is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleClass {
    /// Heading with its numeric level; only level 1 maps to a top-level section
    Heading(i64),
    /// Display-math paragraph
    Equation,
    /// Ordinary body text
    Body,
}

impl StyleClass {
    /// Check if this is a heading of any level.
    pub fn is_heading(&self) -> bool {
        matches!(self, StyleClass::Heading(_))
    }
}

/// Classify a paragraph style name.
///
/// A heading needs a numeric level after the marker (`Heading 2`); any other
/// suffix is logged and treated as body text.
pub fn classify_style(style_name: Option<&str>) -> StyleClass {
    let Some(name) = style_name.map(str::trim).filter(|n| !n.is_empty()) else {
        return StyleClass::Body;
    };

    if let Some(suffix) = strip_heading_marker(name) {
        match suffix.trim().parse::<i64>() {
            Ok(level) => return StyleClass::Heading(level),
            Err(_) => {
                log::warn!(
                    "Malformed heading style '{}'; treating paragraph as body text",
                    name
                );
                return StyleClass::Body;
            }
        }
    }

    if is_equation_style(name) {
        StyleClass::Equation
    } else {
        StyleClass::Body
    }
}

/// Classify a paragraph, treating display-math content as an equation.
pub fn classify_paragraph(paragraph: &Paragraph) -> StyleClass {
    if paragraph.display_math {
        return StyleClass::Equation;
    }
    classify_style(paragraph.style_name())
}

fn strip_heading_marker(name: &str) -> Option<&str> {
    let prefix = name.get(..HEADING_MARKER.len())?;
    if prefix.eq_ignore_ascii_case(HEADING_MARKER) {
        Some(&name[HEADING_MARKER.len()..])
    } else {
        None
    }
}

fn is_equation_style(name: &str) -> bool {
    let lower = name.to_lowercase();
    if lower.contains("equation") {
        return true;
    }
    matches!(lower.split_whitespace().next(), Some("math" | "formula"))
}
