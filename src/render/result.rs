//! Conversion statistics.

use serde::{Deserialize, Serialize};

/// Statistics collected while building and extracting a LaTeX project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Number of section and subsection commands
    pub heading_count: u32,

    /// Number of body paragraphs emitted
    pub paragraph_count: u32,

    /// Number of table floats emitted
    pub table_count: u32,

    /// Number of figure floats emitted
    pub figure_count: u32,

    /// Number of display-math blocks emitted
    pub equation_count: u32,

    /// Number of image relationships attempted
    pub images_attempted: u32,

    /// Number of images written to disk
    pub images_extracted: u32,

    /// Number of images whose payload could not be decoded or written
    pub images_failed: u32,

    /// Number of images without a payload in the package
    pub images_missing: u32,

    /// Approximate word count of emitted text (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count of emitted text (excluding whitespace)
    pub char_count: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Increment figure count.
    pub fn add_figure(&mut self) {
        self.figure_count += 1;
    }

    /// Increment equation count.
    pub fn add_equation(&mut self) {
        self.equation_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Check that every extracted image received a figure.
    pub fn figures_match_images(&self) -> bool {
        self.figure_count == self.images_extracted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = ConversionStats::new();
        stats.add_heading();
        stats.add_paragraph();
        stats.add_paragraph();
        stats.add_table();
        stats.add_equation();
        assert_eq!(stats.heading_count, 1);
        assert_eq!(stats.paragraph_count, 2);
        assert_eq!(stats.table_count, 1);
        assert_eq!(stats.equation_count, 1);
    }

    #[test]
    fn test_count_text() {
        let mut stats = ConversionStats::new();
        stats.count_text("Body text.");
        stats.count_text("  A  B ");
        assert_eq!(stats.word_count, 4);
        assert_eq!(stats.char_count, 11);
    }

    #[test]
    fn test_figures_match_images() {
        let mut stats = ConversionStats::new();
        stats.images_extracted = 1;
        assert!(!stats.figures_match_images());
        stats.add_figure();
        assert!(stats.figures_match_images());
    }
}
