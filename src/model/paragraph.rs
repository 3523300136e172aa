//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of text content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in the paragraph
    pub runs: Vec<TextRun>,

    /// Resolved paragraph style name (e.g., "Heading 1", "Normal")
    pub style_name: Option<String>,

    /// Whether the paragraph holds a display-math object
    pub display_math: bool,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Create a paragraph with plain text and a style name.
    pub fn styled(text: impl Into<String>, style_name: impl Into<String>) -> Self {
        let mut p = Self::with_text(text);
        p.style_name = Some(style_name.into());
        p
    }

    /// Create a heading paragraph using the built-in "Heading N" style.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        Self::styled(text, format!("Heading {}", level))
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.add_run(TextRun::new(text));
    }

    /// Add a styled text run, merging with the previous run when styles match.
    pub fn add_run(&mut self, run: TextRun) {
        if run.is_empty() {
            return;
        }
        if let Some(last) = self.runs.last_mut() {
            if last.style == run.style {
                last.text.push_str(&run.text);
                return;
            }
        }
        self.runs.push(run);
    }

    /// Add a line break.
    pub fn add_line_break(&mut self) {
        match self.runs.last_mut() {
            Some(last) => last.text.push('\n'),
            None => self.runs.push(TextRun::new("\n")),
        }
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }

    /// Get the style name, if any.
    pub fn style_name(&self) -> Option<&str> {
        self.style_name.as_deref()
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a text run with the given style.
    pub fn with_style(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::with_style(
            text,
            TextStyle {
                bold: true,
                ..Default::default()
            },
        )
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::with_style(
            text,
            TextStyle {
                italic: true,
                ..Default::default()
            },
        )
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Character formatting carried into the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,

    /// Strikethrough text
    pub strikethrough: bool,

    /// Superscript
    pub superscript: bool,

    /// Subscript
    pub subscript: bool,
}

impl TextStyle {
    /// Check if no formatting is applied.
    pub fn is_plain(&self) -> bool {
        *self == TextStyle::default()
    }
}
