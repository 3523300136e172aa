//! Parsing options and configuration.

/// Options for parsing DOCX documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode for auxiliary parts
    pub error_mode: ErrorMode,

    /// Whether to read embedded image payloads
    pub extract_resources: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (malformed styles, relationships and properties become warnings).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable strict mode (any malformed part aborts parsing).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Enable or disable resource extraction.
    pub fn with_resources(mut self, extract: bool) -> Self {
        self.extract_resources = extract;
        self
    }

    /// Check if lenient mode is active.
    pub fn is_lenient(&self) -> bool {
        self.error_mode == ErrorMode::Lenient
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            extract_resources: true,
        }
    }
}

/// Error handling mode during parsing.
///
/// The main document part is always parsed strictly; the mode applies to
/// the style sheet, relationship table and core properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    Strict,
    /// Skip invalid auxiliary parts and continue
    #[default]
    Lenient,
}
