//! Rendering options and configuration.

/// Smallest accepted figure width, as a fraction of `\textwidth`.
pub const MIN_FIGURE_WIDTH: f32 = 0.05;

/// Largest accepted figure width, as a fraction of `\textwidth`.
pub const MAX_FIGURE_WIDTH: f32 = 1.0;

/// Options for rendering LaTeX output.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Document class (e.g., "article", "report")
    pub document_class: String,

    /// Figure width as a fraction of `\textwidth`
    pub figure_width: f32,

    /// Float placement specifier for tables and figures
    pub float_placement: String,

    /// Emit `\title`/`\author`/`\date` and `\maketitle` from document metadata
    pub include_title_block: bool,

    /// Additional packages loaded after the standard set
    pub extra_packages: Vec<String>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document class.
    pub fn with_document_class(mut self, class: impl Into<String>) -> Self {
        self.document_class = class.into();
        self
    }

    /// Set the figure width, clamped to a sensible fraction of the text width.
    pub fn with_figure_width(mut self, width: f32) -> Self {
        self.figure_width = if width.is_finite() {
            width.clamp(MIN_FIGURE_WIDTH, MAX_FIGURE_WIDTH)
        } else {
            RenderOptions::default().figure_width
        };
        self
    }

    /// Set the float placement specifier.
    pub fn with_float_placement(mut self, placement: impl Into<String>) -> Self {
        self.float_placement = placement.into();
        self
    }

    /// Enable or disable the title block.
    pub fn with_title_block(mut self, include: bool) -> Self {
        self.include_title_block = include;
        self
    }

    /// Load an additional package.
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.extra_packages.push(package.into());
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            document_class: "article".to_string(),
            figure_width: 0.8,
            float_placement: "h".to_string(),
            include_title_block: false,
            extra_packages: Vec::new(),
        }
    }
}
