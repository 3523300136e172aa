//! # docx2tex
//!
//! Convert Word (`.docx`) documents into self-contained LaTeX projects.
//!
//! A conversion reads the main document part, its styles, relationships
//! and core properties, writes embedded images as PNG files, generates a
//! `document.tex` and packages the project into a zip archive ready for
//! upload to an online LaTeX editor.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docx2tex::{convert_file, ConvertOptions};
//!
//! fn main() -> docx2tex::Result<()> {
//!     let report = convert_file("paper.docx", "out", &ConvertOptions::default())?;
//!
//!     // out/latex/document.tex, out/latex/images/, out/latex_project.zip
//!     println!("{}", report.layout.tex_path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Output
//!
//! - **Headings**: styles named `Heading 1` become `\section`, deeper
//!   levels become `\subsection`
//! - **Tables**: bordered `tabular` floats captioned `Table n`
//! - **Figures**: one per extracted image, captioned `Image n`
//! - **Equations**: paragraphs styled `Equation` become display math
//! - **Escaping**: all document text is escaped for LaTeX, with common
//!   Unicode symbols mapped to their macros

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod package;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{
    convert_document, convert_file, convert_file_with_progress, ConversionReport, ConvertOptions,
    ExtractionStatus, Layout, ProjectLayout, ResourceEntry, Stage, StyleClass,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_docx, DocxFormat};
pub use error::{Error, Result};
pub use model::{
    Block, Document, Metadata, Paragraph, Relationship, Table, TableCell, TableRow, TextRun,
    TextStyle,
};
pub use package::{package_directory, PackageSummary};
pub use parser::{DocxParser, ErrorMode, ParseOptions};
pub use render::{escape_math, escape_text, to_latex, ConversionStats, MarkupBuffer, RenderOptions};

use std::io::{Read, Seek};
use std::path::Path;

/// Parse a DOCX file and return a structured document.
///
/// # Example
///
/// ```no_run
/// use docx2tex::parse_file;
///
/// let doc = parse_file("report.docx").unwrap();
/// println!("Tables: {}", doc.tables().count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parse_file_with_options(path, ParseOptions::default())
}

/// Parse a DOCX file with custom options.
///
/// # Example
///
/// ```no_run
/// use docx2tex::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().strict();
/// let doc = parse_file_with_options("report.docx", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    DocxParser::open_with_options(path, options)?.parse()
}

/// Parse a DOCX document from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    parse_bytes_with_options(data, ParseOptions::default())
}

/// Parse a DOCX document from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    DocxParser::from_bytes_with_options(data, options)?.parse()
}

/// Parse a DOCX document from a seekable reader.
pub fn parse_reader<R: Read + Seek>(reader: R) -> Result<Document> {
    DocxParser::from_reader(reader)?.parse()
}

/// Builder for configuring a conversion.
///
/// # Example
///
/// ```no_run
/// use docx2tex::Docx2Tex;
///
/// let report = Docx2Tex::new()
///     .with_figure_width(0.6)
///     .inline_figures()
///     .without_archive()
///     .convert("paper.docx", "out")?;
/// println!("{} figures", report.stats.figure_count);
/// # Ok::<(), docx2tex::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Docx2Tex {
    options: ConvertOptions,
}

impl Docx2Tex {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip malformed auxiliary parts instead of failing.
    pub fn lenient(mut self) -> Self {
        self.options.parse = self.options.parse.lenient();
        self
    }

    /// Fail on any malformed part.
    pub fn strict(mut self) -> Self {
        self.options.parse = self.options.parse.strict();
        self
    }

    /// Set the figure width as a fraction of `\textwidth`.
    pub fn with_figure_width(mut self, width: f32) -> Self {
        self.options.render = self.options.render.with_figure_width(width);
        self
    }

    /// Place figures where images are drawn instead of after the tables.
    pub fn inline_figures(mut self) -> Self {
        self.options.layout = Layout::Inline;
        self
    }

    /// Emit a title block from the document's core properties.
    pub fn with_title_page(mut self) -> Self {
        self.options.render = self.options.render.with_title_block(true);
        self
    }

    /// Do not write the project archive.
    pub fn without_archive(mut self) -> Self {
        self.options.create_archive = false;
        self
    }

    /// Write image payloads as stored, without PNG transcoding.
    pub fn keep_raw_images(mut self) -> Self {
        self.options.transcode_images = false;
        self
    }

    /// Replace the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.options.render = options;
        self
    }

    /// The options this builder will convert with.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert a DOCX file into a LaTeX project under `output_dir`.
    pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output_dir: Q,
    ) -> Result<ConversionReport> {
        convert_file(input, output_dir, &self.options)
    }
}
