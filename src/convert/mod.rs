//! Structural conversion from a parsed document to a LaTeX project.
//!
//! A run extracts the images, emits markup in a fixed pass order,
//! serializes the buffer to `latex/document.tex` and packages the project
//! directory into `latex_project.zip`.
//!
//! # Example
//!
//! ```no_run
//! use docx2tex::convert::{convert_file, ConvertOptions};
//!
//! fn main() -> docx2tex::Result<()> {
//!     let report = convert_file("paper.docx", "out", &ConvertOptions::default())?;
//!     println!("{} figures", report.stats.figure_count);
//!     Ok(())
//! }
//! ```

mod classify;
mod context;
mod emit;
mod extract;

pub use classify::{classify_paragraph, classify_style, StyleClass, HEADING_MARKER};
pub use context::{
    ConversionContext, ProjectLayout, ARCHIVE_FILE, IMAGES_DIR, LATEX_DIR, TEX_FILE,
};
pub use emit::{emit_equations, emit_figures, emit_inline, emit_paragraphs, emit_tables};
pub use extract::{clear_stale_images, extract_images, write_image, ExtractionStatus, ResourceEntry};

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Document, Metadata};
use crate::package::{package_directory, PackageSummary};
use crate::parser::{DocxParser, ParseOptions};
use crate::render::{to_latex, ConversionStats, RenderOptions};

/// Where figures are placed in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Layout {
    /// Paragraphs, then tables, then figures, then equations
    #[default]
    Passes,
    /// Document order, with each figure at its first drawing
    Inline,
}

/// Options for document conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Parsing options
    pub parse: ParseOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Output layout
    pub layout: Layout,

    /// Re-encode non-PNG images as PNG
    pub transcode_images: bool,

    /// Write `latex_project.zip` after the project directory
    pub create_archive: bool,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set the output layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Enable or disable PNG transcoding of other image formats.
    pub fn with_transcode_images(mut self, transcode: bool) -> Self {
        self.transcode_images = transcode;
        self
    }

    /// Enable or disable the project archive.
    pub fn with_archive(mut self, create: bool) -> Self {
        self.create_archive = create;
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            render: RenderOptions::default(),
            layout: Layout::default(),
            transcode_images: true,
            create_archive: true,
        }
    }
}

/// Stages of a conversion run, reported to progress callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading the input package
    Reading,
    /// Writing images
    Extracting,
    /// Building the markup buffer
    Emitting,
    /// Writing the LaTeX source
    Writing,
    /// Building the archive
    Packaging,
    /// Finished
    Done,
}

impl Stage {
    /// Number of stages before [`Stage::Done`].
    pub const COUNT: u64 = 5;
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Reading => "Reading document...",
            Stage::Extracting => "Extracting images...",
            Stage::Emitting => "Generating LaTeX...",
            Stage::Writing => "Writing document.tex...",
            Stage::Packaging => "Packaging project...",
            Stage::Done => "Done!",
        };
        f.write_str(label)
    }
}

/// Result of a conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// Input document, when converted from a file
    pub input: Option<PathBuf>,

    /// Output paths
    pub layout: ProjectLayout,

    /// One entry per image relationship, in identifier order
    pub resources: Vec<ResourceEntry>,

    /// Conversion statistics
    pub stats: ConversionStats,

    /// Source document metadata
    pub metadata: Metadata,

    /// Archive summary, when an archive was written
    pub package: Option<PackageSummary>,
}

impl ConversionReport {
    /// Iterate over the images that were written.
    pub fn extracted_images(&self) -> impl Iterator<Item = &ResourceEntry> {
        self.resources.iter().filter(|r| r.is_extracted())
    }

    /// Iterate over the images that were not written.
    pub fn skipped_images(&self) -> impl Iterator<Item = &ResourceEntry> {
        self.resources.iter().filter(|r| !r.is_extracted())
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Other(e.to_string()))
    }
}

/// Convert a DOCX file into a LaTeX project under `output_dir`.
///
/// The input must exist; otherwise [`Error::InputNotFound`] is returned
/// before anything is created under `output_dir`.
pub fn convert_file(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<ConversionReport> {
    convert_file_with_progress(input, output_dir, options, |_| {})
}

/// Convert a DOCX file, reporting each stage to `progress`.
pub fn convert_file_with_progress(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    options: &ConvertOptions,
    mut progress: impl FnMut(Stage),
) -> Result<ConversionReport> {
    let input = input.as_ref();
    if !input.is_file() {
        return Err(Error::InputNotFound(input.to_path_buf()));
    }

    progress(Stage::Reading);
    log::info!("Converting {}", input.display());
    let document = DocxParser::open_with_options(input, options.parse.clone())?.parse()?;

    let mut report = run(&document, output_dir.as_ref(), options, &mut progress)?;
    report.input = Some(input.to_path_buf());
    Ok(report)
}

/// Convert an already parsed document into a LaTeX project under `output_dir`.
pub fn convert_document(
    document: &Document,
    output_dir: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<ConversionReport> {
    run(document, output_dir.as_ref(), options, &mut |_: Stage| {})
}

fn run(
    document: &Document,
    output_dir: &Path,
    options: &ConvertOptions,
    progress: &mut dyn FnMut(Stage),
) -> Result<ConversionReport> {
    let layout = ProjectLayout::new(output_dir);
    fs::create_dir_all(&layout.latex_dir)?;
    let mut ctx = ConversionContext::new(document, layout);

    progress(Stage::Extracting);
    ctx.resources = extract_images(document, &ctx.layout, options.transcode_images)?;
    for entry in &ctx.resources {
        ctx.stats.images_attempted += 1;
        match entry.status {
            ExtractionStatus::Extracted => ctx.stats.images_extracted += 1,
            ExtractionStatus::Failed(_) => ctx.stats.images_failed += 1,
            ExtractionStatus::Missing => ctx.stats.images_missing += 1,
        }
    }

    progress(Stage::Emitting);
    match options.layout {
        Layout::Passes => {
            emit_paragraphs(&mut ctx);
            emit_tables(&mut ctx);
            emit_figures(&mut ctx);
            emit_equations(&mut ctx);
        }
        Layout::Inline => emit_inline(&mut ctx),
    }

    progress(Stage::Writing);
    let latex = to_latex(&ctx.buffer, &document.metadata, &options.render)?;
    fs::write(&ctx.layout.tex_path, latex)?;
    log::info!(
        "Wrote {} ({} figures, {} tables)",
        ctx.layout.tex_path.display(),
        ctx.stats.figure_count,
        ctx.stats.table_count
    );

    let package = if options.create_archive {
        progress(Stage::Packaging);
        Some(package_directory(&ctx.layout.latex_dir, &ctx.layout.archive_path)?)
    } else {
        None
    };
    progress(Stage::Done);

    Ok(ConversionReport {
        input: None,
        layout: ctx.layout,
        resources: ctx.resources,
        stats: ctx.stats,
        metadata: document.metadata.clone(),
        package,
    })
}
