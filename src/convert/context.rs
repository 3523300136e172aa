//! Per-run conversion state and output layout.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::model::Document;
use crate::render::{ConversionStats, MarkupBuffer};

use super::extract::ResourceEntry;

/// Name of the project directory under the output directory.
pub const LATEX_DIR: &str = "latex";

/// Name of the images directory under the project directory.
pub const IMAGES_DIR: &str = "images";

/// File name of the generated LaTeX source.
pub const TEX_FILE: &str = "document.tex";

/// File name of the project archive under the output directory.
pub const ARCHIVE_FILE: &str = "latex_project.zip";

/// Paths of a generated LaTeX project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectLayout {
    /// Output directory given by the caller
    pub output_dir: PathBuf,
    /// Project root (`<out>/latex`)
    pub latex_dir: PathBuf,
    /// Image directory (`<out>/latex/images`)
    pub images_dir: PathBuf,
    /// LaTeX source (`<out>/latex/document.tex`)
    pub tex_path: PathBuf,
    /// Project archive (`<out>/latex_project.zip`)
    pub archive_path: PathBuf,
}

impl ProjectLayout {
    /// Lay out a project under an output directory.
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        let output_dir = output_dir.as_ref().to_path_buf();
        let latex_dir = output_dir.join(LATEX_DIR);
        Self {
            images_dir: latex_dir.join(IMAGES_DIR),
            tex_path: latex_dir.join(TEX_FILE),
            archive_path: output_dir.join(ARCHIVE_FILE),
            latex_dir,
            output_dir,
        }
    }

    /// File name of the image with the given identifier.
    pub fn image_file_name(id: usize) -> String {
        format!("image{}.png", id)
    }

    /// On-disk path of the image with the given identifier.
    pub fn image_path(&self, id: usize) -> PathBuf {
        self.images_dir.join(Self::image_file_name(id))
    }

    /// Path of the image as referenced from the LaTeX source.
    pub fn image_reference(id: usize) -> String {
        format!("{}/{}", IMAGES_DIR, Self::image_file_name(id))
    }
}

/// Mutable state of one conversion run, passed through every stage.
#[derive(Debug)]
pub struct ConversionContext<'a> {
    /// Source document (read-only for the run)
    pub document: &'a Document,
    /// Output paths
    pub layout: ProjectLayout,
    /// Commands emitted so far
    pub buffer: MarkupBuffer,
    /// Resource entries from the extraction stage, in identifier order
    pub resources: Vec<ResourceEntry>,
    /// Running statistics
    pub stats: ConversionStats,
    /// Equation bodies collected by the paragraph pass
    pub(crate) equations: Vec<String>,
    tables_emitted: usize,
}

impl<'a> ConversionContext<'a> {
    /// Create a context for converting `document` into `layout`.
    pub fn new(document: &'a Document, layout: ProjectLayout) -> Self {
        Self {
            document,
            layout,
            buffer: MarkupBuffer::new(),
            resources: Vec::new(),
            stats: ConversionStats::new(),
            equations: Vec::new(),
            tables_emitted: 0,
        }
    }

    /// Take the caption number for the next table (1-based).
    pub(crate) fn next_table_number(&mut self) -> usize {
        self.tables_emitted += 1;
        self.tables_emitted
    }

    /// Check whether the image file for an identifier exists on disk.
    pub fn image_exists(&self, id: usize) -> bool {
        self.layout.image_path(id).is_file()
    }

    /// Find the resource entry extracted for a relationship ID.
    pub fn resource_for(&self, rel_id: &str) -> Option<&ResourceEntry> {
        self.resources.iter().find(|r| r.rel_id == rel_id)
    }
}
