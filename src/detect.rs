//! DOCX format detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Part name of the main document in a WordprocessingML package.
pub const MAIN_DOCUMENT_PART: &str = "word/document.xml";

/// Part name of the package content-type table.
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// Zip local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// DOCX package information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxFormat {
    /// Number of parts (zip entries) in the package
    pub part_count: usize,
    /// Whether the package carries a style sheet
    pub has_styles: bool,
    /// Whether the main document has a relationship table
    pub has_relationships: bool,
    /// Whether the package carries core properties
    pub has_core_properties: bool,
}

impl std::fmt::Display for DocxFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DOCX ({} parts)", self.part_count)
    }
}

/// Detect DOCX format from a file path.
///
/// # Example
/// ```no_run
/// use docx2tex::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("report.docx").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DocxFormat> {
    let file = File::open(path)?;
    detect_format_from_reader(BufReader::new(file))
}

/// Detect DOCX format from bytes.
///
/// # Returns
/// * `Ok(DocxFormat)` if the data is a zip package with a main document part
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DocxFormat> {
    if !is_zip_bytes(data) {
        return Err(Error::UnknownFormat);
    }
    detect_format_from_reader(Cursor::new(data))
}

/// Detect DOCX format from any seekable reader.
pub fn detect_format_from_reader<R: Read + Seek>(reader: R) -> Result<DocxFormat> {
    let archive = ZipArchive::new(reader).map_err(|_| Error::UnknownFormat)?;
    detect_format_from_archive(&archive)
}

/// Inspect an already opened zip archive.
pub fn detect_format_from_archive<R: Read + Seek>(archive: &ZipArchive<R>) -> Result<DocxFormat> {
    let names: Vec<&str> = archive.file_names().collect();
    let has = |part: &str| names.iter().any(|n| *n == part);

    if !has(MAIN_DOCUMENT_PART) {
        return Err(Error::UnknownFormat);
    }

    Ok(DocxFormat {
        part_count: names.len(),
        has_styles: has("word/styles.xml"),
        has_relationships: has("word/_rels/document.xml.rels"),
        has_core_properties: has("docProps/core.xml"),
    })
}

/// Check if a file is a DOCX package.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes start with a zip local file header.
pub fn is_zip_bytes(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC)
}
