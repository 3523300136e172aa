//! DOCX package parser.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use zip::result::ZipError;
use zip::ZipArchive;

use crate::detect::{detect_format_from_archive, DocxFormat, MAIN_DOCUMENT_PART};
use crate::error::{Error, Result};
use crate::model::{Document, Metadata, Relationship};

use super::body::walk_body;
use super::options::ParseOptions;
use super::properties::{parse_core_properties, CORE_PROPERTIES_PART};
use super::relationships::{parse_relationships, rels_part_for};
use super::styles::StyleSheet;
use super::xml::read_part;

/// Part name of the style sheet.
pub const STYLES_PART: &str = "word/styles.xml";

/// Directory that relative targets of the main document part resolve against.
const MAIN_DOCUMENT_DIR: &str = "word";

/// DOCX document parser.
pub struct DocxParser<R: Read + Seek> {
    archive: ZipArchive<R>,
    format: DocxFormat,
    options: ParseOptions,
}

impl DocxParser<BufReader<File>> {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a DOCX file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InputNotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        Self::from_reader_with_options(BufReader::new(file), options)
    }
}

impl DocxParser<Cursor<Vec<u8>>> {
    /// Parse a DOCX from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a DOCX from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        Self::from_reader_with_options(Cursor::new(data.to_vec()), options)
    }
}

impl<R: Read + Seek> DocxParser<R> {
    /// Parse a DOCX from a seekable reader.
    pub fn from_reader(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a DOCX from a seekable reader with custom options.
    pub fn from_reader_with_options(reader: R, options: ParseOptions) -> Result<Self> {
        let archive = ZipArchive::new(reader).map_err(|e| match e {
            ZipError::InvalidArchive(_) | ZipError::UnsupportedArchive(_) => Error::UnknownFormat,
            other => Error::from(other),
        })?;
        let format = detect_format_from_archive(&archive)?;
        log::debug!("Opened {}", format);

        Ok(Self {
            archive,
            format,
            options,
        })
    }

    /// Get the detected package information.
    pub fn format(&self) -> &DocxFormat {
        &self.format
    }

    /// Parse the package and return a structured Document.
    pub fn parse(mut self) -> Result<Document> {
        let mut document = Document::new();

        document.relationships = self.read_relationships()?;
        let styles = self.read_styles()?;
        document.metadata = self.read_metadata()?;

        let xml = read_part(&mut self.archive, MAIN_DOCUMENT_PART)?
            .ok_or_else(|| Error::MissingPart(MAIN_DOCUMENT_PART.to_string()))?;
        document.blocks = walk_body(&xml, &styles)?;

        if self.options.extract_resources {
            self.load_image_payloads(&mut document.relationships)?;
        }

        log::info!(
            "Parsed document: {} blocks, {} image relationships",
            document.blocks.len(),
            document.image_relationships().count()
        );

        Ok(document)
    }

    fn read_relationships(&mut self) -> Result<Vec<Relationship>> {
        let part = rels_part_for(MAIN_DOCUMENT_PART);
        let Some(data) = read_part(&mut self.archive, &part)? else {
            log::debug!("No relationship table at {}", part);
            return Ok(Vec::new());
        };
        self.lenient(&part, parse_relationships(&data))
    }

    fn read_styles(&mut self) -> Result<StyleSheet> {
        let Some(data) = read_part(&mut self.archive, STYLES_PART)? else {
            log::debug!("No style sheet; paragraphs default to Normal");
            return Ok(StyleSheet::new());
        };
        self.lenient(STYLES_PART, StyleSheet::parse(&data))
    }

    fn read_metadata(&mut self) -> Result<Metadata> {
        let Some(data) = read_part(&mut self.archive, CORE_PROPERTIES_PART)? else {
            return Ok(Metadata::default());
        };
        self.lenient(CORE_PROPERTIES_PART, parse_core_properties(&data))
    }

    /// Read the payload of every internal image relationship.
    fn load_image_payloads(&mut self, relationships: &mut [Relationship]) -> Result<()> {
        for rel in relationships.iter_mut().filter(|r| r.is_image()) {
            if rel.external {
                log::warn!("Image {} links to external target {}; not embedded", rel.id, rel.target);
                continue;
            }
            let part = rel.part_name(MAIN_DOCUMENT_DIR);
            match read_part(&mut self.archive, &part) {
                Ok(Some(data)) => rel.data = Some(data),
                Ok(None) => log::warn!("Image {} points to missing part {}", rel.id, part),
                Err(e) if self.options.is_lenient() => {
                    log::warn!("Failed to read image part {}: {}", part, e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Apply the error mode to the result of parsing an auxiliary part.
    fn lenient<T: Default>(&self, part: &str, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => Ok(value),
            Err(e) if self.options.is_lenient() => {
                log::warn!("Ignoring malformed part {}: {}", part, e);
                Ok(T::default())
            }
            Err(e) => Err(e),
        }
    }
}
