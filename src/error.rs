//! Error types for docx2tex library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docx2tex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input document does not exist.
    #[error("Input document not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The file format is not recognized as DOCX.
    #[error("Unknown file format: not a valid DOCX package")]
    UnknownFormat,

    /// Error reading the zip container.
    #[error("Zip container error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error parsing one of the XML parts.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// A required package part is missing.
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// Error decoding or re-encoding an embedded image.
    #[error("Image decoding error: {0}")]
    ImageDecode(String),

    /// Error during LaTeX rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Error while building the project archive.
    #[error("Packaging error: {0}")]
    Package(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Error::Io(e),
            _ => Error::ImageDecode(err.to_string()),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::Package(err.to_string())
    }
}
