//! Small helpers shared by the part parsers.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, BytesText};
use std::io::{Read, Seek};
use zip::result::ZipError;
use zip::ZipArchive;

/// Get an attribute value by qualified name, unescaped.
pub(crate) fn attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .map(|a| match a.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => String::from_utf8_lossy(&a.value).into_owned(),
        })
}

/// Evaluate an OOXML toggle property such as `<w:b/>` or `<w:b w:val="0"/>`.
pub(crate) fn is_on(e: &BytesStart<'_>) -> bool {
    match attr(e, b"w:val") {
        None => true,
        Some(v) => !matches!(v.as_str(), "0" | "false" | "off" | "none"),
    }
}

/// Unescape a text node.
pub(crate) fn text(e: &BytesText<'_>) -> Result<String> {
    e.unescape()
        .map(|t| t.into_owned())
        .map_err(|err| Error::Xml(err.to_string()))
}

/// Upper bound on the buffer reserved from a part's declared size.
const MAX_PREALLOCATION: u64 = 16 * 1024 * 1024;

/// Read a package part, returning `None` when it does not exist.
///
/// The declared size only sizes the initial buffer, up to
/// [`MAX_PREALLOCATION`]; the part is read to its actual end.
pub(crate) fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<Vec<u8>>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut data = Vec::with_capacity(file.size().min(MAX_PREALLOCATION) as usize);
    file.read_to_end(&mut data)?;
    Ok(Some(data))
}
