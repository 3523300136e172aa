//! Relationship types for embedded content (images, styles, links, etc.)

use serde::{Deserialize, Serialize};

/// Suffix shared by the transitional and strict image relationship types.
pub const IMAGE_RELATIONSHIP_SUFFIX: &str = "/image";

const IMAGE_RELATIONSHIP_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// One entry of the main document part's relationship table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId7")
    pub id: String,

    /// Relationship type URI
    pub rel_type: String,

    /// Target as written in the relationship table (e.g., "media/image1.png")
    pub target: String,

    /// Whether the target lives outside the package
    pub external: bool,

    /// Raw binary payload, read for internal image targets
    #[serde(skip_serializing)]
    pub data: Option<Vec<u8>>,
}

impl Relationship {
    /// Create a new relationship without payload.
    pub fn new(id: impl Into<String>, rel_type: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rel_type: rel_type.into(),
            target: target.into(),
            external: false,
            data: None,
        }
    }

    /// Create an image relationship with its payload.
    pub fn image(id: impl Into<String>, target: impl Into<String>, data: Vec<u8>) -> Self {
        Self::new(id, IMAGE_RELATIONSHIP_TYPE, target).with_data(data)
    }

    /// Set the binary payload.
    pub fn with_data(mut self, data: Vec<u8>) -> Self {
        self.data = Some(data);
        self
    }

    /// Mark the target as external.
    pub fn external(mut self) -> Self {
        self.external = true;
        self
    }

    /// Check if this relationship points at an image.
    pub fn is_image(&self) -> bool {
        self.rel_type.ends_with(IMAGE_RELATIONSHIP_SUFFIX)
    }

    /// Get the payload size in bytes.
    pub fn size(&self) -> usize {
        self.data.as_ref().map_or(0, Vec::len)
    }

    /// Get the MIME type of the payload, from magic bytes or the target extension.
    pub fn mime_type(&self) -> Option<&'static str> {
        self.data
            .as_deref()
            .and_then(detect_mime_type)
            .or_else(|| mime_type_from_target(&self.target))
    }

    /// Resolve the target to a package part name relative to the given source part directory.
    ///
    /// Targets starting with `/` are package-absolute; others are relative to
    /// `base_dir` (e.g., "word") and may use `..` segments.
    pub fn part_name(&self, base_dir: &str) -> String {
        if let Some(absolute) = self.target.strip_prefix('/') {
            return absolute.to_string();
        }

        let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
        for segment in self.target.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                s => segments.push(s),
            }
        }
        segments.join("/")
    }
}

/// Detect MIME type from data magic bytes.
pub fn detect_mime_type(data: &[u8]) -> Option<&'static str> {
    if data.len() < 8 {
        return None;
    }

    // PNG: 89 50 4E 47 0D 0A 1A 0A
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("image/png");
    }

    // JPEG: FF D8 FF
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }

    // GIF: GIF87a or GIF89a
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some("image/gif");
    }

    // TIFF: 49 49 2A 00 (little-endian) or 4D 4D 00 2A (big-endian)
    if data.starts_with(&[0x49, 0x49, 0x2A, 0x00]) || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A]) {
        return Some("image/tiff");
    }

    // BMP: BM
    if data.starts_with(b"BM") {
        return Some("image/bmp");
    }

    // WEBP: RIFF....WEBP
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("image/webp");
    }

    // EMF: record type 1 followed by " EMF" signature at offset 40
    if data.len() >= 44 && data.starts_with(&[0x01, 0x00, 0x00, 0x00]) && &data[40..44] == b" EMF" {
        return Some("image/emf");
    }

    // WMF placeable header: D7 CD C6 9A
    if data.starts_with(&[0xD7, 0xCD, 0xC6, 0x9A]) {
        return Some("image/wmf");
    }

    None
}

fn mime_type_from_target(target: &str) -> Option<&'static str> {
    let ext = target.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "tif" | "tiff" => Some("image/tiff"),
        "bmp" => Some("image/bmp"),
        "webp" => Some("image/webp"),
        "emf" => Some("image/emf"),
        "wmf" => Some("image/wmf"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_image() {
        let rel = Relationship::image("rId5", "media/image1.png", vec![0x89, 0x50]);
        assert!(rel.is_image());
        assert_eq!(rel.size(), 2);
        assert!(!rel.external);
    }

    #[test]
    fn test_strict_image_type() {
        let rel = Relationship::new(
            "rId1",
            "http://purl.oclc.org/ooxml/officeDocument/relationships/image",
            "media/a.jpeg",
        );
        assert!(rel.is_image());
        assert_eq!(rel.mime_type(), Some("image/jpeg"));
    }

    #[test]
    fn test_non_image_relationship() {
        let rel = Relationship::new(
            "rId2",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink",
            "https://example.com",
        )
        .external();
        assert!(!rel.is_image());
        assert!(rel.external);
    }

    #[test]
    fn test_detect_mime_type() {
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(detect_mime_type(&png), Some("image/png"));

        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
        assert_eq!(detect_mime_type(&jpeg), Some("image/jpeg"));

        assert_eq!(detect_mime_type(&[0x00; 4]), None);
        assert_eq!(detect_mime_type(&[0x00; 16]), None);
    }

    #[test]
    fn test_part_name_resolution() {
        let rel = Relationship::new("rId1", "t", "media/image1.png");
        assert_eq!(rel.part_name("word"), "word/media/image1.png");

        let rel = Relationship::new("rId2", "t", "../media/image2.png");
        assert_eq!(rel.part_name("word"), "media/image2.png");

        let rel = Relationship::new("rId3", "t", "/word/media/image3.png");
        assert_eq!(rel.part_name("word"), "word/media/image3.png");

        let rel = Relationship::new("rId4", "t", "./media/image4.png");
        assert_eq!(rel.part_name("word/"), "word/media/image4.png");
    }
}
